// Theme scorer: density-based relevance against the pattern catalog.
//
// Relevance is match density scaled to parts-per-thousand, offset by 3 so
// any hit is visible, and capped at 10:
//
//   relevance = min(10, floor(matches / words * 1000) + 3)
//
// When nothing in the catalog matches but the document has columns, the
// column names themselves become themes ("structural" themes).

use tracing::{debug, warn};

use super::catalog::{CatalogEntry, PatternCatalog};
use super::models::{Theme, MAX_RELEVANCE};
use crate::document::normalize::{Corpus, DocumentStructure};
use crate::text::{sentences, title_case, truncate_chars, word_count};

/// Maximum number of themes kept per run.
pub const MAX_THEMES: usize = 8;
/// Maximum key points per theme.
pub const MAX_KEY_POINTS: usize = 3;
/// Sentences must be longer than this (in characters) to become key points.
pub const MIN_KEY_POINT_CHARS: usize = 20;
/// Key points are truncated to this many characters.
pub const KEY_POINT_CHARS: usize = 100;
/// Columns considered by the structural fallback.
pub const MAX_STRUCTURAL_THEMES: usize = 6;
/// Relevance of the first structural theme; each later column gets one less.
pub const STRUCTURAL_BASE_RELEVANCE: u32 = 8;

/// Score the corpus against the catalog and return ranked themes.
pub fn score_themes(corpus: &Corpus, catalog: &PatternCatalog) -> Vec<Theme> {
    let total_words = word_count(&corpus.text);

    let mut themes: Vec<Theme> = if total_words == 0 {
        Vec::new()
    } else {
        catalog
            .entries()
            .iter()
            .filter_map(|entry| score_entry(entry, &corpus.text, total_words))
            .collect()
    };

    if themes.is_empty() && !corpus.structure.columns.is_empty() {
        warn!(
            columns = corpus.structure.columns.len(),
            "No catalog patterns matched, falling back to structural themes"
        );
        themes = structural_themes(&corpus.structure);
    }

    // Stable sort keeps catalog (or column) order among equal relevance
    themes.sort_by(|a, b| b.relevance.cmp(&a.relevance));
    themes.truncate(MAX_THEMES);

    debug!(themes = themes.len(), words = total_words, "Scored themes");
    themes
}

/// Relevance for a match count over a word count.
pub fn relevance_score(match_count: usize, total_words: usize) -> u32 {
    if match_count == 0 || total_words == 0 {
        return 0;
    }
    let density = (match_count as u64 * 1000) / total_words as u64;
    (density.saturating_add(3)).min(MAX_RELEVANCE as u64) as u32
}

fn score_entry(entry: &CatalogEntry, text: &str, total_words: usize) -> Option<Theme> {
    let matches = entry.count_matches(text);
    if matches == 0 {
        return None;
    }

    Some(Theme {
        name: entry.name.clone(),
        description: entry.description.clone(),
        relevance: relevance_score(matches, total_words),
        key_points: key_points(entry, text),
    })
}

/// Up to three matching sentences, each cut to 100 characters.
fn key_points(entry: &CatalogEntry, text: &str) -> Vec<String> {
    sentences(text)
        .into_iter()
        .filter(|s| s.chars().count() > MIN_KEY_POINT_CHARS)
        .filter(|s| entry.is_match(s))
        .take(MAX_KEY_POINTS)
        .map(|s| truncate_chars(s, KEY_POINT_CHARS))
        .collect()
}

/// Themes derived from column names when no catalog pattern matched.
///
/// Columns that title-case to an empty name, or to a name an earlier column
/// already produced, are skipped so theme names stay unique.
pub fn structural_themes(structure: &DocumentStructure) -> Vec<Theme> {
    let mut themes: Vec<Theme> = Vec::new();
    for column in &structure.columns {
        if themes.len() == MAX_STRUCTURAL_THEMES {
            break;
        }
        let name = title_case(column);
        if name.is_empty() || themes.iter().any(|t| t.name == name) {
            debug!(column = %column, "Skipping column with empty or duplicate theme name");
            continue;
        }
        themes.push(Theme {
            description: format!("Structural theme derived from the '{column}' column"),
            relevance: STRUCTURAL_BASE_RELEVANCE.saturating_sub(themes.len() as u32),
            key_points: vec![
                format!("Organizes information under the {name} field"),
                format!(
                    "Appears across {} records in the dataset",
                    structure.row_count
                ),
            ],
            name,
        });
    }
    themes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(text: &str) -> Corpus {
        Corpus {
            text: text.to_string(),
            structure: DocumentStructure::default(),
        }
    }

    #[test]
    fn test_relevance_formula() {
        assert_eq!(relevance_score(5, 50), 10);
        assert_eq!(relevance_score(1, 1000), 4);
        assert_eq!(relevance_score(1, 2000), 3);
        assert_eq!(relevance_score(3, 500), 9);
        assert_eq!(relevance_score(0, 10), 0);
        assert_eq!(relevance_score(1, 0), 0);
    }

    #[test]
    fn test_key_points_filter_and_truncate() {
        let catalog = PatternCatalog::from_table(&[("research", "Research", "r")]).unwrap();
        let long = format!("Research {}", "x".repeat(150));
        let text = format!(
            "Short research. This sentence mentions research clearly! Unrelated sentence of some length here. {long}. Another research sentence here? Fourth research sentence is ignored."
        );
        let themes = score_themes(&corpus(&text), &catalog);
        let points = &themes[0].key_points;
        assert_eq!(points.len(), 3);
        assert_eq!(points[0], "This sentence mentions research clearly");
        assert!(points[1].ends_with("..."));
        assert_eq!(points[1].chars().count(), KEY_POINT_CHARS + 3);
        assert_eq!(points[2], "Another research sentence here");
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = PatternCatalog::from_table(&[
            ("alpha", "Alpha", "a"),
            ("beta", "Beta", "b"),
            ("gamma", "Gamma", "c"),
        ])
        .unwrap();
        let text = format!("gamma beta alpha gamma {}", "filler ".repeat(200));
        let themes = score_themes(&corpus(&text), &catalog);
        let names: Vec<&str> = themes.iter().map(|t| t.name.as_str()).collect();
        // Gamma has the higher count; Alpha and Beta tie and keep declaration order
        assert_eq!(names, vec!["Gamma", "Alpha", "Beta"]);
    }

    #[test]
    fn test_structural_fallback_caps_at_six() {
        let structure = DocumentStructure {
            columns: (0..8).map(|i| format!("col_{i}")).collect(),
            text_columns: vec![],
            row_count: 4,
        };
        let themes = structural_themes(&structure);
        assert_eq!(themes.len(), 6);
        assert_eq!(themes[0].name, "Col 0");
        assert_eq!(themes[0].relevance, 8);
        assert_eq!(themes[5].relevance, 3);
        assert!(themes.iter().all(|t| t.key_points.len() == 2));
    }

    #[test]
    fn test_structural_skips_blank_and_duplicate_names() {
        let structure = DocumentStructure {
            columns: ["", "__", "Title", "title", "a", "b", "c", "d", "e"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            text_columns: vec![],
            row_count: 1,
        };
        let themes = structural_themes(&structure);
        let names: Vec<&str> = themes.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Title", "A", "B", "C", "D", "E"]);
        assert_eq!(themes[0].relevance, 8);
        assert_eq!(themes[1].relevance, 7);
    }

    #[test]
    fn test_empty_corpus_no_columns_is_empty() {
        let catalog = PatternCatalog::builtin().unwrap();
        assert!(score_themes(&Corpus::default(), &catalog).is_empty());
    }
}
