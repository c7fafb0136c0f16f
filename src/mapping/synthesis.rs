// Hierarchy & insight synthesis: the summary layer over a finished map.
//
// Everything here is derived: the hierarchy is three slices of the ranked
// lists, insights are fixed sentences with counts filled in, and the main
// topic falls back from an explicit title to frequent corpus words.

use std::collections::HashMap;

use regex_lite::Regex;

use super::models::{Connection, MappingStats, Subtopic, Theme, TopicHierarchy};
use crate::document::normalize::Corpus;
use crate::text::{title_case, word_count};

/// Main topic used when nothing better can be derived.
pub const DEFAULT_MAIN_TOPIC: &str = "Document Analysis";
/// Corpora longer than this (in characters) count as rich content.
pub const RICH_CONTENT_CHARS: usize = 1000;
/// Words must be longer than this to name the main topic.
pub const MIN_TOPIC_WORD_CHARS: usize = 4;

const TIER_SIZE: usize = 3;
const SUPPORTING_SIZE: usize = 4;

/// Resolve the main topic: explicit title, else the three most frequent
/// long words, else the default.
pub fn main_topic(title: Option<&str>, corpus: &str) -> String {
    if let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) {
        return title.to_string();
    }

    let top = frequent_words(corpus, TIER_SIZE);
    if top.is_empty() {
        DEFAULT_MAIN_TOPIC.to_string()
    } else {
        top.iter()
            .map(|w| title_case(w))
            .collect::<Vec<String>>()
            .join(" & ")
    }
}

/// The `n` most frequent words longer than four characters in the
/// lower-cased corpus. Equal counts keep first-occurrence order.
pub fn frequent_words(corpus: &str, n: usize) -> Vec<String> {
    // Static pattern; compiled per call because synthesis runs once per analysis
    let Ok(word_re) = Regex::new(r"\w+") else {
        return Vec::new();
    };
    let lower = corpus.to_lowercase();

    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for m in word_re.find_iter(&lower) {
        let word = m.as_str();
        if word.chars().count() <= MIN_TOPIC_WORD_CHARS {
            continue;
        }
        let count = counts.entry(word).or_insert(0);
        if *count == 0 {
            order.push(word);
        }
        *count += 1;
    }

    // Stable sort: ties stay in first-occurrence order
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order.into_iter().take(n).map(str::to_string).collect()
}

/// The five summary insights, in fixed order.
pub fn insights(
    themes: &[Theme],
    subtopics: &[Subtopic],
    connections: &[Connection],
    corpus_chars: usize,
) -> Vec<String> {
    let focus = match themes.first() {
        Some(top) => format!("Primary focus: {}", top.name),
        None => "No dominant theme detected".to_string(),
    };
    let depth = if corpus_chars > RICH_CONTENT_CHARS {
        "Rich content provides comprehensive coverage of the subject"
    } else {
        "Concise content with focused thematic elements"
    };

    vec![
        format!("Document contains {} major thematic areas", themes.len()),
        format!("Identified {} subtopics for deeper exploration", subtopics.len()),
        format!("Found {} relationships between themes", connections.len()),
        focus,
        depth.to_string(),
    ]
}

/// Primary (themes 1-3), secondary (themes 4-6), supporting (subtopics 1-4).
pub fn hierarchy(themes: &[Theme], subtopics: &[Subtopic]) -> TopicHierarchy {
    let names = |slice: &[Theme]| slice.iter().map(|t| t.name.clone()).collect::<Vec<_>>();
    let primary_end = themes.len().min(TIER_SIZE);
    let secondary_end = themes.len().min(TIER_SIZE * 2);

    TopicHierarchy {
        primary: names(&themes[..primary_end]),
        secondary: names(&themes[primary_end..secondary_end]),
        supporting: subtopics
            .iter()
            .take(SUPPORTING_SIZE)
            .map(|s| s.name.clone())
            .collect(),
    }
}

/// Run statistics for summary panels.
pub fn stats(
    corpus: &Corpus,
    themes: &[Theme],
    subtopics: &[Subtopic],
    connections: &[Connection],
) -> MappingStats {
    MappingStats {
        theme_count: themes.len(),
        subtopic_count: subtopics.len(),
        connection_count: connections.len(),
        corpus_chars: corpus.char_len(),
        word_count: word_count(&corpus.text),
        row_count: corpus.structure.row_count,
        text_columns: corpus.structure.text_columns.len(),
    }
}
