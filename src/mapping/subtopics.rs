// Subtopic generator: templated children for each theme.

use super::models::{Subtopic, Theme};

/// Name templates, applied in order. `{}` is the parent theme name.
pub const SUBTOPIC_TEMPLATES: [&str; 6] = [
    "{} Framework",
    "{} Implementation",
    "{} Best Practices",
    "{} Methodology",
    "{} Guidelines",
    "{} Standards",
];

/// Never more than this many subtopics per theme.
pub const MAX_SUBTOPICS_PER_THEME: u32 = 3;

/// How many subtopics a theme with this relevance gets (1 to 3).
pub fn subtopic_count(relevance: u32) -> u32 {
    (relevance / 3).clamp(1, MAX_SUBTOPICS_PER_THEME)
}

/// Generate subtopics in theme order, then subtopic order.
///
/// `_corpus` is accepted so content-aware summaries can be added without
/// changing callers; the current summaries are templated.
pub fn generate_subtopics(themes: &[Theme], _corpus: &str) -> Vec<Subtopic> {
    let mut subtopics = Vec::new();

    for theme in themes {
        let lower = theme.name.to_lowercase();
        for i in 0..subtopic_count(theme.relevance) {
            let template = SUBTOPIC_TEMPLATES[i as usize % SUBTOPIC_TEMPLATES.len()];
            subtopics.push(Subtopic {
                name: template.replace("{}", &theme.name),
                parent_theme: theme.name.clone(),
                importance: theme.relevance.saturating_sub(i + 1),
                summary: format!(
                    "Detailed aspects of {lower} covering key concepts and practical applications"
                ),
            });
        }
    }

    subtopics
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme(name: &str, relevance: u32) -> Theme {
        Theme {
            name: name.to_string(),
            description: String::new(),
            relevance,
            key_points: vec![],
        }
    }

    #[test]
    fn test_subtopic_count_bounds() {
        assert_eq!(subtopic_count(0), 1);
        assert_eq!(subtopic_count(2), 1);
        assert_eq!(subtopic_count(3), 1);
        assert_eq!(subtopic_count(6), 2);
        assert_eq!(subtopic_count(9), 3);
        assert_eq!(subtopic_count(10), 3);
    }

    #[test]
    fn test_names_importance_and_order() {
        let subs = generate_subtopics(&[theme("Research", 10), theme("Finance", 4)], "");
        let names: Vec<&str> = subs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Research Framework",
                "Research Implementation",
                "Research Best Practices",
                "Finance Framework",
            ]
        );
        let importance: Vec<u32> = subs.iter().map(|s| s.importance).collect();
        assert_eq!(importance, vec![9, 8, 7, 3]);
        assert!(subs[0].summary.contains("research"));
        assert_eq!(subs[3].parent_theme, "Finance");
    }

    #[test]
    fn test_zero_relevance_saturates() {
        let subs = generate_subtopics(&[theme("Odd", 0)], "");
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].importance, 0);
    }
}
