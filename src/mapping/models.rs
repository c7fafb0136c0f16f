// Mapping models: the output side of the pipeline.
//
// These are the types handed to rendering and summary collaborators. They
// serialize in camelCase because the consumers are JSON front ends.

use serde::{Deserialize, Serialize};

/// Upper bound on a theme's relevance score.
pub const MAX_RELEVANCE: u32 = 10;

/// A top-level detected topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub name: String,
    pub description: String,
    /// 0 to 10
    pub relevance: u32,
    /// Up to 3 representative snippets from the corpus
    pub key_points: Vec<String>,
}

/// A finer-grained derivative of a theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtopic {
    pub name: String,
    /// Name of the owning theme (lookup only)
    pub parent_theme: String,
    pub importance: u32,
    pub summary: String,
}

/// The label on an edge between two themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    Supports,
    RelatesTo,
    Influences,
    Complements,
    IntegratesWith,
}

impl RelationshipType {
    /// All labels, in declaration order. Labelers index into this.
    pub const ALL: [RelationshipType; 5] = [
        RelationshipType::Supports,
        RelationshipType::RelatesTo,
        RelationshipType::Influences,
        RelationshipType::Complements,
        RelationshipType::IntegratesWith,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipType::Supports => "supports",
            RelationshipType::RelatesTo => "relates_to",
            RelationshipType::Influences => "influences",
            RelationshipType::Complements => "complements",
            RelationshipType::IntegratesWith => "integrates_with",
        }
    }
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A weighted, typed edge between two themes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub from: String,
    pub to: String,
    pub relationship_type: RelationshipType,
    /// 3 to 10
    pub strength: u32,
}

/// Primary / secondary / supporting tiers, by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicHierarchy {
    pub primary: Vec<String>,
    pub secondary: Vec<String>,
    pub supporting: Vec<String>,
}

/// Counts describing one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingStats {
    pub theme_count: usize,
    pub subtopic_count: usize,
    pub connection_count: usize,
    pub corpus_chars: usize,
    pub word_count: usize,
    pub row_count: usize,
    pub text_columns: usize,
}

/// The complete map produced by one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingResult {
    pub main_topic: String,
    pub themes: Vec<Theme>,
    pub subtopics: Vec<Subtopic>,
    pub connections: Vec<Connection>,
    pub insights: Vec<String>,
    pub hierarchy: TopicHierarchy,
    /// TF-IDF ranked corpus keywords
    pub keywords: Vec<String>,
    pub stats: MappingStats,
}

impl MappingResult {
    pub fn theme(&self, name: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_type_wire_names() {
        for label in RelationshipType::ALL {
            let json = serde_json::to_string(&label).unwrap();
            assert_eq!(json, format!("\"{}\"", label.as_str()));
        }
    }

    #[test]
    fn test_theme_serializes_camel_case() {
        let theme = Theme {
            name: "Research".to_string(),
            description: "d".to_string(),
            relevance: 5,
            key_points: vec![],
        };
        let json = serde_json::to_value(&theme).unwrap();
        assert!(json.get("keyPoints").is_some());
        assert!(json.get("key_points").is_none());
    }
}
