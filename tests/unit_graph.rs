// Unit tests for subtopics, the relationship graph and labeling strategies.

use topicmap::mapping::models::{RelationshipType, Theme};
use topicmap::mapping::relationships::{build_connections, MAX_CONNECTIONS};
use topicmap::mapping::subtopics::generate_subtopics;
use topicmap::mapping::traits::{HashedLabeler, RelationshipLabeler, SeededLabeler};

fn ranked(relevances: &[u32]) -> Vec<Theme> {
    relevances
        .iter()
        .enumerate()
        .map(|(i, r)| Theme {
            name: format!("Theme {i}"),
            description: String::new(),
            relevance: *r,
            key_points: vec![],
        })
        .collect()
}

/// Always returns the same label, so tests can assert exact connections.
struct FixedLabeler(RelationshipType);

impl RelationshipLabeler for FixedLabeler {
    fn label(&mut self, _from: &Theme, _to: &Theme) -> RelationshipType {
        self.0
    }
}

// ============================================================
// Connections
// ============================================================

#[test]
fn three_themes_connect_every_pair() {
    let themes = ranked(&[10, 7, 4]);
    let connections = build_connections(&themes, &mut FixedLabeler(RelationshipType::Supports));

    let summary: Vec<(&str, &str, u32)> = connections
        .iter()
        .map(|c| (c.from.as_str(), c.to.as_str(), c.strength))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Theme 0", "Theme 1", 7),
            ("Theme 0", "Theme 2", 4),
            ("Theme 1", "Theme 2", 7),
        ]
    );
    assert!(connections
        .iter()
        .all(|c| c.relationship_type == RelationshipType::Supports));
}

#[test]
fn eight_themes_cap_at_six_connections() {
    let themes = ranked(&[10, 10, 9, 8, 6, 5, 4, 3]);
    let connections = build_connections(&themes, &mut HashedLabeler);
    assert_eq!(connections.len(), MAX_CONNECTIONS);
    // Iteration order: the cap cuts off the tail, not the head
    assert_eq!(connections[0].from, "Theme 0");
    assert_eq!(connections[5].to, "Theme 4");
}

#[test]
fn connections_never_skip_more_than_two_ranks() {
    let themes = ranked(&[9, 8, 7, 6]);
    let connections = build_connections(&themes, &mut HashedLabeler);
    for c in &connections {
        let i = themes.iter().position(|t| t.name == c.from).unwrap();
        let j = themes.iter().position(|t| t.name == c.to).unwrap();
        assert!(i < j && j - i <= 2, "{} -> {}", c.from, c.to);
        assert!((3..=10).contains(&c.strength));
    }
}

#[test]
fn strength_floors_at_three() {
    let themes = ranked(&[10, 0]);
    let connections = build_connections(&themes, &mut HashedLabeler);
    assert_eq!(connections[0].strength, 3);
}

// ============================================================
// Labelers
// ============================================================

#[test]
fn seeded_labels_repeat_for_same_seed() {
    let themes = ranked(&[10, 9, 8, 7, 6]);
    let a = build_connections(&themes, &mut SeededLabeler::new(99));
    let b = build_connections(&themes, &mut SeededLabeler::new(99));
    assert_eq!(a, b);
}

#[test]
fn hashed_labels_independent_of_neighbors() {
    // The label for a pair depends only on the pair's names
    let mut labeler = HashedLabeler;
    let full = build_connections(&ranked(&[10, 9, 8]), &mut labeler);
    let short = build_connections(&ranked(&[10, 9]), &mut labeler);
    assert_eq!(full[0].relationship_type, short[0].relationship_type);
}

// ============================================================
// Subtopics
// ============================================================

#[test]
fn subtopic_importance_below_parent_and_decreasing() {
    let themes = ranked(&[10, 7, 4, 3]);
    let subtopics = generate_subtopics(&themes, "unused corpus");

    for theme in &themes {
        let children: Vec<u32> = subtopics
            .iter()
            .filter(|s| s.parent_theme == theme.name)
            .map(|s| s.importance)
            .collect();
        assert!(!children.is_empty() && children.len() <= 3);
        assert!(children.iter().all(|&imp| imp < theme.relevance));
        for pair in children.windows(2) {
            assert!(pair[0] > pair[1]);
        }
    }
    // 3 + 2 + 1 + 1
    assert_eq!(subtopics.len(), 7);
}

#[test]
fn subtopics_stay_grouped_by_theme_order() {
    let themes = ranked(&[4, 10]);
    let subtopics = generate_subtopics(&themes, "");
    let parents: Vec<&str> = subtopics.iter().map(|s| s.parent_theme.as_str()).collect();
    // Not re-sorted by importance: the lower-relevance theme still comes first
    assert_eq!(parents, vec!["Theme 0", "Theme 1", "Theme 1", "Theme 1"]);
}
