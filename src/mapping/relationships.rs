// Relationship builder: a short-range graph over ranked themes.
//
// Each theme connects only to its next two neighbors in rank order, so the
// graph is a chain plus skip edges. Strength falls off with the relevance gap:
//
//   strength = max(3, 10 - |relevance_i - relevance_j|)

use super::models::{Connection, Theme};
use super::traits::RelationshipLabeler;

/// Hard cap on connections per run.
pub const MAX_CONNECTIONS: usize = 6;
/// How many later themes each theme may connect to.
pub const NEIGHBOR_SPAN: usize = 2;
pub const MIN_STRENGTH: u32 = 3;
pub const MAX_STRENGTH: u32 = 10;

/// Edge strength for two relevance scores.
pub fn connection_strength(a: u32, b: u32) -> u32 {
    MAX_STRENGTH.saturating_sub(a.abs_diff(b)).max(MIN_STRENGTH)
}

/// Build connections between ranked themes, labeling each with `labeler`.
pub fn build_connections(
    themes: &[Theme],
    labeler: &mut dyn RelationshipLabeler,
) -> Vec<Connection> {
    let mut connections = Vec::new();

    'pairs: for i in 0..themes.len().saturating_sub(1) {
        let end = themes.len().min(i + NEIGHBOR_SPAN + 1);
        for j in (i + 1)..end {
            if connections.len() >= MAX_CONNECTIONS {
                break 'pairs;
            }
            let (from, to) = (&themes[i], &themes[j]);
            connections.push(Connection {
                from: from.name.clone(),
                to: to.name.clone(),
                relationship_type: labeler.label(from, to),
                strength: connection_strength(from.relevance, to.relevance),
            });
        }
    }

    connections
}
