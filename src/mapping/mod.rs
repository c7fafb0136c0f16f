// Topic mapping: catalog scoring, subtopics, relationships and synthesis.

pub mod catalog;
pub mod keywords;
pub mod models;
pub mod relationships;
pub mod subtopics;
pub mod synthesis;
pub mod themes;
pub mod traits;
