// Topicmap: heuristic topic extraction and relationship mapping
//
// This is the library root. Each module corresponds to a stage or concern
// of the mapping pipeline.

pub mod config;
pub mod document;
pub mod errors;
pub mod mapping;
pub mod output;
pub mod pipeline;
pub mod session;
pub mod text;
