// Document input: payload parsing and corpus normalization.

pub mod models;
pub mod normalize;
