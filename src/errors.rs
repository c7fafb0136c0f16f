// Analysis error types.
//
// Empty input is deliberately absent here: a document with nothing to
// analyze still produces a default map, and the session reports it as its
// own state rather than a failure.

use thiserror::Error;

/// Errors that abort a single analysis run.
///
/// None of these are fatal to the process. The session catches them,
/// moves to `Failed`, and lets the caller retry with the same input.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The payload did not have the shape of a document
    /// (e.g. `rows` is not an array, or a cell holds a nested object).
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A pattern catalog entry failed to compile.
    #[error("Pattern for theme '{theme}' is invalid: {source}")]
    Pattern {
        theme: String,
        #[source]
        source: regex_lite::Error,
    },

    /// Something inside the pipeline panicked.
    #[error("Internal analysis error: {0}")]
    Internal(String),
}

pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;
