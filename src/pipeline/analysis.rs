// Analysis pipeline: document -> corpus -> themes -> graph -> map.
//
// This is the pure, synchronous core. It performs no I/O and holds no state
// between runs; the session layer decides when to call it and what to do
// with the outcome.

use tracing::info;

use crate::document::models::Document;
use crate::document::normalize;
use crate::errors::AnalysisResult;
use crate::mapping::catalog::PatternCatalog;
use crate::mapping::keywords::{self, MAX_KEYWORDS};
use crate::mapping::models::MappingResult;
use crate::mapping::relationships;
use crate::mapping::subtopics;
use crate::mapping::synthesis;
use crate::mapping::themes;
use crate::mapping::traits::RelationshipLabeler;

/// Run every stage for one document. `None` produces the default map for
/// empty input.
pub fn run(
    document: Option<&Document>,
    catalog: &PatternCatalog,
    labeler: &mut dyn RelationshipLabeler,
) -> AnalysisResult<MappingResult> {
    // Step 1: Normalize free text and tabular columns into one corpus
    let corpus = normalize::normalize(document);

    // Step 2: Score themes (structural fallback happens inside)
    let themes = themes::score_themes(&corpus, catalog);

    // Step 3: Subtopics and connections both derive from the ranked themes
    let subtopics = subtopics::generate_subtopics(&themes, &corpus.text);
    let connections = relationships::build_connections(&themes, labeler);

    // Step 4: Synthesize the summary layer
    let title = document.and_then(|d| d.title.as_deref());
    let main_topic = synthesis::main_topic(title, &corpus.text);
    let insights = synthesis::insights(&themes, &subtopics, &connections, corpus.char_len());
    let hierarchy = synthesis::hierarchy(&themes, &subtopics);
    let stats = synthesis::stats(&corpus, &themes, &subtopics, &connections);
    let keywords = keywords::extract_keywords(&corpus.text, MAX_KEYWORDS);

    info!(
        main_topic = %main_topic,
        themes = themes.len(),
        subtopics = subtopics.len(),
        connections = connections.len(),
        "Topic map built"
    );

    Ok(MappingResult {
        main_topic,
        themes,
        subtopics,
        connections,
        insights,
        hierarchy,
        keywords,
        stats,
    })
}

/// Parse a raw host payload, then run the pipeline.
pub fn run_payload(
    payload: &serde_json::Value,
    catalog: &PatternCatalog,
    labeler: &mut dyn RelationshipLabeler,
) -> AnalysisResult<MappingResult> {
    let document = Document::from_value(payload)?;
    run(document.as_ref(), catalog, labeler)
}
