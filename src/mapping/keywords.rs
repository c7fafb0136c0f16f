// TF-IDF keyword digest for a corpus.
//
// Uses the `keyword_extraction` crate with each sentence treated as a
// separate document for IDF computation. Words repeated in every sentence
// get downweighted, words distinctive to a few sentences get boosted. The
// digest rides along with the map as extra context for summary panels.

use keyword_extraction::tf_idf::{TfIdf, TfIdfParams};
use stop_words::{get, LANGUAGE};
use tracing::debug;

use crate::text::{sentences, word_count};

/// How many keywords the digest keeps.
pub const MAX_KEYWORDS: usize = 10;

/// Extract up to `limit` ranked keywords from the corpus.
///
/// Ties in score are broken alphabetically so the digest is identical
/// across runs on the same text.
pub fn extract_keywords(corpus: &str, limit: usize) -> Vec<String> {
    let documents: Vec<String> = sentences(corpus).into_iter().map(str::to_string).collect();
    if documents.is_empty() || limit == 0 {
        return Vec::new();
    }

    // Get English stop words from the stop-words crate
    let stop_words: Vec<String> = get(LANGUAGE::English);

    let params = TfIdfParams::UnprocessedDocuments(&documents, &stop_words, None);
    let tfidf = TfIdf::new(params);

    // Ask for every scored word (the word count bounds the vocabulary),
    // then rank ourselves for a stable order
    let mut ranked: Vec<(String, f32)> = tfidf.get_ranked_word_scores(word_count(corpus));
    ranked.retain(|(word, _)| word.chars().any(char::is_alphabetic));
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    let keywords: Vec<String> = ranked.into_iter().take(limit).map(|(w, _)| w).collect();
    debug!(keywords = keywords.len(), sentences = documents.len(), "Extracted TF-IDF keywords");
    keywords
}
