// Text normalizer: merges free text and text-bearing columns into one corpus.
//
// Column detection is a plain substring match on the column name, so
// `product_description` and `Title` both count as text-bearing while `price`
// does not. Only the first rows are read; the corpus is a sample, not a dump.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::models::Document;

/// Column-name fragments that mark a column as text-bearing.
pub const TEXT_COLUMN_KEYWORDS: [&str; 5] = ["title", "description", "content", "text", "summary"];

/// How many rows contribute text to the corpus.
pub const MAX_CORPUS_ROWS: usize = 20;

/// Shape statistics of the tabular part of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentStructure {
    /// All column names, in first-seen order across rows
    pub columns: Vec<String>,
    /// The subset of `columns` considered text-bearing
    pub text_columns: Vec<String>,
    pub row_count: usize,
}

/// The normalized text analyzed by every later stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    pub text: String,
    pub structure: DocumentStructure,
}

impl Corpus {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Length in characters (not bytes).
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Whether a column name marks a text-bearing column.
pub fn is_text_column(name: &str) -> bool {
    let lower = name.to_lowercase();
    TEXT_COLUMN_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Build the corpus for a document. `None` (empty input) yields an empty corpus.
pub fn normalize(document: Option<&Document>) -> Corpus {
    let Some(document) = document else {
        return Corpus::default();
    };

    let rows = document.rows();

    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        for (name, _) in &row.cells {
            if !columns.iter().any(|c| c == name) {
                columns.push(name.clone());
            }
        }
    }
    let text_columns: Vec<String> = columns
        .iter()
        .filter(|c| is_text_column(c))
        .cloned()
        .collect();

    let row_text: Vec<String> = rows
        .iter()
        .take(MAX_CORPUS_ROWS)
        .flat_map(|row| {
            text_columns
                .iter()
                .filter_map(move |column| row.get(column).and_then(|v| v.as_text()))
        })
        .collect();

    let mut text = document.text().unwrap_or_default().to_string();
    if !row_text.is_empty() {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&row_text.join(" "));
    }
    let corpus = Corpus {
        text: text.trim().to_string(),
        structure: DocumentStructure {
            columns,
            text_columns,
            row_count: rows.len(),
        },
    };

    debug!(
        chars = corpus.char_len(),
        columns = corpus.structure.columns.len(),
        text_columns = corpus.structure.text_columns.len(),
        rows = corpus.structure.row_count,
        "Normalized document"
    );

    corpus
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::models::{Row, Scalar};

    fn text(s: &str) -> Scalar {
        Scalar::Text(s.to_string())
    }

    #[test]
    fn test_text_columns_case_insensitive_substring() {
        assert!(is_text_column("Title"));
        assert!(is_text_column("product_DESCRIPTION"));
        assert!(is_text_column("ContentBody"));
        assert!(!is_text_column("price"));
        assert!(!is_text_column("id"));
    }

    #[test]
    fn test_free_text_verbatim_and_trimmed() {
        let doc = Document::free_text("  Hello world.  ");
        let corpus = normalize(Some(&doc));
        assert_eq!(corpus.text, "Hello world.");
        assert!(corpus.structure.columns.is_empty());
        assert_eq!(corpus.structure.row_count, 0);
    }

    #[test]
    fn test_rows_append_text_columns_only() {
        let rows = vec![
            Row::new([("title", text("Alpha")), ("price", text("9")), ("summary", text(""))]),
            Row::new([("title", text("Beta")), ("summary", text("Short note"))]),
        ];
        let corpus = normalize(Some(&Document::tabular(rows)));
        assert_eq!(corpus.text, "Alpha Beta Short note");
        assert_eq!(corpus.structure.columns, vec!["title", "price", "summary"]);
        assert_eq!(corpus.structure.text_columns, vec!["title", "summary"]);
        assert_eq!(corpus.structure.row_count, 2);
    }

    #[test]
    fn test_only_first_twenty_rows_contribute() {
        let rows: Vec<Row> = (0..25)
            .map(|i| Row::new([("text", text(&format!("r{i}")))]))
            .collect();
        let corpus = normalize(Some(&Document::tabular(rows)));
        assert!(corpus.text.ends_with("r19"));
        assert!(!corpus.text.contains("r20"));
        assert_eq!(corpus.structure.row_count, 25);
    }

    #[test]
    fn test_char_len_counts_characters() {
        let corpus = normalize(Some(&Document::free_text("  café résumé  ")));
        assert_eq!(corpus.text, "café résumé");
        assert_eq!(corpus.char_len(), 11);
        assert!(corpus.text.len() > corpus.char_len());
    }

    #[test]
    fn test_none_is_empty_corpus() {
        let corpus = normalize(None);
        assert!(corpus.is_empty());
        assert_eq!(corpus.structure, DocumentStructure::default());
    }
}
