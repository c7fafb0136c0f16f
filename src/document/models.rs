// Document models: the input side of the mapping pipeline.
//
// A document arrives from the host as a loosely-shaped JSON payload. We
// parse it once into a sum type so the rest of the pipeline never has to
// guess which optional fields are present.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{AnalysisError, AnalysisResult};

/// Payload fields checked, in order, for free text.
pub const FREE_TEXT_FIELDS: [&str; 3] = ["content", "text", "description"];

/// Payload fields checked, in order, for an explicit document title.
pub const TITLE_FIELDS: [&str; 2] = ["mainTopic", "title"];

/// A single tabular cell value. Only scalars are allowed in rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
    Null,
}

impl Scalar {
    /// The text this cell contributes to a corpus, if any.
    /// Null and blank values contribute nothing.
    pub fn as_text(&self) -> Option<String> {
        let text = match self {
            Scalar::Text(s) => s.clone(),
            Scalar::Number(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Null => return None,
        };
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// One row of tabular input: column name to scalar, in column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub cells: Vec<(String, Scalar)>,
}

impl Row {
    pub fn new<K: Into<String>>(cells: impl IntoIterator<Item = (K, Scalar)>) -> Self {
        Self {
            cells: cells.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn get(&self, column: &str) -> Option<&Scalar> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }
}

/// The three shapes a document body can take.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DocumentBody {
    FreeText(String),
    Tabular(Vec<Row>),
    Combined { text: String, rows: Vec<Row> },
}

/// A document ready for analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Explicit title supplied by the host, used as the main topic when present
    pub title: Option<String>,
    pub body: DocumentBody,
}

impl Document {
    pub fn free_text(text: impl Into<String>) -> Self {
        Self {
            title: None,
            body: DocumentBody::FreeText(text.into()),
        }
    }

    pub fn tabular(rows: Vec<Row>) -> Self {
        Self {
            title: None,
            body: DocumentBody::Tabular(rows),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// The free-text part of the body, if any.
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            DocumentBody::FreeText(text) | DocumentBody::Combined { text, .. } => Some(text),
            DocumentBody::Tabular(_) => None,
        }
    }

    /// The tabular part of the body (empty for free text).
    pub fn rows(&self) -> &[Row] {
        match &self.body {
            DocumentBody::Tabular(rows) | DocumentBody::Combined { rows, .. } => rows,
            DocumentBody::FreeText(_) => &[],
        }
    }

    /// True when there is neither free text nor rows to analyze.
    pub fn is_empty(&self) -> bool {
        self.text().map_or(true, |t| t.trim().is_empty()) && self.rows().is_empty()
    }

    /// Parse a host payload into a document.
    ///
    /// Returns `Ok(None)` when the payload carries no free text, no rows and
    /// no title. A title alone yields an empty document that still names the
    /// map. Shape violations (wrong types) are `MalformedInput`.
    pub fn from_value(payload: &Value) -> AnalysisResult<Option<Self>> {
        let object = match payload {
            Value::Object(map) => map,
            Value::Null => return Ok(None),
            Value::String(text) if text.trim().is_empty() => return Ok(None),
            Value::String(text) => return Ok(Some(Self::free_text(text.clone()))),
            other => {
                return Err(AnalysisError::MalformedInput(format!(
                    "expected an object payload, got {}",
                    json_kind(other)
                )))
            }
        };

        let title = first_string_field(object, &TITLE_FIELDS)?;
        let text = first_string_field(object, &FREE_TEXT_FIELDS)?;
        let rows = match object.get("rows") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| parse_row(i, item))
                .collect::<AnalysisResult<Vec<Row>>>()?,
            Some(other) => {
                return Err(AnalysisError::MalformedInput(format!(
                    "'rows' must be an array, got {}",
                    json_kind(other)
                )))
            }
        };

        let body = match (text, rows.is_empty()) {
            (None, true) if title.is_none() => return Ok(None),
            (None, true) => DocumentBody::FreeText(String::new()),
            (Some(text), true) => DocumentBody::FreeText(text),
            (None, false) => DocumentBody::Tabular(rows),
            (Some(text), false) => DocumentBody::Combined { text, rows },
        };

        Ok(Some(Self { title, body }))
    }
}

/// First non-blank string among `fields`. A present field of the wrong type
/// is a shape error rather than something to skip silently.
fn first_string_field(object: &Map<String, Value>, fields: &[&str]) -> AnalysisResult<Option<String>> {
    for field in fields {
        match object.get(*field) {
            None | Some(Value::Null) => continue,
            Some(Value::String(s)) if s.trim().is_empty() => continue,
            Some(Value::String(s)) => return Ok(Some(s.clone())),
            Some(other) => {
                return Err(AnalysisError::MalformedInput(format!(
                    "'{field}' must be a string, got {}",
                    json_kind(other)
                )))
            }
        }
    }
    Ok(None)
}

fn parse_row(index: usize, item: &Value) -> AnalysisResult<Row> {
    let Value::Object(map) = item else {
        return Err(AnalysisError::MalformedInput(format!(
            "row {index} must be an object, got {}",
            json_kind(item)
        )));
    };

    let mut cells = Vec::with_capacity(map.len());
    for (column, value) in map {
        let scalar = match value {
            Value::String(s) => Scalar::Text(s.clone()),
            Value::Number(n) => Scalar::Number(n.clone()),
            Value::Bool(b) => Scalar::Bool(*b),
            Value::Null => Scalar::Null,
            nested => {
                return Err(AnalysisError::MalformedInput(format!(
                    "row {index}, column '{column}' holds {} (only scalars are allowed)",
                    json_kind(nested)
                )))
            }
        };
        cells.push((column.clone(), scalar));
    }
    Ok(Row { cells })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
