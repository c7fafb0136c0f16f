// Pattern catalog: the closed list of domains a theme can be detected in.
//
// The catalog is a plain table of (pattern, name, description). Declaration
// order matters: when two themes score the same relevance, the one declared
// first ranks first. Patterns are case-insensitive and whole-word.

use regex_lite::Regex;

use crate::errors::{AnalysisError, AnalysisResult};

/// Built-in catalog table: (alternation of keywords, theme name, description).
pub const BUILTIN_PATTERNS: &[(&str, &str, &str)] = &[
    (
        "data|analytics|analysis|analyze|statistics|statistical|metrics?|datasets?",
        "Data Analysis",
        "Collection, processing and interpretation of quantitative information",
    ),
    (
        "research|study|studies|experiments?|hypothesis|findings|surveys?",
        "Research",
        "Systematic investigation and evidence gathering",
    ),
    (
        "technology|software|systems?|digital|platforms?|computing|algorithms?",
        "Technology",
        "Tools, platforms and technical systems",
    ),
    (
        "business|strategy|strategic|market|revenue|growth|competitive",
        "Business Strategy",
        "Organizational direction, markets and growth",
    ),
    (
        "education|learning|teaching|students?|curriculum|training|courses?",
        "Education",
        "Teaching, learning and skill development",
    ),
    (
        "health|medical|wellness|patients?|clinical|healthcare",
        "Health & Wellness",
        "Physical and mental wellbeing and care",
    ),
    (
        "finance|financial|budgets?|investments?|costs?|profits?|funding",
        "Finance",
        "Money, budgeting and investment decisions",
    ),
    (
        "marketing|brands?|customers?|campaigns?|advertising|audience",
        "Marketing",
        "Reaching and engaging customers and audiences",
    ),
    (
        "projects?|management|planning|timelines?|milestones?|deliverables?",
        "Project Management",
        "Planning, coordination and delivery of work",
    ),
    (
        "environment|environmental|climate|sustainability|sustainable|energy|emissions",
        "Environment",
        "Climate, energy and sustainability concerns",
    ),
    (
        "communication|collaboration|teams?|meetings?|feedback",
        "Communication",
        "How people share information and work together",
    ),
    (
        "security|privacy|risks?|compliance|threats?|vulnerability|vulnerabilities",
        "Security",
        "Protection, privacy and risk management",
    ),
];

/// One compiled catalog entry.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub name: String,
    pub description: String,
    pattern: Regex,
}

impl CatalogEntry {
    /// Number of whole-word, case-insensitive matches in `text`.
    pub fn count_matches(&self, text: &str) -> usize {
        self.pattern.find_iter(text).count()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// The source alternation this entry was compiled from.
    pub fn pattern_source(&self) -> &str {
        self.pattern.as_str()
    }
}

/// The ordered set of domains themes are scored against.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    entries: Vec<CatalogEntry>,
}

impl PatternCatalog {
    /// Compile the built-in catalog.
    pub fn builtin() -> AnalysisResult<Self> {
        Self::from_table(BUILTIN_PATTERNS)
    }

    /// Compile a catalog from (keywords, name, description) rows. Each keyword
    /// alternation is wrapped as a case-insensitive whole-word pattern.
    pub fn from_table(table: &[(&str, &str, &str)]) -> AnalysisResult<Self> {
        let entries = table
            .iter()
            .map(|(keywords, name, description)| {
                let pattern = Regex::new(&format!(r"(?i)\b(?:{keywords})\b")).map_err(|source| {
                    AnalysisError::Pattern {
                        theme: name.to_string(),
                        source,
                    }
                })?;
                Ok(CatalogEntry {
                    name: name.to_string(),
                    description: description.to_string(),
                    pattern,
                })
            })
            .collect::<AnalysisResult<Vec<_>>>()?;
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
