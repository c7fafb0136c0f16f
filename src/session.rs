// Analysis session: the orchestrator state machine.
//
// A session owns the current input and the latest result. Every request to
// analyze hands out a ticket stamped with the session generation; when the
// ticket's outcome comes back, the session only accepts it if no newer
// request has been made since (last writer wins). Loading new input always
// restarts analysis from Idle.
//
//   Idle -> Analyzing -> Ready | NothingToAnalyze | Failed
//   Ready | NothingToAnalyze | Failed -> Analyzing   (re-analysis / retry)

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::config::{Config, LabelerKind};
use crate::document::models::Document;
use crate::errors::{AnalysisError, AnalysisResult};
use crate::mapping::catalog::PatternCatalog;
use crate::mapping::models::MappingResult;
use crate::mapping::traits::{HashedLabeler, RelationshipLabeler, SeededLabeler};
use crate::pipeline::analysis;

/// The message shown to users when a run fails. Details go to the log.
pub const FAILURE_MESSAGE: &str = "Analysis failed. Please try again.";

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisState {
    /// No analysis requested yet
    Idle,
    Analyzing,
    Ready(MappingResult),
    /// The input had neither text nor rows; the default map (keeping any
    /// explicit title) is attached
    NothingToAnalyze(MappingResult),
    Failed { message: String, detail: String },
}

impl AnalysisState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisState::Idle => "idle",
            AnalysisState::Analyzing => "analyzing",
            AnalysisState::Ready(_) => "ready",
            AnalysisState::NothingToAnalyze(_) => "nothing to analyze",
            AnalysisState::Failed { .. } => "failed",
        }
    }
}

impl std::fmt::Display for AnalysisState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Input as supplied by the host: already parsed, or a raw payload that is
/// parsed inside the run (so shape errors surface as a failed run).
#[derive(Debug, Clone)]
pub enum SessionInput {
    Document(Option<Document>),
    Payload(Value),
}

/// A pending analysis, detached from the session so it can run elsewhere.
#[derive(Debug)]
pub struct AnalysisTicket {
    generation: u64,
    input: Option<SessionInput>,
    catalog: Arc<PatternCatalog>,
    delay: Duration,
}

/// What a ticket produced.
#[derive(Debug)]
pub struct AnalysisOutcome {
    generation: u64,
    empty_input: bool,
    result: AnalysisResult<MappingResult>,
}

impl AnalysisOutcome {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn result(&self) -> &AnalysisResult<MappingResult> {
        &self.result
    }
}

impl AnalysisTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Wait out the configured delay, then run the pipeline.
    pub async fn run(self, labeler: &mut dyn RelationshipLabeler) -> AnalysisOutcome {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.run_now(labeler)
    }

    /// Run the pipeline immediately. Panics inside the pipeline are caught
    /// and reported as `AnalysisError::Internal`.
    pub fn run_now(self, labeler: &mut dyn RelationshipLabeler) -> AnalysisOutcome {
        let document = match self.input {
            None => Ok(None),
            Some(SessionInput::Document(doc)) => Ok(doc),
            Some(SessionInput::Payload(ref payload)) => Document::from_value(payload),
        };

        let (empty_input, result) = match document {
            Err(e) => (false, Err(e)),
            Ok(document) => {
                let empty = document.as_ref().map_or(true, Document::is_empty);
                let catalog = &self.catalog;
                let caught = panic::catch_unwind(AssertUnwindSafe(|| {
                    analysis::run(document.as_ref(), catalog, labeler)
                }));
                let result = caught.unwrap_or_else(|payload| {
                    Err(AnalysisError::Internal(panic_message(payload.as_ref())))
                });
                (empty, result)
            }
        };

        AnalysisOutcome {
            generation: self.generation,
            empty_input,
            result,
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "pipeline panicked".to_string()
    }
}

/// One user's analysis context. Replaced or reloaded per upload.
pub struct Session {
    input: Option<SessionInput>,
    state: AnalysisState,
    generation: u64,
    catalog: Arc<PatternCatalog>,
    labeler: Box<dyn RelationshipLabeler>,
    delay: Duration,
}

impl Session {
    pub fn new(catalog: PatternCatalog, labeler: Box<dyn RelationshipLabeler>) -> Self {
        Self {
            input: None,
            state: AnalysisState::Idle,
            generation: 0,
            catalog: Arc::new(catalog),
            labeler,
            delay: Duration::ZERO,
        }
    }

    /// Build a session with the built-in catalog and the configured labeler
    /// and delay.
    pub fn from_config(config: &Config) -> AnalysisResult<Self> {
        let labeler: Box<dyn RelationshipLabeler> = match config.labeler {
            LabelerKind::Random => Box::new(SeededLabeler::from_entropy()),
            LabelerKind::Seeded => Box::new(SeededLabeler::new(config.label_seed)),
            LabelerKind::Hashed => Box::new(HashedLabeler),
        };
        Ok(Self::new(PatternCatalog::builtin()?, labeler).with_delay(config.delay))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    /// The published map, if the last accepted run produced one.
    pub fn result(&self) -> Option<&MappingResult> {
        match &self.state {
            AnalysisState::Ready(result) | AnalysisState::NothingToAnalyze(result) => Some(result),
            _ => None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    /// Replace the input with a parsed document and request analysis.
    pub fn load_document(&mut self, document: Option<Document>) -> AnalysisTicket {
        self.replace_input(SessionInput::Document(document))
    }

    /// Replace the input with a raw payload and request analysis.
    pub fn load_payload(&mut self, payload: Value) -> AnalysisTicket {
        self.replace_input(SessionInput::Payload(payload))
    }

    fn replace_input(&mut self, input: SessionInput) -> AnalysisTicket {
        self.input = Some(input);
        self.state = AnalysisState::Idle;
        debug!("Session input replaced");
        self.request_analysis()
    }

    /// Move to Analyzing and hand out a ticket for the current input.
    /// Any earlier ticket still in flight becomes stale.
    pub fn request_analysis(&mut self) -> AnalysisTicket {
        self.generation += 1;
        self.state = AnalysisState::Analyzing;
        debug!(generation = self.generation, "Analysis requested");
        AnalysisTicket {
            generation: self.generation,
            input: self.input.clone(),
            catalog: Arc::clone(&self.catalog),
            delay: self.delay,
        }
    }

    /// Retry entry point: re-run on identical input.
    pub fn request_reanalysis(&mut self) -> AnalysisTicket {
        info!(previous = %self.state, "Re-analysis requested");
        self.request_analysis()
    }

    /// Apply an outcome. Returns false (and changes nothing) when the
    /// outcome belongs to a superseded request.
    pub fn complete(&mut self, outcome: AnalysisOutcome) -> bool {
        if outcome.generation != self.generation {
            debug!(
                stale = outcome.generation,
                current = self.generation,
                "Discarding stale analysis outcome"
            );
            return false;
        }

        self.state = match outcome.result {
            Ok(result) if outcome.empty_input => {
                warn!("Nothing to analyze: no text and no rows supplied");
                AnalysisState::NothingToAnalyze(result)
            }
            Ok(result) => AnalysisState::Ready(result),
            Err(e) => {
                error!(error = %e, "Analysis failed");
                AnalysisState::Failed {
                    message: FAILURE_MESSAGE.to_string(),
                    detail: e.to_string(),
                }
            }
        };
        true
    }

    /// Request, run and apply an analysis in one step.
    pub async fn analyze(&mut self) -> &AnalysisState {
        let ticket = self.request_analysis();
        self.finish(ticket).await
    }

    /// Same as `analyze`, entered from a finished state.
    pub async fn reanalyze(&mut self) -> &AnalysisState {
        let ticket = self.request_reanalysis();
        self.finish(ticket).await
    }

    /// Run a ticket obtained from this session with its own labeler and apply it.
    pub async fn finish(&mut self, ticket: AnalysisTicket) -> &AnalysisState {
        let outcome = ticket.run(self.labeler.as_mut()).await;
        self.complete(outcome);
        &self.state
    }
}
