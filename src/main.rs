use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{json, Value};
use tracing::info;

use topicmap::config::Config;
use topicmap::document::models::FREE_TEXT_FIELDS;
use topicmap::output::terminal;
use topicmap::session::{AnalysisState, Session};

/// Topicmap: heuristic topic extraction and relationship mapping.
///
/// Reads a short document (free text or a JSON payload with rows) and prints
/// its ranked themes, subtopics, theme connections and summary insights.
#[derive(Parser)]
#[command(name = "topicmap", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a document and print its topic map
    Analyze {
        /// Input file: `.json` files are read as payloads, anything else as free text
        #[arg(long)]
        file: Option<PathBuf>,

        /// Free text to analyze (an error when the input file already has free text)
        #[arg(long)]
        text: Option<String>,

        /// Explicit main topic for the map
        #[arg(long)]
        title: Option<String>,

        /// Print the map as JSON instead of the terminal view
        #[arg(long)]
        json: bool,
    },

    /// List the built-in pattern catalog
    Catalog,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("topicmap=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            file,
            text,
            title,
            json,
        } => {
            let config = Config::load()?;
            let payload = build_payload(file.as_deref(), text, title)?;
            let mut session = Session::from_config(&config)?;

            info!(labeler = ?config.labeler, delay_ms = config.delay.as_millis() as u64, "Starting analysis");

            let ticket = session.load_payload(payload);

            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("  {spinner} {msg}")
                    .unwrap(),
            );
            pb.set_message("Analyzing document...");
            pb.enable_steady_tick(Duration::from_millis(100));
            session.finish(ticket).await;
            pb.finish_and_clear();

            if json {
                match session.result() {
                    Some(result) => println!("{}", serde_json::to_string_pretty(result)?),
                    None => terminal::display_state(session.state()),
                }
            } else {
                terminal::display_state(session.state());
            }

            if let AnalysisState::Failed { message, .. } = session.state() {
                anyhow::bail!("{message}");
            }
        }

        Commands::Catalog => {
            let config = Config::load()?;
            let session = Session::from_config(&config)?;
            terminal::display_catalog(session.catalog());
            println!(
                "\n{}",
                "Earlier entries win ties in relevance.".dimmed()
            );
        }
    }

    Ok(())
}

/// Assemble the host payload from CLI inputs.
fn build_payload(file: Option<&Path>, text: Option<String>, title: Option<String>) -> Result<Value> {
    let payload = match file {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let is_json = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            if is_json {
                serde_json::from_str(&raw)
                    .with_context(|| format!("{} is not valid JSON", path.display()))?
            } else {
                json!({ "content": raw })
            }
        }
        None => json!({}),
    };

    apply_overrides(payload, text, title)
}

/// Layer `--text` and `--title` onto a payload. `--title` replaces any title
/// in the payload; `--text` may only fill a payload that has no free text.
fn apply_overrides(payload: Value, text: Option<String>, title: Option<String>) -> Result<Value> {
    if text.is_none() && title.is_none() {
        return Ok(payload);
    }

    let Value::Object(mut map) = payload else {
        anyhow::bail!("--text and --title need a JSON object payload to attach to");
    };

    if let Some(text) = text {
        if let Some(field) = FREE_TEXT_FIELDS.iter().find(|f| map.contains_key(**f)) {
            anyhow::bail!("--text conflicts with the '{field}' field already in the input file");
        }
        map.insert("content".to_string(), Value::String(text));
    }
    if let Some(title) = title {
        map.insert("mainTopic".to_string(), Value::String(title));
    }

    Ok(Value::Object(map))
}
