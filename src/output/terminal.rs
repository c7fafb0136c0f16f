// Colored terminal output for topic maps and the pattern catalog.
//
// This module handles all terminal-specific formatting. main.rs delegates
// here so the library types stay free of presentation concerns.

use colored::Colorize;

use crate::mapping::catalog::PatternCatalog;
use crate::mapping::models::{Connection, MappingResult, Theme};
use crate::session::AnalysisState;

/// Display a full topic map.
pub fn display_map(result: &MappingResult) {
    println!(
        "\n{}",
        format!("=== Topic Map: {} ===", result.main_topic).bold()
    );
    println!();

    if result.themes.is_empty() {
        println!("  {}", "No themes detected.".dimmed());
    }

    let bar_width: usize = 20;
    for (i, theme) in result.themes.iter().enumerate() {
        display_theme(i, theme, bar_width);

        let children: Vec<&str> = result
            .subtopics
            .iter()
            .filter(|s| s.parent_theme == theme.name)
            .map(|s| s.name.as_str())
            .collect();
        if !children.is_empty() {
            println!("      Subtopics: {}", children.join(", ").dimmed());
        }
        println!();
    }

    if !result.connections.is_empty() {
        println!("{}", "Connections".bold());
        for connection in &result.connections {
            display_connection(connection);
        }
        println!();
    }

    println!("{}", "Hierarchy".bold());
    println!("  Primary:    {}", result.hierarchy.primary.join(", "));
    println!("  Secondary:  {}", result.hierarchy.secondary.join(", "));
    println!("  Supporting: {}", result.hierarchy.supporting.join(", "));
    println!();

    if !result.keywords.is_empty() {
        println!("{} {}", "Keywords:".bold(), result.keywords.join(", ").dimmed());
        println!();
    }

    println!("{}", "Insights".bold());
    for insight in &result.insights {
        println!("  - {insight}");
    }
}

fn display_theme(index: usize, theme: &Theme, bar_width: usize) {
    let filled = (theme.relevance as usize * bar_width) / 10;
    let empty = bar_width.saturating_sub(filled);
    let bar = format!("[{}{}]", "=".repeat(filled), " ".repeat(empty));

    // Color the bar based on relevance
    let colored_bar = if theme.relevance >= 8 {
        bar.bright_green()
    } else if theme.relevance >= 5 {
        bar.bright_yellow()
    } else {
        bar.bright_blue()
    };

    println!(
        "  {:>2}. {:<30} {} {:>2}/10",
        index + 1,
        theme.name.bold(),
        colored_bar,
        theme.relevance
    );
    println!("      {}", theme.description.dimmed());
    for point in &theme.key_points {
        println!("      * {point}");
    }
}

fn display_connection(connection: &Connection) {
    println!(
        "  {} --{}--> {} (strength {})",
        connection.from,
        connection.relationship_type.to_string().cyan(),
        connection.to,
        connection.strength
    );
}

/// Display the outcome of a session run.
pub fn display_state(state: &AnalysisState) {
    match state {
        AnalysisState::Ready(result) => display_map(result),
        AnalysisState::NothingToAnalyze(result) => {
            println!("{}", "Nothing to analyze: the document has no text or rows.".yellow());
            display_map(result);
        }
        AnalysisState::Failed { message, detail } => {
            println!("{} {}", "Error:".red().bold(), message);
            println!("  {}", detail.dimmed());
        }
        AnalysisState::Idle | AnalysisState::Analyzing => {
            println!("Analysis status: {state}");
        }
    }
}

/// List the pattern catalog in declaration (tie-break) order.
pub fn display_catalog(catalog: &PatternCatalog) {
    println!(
        "\n{}",
        format!("=== Pattern Catalog ({} domains) ===", catalog.len()).bold()
    );
    println!();
    for (i, entry) in catalog.entries().iter().enumerate() {
        println!("  {:>2}. {:<22} {}", i + 1, entry.name.bold(), entry.description);
        println!("      {}", entry.pattern_source().dimmed());
    }
}
