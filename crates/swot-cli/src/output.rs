//! Output formatting for search results and entries.

use clap::ValueEnum;
use colored::Colorize;
use serde_json::json;
use swot_core::{BuildStats, Diagnostic, DiagnosticSeverity, QaEntry};

/// How command output is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, colorized text (default)
    Text,
    /// Machine-readable JSON
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Render one entry in full: question, short answer, code blocks, and
/// follow-ups.
pub fn print_entry(entry: &QaEntry, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(entry)?);
        },
        OutputFormat::Text => {
            println!("{} {}", entry.id.dimmed(), entry.question.bold());
            if entry.short_answer.is_empty() {
                println!("  {}", "(no short answer recognized)".dimmed());
            } else {
                println!("  {}", entry.short_answer);
            }
            for block in &entry.code_blocks {
                println!("  {}", format!("[{}]", block.language).cyan());
                for line in block.text.lines() {
                    println!("    {line}");
                }
            }
            for follow_up in &entry.follow_ups {
                println!("  {} {}", "↳".yellow(), follow_up.question);
            }
        },
    }
    Ok(())
}

/// Render a list of matched entries as id + question lines.
pub fn print_matches(
    matches: &[(&str, Option<&QaEntry>)],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let rows: Vec<_> = matches
                .iter()
                .map(|(id, entry)| {
                    json!({
                        "id": id,
                        "question": entry.map(|e| e.question.as_str()),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        },
        OutputFormat::Text => {
            if matches.is_empty() {
                println!("{}", "No matches.".dimmed());
            }
            for (id, entry) in matches {
                match entry {
                    Some(entry) => println!("{}  {}", id.green(), entry.question),
                    None => println!("{id}"),
                }
            }
        },
    }
    Ok(())
}

/// Render build statistics and any warnings collected along the way.
pub fn print_build_report(
    stats: BuildStats,
    diagnostics: &[Diagnostic],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "stats": stats,
                    "diagnostics": diagnostics,
                }))?
            );
        },
        OutputFormat::Text => {
            println!(
                "Indexed {} entries from {} documents ({} distinct terms)",
                stats.entries.to_string().bold(),
                stats.documents,
                stats.terms
            );
            for diagnostic in diagnostics {
                let tag = match diagnostic.severity {
                    DiagnosticSeverity::Error => "error".red(),
                    DiagnosticSeverity::Warn => "warn".yellow(),
                    DiagnosticSeverity::Info => "info".dimmed(),
                };
                let location = match (&diagnostic.path, diagnostic.line) {
                    (Some(path), Some(line)) => format!("{path}:{line}: "),
                    (Some(path), None) => format!("{path}: "),
                    _ => String::new(),
                };
                println!("  {tag}: {location}{}", diagnostic.message);
            }
        },
    }
    Ok(())
}
