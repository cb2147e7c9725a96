//! Batch SACI scoring of exported examination records.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin score_exams -- --input <exams.json> [--output <scores.json>] [--composite] [--report]
//! ```
//!
//! Reads a JSON array of exams keyed by clinical code (`S1_2`, ..., `NMnc_post`)
//! and writes one `{ id, components, outcome }` object per exam. `--report`
//! prints the plain-text readout for each exam instead of JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use saci::adapters::json::{load_exams, write_scored};
use saci::adapters::sanitize::SanitizingMakeWriter;
use saci::application::ScoringService;
use saci::config::AppConfig;
use saci::domain::ScoreView;

const USAGE: &str =
    "Usage: score_exams --input <path> [--output <path>] [--composite] [--report]";

/// Parsed command line for a scoring run.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Options {
    input: PathBuf,
    output: Option<PathBuf>,
    view: ScoreView,
    text_report: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Help,
    Run(Options),
}

/// Parse arguments (program name already skipped). `Err` carries the usage
/// message; the caller exits with status 2.
fn parse_args<I>(args: I, default_view: ScoreView) -> std::result::Result<Command, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut input: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut view = default_view;
    let mut text_report = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--input" | "-i" => match args.next() {
                Some(p) if !p.is_empty() => input = Some(PathBuf::from(p)),
                _ => return Err("--input requires a path".to_string()),
            },
            "--output" | "-o" => match args.next() {
                Some(p) if !p.is_empty() => output = Some(PathBuf::from(p)),
                _ => return Err("--output requires a path".to_string()),
            },
            "--composite" => view = ScoreView::Composite,
            "--report" => text_report = true,
            "--help" | "-h" => return Ok(Command::Help),
            other => return Err(format!("Unknown argument: {other}")),
        }
    }

    let input = input.ok_or_else(|| "--input is required".to_string())?;
    Ok(Command::Run(Options {
        input,
        output,
        view,
        text_report,
    }))
}

fn main() -> Result<()> {
    let (config, warnings) = AppConfig::from_env();

    // stdout carries the results; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(SanitizingMakeWriter::with_limit(
            std::io::stderr,
            config.sanitize_max_bytes,
        ))
        .init();

    for warning in &warnings {
        tracing::warn!("{warning}");
    }

    let options = match parse_args(std::env::args().skip(1), config.view) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Help) => {
            println!("{USAGE}");
            return Ok(());
        }
        Err(message) => {
            eprintln!("{message}");
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };
    let Options {
        input,
        output,
        view,
        text_report,
    } = options;

    let exams = load_exams(&input).with_context(|| format!("reading {}", input.display()))?;
    let service = ScoringService::new(view);
    let scored = service.assess_batch(&exams);

    if text_report {
        let mut out = String::new();
        for exam in &scored {
            out.push_str(&format!(
                "== {} ==\n",
                exam.id.as_deref().unwrap_or("(no id)")
            ));
            out.push_str(&service.render_report(&exam.assessment));
            out.push('\n');
        }
        match &output {
            Some(path) => std::fs::write(path, out)
                .with_context(|| format!("writing {}", path.display()))?,
            None => print!("{out}"),
        }
        return Ok(());
    }

    match &output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            write_scored(std::io::BufWriter::new(file), &scored)?;
            tracing::info!(path = %path.display(), exams = scored.len(), "Scores written");
        }
        None => write_scored(std::io::stdout().lock(), &scored)?,
    }

    Ok(())
}
