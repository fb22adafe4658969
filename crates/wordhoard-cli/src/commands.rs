//! Command implementations for wordhoard.
//!
//! Handles:
//! - Settings: Load config and apply CLI overrides
//! - Logging: Install the tracing subscriber
//! - Dispatch: Run one command against an open engine

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use wordhoard_engine::{Engine, EngineError};
use wordhoard_types::Settings;

use crate::cli::{Cli, Commands};

/// Load settings and apply CLI overrides (highest precedence).
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings =
        Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;

    if let Some(db_path) = &cli.db_path {
        settings.db_path = db_path.clone();
    }
    if let Some(log_level) = &cli.log_level {
        settings.log_level = log_level.clone();
    }
    Ok(settings)
}

/// Install a stderr subscriber. `RUST_LOG` wins over the configured level.
pub fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

/// Entry point for the binary.
///
/// 1. Load configuration (defaults -> file -> env -> CLI)
/// 2. Initialize logging
/// 3. Open the index
/// 4. Run the command, then close the index
pub fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(&cli)?;
    init_logging(&settings.log_level)?;

    let db_path = settings.expanded_db_path();
    info!("Opening index at {:?}", db_path);
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).context("Failed to create database directory")?;
    }
    let engine = Engine::create(&db_path).context("Failed to open index")?;

    let stdout = io::stdout();
    let result = execute(&engine, &settings, cli.command, &mut stdout.lock());
    engine.close().context("Failed to close index")?;
    result
}

/// Read command input from a file, or stdin when no file is given.
fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Run a single command, writing its output to `out`.
pub fn execute<W: Write>(
    engine: &Engine,
    settings: &Settings,
    command: Commands,
    out: &mut W,
) -> Result<()> {
    match command {
        Commands::Add { name, file } => {
            let text = read_input(file.as_deref())?;
            let stats = engine
                .add_content(&name, &text)
                .with_context(|| format!("Failed to add {}", name))?;
            writeln!(
                out,
                "Indexed {} ({} words, {} removed)",
                name, stats.words_indexed, stats.words_removed
            )?;
        }
        Commands::Noise { file } => {
            let text = read_input(file.as_deref())?;
            let added = engine.add_noise_words(&text)?;
            writeln!(out, "Added {} noise words", added)?;
        }
        Commands::Get { name } => match engine.doc_content(&name) {
            Ok(content) => write!(out, "{}", content)?,
            Err(EngineError::NotFound(name)) => anyhow::bail!("No document named {:?}", name),
            Err(e) => return Err(e.into()),
        },
        Commands::Find {
            query,
            start,
            count,
            json,
        } => {
            let results = engine.find(&query)?;
            let total = results.len();
            let page: Vec<_> = results
                .into_iter()
                .skip(start)
                .take(count.unwrap_or(usize::MAX))
                .collect();

            if json {
                serde_json::to_writer_pretty(&mut *out, &page)?;
                writeln!(out)?;
            } else {
                for result in &page {
                    writeln!(out, "{} (score {})", result.name, result.score)?;
                    let shown = settings.excerpt_lines.unwrap_or(usize::MAX);
                    for line in result.lines.iter().take(shown) {
                        write!(out, "    {}", line)?;
                        if !line.ends_with('\n') {
                            writeln!(out)?;
                        }
                    }
                }
                writeln!(out, "{} of {} results", page.len(), total)?;
            }
        }
        Commands::Complete { text } => {
            for word in engine.complete(&text)? {
                writeln!(out, "{}", word)?;
            }
        }
        Commands::Clear => {
            engine.clear()?;
            writeln!(out, "Cleared index")?;
        }
        Commands::Stats => {
            let stats = engine.stats()?;
            writeln!(out, "Documents:        {}", stats.document_count)?;
            writeln!(out, "Indexed words:    {}", stats.word_count)?;
            writeln!(out, "Noise words:      {}", stats.noise_word_count)?;
            writeln!(out, "Completion keys:  {}", stats.completion_key_count)?;
            writeln!(out, "Disk usage:       {} bytes", stats.disk_usage_bytes)?;
        }
        Commands::Compact { cf } => {
            engine.compact(cf.as_deref())?;
            match cf {
                Some(name) => writeln!(out, "Compacted column family {}", name)?,
                None => writeln!(out, "Compacted all column families")?,
            }
        }
    }
    Ok(())
}
