//! wordhoard
//!
//! Index named text documents and query them from the command line.
//!
//! # Usage
//!
//! ```bash
//! wordhoard noise stopwords.txt
//! wordhoard add notes.txt ./notes.txt
//! wordhoard find "quick fox" --count 10
//! wordhoard complete "qui"
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/wordhoard/config.toml)
//! 3. Environment variables (WORDHOARD_*)
//! 4. CLI flags

use anyhow::Result;
use clap::Parser;

use wordhoard_cli::{run, Cli};

fn main() -> Result<()> {
    run(Cli::parse())
}
