//! CLI argument parsing for wordhoard.
//!
//! CLI flags override all other config sources.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// wordhoard
///
/// A persistent full-text index with ranked search and word completion.
#[derive(Parser, Debug)]
#[command(name = "wordhoard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/wordhoard/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Override database path
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Index and query commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add or replace a document
    Add {
        /// Document name
        name: String,

        /// File to read the content from (stdin when omitted)
        file: Option<PathBuf>,
    },

    /// Register every word of the input as a noise word
    Noise {
        /// File to read noise words from (stdin when omitted)
        file: Option<PathBuf>,
    },

    /// Print a document's stored content
    Get {
        /// Document name
        name: String,
    },

    /// Search documents
    Find {
        /// Query text
        query: String,

        /// Index of the first result to print
        #[arg(long, default_value = "0")]
        start: usize,

        /// Maximum results to print (all when omitted)
        #[arg(long)]
        count: Option<usize>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Complete the last word of the given text
    Complete {
        /// Partially typed text
        text: String,
    },

    /// Erase all documents, index entries and noise words
    Clear,

    /// Show database statistics
    Stats,

    /// Trigger RocksDB compaction
    Compact {
        /// Compact only specific column family
        #[arg(long)]
        cf: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_add_with_file() {
        let cli = Cli::parse_from(["wordhoard", "add", "notes", "/tmp/notes.txt"]);
        match cli.command {
            Commands::Add { name, file } => {
                assert_eq!(name, "notes");
                assert_eq!(file, Some(PathBuf::from("/tmp/notes.txt")));
            }
            _ => panic!("Expected Add command"),
        }
    }

    #[test]
    fn test_cli_add_from_stdin() {
        let cli = Cli::parse_from(["wordhoard", "add", "notes"]);
        assert!(matches!(cli.command, Commands::Add { file: None, .. }));
    }

    #[test]
    fn test_cli_find_defaults() {
        let cli = Cli::parse_from(["wordhoard", "find", "quick fox"]);
        match cli.command {
            Commands::Find {
                query,
                start,
                count,
                json,
            } => {
                assert_eq!(query, "quick fox");
                assert_eq!(start, 0);
                assert_eq!(count, None);
                assert!(!json);
            }
            _ => panic!("Expected Find command"),
        }
    }

    #[test]
    fn test_cli_find_paging() {
        let cli = Cli::parse_from(["wordhoard", "find", "fox", "--start", "10", "--count", "5"]);
        match cli.command {
            Commands::Find { start, count, .. } => {
                assert_eq!(start, 10);
                assert_eq!(count, Some(5));
            }
            _ => panic!("Expected Find command"),
        }
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "wordhoard",
            "stats",
            "--db-path",
            "/data/wordhoard",
            "-l",
            "debug",
        ]);
        assert_eq!(cli.db_path, Some("/data/wordhoard".to_string()));
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::Stats));
    }

    #[test]
    fn test_cli_with_config() {
        let cli = Cli::parse_from(["wordhoard", "--config", "/path/to/config.toml", "clear"]);
        assert_eq!(cli.config, Some("/path/to/config.toml".to_string()));
        assert!(matches!(cli.command, Commands::Clear));
    }

    #[test]
    fn test_cli_compact_cf() {
        let cli = Cli::parse_from(["wordhoard", "compact", "--cf", "words"]);
        match cli.command {
            Commands::Compact { cf } => assert_eq!(cf, Some("words".to_string())),
            _ => panic!("Expected Compact command"),
        }
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["wordhoard"]).is_err());
    }
}
