use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Command line arguments for Rowdesk
#[derive(Parser, Debug)]
#[command(
    name = "rowdesk",
    version = env!("CARGO_PKG_VERSION"),
    about = "Terminal browser and editor for typed CSV records",
    long_about = "Browse, filter, sort and select rows of a typed CSV file in the terminal, with a multi-field editor form."
)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Command to execute (defaults to the interactive screen)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive table and editor
    Tui(TuiArgs),
    /// Print records without the interactive screen
    Show(ShowArgs),
    /// Configuration management commands
    Config(ConfigArgs),
    /// Display version information
    Version,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
    /// Table output
    Table,
    /// CSV output
    Csv,
}

/// Interactive screen arguments
#[derive(ClapArgs, Debug, Default)]
pub struct TuiArgs {
    /// CSV file to load instead of the configured one
    #[arg(short, long)]
    pub data: Option<PathBuf>,
}

/// Non-interactive listing arguments
#[derive(ClapArgs, Debug, Default)]
pub struct ShowArgs {
    /// CSV file to load instead of the configured one
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Column to filter on
    #[arg(long, requires = "filter")]
    pub filter_column: Option<String>,

    /// Substring the filter column must contain
    #[arg(long, requires = "filter_column")]
    pub filter: Option<String>,

    /// Column to sort by
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,
}

/// Configuration management arguments
#[derive(ClapArgs, Debug)]
pub struct ConfigArgs {
    /// Configuration subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Validate configuration
    Validate {
        /// Configuration file path
        file: Option<PathBuf>,
    },
    /// Create default configuration
    Init {
        /// Directory to create `.rowdesk/config.toml` in
        #[arg(short, long)]
        dir: Option<PathBuf>,
        /// Write the global configuration instead
        #[arg(short, long)]
        global: bool,
    },
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_tui() {
        let args = Args::try_parse_from(["rowdesk"]).unwrap();
        assert!(args.command.is_none());
    }

    #[test]
    fn test_show_arguments() {
        let args = Args::try_parse_from([
            "rowdesk", "--output", "json", "show", "--filter-column", "Age", "--filter", "4", "--sort", "id", "--desc",
        ])
        .unwrap();

        assert!(matches!(args.output, OutputFormat::Json));
        match args.command {
            Some(Command::Show(show)) => {
                assert_eq!(show.filter_column.as_deref(), Some("Age"));
                assert_eq!(show.filter.as_deref(), Some("4"));
                assert_eq!(show.sort.as_deref(), Some("id"));
                assert!(show.desc);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_filter_needs_column() {
        assert!(Args::try_parse_from(["rowdesk", "show", "--filter", "x"]).is_err());
        assert!(Args::try_parse_from(["rowdesk", "show", "--desc"]).is_err());
    }
}
