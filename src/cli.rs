//! CLI interface for the language identification tool

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "doc-langid")]
#[command(about = "Extract text from office documents and identify its language")]
#[command(long_about = "Extract document text through an Apache Tika server and classify its dominant language with a fastText model")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Detect the language of one or more documents
    Detect {
        /// Documents to analyze (docx, pdf, pptx, txt, md, ...)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Path to the fastText model file
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,

        /// Show a text preview for each document
        #[arg(short, long)]
        detailed: bool,
    },

    /// Detect the language of a text given on the command line
    Text {
        /// Text to classify
        text: String,

        /// Path to the fastText model file
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Model management commands
    Models {
        #[command(subcommand)]
        action: ModelAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ModelAction {
    /// Download the language identification model
    Download {
        /// Force re-download if the model exists
        #[arg(short, long)]
        force: bool,
    },

    /// Remove the downloaded model
    Remove,

    /// Show model information
    Info,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" | "text" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json",
            format
        )),
    }
}
