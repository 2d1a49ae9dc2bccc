//! Command line argument parsing for the Wakachi CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{SubwordTokenizerKind, TokenizerClass, WordTokenizerKind};

/// Wakachi - two-stage Japanese tokenization for subword language models
#[derive(Parser, Debug, Clone)]
#[command(name = "wakachi")]
#[command(about = "Word and subword tokenization of Japanese text")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct WakachiArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl WakachiArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Tokenize text with a registered model or a local configuration
    Tokenize(TokenizeArgs),

    /// List the registered model names
    Models(ModelsArgs),
}

/// Arguments for tokenizing
#[derive(Parser, Debug, Clone)]
pub struct TokenizeArgs {
    /// Text to tokenize; lines from stdin when omitted
    #[arg(value_name = "TEXT")]
    pub text: Vec<String>,

    /// Registered or local model name
    #[arg(short, long, conflicts_with = "config")]
    pub model: Option<String>,

    /// Directory holding `<model name>/` resource directories
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub model_dir: PathBuf,

    /// Pipeline configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Vocabulary or subword model file, overriding the configuration
    #[arg(long, value_name = "VOCAB_FILE")]
    pub vocab: Option<PathBuf>,

    /// Main word tokenizer kind ("" disables the word stage)
    #[arg(long)]
    pub word_tokenizer: Option<WordTokenizerKind>,

    /// Subword tokenizer kind
    #[arg(long)]
    pub subword_tokenizer: Option<SubwordTokenizerKind>,

    /// Tokenizer class for models outside the registry
    #[arg(long)]
    pub tokenizer_class: Option<TokenizerClass>,

    /// Lower-case unprotected tokens
    #[arg(long)]
    pub lower_case: bool,

    /// Also print token ids
    #[arg(long)]
    pub ids: bool,
}

/// Arguments for listing models
#[derive(Parser, Debug, Clone)]
pub struct ModelsArgs {
    /// Only list names starting with this prefix
    #[arg(long)]
    pub prefix: Option<String>,

    /// Show the pipeline settings of each model
    #[arg(short, long)]
    pub long: bool,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
