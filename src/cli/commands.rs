//! Command implementations for the Wakachi CLI.
//!
//! Commands return [`anyhow::Result`] so library errors reach the binary
//! with the context of what the command was doing.

use std::io::{self, BufRead};

use anyhow::{Context, Result};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::{ConfigOverrides, TokenizerConfig};
use crate::engine::Engines;
use crate::pipeline::PipelineTokenizer;
use crate::pretrained::{LocalLoader, from_registry};
use crate::registry;
use crate::special_tokens::SpecialTokens;

/// Execute a CLI command.
pub fn execute_command(args: WakachiArgs) -> Result<()> {
    match &args.command {
        Command::Tokenize(tokenize_args) => tokenize(tokenize_args.clone(), &args),
        Command::Models(models_args) => list_models(models_args.clone(), &args),
    }
}

/// Build the pipeline described by the tokenize arguments.
fn build_tokenizer(args: &TokenizeArgs, engines: &Engines) -> Result<PipelineTokenizer> {
    if let Some(model) = &args.model {
        let mut overrides = ConfigOverrides::new();
        overrides.word_tokenizer = args.word_tokenizer;
        overrides.subword_tokenizer = args.subword_tokenizer;
        overrides.tokenizer_class = args.tokenizer_class;
        if args.lower_case {
            overrides.do_lower_case = Some(true);
        }
        let loader = LocalLoader::new(&args.model_dir);
        return from_registry(model, &overrides, &loader, engines).with_context(|| {
            format!(
                "Failed to load model '{}' from {}",
                model,
                args.model_dir.display()
            )
        });
    }

    let mut config = match &args.config {
        Some(path) => TokenizerConfig::from_json_file(path)
            .with_context(|| format!("Invalid config file {}", path.display()))?,
        None => TokenizerConfig::new(),
    };
    if let Some(vocab) = &args.vocab {
        config.vocab_file = Some(vocab.clone());
    }
    if let Some(kind) = args.word_tokenizer {
        config.word_tokenizer = kind;
    }
    if let Some(kind) = args.subword_tokenizer {
        config.subword_tokenizer = kind;
    }
    if args.lower_case {
        config.do_lower_case = true;
    }
    PipelineTokenizer::new(config, SpecialTokens::default(), engines)
        .context("Failed to build tokenizer")
}

/// Tokenize the given texts, or stdin lines when none are given.
fn tokenize(args: TokenizeArgs, cli_args: &WakachiArgs) -> Result<()> {
    let engines = Engines::new();
    let tokenizer = build_tokenizer(&args, &engines)?;

    let texts = if args.text.is_empty() {
        io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<Vec<_>>>()
            .context("Failed to read text from stdin")?
    } else {
        args.text.clone()
    };

    let batch = tokenizer.tokenize_batch(&texts)?;
    let mut results = Vec::with_capacity(texts.len());
    for (text, tokens) in texts.into_iter().zip(batch) {
        let ids = if args.ids {
            Some(
                tokenizer
                    .convert_tokens_to_ids(&tokens)
                    .with_context(|| format!("Failed to convert tokens of '{text}' to ids"))?,
            )
        } else {
            None
        };
        results.push(TokenizedText { text, tokens, ids });
    }

    output_result(
        "Tokenized",
        &TokenizationResults {
            word_tokenizer: tokenizer.config().word_tokenizer.to_string(),
            subword_tokenizer: tokenizer.config().subword_tokenizer.to_string(),
            results,
        },
        cli_args,
    )?;
    Ok(())
}

/// List registered models.
fn list_models(args: ModelsArgs, cli_args: &WakachiArgs) -> Result<()> {
    let models = registry::model_names()
        .into_iter()
        .filter(|name| {
            args.prefix
                .as_deref()
                .is_none_or(|prefix| name.starts_with(prefix))
        })
        .map(|name| {
            let entry = registry::resolve(name);
            ModelInfo {
                name: name.to_string(),
                word_tokenizer: entry
                    .and_then(|e| e.word_tokenizer)
                    .map(|kind| kind.to_string()),
                tokenizer_class: entry
                    .and_then(|e| e.tokenizer_class)
                    .map(|class| class.to_string()),
            }
        })
        .collect();

    output_result(
        "Registered models",
        &ModelListResult {
            models,
            detailed: args.long,
        },
        cli_args,
    )?;
    Ok(())
}
