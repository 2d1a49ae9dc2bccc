//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cli::args::{OutputFormat, WakachiArgs};
use crate::error::Result;

/// Tokens (and optionally ids) of one input text.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenizedText {
    pub text: String,
    pub tokens: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<u32>>,
}

/// Result structure for the tokenize command.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenizationResults {
    pub word_tokenizer: String,
    pub subword_tokenizer: String,
    pub results: Vec<TokenizedText>,
}

/// One registry entry.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub word_tokenizer: Option<String>,
    pub tokenizer_class: Option<String>,
}

/// Result structure for the models command.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelListResult {
    pub models: Vec<ModelInfo>,
    pub detailed: bool,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &WakachiArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &WakachiArgs) -> Result<()> {
    let value = serde_json::to_value(result)?;

    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }

    match &value {
        Value::Object(obj) if obj.contains_key("results") => output_tokenization_human(&value, args),
        Value::Object(obj) if obj.contains_key("models") => output_models_human(&value),
        _ => output_generic_human(&value),
    }
}

/// One line of space-separated tokens per input; ids on the next line.
fn output_tokenization_human(value: &Value, args: &WakachiArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!(
            "word: {}  subword: {}",
            format_value(&value["word_tokenizer"]),
            format_value(&value["subword_tokenizer"])
        );
    }

    let Some(results) = value.get("results").and_then(Value::as_array) else {
        return Ok(());
    };
    for result in results {
        println!("{}", join_array(&result["tokens"]));
        if let Some(ids) = result.get("ids").filter(|ids| ids.is_array()) {
            println!("{}", join_array(ids));
        }
    }
    Ok(())
}

fn output_models_human(value: &Value) -> Result<()> {
    let detailed = value["detailed"].as_bool().unwrap_or(false);
    let Some(models) = value.get("models").and_then(Value::as_array) else {
        return Ok(());
    };

    let width = models
        .iter()
        .filter_map(|model| model["name"].as_str())
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(0);

    for model in models {
        let name = model["name"].as_str().unwrap_or_default();
        if detailed {
            println!(
                "{name:<width$}  {:<10} {}",
                format_value(&model["word_tokenizer"]),
                format_value(&model["tokenizer_class"])
            );
        } else {
            println!("{name}");
        }
    }
    Ok(())
}

fn output_generic_human(value: &Value) -> Result<()> {
    match value {
        Value::Object(obj) => {
            for (key, val) in obj {
                let formatted_val = format_value(val);
                println!("{key}: {formatted_val}");
            }
        }
        _ => {
            let formatted_value = format_value(value);
            println!("{formatted_value}");
        }
    }
    Ok(())
}

fn output_json<T: Serialize>(result: &T, args: &WakachiArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

fn join_array(value: &Value) -> String {
    value
        .as_array()
        .map(|items| items.iter().map(format_value).collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) if s.is_empty() => "(disabled)".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(_) => join_array(value),
        Value::Object(_) => value.to_string(),
    }
}
