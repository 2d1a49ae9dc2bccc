//! MeCab-style segmentation on Lindera.
//!
//! Dictionary names follow the MeCab Python bindings: `ipadic`,
//! `unidic_lite` and `unidic`. The MeCab option string understands `-d DIR`
//! (system dictionary directory) and `-u FILE` (user dictionary); other
//! options have no Lindera equivalent and are ignored with a warning.

use std::borrow::Cow;
use std::str::FromStr;

use lindera::dictionary::{load_dictionary, load_user_dictionary};
use lindera::mode::Mode;
use lindera::segmenter::Segmenter;
use log::warn;

use crate::config::EngineOptions;
use crate::engine::MorphologicalAnalyzer;
use crate::error::{AnalyzerError, Result, WakachiError};

/// Resolved Lindera dictionary locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MecabSettings {
    pub dictionary_uri: String,
    pub user_dictionary_uri: Option<String>,
}

impl MecabSettings {
    pub fn from_options(options: &EngineOptions) -> Result<Self> {
        let mut dictionary_uri = match options.mecab_dic.as_deref() {
            None | Some("ipadic") => "embedded://ipadic".to_string(),
            Some("unidic_lite") | Some("unidic") => "embedded://unidic".to_string(),
            Some(other) => {
                return Err(WakachiError::invalid_configuration(format!(
                    "Invalid mecab_dic '{other}' is specified."
                )));
            }
        };
        let mut user_dictionary_uri = None;

        if let Some(option) = options.mecab_option.as_deref() {
            let mut args = option.split_whitespace();
            while let Some(arg) = args.next() {
                match arg {
                    "-d" | "-u" => {
                        let value = args.next().ok_or_else(|| {
                            WakachiError::invalid_configuration(format!(
                                "mecab_option '{arg}' requires a value"
                            ))
                        })?;
                        if arg == "-d" {
                            dictionary_uri = value.to_string();
                        } else {
                            user_dictionary_uri = Some(value.to_string());
                        }
                    }
                    other => warn!("ignoring unsupported mecab option '{other}'"),
                }
            }
        }

        Ok(Self {
            dictionary_uri,
            user_dictionary_uri,
        })
    }
}

/// Dictionary-based segmentation with a Lindera segmenter.
pub struct LinderaAnalyzer {
    inner: Segmenter,
}

impl LinderaAnalyzer {
    pub fn new(settings: &MecabSettings) -> Result<Self> {
        let mode = Mode::from_str("normal")
            .map_err(|e| WakachiError::invalid_configuration(format!("Invalid mode: {e}")))?;
        let dict = load_dictionary(&settings.dictionary_uri).map_err(|e| {
            WakachiError::unavailable_engine(format!(
                "Failed to load dictionary '{}': {}",
                settings.dictionary_uri, e
            ))
        })?;
        let user_dict = match &settings.user_dictionary_uri {
            Some(uri) => Some(load_user_dictionary(uri, &dict.metadata).map_err(|e| {
                WakachiError::invalid_configuration(format!(
                    "Failed to load user dictionary '{uri}': {e}"
                ))
            })?),
            None => None,
        };

        Ok(Self {
            inner: Segmenter::new(mode, dict, user_dict),
        })
    }
}

impl MorphologicalAnalyzer for LinderaAnalyzer {
    fn analyze(&self, text: &str) -> std::result::Result<Vec<String>, AnalyzerError> {
        let tokens = self
            .inner
            .segment(Cow::Borrowed(text))
            .map_err(|e| AnalyzerError::Engine(format!("Failed to segment text: {e}")))?;

        Ok(tokens
            .into_iter()
            .map(|token| token.surface.to_string())
            .filter(|surface| !surface.trim().is_empty())
            .collect())
    }

    fn name(&self) -> &'static str {
        "lindera"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_dictionary_name() {
        let options = EngineOptions {
            mecab_dic: Some("unidic_lite".to_string()),
            ..Default::default()
        };
        let settings = MecabSettings::from_options(&options).unwrap();
        assert_eq!(settings.dictionary_uri, "embedded://unidic");
        assert_eq!(settings.user_dictionary_uri, None);
    }

    #[test]
    fn test_settings_from_option_string() {
        let options = EngineOptions {
            mecab_option: Some("-d /opt/dic -u user.csv -Owakati".to_string()),
            ..Default::default()
        };
        let settings = MecabSettings::from_options(&options).unwrap();
        assert_eq!(settings.dictionary_uri, "/opt/dic");
        assert_eq!(settings.user_dictionary_uri.as_deref(), Some("user.csv"));
    }

    #[test]
    fn test_unknown_dictionary_name() {
        let options = EngineOptions {
            mecab_dic: Some("jumandic".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            MecabSettings::from_options(&options),
            Err(WakachiError::InvalidConfiguration(_))
        ));
    }

    #[cfg(feature = "embedded-ipadic")]
    #[test]
    fn test_analyze_with_ipadic() {
        let settings = MecabSettings::from_options(&EngineOptions::default()).unwrap();
        let analyzer = LinderaAnalyzer::new(&settings).unwrap();

        let surfaces = analyzer.analyze("関西国際空港限定トートバッグ").unwrap();

        assert_eq!(surfaces.concat(), "関西国際空港限定トートバッグ");
        assert!(surfaces.len() > 1);
        assert_eq!(analyzer.name(), "lindera");
    }
}
