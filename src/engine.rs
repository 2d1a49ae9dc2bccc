//! External segmentation and subword engines.
//!
//! The pipeline treats third-party analyzers and subword models as black
//! boxes reached through the narrow traits in this module. [`Engines`]
//! resolves the engine for each kind: an instance injected by the caller
//! wins, otherwise a default adapter is constructed, otherwise construction
//! fails with [`WakachiError::UnavailableEngine`].
//!
//! | Trait | Used by | Default adapter |
//! |-------|---------|-----------------|
//! | [`MorphologicalAnalyzer`] | Juman, MeCab | `jumanpp` subprocess, Lindera (`lindera` feature) |
//! | [`LongUnitWordSegmenter`] | spaCy-LUW | none |
//! | [`SplitSegmenter`] | Sudachi | none |
//! | [`PieceModel`] | sentencepiece | `sentencepiece` crate (`sentencepiece` feature) |

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;

use crate::config::{EngineOptions, SplitMode, SudachiDictType};
use crate::error::{AnalyzerError, Result, WakachiError};

pub mod jumanpp;
#[cfg(feature = "lindera")]
pub mod mecab;
#[cfg(feature = "sentencepiece")]
pub mod spm;

/// A morphological analyzer returning surface strings in input order.
pub trait MorphologicalAnalyzer: Send + Sync {
    /// Segment `text` into morpheme surfaces.
    ///
    /// Engines that cannot cope with raw whitespace or double quotes must
    /// report [`AnalyzerError::Format`] so the caller can retry with
    /// placeholders.
    fn analyze(&self, text: &str) -> std::result::Result<Vec<String>, AnalyzerError>;

    /// Get the name of this engine.
    fn name(&self) -> &'static str;
}

/// A statistical long-unit-word segmenter grouping words by sentence.
pub trait LongUnitWordSegmenter: Send + Sync {
    fn segment(&self, text: &str) -> Result<Vec<Vec<String>>>;

    fn name(&self) -> &'static str;
}

/// One unit produced by a split-mode segmenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Morpheme {
    pub surface: String,
    pub dictionary_form: String,
    pub normalized_form: String,
}

impl Morpheme {
    /// A morpheme whose every form equals its surface.
    pub fn from_surface<S: Into<String>>(surface: S) -> Self {
        let surface = surface.into();
        Self {
            dictionary_form: surface.clone(),
            normalized_form: surface.clone(),
            surface,
        }
    }
}

/// A segmenter offering several split granularities.
pub trait SplitSegmenter: Send + Sync {
    fn segment(&self, text: &str, mode: SplitMode) -> Result<Vec<Morpheme>>;

    fn name(&self) -> &'static str;
}

/// A byte-pair or unigram subword model.
pub trait PieceModel: Send + Sync {
    /// Encode raw text into pieces.
    fn encode_as_pieces(&self, text: &str) -> Result<Vec<String>>;

    /// The piece with the given id.
    fn id_to_piece(&self, id: u32) -> Result<String>;

    /// Number of pieces in the model.
    fn piece_count(&self) -> usize;

    /// Decode pieces back into text.
    fn decode_pieces(&self, pieces: &[String]) -> Result<String>;
}

/// Settings handed to a Sudachi engine factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SudachiSettings {
    pub dict_type: SudachiDictType,
    pub config_path: Option<PathBuf>,
    pub resource_dir: Option<PathBuf>,
}

impl SudachiSettings {
    pub fn from_options(options: &EngineOptions) -> Self {
        Self {
            dict_type: options.sudachi_dict_type,
            config_path: options.sudachi_config_path.clone(),
            resource_dir: options.sudachi_resource_dir.clone(),
        }
    }
}

type SplitSegmenterFactory = dyn Fn(&SudachiSettings) -> Result<Arc<dyn SplitSegmenter>> + Send + Sync;

/// Engine instances available to tokenizer construction.
#[derive(Clone, Default)]
pub struct Engines {
    juman: Option<Arc<dyn MorphologicalAnalyzer>>,
    mecab: Option<Arc<dyn MorphologicalAnalyzer>>,
    long_unit: Option<Arc<dyn LongUnitWordSegmenter>>,
    split: Option<Arc<SplitSegmenterFactory>>,
    piece_model: Option<Arc<dyn PieceModel>>,
}

impl Engines {
    /// Only default adapters.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_juman(mut self, analyzer: Arc<dyn MorphologicalAnalyzer>) -> Self {
        self.juman = Some(analyzer);
        self
    }

    pub fn with_mecab(mut self, analyzer: Arc<dyn MorphologicalAnalyzer>) -> Self {
        self.mecab = Some(analyzer);
        self
    }

    pub fn with_long_unit_segmenter(mut self, segmenter: Arc<dyn LongUnitWordSegmenter>) -> Self {
        self.long_unit = Some(segmenter);
        self
    }

    /// Use one pre-configured split segmenter regardless of settings.
    pub fn with_split_segmenter(self, segmenter: Arc<dyn SplitSegmenter>) -> Self {
        self.with_split_segmenter_factory(move |_| Ok(segmenter.clone()))
    }

    /// Build split segmenters from the configured dictionary settings.
    pub fn with_split_segmenter_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(&SudachiSettings) -> Result<Arc<dyn SplitSegmenter>> + Send + Sync + 'static,
    {
        self.split = Some(Arc::new(factory));
        self
    }

    /// Use an already-loaded piece model instead of reading model files.
    pub fn with_piece_model(mut self, model: Arc<dyn PieceModel>) -> Self {
        self.piece_model = Some(model);
        self
    }

    pub fn juman(&self, options: &EngineOptions) -> Result<Arc<dyn MorphologicalAnalyzer>> {
        if let Some(analyzer) = &self.juman {
            return Ok(analyzer.clone());
        }
        debug!("starting juman engine '{}'", options.jumanpp_command);
        let analyzer = jumanpp::JumanppAnalyzer::spawn(&options.jumanpp_command)?;
        Ok(Arc::new(analyzer))
    }

    pub fn mecab(&self, options: &EngineOptions) -> Result<Arc<dyn MorphologicalAnalyzer>> {
        if let Some(analyzer) = &self.mecab {
            return Ok(analyzer.clone());
        }
        default_mecab(options)
    }

    pub fn long_unit_segmenter(&self) -> Result<Arc<dyn LongUnitWordSegmenter>> {
        self.long_unit.clone().ok_or_else(|| {
            WakachiError::unavailable_engine(
                "No long-unit-word segmenter is registered; provide one with Engines::with_long_unit_segmenter",
            )
        })
    }

    pub fn split_segmenter(&self, settings: &SudachiSettings) -> Result<Arc<dyn SplitSegmenter>> {
        match &self.split {
            Some(factory) => factory(settings),
            None => Err(WakachiError::unavailable_engine(
                "No sudachi segmenter is registered; provide one with Engines::with_split_segmenter",
            )),
        }
    }

    /// The injected piece model, or one loaded from `path`.
    pub fn piece_model(&self, path: Option<&Path>, options: &EngineOptions) -> Result<Arc<dyn PieceModel>> {
        if let Some(model) = &self.piece_model {
            return Ok(model.clone());
        }
        match path {
            Some(path) => load_piece_model(path, options),
            None => Err(WakachiError::invalid_configuration(
                "Either a subword model file or a loaded model must be specified",
            )),
        }
    }
}

#[cfg(feature = "lindera")]
fn default_mecab(options: &EngineOptions) -> Result<Arc<dyn MorphologicalAnalyzer>> {
    let settings = mecab::MecabSettings::from_options(options)?;
    debug!("loading mecab dictionary '{}'", settings.dictionary_uri);
    Ok(Arc::new(mecab::LinderaAnalyzer::new(&settings)?))
}

#[cfg(not(feature = "lindera"))]
fn default_mecab(_options: &EngineOptions) -> Result<Arc<dyn MorphologicalAnalyzer>> {
    Err(WakachiError::unavailable_engine(
        "The mecab word tokenizer requires the `lindera` feature",
    ))
}

/// Load a subword model file with the default engine.
pub fn load_piece_model(path: &Path, options: &EngineOptions) -> Result<Arc<dyn PieceModel>> {
    if !path.is_file() {
        return Err(WakachiError::vocabulary_not_found(format!(
            "Can't find a subword model file at path '{}'",
            path.display()
        )));
    }
    debug!("loading subword model '{}'", path.display());
    open_piece_model(path, options)
}

#[cfg(feature = "sentencepiece")]
fn open_piece_model(path: &Path, options: &EngineOptions) -> Result<Arc<dyn PieceModel>> {
    Ok(Arc::new(spm::SentencePieceModel::open(path, &options.sp_model_kwargs)?))
}

#[cfg(not(feature = "sentencepiece"))]
fn open_piece_model(_path: &Path, _options: &EngineOptions) -> Result<Arc<dyn PieceModel>> {
    Err(WakachiError::unavailable_engine(
        "Loading subword model files requires the `sentencepiece` feature",
    ))
}
