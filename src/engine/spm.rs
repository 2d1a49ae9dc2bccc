//! Subword model files loaded with the `sentencepiece` crate.
//!
//! `sp_model_kwargs` may enable subword regularization:
//! `{"enable_sampling": true, "nbest_size": 64, "alpha": 0.1}`.
//!
//! `nbest_size` must be at most 512. A negative value asks for sampling over
//! all hypotheses, which the library bounds at 512 candidates; it is
//! mapped to that bound. `alpha` must be a positive normal number.

use std::collections::BTreeMap;
use std::path::Path;

use log::debug;
use prost::Message;
use sentencepiece::SentencePieceProcessor;

use crate::engine::PieceModel;
use crate::error::{Result, WakachiError};

/// Largest `nbest_size` the sampler accepts.
pub const MAX_NBEST_SIZE: usize = 512;

const DEFAULT_ALPHA: f64 = 0.1;

/// The part of the serialized model we read: its piece table.
#[derive(Clone, PartialEq, Message)]
struct ModelProto {
    #[prost(message, repeated, tag = "1")]
    pieces: Vec<ModelPiece>,
}

#[derive(Clone, PartialEq, Message)]
struct ModelPiece {
    #[prost(string, optional, tag = "1")]
    piece: Option<String>,
    #[prost(float, optional, tag = "2")]
    score: Option<f32>,
    #[prost(int32, optional, tag = "3")]
    kind: Option<i32>,
}

/// Decode the id-ordered piece strings of a serialized model.
pub(crate) fn piece_table(proto: &[u8]) -> Result<Vec<String>> {
    let model = ModelProto::decode(proto)
        .map_err(|e| WakachiError::invalid_configuration(format!("Malformed subword model: {e}")))?;
    Ok(model
        .pieces
        .into_iter()
        .map(|p| p.piece.unwrap_or_default())
        .collect())
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Sampling {
    nbest_size: usize,
    alpha: f32,
}

/// A [`PieceModel`] over a binary subword model file.
pub struct SentencePieceModel {
    inner: SentencePieceProcessor,
    pieces: Vec<String>,
    sampling: Option<Sampling>,
}

impl SentencePieceModel {
    pub fn open(path: &Path, kwargs: &BTreeMap<String, serde_json::Value>) -> Result<Self> {
        let sampling = sampling_from_kwargs(kwargs)?;
        let inner = SentencePieceProcessor::open(path).map_err(|e| {
            WakachiError::invalid_configuration(format!(
                "Failed to load subword model '{}': {}",
                path.display(),
                e
            ))
        })?;
        let pieces = piece_table(&inner.to_serialized_proto())?;
        debug!("loaded {} pieces from {}", pieces.len(), path.display());

        Ok(Self {
            inner,
            pieces,
            sampling,
        })
    }
}

fn sampling_from_kwargs(kwargs: &BTreeMap<String, serde_json::Value>) -> Result<Option<Sampling>> {
    for key in kwargs.keys() {
        if !matches!(key.as_str(), "enable_sampling" | "nbest_size" | "alpha") {
            debug!("ignoring subword model argument '{key}'");
        }
    }

    let enabled = kwargs
        .get("enable_sampling")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false);
    if !enabled {
        return Ok(None);
    }

    let nbest_size = match kwargs.get("nbest_size") {
        None => -1,
        Some(value) => value.as_i64().ok_or_else(|| {
            WakachiError::invalid_configuration(format!("nbest_size must be an integer, got {value}"))
        })?,
    };
    let nbest_size = match usize::try_from(nbest_size) {
        Err(_) => MAX_NBEST_SIZE,
        Ok(n) if n > MAX_NBEST_SIZE => {
            return Err(WakachiError::invalid_configuration(format!(
                "nbest_size must be at most {MAX_NBEST_SIZE}, got {n}"
            )));
        }
        Ok(n) => n,
    };

    let alpha = match kwargs.get("alpha") {
        None => DEFAULT_ALPHA,
        Some(value) => value.as_f64().ok_or_else(|| {
            WakachiError::invalid_configuration(format!("alpha must be a number, got {value}"))
        })?,
    };
    let alpha = alpha as f32;
    if !alpha.is_normal() || alpha.is_sign_negative() {
        return Err(WakachiError::invalid_configuration(format!(
            "alpha must be a positive number, got {alpha}"
        )));
    }

    Ok(Some(Sampling { nbest_size, alpha }))
}

impl PieceModel for SentencePieceModel {
    fn encode_as_pieces(&self, text: &str) -> Result<Vec<String>> {
        let pieces = match self.sampling {
            Some(Sampling { nbest_size, alpha }) => self.inner.sample_encode(text, nbest_size, alpha),
            None => self.inner.encode(text),
        }
        .map_err(|e| WakachiError::engine(format!("Subword encode error: {e}")))?;

        Ok(pieces.into_iter().map(|p| p.piece).collect())
    }

    fn id_to_piece(&self, id: u32) -> Result<String> {
        self.pieces
            .get(id as usize)
            .cloned()
            .ok_or_else(|| WakachiError::engine(format!("Piece id {id} is out of range")))
    }

    fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    fn decode_pieces(&self, pieces: &[String]) -> Result<String> {
        self.inner
            .decode_pieces(pieces)
            .map_err(|e| WakachiError::engine(format!("Subword decode error: {e}")))
    }
}
