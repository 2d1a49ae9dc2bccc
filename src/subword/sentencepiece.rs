//! Subword-model segmentation with digit/comma regrouping.
//!
//! Subword models sometimes fuse a trailing comma into a number piece
//! (`▁1,`), unlike how the same number is split elsewhere. Every piece of
//! more than one character that ends in a comma preceded by a decimal digit
//! (Unicode `Nd`, so `１` but not `Ⅻ` or `½`) is re-encoded without the comma
//! and the comma is emitted as its own piece.

use std::path::Path;
use std::sync::Arc;

use log::debug;
use regex::Regex;

use crate::config::EngineOptions;
use crate::engine::{PieceModel, load_piece_model};
use crate::error::{Result, WakachiError};
use crate::subword::SubwordTokenizer;
use crate::vocab::Vocabulary;

/// The marker a subword model puts at the start of a word-initial piece.
pub const WORD_BOUNDARY: char = '▁';

/// Tokenizer over a [`PieceModel`].
pub struct SentencepieceTokenizer {
    model: Arc<dyn PieceModel>,
    vocab: Arc<Vocabulary>,
    digit_comma: Regex,
}

impl SentencepieceTokenizer {
    /// Construct from exactly one of a model file and a loaded model.
    pub fn new(
        model_file: Option<&Path>,
        model: Option<Arc<dyn PieceModel>>,
        options: &EngineOptions,
    ) -> Result<Self> {
        match (model_file, model) {
            (Some(path), None) => Self::from_model(load_piece_model(path, options)?),
            (None, Some(model)) => Self::from_model(model),
            (Some(_), Some(_)) => Err(WakachiError::invalid_configuration(
                "Only one of a subword model file and a loaded model may be specified",
            )),
            (None, None) => Err(WakachiError::invalid_configuration(
                "Either a subword model file or a loaded model must be specified",
            )),
        }
    }

    /// Wrap an already-loaded model and read its piece table.
    pub fn from_model(model: Arc<dyn PieceModel>) -> Result<Self> {
        let count = model.piece_count();
        let pieces = (0..count as u32)
            .map(|id| model.id_to_piece(id))
            .collect::<Result<Vec<_>>>()?;
        let vocab = Vocabulary::from_pieces(pieces)?;
        debug!("subword model with {count} pieces");

        Ok(Self {
            model,
            vocab: Arc::new(vocab),
            digit_comma: Regex::new(r"\p{Nd},\z")
                .map_err(|e| WakachiError::invalid_configuration(e.to_string()))?,
        })
    }

    /// The shared vocabulary handle.
    pub fn shared_vocabulary(&self) -> Arc<Vocabulary> {
        self.vocab.clone()
    }

    /// Decode pieces with the model's own detokenizer.
    pub fn decode(&self, pieces: &[String]) -> Result<String> {
        self.model.decode_pieces(pieces)
    }

    fn regroup_digit_comma(&self, piece: String, output: &mut Vec<String>) -> Result<()> {
        if !self.ends_with_digit_comma(&piece) {
            output.push(piece);
            return Ok(());
        }

        let number = piece[..piece.len() - 1].replace(WORD_BOUNDARY, "");
        let mut pieces = self.model.encode_as_pieces(&number)?;

        if !piece.starts_with(WORD_BOUNDARY)
            && let Some(first) = pieces.first()
            && let Some(rest) = first.strip_prefix(WORD_BOUNDARY)
        {
            if rest.is_empty() {
                pieces.remove(0);
            } else {
                pieces[0] = rest.to_string();
            }
        }

        pieces.push(",".to_string());
        output.extend(pieces);
        Ok(())
    }

    fn ends_with_digit_comma(&self, piece: &str) -> bool {
        self.digit_comma.is_match(piece)
    }
}

impl SubwordTokenizer for SentencepieceTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        let pieces = self.model.encode_as_pieces(text)?;
        let mut output = Vec::with_capacity(pieces.len());
        for piece in pieces {
            self.regroup_digit_comma(piece, &mut output)?;
        }
        Ok(output)
    }

    fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    fn piece_count(&self) -> usize {
        self.model.piece_count()
    }

    fn name(&self) -> &'static str {
        "sentencepiece"
    }
}
