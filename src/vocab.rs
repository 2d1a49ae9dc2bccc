//! Bidirectional piece/id vocabulary.
//!
//! Ids are the dense positions of the pieces in the order the vocabulary
//! file or subword model lists them, starting at 0.
//!
//! ```
//! use wakachi::vocab::Vocabulary;
//!
//! let vocab = Vocabulary::from_pieces(["[PAD]", "[UNK]", "今日"]).unwrap();
//! assert_eq!(vocab.id("今日"), Some(2));
//! assert_eq!(vocab.piece(1), Some("[UNK]"));
//! assert_eq!(vocab.len(), 3);
//! ```

use std::fs;
use std::path::Path;

use ahash::AHashMap;

use crate::error::{Result, WakachiError};

/// Immutable mapping between piece strings and integer ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    piece_to_id: AHashMap<String, u32>,
    id_to_piece: Vec<String>,
}

impl Vocabulary {
    /// An empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from pieces in id order.
    ///
    /// A repeated piece would leave a gap in the id space and is rejected.
    pub fn from_pieces<I, S>(pieces: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut piece_to_id = AHashMap::new();
        let mut id_to_piece = Vec::new();

        for piece in pieces {
            let piece = piece.into();
            let id = id_to_piece.len() as u32;
            if piece_to_id.insert(piece.clone(), id).is_some() {
                return Err(WakachiError::invalid_configuration(format!(
                    "Duplicate vocabulary piece '{piece}' at id {id}"
                )));
            }
            id_to_piece.push(piece);
        }

        Ok(Self {
            piece_to_id,
            id_to_piece,
        })
    }

    /// Load a newline-delimited UTF-8 piece list.
    ///
    /// Only the trailing `\n` of each line is removed; every other character,
    /// including a `\r`, belongs to the piece.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            WakachiError::vocabulary_not_found(format!(
                "Failed to read vocabulary file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_pieces(content.split_terminator('\n'))
    }

    pub fn id(&self, piece: &str) -> Option<u32> {
        self.piece_to_id.get(piece).copied()
    }

    pub fn piece(&self, id: u32) -> Option<&str> {
        self.id_to_piece.get(id as usize).map(String::as_str)
    }

    pub fn contains(&self, piece: &str) -> bool {
        self.piece_to_id.contains_key(piece)
    }

    pub fn len(&self) -> usize {
        self.id_to_piece.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_piece.is_empty()
    }

    /// Pieces in id order.
    pub fn pieces(&self) -> impl Iterator<Item = &str> {
        self.id_to_piece.iter().map(String::as_str)
    }
}
