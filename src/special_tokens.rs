//! Reserved tokens that neither stage may split or case-fold.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// The named special tokens of a model plus any additional reserved strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialTokens {
    pub unk_token: String,
    pub sep_token: String,
    pub pad_token: String,
    pub cls_token: String,
    pub mask_token: String,
    pub additional: Vec<String>,
}

impl Default for SpecialTokens {
    fn default() -> Self {
        Self {
            unk_token: "[UNK]".to_string(),
            sep_token: "[SEP]".to_string(),
            pad_token: "[PAD]".to_string(),
            cls_token: "[CLS]".to_string(),
            mask_token: "[MASK]".to_string(),
            additional: Vec::new(),
        }
    }
}

impl SpecialTokens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unk_token<S: Into<String>>(mut self, token: S) -> Self {
        self.unk_token = token.into();
        self
    }

    pub fn with_sep_token<S: Into<String>>(mut self, token: S) -> Self {
        self.sep_token = token.into();
        self
    }

    pub fn with_pad_token<S: Into<String>>(mut self, token: S) -> Self {
        self.pad_token = token.into();
        self
    }

    pub fn with_cls_token<S: Into<String>>(mut self, token: S) -> Self {
        self.cls_token = token.into();
        self
    }

    pub fn with_mask_token<S: Into<String>>(mut self, token: S) -> Self {
        self.mask_token = token.into();
        self
    }

    pub fn with_additional<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.additional.extend(tokens.into_iter().map(Into::into));
        self
    }

    /// All special token strings in declaration order: unk, sep, pad, cls, mask, additional.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        [
            self.unk_token.as_str(),
            self.sep_token.as_str(),
            self.pad_token.as_str(),
            self.cls_token.as_str(),
            self.mask_token.as_str(),
        ]
        .into_iter()
        .chain(self.additional.iter().map(String::as_str))
    }

    /// Build the never-split set protecting every special token.
    pub fn to_set(&self) -> SpecialTokenSet {
        self.all().collect()
    }
}

/// Ordered set of protected strings.
///
/// Insertion order is preserved and duplicates are ignored. Empty strings
/// are never members.
#[derive(Debug, Clone, Default)]
pub struct SpecialTokenSet {
    ordered: Vec<String>,
    members: AHashSet<String>,
}

impl SpecialTokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a token, returning false when it was already present or empty.
    pub fn insert<S: Into<String>>(&mut self, token: S) -> bool {
        let token = token.into();
        if token.is_empty() || self.members.contains(&token) {
            return false;
        }
        self.members.insert(token.clone());
        self.ordered.push(token);
        true
    }

    pub fn contains(&self, token: &str) -> bool {
        self.members.contains(token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Union of two sets; members of `self` keep their positions.
    pub fn union(&self, other: &SpecialTokenSet) -> SpecialTokenSet {
        let mut merged = self.clone();
        for token in other.iter() {
            merged.insert(token);
        }
        merged
    }
}

impl<S: Into<String>> FromIterator<S> for SpecialTokenSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SpecialTokenSet::new();
        for token in iter {
            set.insert(token);
        }
        set
    }
}

impl PartialEq for SpecialTokenSet {
    fn eq(&self, other: &Self) -> bool {
        self.ordered == other.ordered
    }
}

impl Eq for SpecialTokenSet {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_special_tokens() {
        let tokens = SpecialTokens::default();
        let all: Vec<&str> = tokens.all().collect();
        assert_eq!(all, vec!["[UNK]", "[SEP]", "[PAD]", "[CLS]", "[MASK]"]);
    }

    #[test]
    fn test_set_keeps_order_and_dedups() {
        let set: SpecialTokenSet = ["[CLS]", "[SEP]", "[CLS]", "", "<extra>"]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["[CLS]", "[SEP]", "<extra>"]);
        assert!(set.contains("<extra>"));
        assert!(!set.contains(""));
    }

    #[test]
    fn test_additional_tokens_are_protected() {
        let set = SpecialTokens::default().with_additional(["<ent>"]).to_set();
        assert!(set.contains("<ent>"));
        assert!(set.contains("[MASK]"));
    }

    #[test]
    fn test_union() {
        let a: SpecialTokenSet = ["x", "y"].into_iter().collect();
        let b: SpecialTokenSet = ["y", "z"].into_iter().collect();
        assert_eq!(a.union(&b).iter().collect::<Vec<_>>(), vec!["x", "y", "z"]);
    }
}
