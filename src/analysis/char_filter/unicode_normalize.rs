use std::borrow::Cow;

use unicode_normalization::{IsNormalized, UnicodeNormalization, is_nfc_quick, is_nfkc_quick};

use super::CharFilter;

/// Supported Unicode normalization forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationForm {
    NFC,
    NFD,
    NFKC,
    NFKD,
}

/// A char filter that performs Unicode normalization.
#[derive(Debug, Clone)]
pub struct UnicodeNormalizationCharFilter {
    form: NormalizationForm,
}

impl UnicodeNormalizationCharFilter {
    pub fn new(form: NormalizationForm) -> Self {
        Self { form }
    }

    /// NFKC, the form every word tokenizer applies when `normalize_text` is set.
    pub fn nfkc() -> Self {
        Self::new(NormalizationForm::NFKC)
    }

    pub fn form(&self) -> NormalizationForm {
        self.form
    }

    fn already_normalized(&self, input: &str) -> bool {
        let quick = match self.form {
            NormalizationForm::NFC => is_nfc_quick(input.chars()),
            NormalizationForm::NFKC => is_nfkc_quick(input.chars()),
            NormalizationForm::NFD | NormalizationForm::NFKD => IsNormalized::Maybe,
        };
        quick == IsNormalized::Yes
    }
}

impl CharFilter for UnicodeNormalizationCharFilter {
    fn filter<'a>(&self, input: &'a str) -> Cow<'a, str> {
        if self.already_normalized(input) {
            return Cow::Borrowed(input);
        }

        let normalized: String = match self.form {
            NormalizationForm::NFC => input.nfc().collect(),
            NormalizationForm::NFD => input.nfd().collect(),
            NormalizationForm::NFKC => input.nfkc().collect(),
            NormalizationForm::NFKD => input.nfkd().collect(),
        };
        Cow::Owned(normalized)
    }

    fn name(&self) -> &'static str {
        "unicode_normalization"
    }
}
