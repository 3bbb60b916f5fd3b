//! Unicode normalization for text runs.
//!
//! Provides [`UnicodeNorm`] for selecting a normalization form and
//! [`normalize_runs`] for applying it to run text.

use unicode_normalization::UnicodeNormalization;

use crate::primitives::TextRun;

/// Unicode normalization form to apply to text runs.
///
/// Layout engines may emit composed or decomposed forms for the same
/// visual text (e.g. Cyrillic "й" as one code point or as "и" plus a
/// combining breve). Normalizing keeps heading/list matching stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnicodeNorm {
    /// No normalization (default).
    #[default]
    None,
    /// Canonical Decomposition, followed by Canonical Composition (NFC).
    Nfc,
    /// Canonical Decomposition (NFD).
    Nfd,
    /// Compatibility Decomposition, followed by Canonical Composition (NFKC).
    Nfkc,
    /// Compatibility Decomposition (NFKD).
    Nfkd,
}

impl UnicodeNorm {
    /// Apply this normalization form to the given string.
    ///
    /// Returns the input unchanged if normalization is `None`.
    pub fn normalize(&self, text: &str) -> String {
        match self {
            UnicodeNorm::None => text.to_string(),
            UnicodeNorm::Nfc => text.nfc().collect(),
            UnicodeNorm::Nfd => text.nfd().collect(),
            UnicodeNorm::Nfkc => text.nfkc().collect(),
            UnicodeNorm::Nfkd => text.nfkd().collect(),
        }
    }
}

/// Normalize the text of each run in place.
///
/// Geometry and font attributes are untouched; `chars` is recounted so it
/// stays consistent with the normalized text.
pub fn normalize_runs(runs: &mut [TextRun], norm: UnicodeNorm) {
    if norm == UnicodeNorm::None {
        return;
    }
    for run in runs {
        run.text = norm.normalize(&run.text);
        run.chars = run.text.chars().filter(|c| *c != '\n').count();
    }
}
