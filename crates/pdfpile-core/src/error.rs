//! Error and warning types for pdfpile.
//!
//! Provides [`PileError`] for failures surfaced to the caller, and
//! [`PileWarning`] for non-fatal conditions that allow best-effort
//! continuation (a pile dropped from ordering, a degenerate table grid).

use std::fmt;

use thiserror::Error;

/// Fatal error types for page reconstruction and rendering.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PileError {
    /// A layout leaf did not match any recognized primitive kind.
    #[error("unrecognized layout element: {0}")]
    Classification(String),
    /// A representative primitive or image was requested from an empty pile.
    #[error("the pile contains nothing")]
    EmptyPile,
    /// Rendering was requested for a pile whose kind cannot be determined.
    #[error("unsupported pile kind: pile has no text, vertical rules, or images")]
    UnsupportedKind,
}

/// Machine-readable warning code for categorizing reconstruction issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PileWarningCode {
    /// A pile had no representative primitive and was left out of the
    /// page ordering.
    EmptyPileDropped,
    /// A table region produced no resolvable grid and falls back to a
    /// single cell.
    DegenerateTable,
    /// Horizontal rules outside every table region were discarded.
    UnclaimedRule,
}

impl PileWarningCode {
    /// Returns the string tag for this warning code.
    pub fn as_str(&self) -> &'static str {
        match self {
            PileWarningCode::EmptyPileDropped => "EMPTY_PILE_DROPPED",
            PileWarningCode::DegenerateTable => "DEGENERATE_TABLE",
            PileWarningCode::UnclaimedRule => "UNCLAIMED_RULE",
        }
    }
}

impl fmt::Display for PileWarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal diagnostic recorded while reconstructing a page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PileWarning {
    /// Machine-readable warning code.
    pub code: PileWarningCode,
    /// Human-readable description of the warning.
    pub description: String,
}

impl PileWarning {
    /// Create a warning and emit it through `tracing`.
    pub fn new(code: PileWarningCode, description: impl Into<String>) -> Self {
        let description = description.into();
        tracing::warn!(code = code.as_str(), "{description}");
        Self { code, description }
    }
}

impl fmt::Display for PileWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.description)
    }
}
