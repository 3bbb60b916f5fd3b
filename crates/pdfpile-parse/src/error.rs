//! Error types for the layout boundary.
//!
//! Uses [`thiserror`] for error derivation. Provides [`LayoutError`] for
//! failures while reading or flattening a layout tree, convertible to
//! [`PileError`].

use pdfpile_core::PileError;
use thiserror::Error;

/// Error type for layout-tree loading and classification.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// A layout leaf that is neither text, rule, image, nor a known
    /// ignorable kind.
    #[error("unrecognized layout element: {kind}")]
    Classification { kind: String },

    /// The layout tree could not be decoded from JSON.
    #[cfg(feature = "serde")]
    #[error("layout JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A core library error.
    #[error(transparent)]
    Core(#[from] PileError),
}

impl From<LayoutError> for PileError {
    fn from(err: LayoutError) -> Self {
        match err {
            LayoutError::Classification { kind } => PileError::Classification(kind),
            #[cfg(feature = "serde")]
            LayoutError::Json(e) => PileError::Classification(format!("layout JSON: {e}")),
            LayoutError::Core(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_display() {
        let err = LayoutError::Classification {
            kind: "LTAnno".to_string(),
        };
        assert_eq!(err.to_string(), "unrecognized layout element: LTAnno");
    }

    #[test]
    fn layout_error_from_pile_error() {
        let err: LayoutError = PileError::EmptyPile.into();
        assert!(matches!(err, LayoutError::Core(PileError::EmptyPile)));
        assert_eq!(err.to_string(), "the pile contains nothing");
    }

    #[test]
    fn classification_converts_to_pile_error() {
        let err = LayoutError::Classification {
            kind: "LTTextGroup".to_string(),
        };
        let pile_err: PileError = err.into();
        assert_eq!(
            pile_err,
            PileError::Classification("LTTextGroup".to_string())
        );
    }

    #[test]
    fn core_passthrough() {
        let pile_err: PileError = LayoutError::Core(PileError::UnsupportedKind).into();
        assert_eq!(pile_err, PileError::UnsupportedKind);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_error_from_serde() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: LayoutError = json_err.into();
        assert!(matches!(err, LayoutError::Json(_)));
        let pile_err: PileError = err.into();
        assert!(matches!(pile_err, PileError::Classification(_)));
    }

    #[test]
    fn layout_error_implements_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(LayoutError::Classification {
            kind: "x".to_string(),
        });
        assert!(err.to_string().contains("unrecognized"));
    }
}
