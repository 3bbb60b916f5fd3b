//! pdfpile-parse: Layout-engine boundary for pdfpile.
//!
//! This crate defines the typed layout tree a page-layout engine hands
//! over for one page, and the flattening pass that classifies its leaves
//! into the primitives consumed by pdfpile-core.

pub mod error;
pub mod layout;

pub use error::LayoutError;
pub use layout::{LayoutChar, LayoutNode, LayoutPage, LayoutTextLine, classify_leaf};
pub use pdfpile_core;
