//! Piles: one structural unit of a page (table, paragraph, or image).

use crate::error::PileError;
use crate::geometry::{BBox, vertical_envelope};
use crate::primitives::{ImageRef, RuleSegment, TextRun};

/// The structural kind of a pile, derived from its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PileKind {
    /// The pile owns vertical rules.
    Table,
    /// No vertical rules, at least one image.
    Image,
    /// Text only.
    Paragraph,
}

impl PileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PileKind::Table => "table",
            PileKind::Image => "image",
            PileKind::Paragraph => "paragraph",
        }
    }
}

/// A typed bag of primitives representing one structural unit of a page.
///
/// The kind is never stored: vertical rules make a table, otherwise images
/// make an image pile, otherwise text makes a paragraph.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pile {
    /// Vertical rule segments (table column boundaries).
    pub verticals: Vec<RuleSegment>,
    /// Horizontal rule segments (table row boundaries).
    pub horizontals: Vec<RuleSegment>,
    /// Text runs, in layout order.
    pub texts: Vec<TextRun>,
    /// Image references.
    pub images: Vec<ImageRef>,
}

impl Pile {
    /// A paragraph pile holding the given runs.
    pub fn paragraph(texts: Vec<TextRun>) -> Self {
        Self {
            texts,
            ..Self::default()
        }
    }

    /// An image pile holding a single image.
    pub fn image_pile(image: ImageRef) -> Self {
        Self {
            images: vec![image],
            ..Self::default()
        }
    }

    /// The derived kind, or `None` when the pile carries nothing classifiable.
    pub fn kind(&self) -> Option<PileKind> {
        if !self.verticals.is_empty() {
            Some(PileKind::Table)
        } else if !self.images.is_empty() {
            Some(PileKind::Image)
        } else if !self.texts.is_empty() {
            Some(PileKind::Paragraph)
        } else {
            None
        }
    }

    /// Whether the pile holds any text runs.
    pub fn has_text(&self) -> bool {
        !self.texts.is_empty()
    }

    /// Whether the pile holds no primitives at all.
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
            && self.images.is_empty()
            && self.verticals.is_empty()
            && self.horizontals.is_empty()
    }

    /// Bounding box of the representative primitive used for page ordering.
    ///
    /// Preference: first text run, then first image, then first vertical,
    /// then first horizontal.
    pub fn representative(&self) -> Result<&BBox, PileError> {
        self.texts
            .first()
            .map(|t| &t.bbox)
            .or_else(|| self.images.first().map(|i| &i.bbox))
            .or_else(|| self.verticals.first().map(|v| &v.bbox))
            .or_else(|| self.horizontals.first().map(|h| &h.bbox))
            .ok_or(PileError::EmptyPile)
    }

    /// The first image of the pile.
    pub fn image(&self) -> Result<&ImageRef, PileError> {
        self.images.first().ok_or(PileError::EmptyPile)
    }

    /// Vertical envelope `(top, bottom)` of the pile's vertical rules.
    pub fn table_envelope(&self) -> Option<(f64, f64)> {
        vertical_envelope(self.verticals.iter().map(|v| &v.bbox))
    }
}
