//! Positioned primitives produced by the layout engine for one page.
//!
//! Every leaf of the layout tree is classified into exactly one
//! [`Primitive`]: a text run, a thin rule segment, an image reference, or
//! an ignored leaf (curves, stray characters, generic lines).

use crate::geometry::{BBox, Orientation};

/// A horizontal run of text with its font attributes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextRun {
    /// Bounding box in bottom-left origin coordinates.
    pub bbox: BBox,
    /// Raw text as reported by the layout engine (may end with `\n`).
    pub text: String,
    /// Font name of the first character, if the run has any characters.
    pub font: Option<String>,
    /// Whether the font name indicates a bold face.
    pub bold: bool,
    /// Whether the font name indicates an italic or oblique face.
    pub italic: bool,
    /// Run height rounded to whole units.
    pub size: f64,
    /// Number of characters in the run.
    pub chars: usize,
}

impl TextRun {
    /// Create a run without font information.
    pub fn new(bbox: BBox, text: impl Into<String>) -> Self {
        let text = text.into();
        let chars = text.chars().filter(|c| *c != '\n').count();
        Self {
            bbox,
            text,
            font: None,
            bold: false,
            italic: false,
            size: bbox.height().round(),
            chars,
        }
    }

    /// Attach a font name, deriving the bold and italic flags from it.
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        let font = font.into();
        self.bold = is_bold_font(&font);
        self.italic = is_italic_font(&font);
        self.font = Some(font);
        self
    }

    /// Override the character count.
    pub fn with_chars(mut self, chars: usize) -> Self {
        self.chars = chars;
        self
    }

    /// The run text without surrounding whitespace.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }
}

/// Check if a font name indicates bold.
pub fn is_bold_font(fontname: &str) -> bool {
    let lower = fontname.to_lowercase();
    lower.contains("bold") || lower.contains("heavy") || lower.contains("black")
}

/// Check if a font name indicates italic.
pub fn is_italic_font(fontname: &str) -> bool {
    let lower = fontname.to_lowercase();
    lower.contains("italic") || lower.contains("oblique")
}

/// A thin rectangle representing a drawn table rule.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleSegment {
    /// Bounding box in bottom-left origin coordinates.
    pub bbox: BBox,
    /// Which dimension is thin.
    pub orientation: Orientation,
}

impl RuleSegment {
    pub fn new(bbox: BBox, orientation: Orientation) -> Self {
        Self { bbox, orientation }
    }

    /// Classify a rectangle as a rule segment.
    ///
    /// Width below `thin_threshold` gives a vertical; otherwise height
    /// below it gives a horizontal. Rectangles thick in both dimensions
    /// are not rules.
    pub fn classify(bbox: BBox, thin_threshold: f64) -> Option<Self> {
        if bbox.width() < thin_threshold {
            Some(Self::new(bbox, Orientation::Vertical))
        } else if bbox.height() < thin_threshold {
            Some(Self::new(bbox, Orientation::Horizontal))
        } else {
            None
        }
    }

    /// A zero-width vertical inferred from the ends of horizontal rules.
    pub fn synthetic_vertical(x: f64, y0: f64, y1: f64) -> Self {
        Self::new(
            BBox::new(x, y0.min(y1), x, y0.max(y1)),
            Orientation::Vertical,
        )
    }

    /// Coordinate identifying the line: `x0` for verticals, `y0` for horizontals.
    pub fn anchor(&self) -> f64 {
        match self.orientation {
            Orientation::Vertical => self.bbox.x0,
            Orientation::Horizontal => self.bbox.y0,
        }
    }

    /// Extent along the segment's running axis as `(start, end)`.
    pub fn span(&self) -> (f64, f64) {
        match self.orientation {
            Orientation::Vertical => (self.bbox.y0, self.bbox.y1),
            Orientation::Horizontal => (self.bbox.x0, self.bbox.x1),
        }
    }

    /// Replace the extent along the running axis.
    pub fn set_span(&mut self, start: f64, end: f64) {
        match self.orientation {
            Orientation::Vertical => {
                self.bbox.y0 = start;
                self.bbox.y1 = end;
            }
            Orientation::Horizontal => {
                self.bbox.x0 = start;
                self.bbox.x1 = end;
            }
        }
    }

    /// Whether the segment covers `[lo, hi]` along its running axis,
    /// allowing each end to fall short by `tolerance`.
    pub fn covers(&self, lo: f64, hi: f64, tolerance: f64) -> bool {
        let (start, end) = self.span();
        start <= lo + tolerance && hi - tolerance <= end
    }
}

/// A placed image.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageRef {
    /// Bounding box in bottom-left origin coordinates.
    pub bbox: BBox,
    /// Identifying name (used to build the image path on output).
    pub name: String,
}

impl ImageRef {
    pub fn new(bbox: BBox, name: impl Into<String>) -> Self {
        Self {
            bbox,
            name: name.into(),
        }
    }
}

/// A classified layout leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Text(TextRun),
    Rule(RuleSegment),
    Image(ImageRef),
    /// Curves, bare characters, generic lines, and thick rectangles.
    Ignored,
}
