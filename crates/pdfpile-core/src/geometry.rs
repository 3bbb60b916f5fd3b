/// Bounding box with bottom-left origin coordinate system.
///
/// Coordinates follow the layout engine convention:
/// - `x0`: left edge
/// - `y0`: bottom edge (distance from the bottom of the page)
/// - `x1`: right edge
/// - `y1`: top edge (distance from the bottom of the page)
///
/// A box higher up on the page therefore has *larger* `y` values.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BBox {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the bounding box.
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Height of the bounding box.
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Compute the union of two bounding boxes.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Whether the `[y0, y1]` span overlaps `[bottom, top]` once both ends
    /// of the latter are widened by `tolerance`.
    pub fn overlaps_band(&self, top: f64, bottom: f64, tolerance: f64) -> bool {
        self.y0 <= top + tolerance && self.y1 >= bottom - tolerance
    }

    /// Whether this box lies inside `[left, right] x [bottom, top]` widened by
    /// `tolerance`, with a non-degenerate extent on both axes.
    pub fn within(&self, left: f64, top: f64, right: f64, bottom: f64, tolerance: f64) -> bool {
        left - tolerance <= self.x0
            && self.x0 < self.x1
            && self.x1 <= right + tolerance
            && bottom - tolerance <= self.y0
            && self.y0 < self.y1
            && self.y1 <= top + tolerance
    }
}

/// Orientation of a rule segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Width is sub-unit thin; the segment runs up the page.
    Vertical,
    /// Height is sub-unit thin; the segment runs across the page.
    Horizontal,
}

/// Vertical envelope `(top, bottom)` of a set of boxes.
///
/// Returns `None` for an empty input.
pub fn vertical_envelope<'a, I>(boxes: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = &'a BBox>,
{
    boxes.into_iter().fold(None, |acc, b| match acc {
        None => Some((b.y1, b.y0)),
        Some((top, bottom)) => Some((top.max(b.y1), bottom.min(b.y0))),
    })
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
