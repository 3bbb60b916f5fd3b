//! The per-page primitive store.
//!
//! Collects classified primitives as they are observed. Rule segments are
//! kept exactly as observed here; snapping them into canonical lines is a
//! separate pass run by [`crate::partition::split_piles`] before any
//! coordinate is read.

use crate::geometry::Orientation;
use crate::primitives::{ImageRef, Primitive, RuleSegment, TextRun};

/// Primitives of one page, split by category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrimitiveStore {
    pub(crate) texts: Vec<TextRun>,
    pub(crate) verticals: Vec<RuleSegment>,
    pub(crate) horizontals: Vec<RuleSegment>,
    pub(crate) images: Vec<ImageRef>,
    pub(crate) ignored: usize,
}

impl PrimitiveStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one classified primitive.
    pub fn push(&mut self, primitive: Primitive) {
        match primitive {
            Primitive::Text(run) => self.texts.push(run),
            Primitive::Rule(rule) => match rule.orientation {
                Orientation::Vertical => self.verticals.push(rule),
                Orientation::Horizontal => self.horizontals.push(rule),
            },
            Primitive::Image(image) => self.images.push(image),
            Primitive::Ignored => self.ignored += 1,
        }
    }

    /// Text runs in observation order.
    pub fn texts(&self) -> &[TextRun] {
        &self.texts
    }

    /// Observed vertical rule segments.
    pub fn verticals(&self) -> &[RuleSegment] {
        &self.verticals
    }

    /// Observed horizontal rule segments.
    pub fn horizontals(&self) -> &[RuleSegment] {
        &self.horizontals
    }

    /// Image references in observation order.
    pub fn images(&self) -> &[ImageRef] {
        &self.images
    }

    /// Number of leaves classified as [`Primitive::Ignored`].
    pub fn ignored(&self) -> usize {
        self.ignored
    }
}

impl FromIterator<Primitive> for PrimitiveStore {
    fn from_iter<I: IntoIterator<Item = Primitive>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

impl Extend<Primitive> for PrimitiveStore {
    fn extend<I: IntoIterator<Item = Primitive>>(&mut self, iter: I) {
        for primitive in iter {
            self.push(primitive);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BBox;

    #[test]
    fn push_routes_by_category() {
        let store: PrimitiveStore = vec![
            Primitive::Text(TextRun::new(BBox::new(0.0, 0.0, 10.0, 10.0), "a")),
            Primitive::Rule(RuleSegment::new(
                BBox::new(5.0, 0.0, 5.5, 100.0),
                Orientation::Vertical,
            )),
            Primitive::Rule(RuleSegment::new(
                BBox::new(0.0, 5.0, 100.0, 5.5),
                Orientation::Horizontal,
            )),
            Primitive::Image(ImageRef::new(BBox::new(0.0, 0.0, 50.0, 50.0), "Im0")),
            Primitive::Ignored,
            Primitive::Ignored,
        ]
        .into_iter()
        .collect();

        assert_eq!(store.texts().len(), 1);
        assert_eq!(store.verticals().len(), 1);
        assert_eq!(store.horizontals().len(), 1);
        assert_eq!(store.images().len(), 1);
        assert_eq!(store.ignored(), 2);
    }

    #[test]
    fn observed_rules_are_kept_unsnapped() {
        let mut store = PrimitiveStore::new();
        store.push(Primitive::Rule(RuleSegment::new(
            BBox::new(10.2, 0.0, 10.7, 100.0),
            Orientation::Vertical,
        )));
        store.push(Primitive::Rule(RuleSegment::new(
            BBox::new(10.8, 0.0, 11.3, 100.0),
            Orientation::Vertical,
        )));
        assert_eq!(store.verticals().len(), 2);
    }
}
