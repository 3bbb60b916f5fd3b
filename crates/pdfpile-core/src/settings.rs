//! Tuning parameters shared by every reconstruction stage.

use crate::unicode_norm::UnicodeNorm;

/// Configuration for pile partitioning and table grid reconstruction.
///
/// One value is threaded explicitly through snapping, region clustering,
/// border synthesis, and cell resolution so a single table can be
/// re-examined with different tolerances.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PileSettings {
    /// Distance below which two coordinates are considered the same line.
    /// Default: `1.0`.
    pub search_distance: f64,
    /// Maximum gap between sorted vertical coordinates that are averaged
    /// into a single grid column boundary. Default: `2.0`.
    pub coordinate_closeness: f64,
    /// A vertical rule is kept for grid reconstruction when its width or
    /// height reaches this extent. Default: `1.0`.
    pub min_rule_extent: f64,
    /// A rectangle thinner than this along one axis is a rule segment.
    /// Default: `1.0`.
    pub thin_threshold: f64,
    /// Decimal places kept when extracting grid coordinates. Default: `3`.
    pub coordinate_precision: u32,
    /// Normalization form applied to text runs as they enter the store.
    pub unicode_norm: UnicodeNorm,
}

impl Default for PileSettings {
    fn default() -> Self {
        Self {
            search_distance: 1.0,
            coordinate_closeness: 2.0,
            min_rule_extent: 1.0,
            thin_threshold: 1.0,
            coordinate_precision: 3,
            unicode_norm: UnicodeNorm::None,
        }
    }
}

impl PileSettings {
    /// Settings with a custom search distance and defaults elsewhere.
    pub fn with_search_distance(search_distance: f64) -> Self {
        Self {
            search_distance,
            ..Self::default()
        }
    }
}
