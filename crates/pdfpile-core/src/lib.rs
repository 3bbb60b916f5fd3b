//! pdfpile-core: Backend-independent page structure reconstruction.
//!
//! This crate provides the primitive types (BBox, TextRun, RuleSegment,
//! ImageRef) and the algorithms that turn one page's positioned primitives
//! into ordered piles: rule snapping, table region clustering, paragraph
//! banding, table grid reconstruction and rendering.

pub mod cluster;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod markdown;
pub mod partition;
pub mod pile;
pub mod primitives;
pub mod settings;
pub mod snap;
pub mod store;
pub mod svg;
pub mod unicode_norm;

pub use cluster::{TableRegion, claim_band, cluster_verticals};
pub use error::{PileError, PileWarning, PileWarningCode};
pub use geometry::{BBox, Orientation};
pub use grid::{GridCell, TableGrid, has_resolvable_cell, reconstruct_grid};
pub use markdown::{
    LineFacts, LineRule, RenderOptions, RewriteRule, SizeTest, render_markdown,
    render_page_markdown,
};
pub use partition::{PageStructure, order_piles, split_piles};
pub use pile::{Pile, PileKind};
pub use primitives::{ImageRef, Primitive, RuleSegment, TextRun};
pub use settings::PileSettings;
pub use snap::{snap_all, snap_rules};
pub use store::PrimitiveStore;
pub use svg::render_debug_svg;
pub use unicode_norm::UnicodeNorm;
