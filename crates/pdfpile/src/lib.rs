//! pdfpile: Reconstruct paragraphs, tables, and images from page layouts.
//!
//! This is the public API facade crate for pdfpile. It re-exports types from
//! pdfpile-core and uses pdfpile-parse to turn a layout tree into primitives.
//!
//! # Architecture
//!
//! - **pdfpile-core**: Primitives, partitioning, grid reconstruction, rendering
//! - **pdfpile-parse**: Layout tree and leaf classification
//! - **pdfpile** (this crate): Per-page pipeline that ties everything together
//!
//! # Example
//!
//! ```ignore
//! let page = LayoutPage::from_json(&json)?;
//! let structure = reconstruct_page(&page, &PileSettings::default())?;
//! let markdown = render_page(&page, &PileSettings::default(), &RenderOptions::default())?;
//! ```

pub use pdfpile_core;
pub use pdfpile_parse;

pub use pdfpile_core::{
    BBox, GridCell, ImageRef, Orientation, PageStructure, Pile, PileError, PileKind,
    PileSettings, PileWarning, PileWarningCode, RenderOptions, RuleSegment, TableGrid, TextRun,
    UnicodeNorm, reconstruct_grid, render_debug_svg, render_markdown,
};
pub use pdfpile_parse::{LayoutChar, LayoutError, LayoutNode, LayoutPage, LayoutTextLine};

/// Reconstruct the ordered piles of one page.
///
/// Fails only when the layout tree holds a leaf of unknown kind.
pub fn reconstruct_page(
    page: &LayoutPage,
    settings: &PileSettings,
) -> Result<PageStructure, LayoutError> {
    let store = page.flatten(settings)?;
    Ok(pdfpile_core::split_piles(store, settings))
}

/// Reconstruct one page and render it as markdown.
pub fn render_page(
    page: &LayoutPage,
    settings: &PileSettings,
    options: &RenderOptions,
) -> Result<String, LayoutError> {
    let structure = reconstruct_page(page, settings)?;
    Ok(pdfpile_core::render_page_markdown(&structure, options, settings)?)
}

/// Reconstruct every page, returning results in page order.
///
/// Pages share no state. With the `parallel` feature they run on the rayon
/// thread pool.
pub fn reconstruct_pages(
    pages: &[LayoutPage],
    settings: &PileSettings,
) -> Vec<Result<PageStructure, LayoutError>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        pages
            .par_iter()
            .enumerate()
            .map(|(index, page)| reconstruct_indexed(index, page, settings))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        pages
            .iter()
            .enumerate()
            .map(|(index, page)| reconstruct_indexed(index, page, settings))
            .collect()
    }
}

fn reconstruct_indexed(
    index: usize,
    page: &LayoutPage,
    settings: &PileSettings,
) -> Result<PageStructure, LayoutError> {
    let span = tracing::info_span!("page", index);
    let _guard = span.enter();
    reconstruct_page(page, settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_line(text: &str, y0: f64) -> LayoutNode {
        LayoutNode::TextLineHorizontal(LayoutTextLine {
            bbox: BBox::new(0.0, y0, 100.0, y0 + 12.0),
            text: Some(text.to_string()),
            chars: Vec::new(),
        })
    }

    #[test]
    fn reconstruct_text_page() {
        let page = LayoutPage::new(vec![text_line("one", 700.0), text_line("two", 680.0)]);
        let structure = reconstruct_page(&page, &PileSettings::default()).unwrap();
        assert_eq!(structure.piles.len(), 1);
        assert_eq!(structure.piles[0].kind(), Some(PileKind::Paragraph));
    }

    #[test]
    fn render_text_page() {
        let page = LayoutPage::new(vec![text_line("one", 700.0), text_line("two", 680.0)]);
        let markdown =
            render_page(&page, &PileSettings::default(), &RenderOptions::default()).unwrap();
        assert_eq!(markdown, "one\ntwo\n");
    }

    #[test]
    fn classification_error_propagates() {
        let page = LayoutPage::new(vec![LayoutNode::Unknown {
            kind: "LTAnno".to_string(),
        }]);
        assert!(matches!(
            reconstruct_page(&page, &PileSettings::default()),
            Err(LayoutError::Classification { .. })
        ));
    }

    #[test]
    fn pages_keep_their_order() {
        let pages = vec![
            LayoutPage::new(vec![text_line("first", 10.0)]),
            LayoutPage::new(vec![LayoutNode::Unknown {
                kind: "Bad".to_string(),
            }]),
            LayoutPage::new(vec![text_line("third", 10.0)]),
        ];
        let results = reconstruct_pages(&pages, &PileSettings::default());
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().piles[0].texts[0].text, "first");
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().piles[0].texts[0].text, "third");
    }
}
