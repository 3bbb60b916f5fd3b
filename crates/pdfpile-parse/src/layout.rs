//! Layout tree produced by a page-layout engine, and its flattening.
//!
//! The tree mirrors the usual layout-engine hierarchy: figures and text
//! boxes contain text lines, text lines contain characters. Flattening
//! walks it depth-first in document order and classifies every leaf into a
//! [`Primitive`], filling a [`PrimitiveStore`].

use pdfpile_core::{
    BBox, ImageRef, PileSettings, Primitive, PrimitiveStore, RuleSegment, TextRun,
};

use crate::error::LayoutError;

/// One character of a text line.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutChar {
    pub text: String,
    pub fontname: String,
    pub size: f64,
    pub bbox: BBox,
}

/// A horizontal text line.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutTextLine {
    pub bbox: BBox,
    /// Line text as reported by the engine, including inserted spaces and
    /// the trailing newline. When absent, the character texts are joined.
    #[cfg_attr(feature = "serde", serde(default))]
    pub text: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub chars: Vec<LayoutChar>,
}

impl LayoutTextLine {
    pub fn text(&self) -> String {
        match &self.text {
            Some(text) => text.clone(),
            None => self.chars.iter().map(|c| c.text.as_str()).collect(),
        }
    }
}

/// A node of the layout tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum LayoutNode {
    Figure { children: Vec<LayoutNode> },
    TextBox { children: Vec<LayoutNode> },
    TextBoxHorizontal { children: Vec<LayoutNode> },
    TextLine { children: Vec<LayoutNode> },
    TextLineHorizontal(LayoutTextLine),
    Rect { bbox: BBox },
    Image { bbox: BBox, name: String },
    Curve { bbox: BBox },
    Char(LayoutChar),
    Line { bbox: BBox },
    /// Any element kind this crate does not know.
    Unknown { kind: String },
}

impl LayoutNode {
    /// Child nodes of a container, `None` for leaves.
    pub fn children(&self) -> Option<&[LayoutNode]> {
        match self {
            LayoutNode::Figure { children }
            | LayoutNode::TextBox { children }
            | LayoutNode::TextBoxHorizontal { children }
            | LayoutNode::TextLine { children } => Some(children),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &str {
        match self {
            LayoutNode::Figure { .. } => "Figure",
            LayoutNode::TextBox { .. } => "TextBox",
            LayoutNode::TextBoxHorizontal { .. } => "TextBoxHorizontal",
            LayoutNode::TextLine { .. } => "TextLine",
            LayoutNode::TextLineHorizontal(_) => "TextLineHorizontal",
            LayoutNode::Rect { .. } => "Rect",
            LayoutNode::Image { .. } => "Image",
            LayoutNode::Curve { .. } => "Curve",
            LayoutNode::Char(_) => "Char",
            LayoutNode::Line { .. } => "Line",
            LayoutNode::Unknown { kind } => kind.as_str(),
        }
    }
}

/// The layout tree of one page.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutPage {
    pub items: Vec<LayoutNode>,
}

impl LayoutPage {
    pub fn new(items: Vec<LayoutNode>) -> Self {
        Self { items }
    }

    /// Decode a page layout tree from JSON.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Flatten the tree into a primitive store.
    ///
    /// Fails on the first leaf of an unknown kind.
    pub fn flatten(&self, settings: &PileSettings) -> Result<PrimitiveStore, LayoutError> {
        let mut store = PrimitiveStore::new();
        let mut stack: Vec<&LayoutNode> = self.items.iter().rev().collect();
        while let Some(node) = stack.pop() {
            match node.children() {
                Some(children) => stack.extend(children.iter().rev()),
                None => store.push(classify_leaf(node, settings)?),
            }
        }
        tracing::debug!(
            texts = store.texts().len(),
            verticals = store.verticals().len(),
            horizontals = store.horizontals().len(),
            images = store.images().len(),
            ignored = store.ignored(),
            "flattened layout tree"
        );
        Ok(store)
    }
}

/// Classify one leaf node.
pub fn classify_leaf(node: &LayoutNode, settings: &PileSettings) -> Result<Primitive, LayoutError> {
    match node {
        LayoutNode::TextLineHorizontal(line) => Ok(Primitive::Text(text_run(line))),
        LayoutNode::Rect { bbox } => Ok(RuleSegment::classify(*bbox, settings.thin_threshold)
            .map_or(Primitive::Ignored, Primitive::Rule)),
        LayoutNode::Image { bbox, name } => Ok(Primitive::Image(ImageRef::new(*bbox, name.clone()))),
        LayoutNode::Curve { .. } | LayoutNode::Char(_) | LayoutNode::Line { .. } => {
            Ok(Primitive::Ignored)
        }
        other => Err(LayoutError::Classification {
            kind: other.kind_name().to_string(),
        }),
    }
}

fn text_run(line: &LayoutTextLine) -> TextRun {
    let run = TextRun::new(line.bbox, line.text());
    let run = match line.chars.first() {
        Some(first) => run.with_font(first.fontname.clone()),
        None => run,
    };
    if line.chars.is_empty() {
        run
    } else {
        run.with_chars(line.chars.len())
    }
}
