//! Markdown rendering for piles.
//!
//! Paragraphs are emitted one run per line, each prefixed by the first
//! matching [`LineRule`], then passed through the ordered [`RewriteRule`]
//! cleanup list. Tables are emitted as nested `<table>`/`<tr>`/`<td>`
//! markup built from the reconstructed grid. Images become a path
//! reference built from the image name.
//!
//! The default rulesets encode the heading and list conventions of
//! Russian technical documents; both are plain data and can be replaced
//! through [`RenderOptions`].

use regex::Regex;

use crate::error::PileError;
use crate::grid::{TableGrid, reconstruct_grid};
use crate::partition::PageStructure;
use crate::pile::{Pile, PileKind};
use crate::primitives::ImageRef;
use crate::settings::PileSettings;

/// Font size condition of a [`LineRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeTest {
    /// Any size.
    #[default]
    Any,
    /// The largest run size in the pile.
    Largest,
    /// Strictly larger than the smallest run size in the pile.
    AboveSmallest,
}

/// The facts about one paragraph line that a [`LineRule`] is tested on.
#[derive(Debug, Clone, Copy)]
pub struct LineFacts<'a> {
    pub text: &'a str,
    pub bold: bool,
    pub size: f64,
    pub max_size: f64,
    pub min_size: f64,
}

/// Prefix a paragraph line when every set condition holds.
#[derive(Debug, Clone)]
pub struct LineRule {
    /// Markup inserted before the line, e.g. `"## "`.
    pub prefix: String,
    /// Pattern the line text must match, if any.
    pub pattern: Option<Regex>,
    /// Require the text to be upper case.
    pub upper_case: bool,
    /// Require a bold run.
    pub bold: bool,
    /// Required font size.
    pub size: SizeTest,
}

impl LineRule {
    /// A rule with no conditions.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            pattern: None,
            upper_case: false,
            bold: false,
            size: SizeTest::Any,
        }
    }

    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.pattern = Some(Regex::new(pattern)?);
        Ok(self)
    }

    pub fn upper_case(mut self) -> Self {
        self.upper_case = true;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn size(mut self, size: SizeTest) -> Self {
        self.size = size;
        self
    }

    pub fn matches(&self, line: &LineFacts<'_>) -> bool {
        if self.upper_case && !is_upper_case(line.text) {
            return false;
        }
        if self.bold && !line.bold {
            return false;
        }
        let size_ok = match self.size {
            SizeTest::Any => true,
            SizeTest::Largest => line.size == line.max_size,
            SizeTest::AboveSmallest => line.size > line.min_size,
        };
        size_ok && self.pattern.as_ref().is_none_or(|re| re.is_match(line.text))
    }
}

/// A regex substitution applied to rendered paragraph markdown.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    pub pattern: Regex,
    /// Replacement string; `${n}` refers to capture groups.
    pub replacement: String,
    /// Re-apply until the text stops changing.
    pub repeat: bool,
}

impl RewriteRule {
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.into(),
            repeat: false,
        })
    }

    pub fn repeated(mut self) -> Self {
        self.repeat = true;
        self
    }

    pub fn apply(&self, text: &str) -> String {
        let mut current = self
            .pattern
            .replace_all(text, self.replacement.as_str())
            .into_owned();
        while self.repeat {
            let next = self
                .pattern
                .replace_all(&current, self.replacement.as_str())
                .into_owned();
            if next == current {
                break;
            }
            current = next;
        }
        current
    }
}

/// Options for markdown and debug rendering.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Paragraph line prefixes, first match wins.
    pub line_rules: Vec<LineRule>,
    /// Cleanup substitutions, applied in order.
    pub rewrite_rules: Vec<RewriteRule>,
    /// Path prepended to image names. Default: `"images/"`.
    pub image_prefix: String,
    /// Page height used to flip the debug overlay. Default: `800.0`.
    pub page_height: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            line_rules: default_line_rules().unwrap_or_else(|err| {
                tracing::warn!(%err, "default line rules failed to compile");
                Vec::new()
            }),
            rewrite_rules: default_rewrite_rules().unwrap_or_else(|err| {
                tracing::warn!(%err, "default rewrite rules failed to compile");
                Vec::new()
            }),
            image_prefix: "images/".to_string(),
            page_height: 800.0,
        }
    }
}

/// Heading and list prefixes for numbered and upper-case lines.
///
/// Bold-gated rules test each run's own font, so in a paragraph mixing bold
/// and regular runs only the bold lines take those prefixes.
pub fn default_line_rules() -> Result<Vec<LineRule>, regex::Error> {
    Ok(vec![
        LineRule::new("## ").upper_case().pattern(r"^\s?\d+\.")?,
        LineRule::new("# ").upper_case().size(SizeTest::Largest),
        LineRule::new("# ").upper_case().bold(),
        LineRule::new("### ").bold().pattern(r"^Раздел ")?,
        LineRule::new("### ")
            .bold()
            .size(SizeTest::AboveSmallest)
            .pattern(r"^\s?\d+\.\s")?,
        LineRule::new("#### ").pattern(r"^\s?(\d+\.){2}(\s|$)")?,
        LineRule::new("- ")
            .bold()
            .size(SizeTest::AboveSmallest)
            .pattern(r"^\D+–")?,
        LineRule::new("- ").pattern(r"^\d+\.\d+\.\d+.")?,
    ])
}

/// Cleanup of page furniture and soft line breaks.
pub fn default_rewrite_rules() -> Result<Vec<RewriteRule>, regex::Error> {
    Ok(vec![
        // trailing page numbers
        RewriteRule::new(r"[^\d+]\d{1,2}[ \t]*\n", "\n")?,
        RewriteRule::new(r" +", " ")?,
        RewriteRule::new(r"\n{2,10}", "\n")?,
        // symbol-font bullet
        RewriteRule::new("\u{F0B7}", ">")?,
        RewriteRule::new(r" \n([а-я0-9(«)])", " ${1}")?,
        RewriteRule::new(r"– \n([А-Я(\-])", "– ${1}")?,
        RewriteRule::new(r"([>\-]) \n", "${1} ")?,
        RewriteRule::new(r"(?m)^(# [^\n]*)\n# ", "${1} ")?.repeated(),
        RewriteRule::new(r"(#\s(\d+\.){0,3}\s)\n", "${1}")?,
        RewriteRule::new(r"\sстр\. \d+ из", "")?,
    ])
}

/// Render one pile as markdown.
///
/// Fails with [`PileError::UnsupportedKind`] when the pile has no kind.
pub fn render_markdown(
    pile: &Pile,
    options: &RenderOptions,
    settings: &PileSettings,
) -> Result<String, PileError> {
    match pile.kind() {
        Some(PileKind::Paragraph) => Ok(paragraph_markup(pile, options)),
        Some(PileKind::Table) => Ok(table_markup(pile, settings)),
        Some(PileKind::Image) => Ok(image_markup(pile.image()?, options)),
        None => Err(PileError::UnsupportedKind),
    }
}

/// Render every pile of a page in order and concatenate the results.
pub fn render_page_markdown(
    page: &PageStructure,
    options: &RenderOptions,
    settings: &PileSettings,
) -> Result<String, PileError> {
    let mut out = String::new();
    for pile in &page.piles {
        out.push_str(&render_markdown(pile, options, settings)?);
    }
    Ok(out)
}

/// Paragraph text with heading/list prefixes and cleanup applied.
pub fn paragraph_markup(pile: &Pile, options: &RenderOptions) -> String {
    let max_size = pile
        .texts
        .iter()
        .map(|t| t.size)
        .fold(f64::NEG_INFINITY, f64::max);
    let min_size = pile.texts.iter().map(|t| t.size).fold(f64::INFINITY, f64::min);

    let mut out = String::new();
    for run in &pile.texts {
        let text = run.text.trim_end_matches('\n');
        let facts = LineFacts {
            text,
            bold: run.bold,
            size: run.size,
            max_size,
            min_size,
        };
        if let Some(rule) = options.line_rules.iter().find(|r| r.matches(&facts)) {
            out.push_str(&rule.prefix);
        }
        out.push_str(text);
        out.push('\n');
    }

    options
        .rewrite_rules
        .iter()
        .fold(out, |text, rule| rule.apply(&text))
}

/// Table markup for a table pile.
///
/// A grid with no resolvable cell becomes a single cell holding every
/// run of the pile.
pub fn table_markup(pile: &Pile, settings: &PileSettings) -> String {
    let grid = reconstruct_grid(pile, settings);
    tracing::debug!(rows = grid.num_rows(), cols = grid.num_cols(), "table grid");
    if grid.is_degenerate() {
        let text = pile
            .texts
            .iter()
            .map(|t| t.trimmed())
            .collect::<Vec<_>>()
            .join(" ");
        let mut out = String::from("\n<table align=\"center\">\n");
        out.push_str("\t<tr align=\"center\">\n");
        out.push_str(&format!("\t\t<td>{}</td>\n", escape_html(&text)));
        out.push_str("\t</tr>\n</table>\n\n");
        return out;
    }
    grid_markup(&grid)
}

/// Nested `<table>` markup for a reconstructed grid, one tag per line.
pub fn grid_markup(grid: &TableGrid<'_>) -> String {
    let mut out = String::from("\n<table align=\"center\">\n");
    for row in &grid.cells {
        out.push_str("\t<tr align=\"center\">\n");
        for cell in row {
            out.push_str("\t\t<td");
            if let Some(colspan) = cell.colspan {
                out.push_str(&format!(" colspan={colspan}"));
            }
            if let Some(rowspan) = cell.rowspan {
                out.push_str(&format!(" rowspan={rowspan}"));
            }
            out.push('>');
            out.push_str(&escape_html(&cell.text()));
            out.push_str("</td>\n");
        }
        out.push_str("\t</tr>\n");
    }
    out.push_str("</table>\n\n");
    out
}

/// Markdown image reference.
pub fn image_markup(image: &ImageRef, options: &RenderOptions) -> String {
    format!("![{0}]({1}{0})\n\n", image.name, options.image_prefix)
}

/// Python-style `isupper`: at least one cased character, none lower case.
pub(crate) fn is_upper_case(text: &str) -> bool {
    let mut cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// Escape special HTML characters.
pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{BBox, Orientation};
    use crate::grid::GridCell;
    use crate::primitives::{RuleSegment, TextRun};

    fn run(text: &str, y0: f64, height: f64) -> TextRun {
        TextRun::new(BBox::new(0.0, y0, 200.0, y0 + height), text)
    }

    fn render(pile: &Pile) -> String {
        render_markdown(pile, &RenderOptions::default(), &PileSettings::default()).unwrap()
    }

    fn grid_pile() -> Pile {
        let horizontal = |y: f64| {
            RuleSegment::new(BBox::new(0.0, y, 100.0, y), Orientation::Horizontal)
        };
        Pile {
            verticals: vec![
                RuleSegment::synthetic_vertical(0.0, 0.0, 100.0),
                RuleSegment::synthetic_vertical(50.0, 0.0, 100.0),
                RuleSegment::synthetic_vertical(100.0, 0.0, 100.0),
            ],
            horizontals: vec![horizontal(100.0), horizontal(50.0), horizontal(0.0)],
            texts: vec![
                TextRun::new(BBox::new(5.0, 60.0, 25.0, 70.0), "a"),
                TextRun::new(BBox::new(55.0, 60.0, 75.0, 70.0), "b"),
                TextRun::new(BBox::new(5.0, 10.0, 25.0, 20.0), "c"),
            ],
            images: Vec::new(),
        }
    }

    #[test]
    fn image_reference() {
        let pile = Pile::image_pile(ImageRef::new(BBox::new(0.0, 0.0, 1.0, 1.0), "Im7"));
        assert_eq!(render(&pile), "![Im7](images/Im7)\n\n");
    }

    #[test]
    fn image_prefix_is_configurable() {
        let options = RenderOptions {
            image_prefix: "assets/".to_string(),
            ..RenderOptions::default()
        };
        let image = ImageRef::new(BBox::new(0.0, 0.0, 1.0, 1.0), "X0");
        assert_eq!(image_markup(&image, &options), "![X0](assets/X0)\n\n");
    }

    #[test]
    fn two_by_two_table() {
        let expected = "\n<table align=\"center\">\n\
            \t<tr align=\"center\">\n\t\t<td>a</td>\n\t\t<td>b</td>\n\t</tr>\n\
            \t<tr align=\"center\">\n\t\t<td>c</td>\n\t\t<td></td>\n\t</tr>\n\
            </table>\n\n";
        assert_eq!(render(&grid_pile()), expected);
    }

    #[test]
    fn spans_and_escaping() {
        let runs = [TextRun::new(BBox::new(1.0, 1.0, 2.0, 2.0), "<b> & ")];
        let grid = TableGrid {
            columns: vec![0.0, 10.0, 20.0],
            rows: vec![30.0, 20.0, 10.0, 0.0],
            cells: vec![
                vec![GridCell {
                    row: 0,
                    col: 0,
                    bbox: BBox::new(0.0, 0.0, 20.0, 30.0),
                    texts: vec![&runs[0]],
                    colspan: Some(2),
                    rowspan: Some(3),
                }],
                Vec::new(),
                Vec::new(),
            ],
        };
        let out = grid_markup(&grid);
        assert!(out.contains("\t\t<td colspan=2 rowspan=3>&lt;b&gt; &amp;</td>\n"));
        assert_eq!(out.matches("<tr").count(), 3);
    }

    #[test]
    fn degenerate_table_is_one_cell() {
        let pile = Pile {
            verticals: vec![RuleSegment::synthetic_vertical(10.0, 0.0, 100.0)],
            texts: vec![run("left ", 50.0, 10.0), run("right", 40.0, 10.0)],
            ..Pile::default()
        };
        let out = render(&pile);
        assert!(out.contains("\t\t<td>left right</td>\n"));
        assert_eq!(out.matches("<td").count(), 1);
    }

    #[test]
    fn unclassifiable_pile_is_rejected() {
        let result = render_markdown(
            &Pile::default(),
            &RenderOptions::default(),
            &PileSettings::default(),
        );
        assert_eq!(result, Err(PileError::UnsupportedKind));
    }

    #[test]
    fn headings_follow_case_and_size() {
        let pile = Pile::paragraph(vec![
            run("1. ВВЕДЕНИЕ", 700.0, 12.0),
            run("ОБЩИЕ ПОЛОЖЕНИЯ", 680.0, 14.0),
            run("Обычный текст", 660.0, 10.0),
        ]);
        assert_eq!(
            render(&pile),
            "## 1. ВВЕДЕНИЕ\n# ОБЩИЕ ПОЛОЖЕНИЯ\nОбычный текст\n"
        );
    }

    #[test]
    fn bold_section_title() {
        let pile = Pile::paragraph(vec![
            run("Раздел 2 Общие", 700.0, 12.0).with_font("Arial-BoldMT"),
            run("текст", 680.0, 12.0),
        ]);
        assert_eq!(render(&pile), "### Раздел 2 Общие\nтекст\n");
    }

    #[test]
    fn bold_rules_look_at_each_line_font() {
        let pile = Pile::paragraph(vec![
            run("Раздел 2 Общие", 700.0, 12.0).with_font("Arial-BoldMT"),
            run("Раздел 3 Прочее", 680.0, 12.0).with_font("ArialMT"),
        ]);
        assert_eq!(render(&pile), "### Раздел 2 Общие\nРаздел 3 Прочее\n");
    }

    #[test]
    fn numbered_subsections() {
        let pile = Pile::paragraph(vec![
            run("2.1. Назначение", 700.0, 12.0),
            run("2.1.3. Пункт", 680.0, 12.0),
        ]);
        assert_eq!(render(&pile), "#### 2.1. Назначение\n- 2.1.3. Пункт\n");
    }

    #[test]
    fn soft_line_breaks_are_joined() {
        let pile = Pile::paragraph(vec![
            run("первая строка ", 700.0, 12.0),
            run("вторая строка", 680.0, 12.0),
        ]);
        assert_eq!(render(&pile), "первая строка вторая строка\n");
    }

    #[test]
    fn page_furniture_is_removed() {
        let pile = Pile::paragraph(vec![run("Документ стр. 3 из 10", 700.0, 12.0)]);
        assert_eq!(render(&pile), "Документ\n");
    }

    #[test]
    fn custom_rules_replace_defaults() {
        let options = RenderOptions {
            line_rules: vec![LineRule::new("> ").pattern("^Note").unwrap()],
            rewrite_rules: Vec::new(),
            ..RenderOptions::default()
        };
        let pile = Pile::paragraph(vec![run("Note this", 10.0, 10.0), run("plain", 0.0, 10.0)]);
        assert_eq!(paragraph_markup(&pile, &options), "> Note this\nplain\n");
    }

    #[test]
    fn repeated_rewrite_reaches_fixed_point() {
        let rule = RewriteRule::new(r"(?m)^(# [^\n]*)\n# ", "${1} ")
            .unwrap()
            .repeated();
        assert_eq!(rule.apply("# A\n# B\n# C\n"), "# A B C\n");
    }

    #[test]
    fn upper_case_needs_a_cased_letter() {
        assert!(is_upper_case("1. ABC"));
        assert!(is_upper_case("ВВЕДЕНИЕ"));
        assert!(!is_upper_case("123"));
        assert!(!is_upper_case("Abc"));
    }

    #[test]
    fn page_markdown_concatenates_in_order() {
        let page = PageStructure {
            piles: vec![
                Pile::paragraph(vec![run("текст", 700.0, 12.0)]),
                Pile::image_pile(ImageRef::new(BBox::new(0.0, 0.0, 1.0, 1.0), "Im1")),
            ],
            warnings: Vec::new(),
        };
        let out =
            render_page_markdown(&page, &RenderOptions::default(), &PileSettings::default())
                .unwrap();
        assert_eq!(out, "текст\n![Im1](images/Im1)\n\n");
    }
}
