//! Table grid reconstruction for a table pile.
//!
//! Turns the rule skeleton of one table region into a row-major list of
//! cells with column and row spans:
//!
//! 1. Drop degenerate verticals (below `min_rule_extent` in both dimensions).
//! 2. Extract distinct rounded `x0` of verticals (ascending) and `y0` of
//!    horizontals (descending, top row first).
//! 3. Average vertical coordinates closer than `coordinate_closeness`.
//! 4. Synthesize outer borders implied by horizontals that run past every
//!    known vertical (T-junctions), then recompute coordinates.
//! 5. Walk the `(rows - 1) x (cols - 1)` candidate grid. A slot is a real
//!    cell only when a vertical exists on its left and a horizontal on its
//!    top; spans extend to the next coordinate where a bordering line
//!    actually exists.
//! 6. Assign every text run lying inside a resolved cell to it.

use crate::geometry::{BBox, round_to};
use crate::pile::Pile;
use crate::primitives::{RuleSegment, TextRun};
use crate::settings::PileSettings;

/// A resolved table cell.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell<'a> {
    /// Row index of the cell's top-left slot.
    pub row: usize,
    /// Column index of the cell's top-left slot.
    pub col: usize,
    /// Cell rectangle: `x0` = left, `y0` = bottom, `x1` = right, `y1` = top.
    pub bbox: BBox,
    /// Text runs lying inside the cell, in pile order.
    pub texts: Vec<&'a TextRun>,
    /// Number of grid columns covered, recorded only when greater than 1.
    pub colspan: Option<usize>,
    /// Number of grid rows covered, recorded only when greater than 1.
    pub rowspan: Option<usize>,
}

impl GridCell<'_> {
    /// Trimmed run texts joined by single spaces.
    pub fn text(&self) -> String {
        self.texts
            .iter()
            .map(|t| t.trimmed())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Columns covered, 1 when unrecorded.
    pub fn col_count(&self) -> usize {
        self.colspan.unwrap_or(1)
    }

    /// Rows covered, 1 when unrecorded.
    pub fn row_count(&self) -> usize {
        self.rowspan.unwrap_or(1)
    }
}

/// The reconstructed grid of one table pile.
#[derive(Debug, Clone, PartialEq)]
pub struct TableGrid<'a> {
    /// Canonical column boundaries, left to right.
    pub columns: Vec<f64>,
    /// Canonical row boundaries, top to bottom.
    pub rows: Vec<f64>,
    /// Resolved cells per grid row. Rows whose slots were all absorbed by
    /// spans from above are kept as empty vectors.
    pub cells: Vec<Vec<GridCell<'a>>>,
}

impl<'a> TableGrid<'a> {
    /// Number of candidate grid rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// Number of candidate grid columns.
    pub fn num_cols(&self) -> usize {
        self.columns.len().saturating_sub(1)
    }

    /// All resolved cells in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = &GridCell<'a>> {
        self.cells.iter().flatten()
    }

    /// Whether no cell could be resolved.
    pub fn is_degenerate(&self) -> bool {
        self.iter_cells().next().is_none()
    }
}

/// Canonical coordinates and rule set of a table pile, before cell resolution.
struct Skeleton {
    verticals: Vec<RuleSegment>,
    columns: Vec<f64>,
    rows: Vec<f64>,
    /// Right edge used by a catch-all cell that reaches the last column.
    outer_right: f64,
}

impl Skeleton {
    fn new(pile: &Pile, settings: &PileSettings) -> Self {
        let tol = settings.search_distance;
        let horizontals = &pile.horizontals;

        let mut verticals: Vec<RuleSegment> = pile
            .verticals
            .iter()
            .filter(|v| {
                v.bbox.height() >= settings.min_rule_extent
                    || v.bbox.width() >= settings.min_rule_extent
            })
            .cloned()
            .collect();

        let mut columns = vertical_coordinates(&verticals, settings);
        let rows = horizontal_coordinates(horizontals, settings);

        let mut outer_right = columns.last().copied().unwrap_or(0.0);
        if let Some((lx, rx)) = horizontal_extent(horizontals) {
            outer_right = rx;
            let known = if columns.is_empty() {
                vec![(lx + rx) / 2.0]
            } else {
                columns.clone()
            };
            let synthesized = synthesize_borders(horizontals, &known, lx, rx, tol);
            if !synthesized.is_empty() {
                tracing::trace!(count = synthesized.len(), "synthesized border verticals");
                verticals.extend(synthesized);
                columns = vertical_coordinates(&verticals, settings);
            }
        }

        Self {
            verticals,
            columns,
            rows,
            outer_right,
        }
    }

    fn num_rows(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    fn num_cols(&self) -> usize {
        self.columns.len().saturating_sub(1)
    }

    /// Whether slot `(row, col)` has a vertical on its left and a horizontal on its top.
    fn opens_cell(&self, lines: &LineIndex<'_>, row: usize, col: usize, tol: f64) -> bool {
        let (left, right) = (self.columns[col], self.columns[col + 1]);
        let (top, bottom) = (self.rows[row], self.rows[row + 1]);
        lines.vertical_exists(col, bottom, top, tol)
            && lines.horizontal_exists(row, left, right, tol)
    }
}

/// Whether the table pile has at least one resolvable cell.
///
/// Equivalent to `!reconstruct_grid(pile, settings).is_degenerate()` without
/// span scanning or text assignment: the first slot that opens a cell is
/// never occupied, so a grid is degenerate exactly when no slot opens one.
pub fn has_resolvable_cell(pile: &Pile, settings: &PileSettings) -> bool {
    let tol = settings.search_distance;
    let skeleton = Skeleton::new(pile, settings);
    let lines = LineIndex::new(
        &skeleton.verticals,
        &pile.horizontals,
        &skeleton.columns,
        &skeleton.rows,
    );
    (0..skeleton.num_rows()).any(|row| {
        (0..skeleton.num_cols()).any(|col| skeleton.opens_cell(&lines, row, col, tol))
    })
}

/// Reconstruct the cell grid of a table pile.
pub fn reconstruct_grid<'a>(pile: &'a Pile, settings: &PileSettings) -> TableGrid<'a> {
    let tol = settings.search_distance;
    let skeleton = Skeleton::new(pile, settings);
    let Skeleton {
        verticals,
        columns,
        rows,
        outer_right,
    } = &skeleton;

    let lines = LineIndex::new(verticals, &pile.horizontals, columns, rows);
    let num_rows = skeleton.num_rows();
    let num_cols = skeleton.num_cols();
    tracing::debug!(num_rows, num_cols, "table grid dimensions");

    let mut occupied = vec![vec![false; num_cols]; num_rows];
    let mut cells = Vec::with_capacity(num_rows);

    for row in 0..num_rows {
        let mut row_cells = Vec::new();
        for col in 0..num_cols {
            if occupied[row][col] || !skeleton.opens_cell(&lines, row, col, tol) {
                continue;
            }
            let left = columns[col];
            let top = rows[row];
            debug_assert!(top > rows[row + 1]);

            let (right_idx, mut colspan) = scan_span(col, columns.len(), |i| {
                lines.vertical_exists(i, rows[row + 1] + tol, top - tol, tol)
            })
            .unwrap_or((col + 1, 1));
            let mut right = columns[right_idx];

            let below = scan_span(row, rows.len(), |i| {
                lines.horizontal_exists(i, left + tol, right - tol, tol)
            });
            let (bottom, rowspan) = match below {
                Some((bottom_idx, span)) => (rows[bottom_idx], span),
                None => {
                    // Nothing ruled below: the catch-all runs right until a
                    // slot already owned by a rowspan from above.
                    colspan = occupied[row][col..]
                        .iter()
                        .take_while(|&&taken| !taken)
                        .count();
                    right = if col + colspan == num_cols {
                        *outer_right
                    } else {
                        columns[col + colspan]
                    };
                    (rows[row + 1], 1)
                }
            };

            for slots in occupied.iter_mut().skip(row).take(rowspan) {
                for slot in slots.iter_mut().skip(col).take(colspan) {
                    *slot = true;
                }
            }

            let texts = pile
                .texts
                .iter()
                .filter(|t| t.bbox.within(left, top, right, bottom, tol))
                .collect();

            row_cells.push(GridCell {
                row,
                col,
                bbox: BBox::new(left, bottom, right, top),
                texts,
                colspan: (colspan > 1).then_some(colspan),
                rowspan: (rowspan > 1).then_some(rowspan),
            });
        }
        cells.push(row_cells);
    }

    TableGrid {
        columns: skeleton.columns,
        rows: skeleton.rows,
        cells,
    }
}

/// Replace runs of sorted values closer than `closeness` by their mean.
///
/// Values are grouped sequentially after sorting ascending: a value joins
/// the current group when it lies within `closeness` of the previous one.
pub fn average_close_numbers(values: &[f64], closeness: f64) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mut result = Vec::new();
    let mut group: Vec<f64> = Vec::new();
    for value in sorted {
        if let Some(&last) = group.last() {
            if (last - value).abs() > closeness {
                result.push(mean(&group));
                group.clear();
            }
        }
        group.push(value);
    }
    if !group.is_empty() {
        result.push(mean(&group));
    }
    result
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Distinct rounded `x0` of verticals, ascending and averaged.
pub fn vertical_coordinates(verticals: &[RuleSegment], settings: &PileSettings) -> Vec<f64> {
    let xs = distinct_rounded(
        verticals.iter().map(|v| v.bbox.x0),
        settings.coordinate_precision,
    );
    average_close_numbers(&xs, settings.coordinate_closeness)
}

/// Distinct rounded `y0` of horizontals, descending (top of page first).
pub fn horizontal_coordinates(horizontals: &[RuleSegment], settings: &PileSettings) -> Vec<f64> {
    let mut ys = distinct_rounded(
        horizontals.iter().map(|h| h.bbox.y0),
        settings.coordinate_precision,
    );
    ys.reverse();
    ys
}

/// Sorted ascending, deduplicated after rounding.
fn distinct_rounded<I: Iterator<Item = f64>>(values: I, places: u32) -> Vec<f64> {
    let mut out: Vec<f64> = values.map(|v| round_to(v, places)).collect();
    out.sort_by(f64::total_cmp);
    out.dedup();
    out
}

/// Leftmost `x0` and rightmost `x1` over all horizontals.
fn horizontal_extent(horizontals: &[RuleSegment]) -> Option<(f64, f64)> {
    horizontals.iter().fold(None, |acc, h| match acc {
        None => Some((h.bbox.x0, h.bbox.x1)),
        Some((lx, rx)) => Some((lx.min(h.bbox.x0), rx.max(h.bbox.x1))),
    })
}

/// Infer outer border verticals from horizontals reaching past every known column.
///
/// Only horizontals touching the outer extent (`lx` or `rx`) are considered.
/// On each side, every pair of consecutive horizontals overshooting the
/// outermost known coordinate yields one zero-width vertical at that
/// extent spanning both horizontals.
pub fn synthesize_borders(
    horizontals: &[RuleSegment],
    known_columns: &[f64],
    lx: f64,
    rx: f64,
    tol: f64,
) -> Vec<RuleSegment> {
    let Some(min_col) = known_columns.iter().copied().reduce(f64::min) else {
        return Vec::new();
    };
    let max_col = known_columns.iter().copied().fold(min_col, f64::max);

    let mut synthesized = Vec::new();
    let mut left_prev: Option<(f64, f64)> = None;
    let mut right_prev: Option<(f64, f64)> = None;

    for h in horizontals {
        let reaches_outer = h.bbox.x0 - tol < lx || h.bbox.x1 + tol > rx;
        if !reaches_outer {
            continue;
        }
        let span = (h.bbox.y0, h.bbox.y1);
        if h.bbox.x0 < min_col - tol {
            if let Some(prev) = left_prev {
                synthesized.push(spanning_vertical(lx, prev, span));
            }
            left_prev = Some(span);
        }
        if h.bbox.x1 > max_col + tol {
            if let Some(prev) = right_prev {
                synthesized.push(spanning_vertical(rx, prev, span));
            }
            right_prev = Some(span);
        }
    }
    synthesized
}

fn spanning_vertical(x: f64, a: (f64, f64), b: (f64, f64)) -> RuleSegment {
    RuleSegment::synthetic_vertical(x, a.0.min(b.0), a.1.max(b.1))
}

/// First coordinate after `start` accepted by `exists`, as `(index, span)`.
fn scan_span<F>(start: usize, len: usize, exists: F) -> Option<(usize, usize)>
where
    F: Fn(usize) -> bool,
{
    (start + 1..len)
        .find(|&i| exists(i))
        .map(|i| (i, i - start))
}

/// Rule segments keyed by the canonical coordinate they sit on.
struct LineIndex<'r> {
    verticals: Vec<(usize, &'r RuleSegment)>,
    horizontals: Vec<(usize, &'r RuleSegment)>,
}

impl<'r> LineIndex<'r> {
    fn new(
        verticals: &'r [RuleSegment],
        horizontals: &'r [RuleSegment],
        columns: &[f64],
        rows: &[f64],
    ) -> Self {
        let key = |coords: &[f64], value: f64| nearest_index(coords, value);
        Self {
            verticals: verticals
                .iter()
                .filter_map(|v| key(columns, v.bbox.x0).map(|i| (i, v)))
                .collect(),
            horizontals: horizontals
                .iter()
                .filter_map(|h| key(rows, h.bbox.y0).map(|i| (i, h)))
                .collect(),
        }
    }

    /// A vertical on column boundary `col` covering `[bottom, top]`.
    fn vertical_exists(&self, col: usize, bottom: f64, top: f64, tol: f64) -> bool {
        self.verticals
            .iter()
            .any(|(i, v)| *i == col && v.covers(bottom, top, tol))
    }

    /// A horizontal on row boundary `row` covering `[left, right]`.
    fn horizontal_exists(&self, row: usize, left: f64, right: f64, tol: f64) -> bool {
        self.horizontals
            .iter()
            .any(|(i, h)| *i == row && h.covers(left, right, tol))
    }
}

/// Index of the coordinate nearest to `value`.
fn nearest_index(coords: &[f64], value: f64) -> Option<usize> {
    coords
        .iter()
        .enumerate()
        .min_by(|a, b| (a.1 - value).abs().total_cmp(&(b.1 - value).abs()))
        .map(|(i, _)| i)
}
