//! Performance benchmarks for the pdfpile page pipeline.
//!
//! Benchmarks cover layout flattening plus pile partitioning, table grid
//! reconstruction, and markdown rendering over generated layout trees:
//! - Text: one page of dense paragraph lines
//! - Lattice: one page with a fully ruled 20x6 table
//! - Mixed: ten pages of paragraphs, two tables and an image each

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pdfpile::{
    BBox, LayoutNode, LayoutPage, LayoutTextLine, PileSettings, RenderOptions, reconstruct_grid,
    reconstruct_page, reconstruct_pages, render_page,
};

// ---------------------------------------------------------------------------
// Layout fixture generators
// ---------------------------------------------------------------------------

fn text_line(text: String, x0: f64, y0: f64, width: f64) -> LayoutNode {
    LayoutNode::TextLineHorizontal(LayoutTextLine {
        bbox: BBox::new(x0, y0, x0 + width, y0 + 10.0),
        text: Some(text),
        chars: Vec::new(),
    })
}

/// Paragraph lines stacked downward from `y_top`.
fn paragraph(lines: usize, y_top: f64) -> Vec<LayoutNode> {
    (0..lines)
        .map(|i| {
            text_line(
                format!("Paragraph line {} with some ordinary content", i + 1),
                72.0,
                y_top - i as f64 * 14.0,
                400.0,
            )
        })
        .collect()
}

/// A fully ruled table whose bottom edge sits at `y_start`.
fn lattice_table(rows: usize, cols: usize, y_start: f64) -> Vec<LayoutNode> {
    let x_start = 72.0_f64;
    let cell_w = 70.0;
    let cell_h = 16.0;
    let table_w = cols as f64 * cell_w;
    let table_h = rows as f64 * cell_h;

    let mut items = Vec::new();
    for r in 0..=rows {
        let y = y_start + r as f64 * cell_h;
        items.push(LayoutNode::Rect {
            bbox: BBox::new(x_start, y, x_start + table_w, y + 0.5),
        });
    }
    for c in 0..=cols {
        let x = x_start + c as f64 * cell_w;
        items.push(LayoutNode::Rect {
            bbox: BBox::new(x, y_start, x + 0.5, y_start + table_h),
        });
    }
    for r in 0..rows {
        for c in 0..cols {
            let x = x_start + c as f64 * cell_w + 4.0;
            let y = y_start + r as f64 * cell_h + 3.0;
            items.push(text_line(format!("R{}C{}", r + 1, c + 1), x, y, 40.0));
        }
    }
    items
}

fn text_page() -> LayoutPage {
    LayoutPage::new(paragraph(50, 760.0))
}

fn lattice_page() -> LayoutPage {
    LayoutPage::new(lattice_table(20, 6, 300.0))
}

fn mixed_page() -> LayoutPage {
    let mut items = paragraph(8, 760.0);
    items.extend(lattice_table(5, 4, 520.0));
    items.extend(paragraph(6, 480.0));
    items.push(LayoutNode::Image {
        bbox: BBox::new(72.0, 300.0, 300.0, 390.0),
        name: "Im1".to_string(),
    });
    items.extend(lattice_table(8, 3, 100.0));
    LayoutPage::new(items)
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_reconstruct(c: &mut Criterion) {
    let settings = PileSettings::default();
    let text = text_page();
    let lattice = lattice_page();
    let mixed: Vec<LayoutPage> = (0..10).map(|_| mixed_page()).collect();

    let mut group = c.benchmark_group("reconstruct");

    group.bench_function("text_1page", |b| {
        b.iter(|| {
            let page = reconstruct_page(&text, &settings).unwrap();
            black_box(page.piles.len());
        });
    });

    group.bench_function("lattice_1page", |b| {
        b.iter(|| {
            let page = reconstruct_page(&lattice, &settings).unwrap();
            black_box(page.piles.len());
        });
    });

    group.bench_function("mixed_10page", |b| {
        b.iter(|| {
            black_box(reconstruct_pages(&mixed, &settings).len());
        });
    });

    group.finish();
}

fn bench_grid(c: &mut Criterion) {
    let settings = PileSettings::default();
    let page = reconstruct_page(&lattice_page(), &settings).unwrap();

    c.bench_function("grid_20x6", |b| {
        b.iter(|| {
            for pile in &page.piles {
                black_box(reconstruct_grid(pile, &settings).num_rows());
            }
        });
    });
}

fn bench_render(c: &mut Criterion) {
    let settings = PileSettings::default();
    let options = RenderOptions::default();
    let mixed = mixed_page();

    c.bench_function("render_mixed_1page", |b| {
        b.iter(|| {
            black_box(render_page(&mixed, &settings, &options).unwrap().len());
        });
    });
}

criterion_group!(benches, bench_reconstruct, bench_grid, bench_render);
criterion_main!(benches);
