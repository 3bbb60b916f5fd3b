//! SVG overlay of a pile for visual debugging.
//!
//! Draws text runs in green (with their text as a tooltip), vertical rules
//! in blue and horizontal rules in red. Layout coordinates have a
//! bottom-left origin, so the drawing group is flipped around
//! `RenderOptions::page_height`.

use crate::markdown::{RenderOptions, escape_html};
use crate::pile::Pile;

/// Render the primitives of a pile as an SVG fragment.
pub fn render_debug_svg(pile: &Pile, options: &RenderOptions) -> String {
    let mut svg = String::from("<meta charset=\"utf8\" />");
    svg.push_str("<svg width=\"100%\" height=\"100%\">");
    svg.push_str(&format!(
        "<g transform=\"translate(0, {}) scale(1, -1)\">",
        options.page_height
    ));

    for run in &pile.texts {
        push_rect(
            &mut svg,
            run.bbox.x0,
            run.bbox.y0,
            run.bbox.width(),
            run.bbox.height(),
            "green",
            &escape_html(run.text.trim_end_matches('\n')),
        );
    }
    for rule in &pile.verticals {
        push_rect(&mut svg, rule.bbox.x0, rule.bbox.y0, 1.0, rule.bbox.height(), "blue", "");
    }
    for rule in &pile.horizontals {
        push_rect(&mut svg, rule.bbox.x0, rule.bbox.y0, rule.bbox.width(), 1.0, "red", "");
    }

    svg.push_str("</g></svg>");
    svg
}

fn push_rect(svg: &mut String, x: f64, y: f64, width: f64, height: f64, fill: &str, title: &str) {
    svg.push_str(&format!(
        "<rect width=\"{width}\" height=\"{height}\" x=\"{x}\" y=\"{y}\" fill=\"{fill}\"><title>{title}</title></rect>"
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{BBox, Orientation};
    use crate::primitives::{RuleSegment, TextRun};

    #[test]
    fn svg_has_flip_transform() {
        let svg = render_debug_svg(&Pile::default(), &RenderOptions::default());
        assert!(svg.starts_with("<meta charset=\"utf8\" /><svg"));
        assert!(svg.contains("translate(0, 800) scale(1, -1)"));
        assert!(svg.ends_with("</g></svg>"));
    }

    #[test]
    fn svg_draws_each_primitive() {
        let pile = Pile {
            verticals: vec![RuleSegment::new(
                BBox::new(10.0, 0.0, 10.5, 100.0),
                Orientation::Vertical,
            )],
            horizontals: vec![RuleSegment::new(
                BBox::new(10.0, 50.0, 90.0, 50.5),
                Orientation::Horizontal,
            )],
            texts: vec![TextRun::new(BBox::new(12.0, 60.0, 40.0, 70.0), "a<b")],
            images: Vec::new(),
        };
        let svg = render_debug_svg(&pile, &RenderOptions::default());
        assert!(svg.contains(
            "<rect width=\"28\" height=\"10\" x=\"12\" y=\"60\" fill=\"green\"><title>a&lt;b</title></rect>"
        ));
        assert!(svg.contains("<rect width=\"1\" height=\"100\" x=\"10\" y=\"0\" fill=\"blue\">"));
        assert!(svg.contains("<rect width=\"80\" height=\"1\" x=\"10\" y=\"50\" fill=\"red\">"));
    }
}
