//! Pile partitioning: split a page's primitives into ordered piles.

use crate::cluster::{claim_band, cluster_verticals};
use crate::error::{PileWarning, PileWarningCode};
use crate::grid::has_resolvable_cell;
use crate::pile::{Pile, PileKind};
use crate::primitives::TextRun;
use crate::settings::PileSettings;
use crate::snap::snap_rules;
use crate::store::PrimitiveStore;
use crate::unicode_norm::normalize_runs;

/// The reconstructed structure of one page.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageStructure {
    /// Piles in reading order, top of page first.
    pub piles: Vec<Pile>,
    /// Non-fatal diagnostics recorded while partitioning.
    pub warnings: Vec<PileWarning>,
}

impl PageStructure {
    /// Kinds of the ordered piles.
    pub fn kinds(&self) -> Vec<Option<PileKind>> {
        self.piles.iter().map(Pile::kind).collect()
    }

    /// Every text run across all piles, in pile order.
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.piles.iter().flat_map(|p| p.texts.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.piles.is_empty()
    }
}

/// Partition the store's primitives into table, paragraph, and image piles.
///
/// Rules are snapped before any region or coordinate is computed. Each
/// table region claims the horizontals and text runs overlapping its
/// vertical band; a run is claimed by the highest such region only.
/// Remaining runs fall into the paragraph band directly above the first
/// table whose top they sit above, or into the final band below every
/// table. Each image becomes its own pile.
pub fn split_piles(store: PrimitiveStore, settings: &PileSettings) -> PageStructure {
    let tol = settings.search_distance;
    let PrimitiveStore {
        mut texts,
        verticals,
        horizontals,
        images,
        ..
    } = store;

    normalize_runs(&mut texts, settings.unicode_norm);

    let verticals = snap_rules(verticals, tol);
    let mut horizontals = snap_rules(horizontals, tol);
    tracing::debug!(
        verticals = verticals.len(),
        horizontals = horizontals.len(),
        "snapped rule segments"
    );

    let mut warnings = Vec::new();
    let regions = cluster_verticals(verticals, tol);
    let tops: Vec<f64> = regions.iter().map(|r| r.top).collect();

    let mut tables = Vec::with_capacity(regions.len());
    for region in regions {
        let claimed_h = claim_band(&mut horizontals, region.top, region.bottom, tol, |h| &h.bbox);
        let claimed_t = claim_band(&mut texts, region.top, region.bottom, tol, |t| &t.bbox);
        let pile = Pile {
            verticals: region.verticals,
            horizontals: claimed_h,
            texts: claimed_t,
            images: Vec::new(),
        };
        if !has_resolvable_cell(&pile, settings) {
            warnings.push(PileWarning::new(
                PileWarningCode::DegenerateTable,
                format!(
                    "table region [{:.1}, {:.1}] has no resolvable cell; rendered as a single cell",
                    region.bottom, region.top
                ),
            ));
        }
        tables.push(pile);
    }

    if !horizontals.is_empty() {
        warnings.push(PileWarning::new(
            PileWarningCode::UnclaimedRule,
            format!(
                "{} horizontal rule(s) outside every table region were discarded",
                horizontals.len()
            ),
        ));
    }

    let paragraphs = paragraph_bands(texts, &tops);
    let image_piles = images.into_iter().map(Pile::image_pile);

    let piles: Vec<Pile> = tables
        .into_iter()
        .chain(paragraphs)
        .chain(image_piles)
        .collect();
    let piles = order_piles(piles, &mut warnings);

    tracing::debug!(piles = piles.len(), warnings = warnings.len(), "split page into piles");
    PageStructure { piles, warnings }
}

/// Group unclaimed runs into paragraph bands separated by table tops.
///
/// `tops` must be sorted top of page first. Band `i` takes the runs whose
/// `y0` lies above `tops[i]` but not above any earlier top; the last band
/// takes everything else. Bands without text are discarded.
fn paragraph_bands(texts: Vec<TextRun>, tops: &[f64]) -> Vec<Pile> {
    let mut bands: Vec<Vec<TextRun>> = vec![Vec::new(); tops.len() + 1];
    for run in texts {
        let slot = tops
            .iter()
            .position(|&top| run.bbox.y0 > top)
            .unwrap_or(tops.len());
        bands[slot].push(run);
    }
    bands
        .into_iter()
        .map(Pile::paragraph)
        .filter(Pile::has_text)
        .collect()
}

/// Sort piles into reading order, top of page first.
///
/// The key is the `y0` of each pile's representative primitive. Piles
/// without one are dropped and reported in `warnings`; the remaining
/// piles are still ordered. Ties keep their input order.
pub fn order_piles(piles: Vec<Pile>, warnings: &mut Vec<PileWarning>) -> Vec<Pile> {
    let mut keyed: Vec<(f64, Pile)> = Vec::with_capacity(piles.len());
    for (idx, pile) in piles.into_iter().enumerate() {
        match pile.representative() {
            Ok(bbox) => keyed.push((bbox.y0, pile)),
            Err(err) => warnings.push(PileWarning::new(
                PileWarningCode::EmptyPileDropped,
                format!("pile {idx} left out of page order: {err}"),
            )),
        }
    }
    keyed.sort_by(|a, b| b.0.total_cmp(&a.0));
    keyed.into_iter().map(|(_, pile)| pile).collect()
}
