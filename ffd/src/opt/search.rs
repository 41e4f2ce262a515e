use std::cmp::Reverse;

use itertools::Itertools;
use log::trace;
use ordered_float::OrderedFloat;

use seampack::entities::{OverlapPairs, Page, PatternPiece};
use seampack::geometry::geo_traits::Shape;
use seampack::geometry::primitives::Rect;

use crate::config::FFDConfig;

/// Tolerance absorbing floating point noise when dividing a free range into grid steps
const GRID_EPS: f64 = 1e-9;

/// Order in which the pieces are placed: descending bbox area, ties broken by id.
pub fn placement_order(pieces: &[PatternPiece]) -> Vec<&PatternPiece> {
    pieces
        .iter()
        .sorted_by_cached_key(|p| (Reverse(OrderedFloat(p.bbox.area())), p.id.clone()))
        .collect_vec()
}

/// Searches `page` for the first free position of `piece`.
/// Returns the margin-expanded rectangle to reserve, its top-left corner is the position of the bbox.
///
/// Pieces which overlapped in the input with a piece already on the page are rejected,
/// as are pieces whose bbox exceeds the page.
/// Positions are scanned row-major (y outer, x inner), first on the coarse grid, then on the fine grid.
pub fn search(
    page: &Page,
    piece: &PatternPiece,
    overlap_pairs: &OverlapPairs,
    config: &FFDConfig,
    eval_counter: &mut usize,
) -> Option<Rect> {
    if page.conflicts_with(piece, overlap_pairs) {
        trace!(
            "[FFD] piece {} overlapped a piece on page {} in the input",
            piece.id, page.index
        );
        return None;
    }
    if !page.fits(piece) {
        return None;
    }

    let margin = piece.placement_margin(config.default_margin);
    let (w, h) = (piece.bbox.width() + margin, piece.bbox.height() + margin);

    [config.coarse_step, config.fine_step]
        .into_iter()
        .find_map(|step| grid_search(page, w, h, step, eval_counter))
}

fn grid_search(page: &Page, w: f64, h: f64, step: f64, eval_counter: &mut usize) -> Option<Rect> {
    let xs = grid_positions(page.width - w, step);
    let ys = grid_positions(page.height - h, step);

    for &y in ys.iter() {
        for &x in xs.iter() {
            *eval_counter += 1;
            let rect = Rect {
                x_min: x,
                y_min: y,
                x_max: x + w,
                y_max: y + h,
            };
            if !page.collides(&rect) {
                return Some(rect);
            }
        }
    }
    None
}

/// Multiples of `step` within `[0, limit]`.
/// Always contains 0: a piece which fits the page, but not together with its margin, goes to the origin.
pub fn grid_positions(limit: f64, step: f64) -> Vec<f64> {
    let n = match limit > 0.0 {
        true => (limit / step + GRID_EPS).floor() as usize,
        false => 0,
    };
    (0..=n).map(|i| i as f64 * step).collect_vec()
}
