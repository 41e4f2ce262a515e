use std::collections::BTreeMap;

use itertools::Itertools;
use log::error;

use crate::entities::{Pagination, PieceSet};
use crate::util::FPA;

//Various checks to verify correctness of the state of the system
//Used in debug_assert!() blocks

/// Checks that every placement lies within its page, that reserved rectangles on a page are
/// disjoint, that pieces which overlapped in the input are on different pages and that
/// every piece is accounted for exactly once.
pub fn pagination_is_valid(pieces: &PieceSet, pagination: &Pagination) -> bool {
    placements_within_pages(pieces, pagination)
        && occupancy_is_disjoint(pagination)
        && overlapping_pieces_separated(pieces, pagination)
        && pagination_is_complete(pieces, pagination)
}

pub fn placements_within_pages(pieces: &PieceSet, pagination: &Pagination) -> bool {
    pagination.placements().all(|(page, pl)| {
        let Some(piece) = pieces.piece(&pl.piece_id) else {
            error!("placement of unknown piece {}", pl.piece_id);
            return false;
        };
        let fp = pl.footprint(piece);
        let inside = FPA(fp.x_min) >= FPA(0.0)
            && FPA(fp.y_min) >= FPA(0.0)
            && FPA(fp.x_max) <= FPA(page.width)
            && FPA(fp.y_max) <= FPA(page.height);
        if !inside {
            error!(
                "piece {} exceeds page {}: {:?}",
                pl.piece_id, page.index, fp
            );
        }
        inside
    })
}

pub fn occupancy_is_disjoint(pagination: &Pagination) -> bool {
    pagination.pages.iter().all(|page| {
        page.occupancy.len() == page.placements.len()
            && page
                .occupancy
                .iter()
                .tuple_combinations()
                .all(|(a, b)| match a.overlaps(b) {
                    true => {
                        error!("overlap on page {}: {:?} and {:?}", page.index, a, b);
                        false
                    }
                    false => true,
                })
    })
}

pub fn overlapping_pieces_separated(pieces: &PieceSet, pagination: &Pagination) -> bool {
    pieces.overlap_pairs.iter().all(|(a, b)| {
        match (pagination.page_of(a), pagination.page_of(b)) {
            (Some(pa), Some(pb)) if pa == pb => {
                error!("originally overlapping pieces {a} and {b} share page {pa}");
                false
            }
            _ => true,
        }
    })
}

pub fn pagination_is_complete(pieces: &PieceSet, pagination: &Pagination) -> bool {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    pagination
        .placements()
        .map(|(_, pl)| pl.piece_id.as_str())
        .chain(pagination.unplaced.iter().map(|id| id.as_str()))
        .for_each(|id| *counts.entry(id).or_default() += 1);

    let all_once = pieces
        .pieces
        .iter()
        .all(|p| counts.get(p.id.as_str()) == Some(&1));
    if !all_once || counts.len() != pieces.len() {
        error!("pieces are not accounted for exactly once: {counts:?}");
        return false;
    }
    true
}
