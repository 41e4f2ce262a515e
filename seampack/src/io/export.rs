use itertools::Itertools;

use crate::entities::{Page, Pagination};
use crate::error::PieceError;
use crate::io::ext_repr::{ExtPage, ExtPlacement, ExtSolution};

/// Exports a [`Pagination`] together with the errors of the run.
pub fn export_solution(pagination: &Pagination, errors: &[PieceError]) -> ExtSolution {
    ExtSolution {
        pages: pagination.pages.iter().map(export_page).collect_vec(),
        unplaced: pagination.unplaced.clone(),
        errors: errors.to_vec(),
    }
}

pub fn export_page(page: &Page) -> ExtPage {
    ExtPage {
        index: page.index,
        width: page.width,
        height: page.height,
        placements: page
            .placements
            .iter()
            .map(|pl| ExtPlacement {
                piece_id: pl.piece_id.clone(),
                dx: pl.dx,
                dy: pl.dy,
            })
            .collect_vec(),
    }
}
