use log::{error, info};

use seampack::entities::{Pagination, PieceSet};
use seampack::error::{PaginationError, PieceError};
use seampack::io::ext_repr::ExtDocument;

use crate::config::FFDConfig;

pub mod ffd_paginator;
pub mod search;

/// Everything a pagination run produces for one document
#[derive(Clone, Debug)]
pub struct PaginationRun {
    pub pieces: PieceSet,
    pub pagination: Pagination,
}

impl PaginationRun {
    /// Non-fatal errors encountered while building the pieces
    pub fn errors(&self) -> &[PieceError] {
        &self.pieces.errors
    }
}

/// Builds the pieces of `doc` and distributes them over pages.
/// Fails if `config` is invalid or if the document does not contain a single valid piece.
pub fn paginate(doc: &ExtDocument, config: &FFDConfig) -> Result<PaginationRun, PaginationError> {
    config
        .validate()
        .map_err(|e| PaginationError::InvalidConfig(format!("{e:#}")))?;

    let pieces = PieceSet::from_document(doc, config.allowance_mm);
    if pieces.is_empty() {
        error!(
            "[FFD] no valid pattern pieces ({} rejected)",
            pieces.errors.len()
        );
        return Err(PaginationError::NoPieces {
            errors: pieces.errors,
        });
    }

    let (w, h) = config.page.printable_area();
    info!(
        "[FFD] paginating {} pieces on {} {:?} ({w} x {h} mm printable)",
        pieces.len(),
        config.page.paper,
        config.page.orientation
    );

    let pagination = ffd_paginator::FFDPaginator::new(&pieces, config.clone()).solve();
    Ok(PaginationRun { pieces, pagination })
}
