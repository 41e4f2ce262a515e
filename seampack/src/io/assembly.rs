use itertools::Itertools;

use crate::entities::{Page, Pagination, PatternPiece};
use crate::error::{AssemblyError, ErrorKind, PieceError, UnplacedPiece};

/// Turns the pages of a [`Pagination`] into printable output.
/// Nothing produced here is fed back into the placement.
pub trait PageAssembler {
    type Output;

    /// Renders a single page. `pieces` contains at least every piece placed on `page`.
    fn assemble_page(
        &self,
        page: &Page,
        pieces: &[PatternPiece],
    ) -> Result<Self::Output, AssemblyError>;

    /// Renders every page of `pagination`, refusing to do so if any piece is unplaced.
    fn assemble(
        &self,
        pieces: &[PatternPiece],
        pagination: &Pagination,
    ) -> Result<Vec<Self::Output>, AssemblyError> {
        ensure_complete(pieces, pagination)?;
        pagination
            .pages
            .iter()
            .map(|page| self.assemble_page(page, pieces))
            .collect()
    }
}

/// Fails with [`AssemblyError::UnplacedPieces`] naming every unplaced piece and its size.
pub fn ensure_complete(
    pieces: &[PatternPiece],
    pagination: &Pagination,
) -> Result<(), AssemblyError> {
    match pagination.is_complete() {
        true => Ok(()),
        false => Err(AssemblyError::UnplacedPieces {
            pieces: unplaced_pieces(pieces, pagination),
        }),
    }
}

pub fn unplaced_pieces(pieces: &[PatternPiece], pagination: &Pagination) -> Vec<UnplacedPiece> {
    pagination
        .unplaced
        .iter()
        .map(|id| {
            let (width, height) = find_piece(pieces, id)
                .map(|p| (p.bbox.width(), p.bbox.height()))
                .unwrap_or((f64::NAN, f64::NAN));
            UnplacedPiece {
                piece_id: id.clone(),
                width,
                height,
            }
        })
        .collect_vec()
}

pub fn find_piece<'a>(pieces: &'a [PatternPiece], id: &str) -> Option<&'a PatternPiece> {
    pieces.iter().find(|p| p.id == id)
}

/// Single user-visible summary of everything that went wrong in a run, `None` if nothing did.
/// Every affected piece is listed once per problem, with its dimensions when they are known.
pub fn run_report(
    pieces: &[PatternPiece],
    pagination: &Pagination,
    errors: &[PieceError],
) -> Option<String> {
    let describe = |id: &str, kind: ErrorKind| match find_piece(pieces, id) {
        Some(p) => format!(
            "  - {id} ({:.1} x {:.1} mm): {kind}",
            p.bbox.width(),
            p.bbox.height()
        ),
        None => format!("  - {id}: {kind}"),
    };

    let lines = errors
        .iter()
        .map(|e| describe(&e.piece_id, e.kind))
        .chain(
            pagination
                .unplaced
                .iter()
                .map(|id| describe(id, ErrorKind::PieceTooLarge)),
        )
        .collect_vec();

    match lines.is_empty() {
        true => None,
        false => Some(format!(
            "{} problem(s) with the pattern pieces:\n{}",
            lines.len(),
            lines.join("\n")
        )),
    }
}
