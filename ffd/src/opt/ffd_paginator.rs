use std::time::Instant;

use log::{debug, info, warn};
use thousands::Separable;

use seampack::entities::{Page, Pagination, PatternPiece, PieceSet, Placement};
use seampack::util::assertions;

use crate::config::FFDConfig;
use crate::opt::search::{placement_order, search};

/// First-Fit-Decreasing (FFD) paginator: distributes the pieces of a [`PieceSet`] over pages
/// of a fixed size, opening a new page only when a piece fits none of the existing ones.
pub struct FFDPaginator<'a> {
    pub pieces: &'a PieceSet,
    pub config: FFDConfig,
    /// (width, height) of the printable area of every page
    pub page_size: (f64, f64),
    pub pagination: Pagination,
    /// Number of candidate positions tested against the occupancy of a page
    pub eval_counter: usize,
}

impl<'a> FFDPaginator<'a> {
    pub fn new(pieces: &'a PieceSet, config: FFDConfig) -> Self {
        let page_size = config.page.printable_area();
        Self::with_page_size(pieces, config, page_size)
    }

    /// # Panics
    /// If one of the grid steps of `config` is not positive, see [`FFDConfig::validate`].
    pub fn with_page_size(pieces: &'a PieceSet, config: FFDConfig, page_size: (f64, f64)) -> Self {
        assert!(config.coarse_step > 0.0 && config.fine_step > 0.0);
        Self {
            pieces,
            config,
            page_size,
            pagination: Pagination::default(),
            eval_counter: 0,
        }
    }

    pub fn solve(mut self) -> Pagination {
        let start = Instant::now();
        let pieces = self.pieces;
        let n_pieces = pieces.len();

        for (i, piece) in placement_order(&pieces.pieces).into_iter().enumerate() {
            match self.place(piece) {
                Some((page_index, pl)) => {
                    info!(
                        "[FFD] placing piece {}/{} with id {} at [{:.1}, {:.1}] on page {}",
                        i + 1,
                        n_pieces,
                        piece.id,
                        pl.dx,
                        pl.dy,
                        page_index
                    );
                }
                None => {
                    warn!(
                        "[FFD] piece {} ({:.1} x {:.1} mm) does not fit on an empty {:.0} x {:.0} mm page",
                        piece.id,
                        piece.bbox.width(),
                        piece.bbox.height(),
                        self.page_size.0,
                        self.page_size.1
                    );
                    self.pagination.unplaced.push(piece.id.clone());
                }
            }
        }

        info!(
            "[FFD] pagination finished in {:.3}ms ({} positions evaluated)",
            start.elapsed().as_secs_f64() * 1000.0,
            self.eval_counter.separate_with_commas()
        );
        info!(
            "[FFD] {} pieces on {} pages, {} unplaced",
            self.pagination.n_placed(),
            self.pagination.n_pages(),
            self.pagination.unplaced.len()
        );

        debug_assert!(assertions::pagination_is_valid(
            self.pieces,
            &self.pagination
        ));
        self.pagination
    }

    /// Places `piece` on the first page that accepts it, opening a new page if none does.
    /// Returns the index of the page and the placement, or `None` if the piece does not even fit on an empty page.
    fn place(&mut self, piece: &PatternPiece) -> Option<(usize, Placement)> {
        let Self {
            pieces,
            config,
            pagination,
            eval_counter,
            ..
        } = self;

        for page in pagination.pages.iter_mut() {
            debug!("[FFD] searching page {} for piece {}", page.index, piece.id);
            if let Some(reserved) = search(page, piece, &pieces.overlap_pairs, config, eval_counter)
            {
                let placement = page.place(piece, reserved).clone();
                return Some((page.index, placement));
            }
        }

        //only keep the new page if the piece actually fits on it
        let (w, h) = self.page_size;
        let mut page = Page::new(self.pagination.pages.len(), w, h);
        let reserved = search(
            &page,
            piece,
            &self.pieces.overlap_pairs,
            &self.config,
            &mut self.eval_counter,
        )?;
        let placement = page.place(piece, reserved).clone();
        debug!("[FFD] opened page {}", page.index);
        let page_index = page.index;
        self.pagination.pages.push(page);
        Some((page_index, placement))
    }
}
