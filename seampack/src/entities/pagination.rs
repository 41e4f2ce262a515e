use crate::entities::{Page, Placement};

/// Outcome of distributing a set of pieces over pages.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Pagination {
    /// Created pages in index order, none of them empty
    pub pages: Vec<Page>,
    /// Ids of the pieces whose bbox exceeds the printable area, in placement order
    pub unplaced: Vec<String>,
}

impl Pagination {
    pub fn n_pages(&self) -> usize {
        self.pages.len()
    }

    pub fn n_placed(&self) -> usize {
        self.pages.iter().map(|p| p.placements.len()).sum()
    }

    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Index of the page `piece_id` was placed on
    pub fn page_of(&self, piece_id: &str) -> Option<usize> {
        self.pages
            .iter()
            .find(|p| p.contains_piece(piece_id))
            .map(|p| p.index)
    }

    pub fn placement_of(&self, piece_id: &str) -> Option<(&Page, &Placement)> {
        self.pages
            .iter()
            .find_map(|page| page.placement_of(piece_id).map(|pl| (page, pl)))
    }

    pub fn placements(&self) -> impl Iterator<Item = (&Page, &Placement)> {
        self.pages
            .iter()
            .flat_map(|page| page.placements.iter().map(move |pl| (page, pl)))
    }
}
