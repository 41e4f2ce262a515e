mod page;
mod pagination;
mod paper;
mod piece;
mod piece_set;

#[doc(inline)]
pub use piece::PatternPiece;

#[doc(inline)]
pub use piece::Allowance;

#[doc(inline)]
pub use piece::Auxiliary;

#[doc(inline)]
pub use piece_set::PieceSet;

#[doc(inline)]
pub use piece_set::OverlapPairs;

#[doc(inline)]
pub use page::Page;

#[doc(inline)]
pub use page::Placement;

#[doc(inline)]
pub use pagination::Pagination;

#[doc(inline)]
pub use paper::{Orientation, PRINT_MARGIN, PageSpec, PaperSize};
