use crate::entities::{OverlapPairs, PatternPiece};
use crate::geometry::geo_traits::Translatable;
use crate::geometry::primitives::{Point, Rect};

/// A destination sheet: its printable area, the pieces placed on it and the space they reserve.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    /// 0-based position in the output sequence
    pub index: usize,
    /// Width of the printable area (mm)
    pub width: f64,
    /// Height of the printable area (mm)
    pub height: f64,
    pub placements: Vec<Placement>,
    /// Margin-expanded rectangles of all placements, in placement order
    pub occupancy: Vec<Rect>,
}

impl Page {
    pub fn new(index: usize, width: f64, height: f64) -> Self {
        Page {
            index,
            width,
            height,
            placements: vec![],
            occupancy: vec![],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Whether the bbox of `piece` fits within the printable area at all
    pub fn fits(&self, piece: &PatternPiece) -> bool {
        piece.bbox.width() <= self.width && piece.bbox.height() <= self.height
    }

    /// Whether `rect` shares an interior region with a rectangle already reserved on the page
    pub fn collides(&self, rect: &Rect) -> bool {
        self.occupancy.iter().any(|o| o.overlaps(rect))
    }

    /// Whether `piece` overlapped, in the input document, with a piece already on this page
    pub fn conflicts_with(&self, piece: &PatternPiece, overlap_pairs: &OverlapPairs) -> bool {
        piece.originally_overlapping
            && self
                .placements
                .iter()
                .any(|pl| overlap_pairs.contains(&piece.id, &pl.piece_id))
    }

    pub fn contains_piece(&self, piece_id: &str) -> bool {
        self.placements.iter().any(|pl| pl.piece_id == piece_id)
    }

    /// Registers `piece` at the top-left corner of `reserved`, which must not collide.
    pub fn place(&mut self, piece: &PatternPiece, reserved: Rect) -> &Placement {
        debug_assert!(!self.collides(&reserved));
        debug_assert!(!self.contains_piece(&piece.id));

        let Point(dx, dy) = reserved.origin();
        self.occupancy.push(reserved);
        self.placements.push(Placement {
            piece_id: piece.id.clone(),
            dx,
            dy,
        });
        &self.placements[self.placements.len() - 1]
    }

    pub fn placement_of(&self, piece_id: &str) -> Option<&Placement> {
        self.placements.iter().find(|pl| pl.piece_id == piece_id)
    }
}

/// Assignment of one piece to one page.
/// After placement the piece's bbox occupies `(dx, dy, bbox.width, bbox.height)` on the page.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    pub piece_id: String,
    pub dx: f64,
    pub dy: f64,
}

impl Placement {
    /// Translation to apply to the document coordinates of `piece` to move it onto the page
    pub fn translation(&self, piece: &PatternPiece) -> (f64, f64) {
        (self.dx - piece.bbox.x_min, self.dy - piece.bbox.y_min)
    }

    /// Region covered by the bbox of `piece` on the page
    pub fn footprint(&self, piece: &PatternPiece) -> Rect {
        let (tx, ty) = self.translation(piece);
        piece.bbox.translate_clone(tx, ty)
    }
}
