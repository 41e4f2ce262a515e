use serde::{Deserialize, Serialize};

use crate::geometry::geo_traits::Shape;
use crate::geometry::primitives::{Polygon, Rect};

/// A single pattern unit: a closed sewing outline, an optional seam allowance and the
/// auxiliary marks that travel with it.
/// Created once by [`PieceSet`](crate::entities::PieceSet), never mutated by placement.
#[derive(Clone, Debug, PartialEq)]
pub struct PatternPiece {
    pub id: String,
    /// Sewing line
    pub outline: Polygon,
    /// Cut line, the outline offset outward by the seam allowance
    pub allowance: Option<Allowance>,
    /// Carried through placement unchanged
    pub auxiliary: Auxiliary,
    /// Bounding box of the allowance if present, otherwise of the outline
    pub bbox: Rect,
    /// Whether the bbox of this piece intersected the bbox of another piece in the input document
    pub originally_overlapping: bool,
}

impl PatternPiece {
    pub fn new(
        id: impl Into<String>,
        outline: Polygon,
        allowance: Option<Allowance>,
        auxiliary: Auxiliary,
    ) -> Self {
        let bbox = match &allowance {
            Some(a) => a.shape.bbox(),
            None => outline.bbox(),
        };
        PatternPiece {
            id: id.into(),
            outline,
            allowance,
            auxiliary,
            bbox,
            originally_overlapping: false,
        }
    }

    /// Spacing added to the width and height of the bbox when reserving room on a page.
    /// Two neighbouring allowances never abut: `2 × allowance + default_margin`.
    pub fn placement_margin(&self, default_margin: f64) -> f64 {
        match &self.allowance {
            Some(a) => 2.0 * a.distance + default_margin,
            None => default_margin,
        }
    }

    /// The polygon that is actually cut out of the fabric.
    pub fn cut_shape(&self) -> &Polygon {
        match &self.allowance {
            Some(a) => &a.shape,
            None => &self.outline,
        }
    }

    pub fn has_allowance(&self) -> bool {
        self.allowance.is_some()
    }
}

/// Seam allowance of a piece
#[derive(Clone, Debug, PartialEq)]
pub struct Allowance {
    pub shape: Polygon,
    /// Distance (mm) between the outline and [`Allowance::shape`]
    pub distance: f64,
}

/// Opaque payload of a piece: nothing in the core interprets it.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Auxiliary {
    /// Path data of grain lines, notches, darts...
    pub guides: Vec<String>,
    pub labels: Vec<String>,
    /// References to raster textures
    pub textures: Vec<String>,
    /// Scale factor the guides have to be drawn with to match the outline
    pub scale: f64,
}
