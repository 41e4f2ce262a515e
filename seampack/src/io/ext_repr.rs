use serde::{Deserialize, Serialize};

use crate::error::PieceError;

/// External representation of a pattern document.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtDocument {
    /// Uniform scale factor applied to all coordinates before they enter the library (1.0 = mm)
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Groups of the document, every group with an outline becomes a pattern piece
    pub groups: Vec<ExtGroup>,
}

impl Default for ExtDocument {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            groups: vec![],
        }
    }
}

fn default_scale() -> f64 {
    1.0
}

/// External representation of a group in the pattern document.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ExtGroup {
    /// Identifier of the group, generated if absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Path data strings tagged as sewing outline
    #[serde(default)]
    pub outlines: Vec<String>,
    /// Auxiliary path data strings (grain lines, notches, darts)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub guides: Vec<String>,
    /// Text labels attached to the group
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    /// References to raster textures
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub textures: Vec<String>,
}

/// External representation of a pagination run.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtSolution {
    pub pages: Vec<ExtPage>,
    /// Ids of the pieces which do not fit on an empty page
    pub unplaced: Vec<String>,
    /// Non-fatal errors encountered while building the pieces
    pub errors: Vec<PieceError>,
}

/// External representation of a [`Page`](crate::entities::Page).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtPage {
    /// 0-based position of the page in the output sequence
    pub index: usize,
    /// Width of the printable area (mm)
    pub width: f64,
    /// Height of the printable area (mm)
    pub height: f64,
    pub placements: Vec<ExtPlacement>,
}

/// External representation of a [`Placement`](crate::entities::Placement).
/// Translations are relative to the top-left corner of the printable area.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtPlacement {
    pub piece_id: String,
    pub dx: f64,
    pub dy: f64,
}
