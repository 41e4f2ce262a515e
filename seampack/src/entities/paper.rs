use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Unprintable border on every edge of a sheet (mm)
pub const PRINT_MARGIN: f64 = 10.0;

/// Catalogue of supported sheet sizes
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaperSize {
    #[default]
    A4,
    A3,
    B4,
    B5,
}

impl PaperSize {
    /// (width, height) of the sheet in portrait orientation (mm)
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::B4 => (257.0, 364.0),
            PaperSize::B5 => (182.0, 257.0),
        }
    }
}

impl FromStr for PaperSize {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "A4" => Ok(PaperSize::A4),
            "A3" => Ok(PaperSize::A3),
            "B4" => Ok(PaperSize::B4),
            "B5" => Ok(PaperSize::B5),
            _ => bail!("unknown paper size: {s}, expected one of A4, A3, B4, B5"),
        }
    }
}

impl Display for PaperSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Portrait,
    /// Width and height of the sheet are swapped
    Landscape,
}

impl FromStr for Orientation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            _ => bail!("unknown orientation: {s}, expected portrait or landscape"),
        }
    }
}

/// Physical sheet the pieces are printed on
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct PageSpec {
    pub paper: PaperSize,
    pub orientation: Orientation,
}

impl PageSpec {
    pub fn new(paper: PaperSize, orientation: Orientation) -> Self {
        PageSpec { paper, orientation }
    }

    /// (width, height) of the sheet after orientation (mm)
    pub fn sheet_size(&self) -> (f64, f64) {
        let (w, h) = self.paper.dimensions();
        match self.orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    /// (width, height) available for placement: the sheet minus [`PRINT_MARGIN`] on every edge
    pub fn printable_area(&self) -> (f64, f64) {
        let (w, h) = self.sheet_size();
        (w - 2.0 * PRINT_MARGIN, h - 2.0 * PRINT_MARGIN)
    }
}
