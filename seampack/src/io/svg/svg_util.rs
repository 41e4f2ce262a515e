use serde::{Deserialize, Serialize};
use svg::node::element::Path;

use crate::geometry::primitives::{Point, Polygon, Rect};

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SvgDrawOptions {
    #[serde(default)]
    pub theme: SvgPageTheme,
    /// Draws the margin-expanded rectangles reserved by every placement
    #[serde(default)]
    pub draw_occupancy: bool,
    /// Draws a thin frame around the printable area
    #[serde(default = "default_true")]
    pub draw_printable_area: bool,
    /// Writes the id of every piece at the center of its bbox
    #[serde(default = "default_true")]
    pub draw_piece_ids: bool,
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        Self {
            theme: SvgPageTheme::default(),
            draw_occupancy: false,
            draw_printable_area: true,
            draw_piece_ids: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SvgPageTheme {
    /// Stroke width of the cut line (mm), all other strokes are derived from it
    pub stroke_width: f64,
    pub cut_stroke: Color,
    pub seam_stroke: Color,
    pub guide_stroke: Color,
    pub piece_fill: Color,
    pub occupancy_fill: Color,
    pub label_fill: Color,
    /// Font size of labels and ids (mm)
    pub font_size: f64,
}

impl Default for SvgPageTheme {
    fn default() -> Self {
        SvgPageTheme::PRINT
    }
}

impl SvgPageTheme {
    pub const PRINT: SvgPageTheme = SvgPageTheme {
        stroke_width: 0.3,
        cut_stroke: Color(0x00, 0x00, 0x00),
        seam_stroke: Color(0x40, 0x40, 0x40),
        guide_stroke: Color(0x60, 0x60, 0x60),
        piece_fill: Color(0xFF, 0xFF, 0xFF),
        occupancy_fill: Color(0xCC, 0x82, 0x4A),
        label_fill: Color(0x20, 0x20, 0x20),
        font_size: 4.0,
    };
}

/// RGB color, (de)serialized as `"#RRGGBB"`
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(u8, u8, u8);

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let hex = s.strip_prefix('#').unwrap_or(&s);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("invalid color {s:?}, expected \"#RRGGBB\""));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| format!("invalid color {s:?}: {e}"))
        };
        Ok(Color(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Path data of a closed polygon
pub fn polygon_data(polygon: &Polygon) -> String {
    points_data(polygon.vertices())
}

pub fn rect_data(rect: &Rect) -> String {
    points_data(&rect.corners())
}

fn points_data(points: &[Point]) -> String {
    let mut data = String::new();
    for (i, Point(x, y)) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        data.push_str(&format!("{cmd} {x:.3},{y:.3} "));
    }
    data.push('z');
    data
}

pub fn data_to_path(data: String, params: &[(&str, &str)]) -> Path {
    let mut path = Path::new();
    for param in params {
        path = path.set(param.0, param.1)
    }
    path.set("d", data)
}
