use crate::error::ImportError;
use crate::geometry::geo_traits::{CollidesWith, Shape, Translatable};
use crate::geometry::primitives::{Point, Rect};

/// Geometric primitive representing a closed polygon.
///
/// The last vertex is implicitly connected to the first one and is never stored twice.
/// Unlike most packing libraries, the orientation of the vertices is preserved: the sign of
/// [`Polygon::signed_area`] conveys which side is the inside.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
    signed_area: f64,
    bbox: Rect,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Result<Self, ImportError> {
        let n_points = vertices.len();
        if n_points < 3 {
            return Err(ImportError::DegeneratePath { n_points });
        }
        let signed_area = Polygon::calculate_signed_area(&vertices);
        let bbox = match Rect::bounding(&vertices) {
            Some(bbox) if signed_area != 0.0 && signed_area.is_finite() => bbox,
            _ => return Err(ImportError::DegeneratePath { n_points }),
        };

        Ok(Polygon {
            vertices,
            signed_area,
            bbox,
        })
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Positive for counterclockwise order in a y-up frame, negative for clockwise.
    pub fn signed_area(&self) -> f64 {
        self.signed_area
    }

    /// Iterates over all edges, including the closing one.
    pub fn edge_iter(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    pub fn scale(&self, factor: f64) -> Result<Polygon, ImportError> {
        Polygon::new(self.vertices.iter().map(|p| p.scale(factor)).collect())
    }

    //https://en.wikipedia.org/wiki/Shoelace_formula
    pub fn calculate_signed_area(points: &[Point]) -> f64 {
        let mut sigma: f64 = 0.0;
        for i in 0..points.len() {
            //next point
            let j = (i + 1) % points.len();

            let (x_i, y_i) = points[i].into();
            let (x_j, y_j) = points[j].into();

            sigma += (y_i + y_j) * (x_i - x_j)
        }

        0.5 * sigma
    }
}

impl Shape for Polygon {
    fn area(&self) -> f64 {
        self.signed_area.abs()
    }

    fn bbox(&self) -> Rect {
        self.bbox
    }
}

impl Translatable for Polygon {
    fn translate(&mut self, dx: f64, dy: f64) -> &mut Self {
        self.vertices.iter_mut().for_each(|p| {
            p.translate(dx, dy);
        });
        self.bbox.translate(dx, dy);
        self
    }
}

impl From<Rect> for Polygon {
    fn from(r: Rect) -> Self {
        let vertices = r.corners().to_vec();
        Polygon {
            signed_area: Polygon::calculate_signed_area(&vertices),
            vertices,
            bbox: r,
        }
    }
}

impl CollidesWith<Point> for Polygon {
    fn collides_with(&self, point: &Point) -> bool {
        //based on the ray casting algorithm: https://en.wikipedia.org/wiki/Point_in_polygon#Ray_casting_algorithm
        if !self.bbox.collides_with(point) {
            return false;
        }
        let Point(p_x, p_y) = *point;
        let mut inside = false;
        for (Point(s_x, s_y), Point(e_x, e_y)) in self.edge_iter() {
            //half-open rule on y avoids counting a vertex on the ray twice
            if (s_y > p_y) != (e_y > p_y) {
                let x_cross = s_x + (p_y - s_y) * (e_x - s_x) / (e_y - s_y);
                if p_x < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }
}
