use crate::geometry::geo_traits::Translatable;

/// Geometric primitive representing a point, coordinates in mm with positive y pointing down
#[derive(Debug, Clone, PartialEq, Copy)]
pub struct Point(pub f64, pub f64);

impl Point {
    pub fn scale(&self, factor: f64) -> Point {
        Point(self.0 * factor, self.1 * factor)
    }
}

impl Translatable for Point {
    fn translate(&mut self, dx: f64, dy: f64) -> &mut Self {
        self.0 += dx;
        self.1 += dy;
        self
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.0, p.1)
    }
}

impl From<(f64, f64)> for Point {
    fn from(p: (f64, f64)) -> Self {
        Point(p.0, p.1)
    }
}
