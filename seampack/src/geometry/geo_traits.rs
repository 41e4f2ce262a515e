use crate::geometry::primitives::Rect;

/// Trait for types that can detect collisions between `Self` and `T`.
pub trait CollidesWith<T> {
    fn collides_with(&self, other: &T) -> bool;
}

/// Trait for shared properties of geometric primitives.
pub trait Shape {
    /// Area of the interior of the shape
    fn area(&self) -> f64;

    /// Axis-aligned bounding box of the shape
    fn bbox(&self) -> Rect;
}

/// Trait for types that can be moved by a translation vector.
pub trait Translatable: Clone {
    /// Translates `self` by (`dx`, `dy`).
    fn translate(&mut self, dx: f64, dy: f64) -> &mut Self;

    /// Applies a translation to a clone.
    fn translate_clone(&self, dx: f64, dy: f64) -> Self {
        let mut clone = self.clone();
        clone.translate(dx, dy);
        clone
    }
}
