/// Set of traits shared by the geometric primitives
pub mod geo_traits;

/// Outward polygon offsetting (seam allowance generation)
pub mod offset;

/// Basic geometric primitives
pub mod primitives;
