use geo_clipper::{Clipper, EndType, JoinType};
use geo_types::{Coord, LineString};
use itertools::Itertools;
use log::{debug, warn};
use ordered_float::OrderedFloat;

use crate::error::OffsetError;
use crate::geometry::primitives::{Point, Polygon};

/// Coordinates are multiplied by this factor and rounded to integers before offsetting (1 unit = 1 µm).
pub const QUANTIZATION_FACTOR: f64 = 1000.0;

/// Mitered corners are truncated when the miter would extend further than `MITER_LIMIT × distance`.
pub const MITER_LIMIT: f64 = 2.0;

/// Offsets a [`Polygon`] outward by `distance`.
///
/// Every edge of the result is parallel to the corresponding edge of `polygon`, displaced by exactly
/// `distance`. A `distance` of zero returns an identical copy of the input.
/// See [`offset_points`] for the details of the procedure.
pub fn offset_polygon(polygon: &Polygon, distance: f64) -> Result<Polygon, OffsetError> {
    if distance == 0.0 {
        return Ok(polygon.clone());
    }
    let points = offset_points(polygon.vertices(), distance)?;
    Polygon::new(points).map_err(|e| {
        warn!("[OFFSET] offset result rejected: {e}");
        OffsetError::OffsetEmpty
    })
}

/// Offsets a closed ring of points outward by `distance`.
///
/// The ring is quantised on a grid of [`QUANTIZATION_FACTOR`] units per mm and offset with mitered
/// joins (limit [`MITER_LIMIT`]) as a closed polygon. The result is scaled back to mm.
/// If the procedure returns multiple polygons (self-intersecting input, or the offset split it),
/// the one with the largest absolute area is returned. Orientation of the input does not matter.
pub fn offset_points(points: &[Point], distance: f64) -> Result<Vec<Point>, OffsetError> {
    if points.len() < 3 {
        return Err(OffsetError::DegeneratePath {
            n_points: points.len(),
        });
    }
    if !distance.is_finite() || distance < 0.0 {
        return Err(OffsetError::InvalidDistance(distance));
    }
    if distance == 0.0 {
        return Ok(points.to_vec());
    }

    let ring = LineString::new(
        points
            .iter()
            .map(|p| Coord { x: p.0, y: p.1 })
            .collect_vec(),
    );
    //geo_types closes the ring if required
    let geo_poly = geo_types::Polygon::new(ring, vec![]);

    let offset = geo_poly.offset(
        distance,
        JoinType::Miter(MITER_LIMIT),
        EndType::ClosedPolygon,
        QUANTIZATION_FACTOR,
    );

    let n_results = offset.0.len();
    if n_results > 1 {
        debug!("[OFFSET] offset produced {n_results} polygons, keeping the largest");
    }

    offset
        .0
        .iter()
        .map(|geo_poly| {
            let mut ring = geo_poly
                .exterior()
                .coords()
                .map(|c| Point(c.x, c.y))
                .collect_vec();
            //pop the last point if it is the same as the first
            if ring.len() > 1 && ring.first() == ring.last() {
                ring.pop();
            }
            ring
        })
        .filter(|ring| ring.len() >= 3)
        .max_by_key(|ring| OrderedFloat(Polygon::calculate_signed_area(ring).abs()))
        .ok_or(OffsetError::OffsetEmpty)
}
