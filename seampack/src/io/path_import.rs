//! Converts path command strings (SVG path data syntax) into polylines.
//!
//! Curves are not flattened: cubic, quadratic and arc commands contribute only their end point,
//! which turns every curved segment into a straight one.

use log::debug;
use svgtypes::{PathParser, PathSegment};

use crate::error::ImportError;
use crate::geometry::primitives::{Point, Polygon};

/// Parses the first sub-path of `path_data` into a polyline.
///
/// Consecutive duplicate points are removed and a final point equal to the first one is not stored,
/// the polyline is implicitly closed.
/// Fails with [`ImportError::DegeneratePath`] if fewer than three points remain.
pub fn import_polyline(path_data: &str) -> Result<Vec<Point>, ImportError> {
    let mut points: Vec<Point> = Vec::new();
    let mut current = Point(0.0, 0.0);

    for (i, segment) in PathParser::from(path_data).enumerate() {
        let segment = segment.map_err(|e| ImportError::Malformed {
            segment: i,
            message: e.to_string(),
        })?;

        let (abs, x, y) = match segment {
            PathSegment::MoveTo { abs, x, y } => {
                if !points.is_empty() {
                    debug!("[IMPORT] ignoring sub-path starting at segment {i}");
                    break;
                }
                (abs, x, y)
            }
            PathSegment::ClosePath { .. } => break,
            PathSegment::LineTo { abs, x, y }
            | PathSegment::CurveTo { abs, x, y, .. }
            | PathSegment::SmoothCurveTo { abs, x, y, .. }
            | PathSegment::Quadratic { abs, x, y, .. }
            | PathSegment::SmoothQuadratic { abs, x, y }
            | PathSegment::EllipticalArc { abs, x, y, .. } => (abs, x, y),
            PathSegment::HorizontalLineTo { abs, x } => match abs {
                true => (true, x, current.1),
                false => (false, x, 0.0),
            },
            PathSegment::VerticalLineTo { abs, y } => match abs {
                true => (true, current.0, y),
                false => (false, 0.0, y),
            },
        };

        current = match abs {
            true => Point(x, y),
            false => Point(current.0 + x, current.1 + y),
        };

        if points.last() != Some(&current) {
            points.push(current);
        }
    }

    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    match points.len() {
        n_points if n_points < 3 => Err(ImportError::DegeneratePath { n_points }),
        _ => Ok(points),
    }
}

/// Parses `path_data` into a [`Polygon`], see [`import_polyline`].
pub fn import_outline(path_data: &str) -> Result<Polygon, ImportError> {
    Polygon::new(import_polyline(path_data)?)
}
