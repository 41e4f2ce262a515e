use std::collections::BTreeSet;

use itertools::Itertools;
use log::{debug, info, warn};

use crate::entities::{Allowance, Auxiliary, PatternPiece};
use crate::error::{ErrorKind, ImportError, PieceError};
use crate::geometry::offset::offset_polygon;
use crate::geometry::primitives::Polygon;
use crate::io::ext_repr::{ExtDocument, ExtGroup};
use crate::io::path_import::import_outline;

/// Unordered pairs of piece ids whose bboxes intersected in the input document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverlapPairs(BTreeSet<(String, String)>);

impl OverlapPairs {
    pub fn insert(&mut self, a: &str, b: &str) -> bool {
        self.0.insert(Self::key(a, b))
    }

    pub fn contains(&self, a: &str, b: &str) -> bool {
        self.0.contains(&Self::key(a, b))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(a, b)| (a.as_str(), b.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn key(a: &str, b: &str) -> (String, String) {
        match a <= b {
            true => (a.to_string(), b.to_string()),
            false => (b.to_string(), a.to_string()),
        }
    }
}

/// The pattern pieces of one document together with the originally-overlapping relation
/// and the per-piece errors encountered while building them.
#[derive(Clone, Debug, PartialEq)]
pub struct PieceSet {
    /// Pieces in document order
    pub pieces: Vec<PatternPiece>,
    pub overlap_pairs: OverlapPairs,
    /// Non-fatal errors, in document order
    pub errors: Vec<PieceError>,
}

impl PieceSet {
    /// Builds the pieces of `doc`, offsetting every outline by `allowance_mm` if it is positive.
    ///
    /// Groups without outline strings are not pieces and are skipped silently.
    /// Pieces whose outline cannot be imported are dropped, pieces whose allowance cannot be generated
    /// are kept without one. Both are reported in [`PieceSet::errors`].
    pub fn from_document(doc: &ExtDocument, allowance_mm: f64) -> PieceSet {
        if !(allowance_mm >= 0.0 && allowance_mm.is_finite()) {
            warn!("[MODEL] ignoring invalid seam allowance of {allowance_mm} mm");
        }
        let with_allowance = allowance_mm > 0.0 && allowance_mm.is_finite();

        let mut ids = UniqueIds::default();
        let mut pieces = vec![];
        let mut errors = vec![];

        for (i, group) in doc.groups.iter().enumerate() {
            if group.outlines.is_empty() {
                debug!("[MODEL] group {i} has no outline, skipping");
                continue;
            }
            let id = ids.assign(group.id.as_deref(), i);

            let outline = match build_outline(group, doc.scale) {
                Ok(outline) => outline,
                Err(e) => {
                    warn!("[MODEL] dropping piece {id}: {e}");
                    errors.push(PieceError::new(&id, ErrorKind::from(&e)));
                    continue;
                }
            };

            let allowance = match with_allowance {
                false => None,
                true => match offset_polygon(&outline, allowance_mm) {
                    Ok(shape) => Some(Allowance {
                        shape,
                        distance: allowance_mm,
                    }),
                    Err(e) => {
                        warn!("[MODEL] piece {id} kept without seam allowance: {e}");
                        errors.push(PieceError::new(&id, ErrorKind::from(&e)));
                        None
                    }
                },
            };

            let auxiliary = Auxiliary {
                guides: group.guides.clone(),
                labels: group.labels.clone(),
                textures: group.textures.clone(),
                scale: doc.scale,
            };
            pieces.push(PatternPiece::new(id, outline, allowance, auxiliary));
        }

        let overlap_pairs = mark_overlapping(&mut pieces);

        info!(
            "[MODEL] {} pieces built ({} with allowance), {} overlapping pairs, {} errors",
            pieces.len(),
            pieces.iter().filter(|p| p.has_allowance()).count(),
            overlap_pairs.len(),
            errors.len()
        );

        PieceSet {
            pieces,
            overlap_pairs,
            errors,
        }
    }

    pub fn piece(&self, id: &str) -> Option<&PatternPiece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

/// Tries the outline strings of `group` in order, the first valid polygon wins.
/// Reports the error of the first string if none of them is valid.
fn build_outline(group: &ExtGroup, scale: f64) -> Result<Polygon, ImportError> {
    let mut first_error = None;
    for path_data in group.outlines.iter() {
        let outline = import_outline(path_data).and_then(|p| match scale == 1.0 {
            true => Ok(p),
            false => p.scale(scale),
        });
        match outline {
            Ok(outline) => return Ok(outline),
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }
    Err(first_error.unwrap_or(ImportError::DegeneratePath { n_points: 0 }))
}

/// Flags every piece whose bbox shares an interior region with the bbox of another piece
/// and returns all such pairs.
fn mark_overlapping(pieces: &mut [PatternPiece]) -> OverlapPairs {
    let mut pairs = OverlapPairs::default();
    let overlapping = (0..pieces.len())
        .tuple_combinations()
        .filter(|&(i, j)| pieces[i].bbox.overlaps(&pieces[j].bbox))
        .collect_vec();

    for (i, j) in overlapping {
        debug!(
            "[MODEL] pieces {} and {} overlap in the input",
            pieces[i].id, pieces[j].id
        );
        pairs.insert(&pieces[i].id, &pieces[j].id);
        pieces[i].originally_overlapping = true;
        pieces[j].originally_overlapping = true;
    }
    pairs
}

/// Hands out piece ids, generating one for anonymous groups and suffixing repeated ones.
#[derive(Default)]
struct UniqueIds(BTreeSet<String>);

impl UniqueIds {
    fn assign(&mut self, requested: Option<&str>, group_index: usize) -> String {
        let base = match requested.map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => format!("piece_{group_index}"),
        };
        let mut id = base.clone();
        let mut n = 1;
        while self.0.contains(&id) {
            id = format!("{base}_{n}");
            n += 1;
        }
        if id != base {
            warn!("[MODEL] duplicate piece id {base}, renamed to {id}");
        }
        self.0.insert(id.clone());
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::geo_traits::Shape;

    fn square_path(x: f64, y: f64, size: f64) -> String {
        format!("M {x} {y} h {size} v {size} h -{size} z")
    }

    fn group(id: Option<&str>, outlines: &[String]) -> ExtGroup {
        ExtGroup {
            id: id.map(String::from),
            outlines: outlines.to_vec(),
            ..ExtGroup::default()
        }
    }

    fn document(groups: Vec<ExtGroup>) -> ExtDocument {
        ExtDocument {
            groups,
            ..ExtDocument::default()
        }
    }

    #[test]
    fn builds_pieces_without_allowance() {
        let doc = document(vec![
            group(Some("front"), &[square_path(0.0, 0.0, 50.0)]),
            group(None, &[]),
            group(None, &[square_path(100.0, 0.0, 50.0)]),
        ]);
        let set = PieceSet::from_document(&doc, 0.0);

        assert_eq!(set.len(), 2);
        assert_eq!(set.pieces[0].id, "front");
        assert_eq!(set.pieces[1].id, "piece_2");
        assert!(set.pieces.iter().all(|p| p.allowance.is_none()));
        assert!(set.overlap_pairs.is_empty());
        assert!(set.errors.is_empty());
        assert_eq!(set.piece("front").unwrap().bbox.width(), 50.0);
    }

    #[test]
    fn allowance_expands_bbox_and_creates_overlap() {
        //edges touch: no overlap without allowance, 20 mm overlap with a 10 mm allowance
        let doc = document(vec![
            group(Some("a"), &[square_path(5.0, 5.0, 90.0)]),
            group(Some("b"), &[square_path(95.0, 5.0, 90.0)]),
        ]);

        let plain = PieceSet::from_document(&doc, 0.0);
        assert!(plain.overlap_pairs.is_empty());
        assert!(plain.pieces.iter().all(|p| !p.originally_overlapping));

        let seamed = PieceSet::from_document(&doc, 10.0);
        assert!(seamed.overlap_pairs.contains("b", "a"));
        assert!(seamed.pieces.iter().all(|p| p.originally_overlapping));
        let a = seamed.piece("a").unwrap();
        assert!((a.bbox.width() - 110.0).abs() < 0.01);
        assert!(a.cut_shape().area() > a.outline.area());
    }

    #[test]
    fn invalid_outlines_are_reported() {
        let doc = document(vec![
            group(Some("flat"), &["M 0 0 L 10 10 Z".to_string()]),
            group(Some("broken"), &["M 0 0 L 10 q".to_string()]),
            group(
                Some("second_try"),
                &["M 0 0 Z".to_string(), square_path(0.0, 0.0, 10.0)],
            ),
        ]);
        let set = PieceSet::from_document(&doc, 0.0);

        assert_eq!(set.len(), 1);
        assert_eq!(set.pieces[0].id, "second_try");
        assert_eq!(
            set.errors,
            vec![
                PieceError::new("flat", ErrorKind::DegeneratePath),
                PieceError::new("broken", ErrorKind::MalformedPath),
            ]
        );
    }

    #[test]
    fn collapsed_offset_keeps_piece_without_allowance() {
        //0.1 µm high: vanishes on the offset grid
        let doc = document(vec![
            group(Some("sliver"), &["M 0 0 L 100 0 L 100 0.0001 Z".to_string()]),
            group(Some("square"), &[square_path(200.0, 0.0, 20.0)]),
        ]);
        let set = PieceSet::from_document(&doc, 5.0);

        assert_eq!(set.len(), 2);
        let sliver = set.piece("sliver").unwrap();
        assert!(!sliver.has_allowance());
        assert_eq!(sliver.bbox, sliver.outline.bbox());
        assert!(set.piece("square").unwrap().has_allowance());
        assert_eq!(
            set.errors,
            vec![PieceError::new("sliver", ErrorKind::OffsetEmpty)]
        );
    }

    #[test]
    fn duplicate_ids_are_suffixed() {
        let doc = document(vec![
            group(Some("sleeve"), &[square_path(0.0, 0.0, 10.0)]),
            group(Some("sleeve"), &[square_path(20.0, 0.0, 10.0)]),
            group(Some("sleeve"), &[square_path(40.0, 0.0, 10.0)]),
        ]);
        let set = PieceSet::from_document(&doc, 0.0);
        let ids = set.pieces.iter().map(|p| p.id.as_str()).collect_vec();
        assert_eq!(ids, ["sleeve", "sleeve_1", "sleeve_2"]);
    }

    #[test]
    fn scale_is_applied() {
        let doc = ExtDocument {
            scale: 2.0,
            groups: vec![group(Some("a"), &[square_path(10.0, 10.0, 25.0)])],
        };
        let set = PieceSet::from_document(&doc, 0.0);
        let bbox = set.pieces[0].bbox;
        assert_eq!((bbox.x_min, bbox.width()), (20.0, 50.0));
        assert_eq!(set.pieces[0].auxiliary.scale, 2.0);
    }

    #[test]
    fn empty_document() {
        let set = PieceSet::from_document(&ExtDocument::default(), 5.0);
        assert!(set.is_empty());
        assert!(set.errors.is_empty());
    }
}
