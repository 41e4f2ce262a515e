use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Failures of the path importer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImportError {
    #[error("malformed path data in segment {segment}: {message}")]
    Malformed { segment: usize, message: String },
    #[error("path does not enclose an area ({n_points} distinct points)")]
    DegeneratePath { n_points: usize },
}

/// Failures of the offset engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OffsetError {
    #[error("cannot offset a path with {n_points} points")]
    DegeneratePath { n_points: usize },
    #[error("offset distance must be finite and non-negative, got {0}")]
    InvalidDistance(f64),
    #[error("offset produced no polygon")]
    OffsetEmpty,
}

/// Fatal failures of a pagination run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaginationError {
    #[error("document contains no valid pattern pieces ({} rejected)", .errors.len())]
    NoPieces { errors: Vec<PieceError> },
    #[error("invalid pagination config: {0}")]
    InvalidConfig(String),
}

/// Failures of a page assembler
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssemblyError {
    #[error("{} piece(s) do not fit on a page: {}", .pieces.len(), describe_unplaced(.pieces))]
    UnplacedPieces { pieces: Vec<UnplacedPiece> },
    #[error("placement refers to unknown piece {0}")]
    UnknownPiece(String),
}

/// The kinds of errors reported by a run, see [`PieceError`].
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Importer produced fewer than 3 points (or no area) for a piece, the piece is dropped
    DegeneratePath,
    /// Path data of a piece could not be parsed, the piece is dropped
    MalformedPath,
    /// Offset engine returned no polygon, the piece is kept without allowance
    OffsetEmpty,
    /// Piece does not fit on an empty page, it ends up in the unplaced list
    PieceTooLarge,
    /// The input contained zero valid outlines
    NoPieces,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorKind::DegeneratePath => "degenerate path",
            ErrorKind::MalformedPath => "malformed path",
            ErrorKind::OffsetEmpty => "seam allowance could not be generated",
            ErrorKind::PieceTooLarge => "piece too large for the page",
            ErrorKind::NoPieces => "no pieces",
        };
        f.write_str(s)
    }
}

impl From<&ImportError> for ErrorKind {
    fn from(e: &ImportError) -> Self {
        match e {
            ImportError::Malformed { .. } => ErrorKind::MalformedPath,
            ImportError::DegeneratePath { .. } => ErrorKind::DegeneratePath,
        }
    }
}

impl From<&OffsetError> for ErrorKind {
    fn from(e: &OffsetError) -> Self {
        match e {
            OffsetError::DegeneratePath { .. } => ErrorKind::DegeneratePath,
            OffsetError::InvalidDistance(_) | OffsetError::OffsetEmpty => ErrorKind::OffsetEmpty,
        }
    }
}

/// A non-fatal error attributed to a single piece
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PieceError {
    pub piece_id: String,
    pub kind: ErrorKind,
}

impl PieceError {
    pub fn new(piece_id: impl Into<String>, kind: ErrorKind) -> Self {
        PieceError {
            piece_id: piece_id.into(),
            kind,
        }
    }
}

impl Display for PieceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.piece_id, self.kind)
    }
}

/// A piece that could not be placed, together with its measured size in mm
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UnplacedPiece {
    pub piece_id: String,
    pub width: f64,
    pub height: f64,
}

impl Display for UnplacedPiece {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({:.1} x {:.1} mm)",
            self.piece_id, self.width, self.height
        )
    }
}

fn describe_unplaced(pieces: &[UnplacedPiece]) -> String {
    pieces.iter().join(", ")
}
