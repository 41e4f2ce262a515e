//! `seampack`: turns sewing pattern drawings into print-ready pages.
//!
//! Pattern pieces are imported from vector documents, expanded by a seam allowance
//! and then handed to a placement strategy (see the `ffd` crate) which distributes them
//! over fixed-size pages.

/// Pattern pieces, pages and the placements that connect them
pub mod entities;

/// Error taxonomy shared by all components
pub mod error;

/// Geometric primitives and the offset engine
pub mod geometry;

/// Importing pattern documents into and exporting paginations out of this library
pub mod io;

/// Helper functions which do not belong to any specific module
pub mod util;
