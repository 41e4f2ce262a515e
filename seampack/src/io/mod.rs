/// External (serializable) representations of documents and solutions.
pub mod ext_repr;

/// Conversion of path command strings into polylines
pub mod path_import;

/// All logic for converting pattern documents into external representations
pub mod import;

/// All logic for exporting internal representations into external ones
pub mod export;

/// Interface between the placement and whatever renders its pages
pub mod assembly;

/// Rendering of [`Page`](crate::entities::Page)s as SVG
pub mod svg;
