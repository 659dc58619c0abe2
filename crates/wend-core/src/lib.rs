//! Core types for the wend path tiler.
//!
//! This is the leaf crate with zero internal wend dependencies. It
//! defines the cell lattice ([`CellPos`], [`CellVec`], [`CellRect`]),
//! the 8-neighbor [`Direction`] codes, the authored data model
//! ([`TerrainTemplate`], [`TemplateSegment`], [`TemplateCatalog`],
//! [`PermittedSegments`]), and the [`TileMap`] collaborator trait the
//! tiler paints through.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod catalog;
pub mod coord;
pub mod direction;
pub mod error;
pub mod template;
pub mod traits;

// Re-export core types at crate root for convenience.
pub use catalog::{PermittedSegments, SegmentRef, TemplateCatalog};
pub use coord::{CellPos, CellRect, CellVec};
pub use direction::Direction;
pub use error::CatalogError;
pub use template::{
    label_type, segment_type, TemplateId, TemplateSegment, Terminal, TerrainTemplate, TerrainTile,
};
pub use traits::TileMap;
