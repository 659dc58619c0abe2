//! wend: fits authored terrain template segments onto grid paths.
//!
//! This is the top-level facade crate that re-exports the public API
//! from the wend sub-crates. For most users, adding `wend` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use wend::prelude::*;
//! use rand::SeedableRng;
//!
//! // A toy map and the smallest possible catalog: one 2-step
//! // horizontal beach segment.
//! struct Map(wend::grid::Matrix<Option<TerrainTile>>);
//! impl TileMap for Map {
//!     fn cell_bounds(&self) -> CellRect {
//!         CellRect::with_size(CellPos::ZERO, self.0.size())
//!     }
//!     fn paint(&mut self, cell: CellPos, tile: TerrainTile) {
//!         self.0[cell] = Some(tile);
//!     }
//! }
//!
//! let catalog = TemplateCatalog::new(vec![TerrainTemplate::new(
//!     TemplateId(1),
//!     CellVec::new(2, 1),
//!     vec![Some(0), Some(1)],
//! )
//! .unwrap()
//! .with_segment(
//!     TemplateSegment::new(
//!         "Beach.R",
//!         "Beach.R",
//!         vec![CellVec::new(0, 0), CellVec::new(1, 0)],
//!     )
//!     .unwrap(),
//! )])
//! .unwrap();
//!
//! let mut map = Map(wend::grid::Matrix::new(16, 16, None));
//! let permitted = PermittedSegments::from_inner(&catalog, &["Beach"]);
//! let points: Vec<CellPos> = (4..9).map(|x| CellPos::new(x, 8)).collect();
//! let mut path = TilingPath::new(
//!     &mut map,
//!     Some(points.clone()),
//!     0,
//!     Terminal::new("Beach"),
//!     Terminal::new("Beach"),
//!     permitted,
//! );
//! let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(7);
//! let tiled = path.retain_if_valid().tile(&mut rng).unwrap();
//! assert_eq!(tiled, points);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `wend-core` | Cell lattice, directions, templates, catalogs, the `TileMap` trait |
//! | [`grid`] | `wend-grid` | Dense matrices, the priority array, flood fill |
//! | [`tiler`] | `wend-tiler` | Path conditioning, geometry pass, search, traceback |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core data model (`wend-core`).
///
/// Cell positions and rectangles, 8-neighbor directions, terminal
/// labels, templates and segments, catalogs and permitted-segment
/// selections, and the [`types::TileMap`] collaborator trait.
pub use wend_core as types;

/// Grid primitives (`wend-grid`).
///
/// [`grid::Matrix`] storage, the [`grid::PriorityArray`] search
/// frontier, and the [`grid::flood_fill`] driver.
pub use wend_grid as grid;

/// The tiler engine (`wend-tiler`).
///
/// [`tiler::TilingPath`] plus the pure conditioning helpers, the
/// geometry pass, and search internals ([`tiler::SearchStats`]).
pub use wend_tiler as tiler;

/// Common imports for typical wend usage.
///
/// ```rust
/// use wend::prelude::*;
/// ```
pub mod prelude {
    // Lattice and directions
    pub use wend_core::{CellPos, CellRect, CellVec, Direction};

    // Data model
    pub use wend_core::{
        CatalogError, PermittedSegments, SegmentRef, TemplateCatalog, TemplateId, TemplateSegment,
        Terminal, TerrainTemplate, TerrainTile, TileMap,
    };

    // Conditioning
    pub use wend_tiler::{
        retain_disjoint_paths, shrink_path_points, validate_path_points,
    };

    // Tiling
    pub use wend_tiler::{SearchStats, TilingPath};
}
