//! Test utilities for wend development: a matrix-backed mock map and
//! fixture catalogs shared by unit tests, integration tests, and
//! benches.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{beach_catalog, beach_loop_catalog, rectilinear_ring, straight_points};

use wend_core::{CellPos, CellRect, CellVec, TerrainTile, TileMap};
use wend_grid::Matrix;

/// A rectangular in-memory tile surface implementing [`TileMap`].
///
/// Painted tiles are recorded per cell; tests inspect them through
/// [`tile_at`](Self::tile_at) and [`painted_count`](Self::painted_count).
pub struct GridMap {
    bounds: CellRect,
    tiles: Matrix<Option<TerrainTile>>,
}

impl GridMap {
    /// A map covering `[0, width) x [0, height)`.
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_origin(CellPos::ZERO, width, height)
    }

    /// A map covering `width x height` cells starting at `origin`.
    pub fn with_origin(origin: CellPos, width: i32, height: i32) -> Self {
        Self {
            bounds: CellRect::with_size(origin, CellVec::new(width, height)),
            tiles: Matrix::new(width, height, None),
        }
    }

    /// The tile painted at `cell`, if any.
    pub fn tile_at(&self, cell: CellPos) -> Option<TerrainTile> {
        if !self.bounds.contains(cell) {
            return None;
        }
        self.tiles[cell - (self.bounds.min - CellPos::ZERO)]
    }

    /// Number of painted cells.
    pub fn painted_count(&self) -> usize {
        self.tiles
            .positions()
            .filter(|&p| self.tiles[p].is_some())
            .count()
    }
}

impl TileMap for GridMap {
    fn cell_bounds(&self) -> CellRect {
        self.bounds
    }

    fn paint(&mut self, cell: CellPos, tile: TerrainTile) {
        if self.bounds.contains(cell) {
            self.tiles[cell - (self.bounds.min - CellPos::ZERO)] = Some(tile);
        }
    }
}
