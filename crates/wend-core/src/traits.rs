//! Collaborator traits the tiler paints through.

use crate::coord::{CellPos, CellRect};
use crate::template::TerrainTile;

/// A writable tile surface owned by the host.
///
/// The tiler's only external mutation is painting chosen templates
/// through this trait; everything else it allocates is transient.
/// Implementations translate [`CellPos`] into whatever native position
/// type the host map uses.
pub trait TileMap {
    /// The axis-aligned rectangle of valid cells.
    fn cell_bounds(&self) -> CellRect;

    /// Whether the map covers `cell`. Painting is clipped by this test.
    ///
    /// The default assumes rectangular coverage; hosts with irregular
    /// coverage (e.g. diamond maps) override it.
    fn contains(&self, cell: CellPos) -> bool {
        self.cell_bounds().contains(cell)
    }

    /// Write one tile. Called only for cells where `contains` is true.
    fn paint(&mut self, cell: CellPos, tile: TerrainTile);
}
