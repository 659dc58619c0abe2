//! Terrain templates, template segments, and terminal labels.
//!
//! A *template* is an authored block of tiles. A *segment* is the path
//! fragment a template can lay: a polyline of unit 8-neighbor steps
//! through the template's local space, with typed terminals describing
//! how it connects to its neighbors (e.g. `"Beach.R"` is a Beach
//! connector pointing right).

use crate::coord::{CellPos, CellVec};
use crate::direction::Direction;
use crate::error::CatalogError;
use crate::traits::TileMap;
use smallvec::SmallVec;
use std::fmt;

/// Stable identifier of a terrain template within its catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateId(pub u32);

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TemplateId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// A painted cell value: which template, and which tile within it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TerrainTile {
    /// The template the tile comes from.
    pub template: TemplateId,
    /// Flat index of the tile within the template grid.
    pub index: u16,
}

impl TerrainTile {
    /// Create a tile reference.
    pub const fn new(template: TemplateId, index: u16) -> Self {
        Self { template, index }
    }
}

/// The type part of a terminal label: `"Beach.R"` -> `"Beach"`.
pub fn label_type(label: &str) -> &str {
    label.split('.').next().unwrap_or(label)
}

/// Compose a terminal label from a type name and a direction suffix.
pub fn segment_type(type_name: &str, direction: Direction) -> String {
    format!("{}.{}", type_name, direction.label())
}

/// One endpoint of a tiling: a connection type plus an optional
/// direction. A `None` direction is resolved by the tiler from the
/// path's first or last step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Terminal {
    /// Connection type name, e.g. `"Beach"`.
    pub type_name: String,
    /// Connection direction; `None` means derive from the path.
    pub direction: Option<Direction>,
}

impl Terminal {
    /// A terminal with direction left to be derived.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            direction: None,
        }
    }

    /// A terminal with an explicit direction.
    pub fn with_direction(type_name: impl Into<String>, direction: Direction) -> Self {
        Self {
            type_name: type_name.into(),
            direction: Some(direction),
        }
    }

    /// The terminal's label, with `auto` standing in for an unset direction.
    pub fn resolved_label(&self, auto: Direction) -> String {
        segment_type(&self.type_name, self.direction.unwrap_or(auto))
    }
}

/// An authored path fragment through a template's local space.
///
/// Points are offsets from the template origin; each step is a unit
/// 8-neighbor offset, precomputed as a [`Direction`] code at
/// construction. Inner types name the connection labels the segment's
/// interior is compatible with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateSegment {
    start: String,
    end: String,
    inner_types: Vec<String>,
    points: Vec<CellVec>,
    directions: SmallVec<[Direction; 8]>,
    direction_mask: u8,
}

impl TemplateSegment {
    /// Build a segment, validating the point sequence.
    ///
    /// Inner types default to the type parts of the terminal labels;
    /// override with [`with_inner_types`](Self::with_inner_types).
    ///
    /// # Errors
    ///
    /// Returns `Err` if fewer than two points are supplied, if two
    /// consecutive points coincide, or if any step is not a unit
    /// 8-neighbor offset.
    pub fn new(
        start: impl Into<String>,
        end: impl Into<String>,
        points: Vec<CellVec>,
    ) -> Result<Self, CatalogError> {
        let start = start.into();
        let end = end.into();
        let name = || format!("{start}->{end}");

        if points.len() < 2 {
            return Err(CatalogError::TooFewPoints {
                segment: name(),
                count: points.len(),
            });
        }

        let mut directions = SmallVec::new();
        let mut direction_mask = 0u8;
        for (i, pair) in points.windows(2).enumerate() {
            let step = pair[1] - pair[0];
            if step == CellVec::ZERO {
                return Err(CatalogError::DuplicatePoint {
                    segment: name(),
                    index: i + 1,
                });
            }
            let dir = Direction::from_vec(step).ok_or(CatalogError::NonUnitStep {
                segment: name(),
                index: i,
                step,
            })?;
            directions.push(dir);
            direction_mask |= dir.mask_bit();
        }

        let mut inner_types = vec![label_type(&start).to_owned()];
        let end_type = label_type(&end);
        if end_type != inner_types[0] {
            inner_types.push(end_type.to_owned());
        }

        Ok(Self {
            start,
            end,
            inner_types,
            points,
            directions,
            direction_mask,
        })
    }

    /// Replace the derived inner types with an explicit list.
    pub fn with_inner_types(mut self, inner_types: Vec<String>) -> Self {
        self.inner_types = inner_types;
        self
    }

    /// Start terminal label.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// End terminal label.
    pub fn end(&self) -> &str {
        &self.end
    }

    /// The polyline through the template's local space.
    pub fn points(&self) -> &[CellVec] {
        &self.points
    }

    /// Per-step direction codes, one per consecutive point pair.
    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    /// Bitmask of the directions the segment steps in.
    pub fn direction_mask(&self) -> u8 {
        self.direction_mask
    }

    /// Net displacement from the first point to the last.
    pub fn moves(&self) -> CellVec {
        self.points[self.points.len() - 1] - self.points[0]
    }

    /// Whether the start terminal has the given type part.
    pub fn has_start_type(&self, type_name: &str) -> bool {
        label_type(&self.start) == type_name
    }

    /// Whether the segment interior is compatible with the given type.
    pub fn has_inner_type(&self, type_name: &str) -> bool {
        self.inner_types.iter().any(|t| t == type_name)
    }

    /// Whether the end terminal has the given type part.
    pub fn has_end_type(&self, type_name: &str) -> bool {
        label_type(&self.end) == type_name
    }
}

/// An authored block of tiles plus the segments it can lay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerrainTemplate {
    id: TemplateId,
    size: CellVec,
    tiles: Vec<Option<u16>>,
    pick_any: bool,
    segments: Vec<TemplateSegment>,
}

impl TerrainTemplate {
    /// Build a template from its tile grid, row-major, `None` for holes.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the tile list does not cover `size`.
    pub fn new(
        id: TemplateId,
        size: CellVec,
        tiles: Vec<Option<u16>>,
    ) -> Result<Self, CatalogError> {
        let expected = (size.x.max(0) as usize) * (size.y.max(0) as usize);
        if tiles.len() != expected {
            return Err(CatalogError::TileCountMismatch {
                template: id.0,
                expected,
                actual: tiles.len(),
            });
        }
        Ok(Self {
            id,
            size,
            tiles,
            pick_any: false,
            segments: Vec::new(),
        })
    }

    /// Attach a segment.
    pub fn with_segment(mut self, segment: TemplateSegment) -> Self {
        self.segments.push(segment);
        self
    }

    /// Mark the template as pick-any: its tile is chosen stochastically
    /// by the engine, and it must never reach the painter.
    pub fn pick_any(mut self, pick_any: bool) -> Self {
        self.pick_any = pick_any;
        self
    }

    /// The template id.
    pub fn id(&self) -> TemplateId {
        self.id
    }

    /// Grid extent.
    pub fn size(&self) -> CellVec {
        self.size
    }

    /// The segments this template can lay.
    pub fn segments(&self) -> &[TemplateSegment] {
        &self.segments
    }

    /// Whether the template is pick-any.
    pub fn is_pick_any(&self) -> bool {
        self.pick_any
    }

    /// Tile at a local offset, `None` for holes or out-of-grid offsets.
    pub fn tile(&self, offset: CellVec) -> Option<u16> {
        if offset.x < 0 || offset.x >= self.size.x || offset.y < 0 || offset.y >= self.size.y {
            return None;
        }
        self.tiles[(offset.y * self.size.x + offset.x) as usize]
    }

    /// Copy the template's non-hole tiles onto `map` with the template
    /// origin at `origin`, clipped to the map's cell coverage.
    ///
    /// # Panics
    ///
    /// Panics if the template is pick-any; such templates must never be
    /// painted directly.
    pub fn paint_onto<M: TileMap + ?Sized>(&self, map: &mut M, origin: CellPos) {
        assert!(
            !self.pick_any,
            "template {} is pick-any and cannot be painted directly",
            self.id
        );
        for y in 0..self.size.y {
            for x in 0..self.size.x {
                let offset = CellVec::new(x, y);
                if let Some(index) = self.tile(offset) {
                    let pos = origin + offset;
                    if map.contains(pos) {
                        map.paint(pos, TerrainTile::new(self.id, index));
                    }
                }
            }
        }
    }
}
