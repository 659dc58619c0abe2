//! The tiling path entity: a target polyline on a map, conditioning
//! knobs, and the tile operation.

use crate::condition::{
    chirally_normalize_path_points, extend_path_points_at_edges, inertially_extend_path_points,
    is_loop, optimize_loop_path_points, shrink_path_points, validate_path_points,
};
use crate::geometry::PathGeometry;
use crate::search::{SearchStats, Searcher};
use rand::Rng;
use wend_core::{CellPos, Direction, PermittedSegments, Terminal, TileMap};

/// A path to be approximated by template segments on a map.
///
/// Holds the target `points` (or `None` for "no path"), the deviation
/// and separation bounds, the two terminals, and the permitted segment
/// selection. Conditioners transform the points in place and chain;
/// [`tile`](Self::tile) runs the search and paints the winning chain
/// onto the map.
///
/// `points`, when present, must satisfy
/// [`validate_path_points`]: at least 2 points (3 for a loop, closed by
/// repeating its first point), no repeats, every step a non-diagonal
/// unit offset. Use [`retain_if_valid`](Self::retain_if_valid) to
/// enforce this.
pub struct TilingPath<'a, M: TileMap> {
    map: &'a mut M,
    points: Option<Vec<CellPos>>,
    max_deviation: i32,
    max_skip: i32,
    min_separation: i32,
    start: Terminal,
    end: Terminal,
    segments: PermittedSegments<'a>,
}

impl<'a, M: TileMap> TilingPath<'a, M> {
    /// Create a path over `map`.
    ///
    /// `max_skip` defaults to derived (`2 * max_deviation + 1`) and
    /// `min_separation` to zero; both have setters.
    ///
    /// # Panics
    ///
    /// Panics when `max_deviation` is negative.
    pub fn new(
        map: &'a mut M,
        points: Option<Vec<CellPos>>,
        max_deviation: i32,
        start: Terminal,
        end: Terminal,
        segments: PermittedSegments<'a>,
    ) -> Self {
        assert!(max_deviation >= 0, "max deviation must be >= 0");
        Self {
            map,
            points,
            max_deviation,
            max_skip: 0,
            min_separation: 0,
            start,
            end,
            segments,
        }
    }

    /// The current points, if any.
    pub fn points(&self) -> Option<&[CellPos]> {
        self.points.as_deref()
    }

    /// Replace the points outright.
    pub fn set_points(&mut self, points: Option<Vec<CellPos>>) -> &mut Self {
        self.points = points;
        self
    }

    /// The perpendicular deviation bound.
    pub fn max_deviation(&self) -> i32 {
        self.max_deviation
    }

    /// The per-step progress-skip bound; 0 means derived at tile time.
    pub fn max_skip(&self) -> i32 {
        self.max_skip
    }

    /// The extra exclusion margin between separate path lanes.
    pub fn min_separation(&self) -> i32 {
        self.min_separation
    }

    /// Set the per-step progress-skip bound; 0 derives
    /// `2 * max_deviation + 1` at tile time.
    ///
    /// # Panics
    ///
    /// Panics on a negative value.
    pub fn set_max_skip(&mut self, max_skip: i32) -> &mut Self {
        assert!(max_skip >= 0, "max skip must be >= 0");
        self.max_skip = max_skip;
        self
    }

    /// Set the extra exclusion margin between separate path lanes.
    ///
    /// # Panics
    ///
    /// Panics on a negative value.
    pub fn set_min_separation(&mut self, min_separation: i32) -> &mut Self {
        assert!(min_separation >= 0, "min separation must be >= 0");
        self.min_separation = min_separation;
        self
    }

    /// The start terminal.
    pub fn start(&self) -> &Terminal {
        &self.start
    }

    /// The end terminal.
    pub fn end(&self) -> &Terminal {
        &self.end
    }

    /// Override the start terminal direction; `None` re-derives it from
    /// the path's first step at tile time.
    pub fn set_start_direction(&mut self, direction: Option<Direction>) -> &mut Self {
        self.start.direction = direction;
        self
    }

    /// Override the end terminal direction; `None` re-derives it from
    /// the path's last step at tile time.
    pub fn set_end_direction(&mut self, direction: Option<Direction>) -> &mut Self {
        self.end.direction = direction;
        self
    }

    // ---------------------------------------------------------------
    // Conditioners. Each transforms `points` in place and returns
    // `self` for chaining; all are no-ops on a `None` path. Pure
    // variants live in [`crate::condition`].
    // ---------------------------------------------------------------

    /// Null the points unless they form a conforming path.
    pub fn retain_if_valid(&mut self) -> &mut Self {
        if !self.points.as_deref().is_some_and(validate_path_points) {
            self.points = None;
        }
        self
    }

    /// Extend a non-loop path beyond both endpoints along its momentum.
    /// See [`inertially_extend_path_points`].
    pub fn inertially_extend(&mut self, extension_length: i32, inertial_range: i32) -> &mut Self {
        if let Some(points) = self.points.take() {
            self.points = Some(inertially_extend_path_points(
                &points,
                extension_length,
                inertial_range,
            ));
        }
        self
    }

    /// Extend a non-loop path off the map where it meets a map edge.
    /// See [`extend_path_points_at_edges`].
    pub fn extend_edge(&mut self, extension_length: i32) -> &mut Self {
        if let Some(points) = self.points.take() {
            self.points = Some(extend_path_points_at_edges(
                &points,
                extension_length,
                self.map.cell_bounds(),
            ));
        }
        self
    }

    /// Rotate a loop so the seam falls mid-straight.
    /// See [`optimize_loop_path_points`].
    pub fn optimize_loop(&mut self) -> &mut Self {
        if let Some(points) = self.points.take() {
            self.points = Some(optimize_loop_path_points(&points));
        }
        self
    }

    /// Trim both ends of a non-loop path, nulling the points when the
    /// remainder would be shorter than `minimum_length`.
    /// See [`shrink_path_points`].
    pub fn shrink(&mut self, shrink_by: usize, minimum_length: usize) -> &mut Self {
        if let Some(points) = self.points.take() {
            self.points = shrink_path_points(&points, shrink_by, minimum_length);
        }
        self
    }

    /// Normalize the path's sense of rotation.
    /// See [`chirally_normalize_path_points`].
    pub fn chirally_normalize(&mut self, center: CellPos) -> &mut Self {
        if let Some(points) = self.points.take() {
            self.points = Some(chirally_normalize_path_points(&points, center));
        }
        self
    }

    // ---------------------------------------------------------------
    // Tiling.
    // ---------------------------------------------------------------

    /// Fit a segment chain onto the path, paint it, and return the
    /// traversed points.
    ///
    /// Returns `None` when the path is `None` ("no path") or when no
    /// conforming tiling exists under the bounds ("no fit"); callers
    /// tell the cases apart by inspecting [`points`](Self::points).
    pub fn tile<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Vec<CellPos>> {
        self.tile_recorded(rng).0
    }

    /// [`tile`](Self::tile), additionally reporting search counters.
    pub fn tile_recorded<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> (Option<Vec<CellPos>>, SearchStats) {
        let Some(points) = self.points.as_deref() else {
            return (None, SearchStats::default());
        };

        // Unset terminal directions derive from the path's own steps;
        // a loop's end direction matches its departure so the seam
        // closes with compatible labels.
        let first_step = Direction::from_vec(points[1] - points[0])
            .expect("path steps are unit offsets");
        let last_step = if is_loop(points) {
            first_step
        } else {
            Direction::from_vec(points[points.len() - 1] - points[points.len() - 2])
                .expect("path steps are unit offsets")
        };
        let start_label = self.start.resolved_label(first_step);
        let end_label = self.end.resolved_label(last_step);

        let max_skip = if self.max_skip > 0 {
            self.max_skip
        } else {
            2 * self.max_deviation + 1
        };

        let (geometry, local) =
            PathGeometry::build(points, self.max_deviation, max_skip, self.min_separation);
        let path_start = local[0];
        let path_end = local[local.len() - 1];

        let mut searcher = Searcher::new(
            &geometry,
            &self.segments,
            &start_label,
            &end_label,
            path_start,
            path_end,
        );
        let result = match searcher.run() {
            Some(best) => Some(searcher.traceback(&mut *self.map, rng, best)),
            None => None,
        };
        (result, searcher.stats)
    }
}
