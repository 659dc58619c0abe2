//! Best-first search over the `(x, y, connection-type)` cost lattice.
//!
//! Terminal type labels are interned to integers on first sight, giving
//! each registered type a flat cost matrix. The frontier is a
//! [`PriorityArray`] over every `(type, cell)` slot; popping a slot
//! relaxes every permitted segment starting with its type, then raises
//! the slot to [`MAX_COST`] so it can never be selected again. There is
//! no separate visited set.
//!
//! Segment admissibility and cost live in [`Searcher::score_segment`]:
//! terminal-type gating, the loop anti-wrap rule, per-point deviation
//! and progress-skip validation, and monotonic progression, with the
//! summed deviation of the segment's trailing points as the cost.

use crate::geometry::{exceeds_skip, PathGeometry, OVER_DEVIATION};
use indexmap::IndexSet;
use smallvec::SmallVec;
use wend_core::{CellPos, CellVec, Direction, PermittedSegments, TemplateCatalog};
use wend_grid::{Matrix, PriorityArray};

/// Sentinel cost: not admissible / not reached.
pub const MAX_COST: i32 = i32::MAX;

/// Counters describing one search invocation.
///
/// Returned by [`TilingPath::tile_recorded`]; the plain `tile` entry
/// point discards them.
///
/// [`TilingPath::tile_recorded`]: crate::path::TilingPath::tile_recorded
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Frontier slots popped before termination.
    pub cells_popped: u64,
    /// Segment placements scored.
    pub segments_scored: u64,
    /// Segment placements rejected as inadmissible.
    pub segments_rejected: u64,
    /// Cost-table improvements written.
    pub cost_updates: u64,
    /// Cost of the accepted tiling, when one exists.
    pub best_cost: Option<i32>,
}

/// A permitted segment precomputed for search: interned terminal types,
/// points re-based to the segment's first point, and the net move.
#[derive(Clone, Debug)]
pub(crate) struct TilingSegment {
    /// Index of the owning template within the catalog.
    pub template: u32,
    pub start_type: usize,
    pub end_type: usize,
    /// Net displacement `points[last] - points[0]`.
    pub moves: CellVec,
    /// Offset of the segment's first point within the template.
    pub offset: CellVec,
    /// Points re-based so the first is `(0, 0)`.
    pub relative_points: Vec<CellVec>,
    /// Per-step direction codes; scoring walks these.
    pub directions: SmallVec<[Direction; 8]>,
}

/// Scratch state for a single tiling invocation.
///
/// Owns the cost lattice and the interned type table; released when the
/// invocation returns.
pub(crate) struct Searcher<'a> {
    pub(crate) catalog: &'a TemplateCatalog,
    pub(crate) geometry: &'a PathGeometry,
    pub(crate) segments: Vec<TilingSegment>,
    pub(crate) by_start: Vec<Vec<usize>>,
    pub(crate) by_end: Vec<Vec<usize>>,
    /// Whether a type id may appear at an interior joint.
    pub(crate) inner_types: Vec<bool>,
    pub(crate) start_type: usize,
    pub(crate) end_type: usize,
    pub(crate) path_start: CellPos,
    pub(crate) path_end: CellPos,
    /// One cost matrix per registered type id.
    pub(crate) costs: Vec<Matrix<i32>>,
    pub(crate) stats: SearchStats,
}

impl<'a> Searcher<'a> {
    /// Register types and segments for a conditioned path.
    ///
    /// `start_label` and `end_label` are the path's resolved terminal
    /// labels; `path_start` and `path_end` are in local (geometry)
    /// coordinates.
    pub(crate) fn new(
        geometry: &'a PathGeometry,
        permitted: &PermittedSegments<'a>,
        start_label: &str,
        end_label: &str,
        path_start: CellPos,
        path_end: CellPos,
    ) -> Self {
        let catalog = permitted.catalog();

        let mut types: IndexSet<String> = IndexSet::new();
        let start_type = types.insert_full(start_label.to_owned()).0;
        let end_type = types.insert_full(end_label.to_owned()).0;

        let mut segments = Vec::new();
        for r in permitted.all() {
            let (_, seg) = catalog.resolve(r);
            let seg_start = types.insert_full(seg.start().to_owned()).0;
            let seg_end = types.insert_full(seg.end().to_owned()).0;
            let points = seg.points();
            let base = points[0];
            let relative_points: Vec<CellVec> = points.iter().map(|&p| p - base).collect();
            segments.push(TilingSegment {
                template: r.template,
                start_type: seg_start,
                end_type: seg_end,
                moves: *relative_points.last().expect("segments have >= 2 points"),
                offset: base,
                relative_points,
                directions: SmallVec::from_slice(seg.directions()),
            });
        }

        let type_count = types.len();
        let mut by_start = vec![Vec::new(); type_count];
        let mut by_end = vec![Vec::new(); type_count];
        for (i, s) in segments.iter().enumerate() {
            by_start[s.start_type].push(i);
            by_end[s.end_type].push(i);
        }

        // Interior joints may only use types that appear on the
        // terminals of inner-permitted segments.
        let mut inner_types = vec![false; type_count];
        for r in permitted.inner() {
            let (_, seg) = catalog.resolve(*r);
            if let Some(id) = types.get_index_of(seg.start()) {
                inner_types[id] = true;
            }
            if let Some(id) = types.get_index_of(seg.end()) {
                inner_types[id] = true;
            }
        }

        let w = geometry.deviation().width();
        let h = geometry.deviation().height();
        Self {
            catalog,
            geometry,
            segments,
            by_start,
            by_end,
            inner_types,
            start_type,
            end_type,
            path_start,
            path_end,
            costs: vec![Matrix::new(w, h, MAX_COST); type_count],
            stats: SearchStats::default(),
        }
    }

    fn cells(&self) -> usize {
        self.geometry.deviation().len()
    }

    fn encode(&self, type_id: usize, pos: CellPos) -> usize {
        type_id * self.cells() + self.geometry.deviation().index_of(pos)
    }

    fn decode(&self, slot: usize) -> (usize, CellPos) {
        let cells = self.cells();
        let w = self.geometry.deviation().width();
        let cell = (slot % cells) as i32;
        (slot / cells, CellPos::new(cell % w, cell / w))
    }

    /// Run the search to completion.
    ///
    /// Returns the best cost at the end terminal, or `None` when the
    /// path is unfittable.
    pub(crate) fn run(&mut self) -> Option<i32> {
        let mut frontier = PriorityArray::new(self.costs.len() * self.cells(), MAX_COST);
        self.update_from(&mut frontier, self.path_start, self.start_type, 0);
        loop {
            let slot = frontier.min_index();
            let cost = frontier.get(slot);
            if cost == MAX_COST {
                break;
            }
            let (type_id, pos) = self.decode(slot);
            self.stats.cells_popped += 1;
            if pos == self.path_end {
                break;
            }
            self.update_from(&mut frontier, pos, type_id, cost);
        }
        let best = self.costs[self.end_type][self.path_end];
        self.stats.best_cost = (best != MAX_COST).then_some(best);
        self.stats.best_cost
    }

    /// Relax every permitted segment out of `(from, from_type)`, then
    /// retire the slot from the frontier.
    fn update_from(
        &mut self,
        frontier: &mut PriorityArray,
        from: CellPos,
        from_type: usize,
        from_cost: i32,
    ) {
        for k in 0..self.by_start[from_type].len() {
            let si = self.by_start[from_type][k];
            let (moves, end_type) = {
                let s = &self.segments[si];
                (s.moves, s.end_type)
            };
            let to = from + moves;
            {
                let deviation = self.geometry.deviation();
                if !deviation.contains(to) || deviation[to] == OVER_DEVIATION {
                    continue;
                }
            }
            let score = self.score_segment(si, from);
            if score == MAX_COST {
                continue;
            }
            let to_cost = from_cost + score;
            if to_cost < self.costs[end_type][to] {
                self.costs[end_type][to] = to_cost;
                frontier.set(self.encode(end_type, to), to_cost);
                self.stats.cost_updates += 1;
            }
        }
        frontier.set(self.encode(from_type, from), MAX_COST);
    }

    /// Score placing segment `si` with its first point at `from`.
    ///
    /// Returns the segment's deviation cost, or [`MAX_COST`] when the
    /// placement is inadmissible. Both endpoints must already be known
    /// in bounds.
    pub(crate) fn score_segment(&mut self, si: usize, from: CellPos) -> i32 {
        self.stats.segments_scored += 1;
        let score = self.score_inner(si, from);
        if score == MAX_COST {
            self.stats.segments_rejected += 1;
        }
        score
    }

    fn score_inner(&self, si: usize, from: CellPos) -> i32 {
        let seg = &self.segments[si];
        let g = self.geometry;

        // Terminal-type gating: the unique path terminals at the path
        // ends, inner-permitted types everywhere else.
        if from == self.path_start {
            if seg.start_type != self.start_type {
                return MAX_COST;
            }
        } else if !self.inner_types[seg.start_type] {
            return MAX_COST;
        }
        let to = from + seg.moves;
        if to == self.path_end {
            if seg.end_type != self.end_type {
                return MAX_COST;
            }
        } else if !self.inner_types[seg.end_type] {
            return MAX_COST;
        }

        // Loop anti-wrap: forbid interior joints that cross back over
        // the seam. The high_progress == 0 exception is tied to the
        // seam sitting at progress 0 after loop rotation; preserve it
        // exactly.
        if g.is_loop() && to != self.path_end {
            let low_from = g.low_progress()[from];
            let high_to = g.high_progress()[to];
            if low_from > high_to && high_to != 0 {
                return MAX_COST;
            }
        }

        let max_skip = g.max_skip();
        let deviation = g.deviation();
        let n = seg.relative_points.len();
        let mut low_acc = 0i32;
        let mut high_acc = 0i32;
        let mut deviation_acc = 0i32;
        for i in 0..n {
            let p = from + seg.relative_points[i];
            if !deviation.contains(p) || deviation[p] == OVER_DEVIATION {
                return MAX_COST;
            }
            if i + 1 < n {
                let q = p + seg.directions[i].offset();
                if !deviation.contains(q) || deviation[q] == OVER_DEVIATION {
                    return MAX_COST;
                }
                let low_step = g.progress(g.low_progress()[p], g.low_progress()[q]);
                let high_step = g.progress(g.high_progress()[p], g.high_progress()[q]);
                if exceeds_skip(low_step, max_skip) || exceeds_skip(high_step, max_skip) {
                    return MAX_COST;
                }
                low_acc += low_step;
                high_acc += high_step;
            }
            if i > 0 {
                // The first point is excluded: the previous segment
                // already paid for its own tail.
                deviation_acc += deviation[p];
            }
        }

        // The path may pause but may not regress.
        if low_acc < 0 || high_acc < 0 {
            return MAX_COST;
        }
        deviation_acc
    }
}
