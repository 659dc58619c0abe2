//! Randomized optimal traceback and template painting.
//!
//! After the forward search, every cost-optimal chain is recoverable by
//! walking backward from the end terminal: a predecessor is any
//! admissible segment whose start-cell cost plus its own score lands
//! exactly on the remaining cost. One predecessor is chosen uniformly
//! at random per step, so equally good tilings are sampled evenly;
//! with a fixed RNG seed the walk is deterministic.

use crate::search::{Searcher, MAX_COST};
use crate::geometry::OVER_DEVIATION;
use rand::Rng;
use smallvec::SmallVec;
use wend_core::{CellPos, TileMap};

impl<'a> Searcher<'a> {
    /// Walk back from the end terminal, painting each chosen template
    /// and collecting the traversed points in map coordinates.
    ///
    /// `best` must be the finite cost returned by the forward search.
    ///
    /// # Panics
    ///
    /// Panics when no cost-optimal predecessor exists at some step;
    /// the forward search guarantees at least one, so this indicates a
    /// lost invariant.
    pub(crate) fn traceback<M, R>(&mut self, map: &mut M, rng: &mut R, best: i32) -> Vec<CellPos>
    where
        M: TileMap,
        R: Rng + ?Sized,
    {
        let origin = self.geometry.origin();
        let mut result = vec![self.path_end + origin];

        // The start slot was left at MAX_COST so a loop's shared
        // start/end cell could not short-circuit the forward search;
        // termination against it is legal now.
        self.costs[self.start_type][self.path_start] = 0;

        let mut to = self.path_end;
        let mut to_type = self.end_type;
        let mut to_cost = best;
        loop {
            let mut candidates: SmallVec<[(usize, i32); 8]> = SmallVec::new();
            for k in 0..self.by_end[to_type].len() {
                let si = self.by_end[to_type][k];
                let (moves, start_type) = {
                    let s = &self.segments[si];
                    (s.moves, s.start_type)
                };
                let from = to - moves;
                {
                    let deviation = self.geometry.deviation();
                    if !deviation.contains(from) || deviation[from] == OVER_DEVIATION {
                        continue;
                    }
                }
                let score = self.score_segment(si, from);
                if score == MAX_COST {
                    continue;
                }
                if self.costs[start_type][from] == to_cost - score {
                    candidates.push((si, score));
                }
            }
            assert!(
                !candidates.is_empty(),
                "traceback found no cost-optimal predecessor at {to} (remaining cost {to_cost})"
            );

            let (si, score) = candidates[rng.gen_range(0..candidates.len())];
            let seg = &self.segments[si];
            let from = to - seg.moves;

            let template = &self.catalog.templates()[seg.template as usize];
            template.paint_onto(map, from - seg.offset + origin);

            // The last point was already emitted by the successor step.
            for i in (0..seg.relative_points.len() - 1).rev() {
                result.push(from + seg.relative_points[i] + origin);
            }

            to_cost -= score;
            to_type = seg.start_type;
            to = from;
            if to == self.path_start {
                break;
            }
        }

        result.reverse();
        result
    }
}
