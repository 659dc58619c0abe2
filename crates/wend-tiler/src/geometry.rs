//! The geometric conditioning pass.
//!
//! Before the search runs, the path is rasterized into three matrices
//! over a padded bounding box: per-cell `deviation` (8-connected BFS
//! distance to the nearest path point, i.e. Chebyshev distance),
//! and `low_progress`/`high_progress` (the earliest and latest nearby
//! path index). Cells the search must never enter carry the
//! [`OVER_DEVIATION`] sentinel; cells whose progress could not be
//! resolved carry [`INVALID_PROGRESS`].

use crate::condition::is_loop;
use smallvec::SmallVec;
use wend_core::{CellPos, CellRect, CellVec};
use wend_grid::{flood_fill, Matrix, SPREAD_8};

/// Sentinel marking a cell forbidden to the search.
pub const OVER_DEVIATION: i32 = i32::MAX;

/// Sentinel for a cell with no resolvable path progress.
pub const INVALID_PROGRESS: i32 = i32::MAX;

/// Signed shortest progress from one path index to another.
///
/// Non-loops: the raw difference. Loops: the modulo-`modulus` shortest
/// hop, positive forward, negative backward; a hop of exactly half the
/// ring resolves to the opposite sentinel (`forward_limit` when the
/// limits coincide, `i32::MIN` otherwise). An [`INVALID_PROGRESS`]
/// operand on a loop yields 0 against itself and a non-admissible
/// magnitude otherwise, mirroring the raw arithmetic of the non-loop
/// case.
pub(crate) fn signed_progress(looped: bool, modulus: i32, from: i32, to: i32) -> i32 {
    if !looped {
        return to - from;
    }
    if from == INVALID_PROGRESS || to == INVALID_PROGRESS {
        return if from == to { 0 } else { INVALID_PROGRESS };
    }
    let forward_limit = (modulus + 1) / 2;
    let backward_limit = modulus / 2;
    let p = (to - from).rem_euclid(modulus);
    if p < forward_limit {
        p
    } else if p > backward_limit {
        p - modulus
    } else if forward_limit == backward_limit {
        forward_limit
    } else {
        i32::MIN
    }
}

/// Whether a progress hop exceeds the skip bound in magnitude.
pub(crate) fn exceeds_skip(progress: i32, max_skip: i32) -> bool {
    progress.unsigned_abs() > max_skip as u32
}

/// Resolve a cell's progress from its settled neighbors' values.
///
/// Non-loops take the envelope (min low, max high). Loops sort the
/// gathered values around the ring and look for the single backward gap
/// that marks the cluster boundary; fully dispersed values resolve to
/// `None` (invalid).
fn find_low_and_high(
    looped: bool,
    modulus: i32,
    lows: &[i32],
    highs: &[i32],
) -> Option<(i32, i32)> {
    match lows.len() {
        0 => return None,
        1 => return Some((lows[0], highs[0])),
        _ => {}
    }
    if !looped {
        let low = lows.iter().copied().min().expect("non-empty");
        let high = highs.iter().copied().max().expect("non-empty");
        return Some((low, high));
    }

    let mut values: Vec<i32> = lows.iter().chain(highs).copied().collect();
    values.sort_unstable();
    values.dedup();
    if values.len() == 1 {
        return Some((values[0], values[0]));
    }
    for i in 0..values.len() {
        let a = values[i];
        let b = values[(i + 1) % values.len()];
        if signed_progress(true, modulus, a, b) < 0 {
            return Some((b, a));
        }
    }
    None
}

/// The conditioned search space for one tiling invocation.
///
/// Coordinates inside the matrices are local: `local = map - origin`.
pub struct PathGeometry {
    origin: CellVec,
    deviation: Matrix<i32>,
    low_progress: Matrix<i32>,
    high_progress: Matrix<i32>,
    progress_modulus: i32,
    is_loop: bool,
    max_deviation: i32,
    max_skip: i32,
}

impl PathGeometry {
    /// Run the geometry pass for `points`.
    ///
    /// `max_skip` must already be resolved (the `2 * max_deviation + 1`
    /// default applied). Returns the geometry together with the path
    /// translated into local coordinates.
    ///
    /// # Panics
    ///
    /// Panics on an empty path; callers validate first.
    pub fn build(
        points: &[CellPos],
        max_deviation: i32,
        max_skip: i32,
        min_separation: i32,
    ) -> (Self, Vec<CellPos>) {
        assert!(max_deviation >= 0 && max_skip >= 1 && min_separation >= 0);
        let looped = is_loop(points);
        let bounds = CellRect::bounding(points).expect("path must be non-empty");
        let padded = bounds.expand(max_deviation + min_separation);
        let origin = padded.min - CellPos::ZERO;
        let local: Vec<CellPos> = points.iter().map(|&p| p - origin).collect();
        let (w, h) = (padded.width(), padded.height());

        let progress_modulus = if looped {
            points.len() as i32 - 1
        } else {
            points.len() as i32
        };

        let mut deviation = Matrix::new(w, h, OVER_DEVIATION);
        let mut low_progress = Matrix::new(w, h, INVALID_PROGRESS);
        let mut high_progress = Matrix::new(w, h, INVALID_PROGRESS);

        // Path points seed both fills: progress is their own index, and
        // the loop-closing duplicate is skipped.
        for (i, &p) in local.iter().take(progress_modulus as usize).enumerate() {
            low_progress[p] = i as i32;
            high_progress[p] = i as i32;
        }

        let scan_range = max_deviation + min_separation;
        flood_fill(
            w,
            h,
            local
                .iter()
                .take(progress_modulus as usize)
                .map(|&p| (p, 0)),
            &SPREAD_8,
            |pos, d| {
                if deviation[pos] != OVER_DEVIATION {
                    return None;
                }
                deviation[pos] = d;
                if d > 0 {
                    let mut lows: SmallVec<[i32; 8]> = SmallVec::new();
                    let mut highs: SmallVec<[i32; 8]> = SmallVec::new();
                    for step in SPREAD_8 {
                        let n = pos + step;
                        if deviation.contains(n)
                            && deviation[n] < d
                            && low_progress[n] != INVALID_PROGRESS
                        {
                            lows.push(low_progress[n]);
                            highs.push(high_progress[n]);
                        }
                    }
                    if let Some((lo, hi)) =
                        find_low_and_high(looped, progress_modulus, &lows, &highs)
                    {
                        low_progress[pos] = lo;
                        high_progress[pos] = hi;
                    }
                }
                (d < scan_range).then(|| d + 1)
            },
        );

        let mut this = Self {
            origin,
            deviation,
            low_progress,
            high_progress,
            progress_modulus,
            is_loop: looped,
            max_deviation,
            max_skip,
        };
        if min_separation > 0 {
            this.erode_separation(min_separation);
        }
        (this, local)
    }

    /// Exclude cells too close to ambiguous or discontinuous regions.
    ///
    /// Three seed classes: unresolved progress spreads `min_separation`,
    /// a progress shear against any neighbor spreads `min_separation - 1`,
    /// and deviation beyond the bound marks the cell itself. The wave
    /// marks every reached cell except path points.
    fn erode_separation(&mut self, min_separation: i32) {
        let (w, h) = (self.deviation.width(), self.deviation.height());
        let mut seeds: Vec<(CellPos, i32)> = Vec::new();
        for pos in self.deviation.positions() {
            let d = self.deviation[pos];
            if d == OVER_DEVIATION {
                continue;
            }
            if self.low_progress[pos] == INVALID_PROGRESS {
                seeds.push((pos, min_separation));
            } else if self.has_progress_shear(pos) {
                seeds.push((pos, min_separation - 1));
            }
            if d > self.max_deviation {
                seeds.push((pos, 0));
            }
        }

        let mut reached = Matrix::new(w, h, -1);
        let deviation = &mut self.deviation;
        flood_fill(w, h, seeds, &SPREAD_8, |pos, range| {
            if reached[pos] >= range {
                return None;
            }
            reached[pos] = range;
            let d = deviation[pos];
            if d != 0 && d != OVER_DEVIATION {
                deviation[pos] = OVER_DEVIATION;
            }
            (range > 0).then(|| range - 1)
        });
    }

    /// Whether any valid neighbor's progress jumps past the skip bound.
    fn has_progress_shear(&self, pos: CellPos) -> bool {
        for step in SPREAD_8 {
            let n = pos + step;
            if !self.deviation.contains(n)
                || self.deviation[n] == OVER_DEVIATION
                || self.low_progress[n] == INVALID_PROGRESS
            {
                continue;
            }
            let dl = self.progress(self.low_progress[pos], self.low_progress[n]);
            let dh = self.progress(self.high_progress[pos], self.high_progress[n]);
            if exceeds_skip(dl, self.max_skip) || exceeds_skip(dh, self.max_skip) {
                return true;
            }
        }
        false
    }

    /// Signed progress between two path indices under this geometry.
    pub fn progress(&self, from: i32, to: i32) -> i32 {
        signed_progress(self.is_loop, self.progress_modulus, from, to)
    }

    /// Translation from local matrix coordinates back to map coordinates.
    pub fn origin(&self) -> CellVec {
        self.origin
    }

    /// Per-cell Chebyshev distance to the nearest path point, or
    /// [`OVER_DEVIATION`] for excluded cells.
    pub fn deviation(&self) -> &Matrix<i32> {
        &self.deviation
    }

    /// Earliest nearby path index per cell.
    pub fn low_progress(&self) -> &Matrix<i32> {
        &self.low_progress
    }

    /// Latest nearby path index per cell.
    pub fn high_progress(&self) -> &Matrix<i32> {
        &self.high_progress
    }

    /// Ring length for loops, path length otherwise.
    pub fn progress_modulus(&self) -> i32 {
        self.progress_modulus
    }

    /// Whether the conditioned path is a loop.
    pub fn is_loop(&self) -> bool {
        self.is_loop
    }

    /// The resolved per-step progress-skip bound.
    pub fn max_skip(&self) -> i32 {
        self.max_skip
    }

    /// The perpendicular deviation bound.
    pub fn max_deviation(&self) -> i32 {
        self.max_deviation
    }
}
