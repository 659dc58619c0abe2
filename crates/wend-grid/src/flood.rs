//! Generic multi-seed BFS flood fill.
//!
//! The driver owns the frontier and the bounds test; per-cell policy
//! lives in the caller's filler callback. Returning `Some(next)`
//! propagates `next` to every spread neighbor, `None` stops the wave at
//! that cell. The filler is responsible for revisit rejection, so a
//! cell may be offered more than once (e.g. from seeds with differing
//! ranges).

use std::collections::VecDeque;
use wend_core::{CellPos, CellVec, Direction};

/// The 8-neighborhood spread used by the tiler's fills.
pub const SPREAD_8: [CellVec; 8] = [
    Direction::Right.offset(),
    Direction::RightDown.offset(),
    Direction::Down.offset(),
    Direction::LeftDown.offset(),
    Direction::Left.offset(),
    Direction::LeftUp.offset(),
    Direction::Up.offset(),
    Direction::RightUp.offset(),
];

/// Breadth-first fill over a `width * height` grid from multiple seeds.
///
/// Seeds are offered to `filler` in the order given, then the wave
/// proceeds in FIFO order: with uniform seed values this visits cells
/// in non-decreasing distance from the seed set. Out-of-bounds
/// neighbors are dropped by the driver; out-of-bounds seeds are
/// ignored.
pub fn flood_fill<R, F>(
    width: i32,
    height: i32,
    seeds: impl IntoIterator<Item = (CellPos, R)>,
    spread: &[CellVec],
    mut filler: F,
) where
    R: Copy,
    F: FnMut(CellPos, R) -> Option<R>,
{
    let in_bounds =
        |pos: CellPos| pos.x >= 0 && pos.x < width && pos.y >= 0 && pos.y < height;

    let mut queue: VecDeque<(CellPos, R)> = seeds
        .into_iter()
        .filter(|&(pos, _)| in_bounds(pos))
        .collect();

    while let Some((pos, value)) = queue.pop_front() {
        let Some(next) = filler(pos, value) else {
            continue;
        };
        for &step in spread {
            let neighbor = pos + step;
            if in_bounds(neighbor) {
                queue.push_back((neighbor, next));
            }
        }
    }
}
