//! Benchmark profiles for the wend path tiler.
//!
//! Shared by the criterion benches so each measures the same
//! deterministic workload:
//!
//! - [`ring_profile`]: a large rectilinear loop on a square map
//! - [`straight_profile`]: a long straight run for pure chain laying

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use wend::prelude::CellPos;
use wend_test_utils::{rectilinear_ring, straight_points, GridMap};

/// A `width x height` ring anchored two cells into a map padded four
/// cells beyond it on every side.
pub fn ring_profile(width: i32, height: i32) -> (GridMap, Vec<CellPos>) {
    let map = GridMap::new(width + 8, height + 8);
    let ring = rectilinear_ring(CellPos::new(4, 4), width, height);
    (map, ring)
}

/// A straight rightward run of `steps` steps with margin around it.
pub fn straight_profile(steps: usize) -> (GridMap, Vec<CellPos>) {
    let map = GridMap::new(steps as i32 + 8, 9);
    let points = straight_points(CellPos::new(4, 4), wend::prelude::Direction::Right, steps);
    (map, points)
}
