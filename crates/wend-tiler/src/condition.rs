//! Pure path-point conditioning transforms.
//!
//! Every function here maps a point sequence to a point sequence (or a
//! verdict) without touching a map or a catalog; [`TilingPath`]
//! delegates to these from its chainable conditioners.
//!
//! A conforming path is a sequence of cells where consecutive points
//! differ by a non-diagonal unit offset, with no repeats; a loop repeats
//! its first point as its last.
//!
//! [`TilingPath`]: crate::path::TilingPath

use std::collections::HashSet;
use wend_core::{CellPos, CellRect, CellVec, Direction};

/// Whether `points` closes back on its first point.
pub fn is_loop(points: &[CellPos]) -> bool {
    points.len() >= 2 && points[0] == points[points.len() - 1]
}

/// Validate a candidate path.
///
/// Returns false when `points` is empty, shorter than 2 (3 for loops),
/// repeats a point (other than the loop closer), or contains a step
/// that is not a non-diagonal unit offset. Total and deterministic.
pub fn validate_path_points(points: &[CellPos]) -> bool {
    if points.is_empty() {
        return false;
    }
    let looped = is_loop(points);
    if points.len() < if looped { 3 } else { 2 } {
        return false;
    }

    let ring_len = if looped {
        points.len() - 1
    } else {
        points.len()
    };
    let mut seen = HashSet::with_capacity(ring_len);
    if !points[..ring_len].iter().all(|p| seen.insert(*p)) {
        return false;
    }

    points.windows(2).all(|pair| {
        matches!(
            Direction::from_vec(pair[1] - pair[0]),
            Some(d) if !d.is_diagonal()
        )
    })
}

/// Extend a non-loop path beyond both endpoints along its own momentum.
///
/// The travel direction over the first (last) `min(inertial_range,
/// len - 1)` points is snapped to the nearest cardinal; `extension_length`
/// points march backward from the first point and forward from the last.
/// Loops pass through unchanged.
///
/// # Panics
///
/// Panics when `extension_length` is negative or `inertial_range` is
/// not positive.
pub fn inertially_extend_path_points(
    points: &[CellPos],
    extension_length: i32,
    inertial_range: i32,
) -> Vec<CellPos> {
    assert!(extension_length >= 0, "extension length must be >= 0");
    assert!(inertial_range >= 1, "inertial range must be >= 1");
    if is_loop(points) || points.is_empty() {
        return points.to_vec();
    }

    let len = points.len();
    let window = (inertial_range as usize).min(len - 1);
    let first = points[0];
    let last = points[len - 1];

    // Snapped travel directions over the inertial windows. The window
    // spans distinct points, so the snap cannot fail.
    let head = Direction::closest_cardinal(points[window] - first)
        .expect("inertial window has distinct endpoints");
    let tail = Direction::closest_cardinal(last - points[len - 1 - window])
        .expect("inertial window has distinct endpoints");

    let mut out = Vec::with_capacity(len + 2 * extension_length as usize);
    for i in (1..=extension_length).rev() {
        out.push(first - head.offset() * i);
    }
    out.extend_from_slice(points);
    for i in 1..=extension_length {
        out.push(last + tail.offset() * i);
    }
    out
}

/// Extend a non-loop path off the map where it terminates on a map edge.
///
/// An endpoint lying on exactly one edge of `bounds` (not a corner)
/// gains `extension_length` points marching outward along that edge's
/// outward normal. Corner and interior endpoints, and loops, pass
/// through unchanged.
pub fn extend_path_points_at_edges(
    points: &[CellPos],
    extension_length: i32,
    bounds: CellRect,
) -> Vec<CellPos> {
    assert!(extension_length >= 0, "extension length must be >= 0");
    if is_loop(points) || points.is_empty() {
        return points.to_vec();
    }

    let normal = |pos: CellPos| -> Option<CellVec> {
        let mut edges: Vec<CellVec> = Vec::with_capacity(2);
        if pos.x == bounds.min.x {
            edges.push(CellVec::new(-1, 0));
        }
        if pos.x == bounds.max.x - 1 {
            edges.push(CellVec::new(1, 0));
        }
        if pos.y == bounds.min.y {
            edges.push(CellVec::new(0, -1));
        }
        if pos.y == bounds.max.y - 1 {
            edges.push(CellVec::new(0, 1));
        }
        match edges.as_slice() {
            [n] => Some(*n),
            _ => None,
        }
    };

    let first = points[0];
    let last = points[points.len() - 1];
    let mut out = Vec::with_capacity(points.len() + 2 * extension_length as usize);
    if let Some(n) = normal(first) {
        for i in (1..=extension_length).rev() {
            out.push(first + n * i);
        }
    }
    out.extend_from_slice(points);
    if let Some(n) = normal(last) {
        for i in 1..=extension_length {
            out.push(last + n * i);
        }
    }
    out
}

/// Rotate a loop so the start/end join falls mid-straight.
///
/// Walks the ring, finds the bends (transitions between x-motion and
/// y-motion), and rotates the longest straight's midpoint to the front.
/// A seam away from any bend keeps the arrival and departure directions
/// equal, which terminal derivation relies on. Non-loops pass through
/// unchanged.
pub fn optimize_loop_path_points(points: &[CellPos]) -> Vec<CellPos> {
    if !is_loop(points) {
        return points.to_vec();
    }

    let ring = &points[..points.len() - 1];
    let m = ring.len();
    let step_is_horizontal =
        |from: usize, to: usize| -> bool { ring[to].x != ring[from].x };

    let mut bends: Vec<usize> = Vec::new();
    for i in 0..m {
        let inbound = step_is_horizontal((i + m - 1) % m, i);
        let outbound = step_is_horizontal(i, (i + 1) % m);
        if inbound != outbound {
            bends.push(i);
        }
    }
    if bends.len() < 2 {
        return points.to_vec();
    }

    // Ties between equally long straights resolve on the midpoint cell
    // itself, so the winner does not depend on the current rotation and
    // a second pass lands on the same seam.
    let mut midpoint = 0;
    let mut best: Option<(usize, (i32, i32))> = None;
    for (j, &b) in bends.iter().enumerate() {
        let next = bends[(j + 1) % bends.len()];
        let gap = (next + m - b) % m;
        let mid = (b + gap / 2) % m;
        let key = (gap, (-ring[mid].y, -ring[mid].x));
        if best.map_or(true, |k| key > k) {
            best = Some(key);
            midpoint = mid;
        }
    }

    let mut out = Vec::with_capacity(points.len());
    out.extend_from_slice(&ring[midpoint..]);
    out.extend_from_slice(&ring[..midpoint]);
    out.push(ring[midpoint]);
    out
}

/// Trim `shrink_by` points from each end of a non-loop path.
///
/// Returns `None` when trimming would leave fewer than `minimum_length`
/// points. Loops are never trimmed; only the length check applies.
///
/// # Panics
///
/// Panics when `minimum_length <= 1`; such a request is a programming
/// error, not a degenerate path.
pub fn shrink_path_points(
    points: &[CellPos],
    shrink_by: usize,
    minimum_length: usize,
) -> Option<Vec<CellPos>> {
    assert!(
        minimum_length > 1,
        "minimum length must be at least 2, got {minimum_length}"
    );
    if is_loop(points) {
        return (points.len() >= minimum_length).then(|| points.to_vec());
    }
    if points.len() < 2 * shrink_by + minimum_length {
        return None;
    }
    Some(points[shrink_by..points.len() - shrink_by].to_vec())
}

/// Orientation key for the zero-cross tie-break: squared distance from
/// the center, then absolute polar angle, then raw components.
fn chirality_key(v: CellVec) -> (i64, f64, i32, i32) {
    let angle = f64::from(v.y).atan2(f64::from(v.x)).abs();
    (v.len_squared(), angle, v.y, v.x)
}

/// Normalize a path's sense of rotation, reversing it when needed.
///
/// Loops: the in/out edges at the top-left-most ring point (minimum
/// `y`, then minimum `x`) must turn clockwise (positive cross product
/// on the y-down lattice). Non-loops: the endpoints measured from
/// `center` must wind non-negatively; an exactly collinear pair is
/// ordered by [`chirality_key`]. Idempotent, and reversal-stable: a
/// reversed input normalizes to the same output.
pub fn chirally_normalize_path_points(points: &[CellPos], center: CellPos) -> Vec<CellPos> {
    if points.len() < 2 {
        return points.to_vec();
    }

    let reversed = |pts: &[CellPos]| pts.iter().rev().copied().collect::<Vec<_>>();

    if is_loop(points) {
        let ring = &points[..points.len() - 1];
        let m = ring.len();
        let top_left = (0..m)
            .min_by_key(|&i| (ring[i].y, ring[i].x))
            .expect("loop ring is non-empty");
        let inbound = ring[top_left] - ring[(top_left + m - 1) % m];
        let outbound = ring[(top_left + 1) % m] - ring[top_left];
        if inbound.cross(outbound) < 0 {
            return reversed(points);
        }
        return points.to_vec();
    }

    let a = points[0] - center;
    let b = points[points.len() - 1] - center;
    let cross = a.cross(b);
    if cross < 0 {
        return reversed(points);
    }
    if cross == 0 && chirality_key(a) > chirality_key(b) {
        return reversed(points);
    }
    points.to_vec()
}

/// Keep each path only when it shares no cell with a previously kept
/// one. Order preserving and idempotent.
pub fn retain_disjoint_paths(paths: impl IntoIterator<Item = Vec<CellPos>>) -> Vec<Vec<CellPos>> {
    let mut used: HashSet<CellPos> = HashSet::new();
    let mut kept = Vec::new();
    for path in paths {
        if path.iter().any(|p| used.contains(p)) {
            continue;
        }
        used.extend(path.iter().copied());
        kept.push(path);
    }
    kept
}
