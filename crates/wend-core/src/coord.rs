//! Integer cell-lattice positions, displacements, and rectangles.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// A position on the cell lattice.
///
/// Positions and displacements are kept as distinct types so that
/// position-plus-position typos fail to compile; subtraction of two
/// positions yields a [`CellVec`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos {
    /// Column, increasing rightward.
    pub x: i32,
    /// Row, increasing downward.
    pub y: i32,
}

/// A displacement between two cell positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellVec {
    /// Horizontal component.
    pub x: i32,
    /// Vertical component.
    pub y: i32,
}

impl CellPos {
    /// Create a position from its components.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The lattice origin `(0, 0)`.
    pub const ZERO: Self = Self::new(0, 0);
}

impl CellVec {
    /// Create a displacement from its components.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The zero displacement.
    pub const ZERO: Self = Self::new(0, 0);

    /// Chebyshev (L-inf) length: `max(|x|, |y|)`.
    ///
    /// Matches graph distance on an 8-connected grid, where a diagonal
    /// step costs 1.
    pub fn chebyshev_len(self) -> i32 {
        self.x.abs().max(self.y.abs())
    }

    /// Squared Euclidean length, widened to avoid overflow.
    pub fn len_squared(self) -> i64 {
        let x = i64::from(self.x);
        let y = i64::from(self.y);
        x * x + y * y
    }

    /// 2D cross product `self.x * other.y - self.y * other.x`, widened.
    ///
    /// Positive for a clockwise turn from `self` to `other` in screen
    /// coordinates (y down).
    pub fn cross(self, other: CellVec) -> i64 {
        i64::from(self.x) * i64::from(other.y) - i64::from(self.y) * i64::from(other.x)
    }
}

impl Add<CellVec> for CellPos {
    type Output = CellPos;
    fn add(self, rhs: CellVec) -> CellPos {
        CellPos::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign<CellVec> for CellPos {
    fn add_assign(&mut self, rhs: CellVec) {
        *self = *self + rhs;
    }
}

impl Sub<CellVec> for CellPos {
    type Output = CellPos;
    fn sub(self, rhs: CellVec) -> CellPos {
        CellPos::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign<CellVec> for CellPos {
    fn sub_assign(&mut self, rhs: CellVec) {
        *self = *self - rhs;
    }
}

impl Sub for CellPos {
    type Output = CellVec;
    fn sub(self, rhs: CellPos) -> CellVec {
        CellVec::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add for CellVec {
    type Output = CellVec;
    fn add(self, rhs: CellVec) -> CellVec {
        CellVec::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for CellVec {
    type Output = CellVec;
    fn sub(self, rhs: CellVec) -> CellVec {
        CellVec::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for CellVec {
    type Output = CellVec;
    fn neg(self) -> CellVec {
        CellVec::new(-self.x, -self.y)
    }
}

impl Mul<i32> for CellVec {
    type Output = CellVec;
    fn mul(self, rhs: i32) -> CellVec {
        CellVec::new(self.x * rhs, self.y * rhs)
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Display for CellVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.x, self.y)
    }
}

/// Axis-aligned rectangle of cells, min-inclusive and max-exclusive.
///
/// The half-open convention matches flat row-major storage: a rect of
/// size `w * h` covers `x` in `[min.x, max.x)` and `y` in `[min.y, max.y)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellRect {
    /// Inclusive minimum corner.
    pub min: CellPos,
    /// Exclusive maximum corner.
    pub max: CellPos,
}

impl CellRect {
    /// Create a rect from corners. `min` must not exceed `max` on either axis.
    pub fn new(min: CellPos, max: CellPos) -> Self {
        debug_assert!(min.x <= max.x && min.y <= max.y);
        Self { min, max }
    }

    /// Create a rect from an origin and a non-negative size.
    pub fn with_size(min: CellPos, size: CellVec) -> Self {
        Self::new(min, min + size)
    }

    /// Smallest rect covering all of `points`, or `None` when empty.
    pub fn bounding(points: &[CellPos]) -> Option<Self> {
        let first = *points.first()?;
        let mut min = first;
        let mut max = first;
        for &p in &points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Self::new(min, max + CellVec::new(1, 1)))
    }

    /// Width (x extent).
    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    /// Height (y extent).
    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    /// Size as a displacement.
    pub fn size(&self) -> CellVec {
        self.max - self.min
    }

    /// Whether `pos` lies inside the rect.
    pub fn contains(&self, pos: CellPos) -> bool {
        pos.x >= self.min.x && pos.x < self.max.x && pos.y >= self.min.y && pos.y < self.max.y
    }

    /// Grow the rect by `margin` cells on every side.
    pub fn expand(&self, margin: i32) -> Self {
        let m = CellVec::new(margin, margin);
        Self::new(self.min - m, self.max + m)
    }
}

impl fmt::Display for CellRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.min, self.max)
    }
}
