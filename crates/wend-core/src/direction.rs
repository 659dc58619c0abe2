//! 8-neighbor compass directions on the cell lattice.

use crate::coord::CellVec;
use std::fmt;

/// One of the eight neighbor directions, encoded 0..=7 clockwise from
/// rightward. Opposite directions differ by 4, so reversal is `code ^ 4`.
///
/// "Down" is increasing `y` (screen convention). The absent-direction
/// sentinel is `Option::<Direction>::None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Direction {
    /// `(+1, 0)`
    Right = 0,
    /// `(+1, +1)`
    RightDown = 1,
    /// `(0, +1)`
    Down = 2,
    /// `(-1, +1)`
    LeftDown = 3,
    /// `(-1, 0)`
    Left = 4,
    /// `(-1, -1)`
    LeftUp = 5,
    /// `(0, -1)`
    Up = 6,
    /// `(+1, -1)`
    RightUp = 7,
}

/// Unit offsets indexed by direction code.
const OFFSETS: [CellVec; 8] = [
    CellVec::new(1, 0),
    CellVec::new(1, 1),
    CellVec::new(0, 1),
    CellVec::new(-1, 1),
    CellVec::new(-1, 0),
    CellVec::new(-1, -1),
    CellVec::new(0, -1),
    CellVec::new(1, -1),
];

/// Label suffixes used in terminal type strings, e.g. `"Beach.R"`.
const LABELS: [&str; 8] = ["R", "RD", "D", "LD", "L", "LU", "U", "RU"];

impl Direction {
    /// All directions in code order.
    pub const ALL: [Direction; 8] = [
        Direction::Right,
        Direction::RightDown,
        Direction::Down,
        Direction::LeftDown,
        Direction::Left,
        Direction::LeftUp,
        Direction::Up,
        Direction::RightUp,
    ];

    /// The four cardinal directions.
    pub const CARDINALS: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// Integer code `0..=7`.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Direction for a code, or `None` when out of range.
    pub fn from_code(code: u8) -> Option<Direction> {
        Self::ALL.get(code as usize).copied()
    }

    /// The opposite direction (`code ^ 4`).
    pub fn reverse(self) -> Direction {
        Self::ALL[(self.code() ^ 4) as usize]
    }

    /// Unit offset of this direction.
    pub const fn offset(self) -> CellVec {
        OFFSETS[self as usize]
    }

    /// Exact conversion from a unit 8-neighbor offset.
    ///
    /// Returns `None` for the zero vector and for any non-unit offset.
    pub fn from_vec(v: CellVec) -> Option<Direction> {
        Self::ALL.into_iter().find(|d| d.offset() == v)
    }

    /// The cardinal direction nearest to an arbitrary displacement.
    ///
    /// The dominant axis wins; on an exact diagonal the horizontal
    /// component wins. Returns `None` for the zero vector.
    pub fn closest_cardinal(v: CellVec) -> Option<Direction> {
        if v == CellVec::ZERO {
            return None;
        }
        if v.x.abs() >= v.y.abs() {
            Some(if v.x > 0 {
                Direction::Right
            } else {
                Direction::Left
            })
        } else {
            Some(if v.y > 0 {
                Direction::Down
            } else {
                Direction::Up
            })
        }
    }

    /// Whether the direction has both axis components.
    pub const fn is_diagonal(self) -> bool {
        self as u8 & 1 == 1
    }

    /// Label suffix used in terminal type strings.
    pub const fn label(self) -> &'static str {
        LABELS[self as usize]
    }

    /// Bit for direction-set masks.
    pub const fn mask_bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_is_xor_four() {
        for d in Direction::ALL {
            assert_eq!(d.reverse().code(), d.code() ^ 4);
            assert_eq!(d.reverse().offset(), -d.offset());
            assert_eq!(d.reverse().reverse(), d);
        }
    }

    #[test]
    fn offsets_are_unit_and_distinct() {
        for d in Direction::ALL {
            assert_eq!(d.offset().chebyshev_len(), 1);
            assert_eq!(Direction::from_vec(d.offset()), Some(d));
        }
        assert_eq!(Direction::from_vec(CellVec::ZERO), None);
        assert_eq!(Direction::from_vec(CellVec::new(2, 0)), None);
    }

    #[test]
    fn closest_cardinal_picks_dominant_axis() {
        assert_eq!(
            Direction::closest_cardinal(CellVec::new(5, 2)),
            Some(Direction::Right)
        );
        assert_eq!(
            Direction::closest_cardinal(CellVec::new(-1, -4)),
            Some(Direction::Up)
        );
        // Exact diagonal: horizontal wins.
        assert_eq!(
            Direction::closest_cardinal(CellVec::new(-3, 3)),
            Some(Direction::Left)
        );
        assert_eq!(Direction::closest_cardinal(CellVec::ZERO), None);
    }

    #[test]
    fn diagonal_flag_matches_odd_codes() {
        assert!(Direction::RightDown.is_diagonal());
        assert!(!Direction::Down.is_diagonal());
        for d in Direction::CARDINALS {
            assert!(!d.is_diagonal());
        }
    }

    #[test]
    fn labels_round_trip_through_display() {
        assert_eq!(Direction::Right.to_string(), "R");
        assert_eq!(Direction::LeftUp.to_string(), "LU");
        assert_eq!(Direction::Down.label(), "D");
    }
}
