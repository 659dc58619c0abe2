//! Error types for catalog construction.
//!
//! Broken authored data is surfaced when a catalog is built, not when a
//! path is tiled: an unfittable path is an ordinary `None`, never an
//! error, and lost invariants inside the tiler are hard failures.

use crate::coord::CellVec;
use std::error::Error;
use std::fmt;

/// Errors arising from template and segment construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogError {
    /// A template segment has fewer than two points.
    TooFewPoints {
        /// `"start->end"` labels of the offending segment.
        segment: String,
        /// Number of points supplied.
        count: usize,
    },
    /// Two consecutive segment points coincide.
    DuplicatePoint {
        /// `"start->end"` labels of the offending segment.
        segment: String,
        /// Index of the repeated point.
        index: usize,
    },
    /// A segment step is not a unit 8-neighbor offset.
    NonUnitStep {
        /// `"start->end"` labels of the offending segment.
        segment: String,
        /// Index of the step's first point.
        index: usize,
        /// The offending step.
        step: CellVec,
    },
    /// A template's tile list does not match its declared size.
    TileCountMismatch {
        /// The offending template id.
        template: u32,
        /// Declared grid cell count.
        expected: usize,
        /// Tiles actually supplied.
        actual: usize,
    },
    /// Two templates in one catalog share an id.
    DuplicateTemplateId {
        /// The repeated id.
        template: u32,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewPoints { segment, count } => {
                write!(f, "segment '{segment}' has {count} points, needs at least 2")
            }
            Self::DuplicatePoint { segment, index } => {
                write!(f, "segment '{segment}' repeats point {index}")
            }
            Self::NonUnitStep {
                segment,
                index,
                step,
            } => {
                write!(
                    f,
                    "segment '{segment}' step {index} is {step}, not a unit 8-neighbor offset"
                )
            }
            Self::TileCountMismatch {
                template,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "template {template} declares {expected} cells but supplies {actual} tiles"
                )
            }
            Self::DuplicateTemplateId { template } => {
                write!(f, "template id {template} appears more than once")
            }
        }
    }
}

impl Error for CatalogError {}
