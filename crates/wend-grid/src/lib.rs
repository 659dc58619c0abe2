//! Grid storage and traversal primitives for the wend path tiler.
//!
//! Three pieces: dense row-major [`Matrix`] storage addressed by cell
//! position, the [`PriorityArray`] search frontier (a segment tree of
//! minima over a flat priority store), and the generic multi-seed
//! [`flood_fill`] driver shared by the geometry pass and the
//! separation erosion.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod flood;
pub mod matrix;
pub mod priority;

pub use flood::{flood_fill, SPREAD_8};
pub use matrix::Matrix;
pub use priority::PriorityArray;
