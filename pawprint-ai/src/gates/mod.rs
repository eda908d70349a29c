//! Context gates
//!
//! Gates never add probability on their own: the style gate only feeds the
//! final down-weighting, and the impossible-scenario gate only counts a
//! caption claim when technical buckets corroborate it.

pub mod impossible;
pub mod style;

pub use impossible::{evaluate_impossible, ImpossibleOutcome};
pub use style::{estimate_style, StyleHints};
