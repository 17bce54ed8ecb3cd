//! # Analysis Crate
//!
//! Post-processing tools for epistrain snapshot sequences: imperfect-
//! detection sampling of the kind a field ecologist would perform, and
//! prevalence summaries over time. Everything here consumes the immutable
//! snapshots emitted by the simulation engine and never touches engine
//! internals.

pub mod analysis;

pub use analysis::sampling::{detection_matrix, SamplingError, SamplingScheme};
pub use analysis::prevalence::{infection_trajectory, prevalence, state_counts, StateCounts};
