//! Base types for disease state representation.
//!
//! This module provides the foundational types of the epistrain library:
//! the per-strain health state of a host and the cross-strain interaction
//! matrix that couples transmission between strains.

mod interaction;
mod state;

pub use interaction::{InteractionMatrix, InteractionSpec};
pub use state::HealthState;
