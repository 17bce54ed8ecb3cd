//! Epidemic analysis tools for epistrain
//!
//! This module provides analysis capabilities over snapshot sequences:
//! - Imperfect-detection sampling (virtual field surveys)
//! - Prevalence and compartment counts over time

pub mod prevalence;
pub mod sampling;

// Re-export commonly used functions
pub use prevalence::{infection_trajectory, prevalence, state_counts, StateCounts};
pub use sampling::{detection_matrix, SamplingScheme};
