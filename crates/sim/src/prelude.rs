//! Commonly used imports for convenience.
//!
//! This prelude module provides a convenient way to import the most commonly
//! used types in the epistrain library.
//!
//! # Example
//!
//! ```
//! use epistrain_sim::prelude::*;
//!
//! let model = DiseaseModel::sir(0.5, 0.01, 0.2).unwrap();
//! ```

pub use crate::base::{HealthState, InteractionMatrix, InteractionSpec};
pub use crate::epidemic::{DiseaseModel, IntroductionPolicy};
pub use crate::errors;
pub use crate::host::Individual;
pub use crate::simulation::{Population, Simulation, SimulationBuilder, SimulationParameters};
