//! # Simulation Crate
//!
//! The `sim` crate provides the core logic for multi-strain epidemic
//! simulations in demographically open host populations. It includes
//! modules for defining hosts and disease states, validated compartmental
//! disease models, per-step epidemic and demographic operators, and the
//! simulation engine that orchestrates them into reproducible runs.

pub mod base;
pub mod epidemic;
pub mod errors;
pub mod host;
pub mod prelude;
pub mod simulation;

pub use base::{HealthState, InteractionMatrix};
pub use host::Individual;
