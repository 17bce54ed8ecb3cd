//! Simulation engine and population management.
//!
//! This module provides the core simulation loop and population management
//! for multi-strain epidemic simulations.
//!
//! The most commonly used types are re-exported here for convenience:
//!
//! - `Simulation`: the engine that advances the population step by step and
//!   collects one snapshot per step.
//! - `Population`: in-memory container for hosts used during simulation.
//! - `SimulationParameters`: validated, immutable run configuration.
//! - `SimulationBuilder`: fluent builder for constructing `Simulation`
//!   instances with sensible defaults and validation.

pub mod builder;
pub mod engine;
pub mod parameters;
pub mod population;

pub use builder::SimulationBuilder;
pub use engine::{run, Simulation};
pub use parameters::SimulationParameters;
pub use population::Population;
