//! Epidemic module providing the per-step stochastic operators.
//!
//! This module implements the disease processes applied to the population
//! each step:
//! - **Model**: validated compartmental models (SI, SIR, SEIR, SEIRS)
//! - **Transmission**: frequency-dependent exposure with cross-strain
//!   interaction multipliers
//! - **Progression**: latency escape, recovery, immunity loss
//! - **Mortality**: background and disease-induced deaths via the shared
//!   per-step removal mask
//! - **Demography**: reproduction of mature hosts
//! - **Introduction**: scheduled seeding of strains into living hosts

pub mod demography;
pub mod introduction;
pub mod model;
pub mod mortality;
pub mod progression;
pub mod transmission;

pub use introduction::IntroductionPolicy;
pub use model::DiseaseModel;
