//! Compartmental disease models.
//!
//! Each strain in a simulation follows one of the classic compartmental
//! models of infectious disease dynamics:
//!
//! - **SI**: hosts stay infectious for life (e.g. herpesviruses).
//! - **SIR**: hosts clear the infection and keep lifelong immunity
//!   (e.g. measles-like dynamics).
//! - **SEIR**: adds a latent (exposed) phase between infection and
//!   infectiousness. Latency is modeled as a memoryless per-step escape
//!   probability of `1/latency`, not a fixed-delay timer, so the expected
//!   latent period equals `latency` steps.
//! - **SEIRS**: immunity wanes, returning recovered hosts to the
//!   susceptible pool (e.g. coronaviruses, influenza).
//!
//! A model is a validated, immutable parameter bundle. The variant decides
//! which transitions exist, so a configuration cannot ask for a latent phase
//! without supplying a latency, and transition code dispatches on the
//! variant with an exhaustive match.

use crate::base::HealthState;
pub use crate::errors::ModelError;
use serde::{Deserialize, Serialize};

/// A validated per-strain disease model.
///
/// All rates are per step. `transmission` scales the frequency-dependent
/// force of infection; `mortality` is the per-step death probability of an
/// infectious host (additional to background mortality); `recovery` is the
/// per-step clearance probability; `waning` is the per-step probability of
/// losing immunity (SEIRS only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum DiseaseModel {
    Si {
        transmission: f64,
        mortality: f64,
    },
    Sir {
        transmission: f64,
        mortality: f64,
        recovery: f64,
    },
    Seir {
        transmission: f64,
        mortality: f64,
        recovery: f64,
        latency: u32,
    },
    Seirs {
        transmission: f64,
        mortality: f64,
        recovery: f64,
        latency: u32,
        waning: f64,
    },
}

fn check_rate(name: &'static str, value: f64) -> Result<f64, ModelError> {
    if !(0.0..=1.0).contains(&value) || !value.is_finite() {
        return Err(ModelError::InvalidRate(name, value));
    }
    Ok(value)
}

fn check_latency(latency: u32) -> Result<u32, ModelError> {
    if latency == 0 {
        return Err(ModelError::InvalidLatency(latency));
    }
    Ok(latency)
}

impl DiseaseModel {
    /// Create a validated SI model.
    pub fn si(transmission: f64, mortality: f64) -> Result<Self, ModelError> {
        Ok(Self::Si {
            transmission: check_rate("transmission", transmission)?,
            mortality: check_rate("mortality", mortality)?,
        })
    }

    /// Create a validated SIR model.
    pub fn sir(transmission: f64, mortality: f64, recovery: f64) -> Result<Self, ModelError> {
        Ok(Self::Sir {
            transmission: check_rate("transmission", transmission)?,
            mortality: check_rate("mortality", mortality)?,
            recovery: check_rate("recovery", recovery)?,
        })
    }

    /// Create a validated SEIR model. `latency` is the expected latent
    /// period in steps and must be at least 1.
    pub fn seir(
        transmission: f64,
        mortality: f64,
        recovery: f64,
        latency: u32,
    ) -> Result<Self, ModelError> {
        Ok(Self::Seir {
            transmission: check_rate("transmission", transmission)?,
            mortality: check_rate("mortality", mortality)?,
            recovery: check_rate("recovery", recovery)?,
            latency: check_latency(latency)?,
        })
    }

    /// Create a validated SEIRS model.
    pub fn seirs(
        transmission: f64,
        mortality: f64,
        recovery: f64,
        latency: u32,
        waning: f64,
    ) -> Result<Self, ModelError> {
        Ok(Self::Seirs {
            transmission: check_rate("transmission", transmission)?,
            mortality: check_rate("mortality", mortality)?,
            recovery: check_rate("recovery", recovery)?,
            latency: check_latency(latency)?,
            waning: check_rate("waning", waning)?,
        })
    }

    /// Conventional name of the model variant.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Si { .. } => "SI",
            Self::Sir { .. } => "SIR",
            Self::Seir { .. } => "SEIR",
            Self::Seirs { .. } => "SEIRS",
        }
    }

    /// Per-step transmission rate.
    #[inline]
    pub fn transmission(&self) -> f64 {
        match *self {
            Self::Si { transmission, .. }
            | Self::Sir { transmission, .. }
            | Self::Seir { transmission, .. }
            | Self::Seirs { transmission, .. } => transmission,
        }
    }

    /// Per-step disease-induced mortality of infectious hosts.
    #[inline]
    pub fn mortality(&self) -> f64 {
        match *self {
            Self::Si { mortality, .. }
            | Self::Sir { mortality, .. }
            | Self::Seir { mortality, .. }
            | Self::Seirs { mortality, .. } => mortality,
        }
    }

    /// Per-step recovery probability. SI hosts never recover.
    #[inline]
    pub fn recovery(&self) -> f64 {
        match *self {
            Self::Si { .. } => 0.0,
            Self::Sir { recovery, .. }
            | Self::Seir { recovery, .. }
            | Self::Seirs { recovery, .. } => recovery,
        }
    }

    /// Expected latent period in steps, if the model has a latent phase.
    #[inline]
    pub fn latency(&self) -> Option<u32> {
        match *self {
            Self::Si { .. } | Self::Sir { .. } => None,
            Self::Seir { latency, .. } | Self::Seirs { latency, .. } => Some(latency),
        }
    }

    /// Per-step immunity-loss probability. Zero unless SEIRS.
    #[inline]
    pub fn waning(&self) -> f64 {
        match *self {
            Self::Seirs { waning, .. } => waning,
            _ => 0.0,
        }
    }

    /// The state a successful transmission puts a susceptible host into:
    /// `Exposed` for models with a latent phase, `Infected` otherwise.
    #[inline]
    pub fn exposure_target(&self) -> HealthState {
        match self {
            Self::Si { .. } | Self::Sir { .. } => HealthState::Infected,
            Self::Seir { .. } | Self::Seirs { .. } => HealthState::Exposed,
        }
    }

    /// True if recovered hosts can re-enter the susceptible pool.
    #[inline]
    pub fn immunity_wanes(&self) -> bool {
        matches!(self, Self::Seirs { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_si_valid() {
        let model = DiseaseModel::si(0.8, 0.1).unwrap();
        assert_eq!(model.name(), "SI");
        assert_eq!(model.transmission(), 0.8);
        assert_eq!(model.mortality(), 0.1);
        assert_eq!(model.recovery(), 0.0);
        assert_eq!(model.latency(), None);
        assert_eq!(model.waning(), 0.0);
        assert_eq!(model.exposure_target(), HealthState::Infected);
        assert!(!model.immunity_wanes());
    }

    #[test]
    fn test_sir_valid() {
        let model = DiseaseModel::sir(0.5, 0.0, 0.2).unwrap();
        assert_eq!(model.name(), "SIR");
        assert_eq!(model.recovery(), 0.2);
        assert_eq!(model.exposure_target(), HealthState::Infected);
    }

    #[test]
    fn test_seir_valid() {
        let model = DiseaseModel::seir(0.5, 0.05, 0.2, 4).unwrap();
        assert_eq!(model.name(), "SEIR");
        assert_eq!(model.latency(), Some(4));
        assert_eq!(model.exposure_target(), HealthState::Exposed);
        assert!(!model.immunity_wanes());
    }

    #[test]
    fn test_seirs_valid() {
        let model = DiseaseModel::seirs(0.5, 0.05, 0.2, 4, 0.1).unwrap();
        assert_eq!(model.name(), "SEIRS");
        assert_eq!(model.waning(), 0.1);
        assert!(model.immunity_wanes());
    }

    #[test]
    fn test_rejects_out_of_range_rates() {
        assert!(DiseaseModel::si(1.5, 0.0).is_err());
        assert!(DiseaseModel::si(-0.1, 0.0).is_err());
        assert!(DiseaseModel::si(0.5, 1.01).is_err());
        assert!(DiseaseModel::sir(0.5, 0.0, f64::NAN).is_err());
        assert!(DiseaseModel::seirs(0.5, 0.0, 0.2, 3, 2.0).is_err());
    }

    #[test]
    fn test_rejects_zero_latency() {
        let err = DiseaseModel::seir(0.5, 0.0, 0.2, 0).unwrap_err();
        assert!(matches!(err, ModelError::InvalidLatency(0)));
        assert!(DiseaseModel::seirs(0.5, 0.0, 0.2, 0, 0.1).is_err());
    }

    #[test]
    fn test_boundary_rates_accepted() {
        assert!(DiseaseModel::si(0.0, 0.0).is_ok());
        assert!(DiseaseModel::si(1.0, 1.0).is_ok());
        assert!(DiseaseModel::seirs(1.0, 0.0, 1.0, 1, 1.0).is_ok());
    }

    #[test]
    fn test_serde_roundtrip() {
        let model = DiseaseModel::seirs(0.5, 0.05, 0.2, 4, 0.1).unwrap();
        let json = serde_json::to_string(&model).unwrap();
        assert!(json.contains("\"model\":\"seirs\""));
        let back: DiseaseModel = serde_json::from_str(&json).unwrap();
        assert_eq!(model, back);
    }
}
