//! Simulation parameters and validation.
//!
//! A [`SimulationParameters`] value is the complete, validated recipe for a
//! run: one disease model per strain, the cross-strain interaction matrix,
//! the demographic rates, the introduction policy and the horizon. All
//! validation happens here, once, at construction time. The engine assumes
//! a well-formed configuration and performs no recoverable error handling
//! during a run.

use crate::base::InteractionMatrix;
use crate::epidemic::{DiseaseModel, IntroductionPolicy};
pub use crate::errors::ParameterError;
use serde::{Deserialize, Serialize};

/// Validated, immutable configuration for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// One disease model per strain, in strain order
    models: Vec<DiseaseModel>,
    /// Cross-strain transmission multipliers
    interactions: InteractionMatrix,
    /// Per-step background death probability, applied once per step
    base_mortality: f64,
    /// Expected offspring per mature host per step
    fecundity: f64,
    /// Age (in steps) from which hosts reproduce
    age_maturity: u32,
    /// When the engine introduces strains
    introduction: IntroductionPolicy,
    /// Number of snapshots a run produces (including the initial one)
    time_steps: usize,
    /// Optional RNG seed for reproducibility
    seed: Option<u64>,
}

impl SimulationParameters {
    /// Create and validate a parameter set.
    ///
    /// # Errors
    /// Returns an error if no models are given, the interaction matrix
    /// dimension does not match the strain count, any rate is out of range,
    /// `age_maturity` is 0, `time_steps` is 0, or any strain's disease
    /// mortality plus the base mortality exceeds 1.0 (a host cannot carry
    /// more than one unit of death probability per step).
    pub fn new(
        models: Vec<DiseaseModel>,
        interactions: InteractionMatrix,
        base_mortality: f64,
        fecundity: f64,
        age_maturity: u32,
        introduction: IntroductionPolicy,
        time_steps: usize,
    ) -> Result<Self, ParameterError> {
        if models.is_empty() {
            return Err(ParameterError::NoStrains);
        }
        if interactions.dim() != models.len() {
            return Err(ParameterError::DimensionMismatch {
                strains: models.len(),
                matrix: interactions.dim(),
            });
        }
        if !(0.0..=1.0).contains(&base_mortality) || !base_mortality.is_finite() {
            return Err(ParameterError::InvalidRate("base_mortality", base_mortality));
        }
        if fecundity < 0.0 || !fecundity.is_finite() {
            return Err(ParameterError::InvalidRate("fecundity", fecundity));
        }
        if age_maturity == 0 {
            return Err(ParameterError::InvalidMaturityAge(age_maturity));
        }
        if time_steps == 0 {
            return Err(ParameterError::InvalidTimeSteps(time_steps));
        }
        for (strain, model) in models.iter().enumerate() {
            let total = base_mortality + model.mortality();
            if total > 1.0 {
                return Err(ParameterError::MortalityBudget { strain, total });
            }
        }

        Ok(Self {
            models,
            interactions,
            base_mortality,
            fecundity,
            age_maturity,
            introduction,
            time_steps,
            seed: None,
        })
    }

    /// Set the RNG seed for reproducible runs (default: seeded from entropy).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of strains.
    #[inline]
    pub fn strain_count(&self) -> usize {
        self.models.len()
    }

    /// All disease models, in strain order.
    pub fn models(&self) -> &[DiseaseModel] {
        &self.models
    }

    /// Disease model for `strain`.
    #[inline]
    pub fn model(&self, strain: usize) -> &DiseaseModel {
        &self.models[strain]
    }

    /// The cross-strain interaction matrix.
    pub fn interactions(&self) -> &InteractionMatrix {
        &self.interactions
    }

    /// Per-step background death probability.
    #[inline]
    pub fn base_mortality(&self) -> f64 {
        self.base_mortality
    }

    /// Expected offspring per mature host per step.
    #[inline]
    pub fn fecundity(&self) -> f64 {
        self.fecundity
    }

    /// Age from which hosts reproduce.
    #[inline]
    pub fn age_maturity(&self) -> u32 {
        self.age_maturity
    }

    /// The strain introduction policy.
    #[inline]
    pub fn introduction(&self) -> IntroductionPolicy {
        self.introduction
    }

    /// Number of snapshots a run produces, including the initial one.
    #[inline]
    pub fn time_steps(&self) -> usize {
        self.time_steps
    }

    /// The configured RNG seed, if any.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn si() -> DiseaseModel {
        DiseaseModel::si(0.5, 0.1).unwrap()
    }

    fn valid() -> SimulationParameters {
        SimulationParameters::new(
            vec![si(), si()],
            InteractionMatrix::neutral(2),
            0.05,
            0.2,
            2,
            IntroductionPolicy::None,
            50,
        )
        .unwrap()
    }

    #[test]
    fn test_parameters_valid() {
        let params = valid();
        assert_eq!(params.strain_count(), 2);
        assert_eq!(params.base_mortality(), 0.05);
        assert_eq!(params.fecundity(), 0.2);
        assert_eq!(params.age_maturity(), 2);
        assert_eq!(params.time_steps(), 50);
        assert_eq!(params.introduction(), IntroductionPolicy::None);
        assert_eq!(params.seed(), None);
    }

    #[test]
    fn test_parameters_with_seed() {
        let params = valid().with_seed(42);
        assert_eq!(params.seed(), Some(42));
    }

    #[test]
    fn test_rejects_no_strains() {
        let err = SimulationParameters::new(
            Vec::new(),
            InteractionMatrix::neutral(1),
            0.0,
            0.0,
            1,
            IntroductionPolicy::None,
            10,
        )
        .unwrap_err();
        assert!(matches!(err, ParameterError::NoStrains));
    }

    #[test]
    fn test_rejects_dimension_mismatch() {
        let err = SimulationParameters::new(
            vec![si()],
            InteractionMatrix::neutral(3),
            0.0,
            0.0,
            1,
            IntroductionPolicy::None,
            10,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ParameterError::DimensionMismatch { strains: 1, matrix: 3 }
        ));
    }

    #[test]
    fn test_rejects_bad_base_mortality() {
        for bad in [-0.1, 1.1, f64::NAN] {
            let err = SimulationParameters::new(
                vec![si()],
                InteractionMatrix::neutral(1),
                bad,
                0.0,
                1,
                IntroductionPolicy::None,
                10,
            )
            .unwrap_err();
            assert!(matches!(err, ParameterError::InvalidRate("base_mortality", _)));
        }
    }

    #[test]
    fn test_rejects_negative_fecundity() {
        let err = SimulationParameters::new(
            vec![si()],
            InteractionMatrix::neutral(1),
            0.0,
            -1.0,
            1,
            IntroductionPolicy::None,
            10,
        )
        .unwrap_err();
        assert!(matches!(err, ParameterError::InvalidRate("fecundity", _)));
    }

    #[test]
    fn test_fecundity_above_one_is_valid() {
        // Fecundity is a Poisson mean, not a probability.
        let params = SimulationParameters::new(
            vec![si()],
            InteractionMatrix::neutral(1),
            0.0,
            3.5,
            1,
            IntroductionPolicy::None,
            10,
        );
        assert!(params.is_ok());
    }

    #[test]
    fn test_rejects_zero_maturity_age() {
        let err = SimulationParameters::new(
            vec![si()],
            InteractionMatrix::neutral(1),
            0.0,
            0.0,
            0,
            IntroductionPolicy::None,
            10,
        )
        .unwrap_err();
        assert!(matches!(err, ParameterError::InvalidMaturityAge(0)));
    }

    #[test]
    fn test_rejects_zero_time_steps() {
        let err = SimulationParameters::new(
            vec![si()],
            InteractionMatrix::neutral(1),
            0.0,
            0.0,
            1,
            IntroductionPolicy::None,
            0,
        )
        .unwrap_err();
        assert!(matches!(err, ParameterError::InvalidTimeSteps(0)));
    }

    #[test]
    fn test_rejects_mortality_budget_overflow() {
        // 0.6 base + 0.5 disease mortality = 1.1 for strain 1.
        let models = vec![
            DiseaseModel::si(0.5, 0.2).unwrap(),
            DiseaseModel::si(0.5, 0.5).unwrap(),
        ];
        let err = SimulationParameters::new(
            models,
            InteractionMatrix::neutral(2),
            0.6,
            0.0,
            1,
            IntroductionPolicy::None,
            10,
        )
        .unwrap_err();
        assert!(matches!(err, ParameterError::MortalityBudget { strain: 1, .. }));
    }

    #[test]
    fn test_mortality_budget_exactly_one_is_valid() {
        let models = vec![DiseaseModel::si(0.5, 0.4).unwrap()];
        let params = SimulationParameters::new(
            models,
            InteractionMatrix::neutral(1),
            0.6,
            0.0,
            1,
            IntroductionPolicy::None,
            10,
        );
        assert!(params.is_ok());
    }

    #[test]
    fn test_serde_roundtrip() {
        let params = valid().with_seed(7);
        let json = serde_json::to_string(&params).unwrap();
        let back: SimulationParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(params, back);
    }
}
