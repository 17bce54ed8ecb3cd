//! Builder pattern for creating simulations.
//!
//! Provides a fluent API for configuring and creating simulations with
//! sensible defaults and comprehensive validation.

use crate::base::{HealthState, InteractionMatrix};
use crate::epidemic::{DiseaseModel, IntroductionPolicy};
pub use crate::errors::BuilderError;
use crate::simulation::{Population, Simulation, SimulationParameters};

/// Builder for constructing [`Simulation`] instances with a fluent API.
///
/// # Examples
///
/// ```
/// use epistrain_sim::epidemic::{DiseaseModel, IntroductionPolicy};
/// use epistrain_sim::simulation::SimulationBuilder;
///
/// // Single SI strain seeded into one host.
/// let sim = SimulationBuilder::new()
///     .population_size(100)
///     .time_steps(10)
///     .strain(DiseaseModel::si(0.8, 0.0).unwrap())
///     .seed_infections(0, 1)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// // Three interacting strains introduced by the scheduler.
/// let sim = SimulationBuilder::new()
///     .population_size(500)
///     .time_steps(50)
///     .strain(DiseaseModel::sir(0.6, 0.01, 0.2).unwrap())
///     .strain(DiseaseModel::sir(0.5, 0.02, 0.1).unwrap())
///     .strain(DiseaseModel::seirs(0.4, 0.0, 0.3, 3, 0.05).unwrap())
///     .base_mortality(0.01)
///     .fecundity(0.2)
///     .age_maturity(3)
///     .introduction(IntroductionPolicy::Simultaneous)
///     .seed(7)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct SimulationBuilder {
    // Required parameters
    population_size: Option<usize>,
    time_steps: Option<usize>,
    models: Vec<DiseaseModel>,

    // Optional initial state
    initial_population: Option<Population>,
    initial_infections: Vec<(usize, usize)>,

    // Parameters with defaults
    interactions: Option<InteractionMatrix>, // Default: neutral
    base_mortality: f64,                     // Default: 0.0
    fecundity: f64,                          // Default: 0.0 (closed population)
    age_maturity: u32,                       // Default: 1
    introduction: Option<IntroductionPolicy>, // Default: None policy
    seed: Option<u64>,                       // Default: None (random)
}

impl Default for SimulationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationBuilder {
    /// Create a new simulation builder with default values.
    pub fn new() -> Self {
        Self {
            population_size: None,
            time_steps: None,
            models: Vec::new(),
            initial_population: None,
            initial_infections: Vec::new(),
            interactions: None,
            base_mortality: 0.0,
            fecundity: 0.0,
            age_maturity: 1,
            introduction: None,
            seed: None,
        }
    }

    /// Set the initial population size (required unless an explicit initial
    /// population is supplied).
    pub fn population_size(mut self, size: usize) -> Self {
        self.population_size = Some(size);
        self
    }

    /// Set the number of snapshots to produce, including the initial one
    /// (required).
    pub fn time_steps(mut self, time_steps: usize) -> Self {
        self.time_steps = Some(time_steps);
        self
    }

    /// Add a strain with its disease model. Strains are indexed in the
    /// order they are added.
    pub fn strain(mut self, model: DiseaseModel) -> Self {
        self.models.push(model);
        self
    }

    /// Set the cross-strain interaction matrix (default: neutral, no
    /// interaction).
    pub fn interactions(mut self, interactions: InteractionMatrix) -> Self {
        self.interactions = Some(interactions);
        self
    }

    /// Set the per-step background mortality probability (default: 0.0).
    pub fn base_mortality(mut self, rate: f64) -> Self {
        self.base_mortality = rate;
        self
    }

    /// Set the expected offspring per mature host per step (default: 0.0).
    pub fn fecundity(mut self, fecundity: f64) -> Self {
        self.fecundity = fecundity;
        self
    }

    /// Set the age from which hosts reproduce (default: 1).
    pub fn age_maturity(mut self, age: u32) -> Self {
        self.age_maturity = age;
        self
    }

    /// Set the strain introduction policy (default:
    /// [`IntroductionPolicy::None`]).
    pub fn introduction(mut self, policy: IntroductionPolicy) -> Self {
        self.introduction = Some(policy);
        self
    }

    /// Seed `count` hosts as initially infectious for `strain`.
    ///
    /// Seeds are placed deterministically at the start of the host list, so
    /// the initial condition does not depend on the RNG.
    pub fn seed_infections(mut self, strain: usize, count: usize) -> Self {
        self.initial_infections.push((strain, count));
        self
    }

    /// Supply an explicit initial population instead of a fully susceptible
    /// one. Overrides [`population_size`](Self::population_size).
    pub fn initial_population(mut self, population: Population) -> Self {
        self.initial_population = Some(population);
        self
    }

    /// Set the random seed for reproducibility (default: None = random).
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build and validate the simulation.
    pub fn build(self) -> Result<Simulation, BuilderError> {
        if self.models.is_empty() {
            return Err(BuilderError::MissingRequired("strain (disease model)"));
        }
        let time_steps = self
            .time_steps
            .ok_or(BuilderError::MissingRequired("time_steps"))?;
        let strain_count = self.models.len();

        let interactions = self
            .interactions
            .unwrap_or_else(|| InteractionMatrix::neutral(strain_count));

        let mut params = SimulationParameters::new(
            self.models,
            interactions,
            self.base_mortality,
            self.fecundity,
            self.age_maturity,
            self.introduction.unwrap_or(IntroductionPolicy::None),
            time_steps,
        )?;
        if let Some(seed) = self.seed {
            params = params.with_seed(seed);
        }

        let mut population = match self.initial_population {
            Some(population) => {
                if population.strain_count() != strain_count {
                    return Err(BuilderError::InvalidParameter(format!(
                        "initial population tracks {} strains, expected {strain_count}",
                        population.strain_count()
                    )));
                }
                population
            }
            None => {
                let size = self
                    .population_size
                    .ok_or(BuilderError::MissingRequired("population_size"))?;
                Population::susceptible(size, strain_count)
            }
        };

        for (strain, count) in self.initial_infections {
            if strain >= strain_count {
                return Err(BuilderError::InvalidParameter(format!(
                    "seed_infections strain index {strain} out of range for {strain_count} strains"
                )));
            }
            if count > population.size() {
                return Err(BuilderError::InvalidParameter(format!(
                    "seed_infections count {count} exceeds population size {}",
                    population.size()
                )));
            }
            for host in 0..count {
                population
                    .get_mut(host)
                    .expect("index checked against population size")
                    .set_state(strain, HealthState::Infected);
            }
        }

        Simulation::new(population, params).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn si() -> DiseaseModel {
        DiseaseModel::si(0.5, 0.0).unwrap()
    }

    #[test]
    fn test_builder_minimal() {
        let sim = SimulationBuilder::new()
            .population_size(10)
            .time_steps(5)
            .strain(si())
            .build()
            .unwrap();

        assert_eq!(sim.population().size(), 10);
        assert_eq!(sim.params().time_steps(), 5);
        assert_eq!(sim.params().strain_count(), 1);
    }

    #[test]
    fn test_builder_missing_strain() {
        let err = SimulationBuilder::new()
            .population_size(10)
            .time_steps(5)
            .build()
            .unwrap_err();
        assert!(matches!(err, BuilderError::MissingRequired("strain (disease model)")));
    }

    #[test]
    fn test_builder_missing_time_steps() {
        let err = SimulationBuilder::new()
            .population_size(10)
            .strain(si())
            .build()
            .unwrap_err();
        assert!(matches!(err, BuilderError::MissingRequired("time_steps")));
    }

    #[test]
    fn test_builder_missing_population_size() {
        let err = SimulationBuilder::new()
            .time_steps(5)
            .strain(si())
            .build()
            .unwrap_err();
        assert!(matches!(err, BuilderError::MissingRequired("population_size")));
    }

    #[test]
    fn test_builder_seed_infections() {
        let sim = SimulationBuilder::new()
            .population_size(10)
            .time_steps(5)
            .strain(si())
            .strain(si())
            .seed_infections(1, 3)
            .build()
            .unwrap();

        assert_eq!(sim.population().count_infected(0), 0);
        assert_eq!(sim.population().count_infected(1), 3);
    }

    #[test]
    fn test_builder_seed_infections_out_of_range_strain() {
        let err = SimulationBuilder::new()
            .population_size(10)
            .time_steps(5)
            .strain(si())
            .seed_infections(2, 1)
            .build()
            .unwrap_err();
        assert!(matches!(err, BuilderError::InvalidParameter(_)));
    }

    #[test]
    fn test_builder_seed_infections_too_many() {
        let err = SimulationBuilder::new()
            .population_size(2)
            .time_steps(5)
            .strain(si())
            .seed_infections(0, 3)
            .build()
            .unwrap_err();
        assert!(matches!(err, BuilderError::InvalidParameter(_)));
    }

    #[test]
    fn test_builder_rejects_invalid_parameters() {
        let err = SimulationBuilder::new()
            .population_size(10)
            .time_steps(5)
            .strain(si())
            .base_mortality(1.5)
            .build()
            .unwrap_err();
        assert!(matches!(err, BuilderError::InvalidParameter(_)));
        assert!(err.to_string().contains("base_mortality"));
    }

    #[test]
    fn test_builder_interaction_dimension_checked() {
        let err = SimulationBuilder::new()
            .population_size(10)
            .time_steps(5)
            .strain(si())
            .interactions(InteractionMatrix::neutral(3))
            .build()
            .unwrap_err();
        assert!(matches!(err, BuilderError::InvalidParameter(_)));
    }

    #[test]
    fn test_builder_explicit_initial_population() {
        let mut population = Population::susceptible(4, 1);
        population.get_mut(2).unwrap().set_state(0, HealthState::Infected);

        let sim = SimulationBuilder::new()
            .time_steps(5)
            .strain(si())
            .initial_population(population)
            .build()
            .unwrap();

        assert_eq!(sim.population().size(), 4);
        assert_eq!(sim.population().count_infected(0), 1);
    }

    #[test]
    fn test_builder_initial_population_strain_mismatch() {
        let population = Population::susceptible(4, 2);
        let err = SimulationBuilder::new()
            .time_steps(5)
            .strain(si())
            .initial_population(population)
            .build()
            .unwrap_err();
        assert!(matches!(err, BuilderError::InvalidParameter(_)));
    }
}
