use crate::base::HealthState;
use serde::{Deserialize, Serialize};

/// One host in the population.
///
/// An `Individual` carries an age (in simulation steps) and one
/// [`HealthState`] per strain, indexed by strain order. Because each
/// (host, strain) pair is a single enum value, a host is always in exactly
/// one compartment per strain. Individuals are created at initialization or
/// by birth, mutated in place by the per-step operators, and dropped when
/// the engine compacts out the dead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Individual {
    /// Age in completed simulation steps
    age: u32,
    /// Disease state for each strain, in strain order
    states: Vec<HealthState>,
}

impl Individual {
    /// Create a host of age 0 that is susceptible to every strain.
    ///
    /// This is both the initialization constructor and the newborn
    /// constructor: births always enter the population fully susceptible.
    pub fn susceptible(strain_count: usize) -> Self {
        Self {
            age: 0,
            states: vec![HealthState::Susceptible; strain_count],
        }
    }

    /// Create a host with an explicit age and per-strain states.
    pub fn with_states(age: u32, states: Vec<HealthState>) -> Self {
        Self { age, states }
    }

    /// Age in completed simulation steps.
    #[inline]
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Advance the host's age by one step.
    #[inline]
    pub fn increment_age(&mut self) {
        self.age += 1;
    }

    /// Number of strains this host tracks.
    #[inline]
    pub fn strain_count(&self) -> usize {
        self.states.len()
    }

    /// Disease state for `strain`.
    #[inline]
    pub fn state(&self, strain: usize) -> HealthState {
        self.states[strain]
    }

    /// Overwrite the disease state for `strain`.
    #[inline]
    pub fn set_state(&mut self, strain: usize, state: HealthState) {
        self.states[strain] = state;
    }

    /// All per-strain states, in strain order.
    #[inline]
    pub fn states(&self) -> &[HealthState] {
        &self.states
    }

    /// Return true if the host is currently infectious for `strain`.
    #[inline]
    pub fn is_infected_with(&self, strain: usize) -> bool {
        self.states[strain].is_infected()
    }

    /// Return true if the host is infectious for more than one strain.
    pub fn is_coinfected(&self) -> bool {
        self.states.iter().filter(|s| s.is_infected()).count() > 1
    }
}
