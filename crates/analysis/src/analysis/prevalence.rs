//! Prevalence and compartment counts over time.

use epistrain_sim::base::HealthState;
use epistrain_sim::simulation::Population;
use rayon::prelude::*;

/// Per-strain compartment sizes in one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StateCounts {
    pub susceptible: usize,
    pub exposed: usize,
    pub infected: usize,
    pub recovered: usize,
}

impl StateCounts {
    /// Total hosts counted; equals the snapshot's population size.
    pub fn total(&self) -> usize {
        self.susceptible + self.exposed + self.infected + self.recovered
    }
}

/// Count the compartments of `strain` in one snapshot.
pub fn state_counts(population: &Population, strain: usize) -> StateCounts {
    let mut counts = StateCounts::default();
    for ind in population.individuals() {
        match ind.state(strain) {
            HealthState::Susceptible => counts.susceptible += 1,
            HealthState::Exposed => counts.exposed += 1,
            HealthState::Infected => counts.infected += 1,
            HealthState::Recovered => counts.recovered += 1,
        }
    }
    counts
}

/// Fraction of hosts currently infectious for `strain` (0.0 for an empty
/// population).
pub fn prevalence(population: &Population, strain: usize) -> f64 {
    if population.is_empty() {
        return 0.0;
    }
    population.count_infected(strain) as f64 / population.size() as f64
}

/// Prevalence of `strain` in every snapshot of a run.
pub fn infection_trajectory(snapshots: &[Population], strain: usize) -> Vec<f64> {
    snapshots
        .par_iter()
        .map(|snap| prevalence(snap, strain))
        .collect()
}
