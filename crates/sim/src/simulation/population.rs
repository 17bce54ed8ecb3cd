//! Population management and operations.
//!
//! This module provides the in-memory container for hosts during epidemic
//! simulations, together with the counting and compaction operations the
//! engine and the analysis tools rely on.

use crate::base::HealthState;
use crate::host::Individual;
use serde::{Deserialize, Serialize};

/// An ordered population of hosts sharing a common strain count.
///
/// The engine mutates one working `Population` in place throughout a step
/// and captures an independent clone as the step's snapshot; a snapshot is
/// never touched again after capture. Every host holds exactly one state
/// per strain, and every host tracks the population's strain count; the
/// constructors assert this, and a violation is a programming defect rather
/// than a recoverable error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Population {
    /// The hosts in this population
    individuals: Vec<Individual>,
    /// Number of strains every host tracks
    strain_count: usize,
    /// Step counter (0 = initial population)
    step: usize,
}

impl Population {
    /// Create a new population from hosts.
    ///
    /// # Panics
    /// Panics if any host tracks a different number of strains than
    /// `strain_count`.
    pub fn new(strain_count: usize, individuals: Vec<Individual>) -> Self {
        for (i, ind) in individuals.iter().enumerate() {
            assert_eq!(
                ind.strain_count(),
                strain_count,
                "host {i} tracks {} strains, population expects {strain_count}",
                ind.strain_count()
            );
        }
        Self {
            individuals,
            strain_count,
            step: 0,
        }
    }

    /// Create a population of `size` hosts, age 0, susceptible to all strains.
    pub fn susceptible(size: usize, strain_count: usize) -> Self {
        Self {
            individuals: vec![Individual::susceptible(strain_count); size],
            strain_count,
            step: 0,
        }
    }

    /// Number of strains every host tracks.
    #[inline]
    pub fn strain_count(&self) -> usize {
        self.strain_count
    }

    /// The step this population describes (0 = initial).
    #[inline]
    pub fn step(&self) -> usize {
        self.step
    }

    /// Advance the step counter.
    pub fn increment_step(&mut self) {
        self.step += 1;
    }

    /// Number of hosts in the population.
    #[inline]
    pub fn size(&self) -> usize {
        self.individuals.len()
    }

    /// Check if the population is extinct.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Get all hosts as a slice.
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Get mutable access to the hosts.
    pub fn individuals_mut(&mut self) -> &mut [Individual] {
        &mut self.individuals
    }

    /// Get a specific host by index.
    pub fn get(&self, index: usize) -> Option<&Individual> {
        self.individuals.get(index)
    }

    /// Get a mutable reference to a specific host.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Individual> {
        self.individuals.get_mut(index)
    }

    /// Append a host to the population.
    ///
    /// # Panics
    /// Panics if the host tracks a different number of strains.
    pub fn push(&mut self, individual: Individual) {
        assert_eq!(
            individual.strain_count(),
            self.strain_count,
            "host tracks {} strains, population expects {}",
            individual.strain_count(),
            self.strain_count
        );
        self.individuals.push(individual);
    }

    /// Count hosts whose state for `strain` equals `state`.
    pub fn count_state(&self, strain: usize, state: HealthState) -> usize {
        self.individuals
            .iter()
            .filter(|ind| ind.state(strain) == state)
            .count()
    }

    /// Count hosts currently infectious for `strain`.
    pub fn count_infected(&self, strain: usize) -> usize {
        self.count_state(strain, HealthState::Infected)
    }

    /// Count hosts of reproductive age.
    pub fn count_mature(&self, age_maturity: u32) -> usize {
        self.individuals
            .iter()
            .filter(|ind| ind.age() >= age_maturity)
            .count()
    }

    /// Drop every host whose index is flagged in `removed`, preserving the
    /// relative order of survivors. Returns the number of hosts dropped.
    ///
    /// # Panics
    /// Panics if the mask length does not match the population size.
    pub fn remove_flagged(&mut self, removed: &[bool]) -> usize {
        assert_eq!(
            removed.len(),
            self.individuals.len(),
            "removal mask length {} does not match population size {}",
            removed.len(),
            self.individuals.len()
        );

        let before = self.individuals.len();
        let mut index = 0;
        self.individuals.retain(|_| {
            let keep = !removed[index];
            index += 1;
            keep
        });
        before - self.individuals.len()
    }

    /// Age every host by one step.
    pub fn increment_ages(&mut self) {
        for ind in &mut self.individuals {
            ind.increment_age();
        }
    }
}
