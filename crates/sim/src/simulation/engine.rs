//! Simulation engine for multi-strain epidemics.
//!
//! This module provides the main simulation loop that orchestrates strain
//! introductions, demographic turnover and per-strain disease dynamics
//! across discrete time steps.
//!
//! Each step runs in a fixed, significant order:
//!
//! 1. scheduled strain introductions
//! 2. births (using the pre-step age distribution)
//! 3. per-strain activity flags
//! 4. background mortality, once across the whole living population
//! 5. per strain, in ascending index order: transmission → latency →
//!    recovery → waning → disease mortality, all operating against the
//!    removal mask accumulated so far
//! 6. one compaction removing every flagged host
//! 7. aging of the survivors
//! 8. an immutable snapshot of the resulting population
//!
//! The engine owns a single seedable RNG; all sequential draws consume it
//! in the order above, and the transmission pass spawns per-host RNGs from
//! it, so a fixed seed reproduces a run bit for bit.

use crate::epidemic::{demography, introduction, mortality, progression, transmission};
use crate::errors::ParameterError;
use crate::host::Individual;
use crate::simulation::{Population, SimulationParameters};
use log::{debug, trace};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Main simulation engine.
///
/// Owns the working population, the validated parameters, the introduction
/// schedule and the snapshot history. The initial population is the first
/// snapshot; every call to [`step`](Self::step) produces one more, until
/// `time_steps` snapshots exist.
#[derive(Debug)]
pub struct Simulation {
    /// Working population, mutated in place during a step
    population: Population,
    /// Validated run configuration
    params: SimulationParameters,
    /// Per-strain introduction step, drawn once at construction
    schedule: Vec<Option<usize>>,
    /// One immutable snapshot per completed step
    history: Vec<Population>,
    /// Random number generator (Xoshiro256++, explicitly seeded)
    rng: Xoshiro256PlusPlus,
}

impl Simulation {
    /// Create a new simulation from an initial population and parameters.
    ///
    /// The initial population is recorded as the first snapshot. The
    /// introduction schedule is drawn here, so two simulations built from
    /// the same seed see the same schedule.
    ///
    /// # Errors
    /// Returns an error if the population's strain count does not match the
    /// configured models.
    pub fn new(
        initial: Population,
        params: SimulationParameters,
    ) -> Result<Self, ParameterError> {
        if initial.strain_count() != params.strain_count() {
            return Err(ParameterError::PopulationMismatch {
                population: initial.strain_count(),
                parameters: params.strain_count(),
            });
        }

        let mut rng = match params.seed() {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_seed(rand::rng().random()),
        };

        let schedule = introduction::draw_schedule(
            params.introduction(),
            params.strain_count(),
            params.time_steps(),
            &mut rng,
        );
        debug!("introduction schedule: {schedule:?}");

        let history = vec![initial.clone()];
        Ok(Self {
            population: initial,
            params,
            schedule,
            history,
            rng,
        })
    }

    /// The working population.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// The run configuration.
    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    /// Snapshots emitted so far, starting with the initial population.
    pub fn snapshots(&self) -> &[Population] {
        &self.history
    }

    /// Index of the last completed step (0 = initial population).
    pub fn current_step(&self) -> usize {
        self.history.len() - 1
    }

    /// True once the run has produced all `time_steps` snapshots.
    pub fn is_finished(&self) -> bool {
        self.history.len() >= self.params.time_steps()
    }

    /// Advance the simulation by one step and record the snapshot.
    ///
    /// A no-op once the configured horizon is reached. An extinct
    /// population is valid: every operator no-ops on it and the remaining
    /// snapshots are empty.
    pub fn step(&mut self) {
        if self.is_finished() {
            return;
        }
        let transition = self.history.len();

        // 1. Scheduled introductions.
        let due: Vec<usize> = self
            .schedule
            .iter()
            .enumerate()
            .filter(|(_, sched)| **sched == Some(transition))
            .map(|(strain, _)| strain)
            .collect();
        if !due.is_empty() {
            introduction::introduce_strains(
                self.population.individuals_mut(),
                &due,
                &mut self.rng,
            );
        }

        // 2. Births, from the pre-birth mature count.
        let mature = self.population.count_mature(self.params.age_maturity());
        let births = demography::draw_births(mature, self.params.fecundity(), &mut self.rng);
        for _ in 0..births {
            self.population
                .push(Individual::susceptible(self.params.strain_count()));
        }

        // 3. Activity flags, so quiescent strains skip stage 5 entirely.
        let active: Vec<bool> = (0..self.params.strain_count())
            .map(|strain| self.strain_active(strain))
            .collect();

        // 4. Background mortality: exactly one draw for the whole
        // population, before any strain adds disease deaths to the mask.
        let mut removed = vec![false; self.population.size()];
        mortality::base_mortality_pass(&mut removed, self.params.base_mortality(), &mut self.rng);

        // 5. Per-strain disease dynamics, ascending strain order.
        for strain in 0..self.params.strain_count() {
            if !active[strain] {
                continue;
            }
            let model = self.params.model(strain);

            transmission::transmission_pass(
                self.population.individuals_mut(),
                strain,
                model,
                self.params.interactions(),
                &removed,
                &mut self.rng,
            );
            progression::latency_pass(
                self.population.individuals_mut(),
                strain,
                model,
                &removed,
                &mut self.rng,
            );
            progression::recovery_pass(
                self.population.individuals_mut(),
                strain,
                model,
                &removed,
                &mut self.rng,
            );
            progression::waning_pass(
                self.population.individuals_mut(),
                strain,
                model,
                &removed,
                &mut self.rng,
            );
            mortality::disease_mortality_pass(
                self.population.individuals(),
                strain,
                model,
                &mut removed,
                &mut self.rng,
            );
        }

        // 6. Single compaction of everything flagged this step.
        let deaths = self.population.remove_flagged(&removed);

        // 7. Survivors age by one.
        self.population.increment_ages();

        // 8. Emit the snapshot.
        self.population.increment_step();
        trace!(
            "step {transition}: size {} (+{births} births, -{deaths} deaths)",
            self.population.size()
        );
        if self.population.is_empty() {
            debug!("population extinct at step {transition}");
        }
        self.history.push(self.population.clone());
    }

    /// Run to the configured horizon and return all snapshots.
    pub fn run(&mut self) -> &[Population] {
        while !self.is_finished() {
            self.step();
        }
        &self.history
    }

    /// Consume the engine and return the snapshot sequence.
    pub fn into_snapshots(mut self) -> Vec<Population> {
        self.run();
        self.history
    }

    /// A strain needs processing if any host can still change state under
    /// it: an exposed or infectious host, or (for waning immunity) a
    /// recovered host that can flow back to susceptible.
    fn strain_active(&self, strain: usize) -> bool {
        let wanes = self.params.model(strain).immunity_wanes();
        self.population.individuals().iter().any(|ind| {
            let state = ind.state(strain);
            state.is_exposed() || state.is_infected() || (wanes && state.is_recovered())
        })
    }
}

/// Run a complete simulation: the one-call public surface of the engine.
///
/// Returns `time_steps` snapshots, the first being a copy of
/// `initial_population`.
pub fn run(
    initial_population: Population,
    parameters: SimulationParameters,
) -> Result<Vec<Population>, ParameterError> {
    Ok(Simulation::new(initial_population, parameters)?.into_snapshots())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{HealthState, InteractionMatrix};
    use crate::epidemic::{DiseaseModel, IntroductionPolicy};

    fn params(
        models: Vec<DiseaseModel>,
        introduction: IntroductionPolicy,
        time_steps: usize,
    ) -> SimulationParameters {
        let n = models.len();
        SimulationParameters::new(
            models,
            InteractionMatrix::neutral(n),
            0.0,
            0.0,
            1,
            introduction,
            time_steps,
        )
        .unwrap()
        .with_seed(42)
    }

    #[test]
    fn test_new_rejects_strain_mismatch() {
        let initial = Population::susceptible(10, 2);
        let p = params(
            vec![DiseaseModel::si(0.5, 0.0).unwrap()],
            IntroductionPolicy::None,
            5,
        );
        let err = Simulation::new(initial, p).unwrap_err();
        assert!(matches!(err, ParameterError::PopulationMismatch { .. }));
    }

    #[test]
    fn test_first_snapshot_is_initial_population() {
        let mut initial = Population::susceptible(10, 1);
        initial.get_mut(3).unwrap().set_state(0, HealthState::Infected);
        let p = params(
            vec![DiseaseModel::si(0.5, 0.0).unwrap()],
            IntroductionPolicy::None,
            5,
        );

        let sim = Simulation::new(initial.clone(), p).unwrap();
        assert_eq!(sim.snapshots().len(), 1);
        assert_eq!(sim.snapshots()[0], initial);
    }

    #[test]
    fn test_run_produces_time_steps_snapshots() {
        let initial = Population::susceptible(10, 1);
        let p = params(
            vec![DiseaseModel::si(0.5, 0.0).unwrap()],
            IntroductionPolicy::None,
            7,
        );

        let mut sim = Simulation::new(initial, p).unwrap();
        let snapshots = sim.run();
        assert_eq!(snapshots.len(), 7);
        for (i, snap) in snapshots.iter().enumerate() {
            assert_eq!(snap.step(), i);
        }
        assert!(sim.is_finished());
        assert_eq!(sim.current_step(), 6);
    }

    #[test]
    fn test_single_snapshot_run() {
        let initial = Population::susceptible(5, 1);
        let p = params(
            vec![DiseaseModel::si(0.9, 0.0).unwrap()],
            IntroductionPolicy::Simultaneous,
            1,
        );

        let snapshots = run(initial.clone(), p).unwrap();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0], initial);
    }

    #[test]
    fn test_step_after_finish_is_noop() {
        let initial = Population::susceptible(5, 1);
        let p = params(
            vec![DiseaseModel::si(0.5, 0.0).unwrap()],
            IntroductionPolicy::None,
            3,
        );

        let mut sim = Simulation::new(initial, p).unwrap();
        sim.run();
        let before = sim.snapshots().len();
        sim.step();
        assert_eq!(sim.snapshots().len(), before);
    }

    #[test]
    fn test_empty_population_runs_to_horizon() {
        let initial = Population::susceptible(0, 2);
        let p = params(
            vec![
                DiseaseModel::si(0.9, 0.1).unwrap(),
                DiseaseModel::sir(0.9, 0.1, 0.2).unwrap(),
            ],
            IntroductionPolicy::Simultaneous,
            10,
        );

        let snapshots = run(initial, p).unwrap();
        assert_eq!(snapshots.len(), 10);
        assert!(snapshots.iter().all(|s| s.is_empty()));
    }

    #[test]
    fn test_simultaneous_introduction_first_transition() {
        let initial = Population::susceptible(10, 3);
        let p = params(
            vec![
                DiseaseModel::si(0.0, 0.0).unwrap(),
                DiseaseModel::si(0.0, 0.0).unwrap(),
                DiseaseModel::si(0.0, 0.0).unwrap(),
            ],
            IntroductionPolicy::Simultaneous,
            4,
        );

        let snapshots = run(initial, p).unwrap();
        // Nothing in the initial snapshot, one infectious host per strain
        // in three distinct hosts from the second snapshot onward.
        for strain in 0..3 {
            assert_eq!(snapshots[0].count_infected(strain), 0);
            assert_eq!(snapshots[1].count_infected(strain), 1);
        }
        let coinfected = snapshots[1]
            .individuals()
            .iter()
            .filter(|i| i.is_coinfected())
            .count();
        assert_eq!(coinfected, 0);
    }

    #[test]
    fn test_introduction_bypasses_latency() {
        let initial = Population::susceptible(10, 1);
        let p = params(
            vec![DiseaseModel::seir(0.0, 0.0, 0.0, 5).unwrap()],
            IntroductionPolicy::Simultaneous,
            3,
        );

        let snapshots = run(initial, p).unwrap();
        assert_eq!(snapshots[1].count_infected(0), 1);
        assert_eq!(snapshots[1].count_state(0, HealthState::Exposed), 0);
    }

    #[test]
    fn test_fixed_seed_reproducible() {
        let build = || {
            let mut initial = Population::susceptible(50, 2);
            initial.get_mut(0).unwrap().set_state(0, HealthState::Infected);
            let models = vec![
                DiseaseModel::sir(0.8, 0.05, 0.1).unwrap(),
                DiseaseModel::seirs(0.6, 0.02, 0.2, 3, 0.1).unwrap(),
            ];
            let p = SimulationParameters::new(
                models,
                InteractionMatrix::neutral(2),
                0.02,
                0.3,
                2,
                IntroductionPolicy::Random,
                20,
            )
            .unwrap()
            .with_seed(1234);
            run(initial, p).unwrap()
        };

        assert_eq!(build(), build());
    }

    #[test]
    fn test_active_strain_skip_preserves_outcomes() {
        // A run where strain 1 never becomes active must be identical to a
        // single-strain run, draw for draw: quiescent strains consume no
        // randomness.
        let single = {
            let mut initial = Population::susceptible(30, 1);
            initial.get_mut(0).unwrap().set_state(0, HealthState::Infected);
            let p = SimulationParameters::new(
                vec![DiseaseModel::sir(0.7, 0.05, 0.1).unwrap()],
                InteractionMatrix::neutral(1),
                0.05,
                0.1,
                1,
                IntroductionPolicy::None,
                15,
            )
            .unwrap()
            .with_seed(99);
            run(initial, p).unwrap()
        };

        let dual = {
            let mut initial = Population::susceptible(30, 2);
            initial.get_mut(0).unwrap().set_state(0, HealthState::Infected);
            let p = SimulationParameters::new(
                vec![
                    DiseaseModel::sir(0.7, 0.05, 0.1).unwrap(),
                    DiseaseModel::sir(0.9, 0.1, 0.3).unwrap(),
                ],
                InteractionMatrix::neutral(2),
                0.05,
                0.1,
                1,
                IntroductionPolicy::None,
                15,
            )
            .unwrap()
            .with_seed(99);
            run(initial, p).unwrap()
        };

        for (a, b) in single.iter().zip(&dual) {
            assert_eq!(a.size(), b.size());
            assert_eq!(a.count_infected(0), b.count_infected(0));
            assert_eq!(b.count_infected(1), 0);
        }
    }

    #[test]
    fn test_population_of_one_completes() {
        let mut initial = Population::susceptible(1, 1);
        initial.get_mut(0).unwrap().set_state(0, HealthState::Recovered);
        let p = params(
            vec![DiseaseModel::sir(0.9, 0.0, 0.5).unwrap()],
            IntroductionPolicy::None,
            10,
        );

        let snapshots = run(initial, p).unwrap();
        assert_eq!(snapshots.len(), 10);
        let last = snapshots.last().unwrap();
        assert_eq!(last.size(), 1);
        assert_eq!(last.get(0).unwrap().state(0), HealthState::Recovered);
        assert_eq!(last.get(0).unwrap().age(), 9);
    }
}
