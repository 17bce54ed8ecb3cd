//! Within-host disease progression.
//!
//! Progression covers the transitions that do not involve another host:
//! latency escape (E→I), recovery (I→R) and immunity loss (R→S, SEIRS
//! only). Each is a per-host Bernoulli draw evaluated once per step.
//!
//! The passes run in the fixed order transmission → latency → recovery →
//! waning within a strain's step, and each pass reads the state left by the
//! previous one. In particular a host exposed this step is immediately
//! eligible for the latency draw of the same step. This mirrors the
//! memoryless `1/latency` escape probability: the latent period is
//! geometric with mean `latency`, and its support starts at zero.

use crate::base::HealthState;
use crate::epidemic::DiseaseModel;
use crate::host::Individual;
use rand::Rng;

/// Move living exposed hosts to `Infected` with probability `1/latency`.
///
/// No-op for models without a latent phase. Returns the number of hosts
/// that became infectious.
pub fn latency_pass<R: Rng + ?Sized>(
    individuals: &mut [Individual],
    strain: usize,
    model: &DiseaseModel,
    removed: &[bool],
    rng: &mut R,
) -> usize {
    let Some(latency) = model.latency() else {
        return 0;
    };
    let p = 1.0 / f64::from(latency);

    let mut progressed = 0;
    for (ind, &gone) in individuals.iter_mut().zip(removed) {
        if !gone && ind.state(strain).is_exposed() && rng.random::<f64>() < p {
            ind.set_state(strain, HealthState::Infected);
            progressed += 1;
        }
    }
    progressed
}

/// Move living infectious hosts to `Recovered` with the model's recovery
/// probability. No-op for SI. Returns the number of recoveries.
pub fn recovery_pass<R: Rng + ?Sized>(
    individuals: &mut [Individual],
    strain: usize,
    model: &DiseaseModel,
    removed: &[bool],
    rng: &mut R,
) -> usize {
    let p = model.recovery();
    if p == 0.0 {
        return 0;
    }

    let mut recovered = 0;
    for (ind, &gone) in individuals.iter_mut().zip(removed) {
        if !gone && ind.state(strain).is_infected() && rng.random::<f64>() < p {
            ind.set_state(strain, HealthState::Recovered);
            recovered += 1;
        }
    }
    recovered
}

/// Return living recovered hosts to `Susceptible` with the model's waning
/// probability. No-op unless the model is SEIRS. Returns the number of
/// hosts whose immunity lapsed.
pub fn waning_pass<R: Rng + ?Sized>(
    individuals: &mut [Individual],
    strain: usize,
    model: &DiseaseModel,
    removed: &[bool],
    rng: &mut R,
) -> usize {
    let p = model.waning();
    if p == 0.0 {
        return 0;
    }

    let mut waned = 0;
    for (ind, &gone) in individuals.iter_mut().zip(removed) {
        if !gone && ind.state(strain).is_recovered() && rng.random::<f64>() < p {
            ind.set_state(strain, HealthState::Susceptible);
            waned += 1;
        }
    }
    waned
}
