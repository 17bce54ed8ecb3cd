//! Mortality draws and the shared per-step removal mask.
//!
//! Deaths are not applied immediately. Every mortality source of a step
//! (background mortality first, then each strain's disease mortality) flags
//! victims in one shared boolean mask, and the engine compacts the
//! population once after all strains have been processed. A host can
//! therefore be claimed by at most one cause of death per step: later draws
//! only sample among hosts that are still unflagged.
//!
//! Background mortality runs exactly once per step over the whole living
//! population, regardless of how many strains are modeled.

use crate::epidemic::DiseaseModel;
use crate::host::Individual;
use rand::seq::index;
use rand::Rng;
use rand_distr::{Binomial, Distribution};

/// Flag victims of background mortality in the shared removal mask.
///
/// The death count is drawn from `Binomial(living, rate)` and the victims
/// are sampled uniformly without replacement from the living hosts.
/// Returns the number of hosts flagged.
pub fn base_mortality_pass<R: Rng + ?Sized>(
    removed: &mut [bool],
    rate: f64,
    rng: &mut R,
) -> usize {
    let living: Vec<usize> = (0..removed.len()).filter(|&i| !removed[i]).collect();
    mark_deaths(removed, &living, rate, rng)
}

/// Flag victims of `strain`'s disease-induced mortality.
///
/// Only hosts that are currently infectious for the strain and not already
/// flagged are at risk. The death count is drawn from
/// `Binomial(living infectious, mortality)`. Returns the number flagged.
pub fn disease_mortality_pass<R: Rng + ?Sized>(
    individuals: &[Individual],
    strain: usize,
    model: &DiseaseModel,
    removed: &mut [bool],
    rng: &mut R,
) -> usize {
    debug_assert_eq!(individuals.len(), removed.len());

    let at_risk: Vec<usize> = individuals
        .iter()
        .enumerate()
        .filter(|(i, ind)| !removed[*i] && ind.is_infected_with(strain))
        .map(|(i, _)| i)
        .collect();
    mark_deaths(removed, &at_risk, model.mortality(), rng)
}

fn mark_deaths<R: Rng + ?Sized>(
    removed: &mut [bool],
    candidates: &[usize],
    rate: f64,
    rng: &mut R,
) -> usize {
    if candidates.is_empty() || rate == 0.0 {
        return 0;
    }

    let deaths = Binomial::new(candidates.len() as u64, rate)
        .expect("mortality rate validated at construction")
        .sample(rng) as usize;
    if deaths == 0 {
        return 0;
    }

    for pick in index::sample(rng, candidates.len(), deaths) {
        removed[candidates[pick]] = true;
    }
    deaths
}
