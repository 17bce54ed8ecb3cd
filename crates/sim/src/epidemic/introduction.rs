//! Strain introduction scheduling.
//!
//! Strains that are not pre-seeded in the initial population enter the
//! simulation through the introduction scheduler. An introduction forces one
//! living host directly to `Infected` for the scheduled strain, bypassing
//! any latent phase, so a single seeding event can start an outbreak even
//! under SEIR/SEIRS models.

use crate::base::HealthState;
use crate::host::Individual;
use log::debug;
use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// When the engine introduces each strain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntroductionPolicy {
    /// Every strain is introduced at the first transition.
    Simultaneous,
    /// Each strain draws its own uniform-random transition index.
    Random,
    /// No engine introductions; only pre-seeded infections exist.
    None,
}

/// Draw the per-strain introduction schedule for a run.
///
/// Returned entries are transition indices (1-based; transition `t`
/// produces snapshot `t + 1`), or `None` for strains the engine never
/// introduces. A run of `time_steps` snapshots executes transitions
/// `1..=time_steps - 1`, so random draws are taken from exactly that range;
/// with a single snapshot there is no transition to introduce into.
pub fn draw_schedule<R: Rng + ?Sized>(
    policy: IntroductionPolicy,
    strain_count: usize,
    time_steps: usize,
    rng: &mut R,
) -> Vec<Option<usize>> {
    match policy {
        IntroductionPolicy::Simultaneous => vec![Some(1); strain_count],
        IntroductionPolicy::Random => {
            if time_steps < 2 {
                return vec![None; strain_count];
            }
            (0..strain_count)
                .map(|_| Some(rng.random_range(1..time_steps)))
                .collect()
        }
        IntroductionPolicy::None => vec![None; strain_count],
    }
}

/// Introduce every strain in `strains` into a distinct living host.
///
/// Hosts are sampled uniformly without replacement across all strains
/// scheduled for the same step. If fewer hosts than strains are alive,
/// the excess strains miss their introduction. Returns the number of
/// introductions performed.
pub fn introduce_strains<R: Rng + ?Sized>(
    individuals: &mut [Individual],
    strains: &[usize],
    rng: &mut R,
) -> usize {
    let count = strains.len().min(individuals.len());
    if count == 0 {
        return 0;
    }

    for (slot, host) in index::sample(rng, individuals.len(), count)
        .into_iter()
        .enumerate()
    {
        let strain = strains[slot];
        individuals[host].set_state(strain, HealthState::Infected);
        debug!("introduced strain {strain} into host {host}");
    }
    count
}
