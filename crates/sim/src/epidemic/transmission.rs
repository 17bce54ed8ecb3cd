//! Frequency-dependent transmission with cross-strain interaction.
//!
//! The force of infection a susceptible host experiences for strain `k` is
//! proportional to the *fraction* of living hosts currently infectious for
//! `k`, not to their absolute number (frequency-dependent transmission):
//!
//! ```text
//! pressure = transmission_k * I_k / N
//! ```
//!
//! For a host that is already infectious for other strains, the pressure is
//! further multiplied by the interaction-matrix entry for each resident
//! strain, so coinfection can facilitate (entry > 1) or suppress (entry < 1)
//! acquisition. The final pressure is clamped to 1.0 and used as the success
//! probability of a per-host Bernoulli draw.
//!
//! `I_k` and `N` are fixed at the start of the pass: infections created
//! during the pass do not feed back into the pressure experienced by hosts
//! evaluated later in the same pass.

use crate::base::InteractionMatrix;
use crate::epidemic::DiseaseModel;
use crate::host::Individual;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;

/// Run one transmission pass for `strain` over all living susceptible hosts.
///
/// Hosts flagged in `removed` neither exert nor experience pressure.
/// Successful draws move the host to the model's exposure target (`Exposed`
/// for SEIR/SEIRS, `Infected` for SI/SIR). Returns the number of new
/// exposures/infections.
///
/// Per-host Bernoulli draws run in parallel with one RNG per host, seeded
/// from the master RNG in host order, so results are reproducible for a
/// fixed seed regardless of thread scheduling.
pub fn transmission_pass<R: Rng + ?Sized>(
    individuals: &mut [Individual],
    strain: usize,
    model: &DiseaseModel,
    interactions: &InteractionMatrix,
    removed: &[bool],
    rng: &mut R,
) -> usize {
    debug_assert_eq!(individuals.len(), removed.len());

    let living = removed.iter().filter(|&&r| !r).count();
    if living == 0 {
        return 0;
    }

    let infectious = individuals
        .iter()
        .zip(removed)
        .filter(|(ind, &r)| !r && ind.is_infected_with(strain))
        .count();
    if infectious == 0 || model.transmission() == 0.0 {
        return 0;
    }

    let base_pressure = model.transmission() * infectious as f64 / living as f64;
    let target = model.exposure_target();

    // One seed per host, drawn from the master RNG in host order.
    let seeds: Vec<u64> = (0..individuals.len()).map(|_| rng.random()).collect();

    individuals
        .par_iter_mut()
        .zip(removed.par_iter())
        .zip(seeds.par_iter())
        .map(|((ind, &gone), &seed)| {
            if gone || !ind.state(strain).is_susceptible() {
                return 0usize;
            }

            let mut pressure = base_pressure;
            for (other, state) in ind.states().iter().enumerate() {
                if other != strain && state.is_infected() {
                    pressure *= interactions.get(strain, other);
                }
            }
            let pressure = pressure.min(1.0);

            let mut local_rng = Xoshiro256PlusPlus::seed_from_u64(seed);
            if local_rng.random::<f64>() < pressure {
                ind.set_state(strain, target);
                1
            } else {
                0
            }
        })
        .sum()
}
