//! Demographic turnover: reproduction.
//!
//! The host population is demographically open. Hosts reproduce once they
//! reach the age of maturity, and reproduction is unaffected by disease
//! state: an infectious host breeds as readily as a susceptible one.
//! Offspring enter the population at age 0, susceptible to every strain.

use rand::Rng;
use rand_distr::{Distribution, Poisson};

/// Draw the number of births for one step.
///
/// The count is Poisson with mean `mature_count * fecundity`, evaluated on
/// the mature population *before* any birth of the current step. Returns 0
/// without consuming randomness when the mean is zero.
pub fn draw_births<R: Rng + ?Sized>(mature_count: usize, fecundity: f64, rng: &mut R) -> usize {
    let mean = mature_count as f64 * fecundity;
    if mean <= 0.0 {
        return 0;
    }

    Poisson::new(mean)
        .expect("positive finite Poisson mean")
        .sample(rng) as usize
}
