//! Imperfect-detection sampling of snapshot sequences.
//!
//! Field surveys never observe a population perfectly: only a fraction of
//! hosts is examined, infected hosts can test negative, and clean hosts can
//! test positive. This module replays such a survey over the snapshot
//! sequence of a finished run and reports, per step and strain, whether the
//! strain would have been detected at all.

use epistrain_sim::simulation::Population;
use rand::seq::index;
use rand::Rng;
use std::error;
use std::fmt;

/// Error returned for sampling parameters outside [0.0, 1.0].
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingError(pub &'static str, pub f64);

impl fmt::Display for SamplingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid {}: {} (must be between 0.0 and 1.0)",
            self.0, self.1
        )
    }
}

impl error::Error for SamplingError {}

/// A validated survey protocol.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingScheme {
    fraction: f64,
    false_positive: f64,
    false_negative: f64,
}

impl SamplingScheme {
    /// Create a survey protocol.
    ///
    /// `fraction` is the share of hosts examined per snapshot;
    /// `false_positive` and `false_negative` are the per-test error
    /// probabilities.
    ///
    /// # Errors
    /// Returns an error if any parameter is outside [0.0, 1.0].
    pub fn new(
        fraction: f64,
        false_positive: f64,
        false_negative: f64,
    ) -> Result<Self, SamplingError> {
        for (name, value) in [
            ("sampling_fraction", fraction),
            ("false_positive_rate", false_positive),
            ("false_negative_rate", false_negative),
        ] {
            if !(0.0..=1.0).contains(&value) || !value.is_finite() {
                return Err(SamplingError(name, value));
            }
        }
        Ok(Self {
            fraction,
            false_positive,
            false_negative,
        })
    }

    /// Share of hosts examined per snapshot.
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// Per-test probability of a positive result on an uninfected host.
    #[inline]
    pub fn false_positive(&self) -> f64 {
        self.false_positive
    }

    /// Per-test probability of a negative result on an infected host.
    #[inline]
    pub fn false_negative(&self) -> f64 {
        self.false_negative
    }
}

/// Survey every snapshot and return a (steps x strains) detection matrix.
///
/// For each snapshot, `round(fraction * size)` hosts are drawn uniformly
/// without replacement and tested for every strain. An infected host tests
/// positive with probability `1 - false_negative`; an uninfected host tests
/// positive with probability `false_positive`. A cell is `true` when at
/// least one sampled host tested positive for that strain at that step.
pub fn detection_matrix<R: Rng + ?Sized>(
    snapshots: &[Population],
    scheme: &SamplingScheme,
    rng: &mut R,
) -> Vec<Vec<bool>> {
    snapshots
        .iter()
        .map(|snap| survey_snapshot(snap, scheme, rng))
        .collect()
}

fn survey_snapshot<R: Rng + ?Sized>(
    snapshot: &Population,
    scheme: &SamplingScheme,
    rng: &mut R,
) -> Vec<bool> {
    let strains = snapshot.strain_count();
    let mut detected = vec![false; strains];

    let sample_size = (scheme.fraction * snapshot.size() as f64).round() as usize;
    if sample_size == 0 {
        return detected;
    }

    for host in index::sample(rng, snapshot.size(), sample_size) {
        let ind = snapshot
            .get(host)
            .expect("sampled index within population");
        for (strain, hit) in detected.iter_mut().enumerate() {
            let p_positive = if ind.is_infected_with(strain) {
                1.0 - scheme.false_negative
            } else {
                scheme.false_positive
            };
            if rng.random::<f64>() < p_positive {
                *hit = true;
            }
        }
    }

    detected
}
