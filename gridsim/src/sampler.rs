use crate::error::{GridError, Result};
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use serde::Serialize;
use tracing::{info, warn};

/// How shots are drawn from a probability distribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SamplingStrategy {
    /// Repeated in-order sweeps with one Bernoulli trial per basis state.
    #[default]
    BernoulliSweep,
    /// Independent draws from the categorical distribution.
    Categorical,
}

impl SamplingStrategy {
    pub fn sample(
        self,
        probabilities: &[f64],
        shots: u64,
        rng: &mut impl Rng,
    ) -> Result<Vec<u64>> {
        match self {
            SamplingStrategy::BernoulliSweep => sample(probabilities, shots, rng),
            SamplingStrategy::Categorical => sample_categorical(probabilities, shots, rng),
        }
    }
}

/// Emulates `shots` measurements by sweeping the basis states in order.
///
/// Each visit to index `i` draws `r` in `[0, 1)` and records a hit when
/// `r < probabilities[i]`; sweeps repeat until the budget is spent. The result
/// is skewed toward early indices and is not a categorical draw. Counts always
/// sum to `shots`.
pub fn sample(probabilities: &[f64], shots: u64, rng: &mut impl Rng) -> Result<Vec<u64>> {
    let mut counts = vec![0u64; probabilities.len()];
    if shots == 0 {
        return Ok(counts);
    }
    // With no positive entry the sweep would never stop.
    if !probabilities.iter().any(|&p| p > 0.0) {
        return Err(GridError::DegenerateDistribution);
    }
    check_normalized(probabilities);

    let mut remaining = shots;
    let mut sweeps = 0u64;
    'sweep: loop {
        sweeps += 1;
        for (i, &p) in probabilities.iter().enumerate() {
            if rng.gen_range(0.0..1.0) < p {
                counts[i] += 1;
                remaining -= 1;
                if remaining == 0 {
                    break 'sweep;
                }
            }
        }
    }
    info!(shots, sweeps, "bernoulli sweep sampling finished");
    Ok(counts)
}

/// Draws `shots` independent outcomes from the categorical distribution
/// defined by `probabilities` (inverse-CDF sampling).
pub fn sample_categorical(
    probabilities: &[f64],
    shots: u64,
    rng: &mut impl Rng,
) -> Result<Vec<u64>> {
    let mut counts = vec![0u64; probabilities.len()];
    if shots == 0 {
        return Ok(counts);
    }
    check_normalized(probabilities);
    let dist = WeightedIndex::new(probabilities).map_err(|_| GridError::DegenerateDistribution)?;
    for _ in 0..shots {
        counts[dist.sample(rng)] += 1;
    }
    info!(shots, "categorical sampling finished");
    Ok(counts)
}

fn check_normalized(probabilities: &[f64]) {
    let total: f64 = probabilities.iter().sum();
    if (total - 1.0).abs() > 1e-6 {
        warn!(total, "probabilities do not sum to one");
    }
}
