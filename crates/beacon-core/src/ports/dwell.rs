//! Dwell port - beacon cycle 間のスリープ時間
//!
//! # テスト容易性
//! - trait によりサンプラを差し替え可能
//! - 本番は [`ExponentialDwell`]、テストでは [`FixedDwell`] を使用

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks how long to sleep before the next cycle.
///
/// `mean_dwell` is read fresh from the shared configuration on every call,
/// so implementations must not cache anything derived from it.
pub trait DwellSampler: Send + Sync {
    fn sample(&mut self, mean_dwell: f64) -> Duration;
}

/// Exponentially distributed dwell (memoryless, mean = `mean_dwell`).
#[derive(Debug)]
pub struct ExponentialDwell<R = StdRng> {
    rng: R,
}

impl ExponentialDwell<StdRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng + Send + Sync> DwellSampler for ExponentialDwell<R> {
    fn sample(&mut self, mean_dwell: f64) -> Duration {
        exponential(mean_dwell, &mut self.rng)
    }
}

/// Inverse-CDF sample of Exp(1 / mean).
pub fn exponential<R: Rng + ?Sized>(mean_dwell: f64, rng: &mut R) -> Duration {
    let u: f64 = rng.gen_range(0.0..1.0);
    let seconds = (-mean_dwell * (1.0 - u).ln()).max(0.0);
    // saturate: a mean too large for Duration parks the beacon
    Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX)
}

/// Always the same dwell, whatever the mean. Tests only need this.
#[derive(Debug, Clone, Copy)]
pub struct FixedDwell(pub Duration);

impl DwellSampler for FixedDwell {
    fn sample(&mut self, _mean_dwell: f64) -> Duration {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.5)]
    #[case(1.0)]
    #[case(30.0)]
    fn sample_mean_tracks_parameter(#[case] mean: f64) {
        let mut dwell = ExponentialDwell::seeded(7);
        let n = 20_000;
        let total: f64 = (0..n).map(|_| dwell.sample(mean).as_secs_f64()).sum();
        let observed = total / n as f64;
        assert!(
            (observed - mean).abs() < mean * 0.05,
            "observed mean {observed} for parameter {mean}"
        );
    }

    #[test]
    fn parameter_change_applies_to_next_sample() {
        let mut dwell = ExponentialDwell::seeded(1);
        let short: f64 = (0..1_000).map(|_| dwell.sample(0.01).as_secs_f64()).sum();
        let long: f64 = (0..1_000).map(|_| dwell.sample(100.0).as_secs_f64()).sum();
        assert!(long > short * 100.0);
    }

    #[test]
    fn samples_are_never_negative() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..10_000 {
            assert!(exponential(2.0, &mut rng) >= Duration::ZERO);
        }
    }

    #[test]
    fn huge_mean_saturates_instead_of_collapsing() {
        let mut dwell = ExponentialDwell::seeded(3);
        let zero = (0..1_000)
            .filter(|_| dwell.sample(1e300) < Duration::from_secs(1))
            .count();
        assert_eq!(zero, 0);
        assert_eq!(exponential(f64::MAX, &mut StdRng::seed_from_u64(5)), Duration::MAX);
    }

    #[test]
    fn fixed_dwell_ignores_mean() {
        let mut fixed = FixedDwell(Duration::from_millis(5));
        assert_eq!(fixed.sample(1000.0), Duration::from_millis(5));
    }
}
