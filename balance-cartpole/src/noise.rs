//! Sources of the noise added to the force command.
//!
//! The engine owns its [`NoiseSource`]. Production code uses [`RngNoise`] seeded per
//! environment; tests use [`ZeroNoise`] or [`SequenceNoise`] to pin trajectories.
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Draws the per-tick offset added to the command.
pub trait NoiseSource {
    /// Returns a value drawn from `[low, high]`.
    fn uniform(&mut self, low: f64, high: f64) -> f64;
}

impl<N: NoiseSource + ?Sized> NoiseSource for Box<N> {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        (**self).uniform(low, high)
    }
}

/// Uniform noise drawn from a random number generator.
#[derive(Debug, Clone)]
pub struct RngNoise<R: Rng> {
    rng: R,
}

impl<R: Rng> RngNoise<R> {
    /// Wraps a random number generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngNoise<StdRng> {
    /// Creates a noise source from a seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> NoiseSource for RngNoise<R> {
    /// Swapped bounds are accepted, so a negative amplitude still gives zero-mean noise.
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        if low < high {
            self.rng.gen_range(low..=high)
        } else {
            low
        }
    }
}

/// Noise source that always returns zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroNoise;

impl NoiseSource for ZeroNoise {
    fn uniform(&mut self, _low: f64, _high: f64) -> f64 {
        0.0
    }
}

/// Replays a fixed sequence of values, cycling when exhausted.
///
/// Values are returned as given, without clamping to the requested range.
#[derive(Debug, Clone)]
pub struct SequenceNoise {
    values: Vec<f64>,
    ix: usize,
}

impl SequenceNoise {
    /// Creates the source. An empty sequence behaves like [`ZeroNoise`].
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, ix: 0 }
    }
}

impl NoiseSource for SequenceNoise {
    fn uniform(&mut self, _low: f64, _high: f64) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.ix];
        self.ix = (self.ix + 1) % self.values.len();
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_noise_stays_in_range() {
        let mut noise = RngNoise::seeded(42);
        for _ in 0..10_000 {
            let v = noise.uniform(-0.02, 0.02);
            assert!((-0.02..=0.02).contains(&v));
        }
        assert_eq!(noise.uniform(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_rng_noise_accepts_swapped_bounds() {
        let mut noise = RngNoise::seeded(9);
        let drawn: Vec<_> = (0..1_000).map(|_| noise.uniform(0.02, -0.02)).collect();
        assert!(drawn.iter().all(|v| (-0.02..=0.02).contains(v)));
        assert!(drawn.iter().any(|v| *v < 0.0));
        assert!(drawn.iter().any(|v| *v > 0.0));
    }

    #[test]
    fn test_rng_noise_is_reproducible() {
        let mut a = RngNoise::seeded(7);
        let mut b = RngNoise::seeded(7);
        for _ in 0..100 {
            assert_eq!(a.uniform(-1.0, 1.0), b.uniform(-1.0, 1.0));
        }
    }

    #[test]
    fn test_sequence_noise_cycles() {
        let mut noise = SequenceNoise::new(vec![0.01, -0.02]);
        let drawn: Vec<_> = (0..5).map(|_| noise.uniform(-0.02, 0.02)).collect();
        assert_eq!(drawn, vec![0.01, -0.02, 0.01, -0.02, 0.01]);
        assert_eq!(SequenceNoise::new(vec![]).uniform(-1.0, 1.0), 0.0);
    }
}
