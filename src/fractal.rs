//! Deterministic multi-octave fractal noise.
//!
//! The continuous primitive sits behind [`Noise2D`] so the octave composition
//! does not depend on a particular noise implementation. Per-generation seeds
//! never reseed the primitive; they shift the sampled coordinates through a
//! [`NoiseOffset`] instead, which keeps the primitive pure and a generation
//! reproducible from its seed alone.

use ::noise::{NoiseFn, Perlin};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// A pure, continuous 2D noise function.
///
/// Implementations must return the same value for the same input and stay
/// within `[0, 1]`.
pub trait Noise2D {
    fn sample(&self, x: f64, y: f64) -> f64;
}

/// Gradient noise primitive backed by [`noise::Perlin`].
///
/// Perlin output (roughly `[-1, 1]`) is remapped and clamped into `[0, 1]`.
#[derive(Clone)]
pub struct PerlinNoise {
    perlin: Perlin,
}

impl PerlinNoise {
    /// Builds the primitive with a fixed lattice seed.
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }
}

impl std::fmt::Debug for PerlinNoise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerlinNoise").finish_non_exhaustive()
    }
}

impl Default for PerlinNoise {
    fn default() -> Self {
        Self::new(Perlin::DEFAULT_SEED)
    }
}

impl Noise2D for PerlinNoise {
    fn sample(&self, x: f64, y: f64) -> f64 {
        (self.perlin.get([x, y]) * 0.5 + 0.5).clamp(0.0, 1.0)
    }
}

/// Octave parameters for [`fractal_noise`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Frequency applied to the world-space x coordinate. Lower = wider hills.
    pub base_frequency: f64,
    pub octaves: u32,
    /// Frequency multiplier per octave (> 1 typical).
    pub lacunarity: f64,
    /// Amplitude multiplier per octave (< 1 typical, must be positive).
    pub persistence: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            base_frequency: 0.05,
            octaves: 3,
            lacunarity: 2.0,
            persistence: 0.5,
        }
    }
}

impl NoiseConfig {
    /// Samples [`fractal_noise`] with this configuration's octave settings.
    ///
    /// `base_frequency` is *not* applied here; callers scale their own
    /// coordinates so that the y axis can stay unscaled.
    pub fn sample(&self, noise: &impl Noise2D, x: f64, y: f64) -> f64 {
        fractal_noise(noise, x, y, self.octaves, self.lacunarity, self.persistence)
    }
}

/// Sums `octaves` layers of `noise`, each rescaled to `[-1, 1]`, and
/// normalizes by the total amplitude.
///
/// With a positive `persistence` the result is bounded to `[-1, 1]`. When
/// the amplitude sum is not positive (zero octaves, or a persistence that
/// cancels out) the raw sum is returned unnormalized.
pub fn fractal_noise(
    noise: &impl Noise2D,
    x: f64,
    y: f64,
    octaves: u32,
    lacunarity: f64,
    persistence: f64,
) -> f64 {
    let mut total = 0.0f64;
    let mut amplitude = 1.0f64;
    let mut frequency = 1.0f64;
    let mut amplitude_sum = 0.0f64;

    for _ in 0..octaves {
        let value = noise.sample(x * frequency, y * frequency) * 2.0 - 1.0;
        total += value * amplitude;
        amplitude_sum += amplitude;

        amplitude *= persistence;
        frequency *= lacunarity;
    }

    if amplitude_sum > 0.0 {
        (total / amplitude_sum).clamp(-1.0, 1.0)
    } else {
        total
    }
}

/// Coordinate shift that folds a generation seed into noise sampling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseOffset {
    pub x: f64,
    pub y: f64,
}

impl NoiseOffset {
    /// Half-width of the range offsets are drawn from.
    pub const RANGE: i32 = 100_000;

    /// Draws an offset pair in `[-RANGE, RANGE)` from a generator seeded with
    /// `seed`. The same seed always yields the same offsets.
    pub fn from_seed(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self {
            x: rng.gen_range(-Self::RANGE..Self::RANGE) as f64,
            y: rng.gen_range(-Self::RANGE..Self::RANGE) as f64,
        }
    }
}
