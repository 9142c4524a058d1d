//! Surface (height-field) generation along a path.
//!
//! A surface is an ordered list of `segment_count + 1` points. Each point takes
//! its base position from the [`Path`] (or from a straight fallback line when no
//! path is supplied) and adds fractal noise. The start of the road is split into
//! three zones:
//!
//! ```text
//!   index:  0 ........ flat_start ........ flat_start + blend_len ........ N
//!           |   flat   |   linear blend   |          full noise           |
//! ```

use bevy::log::{debug, warn};
use bevy::math::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::TerrainError;
use crate::fractal::{Noise2D, NoiseConfig, NoiseOffset};
use crate::path::Path;

/// Where the generation seed comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeedMode {
    /// Always use this seed; output is reproducible.
    Fixed(u64),
    /// Draw a fresh seed from the caller's RNG on every generation.
    Random,
}

impl Default for SeedMode {
    fn default() -> Self {
        Self::Fixed(12345)
    }
}

/// Shape parameters for [`generate_surface`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Number of segments; the surface has `segment_count + 1` points.
    pub segment_count: u32,
    /// Horizontal spacing used when no path is supplied.
    pub segment_width: f32,
    /// Road height used when no path is supplied, and the mesh baseline.
    pub base_height: f32,
    /// Peak noise displacement above or below the base position.
    pub amplitude: f32,
    /// Leading points that stay exactly on the base position.
    pub flat_start: u32,
    /// Points over which the flat start blends into full noise.
    pub blend_len: u32,
    /// Distance from `base_height` down to the mesh floor.
    pub bottom_depth: f32,
    pub seed: SeedMode,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            segment_count: 200,
            segment_width: 1.0,
            base_height: 0.0,
            amplitude: 5.0,
            flat_start: 15,
            blend_len: 10,
            bottom_depth: 20.0,
            seed: SeedMode::default(),
        }
    }
}

impl SurfaceConfig {
    pub fn with_segment_count(mut self, segment_count: u32) -> Self {
        self.segment_count = segment_count;
        self
    }

    pub fn with_amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Sets the flat-start and blend lengths, both in points.
    pub fn with_flat_start(mut self, flat_start: u32, blend_len: u32) -> Self {
        self.flat_start = flat_start;
        self.blend_len = blend_len;
        self
    }

    pub fn with_seed(mut self, seed: SeedMode) -> Self {
        self.seed = seed;
        self
    }

    /// Checks that every numeric field is usable.
    pub fn validate(&self) -> Result<(), TerrainError> {
        let finite = [
            ("segment_width", self.segment_width),
            ("base_height", self.base_height),
            ("amplitude", self.amplitude),
            ("bottom_depth", self.bottom_depth),
        ];
        if let Some((name, value)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(TerrainError::InvalidConfig(format!(
                "{name} must be finite (got {value})"
            )));
        }
        if self.segment_width < 0.0 {
            return Err(TerrainError::InvalidConfig(format!(
                "segment_width must not be negative (got {})",
                self.segment_width
            )));
        }
        if self.bottom_depth < 0.0 {
            return Err(TerrainError::InvalidConfig(format!(
                "bottom_depth must not be negative (got {})",
                self.bottom_depth
            )));
        }
        Ok(())
    }

    /// Resolves the seed for one generation, drawing from `rng` in random mode.
    pub fn resolve_seed(&self, rng: &mut impl Rng) -> u64 {
        match self.seed {
            SeedMode::Fixed(seed) => seed,
            SeedMode::Random => rng.r#gen(),
        }
    }
}

fn validate_noise(noise: &NoiseConfig) -> Result<(), TerrainError> {
    let values = [
        ("base_frequency", noise.base_frequency),
        ("lacunarity", noise.lacunarity),
        ("persistence", noise.persistence),
    ];
    if let Some((name, value)) = values.iter().find(|(_, v)| !v.is_finite()) {
        return Err(TerrainError::InvalidConfig(format!(
            "{name} must be finite (got {value})"
        )));
    }
    if noise.persistence <= 0.0 {
        return Err(TerrainError::InvalidConfig(format!(
            "persistence must be positive (got {})",
            noise.persistence
        )));
    }
    Ok(())
}

/// An ordered ground profile together with the seed that produced it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Surface {
    pub points: Vec<Vec2>,
    pub seed: u64,
}

impl Surface {
    /// The ground boundary line handed to physics and placement consumers.
    pub fn boundary(&self) -> &[Vec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Generates a fresh [`Surface`].
///
/// `rng` is only consumed in [`SeedMode::Random`]; the drawn seed is recorded
/// on the returned surface so the run can be reproduced with
/// [`SeedMode::Fixed`].
///
/// # Example
///
/// ```ignore
/// use bevy_hill_strip::{NoiseConfig, PerlinNoise, SurfaceConfig, generate_surface};
///
/// let mut rng = rand::thread_rng();
/// let surface = generate_surface(
///     None,
///     &PerlinNoise::default(),
///     &NoiseConfig::default(),
///     &SurfaceConfig::default(),
///     &mut rng,
/// )?;
/// assert_eq!(surface.len(), 201);
/// ```
pub fn generate_surface(
    path: Option<&Path>,
    noise: &impl Noise2D,
    noise_config: &NoiseConfig,
    config: &SurfaceConfig,
    rng: &mut impl Rng,
) -> Result<Surface, TerrainError> {
    config.validate()?;
    validate_noise(noise_config)?;

    let seed = config.resolve_seed(rng);
    debug!("generating surface with seed {seed}");
    let offset = NoiseOffset::from_seed(seed);

    let count = config.segment_count as usize;
    if count == 0 {
        warn!("surface segment_count is 0; producing a single point");
    }

    let flat_start = config.flat_start as usize;
    let blend_len = config.blend_len as usize;

    let mut points = Vec::with_capacity(count + 1);
    for i in 0..=count {
        let t = if count == 0 { 0.0 } else { i as f32 / count as f32 };
        let base = match path {
            Some(path) => path.evaluate(t),
            None => Vec2::new(i as f32 * config.segment_width, config.base_height),
        };

        let n = noise_config.sample(
            noise,
            (base.x as f64 + offset.x) * noise_config.base_frequency,
            offset.y,
        ) as f32;
        let noisy_y = base.y + n * config.amplitude;

        let y = if i < flat_start {
            base.y
        } else if i < flat_start + blend_len {
            let blend = ((i - flat_start) as f32 / blend_len as f32).clamp(0.0, 1.0);
            base.y + (noisy_y - base.y) * blend
        } else {
            noisy_y
        };

        points.push(Vec2::new(base.x, y));
    }

    Ok(Surface { points, seed })
}
