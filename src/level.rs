//! One-call regeneration of the whole terrain strip, and its Bevy plumbing.
//!
//! [`Level`] owns the latest surface, strip mesh and texture. Each
//! [`Level::regenerate`] recomputes all three from a [`LevelConfig`]; a stage
//! that fails is logged and keeps its previous artifact, so a bad edit never
//! leaves a half-written mesh or bitmap behind.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::TerrainError;
use crate::fractal::{NoiseConfig, PerlinNoise};
use crate::mesher::{StripMesh, StripMeshBuilder};
use crate::path::{ControlPoint, Path, mirror_handle};
use crate::profile::LayerProfile;
use crate::surface::{Surface, SurfaceConfig, generate_surface};
use crate::texture::{synthesize, texture_to_image};

/// Everything needed to regenerate a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Returned by the path when fewer than two anchors are authored.
    pub origin: Vec2,
    /// Ordered anchors. An empty list uses the straight fallback line.
    pub anchors: Vec<ControlPoint>,
    pub surface: SurfaceConfig,
    pub noise: NoiseConfig,
    pub profile: LayerProfile,
    pub texture_width: u32,
    pub texture_height: u32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            anchors: Vec::new(),
            surface: SurfaceConfig::default(),
            noise: NoiseConfig::default(),
            profile: LayerProfile::hill_road(),
            texture_width: 512,
            texture_height: 512,
        }
    }
}

impl LevelConfig {
    /// The authored path, or `None` when no anchors are set.
    pub fn path(&self) -> Option<Path> {
        if self.anchors.is_empty() {
            None
        } else {
            Some(Path::from_anchors(self.origin, &self.anchors))
        }
    }

    pub fn mesh_builder(&self) -> StripMeshBuilder {
        StripMeshBuilder::new()
            .with_baseline(self.surface.base_height)
            .with_bottom_depth(self.surface.bottom_depth)
    }
}

/// Outcome of one [`Level::regenerate`] call, one entry per stage.
#[derive(Debug, Default)]
pub struct LevelReport {
    pub surface: Option<TerrainError>,
    pub mesh: Option<TerrainError>,
    pub texture: Option<TerrainError>,
}

impl LevelReport {
    pub fn is_ok(&self) -> bool {
        self.surface.is_none() && self.mesh.is_none() && self.texture.is_none()
    }
}

/// The most recent successfully generated artifacts.
#[derive(Debug, Default)]
pub struct Level {
    surface: Option<Surface>,
    strip: Option<StripMesh>,
    texture: Option<image::RgbaImage>,
    noise: PerlinNoise,
}

impl Level {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    pub fn strip(&self) -> Option<&StripMesh> {
        self.strip.as_ref()
    }

    /// Ground line matching the current strip mesh.
    pub fn boundary(&self) -> Option<&[Vec2]> {
        self.strip.as_ref().map(|s| s.boundary.as_slice())
    }

    pub fn texture(&self) -> Option<&image::RgbaImage> {
        self.texture.as_ref()
    }

    /// Regenerates surface, strip mesh and texture.
    ///
    /// A failing stage logs a warning and keeps its previous artifact. The
    /// surface is only committed together with a mesh built from it, so
    /// [`surface`](Self::surface) and [`boundary`](Self::boundary) always
    /// describe the same ground line.
    pub fn regenerate(&mut self, config: &LevelConfig, rng: &mut impl Rng) -> LevelReport {
        let mut report = LevelReport::default();
        let path = config.path();

        match generate_surface(
            path.as_ref(),
            &self.noise,
            &config.noise,
            &config.surface,
            rng,
        ) {
            Ok(surface) => match config.mesh_builder().build(&surface.points) {
                Ok(strip) => {
                    self.strip = Some(strip);
                    self.surface = Some(surface);
                }
                Err(err) => {
                    warn!("terrain mesh not rebuilt: {err}");
                    report.mesh = Some(err);
                }
            },
            Err(err) => {
                warn!("terrain surface not regenerated: {err}");
                report.surface = Some(err);
            }
        }

        match synthesize(&config.profile, config.texture_width, config.texture_height) {
            Ok(texture) => self.texture = Some(texture.image),
            Err(err) => {
                warn!("terrain texture not regenerated: {err}");
                report.texture = Some(err);
            }
        }

        if report.is_ok() {
            info!(
                "terrain regenerated (seed {})",
                self.surface.as_ref().map_or(0, |s| s.seed)
            );
        }
        report
    }
}

/// Resource holding the level configuration and whether it has changed.
///
/// Edit `config` and call [`mark_dirty`] to have the next [`sync_terrain`]
/// pass regenerate and re-upload the terrain.
///
/// [`mark_dirty`]: TerrainSettings::mark_dirty
#[derive(Resource)]
pub struct TerrainSettings {
    pub config: LevelConfig,
    pub level: Level,
    rng: ChaCha8Rng,
    dirty: bool,
}

impl TerrainSettings {
    /// Creates the resource with an entropy-seeded RNG for random seed mode.
    /// The terrain is generated on the next [`sync_terrain`] run.
    pub fn new(config: LevelConfig) -> Self {
        Self::with_rng(config, ChaCha8Rng::from_entropy())
    }

    /// Creates the resource with an explicit RNG, for reproducible random mode.
    pub fn with_rng(config: LevelConfig, rng: ChaCha8Rng) -> Self {
        Self {
            config,
            level: Level::new(),
            rng,
            dirty: true,
        }
    }

    /// Marks the configuration as changed so [`sync_terrain`] regenerates.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Regenerates if dirty, returning the report of the run.
    pub fn regenerate_if_dirty(&mut self) -> Option<LevelReport> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(self.level.regenerate(&self.config, &mut self.rng))
    }
}

/// Resource holding the GPU-side terrain asset handles.
///
/// # Example
///
/// ```ignore
/// commands.insert_resource(TerrainAssets {
///     mesh: meshes.add(Mesh::from(Rectangle::default())),
///     texture: images.add(Image::default()),
/// });
/// commands.insert_resource(TerrainSettings::new(LevelConfig::default()));
/// app.add_systems(Update, sync_terrain);
/// ```
#[derive(Resource)]
pub struct TerrainAssets {
    pub mesh: Handle<Mesh>,
    pub texture: Handle<Image>,
}

/// Bevy system that regenerates the terrain when [`TerrainSettings`] is
/// marked dirty and replaces the mesh and image assets.
///
/// Only does work after [`TerrainSettings::mark_dirty`], so it is safe to run
/// every frame.
pub fn sync_terrain(
    mut settings: ResMut<TerrainSettings>,
    assets: Res<TerrainAssets>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut images: ResMut<Assets<Image>>,
) {
    let Some(report) = settings.regenerate_if_dirty() else {
        return;
    };

    if report.surface.is_none()
        && report.mesh.is_none()
        && let Some(strip) = settings.level.strip()
        && let Some(mesh) = meshes.get_mut(&assets.mesh)
    {
        *mesh = strip.to_mesh();
    }

    if report.texture.is_none()
        && let Some(texture) = settings.level.texture()
        && let Some(image) = images.get_mut(&assets.texture)
    {
        *image = texture_to_image(texture);
    }
}

/// Bevy system drawing the authored path, its handles and mirrored handles.
pub fn draw_path_gizmos(settings: Res<TerrainSettings>, mut gizmos: Gizmos) {
    let Some(path) = settings.config.path() else {
        return;
    };

    let curve = Color::srgb(1.0, 0.92, 0.016);
    let handles = Color::srgb(0.5, 0.5, 0.5);
    let mirrored = Color::srgba(0.5, 0.5, 0.5, 0.5);

    for anchor in &settings.config.anchors {
        gizmos.line_2d(anchor.position, anchor.handle, handles);
        gizmos.line_2d(
            anchor.position,
            mirror_handle(anchor.position, anchor.handle),
            mirrored,
        );
    }

    for pair in path.polyline(32).windows(2) {
        gizmos.line_2d(pair[0], pair[1], curve);
    }
}
