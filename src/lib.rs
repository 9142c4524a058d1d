//! Procedural hill-road terrain strips for side-scrolling Bevy games.
//!
//! Builds a ground profile that follows an authored Bézier path, perturbs it
//! with fractal noise, and turns it into a filled ribbon mesh, a matching
//! boundary line, and a depth-layered texture.
//!
//! # Pipeline
//!
//! - **Path**: [`Path`] evaluates a piecewise cubic Bézier curve through ordered
//!   [`ControlPoint`]s, mirroring each anchor's handle for tangent continuity.
//! - **Noise**: [`fractal_noise`] sums octaves of a pure [`Noise2D`] primitive
//!   ([`PerlinNoise`] by default); seeds shift coordinates via [`NoiseOffset`].
//! - **Surface**: [`generate_surface`] merges path and noise into a [`Surface`]
//!   with a flat start that blends into hills.
//! - **Mesh**: [`StripMeshBuilder`] fills the area under the surface down to a
//!   flat floor and returns the boundary line alongside the geometry.
//! - **Texture**: [`synthesize`] paints a [`LayerProfile`] into an RGBA bitmap;
//!   [`texture_to_image`] uploads it as a Bevy [`bevy::prelude::Image`].
//! - **Level**: [`Level`] regenerates all of the above in one call and keeps the
//!   previous artifacts when a stage fails; [`sync_terrain`] drives it from a
//!   dirty-flagged [`TerrainSettings`] resource.
//!
//! # Feature Flags
//!
//! - `physics`: Enables [`collider`] and [`collider::build_boundary_collider`]
//!   for Avian3D integration.
//!
//! # Example
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_hill_strip::{LevelConfig, TerrainAssets, TerrainSettings, sync_terrain};
//!
//! fn setup(
//!     mut commands: Commands,
//!     mut meshes: ResMut<Assets<Mesh>>,
//!     mut images: ResMut<Assets<Image>>,
//!     mut materials: ResMut<Assets<ColorMaterial>>,
//! ) {
//!     let mesh = meshes.add(Mesh::from(Rectangle::default()));
//!     let texture = images.add(Image::default());
//!
//!     commands.spawn((
//!         Mesh2d(mesh.clone()),
//!         MeshMaterial2d(materials.add(ColorMaterial::from(texture.clone()))),
//!     ));
//!     commands.insert_resource(TerrainAssets { mesh, texture });
//!     commands.insert_resource(TerrainSettings::new(LevelConfig::default()));
//! }
//!
//! App::new()
//!     .add_plugins(DefaultPlugins)
//!     .add_systems(Startup, setup)
//!     .add_systems(Update, sync_terrain)
//!     .run();
//! ```

pub mod error;
pub mod fractal;
pub mod level;
pub mod mesher;
pub mod path;
pub mod profile;
pub mod surface;
pub mod texture;

#[cfg(feature = "physics")]
pub mod collider;

pub use error::TerrainError;
pub use fractal::{Noise2D, NoiseConfig, NoiseOffset, PerlinNoise, fractal_noise};
pub use level::{
    Level, LevelConfig, LevelReport, TerrainAssets, TerrainSettings, draw_path_gizmos,
    sync_terrain,
};
pub use mesher::{StripMesh, StripMeshBuilder};
pub use path::{ControlPoint, Path, Segment, mirror_handle};
pub use profile::{Band, Layer, LayerProfile};
pub use surface::{SeedMode, Surface, SurfaceConfig, generate_surface};
pub use texture::{SynthesizedTexture, sample_bilinear, save_png, synthesize, texture_to_image};

#[cfg(feature = "physics")]
pub use collider::build_boundary_collider;
