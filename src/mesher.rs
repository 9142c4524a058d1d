//! Ribbon mesh generation from a surface point sequence.
//!
//! Converts an ordered list of surface points into a filled strip that hangs
//! from the road down to a flat floor:
//! - two vertex rows (surface on top, floor at the bottom)
//! - `TriangleList` topology with counter-clockwise winding facing +Z
//! - smooth per-vertex normals (area-weighted average of adjacent face normals)
//! - UVs stretched once across the strip (`u` along the road, `v` top = 1)
//!
//! The builder also hands back the boundary line used by physics and item
//! placement, which is the input sequence unmodified.

use bevy::asset::RenderAssetUsages;
use bevy::math::{Vec2, Vec3};
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::Mesh;

use crate::error::TerrainError;

/// Geometry for the filled terrain strip.
///
/// For `N` surface points the strip stores `2N` vertices: index `i` is the
/// surface vertex of column `i`, index `i + N` is the floor vertex below it.
#[derive(Debug, Clone, PartialEq)]
pub struct StripMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
    /// Minimum corner of the vertex bounds.
    pub min: Vec3,
    /// Maximum corner of the vertex bounds.
    pub max: Vec3,
    /// Ground line for colliders and item placement.
    pub boundary: Vec<Vec2>,
}

impl StripMesh {
    /// Number of surface columns (`N`).
    pub fn columns(&self) -> usize {
        self.boundary.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Converts the strip into a Bevy [`Mesh`] with positions, normals, UV_0
    /// and `u32` indices.
    pub fn to_mesh(&self) -> Mesh {
        let mut mesh = Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        );
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, self.positions.clone());
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, self.normals.clone());
        mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, self.uvs.clone());
        mesh.insert_indices(Indices::U32(self.indices.clone()));
        mesh
    }
}

/// Builds a [`StripMesh`] from surface points.
///
/// # Example
///
/// ```ignore
/// use bevy_hill_strip::StripMeshBuilder;
///
/// let strip = StripMeshBuilder::new()
///     .with_baseline(0.0)
///     .with_bottom_depth(20.0)
///     .build(&surface.points)?;
/// let mesh = strip.to_mesh();
/// ```
pub struct StripMeshBuilder {
    baseline: f32,
    bottom_depth: f32,
}

impl Default for StripMeshBuilder {
    fn default() -> Self {
        Self {
            baseline: 0.0,
            bottom_depth: 20.0,
        }
    }
}

impl StripMeshBuilder {
    /// Creates a builder with a baseline of `0.0` and a depth of `20.0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the flat height the floor depth is measured from.
    pub fn with_baseline(mut self, baseline: f32) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets how far below the baseline the floor row sits.
    pub fn with_bottom_depth(mut self, depth: f32) -> Self {
        self.bottom_depth = depth;
        self
    }

    /// Height of the floor row.
    pub fn floor(&self) -> f32 {
        self.baseline - self.bottom_depth
    }

    /// Builds the strip.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InsufficientPoints`] when fewer than two
    /// points are given, since at least one quad is required.
    pub fn build(&self, points: &[Vec2]) -> Result<StripMesh, TerrainError> {
        let n = points.len();
        if n < 2 {
            return Err(TerrainError::InsufficientPoints { found: n });
        }

        let floor = self.floor();
        let last = (n - 1) as f32;

        let mut positions: Vec<[f32; 3]> = vec![[0.0; 3]; n * 2];
        let mut uvs: Vec<[f32; 2]> = vec![[0.0; 2]; n * 2];

        for (i, p) in points.iter().enumerate() {
            let u = i as f32 / last;
            positions[i] = [p.x, p.y, 0.0];
            positions[i + n] = [p.x, floor, 0.0];
            uvs[i] = [u, 1.0];
            uvs[i + n] = [u, 0.0];
        }

        // Each column pair (i, i+1) emits two triangles sharing the bl-tr edge:
        //   tl──tr
        //   │ ╱ │     Triangle 1: bl, tr, tl
        //   │╱  │     Triangle 2: bl, br, tr
        //   bl──br
        // CCW seen from +Z (the 2D camera) while x increases along the road.
        let quad_count = n - 1;
        let mut indices: Vec<u32> = Vec::with_capacity(quad_count * 6);

        for i in 0..quad_count {
            let tl = i as u32;
            let tr = (i + 1) as u32;
            let bl = (i + n) as u32;
            let br = (i + 1 + n) as u32;

            indices.extend_from_slice(&[bl, tr, tl]);
            indices.extend_from_slice(&[bl, br, tr]);
        }

        let normals = smooth_normals(&positions, &indices);

        let (min, max) = positions.iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(min, max), p| {
                let p = Vec3::from(*p);
                (min.min(p), max.max(p))
            },
        );

        Ok(StripMesh {
            positions,
            normals,
            uvs,
            indices,
            min,
            max,
            boundary: points.to_vec(),
        })
    }
}

/// Accumulates each triangle's unnormalized face normal at its three vertices
/// and normalizes the sums. Larger triangles contribute more.
fn smooth_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut normals: Vec<Vec3> = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let p0 = Vec3::from(positions[i0]);
        let p1 = Vec3::from(positions[i1]);
        let p2 = Vec3::from(positions[i2]);
        let face_normal = (p1 - p0).cross(p2 - p0);
        normals[i0] += face_normal;
        normals[i1] += face_normal;
        normals[i2] += face_normal;
    }

    normals
        .iter()
        .map(|n| {
            let len = n.length();
            // Degenerate column (zero-height strip): face the viewer.
            if len > f32::EPSILON { (*n / len).into() } else { [0.0, 0.0, 1.0] }
        })
        .collect()
}
