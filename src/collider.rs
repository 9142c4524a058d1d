//! Avian3D physics collider generation from a terrain boundary line.
//!
//! Provides [`build_boundary_collider`] which converts the ordered ground line
//! produced by [`crate::StripMeshBuilder`] into an Avian3D `Collider::polyline`
//! lying in the `z = 0` plane, the plane the strip mesh is drawn in.

use avian3d::prelude::Collider;
use bevy::prelude::*;

/// Builds an Avian3D polyline `Collider` following `boundary`.
///
/// Consecutive points are joined by edges; the line is left open at both
/// ends. Points are used in world units, so attach the collider to the same
/// entity as the strip mesh with an identity offset.
///
/// Returns `None` when fewer than two points are given.
///
/// # Example
///
/// ```ignore
/// use bevy_hill_strip::build_boundary_collider;
///
/// if let Some(collider) = build_boundary_collider(&strip.boundary) {
///     commands.spawn((collider, RigidBody::Static));
/// }
/// ```
pub fn build_boundary_collider(boundary: &[Vec2]) -> Option<Collider> {
    if boundary.len() < 2 {
        return None;
    }

    let vertices: Vec<Vec3> = boundary.iter().map(|p| p.extend(0.0)).collect();
    let indices: Vec<[u32; 2]> = (0..boundary.len() as u32 - 1).map(|i| [i, i + 1]).collect();

    Some(Collider::polyline(vertices, Some(indices)))
}
