//! Piecewise cubic Bézier path through authored anchors.
//!
//! Each anchor carries a single authored handle. A segment runs from one anchor
//! to the next using the start anchor's handle as the outgoing control point
//! and the *mirror* of the end anchor's handle as the incoming one:
//!
//! ```text
//!   A ── B                 C ── D ── H
//!   │    start handle      │    │    authored handle of D
//!   start anchor           │    end anchor
//!                          mirrored: C = 2·D − H
//! ```
//!
//! Because the next segment leaves `D` through `H`, the tangent on both sides
//! of `D` lies on the same line and the path is tangent-continuous without
//! requiring two handles per anchor.

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

/// One authored anchor of the path plus its outgoing handle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub position: Vec2,
    pub handle: Vec2,
}

impl ControlPoint {
    pub fn new(position: Vec2, handle: Vec2) -> Self {
        Self { position, handle }
    }
}

/// Reflects `handle` through `anchor`, giving the incoming control point that
/// keeps the tangent continuous across the anchor.
#[inline]
pub fn mirror_handle(anchor: Vec2, handle: Vec2) -> Vec2 {
    anchor * 2.0 - handle
}

/// A single cubic piece between two consecutive anchors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub start_handle: Vec2,
    /// Incoming handle at `end`, already mirrored.
    pub end_handle: Vec2,
    pub end: Vec2,
}

impl Segment {
    /// Builds the segment between `from` and `to`, mirroring `to`'s authored
    /// handle into the incoming control point.
    pub fn between(from: &ControlPoint, to: &ControlPoint) -> Self {
        Self {
            start: from.position,
            start_handle: from.handle,
            end_handle: mirror_handle(to.position, to.handle),
            end: to.position,
        }
    }

    /// Evaluates the cubic Bernstein blend at local parameter `u ∈ [0, 1]`.
    pub fn point(&self, u: f32) -> Vec2 {
        let v = 1.0 - u;
        let uu = u * u;
        let vv = v * v;
        self.start * (vv * v)
            + self.start_handle * (3.0 * vv * u)
            + self.end_handle * (3.0 * v * uu)
            + self.end * (uu * u)
    }
}

/// Ordered sequence of [`Segment`]s evaluated with a single global parameter.
///
/// The global parameter is split uniformly across segments, so equal steps in
/// `t` cover equal *segment fractions*, not equal arc lengths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    origin: Vec2,
    segments: Vec<Segment>,
}

impl Path {
    /// Builds a path from anchors in the order given.
    ///
    /// `origin` is returned by [`Path::evaluate`] when fewer than two anchors
    /// are supplied and the path is therefore empty.
    pub fn from_anchors(origin: Vec2, anchors: &[ControlPoint]) -> Self {
        let segments = anchors
            .windows(2)
            .map(|pair| Segment::between(&pair[0], &pair[1]))
            .collect();
        Self { origin, segments }
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments (anchor count − 1, or 0).
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Evaluates the path at global parameter `t`, clamped to `[0, 1]`.
    pub fn evaluate(&self, t: f32) -> Vec2 {
        if self.segments.is_empty() {
            return self.origin;
        }

        let count = self.segments.len();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let scaled = t * count as f32;
        let index = (scaled.floor() as usize).min(count - 1);
        let local = (scaled - index as f32).clamp(0.0, 1.0);
        self.segments[index].point(local)
    }

    /// Samples every segment at `steps_per_segment` evenly spaced local
    /// parameters, returning a polyline that starts at the first anchor.
    ///
    /// Used for debug drawing; an empty path yields an empty polyline.
    pub fn polyline(&self, steps_per_segment: usize) -> Vec<Vec2> {
        let Some(first) = self.segments.first() else {
            return Vec::new();
        };
        let steps = steps_per_segment.max(1);

        let mut points = Vec::with_capacity(self.segments.len() * steps + 1);
        points.push(first.start);
        for segment in &self.segments {
            for i in 1..=steps {
                points.push(segment.point(i as f32 / steps as f32));
            }
        }
        points
    }
}
