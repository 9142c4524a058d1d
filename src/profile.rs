//! Layer profiles for the depth-based terrain texture.

use bevy::color::Srgba;
use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// One horizontal stratum of the terrain texture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layer {
    /// Flat color of the layer, also the target of neighbor edge blends.
    pub color: Srgba,
    /// Optional source bitmap sampled inside the layer's band.
    ///
    /// Not serialized: a layer loaded from JSON has no bitmap until the host
    /// attaches one with [`Layer::with_texture`], and until then the tiling and
    /// `texture_blend` fields have no effect.
    #[serde(skip)]
    pub texture: Option<RgbaImage>,
    /// Relative thickness. Non-positive values give the layer an empty band.
    pub thickness: f32,
    pub tiling_x: f32,
    pub tiling_y: f32,
    /// Mix from flat color (0) to texture sample (1).
    pub texture_blend: f32,
    /// Leading fraction of the band that fades in from the previous layer's color.
    pub blend_into_previous: f32,
    /// Trailing fraction of the band that fades out into the next layer's color.
    pub blend_into_next: f32,
}

impl Default for Layer {
    fn default() -> Self {
        Self {
            color: Srgba::WHITE,
            texture: None,
            thickness: 1.0,
            tiling_x: 1.0,
            tiling_y: 1.0,
            texture_blend: 1.0,
            blend_into_previous: 0.1,
            blend_into_next: 0.1,
        }
    }
}

impl Layer {
    /// A flat-colored layer with default thickness and blending.
    pub fn solid(color: Srgba) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    pub fn with_thickness(mut self, thickness: f32) -> Self {
        self.thickness = thickness;
        self
    }

    /// Sets both edge blend fractions, each clamped to `[0, 1]`.
    pub fn with_blend(mut self, into_previous: f32, into_next: f32) -> Self {
        self.blend_into_previous = into_previous.clamp(0.0, 1.0);
        self.blend_into_next = into_next.clamp(0.0, 1.0);
        self
    }

    /// Attaches a source bitmap with its tiling and blend weight.
    pub fn with_texture(
        mut self,
        texture: RgbaImage,
        tiling_x: f32,
        tiling_y: f32,
        blend: f32,
    ) -> Self {
        self.texture = Some(texture);
        self.tiling_x = tiling_x;
        self.tiling_y = tiling_y;
        self.texture_blend = blend.clamp(0.0, 1.0);
        self
    }
}

/// Normalized vertical extent of a layer, `0` at the top of the bitmap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub start: f32,
    pub end: f32,
}

impl Band {
    /// Inclusive on both ends; the first matching layer wins at a shared edge.
    pub fn contains(&self, depth: f32) -> bool {
        depth >= self.start && depth <= self.end
    }

    pub fn height(&self) -> f32 {
        self.end - self.start
    }

    /// Position of `depth` inside the band: 0 at the top, 1 at the bottom.
    pub fn local(&self, depth: f32) -> f32 {
        let height = self.height();
        if height > 0.0 { (depth - self.start) / height } else { 0.0 }
    }
}

/// Ordered top-to-bottom stack of [`Layer`]s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerProfile {
    pub layers: Vec<Layer>,
}

impl LayerProfile {
    pub fn new(layers: Vec<Layer>) -> Self {
        Self { layers }
    }

    /// Grass over packed dirt over bedrock.
    pub fn hill_road() -> Self {
        Self::new(vec![
            Layer::solid(Srgba::rgb_u8(86, 160, 58)).with_thickness(0.15),
            Layer::solid(Srgba::rgb_u8(120, 84, 52)).with_thickness(0.55),
            Layer::solid(Srgba::rgb_u8(92, 88, 84)).with_thickness(0.3),
        ])
    }

    /// Sum of positive thicknesses.
    pub fn total_thickness(&self) -> f32 {
        self.layers
            .iter()
            .map(|l| l.thickness)
            .filter(|t| *t > 0.0)
            .sum()
    }

    /// Cumulative bands covering `[0, 1]` in stacking order.
    ///
    /// Returns an empty list when the total thickness is not positive. The
    /// last band's end is the accumulated sum and may land a hair below 1.0.
    pub fn bands(&self) -> Vec<Band> {
        let total = self.total_thickness();
        if total <= 0.0 {
            return Vec::new();
        }

        let mut accum = 0.0f32;
        self.layers
            .iter()
            .map(|layer| {
                let normalized = if layer.thickness > 0.0 {
                    layer.thickness / total
                } else {
                    0.0
                };
                let band = Band {
                    start: accum,
                    end: accum + normalized,
                };
                accum += normalized;
                band
            })
            .collect()
    }
}
