//! Layered terrain texture synthesis and GPU upload.
//!
//! Paints an RGBA bitmap by mapping each row's depth (0 at the top, 1 at the
//! bottom) onto the bands of a [`LayerProfile`]. Within a band a layer shows
//! its flat color, optionally mixed with a tiled source bitmap, and fades into
//! its neighbors' flat colors across the configured edge fractions.
//!
//! Rows that fall outside every band (possible at the very bottom when the
//! accumulated band ends round below 1.0) use the last layer's flat color.
//! That fallback can show as a one-pixel seam against a textured last layer
//! and may be hiding a band boundary bug; it is counted and logged rather
//! than corrected.

use std::path::Path;

use bevy::asset::RenderAssetUsages;
use bevy::color::{ColorToPacked, Mix, Srgba};
use bevy::image::{ImageAddressMode, ImageSampler, ImageSamplerDescriptor};
use bevy::log::{debug, warn};
use bevy::prelude::Image;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use image::{Rgba, RgbaImage};

use crate::error::TerrainError;
use crate::profile::{Band, Layer, LayerProfile};

/// A synthesized bitmap plus diagnostics from the run.
#[derive(Debug, Clone)]
pub struct SynthesizedTexture {
    pub image: RgbaImage,
    /// Pixels that matched no band and took the last layer's color.
    pub fallback_pixels: u32,
}

/// Paints `profile` into a `width × height` bitmap.
///
/// # Errors
///
/// - [`TerrainError::InvalidDimensions`] if either dimension is zero.
/// - [`TerrainError::EmptyProfile`] if the profile has no layers.
/// - [`TerrainError::NonPositiveThickness`] if no layer has positive thickness.
pub fn synthesize(
    profile: &LayerProfile,
    width: u32,
    height: u32,
) -> Result<SynthesizedTexture, TerrainError> {
    if width == 0 || height == 0 {
        return Err(TerrainError::InvalidDimensions { width, height });
    }
    let Some(last_layer) = profile.layers.last() else {
        return Err(TerrainError::EmptyProfile);
    };
    let total = profile.total_thickness();
    if total <= 0.0 {
        return Err(TerrainError::NonPositiveThickness(total));
    }

    let bands = profile.bands();
    let layers = &profile.layers;
    let mut image = RgbaImage::new(width, height);
    let mut fallback_pixels = 0u32;

    for y in 0..height {
        let depth = if height > 1 { y as f32 / (height - 1) as f32 } else { 0.0 };
        let matched = bands.iter().position(|band| band.contains(depth));

        for x in 0..width {
            let color = match matched {
                Some(i) => {
                    let u = x as f32 / width as f32;
                    let previous = i.checked_sub(1).map(|p| layers[p].color);
                    let next = layers.get(i + 1).map(|l| l.color);
                    layer_color(&layers[i], &bands[i], depth, u, previous, next)
                }
                None => {
                    fallback_pixels += 1;
                    last_layer.color
                }
            };
            image.put_pixel(x, y, Rgba(color.to_u8_array()));
        }
    }

    if fallback_pixels > 0 {
        warn!(
            "{fallback_pixels} texture pixels matched no layer band; used the last layer's color"
        );
    }
    debug!("synthesized {width}x{height} layered texture from {} layers", layers.len());

    Ok(SynthesizedTexture {
        image,
        fallback_pixels,
    })
}

/// Color of `layer` at `depth` and horizontal coordinate `u ∈ [0, 1)`.
fn layer_color(
    layer: &Layer,
    band: &Band,
    depth: f32,
    u: f32,
    previous: Option<Srgba>,
    next: Option<Srgba>,
) -> Srgba {
    let local = band.local(depth);

    let base = match &layer.texture {
        Some(texture) => {
            let sample = sample_bilinear(texture, u * layer.tiling_x, local * layer.tiling_y);
            layer.color.mix(&sample, layer.texture_blend.clamp(0.0, 1.0))
        }
        None => layer.color,
    };

    let into_previous = layer.blend_into_previous;
    let into_next = layer.blend_into_next;

    if into_previous > 0.0 && local <= into_previous {
        match previous {
            Some(previous) => previous.mix(&base, inverse_lerp(0.0, into_previous, local)),
            None => base,
        }
    } else if into_next > 0.0 && local >= 1.0 - into_next {
        match next {
            Some(next) => base.mix(&next, inverse_lerp(1.0 - into_next, 1.0, local)),
            None => base,
        }
    } else {
        base
    }
}

#[inline]
fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}

/// Bilinearly samples `texture` at normalized `(u, v)` with repeat wrapping.
///
/// Texel centers sit at `(i + 0.5) / size`, so `(0, 0)` blends the four
/// corner texels. `v = 0` is the first image row.
pub fn sample_bilinear(texture: &RgbaImage, u: f32, v: f32) -> Srgba {
    let (w, h) = texture.dimensions();
    if w == 0 || h == 0 {
        return Srgba::NONE;
    }

    let fx = u * w as f32 - 0.5;
    let fy = v * h as f32 - 0.5;
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = fx - x0;
    let ty = fy - y0;

    let wrap = |i: f32, size: u32| (i as i64).rem_euclid(size as i64) as u32;
    let texel = |x: f32, y: f32| {
        let [r, g, b, a] = texture.get_pixel(wrap(x, w), wrap(y, h)).0;
        Srgba::rgba_u8(r, g, b, a)
    };

    let top = texel(x0, y0).mix(&texel(x0 + 1.0, y0), tx);
    let bottom = texel(x0, y0 + 1.0).mix(&texel(x0 + 1.0, y0 + 1.0), tx);
    top.mix(&bottom, ty)
}

/// Converts a synthesized bitmap into a tiling Bevy [`Image`] (RGBA8 sRGB).
///
/// Rows are uploaded bottom-up: the strip mesh puts `v = 1` on the surface
/// and `v = 0` on the floor, while wgpu samples `v = 0` from the first row in
/// memory. Flipping here keeps depth 0 (the first layer) under the surface.
///
/// The image uses `Repeat` address mode so the texture can tile along a long
/// strip.
pub fn texture_to_image(bitmap: &RgbaImage) -> Image {
    let (width, height) = bitmap.dimensions();
    let data = image::imageops::flip_vertical(bitmap).into_raw();

    let mut image = Image::new(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    );

    image.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
        address_mode_u: ImageAddressMode::Repeat,
        address_mode_v: ImageAddressMode::Repeat,
        ..Default::default()
    });

    image
}

/// Writes `bitmap` to `path` as PNG.
///
/// Persistence is optional for the pipeline; callers usually log and ignore
/// the error.
pub fn save_png(bitmap: &RgbaImage, path: impl AsRef<Path>) -> Result<(), TerrainError> {
    bitmap.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}
