//! Error taxonomy shared by the generation pipeline.

use thiserror::Error;

/// Errors reported by terrain, mesh and texture generation.
///
/// Every variant aborts only the sub-step that raised it. Callers such as
/// [`crate::level::Level`] keep their previous artifacts when one is returned.
#[derive(Error, Debug)]
pub enum TerrainError {
    /// The layer profile has no layers at all.
    #[error("layer profile is empty")]
    EmptyProfile,
    /// The sum of positive layer thicknesses is not above zero.
    #[error("total layer thickness must be positive (got {0})")]
    NonPositiveThickness(f32),
    /// Requested bitmap dimensions cannot hold a single pixel.
    #[error("invalid texture dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    /// A surface or noise parameter is non-finite or out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Mesh building needs at least two surface points.
    #[error("at least 2 surface points are required to build a mesh (got {found})")]
    InsufficientPoints { found: usize },
    /// Saving a generated bitmap failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

impl TerrainError {
    /// Returns `true` for errors caused by the caller's configuration rather
    /// than by the data flowing through the pipeline.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::EmptyProfile
                | Self::NonPositiveThickness(_)
                | Self::InvalidDimensions { .. }
                | Self::InvalidConfig(_)
        )
    }
}
