/// Convenience result type used across the crate.
pub type LivingResult<T> = Result<T, LivingError>;

/// Top-level error taxonomy.
///
/// Only setup can fail: configuration, image loading and surface allocation. Once a
/// [`crate::LivingImage`] exists, ticking and rendering are infallible.
#[derive(thiserror::Error, Debug)]
pub enum LivingError {
    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// The source image could not be decoded, rasterized or has an inconsistent buffer.
    #[error("image error: {0}")]
    Image(String),

    /// The rendering surface could not be created or resized.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LivingError {
    /// Build a [`LivingError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LivingError::Image`] value.
    pub fn image(msg: impl Into<String>) -> Self {
        Self::Image(msg.into())
    }

    /// Build a [`LivingError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
