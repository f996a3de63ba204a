//! Error types for texture loading.

use std::io;

use thiserror::Error;

/// Result type for texture loading operations.
pub type TextureResult<T> = Result<T, TextureError>;

/// Errors that can occur while loading a texture.
#[derive(Debug, Error)]
pub enum TextureError {
    /// The file extension is not in the supported set.
    #[error("Unsupported file extension: {0:?}")]
    UnsupportedExtension(String),

    /// The decoder rejected the file contents.
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// Reading the file from disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
