//! Texture loading for engine consumption.
//!
//! [`TextureReader`] is the boundary between image files and the engine's
//! upload path: it dispatches on the file extension, hands the bytes to the
//! `image` decoder, and packages the decoded grid as a [`Texture`] whose
//! pixel data is consumed incrementally through a
//! [`PixelStream`](crate::stream::PixelStream).

mod error;
mod reader;

pub use error::{TextureError, TextureResult};
pub use reader::TextureReader;

use crate::pixel::PixelFormat;
use crate::stream::PixelStream;

/// A decoded texture ready for upload.
///
/// `stream` yields exactly `width * height * format.bytes_per_pixel()`
/// bytes of pixel data in row-major order.
#[derive(Debug)]
pub struct Texture {
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
    /// Byte layout of the pixel stream.
    pub format: PixelFormat,
    /// Pixel data as an incremental byte stream.
    pub stream: PixelStream,
}
