//! Pixel formats and per-pixel byte encoding.
//!
//! A [`PixelFormat`] names one of the fixed byte layouts a texture stream
//! can produce and carries the pure encoding function from a decoded pixel
//! to that layout. The format is picked once per file (see
//! [`TextureReader`](crate::texture::TextureReader)) and dispatched via a
//! single `match` per pixel, keeping format branching out of the per-byte
//! copy loop.

use std::fmt;

use image::Rgba;

/// Largest encoded size of a single pixel across all formats, in bytes.
///
/// Sized for [`PixelFormat::Rgba8`]; used for fixed encode buffers.
pub const MAX_BYTES_PER_PIXEL: usize = 4;

/// Byte layout of an encoded pixel stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 3 bytes per pixel: red, green, blue. Any alpha channel on the
    /// decoded source is discarded.
    Rgb8,
    /// 4 bytes per pixel: red, green, blue, alpha.
    Rgba8,
}

impl PixelFormat {
    /// Number of bytes one encoded pixel occupies.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
        }
    }

    /// Encode one decoded pixel into `out`.
    ///
    /// Writes [`bytes_per_pixel()`](Self::bytes_per_pixel) bytes starting at
    /// `out[0]` and returns the number of bytes written. Bytes beyond the
    /// encoded length are left untouched. Pure: no error conditions, no
    /// side effects.
    pub fn encode(self, pixel: Rgba<u8>, out: &mut [u8; MAX_BYTES_PER_PIXEL]) -> usize {
        let Rgba([r, g, b, a]) = pixel;
        match self {
            PixelFormat::Rgb8 => {
                out[0] = r;
                out[1] = g;
                out[2] = b;
                3
            }
            PixelFormat::Rgba8 => {
                *out = [r, g, b, a];
                4
            }
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixelFormat::Rgb8 => write!(f, "RGB8"),
            PixelFormat::Rgba8 => write!(f, "RGBA8"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_per_pixel() {
        assert_eq!(PixelFormat::Rgb8.bytes_per_pixel(), 3);
        assert_eq!(PixelFormat::Rgba8.bytes_per_pixel(), 4);
    }

    #[test]
    fn test_encode_rgb8_drops_alpha() {
        let mut out = [0u8; MAX_BYTES_PER_PIXEL];
        let written = PixelFormat::Rgb8.encode(Rgba([10, 20, 30, 255]), &mut out);
        assert_eq!(written, 3);
        assert_eq!(&out[..3], &[10, 20, 30]);
    }

    #[test]
    fn test_encode_rgba8_keeps_alpha() {
        let mut out = [0u8; MAX_BYTES_PER_PIXEL];
        let written = PixelFormat::Rgba8.encode(Rgba([10, 20, 30, 255]), &mut out);
        assert_eq!(written, 4);
        assert_eq!(out, [10, 20, 30, 255]);
    }

    #[test]
    fn test_encode_leaves_trailing_bytes_untouched() {
        let mut out = [0xAA; MAX_BYTES_PER_PIXEL];
        PixelFormat::Rgb8.encode(Rgba([1, 2, 3, 4]), &mut out);
        assert_eq!(out, [1, 2, 3, 0xAA]);
    }

    #[test]
    fn test_display() {
        assert_eq!(PixelFormat::Rgb8.to_string(), "RGB8");
        assert_eq!(PixelFormat::Rgba8.to_string(), "RGBA8");
    }

    #[test]
    fn test_format_is_copy_and_comparable() {
        let fmt = PixelFormat::Rgba8;
        let copy = fmt;
        assert_eq!(fmt, copy);
        assert_ne!(PixelFormat::Rgb8, PixelFormat::Rgba8);
    }
}
