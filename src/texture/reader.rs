//! Extension dispatch and image decoding.

use std::fs;
use std::path::Path;

use image::ImageFormat;
use tracing::debug;

use crate::pixel::PixelFormat;
use crate::stream::PixelStream;
use crate::texture::{Texture, TextureError, TextureResult};

/// File extensions the reader accepts, normalized (lowercase, no dot).
const SUPPORTED_EXTENSIONS: [&str; 5] = ["bmp", "jpg", "jpeg", "png", "tga"];

/// Extensions whose alpha channel is kept in the output stream. Every other
/// supported extension is treated as opaque, even if the decoded source
/// carries alpha.
const ALPHA_EXTENSIONS: [&str; 2] = ["png", "tga"];

/// Reader that turns raster image files into [`Texture`] values.
///
/// The pixel format is chosen per file from its extension, before the pixel
/// loop, so the streaming encode path carries no per-pixel format branch:
/// alpha-capable extensions map to [`PixelFormat::Rgba8`], the rest to
/// [`PixelFormat::Rgb8`].
///
/// # Example
///
/// ```
/// use texstream::{PixelFormat, TextureReader};
///
/// let reader = TextureReader::new();
/// assert!(reader.supports_extension(".png"));
/// assert_eq!(
///     reader.pixel_format_for_extension("png"),
///     Some(PixelFormat::Rgba8)
/// );
/// assert_eq!(
///     reader.pixel_format_for_extension("jpg"),
///     Some(PixelFormat::Rgb8)
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextureReader;

impl TextureReader {
    /// Create a new texture reader.
    pub fn new() -> Self {
        Self
    }

    /// Extensions this reader supports, normalized (lowercase, no dot).
    pub fn supported_extensions(&self) -> &'static [&'static str] {
        &SUPPORTED_EXTENSIONS
    }

    /// Whether the reader accepts files with the given extension.
    ///
    /// Extensions are matched case-insensitively, with or without the
    /// leading dot.
    pub fn supports_extension(&self, extension: &str) -> bool {
        let ext = normalize_extension(extension);
        SUPPORTED_EXTENSIONS.contains(&ext.as_str())
    }

    /// The pixel format a file with the given extension decodes to, or
    /// `None` if the extension is unsupported.
    pub fn pixel_format_for_extension(&self, extension: &str) -> Option<PixelFormat> {
        let ext = normalize_extension(extension);
        if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
            return None;
        }
        if ALPHA_EXTENSIONS.contains(&ext.as_str()) {
            Some(PixelFormat::Rgba8)
        } else {
            Some(PixelFormat::Rgb8)
        }
    }

    /// Decode `bytes` as an image of the format named by `extension` and
    /// wrap the result as a [`Texture`].
    ///
    /// # Errors
    ///
    /// Returns [`TextureError::UnsupportedExtension`] if the extension is
    /// not in the supported set, or [`TextureError::Decode`] if the decoder
    /// rejects the bytes.
    pub fn read(&self, bytes: &[u8], extension: &str) -> TextureResult<Texture> {
        let ext = normalize_extension(extension);
        let hint = decoder_format_for(&ext)
            .ok_or_else(|| TextureError::UnsupportedExtension(extension.to_string()))?;
        let pixel_format = if ALPHA_EXTENSIONS.contains(&ext.as_str()) {
            PixelFormat::Rgba8
        } else {
            PixelFormat::Rgb8
        };

        let image = image::load_from_memory_with_format(bytes, hint)?.into_rgba8();
        debug!(
            width = image.width(),
            height = image.height(),
            format = %pixel_format,
            extension = %ext,
            "Decoded texture"
        );

        Ok(Texture {
            width: image.width(),
            height: image.height(),
            format: pixel_format,
            stream: PixelStream::new(image, pixel_format),
        })
    }

    /// Read and decode the image file at `path`, dispatching on its
    /// extension.
    ///
    /// # Errors
    ///
    /// Returns [`TextureError::UnsupportedExtension`] for files without a
    /// supported extension, [`TextureError::Io`] if the file cannot be
    /// read, or [`TextureError::Decode`] if decoding fails.
    pub fn read_path(&self, path: &Path) -> TextureResult<Texture> {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !self.supports_extension(extension) {
            return Err(TextureError::UnsupportedExtension(extension.to_string()));
        }
        let bytes = fs::read(path)?;
        self.read(&bytes, extension)
    }
}

/// Strip the leading dot and lowercase.
fn normalize_extension(extension: &str) -> String {
    extension.trim_start_matches('.').to_ascii_lowercase()
}

/// Decoder format hint for a normalized extension.
fn decoder_format_for(ext: &str) -> Option<ImageFormat> {
    match ext {
        "bmp" => Some(ImageFormat::Bmp),
        "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
        "png" => Some(ImageFormat::Png),
        "tga" => Some(ImageFormat::Tga),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgba, RgbaImage};
    use std::io::{Cursor, Read, Seek, SeekFrom};

    /// Encode a small RGBA image as PNG bytes in memory.
    fn png_bytes(image: RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_supports_extension_normalization() {
        let reader = TextureReader::new();
        assert!(reader.supports_extension("png"));
        assert!(reader.supports_extension(".png"));
        assert!(reader.supports_extension(".PNG"));
        assert!(reader.supports_extension("JPEG"));
        assert!(!reader.supports_extension(".gif"));
        assert!(!reader.supports_extension(""));
    }

    #[test]
    fn test_supported_extension_list() {
        let reader = TextureReader::new();
        assert_eq!(
            reader.supported_extensions(),
            &["bmp", "jpg", "jpeg", "png", "tga"]
        );
    }

    #[test]
    fn test_alpha_extensions_map_to_rgba8() {
        let reader = TextureReader::new();
        assert_eq!(
            reader.pixel_format_for_extension(".png"),
            Some(PixelFormat::Rgba8)
        );
        assert_eq!(
            reader.pixel_format_for_extension("tga"),
            Some(PixelFormat::Rgba8)
        );
    }

    #[test]
    fn test_opaque_extensions_map_to_rgb8() {
        let reader = TextureReader::new();
        for ext in [".bmp", ".jpg", ".jpeg"] {
            assert_eq!(
                reader.pixel_format_for_extension(ext),
                Some(PixelFormat::Rgb8),
                "{}",
                ext
            );
        }
    }

    #[test]
    fn test_unknown_extension_has_no_format() {
        let reader = TextureReader::new();
        assert_eq!(reader.pixel_format_for_extension("gif"), None);
        assert_eq!(reader.pixel_format_for_extension(""), None);
    }

    #[test]
    fn test_read_rejects_unsupported_extension() {
        let reader = TextureReader::new();
        let err = reader.read(&[0u8; 4], ".gif").unwrap_err();
        match err {
            TextureError::UnsupportedExtension(ext) => assert_eq!(ext, ".gif"),
            other => panic!("Expected UnsupportedExtension, got {:?}", other),
        }
    }

    #[test]
    fn test_read_propagates_decode_error() {
        let reader = TextureReader::new();
        let err = reader.read(&[1, 2, 3, 4], ".png").unwrap_err();
        assert!(matches!(err, TextureError::Decode(_)));
    }

    #[test]
    fn test_read_png_yields_rgba_stream() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([10, 20, 30, 255]));
        image.put_pixel(1, 0, Rgba([40, 50, 60, 128]));

        let reader = TextureReader::new();
        let mut texture = reader.read(&png_bytes(image), ".png").unwrap();
        assert_eq!(texture.width, 2);
        assert_eq!(texture.height, 1);
        assert_eq!(texture.format, PixelFormat::Rgba8);
        assert_eq!(texture.stream.len(), 8);

        let mut bytes = Vec::new();
        texture.stream.read_to_end(&mut bytes).unwrap();
        assert_eq!(bytes, vec![10, 20, 30, 255, 40, 50, 60, 128]);
    }

    #[test]
    fn test_read_path_dispatches_on_file_extension() {
        let mut image = RgbaImage::new(1, 1);
        image.put_pixel(0, 0, Rgba([7, 8, 9, 250]));

        let dir = std::env::temp_dir();
        let path = dir.join("texstream_reader_test.png");
        fs::write(&path, png_bytes(image)).unwrap();

        let reader = TextureReader::new();
        let mut texture = reader.read_path(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(texture.format, PixelFormat::Rgba8);
        let mut bytes = Vec::new();
        texture.stream.read_to_end(&mut bytes).unwrap();
        assert_eq!(bytes, vec![7, 8, 9, 250]);
    }

    #[test]
    fn test_read_path_rejects_unsupported_file() {
        let reader = TextureReader::new();
        let err = reader.read_path(Path::new("sprite.gif")).unwrap_err();
        assert!(matches!(err, TextureError::UnsupportedExtension(_)));
        let err = reader.read_path(Path::new("no_extension")).unwrap_err();
        assert!(matches!(err, TextureError::UnsupportedExtension(_)));
    }

    #[test]
    fn test_read_path_missing_file_is_io_error() {
        let reader = TextureReader::new();
        let err = reader
            .read_path(Path::new("/nonexistent/texstream/missing.png"))
            .unwrap_err();
        assert!(matches!(err, TextureError::Io(_)));
    }

    #[test]
    fn test_texture_stream_is_seekable() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([1, 2, 3, 4]));
        image.put_pixel(1, 0, Rgba([5, 6, 7, 8]));

        let reader = TextureReader::new();
        let mut texture = reader.read(&png_bytes(image), "png").unwrap();
        texture.stream.seek(SeekFrom::Start(4)).unwrap();
        let mut buf = [0u8; 4];
        texture.stream.read_exact(&mut buf).unwrap();
        assert_eq!(buf, [5, 6, 7, 8]);
    }
}
