//! Byte streaming over decoded pixel grids.
//!
//! [`PixelStream`] presents a decoded image as a linear byte sequence
//! without materializing the full byte buffer: the stream tracks a cursor
//! in pixel coordinates plus an intra-pixel byte offset, and encodes one
//! pixel at a time as the cursor enters it. This keeps peak memory at the
//! decoded grid itself while the engine's upload path consumes the bytes
//! incrementally through ordinary `Read`/`Seek` calls.

use std::fmt;
use std::io::{self, Read, Seek, SeekFrom};

use image::RgbaImage;

use crate::pixel::{PixelFormat, MAX_BYTES_PER_PIXEL};

/// A `Read`/`Seek` byte stream over an owned, decoded pixel grid.
///
/// The stream yields exactly `width * height * bytes_per_pixel` bytes of
/// pixel data in row-major order (left-to-right, top-to-bottom), encoded in
/// the [`PixelFormat`] chosen at construction. Addressing is byte-granular:
/// any byte position in `0..=len()` is a valid seek target, and reads may
/// start or stop mid-pixel. The encoding of the pixel under the cursor is
/// cached, so a pixel is encoded once per visit rather than once per byte.
///
/// Reading past the end of the grid is a short read (possibly zero bytes),
/// never an error; afterwards `position()` equals `len()`.
///
/// The stream takes ownership of the decoded image and releases it when
/// dropped. It is not reusable across files and supports one reader at a
/// time (`&mut self` on every cursor-moving call).
pub struct PixelStream {
    image: RgbaImage,
    format: PixelFormat,
    /// Cursor pixel column; always `< width` while the stream has pixels.
    x: u32,
    /// Cursor pixel row; `y == height` is the exhausted sentinel.
    y: u32,
    /// Byte offset within the current pixel's encoding.
    sub: usize,
    /// Encoding of pixel `(x, y)`; meaningful only while `cached` is set.
    encoded: [u8; MAX_BYTES_PER_PIXEL],
    cached: bool,
}

impl PixelStream {
    /// Create a stream over `image`, encoding pixels in `format`.
    ///
    /// The cursor starts at byte position 0. The image is moved into the
    /// stream and released when the stream is dropped.
    pub fn new(image: RgbaImage, format: PixelFormat) -> Self {
        // A zero-width grid has no pixels regardless of height; start at
        // the exhausted sentinel so the cursor never addresses a pixel.
        let y = if image.width() == 0 { image.height() } else { 0 };
        Self {
            image,
            format,
            x: 0,
            y,
            sub: 0,
            encoded: [0; MAX_BYTES_PER_PIXEL],
            cached: false,
        }
    }

    /// Total number of bytes the stream yields.
    pub fn len(&self) -> u64 {
        u64::from(self.image.width())
            * u64::from(self.image.height())
            * self.format.bytes_per_pixel() as u64
    }

    /// Whether the stream yields no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current logical byte position of the cursor.
    pub fn position(&self) -> u64 {
        let bpp = self.format.bytes_per_pixel() as u64;
        u64::from(self.y) * u64::from(self.image.width()) * bpp
            + u64::from(self.x) * bpp
            + self.sub as u64
    }

    /// Width of the backing pixel grid, in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height of the backing pixel grid, in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Byte layout the stream encodes pixels in.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Consume the stream and recover the decoded image.
    pub fn into_inner(self) -> RgbaImage {
        self.image
    }

    /// Move the cursor to the absolute byte position `pos`.
    ///
    /// Positions beyond the end clamp to `len()` (exhausted). The cached
    /// pixel encoding is re-derived only when the target lies in a
    /// different pixel than the cursor currently holds.
    fn set_position(&mut self, pos: u64) {
        let len = self.len();
        if pos >= len {
            self.x = 0;
            self.y = self.image.height();
            self.sub = 0;
            self.cached = false;
            return;
        }
        // pos < len implies width > 0, so the row stride is nonzero.
        let bpp = self.format.bytes_per_pixel() as u64;
        let row_bytes = u64::from(self.image.width()) * bpp;
        let new_y = (pos / row_bytes) as u32;
        let new_x = (pos % row_bytes / bpp) as u32;
        if !self.cached || new_x != self.x || new_y != self.y {
            self.x = new_x;
            self.y = new_y;
            self.encode_current();
        }
        self.sub = (pos % bpp) as usize;
    }

    /// Encode the pixel under the cursor into the cache.
    ///
    /// Requires `x < width` and `y < height`.
    fn encode_current(&mut self) {
        let pixel = *self.image.get_pixel(self.x, self.y);
        self.format.encode(pixel, &mut self.encoded);
        self.cached = true;
    }

    /// Step the cursor to the start of the next pixel in row-major order.
    fn advance_pixel(&mut self) {
        self.sub = 0;
        self.cached = false;
        self.x += 1;
        if self.x >= self.image.width() {
            self.x = 0;
            self.y += 1;
        }
    }
}

impl Read for PixelStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let bpp = self.format.bytes_per_pixel();
        let mut written = 0;
        while written < buf.len() {
            if self.y >= self.image.height() {
                break;
            }
            if !self.cached {
                self.encode_current();
            }
            let n = (bpp - self.sub).min(buf.len() - written);
            buf[written..written + n].copy_from_slice(&self.encoded[self.sub..self.sub + n]);
            written += n;
            self.sub += n;
            if self.sub == bpp {
                self.advance_pixel();
            }
        }
        Ok(written)
    }
}

impl Seek for PixelStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(offset) => i128::from(offset),
            SeekFrom::End(offset) => i128::from(self.len()) + i128::from(offset),
            SeekFrom::Current(offset) => i128::from(self.position()) + i128::from(offset),
        };
        if target < 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "cannot seek before the start of the pixel stream",
            ));
        }
        let target = target.min(i128::from(self.len())) as u64;
        self.set_position(target);
        Ok(target)
    }
}

impl fmt::Debug for PixelStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelStream")
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .field("format", &self.format)
            .field("position", &self.position())
            .finish_non_exhaustive()
    }
}
