//! TexStream - Incremental pixel byte streaming for texture uploads
//!
//! This library decodes raster image files (BMP, JPEG, PNG, TGA) and exposes
//! their pixel data to a consuming rendering engine as `Read`/`Seek` byte
//! streams in a fixed pixel format, without first flattening the decoded
//! image into one contiguous byte buffer.
//!
//! # Architecture
//!
//! ```text
//! file bytes ──▶ image decoder ──▶ RgbaImage ──▶ PixelStream ──▶ byte reads
//!                (image crate)     (pixel grid)   (cursor engine)
//! ```
//!
//! - [`TextureReader`] dispatches on the file extension, decodes via the
//!   `image` crate, and packages the result as a [`Texture`].
//! - [`PixelStream`] is the cursor engine: it owns the decoded pixel grid
//!   and encodes pixels on demand as the read cursor crosses them.
//! - [`PixelFormat`] selects the per-pixel byte layout (RGB8 or RGBA8),
//!   chosen once per file so the hot copy loop carries no format branch.

pub mod pixel;
pub mod stream;
pub mod texture;

pub use pixel::PixelFormat;
pub use stream::PixelStream;
pub use texture::{Texture, TextureError, TextureReader, TextureResult};
