//! Caster image binary format (.rust2d)
//!
//! Uncompressed RGBA8 texture, straight alpha, row-major from the top-left texel.
//! POD format - no magic bytes, big-endian header.
//!
//! # Layout
//! ```text
//! 0x00: width u16 (max 65535)
//! 0x02: height u16 (max 65535)
//! 0x04: pixel_data (width × height × 4 bytes, R G B A per texel)
//! ```

use super::be_u16;
use super::serialization::read_header;
use crate::error::{FormatError, FormatResult};

/// Bytes per RGBA8 texel
pub const BYTES_PER_PIXEL: usize = 4;

/// Largest width or height the u16 header can hold
pub const MAX_DIMENSION: u32 = u16::MAX as u32;

/// Texture header (4 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct TextureHeader {
    pub width: u16,
    pub height: u16,
}

impl TextureHeader {
    pub const SIZE: usize = 4;

    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Create header from u32 dimensions, failing if either exceeds [`MAX_DIMENSION`]
    pub fn from_dimensions(width: u32, height: u32) -> FormatResult<Self> {
        match (u16::try_from(width), u16::try_from(height)) {
            (Ok(w), Ok(h)) => Ok(Self::new(w, h)),
            _ => Err(FormatError::TooLarge { width, height }),
        }
    }

    /// Calculate RGBA8 pixel data size (4 bytes per pixel)
    pub fn rgba8_size(&self) -> usize {
        self.width as usize * self.height as usize * BYTES_PER_PIXEL
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..2].copy_from_slice(&self.width.to_be_bytes());
        bytes[2..4].copy_from_slice(&self.height.to_be_bytes());
        bytes
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            width: be_u16(&bytes[0..2]),
            height: be_u16(&bytes[2..4]),
        })
    }
}

/// Decoded RGBA8 image.
///
/// The pixel buffer always holds exactly `width * height * 4` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterImage {
    /// Wrap an RGBA8 buffer, checking its length against the dimensions.
    ///
    /// Dimensions whose buffer size does not fit `usize` are [`FormatError::TooLarge`].
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> FormatResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|texels| texels.checked_mul(BYTES_PER_PIXEL))
            .ok_or(FormatError::TooLarge { width, height })?;
        if pixels.len() != expected {
            return Err(FormatError::PixelDataMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build an image from ARGB-packed texels (alpha in the top byte).
    pub fn from_argb(width: u32, height: u32, texels: &[u32]) -> FormatResult<Self> {
        let pixels = texels.iter().flat_map(|&px| unpack_argb(px)).collect();
        Self::new(width, height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA8 pixel data, row-major from the top-left texel
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}

/// Unpack an ARGB-packed texel into `[r, g, b, a]`.
#[inline]
pub fn unpack_argb(px: u32) -> [u8; 4] {
    [
        (px >> 16) as u8,
        (px >> 8) as u8,
        px as u8,
        (px >> 24) as u8,
    ]
}

/// Encode an image into the `.rust2d` layout.
pub fn encode_image(image: &RasterImage) -> FormatResult<Vec<u8>> {
    let header = TextureHeader::from_dimensions(image.width, image.height)?;

    let mut out = Vec::with_capacity(TextureHeader::SIZE + image.pixels.len());
    out.extend_from_slice(&header.to_bytes());
    out.extend_from_slice(&image.pixels);
    Ok(out)
}

/// Decode a `.rust2d` buffer back into a [`RasterImage`].
pub fn decode_image(bytes: &[u8]) -> FormatResult<RasterImage> {
    let header: TextureHeader = read_header(bytes)?;

    let expected = TextureHeader::SIZE + header.rgba8_size();
    if bytes.len() < expected {
        return Err(FormatError::Truncated {
            expected,
            actual: bytes.len(),
        });
    }
    if bytes.len() > expected {
        return Err(FormatError::TrailingBytes {
            extra: bytes.len() - expected,
        });
    }

    RasterImage::new(
        header.width as u32,
        header.height as u32,
        bytes[TextureHeader::SIZE..].to_vec(),
    )
}
