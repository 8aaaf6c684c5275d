//! Texture converter (PNG/JPEG -> .rust2d)

use anyhow::{Context, Result};
use caster_common::{RasterImage, encode_image};
use image::ImageError;
use std::fs;
use std::path::Path;

use crate::error::{ExportError, ExportResult};
use crate::formats::write_output;

/// Convert an image file to encoded `.rust2d` bytes
pub fn convert_image_to_memory(input: &Path) -> Result<Vec<u8>> {
    let image = load_image(input)?;
    encode_image(&image).with_context(|| format!("Failed to encode texture: {:?}", input))
}

/// Convert an image file to a `.rust2d` file, optionally emitting a C array next to it
pub fn convert_image(input: &Path, output: &Path, c_array: Option<&str>) -> Result<()> {
    let image = load_image(input)?;
    let encoded =
        encode_image(&image).with_context(|| format!("Failed to encode texture: {:?}", input))?;

    write_output(output, &encoded, c_array)?;

    tracing::info!(
        "Converted texture: {}x{}, {} bytes",
        image.width(),
        image.height(),
        encoded.len()
    );

    Ok(())
}

fn load_image(input: &Path) -> Result<RasterImage> {
    let bytes = fs::read(input).with_context(|| format!("Failed to open image: {:?}", input))?;
    decode_image(&bytes).with_context(|| format!("Failed to load texture: {:?}", input))
}

/// Decode an image container (PNG, JPEG) into straight-alpha RGBA8.
pub fn decode_image(bytes: &[u8]) -> ExportResult<RasterImage> {
    let format = image::guess_format(bytes)
        .map_err(|e| ExportError::UnsupportedImageFormat(e.to_string()))?;

    let img = image::load_from_memory_with_format(bytes, format).map_err(|e| match e {
        ImageError::Unsupported(u) => ExportError::UnsupportedImageFormat(u.to_string()),
        other => ExportError::CorruptImage(other.to_string()),
    })?;

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    tracing::debug!("Decoded {:?} image {}x{}", format, width, height);

    Ok(RasterImage::new(width, height, rgba.into_raw())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32, pixels: Vec<u8>) -> Vec<u8> {
        let img = RgbaImage::from_raw(width, height, pixels).unwrap();
        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn decodes_png_to_rgba8() {
        let png = png_bytes(2, 1, vec![0xFF, 0, 0, 0xFF, 0, 0, 0, 0]);
        let image = decode_image(&png).unwrap();

        assert_eq!(image.width(), 2);
        assert_eq!(image.height(), 1);
        assert_eq!(
            encode_image(&image).unwrap(),
            vec![0x00, 0x02, 0x00, 0x01, 0xFF, 0x00, 0x00, 0xFF, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn keeps_straight_alpha() {
        let png = png_bytes(1, 1, vec![200, 100, 50, 128]);
        assert_eq!(decode_image(&png).unwrap().pixels(), &[200, 100, 50, 128]);
    }

    #[test]
    fn unknown_container_is_unsupported() {
        assert!(matches!(
            decode_image(b"definitely not an image"),
            Err(ExportError::UnsupportedImageFormat(_))
        ));
    }

    #[test]
    fn gif_without_decoder_is_unsupported() {
        assert!(matches!(
            decode_image(b"GIF89a\x01\x00\x01\x00\x00\x00\x00"),
            Err(ExportError::UnsupportedImageFormat(_))
        ));
    }

    #[test]
    fn truncated_png_is_corrupt() {
        let png = png_bytes(4, 4, vec![7; 64]);
        assert!(matches!(
            decode_image(&png[..png.len() / 2]),
            Err(ExportError::CorruptImage(_))
        ));
    }
}
