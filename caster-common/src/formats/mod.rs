//! Caster binary asset formats
//!
//! These are POD (Plain Old Data) formats loaded verbatim by the renderer.
//! No magic bytes and no version field - the format is determined by the file
//! extension. All multi-byte fields are big-endian.
//!
//! Both format headers implement the [`BinarySerializable`] trait for consistent
//! serialization/deserialization.

pub mod mesh;
mod serialization;
pub mod texture;

pub use mesh::*;
pub use serialization::BinarySerializable;
pub use texture::*;

/// File naming conventions for caster assets.
#[derive(Debug, Clone, Copy)]
pub struct AssetFormat {
    /// Mesh file extension without dot
    pub mesh_ext: &'static str,

    /// Image file extension without dot
    pub texture_ext: &'static str,

    /// Extension of generated C array sources
    pub c_array_ext: &'static str,
}

/// Single source of truth for caster asset extensions: `.rust3d`, `.rust2d`, `.c`
pub const ASSET_FORMAT: AssetFormat = AssetFormat {
    mesh_ext: "rust3d",
    texture_ext: "rust2d",
    c_array_ext: "c",
};

#[inline]
pub(crate) fn be_u16(b: &[u8]) -> u16 {
    u16::from_be_bytes([b[0], b[1]])
}

#[inline]
pub(crate) fn be_f32(b: &[u8]) -> f32 {
    f32::from_be_bytes([b[0], b[1], b[2], b[3]])
}
