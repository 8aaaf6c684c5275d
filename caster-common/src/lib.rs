//! Shared asset formats for the caster software renderer
//!
//! This crate provides the data model and binary layouts shared between:
//! - `caster-export` (asset pipeline)
//! - the renderer, which loads the produced files at startup
//!
//! # Modules
//!
//! - [`formats`] - Mesh (`.rust3d`) and image (`.rust2d`) binary formats
//! - [`error`] - Errors raised while encoding or decoding those formats

pub mod error;
pub mod formats;

pub use error::{ElementKind, FormatError};

// Re-export commonly used format items
pub use formats::{
    // Constants
    ASSET_FORMAT,
    AssetFormat,
    BYTES_PER_PIXEL,
    BinarySerializable,
    MAX_DIMENSION,
    MAX_ELEMENTS,
    // Mesh types
    Mesh,
    MeshHeader,
    // Image types
    RasterImage,
    TextureHeader,
    Triangle,
    Vertex2,
    Vertex3,
    // Encoders / decoders
    decode_image,
    decode_mesh,
    encode_image,
    encode_mesh,
    unpack_argb,
};
