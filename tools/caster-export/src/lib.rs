//! caster-export library
//!
//! Provides asset conversion functions for use by other tools and tests.

pub mod codegen;
pub mod error;
pub mod formats;
pub mod manifest;
pub mod mesh;
pub mod texture;

pub use error::{ExportError, ExportResult};

// Re-export the shared data model and format constants
pub use caster_common::{ASSET_FORMAT, ElementKind, FormatError, Mesh, RasterImage};

// Re-export key conversion entry points
pub use mesh::{convert_obj, convert_obj_to_memory, parse_obj};
pub use texture::{convert_image, convert_image_to_memory, decode_image};
