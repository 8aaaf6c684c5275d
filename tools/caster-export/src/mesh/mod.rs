//! Mesh converter (OBJ -> .rust3d)

mod obj;

// Re-export public API
pub use obj::{convert_obj, convert_obj_to_memory, parse_obj};
