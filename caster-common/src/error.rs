//! Errors raised while validating, encoding or decoding caster assets.

use std::fmt;

use thiserror::Error;

use crate::formats::{MAX_DIMENSION, MAX_ELEMENTS};

/// Element sequence of a mesh that a count or index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Vertex,
    Uv,
    Triangle,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Vertex => "vertex",
            ElementKind::Uv => "uv",
            ElementKind::Triangle => "triangle",
        };
        f.write_str(name)
    }
}

/// Layout-level error for the mesh and image binary formats.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// A mesh sequence does not fit the u16 count field
    #[error("mesh has {count} {kind} elements, the format allows at most {}", MAX_ELEMENTS)]
    TooManyElements { kind: ElementKind, count: usize },

    /// A triangle references a vertex or uv that does not exist
    #[error("triangle {triangle} references {kind} index {index}, but only {len} exist")]
    IndexOutOfRange {
        triangle: usize,
        kind: ElementKind,
        index: u32,
        len: usize,
    },

    /// An image dimension does not fit the u16 header field, or its buffer size overflows
    #[error("image is {width}x{height}, each dimension must be at most {}", MAX_DIMENSION)]
    TooLarge { width: u32, height: u32 },

    /// Pixel buffer length disagrees with the image dimensions
    #[error("pixel buffer holds {actual} bytes, a {width}x{height} RGBA8 image needs {expected}")]
    PixelDataMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Binary asset ends before the data its header announces
    #[error("asset truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    /// Binary asset continues past the data its header announces
    #[error("{extra} unexpected bytes after the end of the asset")]
    TrailingBytes { extra: usize },
}

pub type FormatResult<T> = Result<T, FormatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let err = FormatError::TooManyElements {
            kind: ElementKind::Vertex,
            count: 65536,
        };
        assert_eq!(
            err.to_string(),
            "mesh has 65536 vertex elements, the format allows at most 65535"
        );

        let err = FormatError::TooLarge {
            width: 70000,
            height: 2,
        };
        assert!(err.to_string().contains("70000x2"));
    }
}
