//! Conversion errors for the export pipeline.

use caster_common::{ElementKind, FormatError};
use thiserror::Error;

/// Failure of a single mesh or image conversion.
///
/// Parse errors carry the one-based source line they were found on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// A `v`/`vt` coordinate is missing or is not a number
    #[error("line {line}: malformed {field} '{token}'")]
    MalformedNumber {
        line: usize,
        field: &'static str,
        token: String,
    },

    /// A face index is missing, zero or not an unsigned integer
    #[error("line {line}: malformed face index in '{token}'")]
    MalformedIndex { line: usize, token: String },

    /// A face has a vertex-group count other than three
    #[error("line {line}: face has {groups} vertex groups, only triangles are supported")]
    UnsupportedFace { line: usize, groups: usize },

    /// A face references a vertex or uv that the file never defines
    #[error("line {line}: {kind} index {index} is out of range (file defines {len})")]
    IndexOutOfRange {
        line: usize,
        kind: ElementKind,
        index: u32,
        len: usize,
    },

    /// The image container is not one the decoder understands
    #[error("unsupported image format: {0}")]
    UnsupportedImageFormat(String),

    /// The image container is recognised but its data is damaged
    #[error("corrupt image: {0}")]
    CorruptImage(String),

    /// A generated symbol is not a valid C identifier
    #[error("'{0}' is not a valid C identifier")]
    InvalidIdentifier(String),

    /// Layout-level failure (element counts, image dimensions)
    #[error(transparent)]
    Format(#[from] FormatError),
}

pub type ExportResult<T> = Result<T, ExportError>;
