//! Binary serialization trait for format headers.
//!
//! Both caster format headers implement `BinarySerializable` so that decoders
//! can read them generically, while each header keeps its type-specific
//! `to_bytes()` method returning a fixed-size array.

use crate::error::{FormatError, FormatResult};

/// Trait for binary-serializable format headers.
///
/// The trait uses `Vec<u8>` for the return type because associated const
/// generics in return types (`[u8; Self::SIZE]`) are not yet stable in Rust.
///
/// # Example
///
/// ```
/// use caster_common::formats::{BinarySerializable, TextureHeader};
///
/// let header = TextureHeader::new(64, 64);
///
/// // Using the trait (returns Vec<u8>)
/// let bytes = header.serialize();
/// let parsed = TextureHeader::deserialize(&bytes).unwrap();
/// assert_eq!(parsed, header);
///
/// // Using the type-specific method (returns [u8; 4])
/// let bytes_array = header.to_bytes();
/// assert_eq!(bytes_array, [0x00, 0x40, 0x00, 0x40]);
/// ```
pub trait BinarySerializable: Sized {
    /// Size of the serialized header in bytes.
    const SIZE: usize;

    /// Serialize to bytes.
    fn serialize(&self) -> Vec<u8>;

    /// Deserialize from bytes.
    ///
    /// Returns `None` if the byte slice is too short.
    fn deserialize(bytes: &[u8]) -> Option<Self>;
}

impl BinarySerializable for super::MeshHeader {
    const SIZE: usize = Self::SIZE;

    fn serialize(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn deserialize(bytes: &[u8]) -> Option<Self> {
        Self::from_bytes(bytes)
    }
}

impl BinarySerializable for super::TextureHeader {
    const SIZE: usize = Self::SIZE;

    fn serialize(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn deserialize(bytes: &[u8]) -> Option<Self> {
        Self::from_bytes(bytes)
    }
}

/// Read a header from the start of `bytes`, reporting a short buffer as truncation.
pub(crate) fn read_header<T: BinarySerializable>(bytes: &[u8]) -> FormatResult<T> {
    T::deserialize(bytes).ok_or(FormatError::Truncated {
        expected: T::SIZE,
        actual: bytes.len(),
    })
}
