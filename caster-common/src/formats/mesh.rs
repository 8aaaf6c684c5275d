//! Caster mesh binary format (.rust3d)
//!
//! Indexed triangle mesh with separate position and uv pools.
//! POD format - no magic bytes, big-endian.
//!
//! # Layout
//! ```text
//! 0x00: vertex_count u16
//! 0x02: uv_count u16
//! 0x04: triangle_count u16
//! 0x06: vertices  (vertex_count * 12 bytes: x, y, z f32)
//! var:  uvs       (uv_count * 8 bytes: u, v f32)
//! var:  triangles (triangle_count * 12 bytes: 3 position u16, 3 uv u16)
//! ```

use super::serialization::read_header;
use super::{be_f32, be_u16};
use crate::error::{ElementKind, FormatError, FormatResult};

/// Maximum number of vertices, uvs or triangles (u16 count fields)
pub const MAX_ELEMENTS: usize = u16::MAX as usize;

/// Encoded size of one [`Vertex3`]
pub const VERTEX_SIZE: usize = 12;

/// Encoded size of one [`Vertex2`]
pub const UV_SIZE: usize = 8;

/// Encoded size of one [`Triangle`]
pub const TRIANGLE_SIZE: usize = 12;

/// Mesh header (6 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct MeshHeader {
    pub vertex_count: u16,
    pub uv_count: u16,
    pub triangle_count: u16,
}

impl MeshHeader {
    pub const SIZE: usize = 6;

    pub fn new(vertex_count: u16, uv_count: u16, triangle_count: u16) -> Self {
        Self {
            vertex_count,
            uv_count,
            triangle_count,
        }
    }

    /// Size of the data following the header
    pub fn body_size(&self) -> usize {
        self.vertex_count as usize * VERTEX_SIZE
            + self.uv_count as usize * UV_SIZE
            + self.triangle_count as usize * TRIANGLE_SIZE
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..2].copy_from_slice(&self.vertex_count.to_be_bytes());
        bytes[2..4].copy_from_slice(&self.uv_count.to_be_bytes());
        bytes[4..6].copy_from_slice(&self.triangle_count.to_be_bytes());
        bytes
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            vertex_count: be_u16(&bytes[0..2]),
            uv_count: be_u16(&bytes[2..4]),
            triangle_count: be_u16(&bytes[4..6]),
        })
    }
}

/// Vertex position in object space
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vertex3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vertex3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Texture coordinate. `v` already has the renderer's top-left origin.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vertex2 {
    pub u: f32,
    pub v: f32,
}

impl Vertex2 {
    pub const fn new(u: f32, v: f32) -> Self {
        Self { u, v }
    }
}

/// Triangle referencing three positions and three uvs (zero-based)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Triangle {
    pub positions: [u32; 3],
    pub uvs: [u32; 3],
}

impl Triangle {
    pub const fn new(positions: [u32; 3], uvs: [u32; 3]) -> Self {
        Self { positions, uvs }
    }
}

/// Triangle mesh with separate position and uv pools.
///
/// Sequence order is significant: triangles refer to vertices and uvs by position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex3>,
    pub uvs: Vec<Vertex2>,
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex3>, uvs: Vec<Vertex2>, triangles: Vec<Triangle>) -> Self {
        Self {
            vertices,
            uvs,
            triangles,
        }
    }

    /// Build the header, failing if any sequence exceeds [`MAX_ELEMENTS`].
    pub fn header(&self) -> FormatResult<MeshHeader> {
        Ok(MeshHeader::new(
            count_u16(ElementKind::Vertex, self.vertices.len())?,
            count_u16(ElementKind::Uv, self.uvs.len())?,
            count_u16(ElementKind::Triangle, self.triangles.len())?,
        ))
    }

    /// Check that every triangle index lies within its sequence.
    ///
    /// Reports the first offending index in triangle order.
    pub fn validate_indices(&self) -> FormatResult<()> {
        for (triangle, tri) in self.triangles.iter().enumerate() {
            check_indices(triangle, ElementKind::Vertex, &tri.positions, self.vertices.len())?;
            check_indices(triangle, ElementKind::Uv, &tri.uvs, self.uvs.len())?;
        }
        Ok(())
    }

    /// Size of the encoded mesh in bytes
    pub fn encoded_size(&self) -> usize {
        MeshHeader::SIZE
            + self.vertices.len() * VERTEX_SIZE
            + self.uvs.len() * UV_SIZE
            + self.triangles.len() * TRIANGLE_SIZE
    }
}

fn count_u16(kind: ElementKind, count: usize) -> FormatResult<u16> {
    u16::try_from(count).map_err(|_| FormatError::TooManyElements { kind, count })
}

fn check_indices(
    triangle: usize,
    kind: ElementKind,
    indices: &[u32; 3],
    len: usize,
) -> FormatResult<()> {
    match indices.iter().find(|&&i| i as usize >= len) {
        Some(&index) => Err(FormatError::IndexOutOfRange {
            triangle,
            kind,
            index,
            len,
        }),
        None => Ok(()),
    }
}

/// Encode a mesh into the `.rust3d` layout.
///
/// Fails with [`FormatError::TooManyElements`] or [`FormatError::IndexOutOfRange`]
/// before any byte is produced.
pub fn encode_mesh(mesh: &Mesh) -> FormatResult<Vec<u8>> {
    let header = mesh.header()?;
    mesh.validate_indices()?;

    let mut out = Vec::with_capacity(MeshHeader::SIZE + header.body_size());
    out.extend_from_slice(&header.to_bytes());

    for v in &mesh.vertices {
        for f in [v.x, v.y, v.z] {
            out.extend_from_slice(&f.to_be_bytes());
        }
    }
    for uv in &mesh.uvs {
        out.extend_from_slice(&uv.u.to_be_bytes());
        out.extend_from_slice(&uv.v.to_be_bytes());
    }
    // Indices are below their sequence length, which fits in u16
    for tri in &mesh.triangles {
        for &i in tri.positions.iter().chain(tri.uvs.iter()) {
            out.extend_from_slice(&(i as u16).to_be_bytes());
        }
    }

    Ok(out)
}

/// Decode a `.rust3d` buffer back into a [`Mesh`].
///
/// The buffer must contain exactly the data announced by its header.
pub fn decode_mesh(bytes: &[u8]) -> FormatResult<Mesh> {
    let header: MeshHeader = read_header(bytes)?;

    let expected = MeshHeader::SIZE + header.body_size();
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

    let (vertex_bytes, rest) =
        bytes[MeshHeader::SIZE..].split_at(header.vertex_count as usize * VERTEX_SIZE);
    let (uv_bytes, triangle_bytes) = rest.split_at(header.uv_count as usize * UV_SIZE);

    let vertices = vertex_bytes
        .chunks_exact(VERTEX_SIZE)
        .map(|c| Vertex3::new(be_f32(&c[0..4]), be_f32(&c[4..8]), be_f32(&c[8..12])))
        .collect();
    let uvs = uv_bytes
        .chunks_exact(UV_SIZE)
        .map(|c| Vertex2::new(be_f32(&c[0..4]), be_f32(&c[4..8])))
        .collect();
    let triangles = triangle_bytes
        .chunks_exact(TRIANGLE_SIZE)
        .map(|c| {
            let idx = |n: usize| be_u16(&c[n * 2..n * 2 + 2]) as u32;
            Triangle::new([idx(0), idx(1), idx(2)], [idx(3), idx(4), idx(5)])
        })
        .collect();

    let mesh = Mesh::new(vertices, uvs, triangles);
    mesh.validate_indices()?;
    Ok(mesh)
}
