//! OBJ mesh conversion

use anyhow::{Context, Result};
use caster_common::{FormatError, Mesh, Triangle, Vertex2, Vertex3, encode_mesh};
use std::fs;
use std::path::Path;

use crate::error::{ExportError, ExportResult};
use crate::formats::write_output;

/// Convert an OBJ file to encoded `.rust3d` bytes
pub fn convert_obj_to_memory(input: &Path) -> Result<Vec<u8>> {
    let mesh = load_obj(input)?;
    encode_mesh(&mesh).with_context(|| format!("Failed to encode mesh: {:?}", input))
}

/// Convert an OBJ file to a `.rust3d` file, optionally emitting a C array next to it
pub fn convert_obj(input: &Path, output: &Path, c_array: Option<&str>) -> Result<()> {
    let mesh = load_obj(input)?;
    let encoded =
        encode_mesh(&mesh).with_context(|| format!("Failed to encode mesh: {:?}", input))?;

    write_output(output, &encoded, c_array)?;

    tracing::info!(
        "Converted OBJ mesh: {} vertices, {} uvs, {} triangles, {} bytes",
        mesh.vertices.len(),
        mesh.uvs.len(),
        mesh.triangles.len(),
        encoded.len()
    );

    Ok(())
}

fn load_obj(input: &Path) -> Result<Mesh> {
    let bytes = fs::read(input).with_context(|| format!("Failed to open OBJ: {:?}", input))?;
    parse_obj(&bytes).with_context(|| format!("Failed to parse OBJ: {:?}", input))
}

/// Parse OBJ text into a [`Mesh`].
///
/// Supports `v`, `vt` and triangular `f` records whose vertex groups carry a
/// position and a uv index (`p/t` or `p/t/n`; the normal index is ignored).
/// Lines starting with `#`, lines with fewer than two tokens and unknown
/// records are skipped. Uv `v` coordinates are flipped (`1 - v`) and face
/// indices are converted from one-based to zero-based.
pub fn parse_obj(bytes: &[u8]) -> ExportResult<Mesh> {
    let text = String::from_utf8_lossy(bytes);

    let mut mesh = Mesh::default();
    // Source line of every triangle, for range errors
    let mut face_lines: Vec<usize> = Vec::new();

    for (line_idx, raw) in text.split('\n').enumerate() {
        let line_no = line_idx + 1;
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        if raw.starts_with('#') {
            continue;
        }

        let line = collapse_whitespace(raw);
        let parts: Vec<&str> = line.split(' ').collect();
        if parts.len() < 2 {
            continue;
        }

        match parts[0] {
            "v" => {
                let x = parse_coord(&parts, 1, "x coordinate", line_no)?;
                let y = parse_coord(&parts, 2, "y coordinate", line_no)?;
                let z = parse_coord(&parts, 3, "z coordinate", line_no)?;
                mesh.vertices.push(Vertex3::new(x, y, z));
            }
            "vt" => {
                let u = parse_coord(&parts, 1, "u coordinate", line_no)?;
                let v = parse_coord(&parts, 2, "v coordinate", line_no)?;
                mesh.uvs.push(Vertex2::new(u, 1.0 - v));
            }
            "f" => {
                mesh.triangles.push(parse_face(&parts[1..], line_no)?);
                face_lines.push(line_no);
            }
            _ => {}
        }
    }

    mesh.validate_indices().map_err(|err| match err {
        FormatError::IndexOutOfRange {
            triangle,
            kind,
            index,
            len,
        } => ExportError::IndexOutOfRange {
            line: face_lines[triangle],
            kind,
            index: index + 1,
            len,
        },
        other => other.into(),
    })?;

    tracing::debug!(
        "Parsed OBJ: {} vertices, {} uvs, {} triangles",
        mesh.vertices.len(),
        mesh.uvs.len(),
        mesh.triangles.len()
    );

    Ok(mesh)
}

/// Collapse every run of spaces and tabs into a single space.
fn collapse_whitespace(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut in_gap = false;
    for c in line.chars() {
        if c == ' ' || c == '\t' {
            if !in_gap {
                out.push(' ');
            }
            in_gap = true;
        } else {
            out.push(c);
            in_gap = false;
        }
    }
    out
}

fn parse_coord(parts: &[&str], idx: usize, field: &'static str, line: usize) -> ExportResult<f32> {
    let token = parts.get(idx).copied().unwrap_or_default();
    token.parse::<f32>().map_err(|_| ExportError::MalformedNumber {
        line,
        field,
        token: token.to_string(),
    })
}

/// Parse the vertex groups of an `f` record into a zero-based [`Triangle`]
fn parse_face(groups: &[&str], line: usize) -> ExportResult<Triangle> {
    // A trailing separator leaves one empty token behind
    let groups: Vec<&str> = groups.iter().copied().filter(|g| !g.is_empty()).collect();
    if groups.len() != 3 {
        return Err(ExportError::UnsupportedFace {
            line,
            groups: groups.len(),
        });
    }

    let mut positions = [0u32; 3];
    let mut uvs = [0u32; 3];
    for (i, group) in groups.iter().enumerate() {
        let (p, t) = parse_face_vertex(group, line)?;
        positions[i] = p;
        uvs[i] = t;
    }

    Ok(Triangle::new(positions, uvs))
}

/// Parse an OBJ vertex group `p/t[/...]` into zero-based (position, uv) indices
fn parse_face_vertex(group: &str, line: usize) -> ExportResult<(u32, u32)> {
    let mut fields = group.split('/');
    let position = fields.next().and_then(one_based_index);
    let uv = fields.next().and_then(one_based_index);

    match (position, uv) {
        (Some(p), Some(t)) => Ok((p, t)),
        _ => Err(ExportError::MalformedIndex {
            line,
            token: group.to_string(),
        }),
    }
}

fn one_based_index(field: &str) -> Option<u32> {
    field.parse::<u32>().ok()?.checked_sub(1) // OBJ indices are 1-based
}
