//! C source generation for compiled-in assets.

use std::fmt::Write;

use crate::error::{ExportError, ExportResult};

/// Render `data` as a C array declaration named `name`.
///
/// ```
/// let src = caster_export::codegen::to_c_array("tex", &[0x00, 0x02, 0xFF]).unwrap();
/// assert_eq!(src, "const unsigned char tex[] = {0,2,255};\n");
/// ```
pub fn to_c_array(name: &str, data: &[u8]) -> ExportResult<String> {
    if !is_c_identifier(name) {
        return Err(ExportError::InvalidIdentifier(name.to_string()));
    }

    // Up to 4 characters per byte ("255,")
    let mut out = String::with_capacity(name.len() + 32 + data.len() * 4);
    let _ = write!(out, "const unsigned char {name}[] = {{");
    for (i, byte) in data.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let _ = write!(out, "{byte}");
    }
    out.push_str("};\n");
    Ok(out)
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
