//! Binary format definitions for caster asset files
//!
//! Re-exports the shared formats and writes finished assets to disk.

pub use caster_common::formats::*;

use anyhow::{Context, Result};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::codegen::to_c_array;

/// Path of the C array source generated next to `output`
pub fn c_array_path(output: &Path) -> PathBuf {
    output.with_extension(ASSET_FORMAT.c_array_ext)
}

/// Write an encoded asset, plus a C array source if `c_array` names one.
///
/// Every file is first staged next to its destination and only renamed into
/// place once all of them were written. On failure no output is left behind.
pub fn write_output(output: &Path, data: &[u8], c_array: Option<&str>) -> Result<()> {
    let c_source = c_array.map(|name| to_c_array(name, data)).transpose()?;

    let binary = stage_file(output, data)?;
    let c_file = match c_source {
        Some(source) => {
            let path = c_array_path(output);
            let staged = stage_file(&path, source.as_bytes())?;
            Some((path, staged))
        }
        None => None,
    };

    if let Some((path, staged)) = c_file {
        staged
            .persist(&path)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to write output: {:?}", path))?;

        if let Err(e) = binary.persist(output) {
            // Keep the pair consistent
            let _ = fs::remove_file(&path);
            return Err(e.error).with_context(|| format!("Failed to write output: {:?}", output));
        }
        tracing::info!("Wrote C array {:?}", path);
    } else {
        binary
            .persist(output)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to write output: {:?}", output))?;
    }

    Ok(())
}

/// Write `data` to a temporary file in the directory of `path`
fn stage_file(path: &Path, data: &[u8]) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let file = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create output: {:?}", path))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(data)
        .and_then(|_| writer.flush())
        .with_context(|| format!("Failed to write output: {:?}", path))?;
    writer
        .into_inner()
        .map_err(|e| e.into_error())
        .with_context(|| format!("Failed to write output: {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_binary_and_c_array() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("model.rust3d");

        write_output(&output, &[0, 1, 255], Some("model_bin")).unwrap();

        assert_eq!(fs::read(&output).unwrap(), vec![0, 1, 255]);
        let source = fs::read_to_string(dir.path().join("model.c")).unwrap();
        assert_eq!(source, "const unsigned char model_bin[] = {0,1,255};\n");
    }

    #[test]
    fn invalid_identifier_writes_nothing() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("model.rust3d");

        assert!(write_output(&output, &[1, 2], Some("3d-model")).is_err());
        assert!(!output.exists());
        assert!(!c_array_path(&output).exists());
    }

    #[test]
    fn failed_c_array_write_leaves_no_binary() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("model.rust3d");
        // A directory in place of model.c makes the final rename fail
        fs::create_dir(c_array_path(&output)).unwrap();

        assert!(write_output(&output, &[1, 2, 3], Some("model_bin")).is_err());
        assert!(!output.exists());
        // No staged files left over either
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn replaces_existing_output() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("image.rust2d");
        fs::write(&output, b"old contents").unwrap();

        write_output(&output, &[9, 9], None).unwrap();
        assert_eq!(fs::read(&output).unwrap(), vec![9, 9]);
    }
}
