//! assets.toml manifest parsing and batch builds
//!
//! ```toml
//! [output]
//! dir = "res"
//!
//! [[meshes]]
//! id = "model"
//! path = "pb/rpan.obj"
//! c_array = "model_bin"
//!
//! [[textures]]
//! id = "texture"
//! path = "pb/rpan_hr.png"
//! output = "texture.rust2d"
//! ```
//!
//! Relative paths are resolved against the directory holding the manifest.

use anyhow::{Context, Result, bail};
use caster_common::ASSET_FORMAT;
use hashbrown::HashSet;
use serde::Deserialize;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::codegen::is_c_identifier;
use crate::formats::c_array_path;
use crate::{mesh, texture};

/// assets.toml manifest structure
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetManifest {
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub meshes: Vec<AssetEntry>,
    #[serde(default)]
    pub textures: Vec<AssetEntry>,

    /// Directory the manifest was loaded from
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// Output configuration section
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Output directory, relative to the manifest.
    /// Default: "."
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Single asset entry
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetEntry {
    pub id: String,
    pub path: PathBuf,

    /// Output file name inside the output directory.
    /// Default: `<id>.rust3d` for meshes, `<id>.rust2d` for textures
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Also emit a C array source with this symbol name
    #[serde(default)]
    pub c_array: Option<String>,
}

/// Kind of asset an entry describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Mesh,
    Texture,
}

impl AssetKind {
    pub fn extension(self) -> &'static str {
        match self {
            AssetKind::Mesh => ASSET_FORMAT.mesh_ext,
            AssetKind::Texture => ASSET_FORMAT.texture_ext,
        }
    }

    fn label(self) -> &'static str {
        match self {
            AssetKind::Mesh => "mesh",
            AssetKind::Texture => "texture",
        }
    }
}

impl AssetEntry {
    /// Output file name for this entry
    pub fn output_name(&self, kind: AssetKind) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.{}", self.id, kind.extension())))
    }
}

impl AssetManifest {
    /// All entries tagged with their kind, meshes first
    pub fn entries(&self) -> impl Iterator<Item = (AssetKind, &AssetEntry)> {
        self.meshes
            .iter()
            .map(|e| (AssetKind::Mesh, e))
            .chain(self.textures.iter().map(|e| (AssetKind::Texture, e)))
    }

    /// Resolve a source path against the manifest directory
    pub fn source_path(&self, entry: &AssetEntry) -> PathBuf {
        self.base_dir.join(&entry.path)
    }

    /// Output directory, honouring a command-line override
    pub fn output_dir(&self, output_override: Option<&Path>) -> PathBuf {
        match output_override {
            Some(dir) => dir.to_path_buf(),
            None => self.base_dir.join(&self.output.dir),
        }
    }
}

/// Load and parse an assets.toml manifest
pub fn load_manifest(path: &Path) -> Result<AssetManifest> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read manifest: {:?}", path))?;
    let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    parse_manifest(&text, base_dir).with_context(|| format!("Failed to parse manifest: {:?}", path))
}

/// Parse manifest text; relative paths will resolve against `base_dir`
pub fn parse_manifest(text: &str, base_dir: PathBuf) -> Result<AssetManifest> {
    let mut manifest: AssetManifest = toml::from_str(text)?;
    manifest.base_dir = base_dir;
    Ok(manifest)
}

/// Check a manifest without converting anything.
///
/// Every problem is logged; the error reports how many were found.
pub fn validate(manifest: &AssetManifest) -> Result<()> {
    let mut problems: Vec<String> = Vec::new();

    if manifest.meshes.is_empty() && manifest.textures.is_empty() {
        problems.push("manifest declares no meshes or textures".to_string());
    }

    let mut ids: HashSet<(&str, AssetKind)> = HashSet::new();
    let mut outputs: HashSet<PathBuf> = HashSet::new();
    let mut symbols: HashSet<&str> = HashSet::new();

    for (kind, entry) in manifest.entries() {
        let label = kind.label();

        if entry.id.is_empty() {
            problems.push(format!("{label} entry for {:?} has an empty id", entry.path));
        }
        if !ids.insert((entry.id.as_str(), kind)) {
            problems.push(format!("duplicate {label} id '{}'", entry.id));
        }

        let output = normalize(&entry.output_name(kind));
        if !outputs.insert(output.clone()) {
            problems.push(format!("{label} '{}': output {:?} is written twice", entry.id, output));
        }

        let source = manifest.source_path(entry);
        if !source.is_file() {
            problems.push(format!("{label} '{}': source {:?} not found", entry.id, source));
        }

        if let Some(symbol) = entry.c_array.as_deref() {
            if !is_c_identifier(symbol) {
                problems.push(format!(
                    "{label} '{}': c_array '{symbol}' is not a valid C identifier",
                    entry.id
                ));
            } else if !symbols.insert(symbol) {
                problems.push(format!("{label} '{}': c_array '{symbol}' is used twice", entry.id));
            }

            let c_output = c_array_path(&output);
            if !outputs.insert(c_output.clone()) {
                problems.push(format!(
                    "{label} '{}': output {:?} is written twice",
                    entry.id, c_output
                ));
            }
        }
    }

    for problem in &problems {
        tracing::warn!("{}", problem);
    }
    if !problems.is_empty() {
        bail!("Manifest has {} problem(s): {}", problems.len(), problems.join("; "));
    }
    Ok(())
}

/// Drop `.` components so equivalent spellings of one output compare equal
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Validate the manifest, then convert every asset it declares.
///
/// Returns the number of assets written.
pub fn build_all(manifest: &AssetManifest, output_override: Option<&Path>) -> Result<usize> {
    validate(manifest)?;

    let out_dir = manifest.output_dir(output_override);
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", out_dir))?;

    let mut built = 0;
    for (kind, entry) in manifest.entries() {
        let input = manifest.source_path(entry);
        let output = out_dir.join(entry.output_name(kind));
        tracing::info!("[{}] {:?} -> {:?}", entry.id, input, output);

        let result = match kind {
            AssetKind::Mesh => mesh::convert_obj(&input, &output, entry.c_array.as_deref()),
            AssetKind::Texture => texture::convert_image(&input, &output, entry.c_array.as_deref()),
        };
        result.with_context(|| format!("Failed to build {} '{}'", kind.label(), entry.id))?;
        built += 1;
    }

    Ok(built)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const TRIANGLE_OBJ: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nf 1/1 2/1 3/1\n";

    #[test]
    fn parses_full_manifest() {
        let manifest = parse_manifest(
            r#"
                [output]
                dir = "res"

                [[meshes]]
                id = "model"
                path = "pb/rpan.obj"
                c_array = "model_bin"

                [[textures]]
                id = "made_with"
                path = "made_with.png"
                output = "made_with.rust2d"
            "#,
            PathBuf::from("assets"),
        )
        .unwrap();

        assert_eq!(manifest.meshes.len(), 1);
        assert_eq!(manifest.textures.len(), 1);
        assert_eq!(manifest.output_dir(None), PathBuf::from("assets/res"));
        assert_eq!(
            manifest.source_path(&manifest.meshes[0]),
            PathBuf::from("assets/pb/rpan.obj")
        );
        assert_eq!(
            manifest.meshes[0].output_name(AssetKind::Mesh),
            PathBuf::from("model.rust3d")
        );
        assert_eq!(manifest.meshes[0].c_array.as_deref(), Some("model_bin"));
    }

    #[test]
    fn defaults_and_override() {
        let manifest =
            parse_manifest("[[textures]]\nid = \"t\"\npath = \"t.png\"\n", PathBuf::new())
                .unwrap();
        assert_eq!(manifest.output.dir, PathBuf::from("."));
        assert_eq!(
            manifest.output_dir(Some(Path::new("/tmp/out"))),
            PathBuf::from("/tmp/out")
        );
        assert_eq!(
            manifest.textures[0].output_name(AssetKind::Texture),
            PathBuf::from("t.rust2d")
        );
    }

    #[test]
    fn rejects_unknown_fields() {
        let result = parse_manifest(
            "[[meshes]]\nid = \"m\"\npath = \"m.obj\"\nscale = 2\n",
            PathBuf::new(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn validate_reports_problems() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.obj"), TRIANGLE_OBJ).unwrap();

        let manifest = parse_manifest(
            r#"
                [[meshes]]
                id = "a"
                path = "a.obj"
                c_array = "bad-name"

                [[meshes]]
                id = "a"
                path = "missing.obj"
            "#,
            dir.path().to_path_buf(),
        )
        .unwrap();

        let err = validate(&manifest).unwrap_err().to_string();
        assert!(err.contains("duplicate mesh id 'a'"), "{err}");
        assert!(err.contains("not found"), "{err}");
        assert!(err.contains("bad-name"), "{err}");
    }

    #[test]
    fn equivalent_output_paths_collide() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.obj"), TRIANGLE_OBJ).unwrap();
        fs::write(dir.path().join("b.obj"), TRIANGLE_OBJ).unwrap();

        let manifest = parse_manifest(
            r#"
                [[meshes]]
                id = "a"
                path = "a.obj"

                [[meshes]]
                id = "b"
                path = "b.obj"
                output = "./a.rust3d"
            "#,
            dir.path().to_path_buf(),
        )
        .unwrap();

        let err = validate(&manifest).unwrap_err().to_string();
        assert!(err.contains("mesh 'b': output \"a.rust3d\" is written twice"), "{err}");
    }

    #[test]
    fn empty_manifest_is_invalid() {
        let manifest = parse_manifest("", PathBuf::new()).unwrap();
        assert!(validate(&manifest).is_err());
    }

    #[test]
    fn build_all_writes_outputs() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("tri.obj"), TRIANGLE_OBJ).unwrap();
        fs::write(
            dir.path().join("assets.toml"),
            "[output]\ndir = \"res\"\n\n[[meshes]]\nid = \"tri\"\npath = \"tri.obj\"\nc_array = \"tri_bin\"\n",
        )
        .unwrap();

        let manifest = load_manifest(&dir.path().join("assets.toml")).unwrap();
        assert_eq!(build_all(&manifest, None).unwrap(), 1);

        let data = fs::read(dir.path().join("res/tri.rust3d")).unwrap();
        // 6 header + 3 * 12 vertices + 8 uv + 12 triangle
        assert_eq!(data.len(), 62);
        assert!(dir.path().join("res/tri.c").is_file());
    }
}
