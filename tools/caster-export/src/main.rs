//! caster-export - caster asset export tool
//!
//! Converts raw assets (OBJ, PNG, JPEG) to renderer-ready binary formats
//! (.rust3d, .rust2d), optionally as C array sources.

use anyhow::{Context, Result};
use caster_common::{ASSET_FORMAT, decode_image, decode_mesh};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

// Use modules from library
use caster_export::{manifest, mesh, texture};

#[derive(Parser)]
#[command(name = "caster-export")]
#[command(about = "Caster asset export tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build assets from a manifest file
    Build {
        /// Path to assets.toml manifest
        #[arg(default_value = "assets.toml")]
        manifest: PathBuf,

        /// Output directory (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output (debug logging)
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate manifest without building
    Check {
        /// Path to assets.toml manifest
        #[arg(default_value = "assets.toml")]
        manifest: PathBuf,
    },

    /// Export a single mesh file
    Mesh {
        /// Input OBJ file
        input: PathBuf,

        /// Output .rust3d file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write a C array source with this symbol name
        #[arg(long)]
        c_array: Option<String>,
    },

    /// Export a single texture file
    Texture {
        /// Input PNG/JPG file
        input: PathBuf,

        /// Output .rust2d file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write a C array source with this symbol name
        #[arg(long)]
        c_array: Option<String>,
    },

    /// Describe an exported .rust3d or .rust2d file
    Info {
        /// Exported asset file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.command {
        Commands::Build { verbose: true, .. } => tracing::Level::DEBUG,
        _ => tracing::Level::INFO,
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    match cli.command {
        Commands::Build {
            manifest, output, ..
        } => {
            tracing::debug!("Building assets from {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            let built = manifest::build_all(&config, output.as_deref())?;
            tracing::info!("Build complete! {} asset(s) written", built);
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            manifest::validate(&config)?;
            tracing::info!("Manifest is valid!");
        }

        Commands::Mesh {
            input,
            output,
            c_array,
        } => {
            let output = output.unwrap_or_else(|| input.with_extension(ASSET_FORMAT.mesh_ext));
            tracing::info!("Converting {:?} -> {:?}", input, output);

            let ext = extension_of(&input);
            match ext.as_str() {
                "obj" => mesh::convert_obj(&input, &output, c_array.as_deref())?,
                _ => anyhow::bail!("Unsupported mesh format: {:?} (use .obj)", input),
            }
            tracing::info!("Done!");
        }

        Commands::Texture {
            input,
            output,
            c_array,
        } => {
            let output = output.unwrap_or_else(|| input.with_extension(ASSET_FORMAT.texture_ext));
            tracing::info!("Converting {:?} -> {:?}", input, output);
            texture::convert_image(&input, &output, c_array.as_deref())?;
            tracing::info!("Done!");
        }

        Commands::Info { input } => describe(&input)?,
    }

    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default()
}

fn describe(input: &Path) -> Result<()> {
    let data = std::fs::read(input).with_context(|| format!("Failed to open asset: {:?}", input))?;
    let ext = extension_of(input);

    if ext == ASSET_FORMAT.mesh_ext {
        let mesh = decode_mesh(&data).with_context(|| format!("Invalid mesh file: {:?}", input))?;
        tracing::info!(
            "{:?}: mesh with {} vertices, {} uvs, {} triangles ({} bytes)",
            input,
            mesh.vertices.len(),
            mesh.uvs.len(),
            mesh.triangles.len(),
            data.len()
        );
    } else if ext == ASSET_FORMAT.texture_ext {
        let image =
            decode_image(&data).with_context(|| format!("Invalid texture file: {:?}", input))?;
        tracing::info!(
            "{:?}: texture {}x{} RGBA8 ({} bytes)",
            input,
            image.width(),
            image.height(),
            data.len()
        );
    } else {
        anyhow::bail!(
            "Unknown asset type: {:?} (use .{} or .{})",
            input,
            ASSET_FORMAT.mesh_ext,
            ASSET_FORMAT.texture_ext
        );
    }

    Ok(())
}
