//! # TerraKit I/O
//!
//! File-boundary helpers around the core terrain types: loading and storing
//! JSON documents by path, grayscale PNG rendering, and sample document
//! generation. Everything here is a thin collaborator; the document schema
//! itself lives in `terrakit-core`.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use terrakit_core::{Backend, Terrain};

pub mod png;
pub mod sample;

pub use png::{to_image, write_png};
pub use sample::diamond_document;

/// Load a JSON terrain document from a file into the terrain.
pub fn load_path<B: Backend>(terrain: &mut Terrain<B>, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    terrain
        .load(BufReader::new(file))
        .with_context(|| format!("failed to load terrain from {}", path.display()))?;
    debug!(path = %path.display(), "loaded terrain document");
    Ok(())
}

/// Write the terrain state as a JSON document file.
pub fn store_path<B: Backend>(terrain: &Terrain<B>, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    terrain
        .store_document(BufWriter::new(file))
        .with_context(|| format!("failed to store terrain to {}", path.display()))?;
    debug!(path = %path.display(), "stored terrain document");
    Ok(())
}
