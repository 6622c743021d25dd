//! TerraKit command-line driver.
//!
//! Reads a terrain document from stdin or a file (or generates the demo
//! diamond), loads it into the selected back-end, and optionally re-emits
//! the document and/or a grayscale PNG rendering.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use terrakit_core::{Backend, Grid, QuadTree, Terrain, TerrainDocument};

#[derive(Parser, Debug)]
#[command(name = "terrakit", version, about = "2D terrain occupancy index")]
struct Cli {
    /// Terrain document to load (defaults to stdin)
    #[arg(short, long, value_name = "FILE", conflicts_with = "demo")]
    input: Option<PathBuf>,

    /// Generate the demo diamond document with this domain width instead of
    /// reading input
    #[arg(long, value_name = "WIDTH")]
    demo: Option<f64>,

    /// Cell size for the demo document
    #[arg(long, value_name = "PRECISION", default_value_t = 1.0)]
    precision: f64,

    /// Use the quadtree back-end instead of the dense grid
    #[arg(short, long)]
    tree: bool,

    /// Write the loaded terrain back out as a JSON document
    #[arg(short, long, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Write a grayscale PNG rendering (one pixel per cell)
    #[arg(short, long, value_name = "FILE")]
    png: Option<PathBuf>,

    /// Print a debug drawing of the loaded terrain to stderr
    #[arg(long)]
    dump: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let doc = read_document(&cli)?;

    if cli.tree {
        run(Terrain::new(QuadTree::default()), &doc, &cli)
    } else {
        run(Terrain::new(Grid::default()), &doc, &cli)
    }
}

fn read_document(cli: &Cli) -> Result<TerrainDocument> {
    if let Some(width) = cli.demo {
        return Ok(terrakit_io::diamond_document(width, cli.precision));
    }
    match &cli.input {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok(TerrainDocument::from_json(&text)?)
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(TerrainDocument::from_json(&text)?)
        }
    }
}

fn run<B: Backend>(mut terrain: Terrain<B>, doc: &TerrainDocument, cli: &Cli) -> Result<()> {
    terrain.load_document(doc).context("failed to load terrain")?;
    info!(
        dimension = terrain.layout().dimension(),
        precision = terrain.precision(),
        "terrain loaded"
    );

    if cli.dump {
        eprintln!("{}", terrain.backend().draw());
    }
    if let Some(path) = &cli.out {
        terrakit_io::store_path(&terrain, path)?;
        info!(path = %path.display(), "document written");
    }
    if let Some(path) = &cli.png {
        terrakit_io::write_png(terrain.backend(), path)?;
        info!(path = %path.display(), "png written");
    }
    Ok(())
}
