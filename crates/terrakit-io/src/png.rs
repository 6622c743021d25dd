//! Grayscale PNG rendering of terrain state.
//!
//! One pixel per cell; the top image row is the highest-y terrain row.

use std::path::Path;

use anyhow::{Context, Result};
use image::{GrayImage, Luma};
use terrakit_core::Backend;

/// Render the back-end raster into a grayscale image.
pub fn to_image<B: Backend>(backend: &B) -> GrayImage {
    let dim = backend.layout().dimension();
    let raster = backend.to_raster();

    let mut image = GrayImage::new(dim as u32, dim as u32);
    for yi in 0..dim {
        for xi in 0..dim {
            // raster rows are bottom-up, image rows top-down
            let pixel = Luma([raster[yi * dim + xi]]);
            image.put_pixel(xi as u32, (dim - 1 - yi) as u32, pixel);
        }
    }
    image
}

/// Render the back-end and save it as a PNG file.
pub fn write_png<B: Backend>(backend: &B, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    to_image(backend)
        .save(path)
        .with_context(|| format!("failed to write PNG to {}", path.display()))
}
