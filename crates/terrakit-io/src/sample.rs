//! Sample terrain documents for demos and tests.

use terrakit_core::TerrainDocument;

/// A document describing a diamond-shaped allowed area centered in an
/// otherwise blocked square domain.
pub fn diamond_document(width: f64, precision: f64) -> TerrainDocument {
    let half = width / 2.0;
    let mut doc = TerrainDocument::with_bounds(half, half, width);
    doc.precision = Some(precision);
    doc.allow = Some(vec![vec![
        [width, half],
        [half, width],
        [0.0, half],
        [half, 0.0],
    ]]);
    doc
}
