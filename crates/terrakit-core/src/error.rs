//! Error handling for TerraKit.
//!
//! Out-of-bounds reads and writes are *not* errors: reads come back as a
//! sentinel cell value and writes report `false`. The error type below covers
//! the document boundary only: schema violations, malformed polygons, and
//! the underlying parse and I/O failures. All variants use `thiserror`.

use thiserror::Error;

/// Unified error type for document load/store operations.
#[derive(Error, Debug)]
pub enum TerrainError {
    /// Required field missing, wrong type, or a size mismatch. The target
    /// structure is left untouched when this is returned.
    #[error("document schema error: {reason}")]
    Schema { reason: String },

    /// A polygon with fewer than three distinct vertices.
    #[error("polygon has only {vertices} distinct vertices")]
    MalformedPolygon { vertices: usize },

    /// The document text could not be parsed at all.
    #[error("document parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// I/O failure while reading or writing a document stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TerrainError {
    /// Create a schema error from a reason string.
    pub fn schema(reason: impl Into<String>) -> Self {
        TerrainError::Schema {
            reason: reason.into(),
        }
    }

    /// Check if this is a schema error.
    pub fn is_schema(&self) -> bool {
        matches!(self, TerrainError::Schema { .. })
    }
}

/// Result type using [`TerrainError`].
pub type Result<T> = std::result::Result<T, TerrainError>;
