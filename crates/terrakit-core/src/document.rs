//! Terrain document schema.
//!
//! Nested, self-describing document exchanged with the outside world. The
//! text codec is plain JSON via serde; only the structure below is part of
//! the contract:
//!
//! - `bounds`: center and side length of the square domain (required);
//! - `precision`: target cell size before snapping (required for polygon
//!   input, optional otherwise);
//! - `grid`: a dimension x dimension array of rows, row 0 at the *top*
//!   (highest y);
//! - `tree`: nested quadrants; leaves are numbers, branches are
//!   `{NE, NW, SE, SW}` objects;
//! - `allow` / `block`: polygon vertex lists as `[x, y]` pairs.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::error::{Result, TerrainError};
use crate::geometry::Layout;

/// The `bounds` header: center and side length of the square domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundsDoc {
    pub x: f64,
    pub y: f64,
    pub width: f64,
}

/// One quadtree node in document form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNodeDoc {
    /// A classified region, stored as its bare value.
    Leaf(CellValue),
    /// Four child quadrants.
    Branch {
        #[serde(rename = "NE")]
        ne: Box<TreeNodeDoc>,
        #[serde(rename = "NW")]
        nw: Box<TreeNodeDoc>,
        #[serde(rename = "SE")]
        se: Box<TreeNodeDoc>,
        #[serde(rename = "SW")]
        sw: Box<TreeNodeDoc>,
    },
}

impl TreeNodeDoc {
    /// Depth of the deepest leaf (0 for a bare leaf).
    pub fn depth(&self) -> usize {
        match self {
            TreeNodeDoc::Leaf(_) => 0,
            TreeNodeDoc::Branch { ne, nw, se, sw } => {
                1 + ne.depth().max(nw.depth()).max(se.depth()).max(sw.depth())
            }
        }
    }
}

/// Complete terrain document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainDocument {
    pub bounds: BoundsDoc,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<f64>,
    /// Raster rows, outer index = row, row 0 = top (largest y).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<Vec<Vec<CellValue>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tree: Option<TreeNodeDoc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow: Option<Vec<Vec<[f64; 2]>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<Vec<Vec<[f64; 2]>>>,
}

impl TerrainDocument {
    /// A document holding just a bounds header.
    pub fn with_bounds(x: f64, y: f64, width: f64) -> Self {
        Self {
            bounds: BoundsDoc { x, y, width },
            precision: None,
            grid: None,
            tree: None,
            allow: None,
            block: None,
        }
    }

    /// Parse a document from a JSON stream.
    pub fn from_reader(source: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(source)?)
    }

    /// Parse a document from JSON text.
    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Write the document as JSON.
    pub fn to_writer(&self, sink: impl Write) -> Result<()> {
        Ok(serde_json::to_writer(sink, self)?)
    }

    /// The document as pretty-printed JSON text.
    pub fn to_pretty_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Layout described by the bounds header and an explicit precision.
    pub(crate) fn layout_with_precision(&self, precision: f64) -> Result<Layout> {
        if !self.bounds.width.is_finite() || self.bounds.width <= 0.0 {
            return Err(TerrainError::schema("bounds.width must be positive"));
        }
        if !precision.is_finite() || precision <= 0.0 {
            return Err(TerrainError::schema("precision must be positive"));
        }
        Ok(Layout::new(
            precision,
            self.bounds.x,
            self.bounds.y,
            self.bounds.width,
        ))
    }
}
