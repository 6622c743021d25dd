//! Dense grid storage back-end.
//!
//! A fixed-shape row-major array of cell values sized by the layout
//! (`dimension × dimension`, y as the outer axis). Reads outside the domain
//! come back as the [`cell::ERROR`] sentinel; writes outside the domain are
//! dropped and reported through the boolean return of [`Grid::store`].

use std::fmt::Write as _;

use crate::cell::{self, CellValue};
use crate::geometry::{Layout, Point, Polygon};
use crate::raster;

/// Dense row-major terrain grid.
#[derive(Debug, Clone)]
pub struct Grid {
    layout: Layout,
    storage: Vec<CellValue>,
}

impl Grid {
    /// Create a grid over the given layout, filled with [`cell::DEFAULT`].
    pub fn new(layout: Layout) -> Self {
        Self {
            storage: vec![cell::DEFAULT; layout.size()],
            layout,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Cell-center spacing. Equals the layout precision.
    pub fn precision(&self) -> f64 {
        self.layout.precision()
    }

    /// Number of cells along each axis.
    pub fn dimension(&self) -> usize {
        self.layout.dimension()
    }

    /// Total number of cells.
    pub fn size(&self) -> usize {
        self.storage.len()
    }

    /// Check if the point lies within the grid bounds.
    pub fn contains(&self, at: &Point) -> bool {
        self.layout.contains(at)
    }

    /// Read the cell at `(xi, yi)`. Does not check bounds.
    pub fn get(&self, xi: usize, yi: usize) -> CellValue {
        self.storage[yi * self.layout.dimension() + xi]
    }

    /// Write the cell at `(xi, yi)`. Does not check bounds.
    pub fn set(&mut self, xi: usize, yi: usize, value: CellValue) {
        self.storage[yi * self.layout.dimension() + xi] = value;
    }

    /// Value of the cell containing `at`, or [`cell::ERROR`] outside the
    /// grid.
    pub fn classify(&self, at: &Point) -> CellValue {
        if !self.layout.contains(at) {
            return cell::ERROR;
        }
        self.get(self.layout.x_to_index(at.x), self.layout.y_to_index(at.y))
    }

    /// Write a value into the cell containing `at`. Returns false when the
    /// point is outside the grid and the write was dropped.
    pub fn store(&mut self, at: &Point, value: CellValue) -> bool {
        if !self.layout.contains(at) {
            return false;
        }
        let (xi, yi) = (self.layout.x_to_index(at.x), self.layout.y_to_index(at.y));
        self.set(xi, yi, value);
        true
    }

    /// Set every cell to the given value.
    pub fn fill(&mut self, value: CellValue) {
        self.storage.fill(value);
    }

    /// Fill the interior of a polygon with the given value.
    pub fn fill_polygon(&mut self, source: &Polygon, value: CellValue) {
        let Self { layout, storage } = self;
        let dim = layout.dimension();
        raster::scan_polygon(layout, source, |yi, columns| {
            let row = yi * dim;
            storage[row + columns.start..row + columns.end].fill(value);
        });
    }

    /// Replace the layout (after snapping) and resize storage. Contents are
    /// undefined until the next fill.
    pub fn reset(&mut self, layout: Layout) {
        self.layout = layout;
        self.storage.resize(layout.size(), cell::DEFAULT);
    }

    /// Rows of cell values in bottom-up order (row 0 has the lowest y).
    pub fn to_raster(&self) -> Vec<CellValue> {
        self.storage.clone()
    }

    /// Bulk-load rows of cell values in bottom-up order.
    ///
    /// The caller guarantees the shape matches the layout; the terrain
    /// facade validates document input before resizing.
    pub(crate) fn load_rows(&mut self, rows: &[Vec<CellValue>]) {
        debug_assert_eq!(rows.len(), self.layout.dimension());
        for (yi, row) in rows.iter().enumerate() {
            debug_assert_eq!(row.len(), self.layout.dimension());
            let start = yi * self.layout.dimension();
            self.storage[start..start + row.len()].copy_from_slice(row);
        }
    }

    /// Estimated heap footprint in bytes.
    pub fn memory_usage(&self) -> usize {
        std::mem::size_of::<Self>() + self.storage.capacity()
    }

    /// Debug rendering: one hex byte per cell, top row first, zero cells
    /// left blank.
    pub fn draw(&self) -> String {
        let dim = self.layout.dimension();
        let mut out = String::new();
        for yi in (0..dim).rev() {
            for xi in 0..dim {
                let value = self.get(xi, yi);
                if value == 0 {
                    out.push_str("   ,");
                } else {
                    let _ = write!(out, " {value:02x},");
                }
            }
            out.push('\n');
        }
        out
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(Layout::default())
    }
}
