//! Region quadtree storage back-end.
//!
//! The tree covers the same square domain as the dense grid but stores it
//! adaptively: uniform regions collapse to a single leaf, detailed regions
//! split down to the layout precision. Recursion depth is bounded by
//! `log2(dimension)`.

use crate::cell::{self, CellValue};
use crate::geometry::{Bounds, Layout, Point, Polygon};
use crate::raster;

use super::interpolate;
use super::node::QuadNode;

/// Region quadtree over a square domain.
#[derive(Debug, Clone)]
pub struct QuadTree {
    layout: Layout,
    root: QuadNode,
}

impl QuadTree {
    /// Create a tree over the given layout as a single [`cell::DEFAULT`]
    /// leaf.
    pub fn new(layout: Layout) -> Self {
        Self {
            root: QuadNode::new_leaf(layout.as_bounds(), cell::DEFAULT),
            layout,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Overall bounds of the tree.
    pub fn bounds(&self) -> &Bounds {
        self.root.bounds()
    }

    /// Target cell size: leaves are never split below this width.
    pub fn precision(&self) -> f64 {
        self.layout.precision()
    }

    /// Root node. Exposed for explicit tree construction and inspection.
    pub fn root(&self) -> &QuadNode {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut QuadNode {
        &mut self.root
    }

    /// Check if the point lies within the tree bounds.
    pub fn contains(&self, at: &Point) -> bool {
        self.layout.contains(at)
    }

    /// Value of the leaf containing `at`, or `fallback` outside the tree.
    pub fn search(&self, at: &Point, fallback: CellValue) -> CellValue {
        if !self.contains(at) {
            return fallback;
        }
        self.root.search(at).value().unwrap_or(fallback)
    }

    /// Value of the leaf containing `at`, or [`cell::DEFAULT`] outside the
    /// tree.
    pub fn classify(&self, at: &Point) -> CellValue {
        self.search(at, cell::DEFAULT)
    }

    /// Write a value at the point, splitting down to the target precision.
    /// Returns false when the point is outside the tree and the write was
    /// dropped.
    pub fn store(&mut self, at: &Point, value: CellValue) -> bool {
        if !self.contains(at) {
            return false;
        }
        let precision = self.layout.precision();
        self.root.store(at, value, precision);
        true
    }

    /// Collapse the whole tree to a single leaf of the given value.
    pub fn fill(&mut self, value: CellValue) {
        self.root = QuadNode::new_leaf(self.layout.as_bounds(), value);
    }

    /// Fill the interior of a polygon with the given value, then prune.
    ///
    /// Writes go through the same scanline spans as the dense grid, one
    /// store per cell center, so both back-ends classify identically.
    pub fn fill_polygon(&mut self, source: &Polygon, value: CellValue) {
        let layout = self.layout;
        let precision = layout.precision();
        raster::scan_polygon(&layout, source, |yi, columns| {
            for xi in columns {
                let center = layout.cell_center(xi, yi);
                self.root.store(&center, value, precision);
            }
        });
        self.root.prune();
    }

    /// Bulk-load a raster (rows bottom-up), building the minimal tree.
    ///
    /// The caller guarantees the shape matches the layout; the terrain
    /// facade validates document input first.
    pub(crate) fn load_rows(&mut self, rows: &[Vec<CellValue>]) {
        debug_assert_eq!(rows.len(), self.layout.dimension());
        self.root = QuadNode::from_raster(
            self.layout.as_bounds(),
            rows,
            0,
            0,
            self.layout.dimension(),
        );
    }

    /// Sample every cell center into a bottom-up row-major raster.
    pub fn to_raster(&self) -> Vec<CellValue> {
        let dim = self.layout.dimension();
        let mut raster = Vec::with_capacity(self.layout.size());
        for yi in 0..dim {
            for xi in 0..dim {
                let center = self.layout.cell_center(xi, yi);
                raster.push(self.root.search(&center).value().unwrap_or(cell::DEFAULT));
            }
        }
        raster
    }

    /// Merge uniform branches bottom-up.
    pub fn prune(&mut self) {
        self.root.prune();
    }

    /// Replace the layout and reset to a single default leaf.
    pub fn reset(&mut self, layout: Layout) {
        self.layout = layout;
        self.root = QuadNode::new_leaf(layout.as_bounds(), cell::DEFAULT);
    }

    /// Interpolated reading at the point, or [`cell::DEFAULT`] outside the
    /// tree.
    ///
    /// The three partner leaves are found by stepping one leaf-half-width
    /// from the query point toward its nearer cell edges; a step that leaves
    /// the domain lands back in the query leaf and degenerates the blend to
    /// a single axis.
    pub fn interp(&self, at: &Point) -> CellValue {
        if !self.contains(at) {
            return cell::DEFAULT;
        }
        let leaf = self.root.search(at);
        let center = leaf.bounds().center;
        let step = leaf.bounds().half_width;
        let sx = if at.x >= center.x { step } else { -step };
        let sy = if at.y >= center.y { step } else { -step };

        let xn = self.root.search(&Point::new(at.x + sx, at.y));
        let yn = self.root.search(&Point::new(at.x, at.y + sy));
        let dn = self.root.search(&Point::new(at.x + sx, at.y + sy));

        interpolate::bilinear(at, &leaf.sample(), &xn.sample(), &yn.sample(), &dn.sample())
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Estimated heap footprint in bytes.
    pub fn memory_usage(&self) -> usize {
        std::mem::size_of::<Self>() + self.root.heap_usage()
    }

    /// Debug rendering: indented quadrant listing with leaf values.
    pub fn draw(&self) -> String {
        let bounds = self.bounds();
        let mut out = format!(
            "@({}, {})   |{}|\n",
            bounds.center.x, bounds.center.y, bounds.half_width
        );
        self.root.draw_into(&mut out, "", "RT");
        out
    }
}

impl Default for QuadTree {
    fn default() -> Self {
        Self::new(Layout::default())
    }
}
