//! Terrain facade over the two storage back-ends.
//!
//! [`Backend`] is the capability set shared by [`Grid`] and [`QuadTree`];
//! [`Terrain`] wraps either one and adds document load/store dispatch: a
//! document carrying a `grid` is adopted as a raster, one carrying a `tree`
//! is loaded recursively, and one carrying only polygons is rasterized over
//! a blocked background.

use std::io::{Read, Write};

use tracing::{debug, warn};

use crate::cell::{self, CellValue};
use crate::document::{TerrainDocument, TreeNodeDoc};
use crate::error::{Result, TerrainError};
use crate::geometry::{Layout, Point, Polygon};
use crate::grid::Grid;
use crate::quadtree::QuadTree;

/// Storage capabilities required of a terrain back-end.
pub trait Backend {
    fn layout(&self) -> &Layout;

    /// Replace the layout; contents are undefined until the next fill.
    fn reset(&mut self, layout: Layout);

    /// Set the whole domain to one value.
    fn fill(&mut self, value: CellValue);

    /// Fill the interior of a polygon.
    fn fill_polygon(&mut self, source: &Polygon, value: CellValue);

    /// Value of the cell containing the point, or the back-end's
    /// out-of-bounds sentinel.
    fn classify(&self, at: &Point) -> CellValue;

    /// Write one cell; false when the point was outside and the write was
    /// dropped.
    fn store(&mut self, at: &Point, value: CellValue) -> bool;

    /// Adopt a raster given as bottom-up rows matching the layout shape.
    fn load_raster(&mut self, rows: &[Vec<CellValue>]);

    /// Adopt a document tree. The layout must already cover its depth.
    fn load_tree(&mut self, node: &TreeNodeDoc) -> Result<()>;

    /// Snapshot as a bottom-up row-major raster.
    fn to_raster(&self) -> Vec<CellValue>;

    /// Export as a document (grid back-ends emit `grid`, trees emit `tree`).
    fn to_document(&self) -> TerrainDocument;

    /// Debug rendering for logs and the CLI.
    fn draw(&self) -> String;
}

impl Backend for Grid {
    fn layout(&self) -> &Layout {
        Grid::layout(self)
    }

    fn reset(&mut self, layout: Layout) {
        Grid::reset(self, layout);
    }

    fn fill(&mut self, value: CellValue) {
        Grid::fill(self, value);
    }

    fn fill_polygon(&mut self, source: &Polygon, value: CellValue) {
        Grid::fill_polygon(self, source, value);
    }

    fn classify(&self, at: &Point) -> CellValue {
        Grid::classify(self, at)
    }

    fn store(&mut self, at: &Point, value: CellValue) -> bool {
        Grid::store(self, at, value)
    }

    fn load_raster(&mut self, rows: &[Vec<CellValue>]) {
        self.load_rows(rows);
    }

    fn load_tree(&mut self, node: &TreeNodeDoc) -> Result<()> {
        let dim = self.layout().dimension();
        let mut rows = vec![vec![cell::DEFAULT; dim]; dim];
        paint_tree(node, &mut rows, 0, 0, dim)?;
        self.load_rows(&rows);
        Ok(())
    }

    fn to_raster(&self) -> Vec<CellValue> {
        Grid::to_raster(self)
    }

    fn to_document(&self) -> TerrainDocument {
        let layout = self.layout();
        let dim = layout.dimension();
        let raster = Grid::to_raster(self);
        // in-memory rows are bottom-up; the document wants the top row first
        let rows = (0..dim)
            .rev()
            .map(|yi| raster[yi * dim..(yi + 1) * dim].to_vec())
            .collect();

        let mut doc = TerrainDocument::with_bounds(layout.x(), layout.y(), layout.width());
        doc.precision = Some(layout.precision());
        doc.grid = Some(rows);
        doc
    }

    fn draw(&self) -> String {
        Grid::draw(self)
    }
}

impl Backend for QuadTree {
    fn layout(&self) -> &Layout {
        QuadTree::layout(self)
    }

    fn reset(&mut self, layout: Layout) {
        QuadTree::reset(self, layout);
    }

    fn fill(&mut self, value: CellValue) {
        QuadTree::fill(self, value);
    }

    fn fill_polygon(&mut self, source: &Polygon, value: CellValue) {
        QuadTree::fill_polygon(self, source, value);
    }

    fn classify(&self, at: &Point) -> CellValue {
        QuadTree::classify(self, at)
    }

    fn store(&mut self, at: &Point, value: CellValue) -> bool {
        QuadTree::store(self, at, value)
    }

    fn load_raster(&mut self, rows: &[Vec<CellValue>]) {
        self.load_rows(rows);
    }

    fn load_tree(&mut self, node: &TreeNodeDoc) -> Result<()> {
        let bounds = self.layout().as_bounds();
        *self.root_mut() = crate::quadtree::QuadNode::from_doc(bounds, node);
        Ok(())
    }

    fn to_raster(&self) -> Vec<CellValue> {
        QuadTree::to_raster(self)
    }

    fn to_document(&self) -> TerrainDocument {
        let layout = self.layout();
        let mut doc = TerrainDocument::with_bounds(layout.x(), layout.y(), layout.width());
        doc.precision = Some(layout.precision());
        doc.tree = Some(self.root().to_doc());
        doc
    }

    fn draw(&self) -> String {
        QuadTree::draw(self)
    }
}

/// Rasterize a document tree into bottom-up rows over an aligned
/// power-of-two region.
fn paint_tree(
    node: &TreeNodeDoc,
    rows: &mut [Vec<CellValue>],
    x0: usize,
    y0: usize,
    span: usize,
) -> Result<()> {
    match node {
        TreeNodeDoc::Leaf(value) => {
            for row in &mut rows[y0..y0 + span] {
                row[x0..x0 + span].fill(*value);
            }
            Ok(())
        }
        TreeNodeDoc::Branch { ne, nw, se, sw } => {
            if span < 2 {
                return Err(TerrainError::schema(
                    "tree is deeper than the layout dimension",
                ));
            }
            let half = span / 2;
            paint_tree(ne, rows, x0 + half, y0 + half, half)?;
            paint_tree(nw, rows, x0, y0 + half, half)?;
            paint_tree(sw, rows, x0, y0, half)?;
            paint_tree(se, rows, x0 + half, y0, half)?;
            Ok(())
        }
    }
}

/// Thin polymorphic adapter over a storage back-end.
#[derive(Debug, Clone, Default)]
pub struct Terrain<T> {
    backend: T,
}

impl<T: Backend> Terrain<T> {
    pub fn new(backend: T) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &T {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut T {
        &mut self.backend
    }

    pub fn into_inner(self) -> T {
        self.backend
    }

    pub fn layout(&self) -> &Layout {
        self.backend.layout()
    }

    /// Cell size of the underlying lookup structure.
    pub fn precision(&self) -> f64 {
        self.backend.layout().precision()
    }

    pub fn fill(&mut self, value: CellValue) {
        self.backend.fill(value);
    }

    pub fn fill_polygon(&mut self, source: &Polygon, value: CellValue) {
        self.backend.fill_polygon(source, value);
    }

    pub fn classify(&self, at: &Point) -> CellValue {
        self.backend.classify(at)
    }

    pub fn store(&mut self, at: &Point, value: CellValue) -> bool {
        self.backend.store(at, value)
    }

    /// Parse a JSON document from the stream and load it.
    pub fn load(&mut self, source: impl Read) -> Result<()> {
        let doc = TerrainDocument::from_reader(source)?;
        self.load_document(&doc)
    }

    /// Load a document into the back-end.
    ///
    /// Dispatches on the populated fields: `grid` is adopted verbatim,
    /// `tree` is loaded recursively, and otherwise `allow`/`block` polygons
    /// are rasterized over a blocked background. Validation happens before
    /// any mutation, so a schema error leaves the back-end untouched.
    pub fn load_document(&mut self, doc: &TerrainDocument) -> Result<()> {
        if let Some(grid) = &doc.grid {
            let dim = grid.len();
            if dim == 0 || grid.iter().any(|row| row.len() != dim) {
                return Err(TerrainError::schema(format!(
                    "grid must be square, got {dim} rows"
                )));
            }
            let precision = doc
                .precision
                .unwrap_or(doc.bounds.width / dim as f64);
            let layout = doc.layout_with_precision(precision)?;
            if layout.dimension() != dim {
                return Err(TerrainError::schema(format!(
                    "grid is {dim}x{dim} but the layout divides into {}x{} cells",
                    layout.dimension(),
                    layout.dimension()
                )));
            }

            self.backend.reset(layout);
            // document rows are top-first; storage rows are bottom-up
            let rows: Vec<Vec<CellValue>> = grid.iter().rev().cloned().collect();
            self.backend.load_raster(&rows);
            debug!(dimension = dim, "loaded raster document");
            return Ok(());
        }

        if let Some(tree) = &doc.tree {
            let depth = tree.depth();
            if depth > 32 {
                return Err(TerrainError::schema(format!(
                    "tree depth {depth} is unsupported"
                )));
            }
            let precision = doc
                .precision
                .unwrap_or(doc.bounds.width / (1usize << depth) as f64);
            let layout = doc.layout_with_precision(precision)?;
            if (1usize << depth) > layout.dimension() {
                return Err(TerrainError::schema(format!(
                    "tree depth {depth} exceeds the layout dimension {}",
                    layout.dimension()
                )));
            }

            self.backend.reset(layout);
            self.backend.load_tree(tree)?;
            debug!(depth, "loaded tree document");
            return Ok(());
        }

        let Some(precision) = doc.precision else {
            return Err(TerrainError::schema(
                "precision is required for polygon input",
            ));
        };
        self.backend.reset(doc.layout_with_precision(precision)?);
        self.backend.fill(cell::BLOCK);
        self.fill_areas(doc.allow.as_deref(), cell::ALLOW);
        self.fill_areas(doc.block.as_deref(), cell::BLOCK);
        Ok(())
    }

    /// Rasterize a document polygon list, discarding malformed entries.
    fn fill_areas(&mut self, areas: Option<&[Vec<[f64; 2]>]>, value: CellValue) {
        for vertices in areas.unwrap_or_default() {
            let points = vertices.iter().map(|&[x, y]| Point::new(x, y)).collect();
            match Polygon::new(points) {
                Ok(polygon) => self.backend.fill_polygon(&polygon, value),
                Err(error) => warn!(%error, "discarding polygon"),
            }
        }
    }

    /// Export the back-end state as a document.
    pub fn to_document(&self) -> TerrainDocument {
        self.backend.to_document()
    }

    /// Write the back-end state as a JSON document.
    pub fn store_document(&self, sink: impl Write) -> Result<()> {
        self.to_document().to_writer(sink)
    }
}

impl Terrain<QuadTree> {
    /// Interpolated reading; quadtree back-end only.
    pub fn interp(&self, at: &Point) -> CellValue {
        self.backend.interp(at)
    }
}
