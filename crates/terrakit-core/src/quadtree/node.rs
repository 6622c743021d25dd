//! Region quadtree nodes.
//!
//! Every node covers a square region and is either a leaf carrying a single
//! cell value or a branch owning exactly four child quadrants; the two
//! states are disjoint by construction of the [`NodeKind`] sum type.
//! Children are exclusively owned by their parent; there are no back
//! pointers, so dropping the root releases the whole tree.

use crate::cell::{self, CellValue};
use crate::document::TreeNodeDoc;
use crate::geometry::{Bounds, Point, Sample};

/// Child slot order: counter-clockwise from the north-east quadrant.
pub const NE: usize = 0;
pub const NW: usize = 1;
pub const SW: usize = 2;
pub const SE: usize = 3;

/// Leaf or branch state of a node.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// A classified region.
    Leaf(CellValue),
    /// Four child quadrants in [`NE`], [`NW`], [`SW`], [`SE`] order.
    Branch(Box<[QuadNode; 4]>),
}

/// A square tree node.
#[derive(Debug, Clone)]
pub struct QuadNode {
    bounds: Bounds,
    kind: NodeKind,
}

impl QuadNode {
    /// Create a leaf covering the given region.
    pub fn new_leaf(bounds: Bounds, value: CellValue) -> Self {
        Self {
            bounds,
            kind: NodeKind::Leaf(value),
        }
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    /// Leaf value, or `None` for a branch.
    pub fn value(&self) -> Option<CellValue> {
        match self.kind {
            NodeKind::Leaf(value) => Some(value),
            NodeKind::Branch(_) => None,
        }
    }

    /// Overwrite this node with a leaf of the given value.
    pub fn set_value(&mut self, value: CellValue) {
        self.kind = NodeKind::Leaf(value);
    }

    /// This node reduced to its center sample.
    pub(crate) fn sample(&self) -> Sample {
        Sample::new(self.bounds.center, self.value().unwrap_or(cell::DEFAULT))
    }

    pub fn northeast(&self) -> Option<&QuadNode> {
        self.child(NE)
    }

    pub fn northwest(&self) -> Option<&QuadNode> {
        self.child(NW)
    }

    pub fn southwest(&self) -> Option<&QuadNode> {
        self.child(SW)
    }

    pub fn southeast(&self) -> Option<&QuadNode> {
        self.child(SE)
    }

    fn child(&self, quadrant: usize) -> Option<&QuadNode> {
        match &self.kind {
            NodeKind::Leaf(_) => None,
            NodeKind::Branch(children) => Some(&children[quadrant]),
        }
    }

    pub fn child_mut(&mut self, quadrant: usize) -> Option<&mut QuadNode> {
        match &mut self.kind {
            NodeKind::Leaf(_) => None,
            NodeKind::Branch(children) => Some(&mut children[quadrant]),
        }
    }

    /// Child slot containing the point. Boundary ties prefer the positive-x,
    /// then positive-y quadrant.
    fn quadrant_of(&self, at: &Point) -> usize {
        let east = at.x >= self.bounds.center.x;
        let north = at.y >= self.bounds.center.y;
        match (east, north) {
            (true, true) => NE,
            (false, true) => NW,
            (false, false) => SW,
            (true, false) => SE,
        }
    }

    /// Turn a leaf into a branch of four half-size children.
    ///
    /// Children start out as leaves carrying the parent's value, so the
    /// classification function is unchanged by a split.
    pub fn split(&mut self) {
        let value = match self.kind {
            NodeKind::Leaf(value) => value,
            NodeKind::Branch(_) => return,
        };
        let center = self.bounds.center;
        let quarter = self.bounds.half_width / 2.0;
        let child_width = self.bounds.half_width;

        let child = |dx: f64, dy: f64| {
            QuadNode::new_leaf(
                Bounds::new(
                    Point::new(center.x + dx * quarter, center.y + dy * quarter),
                    child_width,
                ),
                value,
            )
        };

        self.kind = NodeKind::Branch(Box::new([
            child(1.0, 1.0),
            child(-1.0, 1.0),
            child(-1.0, -1.0),
            child(1.0, -1.0),
        ]));
    }

    /// Descend to the leaf whose region contains the point. Points outside
    /// this node clamp to the nearest quadrant along the descent.
    pub fn search(&self, at: &Point) -> &QuadNode {
        match &self.kind {
            NodeKind::Leaf(_) => self,
            NodeKind::Branch(children) => children[self.quadrant_of(at)].search(at),
        }
    }

    /// Write a value at the point, splitting down to the target precision.
    pub(crate) fn store(&mut self, at: &Point, value: CellValue, precision: f64) {
        // widths halve per level, so the first width at or below the target
        // precision is the leaf resolution
        if self.bounds.width() <= precision * 1.5 {
            self.kind = NodeKind::Leaf(value);
            return;
        }
        if self.is_leaf() {
            self.split();
        }
        let quadrant = self.quadrant_of(at);
        if let NodeKind::Branch(children) = &mut self.kind {
            children[quadrant].store(at, value, precision);
        }
    }

    /// Bottom-up merge of branches whose four children are leaves with the
    /// same value. Produces the structurally minimal tree.
    pub fn prune(&mut self) {
        let NodeKind::Branch(children) = &mut self.kind else {
            return;
        };
        for child in children.iter_mut() {
            child.prune();
        }
        let first = children[0].value();
        if first.is_some() && children.iter().all(|child| child.value() == first) {
            self.kind = NodeKind::Leaf(first.unwrap_or(cell::DEFAULT));
        }
    }

    /// Recursively build the minimal tree over a raster sub-region.
    ///
    /// `rows` are bottom-up; the sub-region spans `span` cells from cell
    /// `(x0, y0)`.
    pub(crate) fn from_raster(
        bounds: Bounds,
        rows: &[Vec<CellValue>],
        x0: usize,
        y0: usize,
        span: usize,
    ) -> QuadNode {
        let first = rows[y0][x0];
        let uniform = rows[y0..y0 + span]
            .iter()
            .all(|row| row[x0..x0 + span].iter().all(|&value| value == first));
        if uniform {
            return QuadNode::new_leaf(bounds, first);
        }

        let center = bounds.center;
        let quarter = bounds.half_width / 2.0;
        let half = span / 2;
        let child = |dx: f64, dy: f64, cx: usize, cy: usize| {
            QuadNode::from_raster(
                Bounds::new(
                    Point::new(center.x + dx * quarter, center.y + dy * quarter),
                    bounds.half_width,
                ),
                rows,
                cx,
                cy,
                half,
            )
        };

        QuadNode {
            bounds,
            kind: NodeKind::Branch(Box::new([
                child(1.0, 1.0, x0 + half, y0 + half),
                child(-1.0, 1.0, x0, y0 + half),
                child(-1.0, -1.0, x0, y0),
                child(1.0, -1.0, x0 + half, y0),
            ])),
        }
    }

    /// Rebuild a node from its document form.
    pub(crate) fn from_doc(bounds: Bounds, doc: &TreeNodeDoc) -> QuadNode {
        match doc {
            TreeNodeDoc::Leaf(value) => QuadNode::new_leaf(bounds, *value),
            TreeNodeDoc::Branch { ne, nw, se, sw } => {
                let center = bounds.center;
                let quarter = bounds.half_width / 2.0;
                let child = |dx: f64, dy: f64, doc: &TreeNodeDoc| {
                    QuadNode::from_doc(
                        Bounds::new(
                            Point::new(center.x + dx * quarter, center.y + dy * quarter),
                            bounds.half_width,
                        ),
                        doc,
                    )
                };
                QuadNode {
                    bounds,
                    kind: NodeKind::Branch(Box::new([
                        child(1.0, 1.0, ne),
                        child(-1.0, 1.0, nw),
                        child(-1.0, -1.0, sw),
                        child(1.0, -1.0, se),
                    ])),
                }
            }
        }
    }

    /// Document form of this node: a bare number for a leaf, a quadrant
    /// object for a branch.
    pub(crate) fn to_doc(&self) -> TreeNodeDoc {
        match &self.kind {
            NodeKind::Leaf(value) => TreeNodeDoc::Leaf(*value),
            NodeKind::Branch(children) => TreeNodeDoc::Branch {
                ne: Box::new(children[NE].to_doc()),
                nw: Box::new(children[NW].to_doc()),
                se: Box::new(children[SE].to_doc()),
                sw: Box::new(children[SW].to_doc()),
            },
        }
    }

    /// Total nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf(_) => 1,
            NodeKind::Branch(children) => {
                1 + children.iter().map(QuadNode::node_count).sum::<usize>()
            }
        }
    }

    /// Leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf(_) => 1,
            NodeKind::Branch(children) => children.iter().map(QuadNode::leaf_count).sum(),
        }
    }

    /// Heap bytes owned by this subtree, excluding the node itself.
    pub(crate) fn heap_usage(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf(_) => 0,
            NodeKind::Branch(children) => {
                std::mem::size_of::<[QuadNode; 4]>()
                    + children.iter().map(QuadNode::heap_usage).sum::<usize>()
            }
        }
    }

    pub(crate) fn draw_into(&self, out: &mut String, prefix: &str, label: &str) {
        use std::fmt::Write as _;
        match &self.kind {
            NodeKind::Leaf(value) => {
                let _ = writeln!(out, "{prefix}[{label}]: {value}");
            }
            NodeKind::Branch(children) => {
                let _ = writeln!(out, "{prefix}[{label}]");
                let next = format!("{prefix}    ");
                children[NE].draw_into(out, &next, "NE");
                children[NW].draw_into(out, &next, "NW");
                children[SE].draw_into(out, &next, "SE");
                children[SW].draw_into(out, &next, "SW");
            }
        }
    }
}
