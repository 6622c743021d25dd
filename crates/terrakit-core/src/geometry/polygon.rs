//! Closed polygons used as allow/block fill regions.
//!
//! Polygons are normalized once at construction: the vertex ring is closed
//! (the first vertex is appended when missing), wound counter-clockwise
//! (detected by the shoelace sum and reversed when negative), and the square
//! bounding region is cached. After that the polygon is immutable.

use crate::error::{Result, TerrainError};

use super::bounds::Bounds;
use super::point::Point;

/// An immutable closed polygon with counter-clockwise winding.
#[derive(Debug, Clone)]
pub struct Polygon {
    /// Vertex ring. The last vertex always equals the first.
    vertices: Vec<Point>,
    /// Square hull of the axis-aligned extent.
    bounds: Bounds,
}

impl Polygon {
    /// Build a polygon from a vertex list, normalizing closure and winding.
    ///
    /// Fails with [`TerrainError::MalformedPolygon`] when fewer than three
    /// distinct vertices remain after dropping duplicates.
    pub fn new(source: Vec<Point>) -> Result<Self> {
        let mut vertices: Vec<Point> = Vec::with_capacity(source.len() + 1);
        for p in source {
            if vertices.last().is_some_and(|prev| prev.near(&p)) {
                continue;
            }
            vertices.push(p);
        }
        let already_closed = matches!(vertices.as_slice(), [first, .., last] if first.near(last));
        if already_closed {
            vertices.pop();
        }
        if vertices.len() < 3 {
            return Err(TerrainError::MalformedPolygon {
                vertices: vertices.len(),
            });
        }

        if !Self::is_right_handed(&vertices) {
            vertices.reverse();
        }

        // close the ring so edge iteration can use plain windows
        let first = vertices[0];
        vertices.push(first);

        let bounds = Self::bounds_of(&vertices);
        Ok(Self { vertices, bounds })
    }

    /// The closed vertex ring (last vertex equals the first).
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// The cached square bounds.
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Shoelace test over the open ring. A non-negative sum is
    /// counter-clockwise.
    fn is_right_handed(vertices: &[Point]) -> bool {
        let mut sum = 0.0;
        for i in 0..vertices.len() {
            let p1 = &vertices[i];
            let p2 = &vertices[(i + 1) % vertices.len()];
            sum += p1.x * p2.y - p1.y * p2.x;
        }
        sum >= 0.0
    }

    fn bounds_of(vertices: &[Point]) -> Bounds {
        let mut min = Point::new(f64::MAX, f64::MAX);
        let mut max = Point::new(f64::MIN, f64::MIN);
        for p in vertices {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        let center = Point::new((min.x + max.x) / 2.0, (min.y + max.y) / 2.0);
        let width = (max.x - min.x).max(max.y - min.y);
        Bounds::new(center, width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clockwise_input_is_reversed() {
        // clockwise pentagon; it gets enclosed and reversed internally
        let shape = Polygon::new(vec![
            Point::new(3.0, 4.0),
            Point::new(5.0, 11.0),
            Point::new(12.0, 8.0),
            Point::new(9.0, 5.0),
            Point::new(5.0, 6.0),
        ])
        .unwrap();

        let bounds = shape.bounds();
        assert!((bounds.center.x - 7.5).abs() < 1e-6);
        assert!((bounds.center.y - 7.5).abs() < 1e-6);
        assert!((bounds.half_width - 4.5).abs() < 1e-6);

        let ring = shape.vertices();
        assert!(ring.first().unwrap().near(ring.last().unwrap()));
        assert!(Polygon::is_right_handed(&ring[..ring.len() - 1]));
    }

    #[test]
    fn test_diamond_bounds() {
        let shape = Polygon::new(vec![
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(-1.0, 0.0),
            Point::new(0.0, -1.0),
        ])
        .unwrap();

        let bounds = shape.bounds();
        assert!(bounds.center.near(&Point::new(0.0, 0.0)));
        assert!((bounds.half_width - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_too_few_distinct_vertices() {
        let result = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 0.0),
        ]);
        assert!(matches!(
            result,
            Err(TerrainError::MalformedPolygon { vertices: 2 })
        ));
    }

    #[test]
    fn test_triangle_is_accepted() {
        let shape = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 4.0),
        ])
        .unwrap();
        // three input vertices plus the closing vertex
        assert_eq!(shape.vertices().len(), 4);
    }
}
