//! Square-grid layout descriptor.
//!
//! A `Layout` is the single source of truth for the cell ↔ coordinate
//! mapping shared by both storage back-ends. It encapsulates the square
//! domain (center + width) and the cell size (precision), snapping the
//! precision down so that the cell count along each axis is a power of two.

use super::bounds::Bounds;
use super::point::Point;

/// Immutable descriptor of a square grid: center, width, and cell size.
///
/// Invariant: `dimension` is a positive power of two and
/// `dimension * precision == width` (within [`Layout::EPSILON`]).
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    precision: f64,
    x: f64,
    y: f64,
    width: f64,
    // cached derived values
    dimension: usize,
    half_width: f64,
}

impl Layout {
    /// Tolerance used for snapping and equality comparisons.
    pub const EPSILON: f64 = 1e-6;

    /// Construct a layout, snapping `precision` so the domain divides into a
    /// power-of-two number of cells per axis.
    ///
    /// The width never changes; the precision may decrease (never increase
    /// past the snapped value).
    pub fn new(precision: f64, x: f64, y: f64, width: f64) -> Self {
        let dimension = Self::snap_dimension(width, precision);
        Self {
            precision: width / dimension as f64,
            x,
            y,
            width,
            dimension,
            half_width: width / 2.0,
        }
    }

    /// Snaps to the next power-of-two dimension that covers the width:
    /// `dimension * precision == width`.
    fn snap_dimension(width: f64, precision: f64) -> usize {
        let guess = width / precision;
        let rounded = guess.round();
        if (guess - rounded).abs() < Self::EPSILON
            && rounded >= 1.0
            && (rounded as usize).is_power_of_two()
        {
            return rounded as usize;
        }
        let exponent = guess.log2().ceil().clamp(0.0, 63.0);
        1usize << exponent as u32
    }

    pub fn precision(&self) -> f64 {
        self.precision
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    /// Number of cells along each axis. Always a positive power of two.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Total number of cells (`dimension²`).
    pub fn size(&self) -> usize {
        self.dimension * self.dimension
    }

    /// Unused high bits of a z-order hash: `64 - 2·log2(dimension)`.
    pub fn padding(&self) -> u32 {
        64 - 2 * self.dimension.trailing_zeros()
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Lower-left corner of the domain.
    pub fn anchor(&self) -> Point {
        Point::new(self.x_min(), self.y_min())
    }

    pub fn x_min(&self) -> f64 {
        self.x - self.half_width
    }

    pub fn x_max(&self) -> f64 {
        self.x + self.half_width
    }

    pub fn y_min(&self) -> f64 {
        self.y - self.half_width
    }

    pub fn y_max(&self) -> f64 {
        self.y + self.half_width
    }

    /// The same region as a [`Bounds`] value.
    pub fn as_bounds(&self) -> Bounds {
        Bounds::new(self.center(), self.width)
    }

    /// Check if the domain contains a point. Borders are inclusive.
    pub fn contains(&self, at: &Point) -> bool {
        if at.x < self.x_min() || at.x > self.x_max() {
            return false;
        }
        if at.y < self.y_min() || at.y > self.y_max() {
            return false;
        }
        true
    }

    /// Clamp a point into the domain on both axes.
    pub fn constrain(&self, at: &Point) -> Point {
        Point::new(
            at.x.clamp(self.x_min(), self.x_max()),
            at.y.clamp(self.y_min(), self.y_max()),
        )
    }

    /// Column index of an x coordinate, clamped to `[0, dimension)`.
    pub fn x_to_index(&self, x: f64) -> usize {
        if x < self.x_min() {
            return 0;
        }
        let index = ((x - self.x_min()) / self.precision) as usize;
        index.min(self.dimension - 1)
    }

    /// Row index of a y coordinate, clamped to `[0, dimension)`.
    pub fn y_to_index(&self, y: f64) -> usize {
        if y < self.y_min() {
            return 0;
        }
        let index = ((y - self.y_min()) / self.precision) as usize;
        index.min(self.dimension - 1)
    }

    /// World coordinates of the center of cell `(xi, yi)`.
    pub fn cell_center(&self, xi: usize, yi: usize) -> Point {
        Point::new(
            self.x_min() + (xi as f64 + 0.5) * self.precision,
            self.y_min() + (yi as f64 + 0.5) * self.precision,
        )
    }

    /// Row-major cell index of the cell containing `at`: `yi·dim + xi`.
    pub fn row_hash(&self, at: &Point) -> usize {
        let at = self.constrain(at);
        self.y_to_index(at.y) * self.dimension + self.x_to_index(at.x)
    }

    /// Z-order (Morton) hash of the cell containing `at`.
    ///
    /// Bit pairs interleave as `(y, x)` from least significant, and the
    /// whole code is shifted so the most significant pair occupies the top
    /// of the 64-bit word; the low [`Layout::padding`] bits stay zero.
    pub fn z_hash(&self, at: &Point) -> u64 {
        let at = self.constrain(at);
        let xi = self.x_to_index(at.x) as u64;
        let yi = self.y_to_index(at.y) as u64;

        let bits = self.dimension.trailing_zeros();
        let mut hash = 0u64;
        for i in 0..bits {
            hash |= ((xi >> i) & 1) << (2 * i);
            hash |= ((yi >> i) & 1) << (2 * i + 1);
        }
        if bits == 0 {
            return 0;
        }
        hash << self.padding()
    }
}

impl Default for Layout {
    /// Unit domain: center (0,0), width 1, precision 1.
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0)
    }
}

impl PartialEq for Layout {
    /// Equality within [`Layout::EPSILON`] over the four primary fields.
    fn eq(&self, other: &Self) -> bool {
        let error = (self.precision - other.precision).abs()
            + (self.x - other.x).abs()
            + (self.y - other.y).abs()
            + (self.width - other.width).abs();
        error < Self::EPSILON
    }
}
