//! Linear and bilinear interpolation over heterogeneously sized cells.
//!
//! Quadtree neighbors may live at different tree depths, so interpolation
//! works on [`Sample`]s (leaves reduced to their center and value) rather
//! than on an implicit uniform lattice.

use crate::cell::CellValue;
use crate::geometry::{Point, Sample};

/// Interpolate between two samples at the requested location.
///
/// Far-extrapolation queries take an early out: when the query point is
/// further from a sample than the samples are from each other, the nearer
/// sample wins outright.
pub fn linear(at: &Point, s1: &Sample, s2: &Sample) -> CellValue {
    if s1.at.near(&s2.at) {
        return s1.value;
    }

    let dist1 = s1.at.distance_to(at);
    let dist2 = s2.at.distance_to(at);
    let dist12 = s1.at.distance_to(&s2.at);
    if dist12 < dist1 {
        return s2.value;
    } else if dist12 < dist2 {
        return s1.value;
    }

    let combined = dist1 + dist2;
    let norm1 = 1.0 - dist1 / combined;
    let norm2 = 1.0 - dist2 / combined;
    let interp = norm1 * f64::from(s1.value) + norm2 * f64::from(s2.value);

    interp.round() as CellValue
}

/// Bilinear interpolation across the containing sample and its x-axis,
/// y-axis, and diagonal neighbors.
///
/// When a neighbor lookup clamps back toward the query cell (at the domain
/// border), two of the samples coincide and the problem degenerates to a
/// single linear interpolation along the remaining axis.
pub fn bilinear(at: &Point, origin: &Sample, xn: &Sample, yn: &Sample, dn: &Sample) -> CellValue {
    if xn.at.near(&dn.at) {
        // top or bottom border
        return linear(&Point::new(at.x, xn.at.y), origin, xn);
    }
    if yn.at.near(&dn.at) {
        // left or right border
        return linear(&Point::new(yn.at.x, at.y), origin, yn);
    }

    let upper_at = Point::new(at.x, xn.at.y);
    let upper = Sample::new(upper_at, linear(&upper_at, origin, xn));

    let lower_at = Point::new(at.x, yn.at.y);
    let lower = Sample::new(lower_at, linear(&lower_at, yn, dn));

    linear(at, &upper, &lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_ramp_between_samples() {
        let s1 = Sample::new(Point::new(0.0, 0.0), 0);
        let s2 = Sample::new(Point::new(10.0, 10.0), 50);

        let cases = [
            (-1.0, 0),
            (0.0, 0),
            (1.0, 5),
            (2.0, 10),
            (5.0, 25),
            (8.0, 40),
            (10.0, 50),
            (11.0, 50),
        ];
        for (t, expected) in cases {
            assert_eq!(linear(&Point::new(t, t), &s1, &s2), expected, "at {t}");
        }
    }

    #[test]
    fn test_linear_offset_centers() {
        let s1 = Sample::new(Point::new(-15.0, -15.0), 100);
        let s2 = Sample::new(Point::new(17.0, -15.0), 50);

        let cases = [
            (-15.1, 100),
            (-15.0, 100),
            (-14.0, 98),
            (-10.0, 92),
            (-5.0, 84),
            (0.0, 77),
            (1.0, 75),
            (5.0, 69),
            (10.0, 61),
            (15.0, 53),
            (16.9, 50),
            (17.0, 50),
            (17.1, 50),
        ];
        for (x, expected) in cases {
            assert_eq!(
                linear(&Point::new(x, -15.0), &s1, &s2),
                expected,
                "at x={x}"
            );
        }
    }

    #[test]
    fn test_same_sample_short_circuits() {
        let s = Sample::new(Point::new(3.0, 3.0), 42);
        assert_eq!(linear(&Point::new(100.0, 100.0), &s, &s), 42);
    }
}
