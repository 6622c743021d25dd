use terrakit_core::{Layout, Point};

#[test]
fn test_construct_default() {
    let layout = Layout::default();

    assert_eq!(layout.precision(), 1.0);
    assert_eq!(layout.x(), 0.0);
    assert_eq!(layout.y(), 0.0);
    assert_eq!(layout.width(), 1.0);

    assert_eq!(layout.dimension(), 1);
    assert_eq!(layout.size(), 1);
    assert_eq!(layout.padding(), 64);
    assert_eq!(layout.half_width(), 0.5);

    assert!(layout.center().near(&Point::new(0.0, 0.0)));
    assert!(layout.anchor().near(&Point::new(-0.5, -0.5)));
    assert_eq!(layout.x_max(), 0.5);
    assert_eq!(layout.x_min(), -0.5);
    assert_eq!(layout.y_max(), 0.5);
    assert_eq!(layout.y_min(), -0.5);
}

#[test]
fn test_construct_explicit_values() {
    let layout = Layout::new(1.0, 3.0, 1.0, 2.0);

    assert_eq!(layout.precision(), 1.0);
    assert_eq!(layout.x(), 3.0);
    assert_eq!(layout.y(), 1.0);
    assert_eq!(layout.width(), 2.0);

    assert_eq!(layout.padding(), 62);
    assert_eq!(layout.dimension(), 2);
    assert_eq!(layout.size(), 4);
    assert!(layout.anchor().near(&Point::new(2.0, 0.0)));
}

#[test]
fn test_construct_even_division() {
    let layout = Layout::new(2.0, 0.0, 0.0, 8.0);

    assert_eq!(layout.precision(), 2.0);
    assert_eq!(layout.dimension(), 4);
    assert_eq!(layout.size(), 16);
}

#[test]
fn test_snap_uneven_p2_w5() {
    let layout = Layout::new(2.0, 0.0, 0.0, 5.0);

    assert_eq!(layout.dimension(), 4);
    assert_eq!(layout.precision(), 1.25);
    assert_eq!(layout.size(), 16);
    assert_eq!(layout.width(), 5.0);
}

#[test]
fn test_snap_uneven_p04_w16() {
    let layout = Layout::new(0.4, 8.0, 8.0, 16.0);

    assert_eq!(layout.dimension(), 64);
    assert_eq!(layout.precision(), 0.25);
    assert_eq!(layout.size(), 4096);
}

#[test]
fn test_snap_uneven_p7_w32() {
    let layout = Layout::new(7.0, 0.0, 0.0, 32.0);

    assert_eq!(layout.dimension(), 8);
    assert_eq!(layout.precision(), 4.0);
    assert_eq!(layout.size(), 64);
}

#[test]
fn test_snap_uneven_p40_w4096() {
    let layout = Layout::new(40.0, 0.0, 0.0, 4096.0);

    assert_eq!(layout.dimension(), 128);
    assert_eq!(layout.precision(), 32.0);
    assert_eq!(layout.size(), 16384);
    assert_eq!(layout.padding(), 50);
}

#[test]
fn test_snap_invariants_hold_for_assorted_inputs() {
    let precisions = [0.1, 0.25, 0.4, 0.5, 1.0, 1.25, 2.0, 2.5, 3.0, 7.0, 8.8, 40.0];
    let widths = [1.0, 2.0, 5.0, 8.0, 16.0, 32.0, 100.0, 4096.0];

    for &precision in &precisions {
        for &width in &widths {
            let layout = Layout::new(precision, 0.0, 0.0, width);
            let dim = layout.dimension();

            assert!(dim >= 1, "({precision}, {width})");
            assert!(dim.is_power_of_two(), "({precision}, {width}) -> {dim}");
            let rebuilt = dim as f64 * layout.precision();
            assert!(
                (rebuilt - width).abs() < 1e-6 * width.max(1.0),
                "({precision}, {width}) -> {rebuilt}"
            );
            // snapping may lower the precision but never raises it past the
            // domain width
            assert!(layout.precision() <= precision.max(width) + 1e-9);
        }
    }
}

#[test]
fn test_contains_points() {
    let layout = Layout::new(1.0, 2.0, 3.0, 2.0);
    // x bounds [1, 3], y bounds [2, 4]

    assert!(layout.contains(&Point::new(2.0, 3.0)));
    assert!(layout.contains(&Point::new(1.5, 2.5)));
    assert!(layout.contains(&Point::new(2.5, 3.5)));

    // borders contain points on the borders
    assert!(layout.contains(&Point::new(2.0, 2.0)));
    assert!(layout.contains(&Point::new(1.0, 3.0)));

    assert!(!layout.contains(&Point::new(0.0, 0.0)));
    assert!(!layout.contains(&Point::new(1.0, 1.0)));
    assert!(!layout.contains(&Point::new(2.0, 1.5)));
    assert!(!layout.contains(&Point::new(2.0, 4.5)));
    assert!(!layout.contains(&Point::new(0.5, 3.0)));
    assert!(!layout.contains(&Point::new(3.5, 3.0)));
}

#[test]
fn test_x_to_index_ladder() {
    let layout = Layout::new(0.5, 5.0, 5.0, 8.0);
    assert_eq!(layout.precision(), 0.5);
    assert_eq!(layout.dimension(), 16);

    let cases = [
        (0.5, 0), // past the low edge
        (1.0, 0), // first cell
        (1.1, 0),
        (1.49, 0),
        (1.6, 1),
        (2.1, 2),
        (2.6, 3),
        (3.1, 4),
        (3.6, 5),
        (4.1, 6),
        (4.6, 7),
        (5.1, 8),
        (5.6, 9),
        (6.1, 10),
        (6.6, 11),
        (7.1, 12),
        (7.6, 13),
        (8.1, 14),
        (8.5, 15), // last cell
        (8.99, 15),
        (9.1, 15), // past the high edge
    ];
    for (x, expected) in cases {
        assert_eq!(layout.x_to_index(x), expected, "x = {x}");
    }
}

#[test]
fn test_cell_center_round_trips() {
    let layout = Layout::new(0.5, 5.0, 5.0, 8.0);
    for yi in 0..layout.dimension() {
        for xi in 0..layout.dimension() {
            let center = layout.cell_center(xi, yi);
            assert!(layout.contains(&center));
            assert_eq!(layout.x_to_index(center.x), xi);
            assert_eq!(layout.y_to_index(center.y), yi);
        }
    }
}

#[test]
fn test_hash_by_row_major() {
    let layout = Layout::new(1.0, 2.0, 2.0, 4.0);
    assert_eq!(layout.dimension(), 4);

    assert_eq!(layout.row_hash(&Point::new(0.5, 0.5)), 0);
    assert_eq!(layout.row_hash(&Point::new(1.5, 0.5)), 1);
    assert_eq!(layout.row_hash(&Point::new(2.5, 0.5)), 2);
    assert_eq!(layout.row_hash(&Point::new(3.5, 0.5)), 3);

    assert_eq!(layout.row_hash(&Point::new(0.5, 1.5)), 4);
    assert_eq!(layout.row_hash(&Point::new(1.5, 1.5)), 5);
    assert_eq!(layout.row_hash(&Point::new(2.5, 1.5)), 6);
    assert_eq!(layout.row_hash(&Point::new(3.5, 1.5)), 7);

    assert_eq!(layout.row_hash(&Point::new(0.5, 2.5)), 8);
    assert_eq!(layout.row_hash(&Point::new(1.5, 2.5)), 9);
    assert_eq!(layout.row_hash(&Point::new(2.5, 2.5)), 10);
    assert_eq!(layout.row_hash(&Point::new(3.5, 2.5)), 11);

    assert_eq!(layout.row_hash(&Point::new(0.5, 3.5)), 12);
    assert_eq!(layout.row_hash(&Point::new(1.5, 3.5)), 13);
    assert_eq!(layout.row_hash(&Point::new(2.5, 3.5)), 14);
    assert_eq!(layout.row_hash(&Point::new(3.5, 3.5)), 15);
}

#[test]
fn test_hash_by_z_order_curve() {
    let layout = Layout::new(1.0, 2.0, 2.0, 4.0);
    assert_eq!(layout.padding(), 60);
    assert_eq!(layout.dimension(), 4);

    let cases: [(f64, f64, u64); 16] = [
        (0.5, 0.5, 0x0),
        (1.5, 0.5, 0x1),
        (0.5, 1.5, 0x2),
        (1.5, 1.5, 0x3),
        (2.5, 0.5, 0x4),
        (3.5, 0.5, 0x5),
        (2.5, 1.5, 0x6),
        (3.5, 1.5, 0x7),
        (0.5, 2.5, 0x8),
        (1.5, 2.5, 0x9),
        (0.5, 3.5, 0xa),
        (1.5, 3.5, 0xb),
        (2.5, 2.5, 0xc),
        (3.5, 2.5, 0xd),
        (2.5, 3.5, 0xe),
        (3.5, 3.5, 0xf),
    ];
    for (x, y, nibble) in cases {
        assert_eq!(
            layout.z_hash(&Point::new(x, y)),
            nibble << 60,
            "({x}, {y})"
        );
    }
}

#[test]
fn test_equality_within_epsilon() {
    let a = Layout::new(1.0, 2.0, 2.0, 4.0);
    let b = Layout::new(1.0 + 1e-8, 2.0 - 1e-8, 2.0, 4.0);
    let c = Layout::new(1.0, 2.0, 2.0, 8.0);

    assert_eq!(a, b);
    assert_ne!(a, c);
}
