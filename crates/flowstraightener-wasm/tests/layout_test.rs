//! Integration tests for the hex-pack layout.

use flowstraightener_wasm::error::LayoutError;
use flowstraightener_wasm::geometry::Point;
use flowstraightener_wasm::layout::{compute, LayoutParameters, LayoutResult, CENTER_TOLERANCE};

const DISTANCE_TOLERANCE: f64 = 1e-9;

fn params(disk: f64, ring: f64, ligament: f64, across: u32) -> LayoutParameters {
    LayoutParameters {
        disk_diameter: disk,
        perimeter_ring: ring,
        ligament,
        holes_across: across,
        part_thickness: 5.0,
    }
}

/// Feasible designs spanning small, large, zero-ligament and zero-ring disks.
fn feasible_designs() -> Vec<LayoutParameters> {
    vec![
        params(60.0, 2.0, 1.0, 6),
        params(100.0, 3.0, 0.5, 12),
        params(45.5, 1.25, 0.75, 9),
        params(200.0, 0.0, 0.0, 40),
        params(8.0, 1.0, 0.5, 2),
        params(30.0, 0.0, 0.0, 3),
        params(120.0, 5.0, 2.0, 17),
    ]
}

#[allow(clippy::expect_used)]
fn layout_for(p: &LayoutParameters) -> LayoutResult {
    compute(p).expect("design should be feasible")
}

/// Every center keeps its hole inside the perimeter ring.
#[test]
fn centers_are_contained() {
    for p in feasible_designs() {
        let layout = layout_for(&p);
        let expected_radius = p.disk_diameter / 2.0 - p.perimeter_ring - layout.hole_diameter / 2.0;
        assert!((layout.max_center_radius - expected_radius).abs() < 1e-12);
        let limit = layout.max_center_radius.powi(2) + CENTER_TOLERANCE;
        for c in &layout.centers {
            assert!(
                c.norm_squared() <= limit,
                "{c:?} escapes radius {} for {p:?}",
                layout.max_center_radius
            );
        }
    }
}

/// No two holes overlap.
#[test]
fn holes_do_not_overlap() {
    for p in feasible_designs() {
        let layout = layout_for(&p);
        for (idx, a) in layout.centers.iter().enumerate() {
            for b in layout.centers.iter().skip(idx + 1) {
                assert!(
                    a.distance(*b) >= layout.hole_diameter - DISTANCE_TOLERANCE,
                    "{a:?} and {b:?} overlap for {p:?}"
                );
            }
        }
    }
}

/// Identical inputs give identical outputs.
#[test]
fn layout_is_deterministic() {
    for p in feasible_designs() {
        assert_eq!(compute(&p), compute(&p));
    }
}

/// Row j mirrors row -j.
#[test]
fn layout_is_symmetric_about_x_axis() {
    for p in feasible_designs() {
        let layout = layout_for(&p);
        for c in &layout.centers {
            let mirrored = Point::new(c.x, -c.y);
            assert!(
                layout
                    .centers
                    .iter()
                    .any(|other| other.distance(mirrored) < DISTANCE_TOLERANCE),
                "{c:?} has no mirror for {p:?}"
            );
        }
    }
}

/// Pitches follow the triangular lattice.
#[test]
fn pitch_matches_triangular_lattice() {
    for p in feasible_designs() {
        let layout = layout_for(&p);
        assert!((layout.pitch_x - (layout.hole_diameter + p.ligament)).abs() < 1e-12);
        let expected_y = 3.0_f64.sqrt() / 2.0 * layout.pitch_x;
        assert!((layout.pitch_y - expected_y).abs() < 1e-9);
        assert!(layout.hole_diameter > 0.0);
        assert!(!layout.centers.is_empty());
    }
}

/// Growing the disk never loses holes.
#[test]
fn hole_count_never_drops_as_disk_grows() {
    for across in 2..=12 {
        let mut previous = 0;
        for step in 0..=36 {
            let disk = 5.0_f64.mul_add(f64::from(step), 20.0);
            let count = layout_for(&params(disk, 1.0, 0.5, across)).centers.len();
            assert!(
                count >= previous,
                "count fell from {previous} to {count} at disk {disk}, {across} across"
            );
            previous = count;
        }
    }
}

/// 60 mm disk, 2 mm ring, 1 mm ligament, 6 across.
#[test]
fn default_form_values() {
    let layout = layout_for(&params(60.0, 2.0, 1.0, 6));
    assert!((layout.hole_diameter - 8.5).abs() < 1e-12);
    assert!((layout.pitch_x - 9.5).abs() < 1e-12);
    assert!((layout.pitch_y - 8.227).abs() < 1e-3);
    assert_eq!(layout.centers.len(), 19);
}

/// Ring plus a single hole exactly fills the radius.
#[test]
fn ring_consuming_radius_fails() {
    assert!(matches!(
        compute(&params(20.0, 9.0, 1.0, 1)),
        Err(LayoutError::RingTooLarge { .. })
    ));
}

/// Ten holes and nine ligaments overfill a 10 mm disk.
#[test]
fn too_many_holes_fails() {
    assert!(matches!(
        compute(&params(10.0, 1.0, 1.0, 10)),
        Err(LayoutError::NonPositiveHoleDiameter { .. })
    ));
}

/// Two across on an 8 mm disk: hole 2.75, pitch 3.25, R_max 1.625.
///
/// Row 0 holds x = 0 only (next column is at 3.25); rows ±1 sit at
/// y ≈ 2.81 > 1.625. Hand count: one hole.
#[test]
fn two_across_matches_hand_count() {
    let layout = layout_for(&params(8.0, 1.0, 0.5, 2));
    assert_eq!(layout.centers.len(), 1);
    assert_eq!(layout.widest_row_len(), 1);
}

/// Error messages name the violated constraint.
#[test]
fn error_messages_are_descriptive() {
    let ring = compute(&params(20.0, 9.0, 1.0, 1)).err().map(|e| e.to_string());
    assert!(ring.is_some_and(|m| m.contains("perimeter ring too large")));

    let diameter = compute(&params(10.0, 1.0, 1.0, 10))
        .err()
        .map(|e| e.to_string());
    assert!(diameter.is_some_and(|m| m.contains("non-positive hole diameter")));

    let invalid = compute(&params(f64::INFINITY, 1.0, 1.0, 3))
        .err()
        .map(|e| e.to_string());
    assert!(invalid.is_some_and(|m| m.contains("disk diameter")));
}
