// Geometry kernel tests: reflection, rotation, snapping, and the
// ray-segment intersection contract.

use glam::Vec2;
use prism_core::constants::{GRID_SIZE, RAY_T_EPSILON, SNAP_SIZE};
use prism_core::math::{ray_segment_intersection, reflect, rotate, snap};

const EPS: f32 = 1e-5;

fn approx(a: Vec2, b: Vec2) -> bool {
    (a - b).length() < EPS
}

#[test]
fn reflect_at_normal_incidence_negates_direction() {
    let d = Vec2::new(1.0, 0.0);
    let n = Vec2::new(1.0, 0.0);
    assert!(approx(reflect(d, n), -d), "head-on hit must bounce straight back");
    // The sign of the normal must not matter.
    assert!(approx(reflect(d, -n), -d));
}

#[test]
fn reflect_at_45_degrees_turns_the_beam() {
    let d = Vec2::new(1.0, 0.0);
    let n = rotate(Vec2::X, std::f32::consts::FRAC_PI_4);
    let r = reflect(d, n);
    assert!(approx(r, Vec2::new(0.0, -1.0)), "got {r:?}");
}

#[test]
fn reflect_preserves_length() {
    for i in 0..24 {
        let angle = i as f32 * 0.26;
        let d = rotate(Vec2::X, angle);
        let n = rotate(Vec2::X, angle * 1.7 + 0.4);
        let r = reflect(d, n);
        assert!(
            (r.length() - d.length()).abs() < EPS,
            "length changed at angle {angle}"
        );
    }
}

#[test]
fn rotate_quarter_turn() {
    assert!(approx(
        rotate(Vec2::X, std::f32::consts::FRAC_PI_2),
        Vec2::Y
    ));
}

#[test]
fn rotate_preserves_length() {
    let v = Vec2::new(3.0, -4.0);
    for i in 0..32 {
        let angle = i as f32 * 0.2 - 3.0;
        assert!((rotate(v, angle).length() - 5.0).abs() < 1e-4);
    }
}

#[test]
fn normalize_of_zero_vector_is_zero() {
    // Defined, not an error.
    assert_eq!(Vec2::ZERO.normalize_or_zero(), Vec2::ZERO);
}

#[test]
fn snap_rounds_to_half_cells() {
    assert_eq!(snap(27.0), 20.0);
    assert_eq!(snap(31.0), 40.0);
    assert_eq!(snap(0.0), 0.0);
    assert_eq!(snap(GRID_SIZE), GRID_SIZE);
    // Snap resolution is half a cell.
    assert_eq!(snap(SNAP_SIZE + 1.0), SNAP_SIZE);
}

#[test]
fn intersection_hits_a_crossing_segment() {
    let hit = ray_segment_intersection(
        Vec2::ZERO,
        Vec2::X,
        Vec2::new(5.0, -1.0),
        Vec2::new(5.0, 1.0),
    )
    .expect("ray should hit the segment");
    assert!((hit.t - 5.0).abs() < EPS);
    assert!((hit.u - 0.5).abs() < EPS);
    assert!(approx(hit.point, Vec2::new(5.0, 0.0)));
}

#[test]
fn intersection_rejects_parallel_segment() {
    let hit = ray_segment_intersection(
        Vec2::ZERO,
        Vec2::X,
        Vec2::new(1.0, 1.0),
        Vec2::new(5.0, 1.0),
    );
    assert!(hit.is_none());
}

#[test]
fn intersection_rejects_segment_behind_origin() {
    let hit = ray_segment_intersection(
        Vec2::ZERO,
        Vec2::X,
        Vec2::new(-5.0, -1.0),
        Vec2::new(-5.0, 1.0),
    );
    assert!(hit.is_none());
}

#[test]
fn intersection_rejects_hits_within_emission_epsilon() {
    // A segment closer than the t epsilon is treated as the surface the
    // beam just left.
    let near = ray_segment_intersection(
        Vec2::ZERO,
        Vec2::X,
        Vec2::new(RAY_T_EPSILON * 0.6, -1.0),
        Vec2::new(RAY_T_EPSILON * 0.6, 1.0),
    );
    assert!(near.is_none());

    let far = ray_segment_intersection(
        Vec2::ZERO,
        Vec2::X,
        Vec2::new(RAY_T_EPSILON * 1.2, -1.0),
        Vec2::new(RAY_T_EPSILON * 1.2, 1.0),
    );
    assert!(far.is_some());
}

#[test]
fn intersection_rejects_miss_outside_segment_extent() {
    let hit = ray_segment_intersection(
        Vec2::ZERO,
        Vec2::X,
        Vec2::new(5.0, 1.0),
        Vec2::new(5.0, 3.0),
    );
    assert!(hit.is_none());
}
