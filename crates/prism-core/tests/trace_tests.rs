// Ray tracer tests: per-surface optical behavior, the nearest-hit
// tie-break, and the termination budget.

use glam::Vec2;
use prism_core::constants::{BEAM_MAX_DEPTH, PRISM_PASS_ATTENUATION};
use prism_core::level::cell_center;
use prism_core::object::{LightColor, ObjectKind};
use prism_core::scene::{Inventory, Scene};
use prism_core::trace::{FrameOutput, Tracer};

// 12 x 10 cells, matching the built-in level layouts.
const VIEWPORT: Vec2 = Vec2::new(480.0, 400.0);

fn trace(scene: &Scene) -> FrameOutput {
    let mut tracer = Tracer::new();
    let mut out = FrameOutput::new();
    tracer.trace(scene, VIEWPORT, &mut out);
    out
}

fn scene_with_source(cell: (i32, i32), angle: f32) -> Scene {
    Scene::new(cell_center(cell), angle, Inventory::sandbox())
}

fn dir_of(beam: &prism_core::trace::BeamSegment) -> Vec2 {
    (beam.to - beam.from).normalize_or_zero()
}

#[test]
fn mirror_reflects_head_on_beam_straight_back() {
    let mut scene = scene_with_source((1, 5), 0.0);
    // Upright mirror: face along Y, normal along +X, square to the beam.
    scene.add_fixed(ObjectKind::Mirror, cell_center((5, 5)), 0.0);

    let out = trace(&scene);
    assert!(out.beams.len() >= 2, "expected incoming and reflected beams");
    assert!((out.beams[0].to - cell_center((5, 5))).length() < 1e-3);
    assert!(
        (dir_of(&out.beams[1]) - Vec2::new(-1.0, 0.0)).length() < 1e-4,
        "normal incidence must negate the direction, got {:?}",
        dir_of(&out.beams[1])
    );
}

#[test]
fn tracer_follows_the_nearest_intersection() {
    let mut scene = scene_with_source((1, 5), 0.0);
    // Near and far mirrors on the same ray; only the near one may matter.
    scene.add_fixed(ObjectKind::Mirror, cell_center((4, 5)), 0.0);
    scene.add_fixed(ObjectKind::Mirror, cell_center((8, 5)), 0.0);

    let out = trace(&scene);
    assert_eq!(out.beams.len(), 2, "one bounce at the near mirror, then the wall");
    let near_x = cell_center((4, 5)).x;
    for beam in &out.beams {
        assert!(
            beam.from.x <= near_x + 0.5 && beam.to.x <= near_x + 0.5,
            "beam reached past the near mirror: {beam:?}"
        );
    }
}

#[test]
fn facing_mirrors_terminate_at_the_depth_budget() {
    // A beam bouncing between two facing mirrors would ping-pong forever
    // on intensity decay alone (0.95^n stays above the floor for longer
    // than the depth budget); the explicit depth counter must cut it off.
    let mut scene = scene_with_source((5, 5), 0.0);
    scene.add_fixed(ObjectKind::Mirror, cell_center((2, 5)), 0.0);
    scene.add_fixed(ObjectKind::Mirror, cell_center((8, 5)), 0.0);

    let out = trace(&scene);
    assert_eq!(
        out.beams.len(),
        (BEAM_MAX_DEPTH + 1) as usize,
        "one beam per depth level, root included"
    );
}

#[test]
fn prism_disperses_white_into_three_colored_children() {
    let mut scene = scene_with_source((1, 5), 0.0);
    scene.add_fixed(ObjectKind::Prism, cell_center((5, 5)), 0.0);

    let out = trace(&scene);
    assert_eq!(out.beams.len(), 4, "parent plus three dispersed children");

    let parent = &out.beams[0];
    assert_eq!(parent.color, LightColor::White);

    let children: Vec<_> = out.beams[1..].iter().collect();
    let mut colors: Vec<LightColor> = children.iter().map(|b| b.color).collect();
    colors.sort_by_key(|c| format!("{c:?}"));
    assert_eq!(
        colors,
        vec![LightColor::Blue, LightColor::Green, LightColor::Red]
    );

    for child in &children {
        assert!(
            child.intensity < parent.intensity,
            "dispersed child must be dimmer than its parent"
        );
    }
    // The three directions must all differ.
    for i in 0..children.len() {
        for j in (i + 1)..children.len() {
            assert!(
                (dir_of(children[i]) - dir_of(children[j])).length() > 1e-3,
                "children {i} and {j} share a direction"
            );
        }
    }
}

#[test]
fn colored_beam_passes_a_second_prism_without_resplitting() {
    let mut scene = scene_with_source((1, 5), 0.0);
    scene.add_fixed(ObjectKind::Prism, cell_center((5, 5)), 0.0);

    // Find the undeviated green child, then drop a second prism onto its
    // path, far enough out that the diverging red and blue children miss it.
    let first = trace(&scene);
    let green = first
        .beams
        .iter()
        .find(|b| b.color == LightColor::Green)
        .expect("dispersion produces a green child");
    scene.add_fixed(ObjectKind::Prism, green.from + dir_of(green) * 200.0, 0.0);

    let out = trace(&scene);
    assert_eq!(
        out.beams.len(),
        5,
        "white parent, three children, one pass-through grandchild"
    );
    assert_eq!(
        out.beams.iter().filter(|b| b.color == LightColor::Red).count(),
        1,
        "a colored beam through a prism must not re-disperse"
    );

    let greens: Vec<_> = out
        .beams
        .iter()
        .filter(|b| b.color == LightColor::Green)
        .collect();
    assert_eq!(greens.len(), 2, "the green child and its pass-through");
    let child = greens[0].intensity.max(greens[1].intensity);
    let grandchild = greens[0].intensity.min(greens[1].intensity);
    assert!(
        (grandchild - child * PRISM_PASS_ATTENUATION).abs() < 1e-5,
        "pass-through intensity {grandchild} is not {child} x pass factor"
    );
}

#[test]
fn splitter_chain_terminates_at_the_intensity_floor() {
    // Five splitters in a row halve the beam at each pass. The children
    // past the fifth would carry 0.5^5 ~ 0.031, under the intensity floor,
    // so tracing stops there long before the depth cap binds.
    let mut scene = scene_with_source((1, 5), 0.0);
    for col in 4..9 {
        scene.add_fixed(ObjectKind::Splitter, cell_center((col, 5)), 0.0);
    }

    let out = trace(&scene);
    let last_x = cell_center((8, 5)).x;
    let max_to = out.beams.iter().map(|b| b.to.x).fold(f32::MIN, f32::max);
    assert!(
        (max_to - last_x).abs() < 1e-3,
        "the chain must reach the fifth splitter, got {max_to}"
    );
    for beam in &out.beams {
        assert!(
            beam.from.x <= last_x + 0.5 && beam.to.x <= last_x + 0.5,
            "beam emitted past the fifth splitter: {beam:?}"
        );
    }
}

#[test]
fn splitter_children_conserve_the_parent_intensity() {
    for angle in [0.0_f32, 0.3, 0.7, 1.1] {
        let mut scene = scene_with_source((1, 5), 0.0);
        scene.add_fixed(ObjectKind::Splitter, cell_center((5, 5)), angle);

        let out = trace(&scene);
        assert_eq!(
            out.beams.len(),
            3,
            "parent, reflected and transmitted at angle {angle}"
        );
        let parent = out.beams[0].intensity;
        let sum: f32 = out.beams[1..].iter().map(|b| b.intensity).sum();
        assert!(
            (sum - parent).abs() < 1e-5,
            "intensity not conserved at angle {angle}: {sum} vs {parent}"
        );
    }
}

#[test]
fn splitter_transmits_one_child_straight_through() {
    let mut scene = scene_with_source((1, 5), 0.0);
    scene.add_fixed(ObjectKind::Splitter, cell_center((5, 5)), 0.0);

    let out = trace(&scene);
    let transmitted = out.beams[1..]
        .iter()
        .find(|b| (dir_of(b) - Vec2::X).length() < 1e-4)
        .expect("one child continues in the parent direction");
    assert!((transmitted.to.x - VIEWPORT.x).abs() < 1e-3, "runs to the far wall");
}

#[test]
fn blocker_absorbs_the_beam() {
    let mut scene = scene_with_source((1, 5), 0.0);
    scene.add_fixed(ObjectKind::Blocker, cell_center((5, 5)), 0.0);

    let out = trace(&scene);
    assert_eq!(out.beams.len(), 1, "no children past a blocker");
    assert!(out.beams[0].to.x < cell_center((5, 5)).x);
}

#[test]
fn walls_absorb_the_beam() {
    let scene = scene_with_source((1, 5), 0.0);
    let out = trace(&scene);
    assert_eq!(out.beams.len(), 1);
    assert!((out.beams[0].to.x - VIEWPORT.x).abs() < 1e-3);
}

#[test]
fn mismatched_target_terminates_but_does_not_light() {
    let mut scene = scene_with_source((1, 5), 0.0);
    let target = scene.add_target(cell_center((5, 5)), LightColor::Red);

    let out = trace(&scene);
    assert_eq!(out.beams.len(), 1, "beams stop at targets even on mismatch");
    assert!(!out.lit.contains(&target));
}

#[test]
fn white_target_accepts_the_white_source_beam() {
    let mut scene = scene_with_source((1, 5), 0.0);
    let target = scene.add_target(cell_center((5, 5)), LightColor::White);

    let out = trace(&scene);
    assert!(out.lit.contains(&target));
}

#[test]
fn color_matching_is_by_tag() {
    assert!(LightColor::White.accepts(LightColor::Red));
    assert!(LightColor::White.accepts(LightColor::White));
    assert!(LightColor::Red.accepts(LightColor::Red));
    assert!(!LightColor::Red.accepts(LightColor::White));
    assert!(!LightColor::Red.accepts(LightColor::Blue));
}

#[test]
fn unobstructed_beam_escapes_at_fixed_length() {
    // With a degenerate viewport there are no walls to stop the beam.
    let scene = scene_with_source((1, 5), 0.0);
    let mut tracer = Tracer::new();
    let mut out = FrameOutput::new();
    tracer.trace(&scene, Vec2::ZERO, &mut out);

    assert_eq!(out.beams.len(), 1);
    let len = (out.beams[0].to - out.beams[0].from).length();
    assert!(
        (len - prism_core::constants::ESCAPE_BEAM_LENGTH).abs() < 1e-2,
        "escaping beam drawn at fixed length, got {len}"
    );
}

#[test]
fn trace_output_is_rebuilt_every_frame() {
    let mut scene = scene_with_source((1, 5), 0.0);
    let target = scene.add_target(cell_center((5, 5)), LightColor::White);

    let mut tracer = Tracer::new();
    let mut out = FrameOutput::new();
    tracer.trace(&scene, VIEWPORT, &mut out);
    assert!(out.lit.contains(&target));

    // Block the beam; the previous frame's lit state must not linger.
    scene.add_fixed(ObjectKind::Blocker, cell_center((3, 5)), 0.0);
    tracer.trace(&scene, VIEWPORT, &mut out);
    assert!(!out.lit.contains(&target));
    assert_eq!(out.beams.len(), 1);
}
