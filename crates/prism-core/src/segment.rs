//! Object shape resolver: converts a typed optical object into the line
//! segments the ray tracer intersects against.
//!
//! Segments are ephemeral frame data; the scene rebuilds them from the
//! current object list every trace pass.

use glam::Vec2;
use smallvec::SmallVec;

use crate::constants::{
    BLOCKER_HALF_EXTENT, MIRROR_HALF_LEN, PRISM_SIZE, TARGET_EDGE_COUNT, TARGET_RADIUS,
};
use crate::math::rotate;
use crate::object::{LightColor, ObjectKind, OpticalObject};
use crate::scene::ObjectId;

/// Optical behavior of one surface, as seen by the ray tracer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceKind {
    Mirror,
    Prism,
    Splitter,
    Blocker,
    Target(LightColor),
    /// Absorbing scene boundary; synthesized by the tracer, never by an object.
    Wall,
}

/// A line segment with an outward unit normal, derived from an optical
/// object for one frame.
#[derive(Clone, Copy, Debug)]
pub struct Segment {
    pub p1: Vec2,
    pub p2: Vec2,
    pub normal: Vec2,
    pub surface: SurfaceKind,
    /// Owning scene object; `None` for boundary walls. Stamped by the scene
    /// when assembling the frame list.
    pub owner: Option<ObjectId>,
}

impl Segment {
    pub fn wall(p1: Vec2, p2: Vec2, normal: Vec2) -> Self {
        Segment {
            p1,
            p2,
            normal,
            surface: SurfaceKind::Wall,
            owner: None,
        }
    }

    pub fn midpoint(&self) -> Vec2 {
        (self.p1 + self.p2) * 0.5
    }
}

/// An object resolves to at most `TARGET_EDGE_COUNT` segments.
pub type SegmentList = SmallVec<[Segment; TARGET_EDGE_COUNT]>;

/// Resolve an object's local-space template, rotated by its rotation and
/// translated to its position, into world-space segments.
///
/// Pure and deterministic. Normals face away from the shape's interior;
/// reflection correctness depends on this and it is covered by tests.
pub fn resolve_segments(obj: &OpticalObject) -> SegmentList {
    let mut out = SegmentList::new();
    let center = obj.position;
    let angle = obj.rotation;

    match obj.kind {
        // The source emits but has no surface of its own.
        ObjectKind::Source => {}

        ObjectKind::Mirror => {
            out.push(line_through(
                center,
                angle,
                MIRROR_HALF_LEN,
                SurfaceKind::Mirror,
            ));
        }

        // Geometrically identical to a mirror; the tracer treats it differently.
        ObjectKind::Splitter => {
            out.push(line_through(
                center,
                angle,
                MIRROR_HALF_LEN,
                SurfaceKind::Splitter,
            ));
        }

        ObjectKind::Prism => {
            // Equilateral triangle, apex up in local space.
            let verts = [
                Vec2::new(0.0, -PRISM_SIZE),
                Vec2::new(PRISM_SIZE * 0.866, PRISM_SIZE * 0.5),
                Vec2::new(-PRISM_SIZE * 0.866, PRISM_SIZE * 0.5),
            ]
            .map(|v| center + rotate(v, angle));
            let normals = [
                Vec2::new(0.866, -0.5),
                Vec2::new(0.0, 1.0),
                Vec2::new(-0.866, -0.5),
            ];
            for i in 0..3 {
                out.push(Segment {
                    p1: verts[i],
                    p2: verts[(i + 1) % 3],
                    normal: rotate(normals[i], angle).normalize_or_zero(),
                    surface: SurfaceKind::Prism,
                    owner: None,
                });
            }
        }

        ObjectKind::Blocker => {
            let h = BLOCKER_HALF_EXTENT;
            let corners = [
                Vec2::new(-h, -h),
                Vec2::new(h, -h),
                Vec2::new(h, h),
                Vec2::new(-h, h),
            ]
            .map(|v| center + rotate(v, angle));
            let normals = [
                Vec2::new(0.0, -1.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(0.0, 1.0),
                Vec2::new(-1.0, 0.0),
            ];
            for i in 0..4 {
                out.push(Segment {
                    p1: corners[i],
                    p2: corners[(i + 1) % 4],
                    normal: rotate(normals[i], angle).normalize_or_zero(),
                    surface: SurfaceKind::Blocker,
                    owner: None,
                });
            }
        }

        ObjectKind::Target(color) => {
            // Regular polygon standing in for a circle; each edge carries
            // the required color so the tracer can test the match locally.
            let step = std::f32::consts::TAU / TARGET_EDGE_COUNT as f32;
            for i in 0..TARGET_EDGE_COUNT {
                let a1 = i as f32 * step;
                let a2 = (i + 1) as f32 * step;
                let mid = (a1 + a2) * 0.5;
                out.push(Segment {
                    p1: center + Vec2::new(a1.cos(), a1.sin()) * TARGET_RADIUS,
                    p2: center + Vec2::new(a2.cos(), a2.sin()) * TARGET_RADIUS,
                    normal: Vec2::new(mid.cos(), mid.sin()),
                    surface: SurfaceKind::Target(color),
                    owner: None,
                });
            }
        }
    }

    out
}

fn line_through(center: Vec2, angle: f32, half_len: f32, surface: SurfaceKind) -> Segment {
    let along = rotate(Vec2::Y, angle);
    Segment {
        p1: center + along * half_len,
        p2: center - along * half_len,
        normal: rotate(Vec2::X, angle),
        surface,
        owner: None,
    }
}
