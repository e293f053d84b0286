//! Geometry kernel: small pure helpers over `glam::Vec2` plus the
//! ray-segment intersection everything else is built on.

use glam::Vec2;

use crate::constants::{PARALLEL_EPSILON, RAY_T_EPSILON, SNAP_SIZE};

/// Rotate `v` counter-clockwise by `angle` radians.
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (s, c) = angle.sin_cos();
    Vec2::new(v.x * c - v.y * s, v.x * s + v.y * c)
}

/// Reflect direction `d` about unit normal `n`: `d - 2(d.n)n`.
pub fn reflect(d: Vec2, n: Vec2) -> Vec2 {
    d - 2.0 * d.dot(n) * n
}

/// Round a scalar to the nearest half-cell grid line.
pub fn snap(value: f32) -> f32 {
    (value / SNAP_SIZE).round() * SNAP_SIZE
}

/// Result of a ray-segment intersection test.
///
/// `t` is the ray parameter (distance along a unit direction), `u` the
/// segment parameter in `[0, 1]`, `point` the intersection itself.
#[derive(Clone, Copy, Debug)]
pub struct RayHit {
    pub t: f32,
    pub point: Vec2,
    pub u: f32,
}

/// Intersect the half-line `origin + t * dir` (t > 0) with the closed
/// segment `p1..p2`.
///
/// Returns `None` when the two are parallel, when the intersection lies
/// behind the origin (within a small positive epsilon on `t`, so a beam
/// leaving a surface never immediately re-hits it), or when it falls outside
/// the segment. Nearest-hit selection among several candidates is the
/// caller's job.
pub fn ray_segment_intersection(origin: Vec2, dir: Vec2, p1: Vec2, p2: Vec2) -> Option<RayHit> {
    let d = p2 - p1;
    let det = dir.x * d.y - dir.y * d.x;
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }
    let dx = p1.x - origin.x;
    let dy = p1.y - origin.y;
    let t = (dx * d.y - dy * d.x) / det;
    let u = (dx * dir.y - dy * dir.x) / det;
    if t > RAY_T_EPSILON && (0.0..=1.0).contains(&u) {
        Some(RayHit {
            t,
            point: origin + dir * t,
            u,
        })
    } else {
        None
    }
}
