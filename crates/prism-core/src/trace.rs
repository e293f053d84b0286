//! Ray tracer: casts the source beam through the scene once per frame,
//! fanning out at prisms and splitters via an explicit work queue.
//!
//! The queue formulation is behaviorally identical to a recursive trace but
//! keeps the depth/intensity budget enforceable as a plain loop condition,
//! with no stack-depth concerns under adversarial mirror arrangements.

use fnv::FnvHashSet;
use glam::Vec2;

use crate::constants::{
    BEAM_MAX_DEPTH, DISPERSION_OFFSETS, ESCAPE_BEAM_LENGTH, MIN_INTENSITY, MIRROR_ATTENUATION,
    PRISM_PASS_ATTENUATION, PRISM_SPLIT_ATTENUATION, SPLITTER_ATTENUATION,
};
use crate::math::{ray_segment_intersection, reflect, rotate, RayHit};
use crate::object::LightColor;
use crate::scene::{ObjectId, Scene};
use crate::segment::{Segment, SurfaceKind};

/// A pending ray: one unit of tracing work.
#[derive(Clone, Copy, Debug)]
pub struct Beam {
    pub origin: Vec2,
    pub dir: Vec2,
    pub color: LightColor,
    pub depth: u32,
    pub intensity: f32,
}

/// One visible beam span, handed to the host renderer.
#[derive(Clone, Copy, Debug)]
pub struct BeamSegment {
    pub from: Vec2,
    pub to: Vec2,
    pub color: LightColor,
    pub intensity: f32,
}

/// Everything one trace pass produces: the draw list and the set of targets
/// hit by a matching color. Recomputed from scratch every frame.
#[derive(Debug, Default)]
pub struct FrameOutput {
    pub beams: Vec<BeamSegment>,
    pub lit: FnvHashSet<ObjectId>,
}

impl FrameOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.beams.clear();
        self.lit.clear();
    }
}

/// The tracer itself; holds scratch buffers reused across frames.
#[derive(Debug, Default)]
pub struct Tracer {
    segments: Vec<Segment>,
    queue: Vec<Beam>,
}

impl Tracer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trace one full frame: resolve every object's segments plus the four
    /// boundary walls of `viewport`, then follow the source beam and all of
    /// its children until the depth/intensity budget runs out.
    pub fn trace(&mut self, scene: &Scene, viewport: Vec2, out: &mut FrameOutput) {
        out.clear();
        let Some(source) = scene.source() else {
            return;
        };

        self.segments.clear();
        scene.collect_segments(&mut self.segments);
        push_walls(&mut self.segments, viewport);

        self.queue.clear();
        self.queue.push(Beam {
            origin: source.position,
            dir: rotate(Vec2::X, source.rotation),
            color: LightColor::White,
            depth: 0,
            intensity: 1.0,
        });

        while let Some(beam) = self.queue.pop() {
            // Both budget checks are load-bearing for termination; do not
            // rely on intensity decay alone.
            if beam.depth > BEAM_MAX_DEPTH || beam.intensity < MIN_INTENSITY {
                continue;
            }

            let hit = nearest_hit(&self.segments, beam.origin, beam.dir);

            let end = match &hit {
                Some((h, _)) => h.point,
                // Nothing in the way: draw a long escaping beam.
                None => beam.origin + beam.dir * ESCAPE_BEAM_LENGTH,
            };
            out.beams.push(BeamSegment {
                from: beam.origin,
                to: end,
                color: beam.color,
                intensity: beam.intensity,
            });

            let Some((hit, seg)) = hit else {
                continue;
            };
            self.scatter(beam, hit.point, seg, out);
        }
    }

    /// Spawn child beams for a hit, according to the surface kind.
    fn scatter(&mut self, beam: Beam, point: Vec2, seg: Segment, out: &mut FrameOutput) {
        let child = |dir: Vec2, color: LightColor, intensity: f32| Beam {
            origin: point,
            dir: dir.normalize_or_zero(),
            color,
            depth: beam.depth + 1,
            intensity,
        };

        match seg.surface {
            SurfaceKind::Mirror => {
                let reflected = reflect(beam.dir, seg.normal);
                self.queue.push(child(
                    reflected,
                    beam.color,
                    beam.intensity * MIRROR_ATTENUATION,
                ));
            }

            SurfaceKind::Prism => {
                // Toy refraction model: mirror the direction about the
                // reversed normal, so the beam continues into the glass.
                let through = reflect(beam.dir, -seg.normal);
                if beam.color == LightColor::White {
                    // Chromatic dispersion: three colored children fanned
                    // around the through direction.
                    let colors = [LightColor::Red, LightColor::Green, LightColor::Blue];
                    for (offset, color) in DISPERSION_OFFSETS.iter().zip(colors) {
                        self.queue.push(child(
                            rotate(through, *offset),
                            color,
                            beam.intensity * PRISM_SPLIT_ATTENUATION,
                        ));
                    }
                } else {
                    // Already a single color: pass through without splitting.
                    self.queue.push(child(
                        through,
                        beam.color,
                        beam.intensity * PRISM_PASS_ATTENUATION,
                    ));
                }
            }

            SurfaceKind::Splitter => {
                let reflected = reflect(beam.dir, seg.normal);
                let half = beam.intensity * SPLITTER_ATTENUATION;
                self.queue.push(child(reflected, beam.color, half));
                self.queue.push(child(beam.dir, beam.color, half));
            }

            SurfaceKind::Target(required) => {
                if required.accepts(beam.color) {
                    if let Some(id) = seg.owner {
                        out.lit.insert(id);
                    }
                }
                // Matching or not, the beam ends here; targets never let
                // light continue through to objects behind them.
            }

            // Absorbing surfaces: the beam terminates.
            SurfaceKind::Blocker | SurfaceKind::Wall => {}
        }
    }
}

/// Minimum-positive-t hit over all segments; the tie-break rule callers of
/// the geometry kernel must enforce.
fn nearest_hit(segments: &[Segment], origin: Vec2, dir: Vec2) -> Option<(RayHit, Segment)> {
    let mut best: Option<(RayHit, Segment)> = None;
    for seg in segments {
        if let Some(hit) = ray_segment_intersection(origin, dir, seg.p1, seg.p2) {
            if best.as_ref().map_or(true, |(b, _)| hit.t < b.t) {
                best = Some((hit, *seg));
            }
        }
    }
    best
}

/// Four absorbing wall segments along the viewport edges, normals inward.
fn push_walls(segments: &mut Vec<Segment>, viewport: Vec2) {
    let (w, h) = (viewport.x, viewport.y);
    segments.push(Segment::wall(
        Vec2::new(0.0, 0.0),
        Vec2::new(w, 0.0),
        Vec2::new(0.0, 1.0),
    ));
    segments.push(Segment::wall(
        Vec2::new(w, 0.0),
        Vec2::new(w, h),
        Vec2::new(-1.0, 0.0),
    ));
    segments.push(Segment::wall(
        Vec2::new(0.0, h),
        Vec2::new(w, h),
        Vec2::new(0.0, -1.0),
    ));
    segments.push(Segment::wall(
        Vec2::new(0.0, 0.0),
        Vec2::new(0.0, h),
        Vec2::new(1.0, 0.0),
    ));
}
