use std::f32::consts::PI;

// Shared tuning constants for the optics simulation. Lengths are in world
// units (pixels on the host canvas), angles in radians.

// Board grid
pub const GRID_SIZE: f32 = 40.0; // one grid cell
pub const SNAP_SIZE: f32 = GRID_SIZE / 2.0; // placement snaps to half cells
pub const ROTATION_STEP: f32 = PI / 12.0; // 15 degrees per rotate event
pub const DEFAULT_MIRROR_ANGLE: f32 = PI / 4.0; // freshly placed mirrors start diagonal

// Object shapes (local-space templates, see segment.rs)
pub const MIRROR_HALF_LEN: f32 = GRID_SIZE * 0.45;
pub const PRISM_SIZE: f32 = GRID_SIZE * 0.45; // circumradius of the triangle
pub const BLOCKER_HALF_EXTENT: f32 = GRID_SIZE * 0.4;
pub const TARGET_RADIUS: f32 = GRID_SIZE * 0.3;
pub const TARGET_EDGE_COUNT: usize = 8; // polygon approximation of the circle

// Beam budget. Both bounds must hold for tracing to continue; together they
// guarantee termination even for a closed ring of mirrors.
pub const BEAM_MAX_DEPTH: u32 = 20;
pub const MIN_INTENSITY: f32 = 0.05;
pub const ESCAPE_BEAM_LENGTH: f32 = 2000.0; // drawn length of a beam that hits nothing

// Per-surface attenuation
pub const MIRROR_ATTENUATION: f32 = 0.95;
pub const PRISM_SPLIT_ATTENUATION: f32 = 0.7; // each dispersed child
pub const PRISM_PASS_ATTENUATION: f32 = 0.85; // already-colored beam through a prism
pub const SPLITTER_ATTENUATION: f32 = 0.5; // each of the two children

// Chromatic dispersion: angular offsets of the red/green/blue children
// relative to the through direction.
pub const DISPERSION_OFFSETS: [f32; 3] = [-0.15, 0.0, 0.15];

// Intersection numerics. The t epsilon is deliberately generous (half a
// pixel) so a child beam never re-hits the surface it just left.
pub const RAY_T_EPSILON: f32 = 0.5;
pub const PARALLEL_EPSILON: f32 = 1e-8;

// Interaction
pub const PICK_RADIUS: f32 = GRID_SIZE * 0.7; // hit-test radius for selecting placed objects
pub const SANDBOX_TOOL_COUNT: u32 = 99; // "unlimited" inventory in sandbox mode
