//! Optics core for the prism-flow puzzle: scene model, geometry kernel,
//! shape resolver, ray tracer and win evaluation.
//!
//! Pure and platform-free: no I/O, no rendering, no global state. The host
//! frontend feeds discrete input events into [`Game`] between frames and
//! calls [`Game::advance_frame`] once per redraw.

pub mod constants;
pub mod game;
pub mod level;
pub mod math;
pub mod object;
pub mod scene;
pub mod segment;
pub mod trace;

pub use constants::*;
pub use game::{Game, GameMode};
pub use level::{builtin_levels, cell_center, FixedSpec, Level, LevelError, TargetSpec};
pub use object::{LightColor, ObjectKind, OpticalObject, ToolKind};
pub use scene::{snap_position, Inventory, ObjectId, Scene};
pub use segment::{resolve_segments, Segment, SurfaceKind};
pub use trace::{Beam, BeamSegment, FrameOutput, Tracer};
