//! Optical object types: the tagged kinds a scene is built from.

use glam::Vec2;

/// Discrete color tag carried by beams and required by targets.
///
/// Color equality is always by tag; there is no approximate RGB matching
/// anywhere in the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LightColor {
    /// The unsplit source beam.
    White,
    Red,
    Green,
    Blue,
}

impl LightColor {
    /// Whether a target requiring `self` accepts a beam of color `beam`.
    ///
    /// A white target accepts any beam; colored targets require an exact
    /// tag match.
    pub fn accepts(self, beam: LightColor) -> bool {
        self == LightColor::White || self == beam
    }
}

/// Placeable tool kinds, as offered by a level's inventory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Mirror,
    Prism,
    Splitter,
    Blocker,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [
        ToolKind::Mirror,
        ToolKind::Prism,
        ToolKind::Splitter,
        ToolKind::Blocker,
    ];
}

/// Every kind of element a scene can hold.
///
/// The shape resolver and ray tracer match exhaustively on this, so adding
/// a new optical element is a compile-time-checked exercise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ObjectKind {
    /// Single-point beam emitter; rotation is the emission angle.
    Source,
    Mirror,
    Prism,
    Splitter,
    Blocker,
    /// Circular receiver that lights up when hit by a matching color.
    Target(LightColor),
}

impl ObjectKind {
    /// The tool this object returns to the inventory when removed, if any.
    pub fn tool(self) -> Option<ToolKind> {
        match self {
            ObjectKind::Mirror => Some(ToolKind::Mirror),
            ObjectKind::Prism => Some(ToolKind::Prism),
            ObjectKind::Splitter => Some(ToolKind::Splitter),
            ObjectKind::Blocker => Some(ToolKind::Blocker),
            ObjectKind::Source | ObjectKind::Target(_) => None,
        }
    }
}

impl From<ToolKind> for ObjectKind {
    fn from(tool: ToolKind) -> Self {
        match tool {
            ToolKind::Mirror => ObjectKind::Mirror,
            ToolKind::Prism => ObjectKind::Prism,
            ToolKind::Splitter => ObjectKind::Splitter,
            ToolKind::Blocker => ObjectKind::Blocker,
        }
    }
}

/// One element of the scene: kind, snapped center position, rotation.
///
/// `fixed` objects are level geometry; the player can neither move nor
/// remove them. Rotation is ignored for `Source` emission geometry aside
/// from the beam angle, and for the circular `Target`.
#[derive(Clone, Copy, Debug)]
pub struct OpticalObject {
    pub kind: ObjectKind,
    pub position: Vec2,
    pub rotation: f32,
    pub fixed: bool,
}

impl OpticalObject {
    pub fn new(kind: ObjectKind, position: Vec2, rotation: f32) -> Self {
        Self {
            kind,
            position,
            rotation,
            fixed: false,
        }
    }

    pub fn fixed(kind: ObjectKind, position: Vec2, rotation: f32) -> Self {
        Self {
            kind,
            position,
            rotation,
            fixed: true,
        }
    }
}
