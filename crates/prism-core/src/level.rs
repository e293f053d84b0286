//! Level definitions: static descriptions of a puzzle, validated at load
//! time and expanded into a fresh [`Scene`].
//!
//! Levels describe positions in grid cells; world positions are derived at
//! load so the rest of the core never sees cell coordinates.

use glam::Vec2;
use thiserror::Error;

use crate::constants::GRID_SIZE;
use crate::object::{LightColor, ObjectKind, ToolKind};
use crate::scene::{Inventory, Scene};

/// World-space center of a grid cell.
pub fn cell_center(cell: (i32, i32)) -> Vec2 {
    Vec2::new(
        cell.0 as f32 * GRID_SIZE + GRID_SIZE / 2.0,
        cell.1 as f32 * GRID_SIZE + GRID_SIZE / 2.0,
    )
}

/// One required target: where it sits and what color lights it.
#[derive(Clone, Copy, Debug)]
pub struct TargetSpec {
    pub cell: (i32, i32),
    pub color: LightColor,
}

/// Immovable level geometry placed before the player gets control.
#[derive(Clone, Copy, Debug)]
pub struct FixedSpec {
    pub tool: ToolKind,
    pub cell: (i32, i32),
    pub angle: f32,
}

/// A static puzzle definition. Read-only once loaded; selecting a level
/// rebuilds all mutable scene state from this.
#[derive(Clone, Debug)]
pub struct Level {
    pub name: &'static str,
    pub description: &'static str,
    pub source_cell: (i32, i32),
    pub source_angle: f32,
    pub targets: Vec<TargetSpec>,
    pub fixed: Vec<FixedSpec>,
    /// Cells filled with fixed blockers.
    pub blockers: Vec<(i32, i32)>,
    /// Blocker cells carved back out, leaving passages.
    pub blocker_gaps: Vec<(i32, i32)>,
    pub inventory: Inventory,
}

/// Structural problems in a level definition, rejected at load time rather
/// than allowed to produce undefined per-frame behavior.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("no such level: {0}")]
    UnknownLevel(usize),
    #[error("level has no targets")]
    NoTargets,
    #[error("duplicate target at cell ({0}, {1})")]
    DuplicateTarget(i32, i32),
    #[error("blocker gap at cell ({0}, {1}) matches no blocker")]
    OrphanBlockerGap(i32, i32),
}

impl Level {
    /// Fail-fast structural validation.
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.targets.is_empty() {
            return Err(LevelError::NoTargets);
        }
        for (i, t) in self.targets.iter().enumerate() {
            if self.targets[..i].iter().any(|o| o.cell == t.cell) {
                return Err(LevelError::DuplicateTarget(t.cell.0, t.cell.1));
            }
        }
        for gap in &self.blocker_gaps {
            if !self.blockers.contains(gap) {
                return Err(LevelError::OrphanBlockerGap(gap.0, gap.1));
            }
        }
        Ok(())
    }

    /// Expand this definition into a fresh scene: source, targets, blockers
    /// (minus gaps) and fixed geometry, with the level's tool inventory.
    pub fn build_scene(&self) -> Scene {
        let mut scene = Scene::new(
            cell_center(self.source_cell),
            self.source_angle,
            self.inventory,
        );
        for t in &self.targets {
            scene.add_target(cell_center(t.cell), t.color);
        }
        for cell in &self.blockers {
            if self.blocker_gaps.contains(cell) {
                continue;
            }
            scene.add_fixed(ObjectKind::Blocker, cell_center(*cell), 0.0);
        }
        for f in &self.fixed {
            scene.add_fixed(f.tool.into(), cell_center(f.cell), f.angle);
        }
        scene
    }
}

/// The built-in level set, in play order.
pub fn builtin_levels() -> Vec<Level> {
    use std::f32::consts::FRAC_PI_4;
    use LightColor::{Blue, Green, Red, White};

    let target = |cell, color| TargetSpec { cell, color };

    vec![
        Level {
            name: "Split Decision",
            description: "Use a splitter to hit both targets",
            source_cell: (2, 5),
            source_angle: 0.0,
            targets: vec![target((10, 5), White), target((10, 2), White)],
            fixed: vec![],
            blockers: vec![],
            blocker_gaps: vec![],
            inventory: Inventory::new(3, 0, 1, 0),
        },
        Level {
            name: "Rainbow",
            description: "Use a prism to split the light",
            source_cell: (1, 5),
            source_angle: 0.0,
            targets: vec![
                target((11, 4), Red),
                target((11, 5), Green),
                target((11, 6), Blue),
            ],
            fixed: vec![],
            blockers: vec![],
            blocker_gaps: vec![],
            inventory: Inventory::new(3, 1, 0, 0),
        },
        Level {
            name: "Maze of Light",
            description: "Navigate the beam through the blockers",
            source_cell: (1, 5),
            source_angle: 0.0,
            targets: vec![target((11, 5), White)],
            fixed: vec![],
            blockers: vec![
                (4, 3),
                (4, 4),
                (4, 5),
                (4, 6),
                (4, 7),
                (8, 3),
                (8, 4),
                (8, 5),
                (8, 6),
                (8, 7),
            ],
            blocker_gaps: vec![(4, 3), (8, 7)],
            inventory: Inventory::new(5, 0, 0, 0),
        },
        Level {
            name: "Prism Chain",
            description: "Chain prisms to route colored beams",
            source_cell: (1, 5),
            source_angle: 0.0,
            targets: vec![target((11, 4), Red), target((11, 6), Blue)],
            fixed: vec![],
            blockers: vec![],
            blocker_gaps: vec![],
            inventory: Inventory::new(4, 2, 0, 0),
        },
        Level {
            name: "Tight Squeeze",
            description: "Thread the beam through narrow gaps",
            source_cell: (1, 5),
            source_angle: 0.0,
            targets: vec![target((11, 2), White)],
            fixed: vec![],
            blockers: vec![
                (4, 1),
                (4, 2),
                (4, 3),
                (4, 5),
                (4, 6),
                (4, 7),
                (4, 8),
                (8, 1),
                (8, 3),
                (8, 4),
                (8, 5),
                (8, 6),
                (8, 7),
                (8, 8),
            ],
            blocker_gaps: vec![],
            inventory: Inventory::new(4, 0, 0, 0),
        },
        Level {
            name: "Color Mixer",
            description: "Route specific colors to their targets",
            source_cell: (1, 5),
            source_angle: 0.0,
            targets: vec![target((11, 3), Red), target((11, 7), Blue)],
            fixed: vec![],
            blockers: vec![(6, 5)],
            blocker_gaps: vec![],
            inventory: Inventory::new(5, 1, 1, 0),
        },
        Level {
            name: "Hall of Mirrors",
            description: "Bounce the beam through a mirror maze",
            source_cell: (1, 1),
            source_angle: 0.0,
            targets: vec![target((11, 8), White)],
            fixed: vec![FixedSpec {
                tool: ToolKind::Mirror,
                cell: (6, 1),
                angle: FRAC_PI_4,
            }],
            blockers: vec![(3, 4), (3, 5), (9, 3), (9, 4)],
            blocker_gaps: vec![],
            inventory: Inventory::new(4, 0, 0, 0),
        },
        Level {
            name: "Grand Finale",
            description: "Use everything you've learned",
            source_cell: (1, 5),
            source_angle: 0.0,
            targets: vec![
                target((11, 2), Red),
                target((11, 5), Green),
                target((11, 8), Blue),
            ],
            fixed: vec![FixedSpec {
                tool: ToolKind::Blocker,
                cell: (5, 5),
                angle: 0.0,
            }],
            blockers: vec![(8, 3), (8, 4), (8, 6), (8, 7)],
            blocker_gaps: vec![],
            inventory: Inventory::new(5, 2, 2, 0),
        },
    ]
}
