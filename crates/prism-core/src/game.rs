//! Game session: level selection, per-frame tracing, and the win evaluator.

use fnv::FnvHashSet;
use glam::Vec2;
use log::info;

use crate::level::{builtin_levels, Level, LevelError};
use crate::object::ToolKind;
use crate::scene::{Inventory, ObjectId, Scene};
use crate::trace::{BeamSegment, FrameOutput, Tracer};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    /// Playing a level with targets and a win condition.
    Puzzle,
    /// Free play: unlimited tools, no targets, no win.
    Sandbox,
}

/// The whole in-process game state the host UI talks to.
///
/// Input events (place, drag, rotate, remove) mutate the scene between
/// frames; [`Game::advance_frame`] runs one trace pass and re-evaluates the
/// win condition from scratch, so lit state never goes stale.
pub struct Game {
    levels: Vec<Level>,
    mode: GameMode,
    current_level: Option<usize>,
    completed: FnvHashSet<usize>,
    complete: bool,
    scene: Scene,
    tracer: Tracer,
    output: FrameOutput,
}

impl Game {
    /// A game over the built-in level set, starting in sandbox mode.
    pub fn new() -> Self {
        Self::with_levels(builtin_levels())
    }

    /// A game over a custom level set.
    pub fn with_levels(levels: Vec<Level>) -> Self {
        let mut game = Self {
            levels,
            mode: GameMode::Sandbox,
            current_level: None,
            completed: FnvHashSet::default(),
            complete: false,
            scene: Scene::new(Vec2::ZERO, 0.0, Inventory::sandbox()),
            tracer: Tracer::new(),
            output: FrameOutput::new(),
        };
        game.load_sandbox();
        game
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn current_level(&self) -> Option<usize> {
        self.current_level
    }

    pub fn is_level_completed(&self, index: usize) -> bool {
        self.completed.contains(&index)
    }

    /// Validate and load a level, discarding all mutable scene state.
    pub fn load_level(&mut self, index: usize) -> Result<(), LevelError> {
        let level = self
            .levels
            .get(index)
            .ok_or(LevelError::UnknownLevel(index))?;
        level.validate()?;
        info!("loading level {index}: {}", level.name);
        self.scene = level.build_scene();
        self.mode = GameMode::Puzzle;
        self.current_level = Some(index);
        self.complete = false;
        self.output.clear();
        Ok(())
    }

    /// Enter sandbox mode: one source, no targets, unlimited tools.
    pub fn load_sandbox(&mut self) {
        info!("entering sandbox");
        self.scene = Scene::new(
            crate::level::cell_center((2, 5)),
            0.0,
            Inventory::sandbox(),
        );
        self.mode = GameMode::Sandbox;
        self.current_level = None;
        self.complete = false;
        self.output.clear();
    }

    /// Run one trace pass over the current scene.
    ///
    /// Returns `true` exactly once per level: on the frame in which every
    /// target is simultaneously lit for the first time. Later frames with
    /// the same winning configuration return `false` (completion is
    /// idempotent).
    pub fn advance_frame(&mut self, viewport: Vec2) -> bool {
        self.tracer.trace(&self.scene, viewport, &mut self.output);

        if self.mode != GameMode::Puzzle || self.scene.targets().is_empty() {
            return false;
        }
        let all_lit = self
            .scene
            .targets()
            .iter()
            .all(|id| self.output.lit.contains(id));
        if all_lit && !self.complete {
            self.complete = true;
            if let Some(index) = self.current_level {
                self.completed.insert(index);
                info!("level {index} complete");
            }
            return true;
        }
        false
    }

    /// Beam spans produced by the last frame, for the host renderer.
    pub fn beams(&self) -> &[BeamSegment] {
        &self.output.beams
    }

    /// Whether the level-order `index`-th target was lit last frame.
    pub fn is_target_lit(&self, index: usize) -> bool {
        self.scene
            .targets()
            .get(index)
            .is_some_and(|id| self.output.lit.contains(id))
    }

    /// Level-order indices of the targets lit last frame.
    pub fn lit_target_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.scene
            .targets()
            .iter()
            .enumerate()
            .filter(|(_, id)| self.output.lit.contains(id))
            .map(|(i, _)| i)
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    // Input events from the host UI. All are rejected once the level is
    // complete, matching the original's frozen board under the win overlay.

    pub fn place_tool(&mut self, tool: ToolKind, at: Vec2) -> Option<ObjectId> {
        if self.complete {
            return None;
        }
        self.scene.place(tool, at)
    }

    pub fn move_object(&mut self, id: ObjectId, to: Vec2) -> bool {
        !self.complete && self.scene.move_to(id, to)
    }

    pub fn rotate_object(&mut self, id: ObjectId, delta: f32) -> bool {
        !self.complete && self.scene.rotate(id, delta)
    }

    pub fn remove_object(&mut self, id: ObjectId) -> bool {
        !self.complete && self.scene.remove(id)
    }

    pub fn object_at(&self, point: Vec2) -> Option<ObjectId> {
        self.scene.object_at(point)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
