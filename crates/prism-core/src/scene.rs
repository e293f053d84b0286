//! Scene model: the object arena, tool inventory, and the discrete input
//! operations the host UI drives between frames.

use glam::Vec2;
use log::debug;

use crate::constants::{DEFAULT_MIRROR_ANGLE, PICK_RADIUS, SANDBOX_TOOL_COUNT};
use crate::math::snap;
use crate::object::{LightColor, ObjectKind, OpticalObject, ToolKind};
use crate::segment::{resolve_segments, Segment};

/// Generation-counted handle to a scene object.
///
/// Removing an object bumps its slot's generation, so a stale id held by a
/// delayed UI event is rejected instead of silently addressing whatever
/// object reused the slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectId {
    index: u32,
    generation: u32,
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    object: Option<OpticalObject>,
}

/// Counts of placeable tools remaining in the player's toolbox.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    pub mirrors: u32,
    pub prisms: u32,
    pub splitters: u32,
    pub blockers: u32,
}

impl Inventory {
    pub fn new(mirrors: u32, prisms: u32, splitters: u32, blockers: u32) -> Self {
        Self {
            mirrors,
            prisms,
            splitters,
            blockers,
        }
    }

    /// Effectively unlimited stock for sandbox mode.
    pub fn sandbox() -> Self {
        Self::new(
            SANDBOX_TOOL_COUNT,
            SANDBOX_TOOL_COUNT,
            SANDBOX_TOOL_COUNT,
            SANDBOX_TOOL_COUNT,
        )
    }

    pub fn count(&self, tool: ToolKind) -> u32 {
        match tool {
            ToolKind::Mirror => self.mirrors,
            ToolKind::Prism => self.prisms,
            ToolKind::Splitter => self.splitters,
            ToolKind::Blocker => self.blockers,
        }
    }

    fn slot_mut(&mut self, tool: ToolKind) -> &mut u32 {
        match tool {
            ToolKind::Mirror => &mut self.mirrors,
            ToolKind::Prism => &mut self.prisms,
            ToolKind::Splitter => &mut self.splitters,
            ToolKind::Blocker => &mut self.blockers,
        }
    }

    /// Consume one unit, or report that the tool is out of stock.
    pub fn take(&mut self, tool: ToolKind) -> bool {
        let slot = self.slot_mut(tool);
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    /// Return one unit to the toolbox.
    pub fn give(&mut self, tool: ToolKind) {
        *self.slot_mut(tool) += 1;
    }
}

/// Snap an arbitrary point to the nearest half-cell placement center.
pub fn snap_position(p: Vec2) -> Vec2 {
    Vec2::new(snap(p.x), snap(p.y))
}

/// The mutable scene: light source, targets, fixed geometry, and the tools
/// the player has placed. Owned by the single UI thread; mutated only by
/// the discrete event methods below.
#[derive(Clone, Debug)]
pub struct Scene {
    slots: Vec<Slot>,
    source: ObjectId,
    targets: Vec<ObjectId>,
    inventory: Inventory,
}

impl Scene {
    /// Create a scene holding just a light source and an inventory.
    pub fn new(source_position: Vec2, source_angle: f32, inventory: Inventory) -> Self {
        let mut scene = Self {
            slots: Vec::new(),
            source: ObjectId {
                index: 0,
                generation: 0,
            },
            targets: Vec::new(),
            inventory,
        };
        scene.source = scene.insert(OpticalObject::fixed(
            ObjectKind::Source,
            source_position,
            source_angle,
        ));
        scene
    }

    fn insert(&mut self, object: OpticalObject) -> ObjectId {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.object.is_none() {
                slot.object = Some(object);
                return ObjectId {
                    index: index as u32,
                    generation: slot.generation,
                };
            }
        }
        self.slots.push(Slot {
            generation: 0,
            object: Some(object),
        });
        ObjectId {
            index: (self.slots.len() - 1) as u32,
            generation: 0,
        }
    }

    /// Add a target at `position`; targets keep their insertion order so
    /// hosts can report lit targets by stable index.
    pub fn add_target(&mut self, position: Vec2, color: LightColor) -> ObjectId {
        let id = self.insert(OpticalObject::fixed(
            ObjectKind::Target(color),
            position,
            0.0,
        ));
        self.targets.push(id);
        id
    }

    /// Add immovable level geometry (fixed mirrors, blockers, ...).
    pub fn add_fixed(&mut self, kind: ObjectKind, position: Vec2, rotation: f32) -> ObjectId {
        self.insert(OpticalObject::fixed(kind, position, rotation))
    }

    pub fn get(&self, id: ObjectId) -> Option<&OpticalObject> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.object.as_ref()
    }

    fn get_mut(&mut self, id: ObjectId) -> Option<&mut OpticalObject> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.object.as_mut()
    }

    pub fn source(&self) -> Option<&OpticalObject> {
        self.get(self.source)
    }

    /// Target ids in level order.
    pub fn targets(&self) -> &[ObjectId] {
        &self.targets
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Live objects with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &OpticalObject)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.object.as_ref().map(|obj| {
                (
                    ObjectId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    obj,
                )
            })
        })
    }

    /// Place a tool from the inventory at (the snapped version of) `at`.
    ///
    /// Consumes one unit of stock; returns `None` when the tool is out of
    /// stock. Mirrors start at the default diagonal angle, everything else
    /// axis-aligned.
    pub fn place(&mut self, tool: ToolKind, at: Vec2) -> Option<ObjectId> {
        if !self.inventory.take(tool) {
            return None;
        }
        let rotation = match tool {
            ToolKind::Mirror => DEFAULT_MIRROR_ANGLE,
            _ => 0.0,
        };
        let position = snap_position(at);
        let id = self.insert(OpticalObject::new(tool.into(), position, rotation));
        debug!("placed {tool:?} at ({}, {})", position.x, position.y);
        Some(id)
    }

    /// Drag-move a placed object to (the snapped version of) `to`.
    /// Rejected for fixed objects and stale ids.
    pub fn move_to(&mut self, id: ObjectId, to: Vec2) -> bool {
        match self.get_mut(id) {
            Some(obj) if !obj.fixed => {
                obj.position = snap_position(to);
                true
            }
            _ => false,
        }
    }

    /// Rotate a placed object by `delta` radians.
    pub fn rotate(&mut self, id: ObjectId, delta: f32) -> bool {
        match self.get_mut(id) {
            Some(obj) if !obj.fixed => {
                obj.rotation += delta;
                true
            }
            _ => false,
        }
    }

    /// Remove a placed tool, returning its unit to the inventory.
    ///
    /// Fixed geometry, sources, targets, and stale ids are rejected. The
    /// slot's generation is bumped so the removed id cannot address a later
    /// occupant.
    pub fn remove(&mut self, id: ObjectId) -> bool {
        let Some(obj) = self.get(id) else {
            return false;
        };
        if obj.fixed {
            return false;
        }
        let Some(tool) = obj.kind.tool() else {
            return false;
        };
        self.inventory.give(tool);
        let slot = &mut self.slots[id.index as usize];
        slot.object = None;
        slot.generation += 1;
        debug!("removed {tool:?}, returned to inventory");
        true
    }

    /// The nearest player-placed object within pick radius of `point`.
    pub fn object_at(&self, point: Vec2) -> Option<ObjectId> {
        let mut best: Option<(ObjectId, f32)> = None;
        for (id, obj) in self.iter() {
            if obj.fixed {
                continue;
            }
            let dist = obj.position.distance(point);
            if dist < PICK_RADIUS && best.map_or(true, |(_, d)| dist < d) {
                best = Some((id, dist));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Resolve every live object into the frame's segment list, stamping
    /// owner handles as we go.
    pub fn collect_segments(&self, out: &mut Vec<Segment>) {
        for (id, obj) in self.iter() {
            for mut seg in resolve_segments(obj) {
                seg.owner = Some(id);
                out.push(seg);
            }
        }
    }
}
