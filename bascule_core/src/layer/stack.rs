// Copyright 2026 the Bascule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat z-ordered layer storage with allocation and property management.

use alloc::vec::Vec;

use kurbo::RoundedRect;
use understory_dirty::{CycleHandling, DirtyTracker};

use super::id::{INVALID, LayerId};
use super::shape::{Fill, LayerShape};
use crate::dirty;

/// Z-ordered storage for the control's shape layers.
///
/// Layers are addressed by [`LayerId`] handles. Each layer occupies a slot in
/// parallel arrays; destroyed layers are recycled via a free list, and
/// generation counters prevent stale handle access. The z order is a separate
/// bottom-to-top list of slots — a layer can exist while detached from it,
/// and re-inserting an attached layer *moves* it (the behavior of the
/// compositor trees this control is presented into).
///
/// A single stack-level clip mask constrains all rendering; it is a property
/// of the stack rather than of a slot.
#[derive(Debug)]
pub struct LayerStack {
    // -- Per-slot properties --
    shape: Vec<LayerShape>,
    fill: Vec<Fill>,

    // -- Z order (bottom to top, raw slot indices) --
    order: Vec<u32>,
    order_dirty: bool,

    // -- Stack-level clip mask --
    mask: Option<RoundedRect>,
    mask_dirty: bool,

    // -- Allocation --
    generation: Vec<u32>,
    free_list: Vec<u32>,
    len: u32,

    // -- Dirty tracking --
    dirty: DirtyTracker<u32>,

    // -- Lifecycle tracking --
    pending_added: Vec<u32>,
    pending_removed: Vec<u32>,
}

/// The set of changes produced by a single [`LayerStack::evaluate`] call.
///
/// Each list contains the raw slot indices of layers that changed in the
/// corresponding category; presenters read current values back through the
/// `*_at()` accessors without paying for generation checks.
#[derive(Clone, Debug, Default)]
pub struct StackChanges {
    /// Layers whose shape path changed.
    pub shapes: Vec<u32>,
    /// Layers whose fill changed.
    pub fills: Vec<u32>,
    /// Layers inserted into or moved within the z order.
    pub restacked: Vec<u32>,
    /// Layers created since the last evaluate.
    pub added: Vec<u32>,
    /// Layers destroyed since the last evaluate.
    pub removed: Vec<u32>,
    /// Whether the z order changed at all.
    pub order_changed: bool,
    /// Whether the stack-level clip mask changed.
    pub mask_changed: bool,
}

impl StackChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.fills.clear();
        self.restacked.clear();
        self.added.clear();
        self.removed.clear();
        self.order_changed = false;
        self.mask_changed = false;
    }

    /// Returns `true` if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
            && self.fills.is_empty()
            && self.restacked.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
            && !self.order_changed
            && !self.mask_changed
    }
}

impl Default for LayerStack {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shape: Vec::new(),
            fill: Vec::new(),
            order: Vec::new(),
            order_dirty: false,
            mask: None,
            mask_dirty: false,
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
        }
    }

    // -- Allocation API --

    /// Creates a new layer with the given shape and fill and returns its
    /// handle.
    ///
    /// The layer starts detached from the z order; attach it with
    /// [`insert_at`](Self::insert_at) or [`push_top`](Self::push_top).
    pub fn create_layer(&mut self, shape: LayerShape, fill: Fill) -> LayerId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            self.generation[idx as usize] += 1;
            self.shape[idx as usize] = shape;
            self.fill[idx as usize] = fill;
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.shape.push(shape);
            self.fill.push(fill);
            self.generation.push(0);
            idx
        };

        self.pending_added.push(idx);
        self.dirty.mark(idx, dirty::SHAPE);
        self.dirty.mark(idx, dirty::FILL);

        LayerId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Destroys a layer, detaching it from the z order and freeing its slot
    /// for reuse.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy_layer(&mut self, id: LayerId) {
        self.validate(id);
        let idx = id.idx;

        if let Some(z) = self.position_of(idx) {
            self.order.remove(z);
            self.order_dirty = true;
        }

        self.dirty.remove_key(idx);

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;

        self.free_list.push(idx);
        self.pending_removed.push(idx);
    }

    /// Returns whether the given handle refers to a live layer.
    #[must_use]
    pub fn is_alive(&self, id: LayerId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    // -- Z-order API --

    /// Inserts `id` into the z order at position `z` (0 is the bottom),
    /// clamped to the current depth.
    ///
    /// If the layer is already attached it is **moved** to the new position,
    /// not duplicated.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn insert_at(&mut self, id: LayerId, z: usize) {
        self.validate(id);
        let idx = id.idx;

        if let Some(current) = self.position_of(idx) {
            self.order.remove(current);
        }
        let z = z.min(self.order.len());
        self.order.insert(z, idx);

        self.order_dirty = true;
        self.dirty.mark(idx, dirty::STACKING);
    }

    /// Inserts `id` at the top of the z order, moving it if already attached.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn push_top(&mut self, id: LayerId) {
        let top = self.order.len();
        self.insert_at(id, top);
    }

    /// Returns the z position of a layer, or `None` if it is detached.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn z_of(&self, id: LayerId) -> Option<usize> {
        self.validate(id);
        self.position_of(id.idx)
    }

    /// Returns the current z order as raw slot indices, bottom to top.
    #[must_use]
    pub fn order(&self) -> &[u32] {
        &self.order
    }

    /// Returns the number of layers currently attached to the z order.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.order.len()
    }

    // -- Property getters (read-only, no dirty marking) --

    /// Returns the shape of a layer.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn shape(&self, id: LayerId) -> LayerShape {
        self.validate(id);
        self.shape[id.idx as usize]
    }

    /// Returns the fill of a layer.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn fill(&self, id: LayerId) -> Fill {
        self.validate(id);
        self.fill[id.idx as usize]
    }

    /// Returns the stack-level clip mask, if any.
    #[must_use]
    pub fn mask(&self) -> Option<RoundedRect> {
        self.mask
    }

    // -- Mutation API (auto-marks dirty) --

    /// Sets the shape of a layer.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_shape(&mut self, id: LayerId, shape: LayerShape) {
        self.validate(id);
        self.shape[id.idx as usize] = shape;
        self.dirty.mark(id.idx, dirty::SHAPE);
    }

    /// Sets the fill of a layer.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_fill(&mut self, id: LayerId, fill: Fill) {
        self.validate(id);
        self.fill[id.idx as usize] = fill;
        self.dirty.mark(id.idx, dirty::FILL);
    }

    /// Sets the stack-level clip mask.
    pub fn set_mask(&mut self, mask: Option<RoundedRect>) {
        self.mask = mask;
        self.mask_dirty = true;
    }

    // -- Raw-index accessors for presenters --
    //
    // These accept raw slot indices (as found in `StackChanges` or
    // `order()`) rather than `LayerId` handles, skipping generation
    // validation.

    /// Returns the shape at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn shape_at(&self, idx: u32) -> LayerShape {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.shape[idx as usize]
    }

    /// Returns the fill at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn fill_at(&self, idx: u32) -> Fill {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.fill[idx as usize]
    }

    // -- Evaluation --

    /// Evaluates the stack, draining all dirty channels and returning the
    /// set of changes.
    pub fn evaluate(&mut self) -> StackChanges {
        let mut changes = StackChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided
    /// buffer to avoid allocation.
    pub fn evaluate_into(&mut self, changes: &mut StackChanges) {
        changes.clear();

        changes.order_changed = self.order_dirty;
        self.order_dirty = false;

        changes.mask_changed = self.mask_dirty;
        self.mask_dirty = false;

        changes.shapes = self
            .dirty
            .drain(dirty::SHAPE)
            .deterministic()
            .run()
            .collect();
        changes.fills = self
            .dirty
            .drain(dirty::FILL)
            .deterministic()
            .run()
            .collect();
        changes.restacked = self
            .dirty
            .drain(dirty::STACKING)
            .deterministic()
            .run()
            .collect();

        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    fn validate(&self, id: LayerId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale LayerId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                INVALID
            }
        );
    }

    /// Position of `idx` in the z order, if attached.
    fn position_of(&self, idx: u32) -> Option<usize> {
        self.order.iter().position(|&i| i == idx)
    }
}
