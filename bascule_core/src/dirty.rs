// Copyright 2026 the Bascule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! The layer stack uses multi-channel dirty tracking (via
//! [`understory_dirty`]) so a presenter only re-applies what actually
//! changed. Each channel is an independent category of change; all of them
//! are local-only, since the stack is flat — there are no inherited
//! properties and therefore no propagation policies or dependency edges.
//!
//! Callers never query dirty state directly. Each
//! [`LayerStack::evaluate`](crate::layer::LayerStack::evaluate) call drains
//! every channel and surfaces the results as
//! [`StackChanges`](crate::layer::StackChanges).

use understory_dirty::Channel;

/// A layer's shape path changed (disc radius or center, pill bounds).
pub const SHAPE: Channel = Channel::new(0);

/// A layer's fill changed.
pub const FILL: Channel = Channel::new(1);

/// A layer was inserted, removed, or moved in the z order.
pub const STACKING: Channel = Channel::new(2);
