// Copyright 2026 the Bascule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer stack data model.
//!
//! The control renders as a small flat stack of shape layers:
//!
//! - An identity ([`LayerId`]) — a generational handle that becomes stale
//!   when the layer is destroyed, preventing use-after-free bugs at the API
//!   level.
//! - A z position in the stack's bottom-to-top order. Re-inserting an
//!   attached layer moves it rather than duplicating it.
//! - **Properties** set by the caller: [`shape`](LayerStack::set_shape) and
//!   [`fill`](LayerStack::set_fill), plus a single stack-level clip
//!   [`mask`](LayerStack::set_mask).
//!
//! # Dirty tracking
//!
//! Property mutations automatically mark the corresponding dirty channel
//! (see [`dirty`](crate::dirty)): **SHAPE** and **FILL** for per-layer
//! properties, **STACKING** for z-order movement. All channels are
//! local-only; the stack has no inherited properties. Each
//! [`evaluate`](LayerStack::evaluate) call drains the channels into a
//! [`StackChanges`] report that presenters consume to apply incremental
//! updates.

mod id;
mod shape;
mod stack;

pub use id::LayerId;
pub use shape::{Fill, LayerShape};
pub use stack::{LayerStack, StackChanges};
