// Copyright 2026 the Bascule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core state, geometry, and transition timeline for the bascule toggle
//! switch.
//!
//! `bascule_core` models an animated two-state switch control the way a
//! compositing engine models a scene: a small z-ordered stack of shape
//! layers, a pill-shaped clip mask, and an explicit transition timeline
//! sampled with host time. The crate never draws — each frame, a host
//! advances the control and receives an incremental change report describing
//! what a presenter must re-apply. It is `no_std` compatible (with `alloc`).
//!
//! # Architecture
//!
//! The control turns input events into incremental layer updates:
//!
//! ```text
//!   tap / set_state ──► Timeline::begin() ─┐
//!                                          │
//!   Switch::tick(now) ──► Timeline::sample(now) ──► LayerStack mutations
//!                                                        │
//!                          StackChanges ◄── LayerStack::evaluate()
//!                                │
//!                                ▼
//!                        host presenter
//! ```
//!
//! **[`state`]** — The two-value [`SwitchState`](state::SwitchState)
//! enumeration.
//!
//! **[`geometry`]** — Pure functions from the control's bounds to its pill
//! silhouette, disc centers, radii, and animation pivots.
//!
//! **[`layer`]** — Flat z-ordered shape-layer stack with generational
//! handles. Mutations mark dirty channels; evaluation drains them into a
//! [`StackChanges`](layer::StackChanges) report.
//!
//! **[`dirty`]** — Dirty-tracking channel constants via `understory_dirty`.
//!
//! **[`timeline`]** — The wipe/settle transition state machine, sampled with
//! [`HostTime`](time::HostTime). Progress is queryable and the timeline is
//! cancellable, rather than fire-and-forget.
//!
//! **[`easing`]** — The ease-out curve and keyframe interpolation used by
//! both transition phases.
//!
//! **[`observer`]** — Ordered toggle-observer registry with independently
//! removable handles.
//!
//! **[`switch`]** — The control itself, wiring the above together.
//!
//! **[`time`]** — Monotonic host time, durations, and the rational
//! ticks-to-nanoseconds timebase.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! control instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-layer
//!   restack events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod dirty;
pub mod easing;
pub mod geometry;
pub mod layer;
pub mod observer;
pub mod state;
pub mod switch;
pub mod time;
pub mod timeline;
pub mod trace;
