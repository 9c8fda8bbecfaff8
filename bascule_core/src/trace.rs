// Copyright 2026 the Bascule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the control.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! control calls as it processes taps, state changes, and frame ticks. All
//! method bodies default to no-ops, so implementing only the events you care
//! about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace`
//! feature is **off**, every `Tracer` method compiles to nothing (zero
//! overhead). When **on**, each method performs a single `Option` branch
//! before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`) — gates the per-layer restack event and
//!   the corresponding `TraceSink` method.

use kurbo::Size;

use crate::state::SwitchState;
use crate::time::HostTime;
use crate::timeline::{Transition, TransitionPhase};

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when the host reports a tap on the control.
#[derive(Clone, Copy, Debug)]
pub struct TapEvent {
    /// Host time the tap was delivered.
    pub at: HostTime,
}

/// Emitted on every state assignment, including redundant ones.
#[derive(Clone, Copy, Debug)]
pub struct StateChangeEvent {
    /// State before the assignment.
    pub from: SwitchState,
    /// State after the assignment (may equal `from`).
    pub to: SwitchState,
    /// Host time of the assignment.
    pub at: HostTime,
}

/// Emitted when a transition starts playing.
#[derive(Clone, Copy, Debug)]
pub struct TransitionBeginEvent {
    /// The transition that began.
    pub transition: Transition,
    /// Whether an in-flight transition was displaced to start this one.
    pub replaced: bool,
}

/// Emitted when a transition stops, either by running to completion or by
/// being displaced mid-flight.
#[derive(Clone, Copy, Debug)]
pub struct TransitionEndEvent {
    /// The transition that ended.
    pub transition: Transition,
    /// Host time it ended.
    pub at: HostTime,
    /// `true` if it was displaced before completing.
    pub cancelled: bool,
}

/// Marks the beginning of a transition phase.
#[derive(Clone, Copy, Debug)]
pub struct PhaseBeginEvent {
    /// Which phase is starting.
    pub phase: TransitionPhase,
    /// Host time at the start of the phase.
    pub at: HostTime,
}

/// Marks the end of a transition phase.
#[derive(Clone, Copy, Debug)]
pub struct PhaseEndEvent {
    /// Which phase is ending.
    pub phase: TransitionPhase,
    /// Host time at the end of the phase.
    pub at: HostTime,
}

/// Emitted when the host invalidates the control's layout.
#[derive(Clone, Copy, Debug)]
pub struct BoundsChangeEvent {
    /// The new bounds.
    pub bounds: Size,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the control.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when the host reports a tap.
    fn on_tap(&mut self, e: &TapEvent) {
        _ = e;
    }

    /// Called on every state assignment.
    fn on_state_change(&mut self, e: &StateChangeEvent) {
        _ = e;
    }

    /// Called when a transition starts.
    fn on_transition_begin(&mut self, e: &TransitionBeginEvent) {
        _ = e;
    }

    /// Called when a transition completes or is displaced.
    fn on_transition_end(&mut self, e: &TransitionEndEvent) {
        _ = e;
    }

    /// Called at the beginning of a transition phase.
    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        _ = e;
    }

    /// Called at the end of a transition phase.
    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        _ = e;
    }

    /// Called when the host invalidates the layout.
    fn on_bounds_change(&mut self, e: &BoundsChangeEvent) {
        _ = e;
    }

    /// Called with the raw slot indices of layers re-stacked at transition
    /// start (requires the `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_restacked(&mut self, layers: &[u32]) {
        _ = layers;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`TapEvent`].
    #[inline]
    pub fn tap(&mut self, e: &TapEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_tap(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`StateChangeEvent`].
    #[inline]
    pub fn state_change(&mut self, e: &StateChangeEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_state_change(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TransitionBeginEvent`].
    #[inline]
    pub fn transition_begin(&mut self, e: &TransitionBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_transition_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TransitionEndEvent`].
    #[inline]
    pub fn transition_end(&mut self, e: &TransitionEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_transition_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PhaseBeginEvent`].
    #[inline]
    pub fn phase_begin(&mut self, e: &PhaseBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_phase_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PhaseEndEvent`].
    #[inline]
    pub fn phase_end(&mut self, e: &PhaseEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_phase_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`BoundsChangeEvent`].
    #[inline]
    pub fn bounds_change(&mut self, e: &BoundsChangeEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_bounds_change(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits the re-stacked layer indices (requires the `trace-rich`
    /// feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn restacked(&mut self, layers: &[u32]) {
        if let Some(s) = &mut self.sink {
            s.on_restacked(layers);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
