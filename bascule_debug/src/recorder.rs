// Copyright 2026 the Bascule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] keeps every event it receives in a `Vec`, preserving
//! arrival order. Tests assert against the recorded sequence directly, and
//! [`chrome::export`](crate::chrome::export) consumes it for trace files.
//! The control emits a handful of events per toggle, so there is no need
//! for a compact encoding.

use bascule_core::trace::{
    BoundsChangeEvent, PhaseBeginEvent, PhaseEndEvent, StateChangeEvent, TapEvent, TraceSink,
    TransitionBeginEvent, TransitionEndEvent,
};

/// A recorded trace event.
#[derive(Clone, Copy, Debug)]
pub enum RecordedEvent {
    /// A tap was delivered.
    Tap(TapEvent),
    /// The state was assigned.
    StateChange(StateChangeEvent),
    /// A transition started.
    TransitionBegin(TransitionBeginEvent),
    /// A transition completed or was displaced.
    TransitionEnd(TransitionEndEvent),
    /// A phase started.
    PhaseBegin(PhaseBeginEvent),
    /// A phase ended.
    PhaseEnd(PhaseEndEvent),
    /// The layout was invalidated.
    BoundsChange(BoundsChangeEvent),
    /// Layers were re-stacked at transition start (raw slot indices).
    Restacked(u32, u32),
}

/// A [`TraceSink`] that appends every event to an in-memory log.
#[derive(Clone, Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events in arrival order.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder, returning the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }
}

impl TraceSink for RecorderSink {
    fn on_tap(&mut self, e: &TapEvent) {
        self.events.push(RecordedEvent::Tap(*e));
    }

    fn on_state_change(&mut self, e: &StateChangeEvent) {
        self.events.push(RecordedEvent::StateChange(*e));
    }

    fn on_transition_begin(&mut self, e: &TransitionBeginEvent) {
        self.events.push(RecordedEvent::TransitionBegin(*e));
    }

    fn on_transition_end(&mut self, e: &TransitionEndEvent) {
        self.events.push(RecordedEvent::TransitionEnd(*e));
    }

    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        self.events.push(RecordedEvent::PhaseBegin(*e));
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        self.events.push(RecordedEvent::PhaseEnd(*e));
    }

    fn on_bounds_change(&mut self, e: &BoundsChangeEvent) {
        self.events.push(RecordedEvent::BoundsChange(*e));
    }

    fn on_restacked(&mut self, layers: &[u32]) {
        if let [wipe, settle] = layers {
            self.events.push(RecordedEvent::Restacked(*wipe, *settle));
        }
    }
}
