// Copyright 2026 the Bascule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable one-line-per-event output.

use std::fmt;
use std::io::Write;

use bascule_core::time::{HostTime, Timebase};
use bascule_core::trace::{
    BoundsChangeEvent, PhaseBeginEvent, PhaseEndEvent, StateChangeEvent, TapEvent, TraceSink,
    TransitionBeginEvent, TransitionEndEvent,
};

/// A [`TraceSink`] that writes one formatted line per event.
///
/// Timestamps are converted to seconds through the provided [`Timebase`].
/// Write errors are swallowed — diagnostics must never take the control
/// down with them.
pub struct PrettyPrintSink {
    out: Box<dyn Write>,
    timebase: Timebase,
}

impl fmt::Debug for PrettyPrintSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("timebase", &self.timebase)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink writing to `out`, converting timestamps with
    /// `timebase`.
    #[must_use]
    pub fn new(out: Box<dyn Write>, timebase: Timebase) -> Self {
        Self { out, timebase }
    }

    fn seconds(&self, t: HostTime) -> f64 {
        self.timebase.ticks_to_nanos(t.ticks()) as f64 / 1e9
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        let _ = writeln!(self.out, "{args}");
    }
}

impl TraceSink for PrettyPrintSink {
    fn on_tap(&mut self, e: &TapEvent) {
        let s = self.seconds(e.at);
        self.line(format_args!("[{s:9.4}] tap"));
    }

    fn on_state_change(&mut self, e: &StateChangeEvent) {
        let s = self.seconds(e.at);
        self.line(format_args!("[{s:9.4}] state {:?} -> {:?}", e.from, e.to));
    }

    fn on_transition_begin(&mut self, e: &TransitionBeginEvent) {
        let s = self.seconds(e.transition.begun_at);
        let note = if e.replaced { " (restart)" } else { "" };
        self.line(format_args!(
            "[{s:9.4}] transition {:?} -> {:?} begins{note}",
            e.transition.from, e.transition.to
        ));
    }

    fn on_transition_end(&mut self, e: &TransitionEndEvent) {
        let s = self.seconds(e.at);
        let outcome = if e.cancelled { "cancelled" } else { "completed" };
        self.line(format_args!(
            "[{s:9.4}] transition -> {:?} {outcome}",
            e.transition.to
        ));
    }

    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        let s = self.seconds(e.at);
        self.line(format_args!("[{s:9.4}]   {:?} phase begins", e.phase));
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        let s = self.seconds(e.at);
        self.line(format_args!("[{s:9.4}]   {:?} phase ends", e.phase));
    }

    fn on_bounds_change(&mut self, e: &BoundsChangeEvent) {
        self.line(format_args!(
            "[   layout] bounds {} x {}",
            e.bounds.width, e.bounds.height
        ));
    }

    fn on_restacked(&mut self, layers: &[u32]) {
        self.line(format_args!("[   layers] restacked {layers:?}"));
    }
}
