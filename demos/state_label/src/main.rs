// Copyright 2026 the Bascule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host screen demo: a text label wired to the switch.
//!
//! Builds a 60×30 switch, registers an observer that rewrites a shared
//! "ON"/"OFF" label, then drives a simulated 60 Hz frame loop that taps the
//! control twice. Trace events are pretty-printed to stdout, and each frame's
//! [`StackChanges`] are folded into a summary printed at the end — the same
//! wiring a real presenter would use, minus the pixels.

use std::cell::RefCell;
use std::rc::Rc;

use bascule_core::layer::StackChanges;
use bascule_core::observer::ObserverId;
use bascule_core::state::SwitchState;
use bascule_core::switch::{Switch, SwitchConfig};
use bascule_core::time::{HostTime, Timebase};
use bascule_core::trace::Tracer;

use bascule_debug::pretty::PrettyPrintSink;

const FRAME_COUNT: u64 = 180;
/// 16.6ms refresh interval in nanoseconds (≈60 Hz).
const REFRESH_INTERVAL_NS: u64 = 16_666_667;
/// Frames on which the simulated user taps the control.
const TAP_FRAMES: [u64; 2] = [30, 90];

/// The "screen": a text label mirroring the switch state.
struct StateLabel {
    text: Rc<RefCell<String>>,
}

impl StateLabel {
    /// Creates the label, reading the switch's current state for the
    /// initial display.
    fn new(switch: &Switch) -> Self {
        Self {
            text: Rc::new(RefCell::new(state_text(switch.state()).to_owned())),
        }
    }

    /// Registers the label as a toggle observer; every notification
    /// rewrites the text from the reported state.
    fn attach(&self, switch: &mut Switch) -> ObserverId {
        let text = Rc::clone(&self.text);
        switch.observe(Box::new(move |state| {
            *text.borrow_mut() = state_text(state).to_owned();
        }))
    }

    fn text(&self) -> String {
        self.text.borrow().clone()
    }
}

fn state_text(state: SwitchState) -> &'static str {
    match state {
        SwitchState::On => "ON",
        SwitchState::Off => "OFF",
    }
}

fn main() {
    let timebase = Timebase::NANOS;

    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()), timebase);

    let start = HostTime(1_000_000_000);
    let mut switch = {
        let mut tracer = Tracer::new(&mut pretty);
        Switch::new(SwitchConfig::default(), start, &mut tracer)
    };

    let label = StateLabel::new(&switch);
    let _observer = label.attach(&mut switch);
    println!("label: {}", label.text());

    // -- simulated loop ----------------------------------------------------
    let mut changes = StackChanges::default();
    let mut shape_updates = 0_usize;
    let mut fill_updates = 0_usize;
    let mut restacks = 0_usize;

    for frame_index in 0..FRAME_COUNT {
        let now = HostTime(start.ticks() + frame_index * REFRESH_INTERVAL_NS);
        let mut tracer = Tracer::new(&mut pretty);

        if TAP_FRAMES.contains(&frame_index) {
            switch.tap(now, &mut tracer);
        }

        switch.tick_into(now, &mut changes, &mut tracer);
        drop(tracer);

        shape_updates += changes.shapes.len();
        fill_updates += changes.fills.len();
        restacks += changes.restacked.len();

        if TAP_FRAMES.contains(&frame_index) {
            println!("label: {}", label.text());
        }
    }

    println!(
        "{FRAME_COUNT} frames: {shape_updates} shape updates, \
         {fill_updates} fill updates, {restacks} restacks"
    );
    println!("final label: {}", label.text());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (Switch, StateLabel) {
        let mut switch = Switch::new(SwitchConfig::default(), HostTime(0), &mut Tracer::none());
        let label = StateLabel::new(&switch);
        label.attach(&mut switch);
        (switch, label)
    }

    #[test]
    fn label_reads_off_on_load() {
        let (_, label) = fixture();
        assert_eq!(label.text(), "OFF");
    }

    #[test]
    fn label_follows_taps() {
        let (mut switch, label) = fixture();
        let mut tracer = Tracer::none();

        switch.tap(HostTime(1), &mut tracer);
        assert_eq!(switch.state(), SwitchState::On);
        assert_eq!(label.text(), "ON");

        switch.tap(HostTime(2), &mut tracer);
        assert_eq!(switch.state(), SwitchState::Off);
        assert_eq!(label.text(), "OFF");
    }

    #[test]
    fn detached_label_stops_following() {
        let mut switch = Switch::new(SwitchConfig::default(), HostTime(0), &mut Tracer::none());
        let label = StateLabel::new(&switch);
        let observer = label.attach(&mut switch);

        switch.tap(HostTime(1), &mut Tracer::none());
        assert_eq!(label.text(), "ON");

        assert!(switch.unobserve(observer));
        switch.tap(HostTime(2), &mut Tracer::none());
        assert_eq!(label.text(), "ON", "stale label keeps its last text");
        assert_eq!(switch.state(), SwitchState::Off);
    }
}
