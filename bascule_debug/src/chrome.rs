// Copyright 2026 the Bascule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] writes recorded events as [Chrome Trace Event Format][spec]
//! JSON, suitable for loading into `chrome://tracing` or
//! [Perfetto](https://ui.perfetto.dev/). Transition phases become B/E span
//! pairs; taps, state changes, and transition boundaries become instant
//! events. Timestamps are converted to microseconds using the provided
//! [`Timebase`].
//!
//! Layout and restack records carry no timestamp and are not exported.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use bascule_core::time::Timebase;

use crate::recorder::RecordedEvent;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn export(
    recorded: &[RecordedEvent],
    timebase: Timebase,
    writer: &mut dyn Write,
) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for event in recorded {
        match event {
            RecordedEvent::Tap(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Tap",
                    "cat": "Input",
                    "ts": ticks_to_us(e.at.ticks(), timebase),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                }));
            }
            RecordedEvent::StateChange(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "StateChange",
                    "cat": "Control",
                    "ts": ticks_to_us(e.at.ticks(), timebase),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "from": format!("{:?}", e.from),
                        "to": format!("{:?}", e.to),
                    }
                }));
            }
            RecordedEvent::TransitionBegin(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "TransitionBegin",
                    "cat": "Transition",
                    "ts": ticks_to_us(e.transition.begun_at.ticks(), timebase),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "from": format!("{:?}", e.transition.from),
                        "to": format!("{:?}", e.transition.to),
                        "replaced": e.replaced,
                    }
                }));
            }
            RecordedEvent::TransitionEnd(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "TransitionEnd",
                    "cat": "Transition",
                    "ts": ticks_to_us(e.at.ticks(), timebase),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "to": format!("{:?}", e.transition.to),
                        "cancelled": e.cancelled,
                    }
                }));
            }
            RecordedEvent::PhaseBegin(e) => {
                events.push(json!({
                    "ph": "B",
                    "name": format!("{:?}", e.phase),
                    "cat": "Transition",
                    "ts": ticks_to_us(e.at.ticks(), timebase),
                    "pid": 0,
                    "tid": 0,
                }));
            }
            RecordedEvent::PhaseEnd(e) => {
                events.push(json!({
                    "ph": "E",
                    "name": format!("{:?}", e.phase),
                    "cat": "Transition",
                    "ts": ticks_to_us(e.at.ticks(), timebase),
                    "pid": 0,
                    "tid": 0,
                }));
            }
            RecordedEvent::BoundsChange(_) | RecordedEvent::Restacked(..) => {}
        }
    }

    serde_json::to_writer(writer, &Value::Array(events)).map_err(io::Error::other)
}

/// Converts host ticks to whole microseconds.
fn ticks_to_us(ticks: u64, timebase: Timebase) -> u64 {
    timebase.ticks_to_nanos(ticks) / 1_000
}

#[cfg(test)]
mod tests {
    use bascule_core::switch::{Switch, SwitchConfig};
    use bascule_core::time::HostTime;
    use bascule_core::trace::Tracer;

    use crate::recorder::RecorderSink;

    use super::*;

    #[test]
    fn export_produces_paired_phase_spans() {
        let mut recorder = RecorderSink::new();

        let mut tracer = Tracer::new(&mut recorder);
        // Construct through the tracer so the initial phase span is
        // recorded and every end has a matching begin.
        let mut switch = Switch::new(SwitchConfig::default(), HostTime(0), &mut tracer);
        switch.tap(HostTime(1_000_000), &mut tracer);
        let _ = switch.tick(HostTime(400_000_000), &mut tracer);
        let _ = switch.tick(HostTime(800_000_000), &mut tracer);
        drop(tracer);

        let mut out = Vec::new();
        export(recorder.events(), Timebase::NANOS, &mut out).unwrap();

        let parsed: Value = serde_json::from_slice(&out).unwrap();
        let array = parsed.as_array().expect("top level is an array");
        assert!(!array.is_empty());

        let count = |ph: &str| {
            array
                .iter()
                .filter(|e| e.get("ph").and_then(Value::as_str) == Some(ph))
                .count()
        };
        assert_eq!(count("B"), count("E"), "phase spans must pair up");
        assert!(
            array
                .iter()
                .any(|e| e.get("name").and_then(Value::as_str) == Some("StateChange"))
        );
    }

    #[test]
    fn timestamps_are_microseconds() {
        let mut recorder = RecorderSink::new();
        let mut switch = Switch::new(SwitchConfig::default(), HostTime(0), &mut Tracer::none());
        let mut tracer = Tracer::new(&mut recorder);
        switch.tap(HostTime(2_000_000_000), &mut tracer);
        drop(tracer);

        let mut out = Vec::new();
        export(recorder.events(), Timebase::NANOS, &mut out).unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();

        let tap_ts = parsed
            .as_array()
            .unwrap()
            .iter()
            .find(|e| e.get("name").and_then(Value::as_str) == Some("Tap"))
            .and_then(|e| e.get("ts"))
            .and_then(Value::as_u64);
        assert_eq!(tap_ts, Some(2_000_000), "2s in microseconds");
    }
}
