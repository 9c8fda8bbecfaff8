// Copyright 2026 the Bascule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and Chrome trace export for bascule
//! diagnostics.
//!
//! This crate provides [`TraceSink`](bascule_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`] — human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`] — in-memory event recording for tests and
//!   exporters.
//! - [`chrome::export`] — writes Chrome Trace Event Format JSON from
//!   recorded events.

pub mod chrome;
pub mod pretty;
pub mod recorder;
