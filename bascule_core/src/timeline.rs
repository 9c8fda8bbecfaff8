// Copyright 2026 the Bascule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The wipe/settle transition state machine.
//!
//! The control this one descends from handed two chained one-shot
//! animations to a compositor and forgot about them. Here the transition is
//! explicit data instead:
//!
//! ```text
//! Idle ──begin()──► Wipe ──(Δ ≥ phase)──► Settle ──(Δ ≥ 2·phase)──► retired
//! ```
//!
//! A [`Timeline`] holds at most one [`Transition`]. Sampling with a
//! [`HostTime`] is pure — it returns the exact disc circles for that
//! instant without advancing anything — so hosts can sample at whatever
//! cadence their frame source provides, and tests can probe arbitrary
//! instants. Progress is queryable and [`cancel`](Timeline::cancel) drops a
//! transition mid-flight.
//!
//! Beginning a transition while one is in flight replaces it (cancel and
//! restart): the old run's partial radii are simply overdrawn once the new
//! samples land.
//!
//! Both phases run [`Easing::EaseOut`] over the same fixed phase length and
//! hold their final values after completing; nothing auto-reverts.

use kurbo::Circle;

use crate::easing::{Easing, sample_keyframes};
use crate::geometry::SwitchMetrics;
use crate::state::SwitchState;
use crate::time::{Duration, HostTime, Timebase};

/// Length of each transition phase, in nanoseconds (300 ms).
pub const PHASE_NANOS: u64 = 300_000_000;

/// Overshoot factor for the settle bounce's middle keyframe.
pub const SETTLE_OVERSHOOT: f64 = 1.2;

/// Which phase of a transition is playing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionPhase {
    /// The departing disc grows from the wipe pivot to cover the control.
    Wipe,
    /// The arriving disc bounces into its resting position.
    Settle,
}

/// A single in-flight state transition.
///
/// Behavior is keyed entirely on [`to`](Self::to) — a transition to the
/// current state (no idempotence guard upstream) plays exactly like any
/// other. `from` is carried for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Transition {
    /// State before the assignment that started this transition.
    pub from: SwitchState,
    /// State being transitioned to.
    pub to: SwitchState,
    /// Host time the transition began.
    pub begun_at: HostTime,
}

impl Transition {
    /// The state whose disc plays the wipe: the one being departed.
    #[inline]
    #[must_use]
    pub const fn departing(self) -> SwitchState {
        self.to.flipped()
    }

    /// The state whose disc plays the settle bounce: the one arriving.
    #[inline]
    #[must_use]
    pub const fn arriving(self) -> SwitchState {
        self.to
    }
}

/// A snapshot of the transition at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineSample {
    /// The transition this sample belongs to.
    pub transition: Transition,
    /// The phase playing at the sampled instant (`Settle` once finished,
    /// since settle values are held).
    pub phase: TransitionPhase,
    /// Overall progress across both phases, `0.0..=1.0`.
    pub progress: f64,
    /// The departing disc: grows from the wipe pivot, held at the terminal
    /// radius after the wipe completes.
    pub wipe_disc: Circle,
    /// The arriving disc: zero radius until the settle phase begins, held
    /// at the resting radius after it completes.
    pub settle_disc: Circle,
    /// Whether both phases have completed.
    pub finished: bool,
}

/// Holds and samples the control's single in-flight transition.
#[derive(Debug)]
pub struct Timeline {
    phase_length: Duration,
    easing: Easing,
    active: Option<Transition>,
}

impl Timeline {
    /// Creates an idle timeline whose phase length is [`PHASE_NANOS`]
    /// expressed in the host's tick units.
    #[must_use]
    pub fn new(timebase: Timebase) -> Self {
        Self {
            phase_length: Duration::from_nanos(PHASE_NANOS, timebase),
            easing: Easing::EaseOut,
            active: None,
        }
    }

    /// Starts a transition, replacing any in-flight one.
    ///
    /// Returns the transition that was displaced, if any.
    pub fn begin(&mut self, from: SwitchState, to: SwitchState, at: HostTime) -> Option<Transition> {
        self.active.replace(Transition {
            from,
            to,
            begun_at: at,
        })
    }

    /// Drops the in-flight transition without completing it.
    pub fn cancel(&mut self) -> Option<Transition> {
        self.active.take()
    }

    /// Returns the in-flight transition, if any.
    #[must_use]
    pub fn active(&self) -> Option<Transition> {
        self.active
    }

    /// Returns `true` when no transition is in flight.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    /// Length of one phase in host ticks.
    #[must_use]
    pub fn phase_length(&self) -> Duration {
        self.phase_length
    }

    /// The phase playing at `now`, or `None` when idle.
    ///
    /// Past the end of the settle phase this still reports
    /// [`Settle`](TransitionPhase::Settle), because settle values are held;
    /// use [`is_finished`](Self::is_finished) to detect completion.
    #[must_use]
    pub fn phase_at(&self, now: HostTime) -> Option<TransitionPhase> {
        let transition = self.active?;
        let elapsed = now.saturating_duration_since(transition.begun_at);
        if elapsed < self.phase_length {
            Some(TransitionPhase::Wipe)
        } else {
            Some(TransitionPhase::Settle)
        }
    }

    /// Overall progress across both phases at `now`, or `None` when idle.
    #[must_use]
    pub fn progress(&self, now: HostTime) -> Option<f64> {
        let transition = self.active?;
        let elapsed = now.saturating_duration_since(transition.begun_at);
        let total = self.phase_length + self.phase_length;
        Some(fraction(elapsed, total))
    }

    /// Returns `true` when a transition is in flight and both phases have
    /// completed at `now`.
    #[must_use]
    pub fn is_finished(&self, now: HostTime) -> bool {
        match self.active {
            Some(transition) => {
                let elapsed = now.saturating_duration_since(transition.begun_at);
                elapsed >= self.phase_length + self.phase_length
            }
            None => false,
        }
    }

    /// Samples the transition at `now` against the given metrics.
    ///
    /// Returns `None` when idle. Sampling does not advance or retire the
    /// timeline; callers retire it (via [`cancel`](Self::cancel)) once
    /// [`finished`](TimelineSample::finished) samples have been applied.
    #[must_use]
    pub fn sample(&self, now: HostTime, metrics: &SwitchMetrics) -> Option<TimelineSample> {
        let transition = self.active?;
        let elapsed = now.saturating_duration_since(transition.begun_at);

        let phase = if elapsed < self.phase_length {
            TransitionPhase::Wipe
        } else {
            TransitionPhase::Settle
        };
        let finished = elapsed >= self.phase_length + self.phase_length;

        let min_radius = metrics.min_radius();
        let max_radius = metrics.max_radius();

        // Wipe: min → max around the departing side, held at max.
        let wipe_t = self.easing.apply(fraction(elapsed, self.phase_length));
        let wipe_radius = min_radius + (max_radius - min_radius) * wipe_t;
        let wipe_disc = Circle::new(metrics.wipe_pivot(transition.to), wipe_radius);

        // Settle: 0 → overshoot → rest around the arriving side, zero until
        // the wipe hands over, held at rest afterwards.
        let settle_elapsed = elapsed.ticks().saturating_sub(self.phase_length.ticks());
        let settle_t = self
            .easing
            .apply(fraction(Duration(settle_elapsed), self.phase_length));
        let settle_radius = sample_keyframes(
            &[0.0, SETTLE_OVERSHOOT * min_radius, min_radius],
            settle_t,
        );
        let settle_disc = Circle::new(metrics.settle_pivot(transition.to), settle_radius);

        Some(TimelineSample {
            transition,
            phase,
            progress: fraction(elapsed, self.phase_length + self.phase_length),
            wipe_disc,
            settle_disc,
            finished,
        })
    }
}

/// `elapsed / total` clamped to `0.0..=1.0`, treating a zero-length total as
/// already complete.
fn fraction(elapsed: Duration, total: Duration) -> f64 {
    if total.ticks() == 0 {
        return 1.0;
    }
    (elapsed.ticks() as f64 / total.ticks() as f64).clamp(0.0, 1.0)
}
