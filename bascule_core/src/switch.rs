// Copyright 2026 the Bascule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The switch control.
//!
//! [`Switch`] owns the whole model: the two-value state, the derived
//! geometry, the four-layer stack (pill background, two indicator discs, a
//! stack-level pill mask), the transition timeline, and the observer
//! registry. It never draws and never reads a clock — hosts deliver taps and
//! frame ticks stamped with their own monotonic time, and consume the
//! [`StackChanges`] each tick returns.
//!
//! # Frame loop
//!
//! A typical host frame callback:
//!
//! ```rust,ignore
//! fn on_frame(switch: &mut Switch, now: HostTime) {
//!     let changes = switch.tick(now, &mut Tracer::none());
//!     presenter.apply(switch.stack(), &changes);
//! }
//! ```
//!
//! Taps arrive the same way: `switch.tap(now, tracer)` flips the state,
//! restarts the timeline, and notifies observers; the next `tick` turns the
//! new timeline samples into layer updates.

use kurbo::{Circle, Size};

use crate::geometry::SwitchMetrics;
use crate::layer::{Fill, LayerId, LayerShape, LayerStack, StackChanges};
use crate::observer::{ObserverId, ToggleFn, ToggleObservers};
use crate::state::SwitchState;
use crate::time::{HostTime, Timebase};
use crate::timeline::{Timeline, TimelineSample, Transition, TransitionPhase};
use crate::trace::{
    BoundsChangeEvent, PhaseBeginEvent, PhaseEndEvent, StateChangeEvent, TapEvent,
    TransitionBeginEvent, TransitionEndEvent, Tracer,
};

/// Z position of the background pill.
const Z_BACKGROUND: usize = 0;
/// Z position the departing (wipe) disc is stacked at during a transition.
const Z_WIPE: usize = 1;
/// Z position the arriving (settle) disc is stacked at during a transition.
const Z_SETTLE: usize = 2;

/// Construction parameters for a [`Switch`].
#[derive(Clone, Copy, Debug)]
pub struct SwitchConfig {
    /// Initial bounds.
    pub bounds: Size,
    /// State the control starts in.
    pub initial_state: SwitchState,
    /// Fill shown as the active background when `On`, and painted on the
    /// `On` indicator disc.
    pub on_fill: Fill,
    /// Fill shown as the active background when `Off`, and painted on the
    /// `Off` indicator disc.
    pub off_fill: Fill,
    /// Ticks-to-nanoseconds factor of the host clock stamping taps and
    /// frame ticks.
    pub timebase: Timebase,
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self {
            bounds: Size::new(60.0, 30.0),
            initial_state: SwitchState::Off,
            on_fill: Fill::WHITE,
            off_fill: Fill::BLACK,
            timebase: Timebase::NANOS,
        }
    }
}

/// An animated two-state toggle switch.
#[derive(Debug)]
pub struct Switch {
    state: SwitchState,
    metrics: SwitchMetrics,
    on_fill: Fill,
    off_fill: Fill,
    stack: LayerStack,
    background: LayerId,
    on_disc: LayerId,
    off_disc: LayerId,
    timeline: Timeline,
    observers: ToggleObservers,
    /// Phase most recently reported through the tracer, for begin/end
    /// pairing across ticks.
    current_phase: Option<TransitionPhase>,
}

impl Switch {
    /// Creates a switch and begins the transition into its initial state,
    /// as the control this one descends from does on setup.
    #[must_use]
    pub fn new(config: SwitchConfig, now: HostTime, tracer: &mut Tracer<'_>) -> Self {
        let metrics = SwitchMetrics::new(config.bounds);
        let mut stack = LayerStack::new();

        let initial_fill = match config.initial_state {
            SwitchState::On => config.on_fill,
            SwitchState::Off => config.off_fill,
        };
        let background = stack.create_layer(LayerShape::Pill(metrics.pill()), initial_fill);
        stack.insert_at(background, Z_BACKGROUND);

        let on_disc = stack.create_layer(
            LayerShape::Disc(Circle::new(metrics.rest_center(SwitchState::On), 0.0)),
            config.on_fill,
        );
        let off_disc = stack.create_layer(
            LayerShape::Disc(Circle::new(metrics.rest_center(SwitchState::Off), 0.0)),
            config.off_fill,
        );

        stack.set_mask(Some(metrics.pill()));

        let mut switch = Self {
            state: config.initial_state,
            metrics,
            on_fill: config.on_fill,
            off_fill: config.off_fill,
            stack,
            background,
            on_disc,
            off_disc,
            timeline: Timeline::new(config.timebase),
            observers: ToggleObservers::new(),
            current_phase: None,
        };
        switch.begin_transition(config.initial_state, config.initial_state, now, tracer);
        switch
    }

    // -- State --

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> SwitchState {
        self.state
    }

    /// Assigns the state and unconditionally begins the transition, even
    /// when `state` equals the current value. Does not notify observers.
    pub fn set_state(&mut self, state: SwitchState, now: HostTime, tracer: &mut Tracer<'_>) {
        let from = self.state;
        self.state = state;
        tracer.state_change(&StateChangeEvent {
            from,
            to: state,
            at: now,
        });
        self.begin_transition(from, state, now, tracer);
    }

    /// Flips the state, begins the transition, then notifies every observer
    /// with the new value.
    pub fn toggle(&mut self, now: HostTime, tracer: &mut Tracer<'_>) {
        self.set_state(self.state.flipped(), now, tracer);
        self.observers.notify(self.state);
    }

    /// The tap gesture entry point; equivalent to [`toggle`](Self::toggle).
    pub fn tap(&mut self, now: HostTime, tracer: &mut Tracer<'_>) {
        tracer.tap(&TapEvent { at: now });
        self.toggle(now, tracer);
    }

    // -- Observers --

    /// Registers a toggle observer; it fires after every
    /// [`toggle`](Self::toggle)/[`tap`](Self::tap), in registration order.
    pub fn observe(&mut self, observer: ToggleFn) -> ObserverId {
        self.observers.add(observer)
    }

    /// Removes an observer. Stale handles are a no-op returning `false`.
    pub fn unobserve(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    // -- Layout --

    /// Explicit layout invalidation: recomputes the background pill, the
    /// clip mask, and (when no transition is in flight) the held disc
    /// geometry from the new bounds. The state is untouched.
    pub fn set_bounds(&mut self, bounds: Size, tracer: &mut Tracer<'_>) {
        self.metrics = SwitchMetrics::new(bounds);
        self.stack
            .set_shape(self.background, LayerShape::Pill(self.metrics.pill()));
        self.stack.set_mask(Some(self.metrics.pill()));

        if self.timeline.is_idle() {
            self.hold_resting_shapes();
        }
        // An in-flight transition re-derives both discs from the new
        // metrics on the next tick.

        tracer.bounds_change(&BoundsChangeEvent { bounds });
    }

    /// Returns the current bounds.
    #[must_use]
    pub fn bounds(&self) -> Size {
        self.metrics.bounds
    }

    /// Returns the derived geometry for the current bounds.
    #[must_use]
    pub fn metrics(&self) -> &SwitchMetrics {
        &self.metrics
    }

    // -- Frame loop --

    /// Advances the control to `now`: applies the timeline sample to the
    /// disc layers, retires a finished transition, and evaluates the stack.
    pub fn tick(&mut self, now: HostTime, tracer: &mut Tracer<'_>) -> StackChanges {
        let mut changes = StackChanges::default();
        self.tick_into(now, &mut changes, tracer);
        changes
    }

    /// Like [`tick`](Self::tick), but reuses a caller-provided buffer.
    pub fn tick_into(
        &mut self,
        now: HostTime,
        changes: &mut StackChanges,
        tracer: &mut Tracer<'_>,
    ) {
        if let Some(sample) = self.timeline.sample(now, &self.metrics) {
            self.apply_sample(&sample);

            if self.current_phase != Some(sample.phase) {
                // The only in-flight crossing is wipe → settle.
                if let Some(previous) = self.current_phase {
                    tracer.phase_end(&PhaseEndEvent {
                        phase: previous,
                        at: now,
                    });
                }
                tracer.phase_begin(&PhaseBeginEvent {
                    phase: sample.phase,
                    at: now,
                });
                self.current_phase = Some(sample.phase);
            }

            if sample.finished {
                if let Some(phase) = self.current_phase.take() {
                    tracer.phase_end(&PhaseEndEvent { phase, at: now });
                }
                tracer.transition_end(&TransitionEndEvent {
                    transition: sample.transition,
                    at: now,
                    cancelled: false,
                });
                let _ = self.timeline.cancel();
            }
        }

        self.stack.evaluate_into(changes);
    }

    // -- Introspection --

    /// Returns the layer stack, for presenters reading current values.
    #[must_use]
    pub fn stack(&self) -> &LayerStack {
        &self.stack
    }

    /// Returns the timeline, for querying transition progress.
    #[must_use]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Handle of the background pill layer.
    #[must_use]
    pub fn background_layer(&self) -> LayerId {
        self.background
    }

    /// Handle of the indicator disc for the given state.
    #[must_use]
    pub fn disc_layer(&self, state: SwitchState) -> LayerId {
        match state {
            SwitchState::On => self.on_disc,
            SwitchState::Off => self.off_disc,
        }
    }

    // -- Internal --

    fn active_fill(&self, state: SwitchState) -> Fill {
        match state {
            SwitchState::On => self.on_fill,
            SwitchState::Off => self.off_fill,
        }
    }

    /// Starts (or restarts) the transition `from → target` at `now`.
    fn begin_transition(
        &mut self,
        from: SwitchState,
        target: SwitchState,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) {
        // Displace whatever is in flight, closing its trace spans.
        let displaced = self.timeline.cancel();
        if let Some(interrupted) = displaced {
            if let Some(phase) = self.current_phase.take() {
                tracer.phase_end(&PhaseEndEvent { phase, at: now });
            }
            tracer.transition_end(&TransitionEndEvent {
                transition: interrupted,
                at: now,
                cancelled: true,
            });
        }

        // The background swaps to the target's active fill immediately; the
        // wipe provides the visible sweep.
        self.stack
            .set_fill(self.background, self.active_fill(target));

        let transition = Transition {
            from,
            to: target,
            begun_at: now,
        };
        let _ = self.timeline.begin(from, target, now);

        // Stack the departing disc above the background and the arriving
        // disc above it, moving them if they are already attached.
        let wipe = self.disc_layer(target.flipped());
        let settle = self.disc_layer(target);
        self.stack.insert_at(wipe, Z_WIPE);
        self.stack.insert_at(settle, Z_SETTLE);
        #[cfg(feature = "trace-rich")]
        tracer.restacked(&[wipe.index(), settle.index()]);

        // Make the begin-instant sample visible without waiting for a tick.
        if let Some(sample) = self.timeline.sample(now, &self.metrics) {
            self.apply_sample(&sample);
        }

        tracer.transition_begin(&TransitionBeginEvent {
            transition,
            replaced: displaced.is_some(),
        });
        tracer.phase_begin(&PhaseBeginEvent {
            phase: TransitionPhase::Wipe,
            at: now,
        });
        self.current_phase = Some(TransitionPhase::Wipe);
    }

    /// Writes a timeline sample into the two disc layers.
    fn apply_sample(&mut self, sample: &TimelineSample) {
        let wipe = self.disc_layer(sample.transition.departing());
        let settle = self.disc_layer(sample.transition.arriving());
        self.stack.set_shape(wipe, LayerShape::Disc(sample.wipe_disc));
        self.stack
            .set_shape(settle, LayerShape::Disc(sample.settle_disc));
    }

    /// Re-derives the held disc shapes for the current state, used when the
    /// bounds change while idle.
    fn hold_resting_shapes(&mut self) {
        let settle = self.disc_layer(self.state);
        let wipe = self.disc_layer(self.state.flipped());
        self.stack.set_shape(
            settle,
            LayerShape::Disc(self.metrics.resting_disc(self.state)),
        );
        self.stack.set_shape(
            wipe,
            LayerShape::Disc(Circle::new(
                self.metrics.wipe_pivot(self.state),
                self.metrics.max_radius(),
            )),
        );
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use kurbo::Point;

    use crate::time::Duration;
    use crate::timeline::PHASE_NANOS;

    use super::*;

    const T0: HostTime = HostTime(1_000_000_000);

    fn switch() -> Switch {
        Switch::new(SwitchConfig::default(), T0, &mut Tracer::none())
    }

    fn at(offset_nanos: u64) -> HostTime {
        T0 + Duration(offset_nanos)
    }

    #[test]
    fn default_construction_geometry() {
        let s = switch();
        assert_eq!(s.state(), SwitchState::Off);
        assert_eq!(s.metrics().left_center(), Point::new(15.0, 15.0));
        assert_eq!(s.metrics().right_center(), Point::new(45.0, 15.0));
        assert_eq!(s.metrics().min_radius(), 5.0);
        assert_eq!(s.metrics().max_radius(), 60.0);
    }

    #[test]
    fn construction_begins_initial_transition() {
        let mut s = switch();
        let active = s.timeline().active().expect("construction animates");
        assert_eq!(active.to, SwitchState::Off);
        assert_eq!(active.begun_at, T0);

        // The initial evaluate reports the full stack: three layers added,
        // the z order populated, and the mask set.
        let changes = s.tick(T0, &mut Tracer::none());
        assert_eq!(changes.added.len(), 3);
        assert!(changes.order_changed);
        assert!(changes.mask_changed);
        assert_eq!(s.stack().depth(), 3);
    }

    #[test]
    fn toggle_is_an_involution() {
        let mut s = switch();
        let mut tracer = Tracer::none();
        s.toggle(at(1), &mut tracer);
        assert_eq!(s.state(), SwitchState::On);
        s.toggle(at(2), &mut tracer);
        assert_eq!(s.state(), SwitchState::Off);
    }

    #[test]
    fn toggle_notifies_once_with_post_mutation_state() {
        let mut s = switch();
        let seen: Rc<RefCell<Vec<SwitchState>>> = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        s.observe(Box::new(move |state| log.borrow_mut().push(state)));

        s.toggle(at(1), &mut Tracer::none());
        assert_eq!(*seen.borrow(), &[SwitchState::On]);

        s.toggle(at(2), &mut Tracer::none());
        assert_eq!(*seen.borrow(), &[SwitchState::On, SwitchState::Off]);
    }

    #[test]
    fn toggle_without_observers_is_silent() {
        let mut s = switch();
        for (i, expected) in [SwitchState::On, SwitchState::Off, SwitchState::On]
            .into_iter()
            .enumerate()
        {
            s.toggle(at(i as u64 + 1), &mut Tracer::none());
            assert_eq!(s.state(), expected);
        }
    }

    #[test]
    fn set_state_does_not_notify() {
        let mut s = switch();
        let count = Rc::new(RefCell::new(0_u32));
        let log = Rc::clone(&count);
        s.observe(Box::new(move |_| *log.borrow_mut() += 1));

        s.set_state(SwitchState::On, at(1), &mut Tracer::none());
        assert_eq!(*count.borrow(), 0, "direct assignment is silent");
        assert_eq!(s.state(), SwitchState::On);
    }

    #[test]
    fn removed_observer_no_longer_fires() {
        let mut s = switch();
        let count = Rc::new(RefCell::new(0_u32));
        let log = Rc::clone(&count);
        let id = s.observe(Box::new(move |_| *log.borrow_mut() += 1));

        s.toggle(at(1), &mut Tracer::none());
        assert!(s.unobserve(id));
        s.toggle(at(2), &mut Tracer::none());
        assert_eq!(*count.borrow(), 1);
        assert!(!s.unobserve(id));
    }

    #[test]
    fn redundant_set_state_still_animates() {
        let mut s = switch();
        // Drain construction-time changes.
        let _ = s.tick(T0, &mut Tracer::none());

        let restart_at = at(10 * PHASE_NANOS);
        // Let the initial transition retire first.
        let _ = s.tick(restart_at, &mut Tracer::none());
        assert!(s.timeline().is_idle());

        s.set_state(SwitchState::Off, restart_at, &mut Tracer::none());

        let active = s.timeline().active().expect("redundant set must animate");
        assert_eq!(active.from, SwitchState::Off);
        assert_eq!(active.to, SwitchState::Off);
        assert_eq!(active.begun_at, restart_at);

        let changes = s.tick(restart_at, &mut Tracer::none());
        assert!(changes.order_changed, "discs are re-stacked");
        assert!(!changes.restacked.is_empty());
    }

    #[test]
    fn background_swaps_fill_at_transition_begin() {
        let mut s = switch();
        assert_eq!(s.stack().fill(s.background_layer()), Fill::BLACK);

        s.toggle(at(1), &mut Tracer::none());
        assert_eq!(
            s.stack().fill(s.background_layer()),
            Fill::WHITE,
            "background switches immediately, not at wipe end"
        );
    }

    #[test]
    fn tick_applies_wipe_then_settle_samples() {
        let mut s = switch();
        let mut tracer = Tracer::none();
        let _ = s.tick(at(10 * PHASE_NANOS), &mut tracer);
        s.toggle(at(10 * PHASE_NANOS), &mut tracer);
        let t1 = at(10 * PHASE_NANOS);

        // Mid-wipe: the off disc (departing) grows from the left.
        let _ = s.tick(t1 + Duration(PHASE_NANOS / 2), &mut tracer);
        let wipe = s
            .stack()
            .shape(s.disc_layer(SwitchState::Off))
            .as_disc()
            .unwrap();
        assert_eq!(wipe.center, s.metrics().left_center());
        assert!((wipe.radius - 53.125).abs() < 1e-9);

        // Mid-settle: the on disc (arriving) bounces at the right.
        let _ = s.tick(t1 + Duration(PHASE_NANOS * 3 / 2), &mut tracer);
        let settle = s
            .stack()
            .shape(s.disc_layer(SwitchState::On))
            .as_disc()
            .unwrap();
        assert_eq!(settle.center, s.metrics().right_center());
        assert!((settle.radius - 5.25).abs() < 1e-9);
    }

    #[test]
    fn finished_transition_retires_and_holds() {
        let mut s = switch();
        let mut tracer = Tracer::none();
        s.toggle(at(1), &mut tracer);

        let _ = s.tick(at(1 + 2 * PHASE_NANOS), &mut tracer);
        assert!(s.timeline().is_idle());

        let held = s
            .stack()
            .shape(s.disc_layer(SwitchState::On))
            .as_disc()
            .unwrap();
        assert_eq!(held.radius, s.metrics().min_radius());
        assert_eq!(held.center, s.metrics().right_center());

        // Nothing further changes while idle.
        let changes = s.tick(at(1 + 3 * PHASE_NANOS), &mut tracer);
        assert!(changes.is_empty());
    }

    #[test]
    fn mid_flight_toggle_restarts_with_swapped_direction() {
        let mut s = switch();
        let mut tracer = Tracer::none();
        let _ = s.tick(T0, &mut tracer);

        s.toggle(at(1), &mut tracer);
        let _ = s.tick(at(1 + PHASE_NANOS / 2), &mut tracer);

        let restart_at = at(1 + PHASE_NANOS / 2);
        s.toggle(restart_at, &mut tracer);

        let active = s.timeline().active().unwrap();
        assert_eq!(active.from, SwitchState::On);
        assert_eq!(active.to, SwitchState::Off);
        assert_eq!(active.begun_at, restart_at);
        assert_eq!(s.state(), SwitchState::Off);

        // The new wipe starts from scratch on the right.
        let wipe = s
            .stack()
            .shape(s.disc_layer(SwitchState::On))
            .as_disc()
            .unwrap();
        assert_eq!(wipe.center, s.metrics().right_center());
        assert_eq!(wipe.radius, s.metrics().min_radius());
    }

    #[test]
    fn set_bounds_invalidates_mask_and_background() {
        let mut s = switch();
        let mut tracer = Tracer::none();
        // Retire the construction transition and drain changes.
        let _ = s.tick(at(10 * PHASE_NANOS), &mut tracer);

        s.set_bounds(Size::new(120.0, 60.0), &mut tracer);
        assert_eq!(s.bounds(), Size::new(120.0, 60.0));
        assert_eq!(s.metrics().min_radius(), 10.0);

        let changes = s.tick(at(11 * PHASE_NANOS), &mut tracer);
        assert!(changes.mask_changed);
        assert!(changes.shapes.contains(&s.background_layer().index()));

        // Held discs were re-derived for the new bounds.
        let held = s
            .stack()
            .shape(s.disc_layer(SwitchState::Off))
            .as_disc()
            .unwrap();
        assert_eq!(held.center, Point::new(30.0, 30.0));
        assert_eq!(held.radius, 10.0);
        assert_eq!(
            s.stack().mask().map(|m| m.rect().width()),
            Some(120.0),
            "mask tracks the new bounds"
        );
    }

    #[test]
    fn z_order_keeps_background_at_bottom() {
        let mut s = switch();
        let mut tracer = Tracer::none();
        s.toggle(at(1), &mut tracer);

        let order = s.stack().order();
        assert_eq!(order[0], s.background_layer().index());
        assert_eq!(order.len(), 3);
        // Arriving disc stacked above the departing one.
        assert_eq!(order[1], s.disc_layer(SwitchState::Off).index());
        assert_eq!(order[2], s.disc_layer(SwitchState::On).index());
    }
}
