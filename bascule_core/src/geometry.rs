// Copyright 2026 the Bascule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry derived from the control's bounds.
//!
//! Everything here is a pure function of the current bounds, so a layout
//! pass only has to store the new size and re-ask; there is no cached state
//! to invalidate. Degenerate bounds (zero or negative extent) are not
//! guarded — the resulting paths are whatever `kurbo` produces for them.

use kurbo::{Circle, Point, Rect, RoundedRect, Size};

use crate::state::SwitchState;

/// Ratio of the control height to the indicator disc's resting radius.
const REST_RADIUS_DIVISOR: f64 = 6.0;

/// Derived measurements for a switch of a given size.
///
/// The disc travel convention is fixed: the indicator rests on the **right**
/// when [`On`](SwitchState::On) and on the **left** when
/// [`Off`](SwitchState::Off). A transition's wipe grows from the side the
/// dot is leaving, and the settle bounce plays on the side it is arriving
/// at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwitchMetrics {
    /// The control's current bounds.
    pub bounds: Size,
}

impl SwitchMetrics {
    /// Creates metrics for the given bounds.
    #[inline]
    #[must_use]
    pub const fn new(bounds: Size) -> Self {
        Self { bounds }
    }

    /// Center of the left resting position.
    #[must_use]
    pub fn left_center(&self) -> Point {
        let h = self.bounds.height;
        Point::new(h / 2.0, h / 2.0)
    }

    /// Center of the right resting position.
    #[must_use]
    pub fn right_center(&self) -> Point {
        let h = self.bounds.height;
        Point::new(self.bounds.width - h / 2.0, h / 2.0)
    }

    /// The indicator disc's resting radius.
    #[must_use]
    pub fn min_radius(&self) -> f64 {
        self.bounds.height / REST_RADIUS_DIVISOR
    }

    /// The wipe disc's terminal radius — wide enough to cover the whole
    /// silhouette from either pivot.
    #[must_use]
    pub fn max_radius(&self) -> f64 {
        self.bounds.width
    }

    /// Corner radius of the pill silhouette.
    #[must_use]
    pub fn corner_radius(&self) -> f64 {
        self.bounds.height / 2.0
    }

    /// The pill silhouette covering the bounds, used for both the
    /// background layer and the clip mask.
    #[must_use]
    pub fn pill(&self) -> RoundedRect {
        let rect = Rect::from_origin_size(Point::ORIGIN, self.bounds);
        RoundedRect::from_rect(rect, self.corner_radius())
    }

    /// Where the indicator disc rests in the given state.
    #[must_use]
    pub fn rest_center(&self, state: SwitchState) -> Point {
        match state {
            SwitchState::On => self.right_center(),
            SwitchState::Off => self.left_center(),
        }
    }

    /// The wipe phase's pivot for a transition *to* `target`: the side the
    /// dot is departing from.
    #[must_use]
    pub fn wipe_pivot(&self, target: SwitchState) -> Point {
        match target {
            SwitchState::On => self.left_center(),
            SwitchState::Off => self.right_center(),
        }
    }

    /// The settle phase's pivot for a transition *to* `target`: the resting
    /// position the dot bounces into. Always opposite the wipe pivot.
    #[must_use]
    pub fn settle_pivot(&self, target: SwitchState) -> Point {
        self.rest_center(target)
    }

    /// The indicator disc at rest for the given state.
    #[must_use]
    pub fn resting_disc(&self, state: SwitchState) -> Circle {
        Circle::new(self.rest_center(state), self.min_radius())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> SwitchMetrics {
        SwitchMetrics::new(Size::new(60.0, 30.0))
    }

    #[test]
    fn centers_and_radii_for_60_by_30() {
        let m = metrics();
        assert_eq!(m.left_center(), Point::new(15.0, 15.0));
        assert_eq!(m.right_center(), Point::new(45.0, 15.0));
        assert_eq!(m.min_radius(), 5.0);
        assert_eq!(m.max_radius(), 60.0);
        assert_eq!(m.corner_radius(), 15.0);
    }

    #[test]
    fn pill_matches_bounds() {
        let pill = metrics().pill();
        assert_eq!(pill.rect(), Rect::new(0.0, 0.0, 60.0, 30.0));
        assert_eq!(pill.radii().top_left, 15.0);
    }

    #[test]
    fn dot_rests_right_when_on() {
        let m = metrics();
        assert_eq!(m.rest_center(SwitchState::On), m.right_center());
        assert_eq!(m.rest_center(SwitchState::Off), m.left_center());
    }

    #[test]
    fn wipe_grows_from_departing_side() {
        let m = metrics();
        // Turning on: the dot leaves the left, so the wipe grows from there.
        assert_eq!(m.wipe_pivot(SwitchState::On), m.left_center());
        assert_eq!(m.wipe_pivot(SwitchState::Off), m.right_center());
    }

    #[test]
    fn settle_pivot_is_opposite_wipe_pivot() {
        let m = metrics();
        for target in [SwitchState::On, SwitchState::Off] {
            assert_ne!(m.settle_pivot(target), m.wipe_pivot(target));
            assert_eq!(m.settle_pivot(target), m.rest_center(target));
        }
    }

    #[test]
    fn metrics_track_bounds_changes() {
        let m = SwitchMetrics::new(Size::new(120.0, 60.0));
        assert_eq!(m.left_center(), Point::new(30.0, 30.0));
        assert_eq!(m.right_center(), Point::new(90.0, 30.0));
        assert_eq!(m.min_radius(), 10.0);
    }

    #[test]
    fn resting_disc_uses_min_radius() {
        let disc = metrics().resting_disc(SwitchState::On);
        assert_eq!(disc.center, Point::new(45.0, 15.0));
        assert_eq!(disc.radius, 5.0);
    }
}
