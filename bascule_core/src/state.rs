// Copyright 2026 the Bascule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The switch's two-value state.

/// The position of the switch.
///
/// There is no third value: every control is always exactly `On` or `Off`,
/// and the only mutations are [`flipped`](Self::flipped) (via
/// [`Switch::toggle`](crate::switch::Switch::toggle)) and direct assignment
/// (via [`Switch::set_state`](crate::switch::Switch::set_state)).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SwitchState {
    /// The switch is on; the indicator dot rests on the right.
    On,
    /// The switch is off; the indicator dot rests on the left.
    #[default]
    Off,
}

impl SwitchState {
    /// Returns the opposite state.
    #[inline]
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::On => Self::Off,
            Self::Off => Self::On,
        }
    }

    /// Returns `true` for [`On`](Self::On).
    #[inline]
    #[must_use]
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}
