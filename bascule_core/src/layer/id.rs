// Copyright 2026 the Bascule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer identity.

use core::fmt;

/// Sentinel value indicating "no layer" in raw index fields.
pub(crate) const INVALID: u32 = u32::MAX;

/// A handle to a layer in a [`LayerStack`](super::LayerStack).
///
/// Contains both a slot index and a generation counter so that stale handles
/// are detected after a layer is destroyed and its slot reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId {
    /// Slot index into the stack's arrays.
    pub(crate) idx: u32,
    /// Generation counter — must match the stack's generation for this slot.
    pub(crate) generation: u32,
}

impl LayerId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LayerId({}@gen{})", self.idx, self.generation)
    }
}
