// Copyright 2026 the Bascule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape and fill types for stack layers.

use kurbo::{Circle, RoundedRect};

/// The geometry a layer presents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LayerShape {
    /// A rounded rectangle; the background and the clip mask are pills
    /// (corner radius = half height).
    Pill(RoundedRect),
    /// A filled circle; the indicator and wipe discs.
    Disc(Circle),
}

impl LayerShape {
    /// Returns the disc geometry, if this shape is a disc.
    #[must_use]
    pub const fn as_disc(&self) -> Option<Circle> {
        match self {
            Self::Disc(c) => Some(*c),
            Self::Pill(_) => None,
        }
    }
}

/// A solid RGBA fill.
///
/// The control only ever paints solid colors; hosts map these onto whatever
/// brush type their renderer uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fill {
    /// Red component.
    pub r: u8,
    /// Green component.
    pub g: u8,
    /// Blue component.
    pub b: u8,
    /// Alpha component (255 is opaque).
    pub a: u8,
}

impl Fill {
    /// Opaque white, the default `On` fill.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black, the default `Off` fill.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Creates an opaque fill from RGB components.
    #[inline]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn disc_accessor() {
        let disc = LayerShape::Disc(Circle::new(Point::new(1.0, 2.0), 3.0));
        assert_eq!(disc.as_disc().map(|c| c.radius), Some(3.0));

        let pill = LayerShape::Pill(RoundedRect::new(0.0, 0.0, 10.0, 4.0, 2.0));
        assert_eq!(pill.as_disc(), None);
    }

    #[test]
    fn named_fills() {
        assert_eq!(Fill::WHITE, Fill::rgb(255, 255, 255));
        assert_eq!(Fill::BLACK.a, 255);
    }
}
