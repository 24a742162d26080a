// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Directions, axes, and the fixed visiting orders.
//!
//! Coordinates follow screen conventions: x grows [`Direction::Forward`] and y grows
//! [`Direction::Downward`]. [`Direction::Inward`] and [`Direction::Outward`] form the
//! nesting axis [`Axis::Z`].

use core::fmt;
use core::str::FromStr;

use crate::error::LayoutError;

/// One of the six directions a node can have a neighbor in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Toward negative y.
    Upward,
    /// Toward positive y.
    Downward,
    /// Toward negative x.
    Backward,
    /// Toward positive x.
    Forward,
    /// Into the node (its nested content).
    Inward,
    /// Out of the node (toward the node it is nested in).
    Outward,
}

/// The axis a [`Direction`] runs along.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// [`Direction::Backward`] and [`Direction::Forward`].
    Horizontal,
    /// [`Direction::Upward`] and [`Direction::Downward`].
    Vertical,
    /// [`Direction::Inward`] and [`Direction::Outward`].
    Z,
}

/// Visiting order used when a node's primary axis is horizontal.
pub const HORIZONTAL_ORDER: [Direction; 6] = [
    Direction::Backward,
    Direction::Forward,
    Direction::Upward,
    Direction::Downward,
    Direction::Inward,
    Direction::Outward,
];

/// Visiting order used when a node's primary axis is vertical.
pub const VERTICAL_ORDER: [Direction; 6] = [
    Direction::Upward,
    Direction::Downward,
    Direction::Backward,
    Direction::Forward,
    Direction::Inward,
    Direction::Outward,
];

impl Direction {
    /// All directions, in [index](Self::index) order.
    pub const ALL: [Self; 6] = [
        Self::Upward,
        Self::Downward,
        Self::Backward,
        Self::Forward,
        Self::Inward,
        Self::Outward,
    ];

    /// The four directions that lay out on the plane.
    pub const CARDINAL: [Self; 4] = [Self::Upward, Self::Downward, Self::Backward, Self::Forward];

    /// Stable index in `0..6`.
    pub const fn index(self) -> usize {
        match self {
            Self::Upward => 0,
            Self::Downward => 1,
            Self::Backward => 2,
            Self::Forward => 3,
            Self::Inward => 4,
            Self::Outward => 5,
        }
    }

    /// The opposite direction.
    pub const fn reverse(self) -> Self {
        match self {
            Self::Upward => Self::Downward,
            Self::Downward => Self::Upward,
            Self::Backward => Self::Forward,
            Self::Forward => Self::Backward,
            Self::Inward => Self::Outward,
            Self::Outward => Self::Inward,
        }
    }

    /// The axis this direction runs along.
    pub const fn axis(self) -> Axis {
        match self {
            Self::Upward | Self::Downward => Axis::Vertical,
            Self::Backward | Self::Forward => Axis::Horizontal,
            Self::Inward | Self::Outward => Axis::Z,
        }
    }

    /// `+1.0` for the positive direction of its axis, `-1.0` otherwise.
    pub const fn sign(self) -> f64 {
        match self {
            Self::Downward | Self::Forward | Self::Inward => 1.0,
            Self::Upward | Self::Backward | Self::Outward => -1.0,
        }
    }

    /// True for the four planar directions.
    pub const fn is_cardinal(self) -> bool {
        !matches!(self, Self::Inward | Self::Outward)
    }

    /// True for [`Direction::Upward`] and [`Direction::Downward`].
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Upward | Self::Downward)
    }

    /// True for [`Direction::Backward`] and [`Direction::Forward`].
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Backward | Self::Forward)
    }

    /// Index of a cardinal direction in `0..4`, as used for per-direction extents.
    pub(crate) const fn cardinal_index(self) -> Option<usize> {
        match self {
            Self::Upward => Some(0),
            Self::Downward => Some(1),
            Self::Backward => Some(2),
            Self::Forward => Some(3),
            Self::Inward | Self::Outward => None,
        }
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Upward => "upward",
            Self::Downward => "downward",
            Self::Backward => "backward",
            Self::Forward => "forward",
            Self::Inward => "inward",
            Self::Outward => "outward",
        }
    }
}

impl Axis {
    /// The other planar axis. [`Axis::Z`] has none.
    pub const fn perpendicular(self) -> Option<Self> {
        match self {
            Self::Horizontal => Some(Self::Vertical),
            Self::Vertical => Some(Self::Horizontal),
            Self::Z => None,
        }
    }

    /// The direction of increasing coordinate along this axis.
    pub const fn positive(self) -> Direction {
        match self {
            Self::Horizontal => Direction::Forward,
            Self::Vertical => Direction::Downward,
            Self::Z => Direction::Inward,
        }
    }

    /// The direction of decreasing coordinate along this axis.
    pub const fn negative(self) -> Direction {
        match self {
            Self::Horizontal => Direction::Backward,
            Self::Vertical => Direction::Upward,
            Self::Z => Direction::Outward,
        }
    }

    /// The visiting order that puts this axis first.
    pub(crate) const fn order(self) -> &'static [Direction; 6] {
        match self {
            Self::Vertical => &VERTICAL_ORDER,
            Self::Horizontal | Self::Z => &HORIZONTAL_ORDER,
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = LayoutError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(LayoutError::InvalidDirection)
    }
}

impl FromStr for Direction {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or(LayoutError::InvalidDirection)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
            Self::Z => "z",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_is_an_involution_on_the_same_axis() {
        for d in Direction::ALL {
            assert_eq!(d.reverse().reverse(), d);
            assert_eq!(d.reverse().axis(), d.axis());
            assert_eq!(d.sign(), -d.reverse().sign());
        }
    }

    #[test]
    fn axis_endpoints() {
        for axis in [Axis::Horizontal, Axis::Vertical, Axis::Z] {
            assert_eq!(axis.positive().axis(), axis);
            assert_eq!(axis.negative(), axis.positive().reverse());
            assert_eq!(axis.positive().sign(), 1.0);
        }
        assert_eq!(Axis::Horizontal.perpendicular(), Some(Axis::Vertical));
        assert_eq!(Axis::Z.perpendicular(), None);
    }

    #[test]
    fn orders_are_permutations() {
        for order in [HORIZONTAL_ORDER, VERTICAL_ORDER] {
            let mut seen = [false; 6];
            for d in order {
                assert!(!seen[d.index()], "{d} listed twice");
                seen[d.index()] = true;
            }
        }
        assert_eq!(HORIZONTAL_ORDER[0].axis(), Axis::Horizontal);
        assert_eq!(VERTICAL_ORDER[0].axis(), Axis::Vertical);
    }

    #[test]
    fn parse_and_decode() {
        assert_eq!("Forward".parse::<Direction>(), Ok(Direction::Forward));
        assert_eq!("sideways".parse::<Direction>(), Err(LayoutError::InvalidDirection));
        assert_eq!(Direction::try_from(4), Ok(Direction::Inward));
        assert_eq!(Direction::try_from(6), Err(LayoutError::InvalidDirection));
        for d in Direction::ALL {
            assert_eq!(Direction::ALL[d.index()], d);
        }
    }

    #[test]
    fn cardinal_classification() {
        assert!(Direction::CARDINAL.iter().all(|d| d.is_cardinal()));
        assert!(!Direction::Inward.is_cardinal());
        assert_eq!(Direction::Outward.cardinal_index(), None);
        assert!(Direction::Upward.is_vertical() && !Direction::Upward.is_horizontal());
    }
}
