// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the direction graph: node identifiers and per-edge and per-node modes.

use core::str::FromStr;

use crate::error::LayoutError;

/// Identifier for a node in a [`Graph`](crate::Graph).
///
/// A small, copyable handle made of a slot index and a generation counter.
/// Removing a node frees its slot; reusing the slot bumps the generation, so a
/// stale `NodeId` never aliases a different live node.
/// Use [`Graph::is_alive`](crate::Graph::is_alive) to check liveness.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// How a child is placed along the axis perpendicular to its parent link.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alignment {
    /// Child center sits on the parent's axis.
    #[default]
    None,
    /// Shift by the child's chain of negative-side neighbors.
    Negative,
    /// Split the difference between both chains.
    Center,
    /// Shift by the child's chain of positive-side neighbors.
    Positive,
    /// Nested content hugs the inside right edge, vertically centered.
    InwardHorizontal,
    /// Nested content hugs the inside bottom edge, horizontally centered.
    InwardVertical,
}

/// Whether a child's silhouette may cross its parent's axis line.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisOverlap {
    /// Decided per call site by the layout shape.
    #[default]
    Default,
    /// Always allowed.
    Allowed,
    /// Always prevented.
    Prevented,
}

impl AxisOverlap {
    /// Resolve against the layout shape's default.
    pub const fn allows(self, default: bool) -> bool {
        match self {
            Self::Default => default,
            Self::Allowed => true,
            Self::Prevented => false,
        }
    }
}

/// How precisely child silhouettes are merged into a parent's extents.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Fit {
    /// Keep every run.
    #[default]
    Exact,
    /// Collapse to a single bounding run per merge.
    Loose,
    /// Like [`Fit::Exact`], but a node with an explicit position is never recomputed
    /// once committed.
    Naive,
}

/// Requested primary axis for a node's children.
///
/// Root-like nodes (roots and nodes nested through [`Direction::Inward`](crate::Direction::Inward))
/// only accept [`PreferredAxis::Horizontal`] and [`PreferredAxis::Vertical`]; ordinary nodes
/// also accept the parent-relative forms.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PreferredAxis {
    /// Lay out the horizontal pair first.
    #[default]
    Horizontal,
    /// Lay out the vertical pair first.
    Vertical,
    /// Lay out along the parent link's axis first.
    Parent,
    /// Lay out across the parent link's axis first.
    Perpendicular,
}

impl PreferredAxis {
    /// True for the parent-relative forms.
    pub const fn is_relative(self) -> bool {
        matches!(self, Self::Parent | Self::Perpendicular)
    }
}

macro_rules! named_enum {
    ($ty:ident, $err:ident, [$($variant:ident => $name:literal),+ $(,)?]) => {
        impl $ty {
            /// Lowercase name, as accepted by [`FromStr`].
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl FromStr for $ty {
            type Err = LayoutError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(if s.eq_ignore_ascii_case($name) {
                    return Ok(Self::$variant);
                })+
                Err(LayoutError::$err)
            }
        }

        impl TryFrom<u8> for $ty {
            type Error = LayoutError;

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                [$(Self::$variant),+]
                    .get(usize::from(value))
                    .copied()
                    .ok_or(LayoutError::$err)
            }
        }
    };
}

named_enum!(Alignment, InvalidAlignment, [
    None => "none",
    Negative => "negative",
    Center => "center",
    Positive => "positive",
    InwardHorizontal => "inward_horizontal",
    InwardVertical => "inward_vertical",
]);

named_enum!(AxisOverlap, InvalidAxisOverlap, [
    Default => "default",
    Allowed => "allowed",
    Prevented => "prevented",
]);

named_enum!(Fit, InvalidFit, [
    Exact => "exact",
    Loose => "loose",
    Naive => "naive",
]);

named_enum!(PreferredAxis, InvalidPreference, [
    Horizontal => "horizontal",
    Vertical => "vertical",
    Parent => "parent",
    Perpendicular => "perpendicular",
]);
