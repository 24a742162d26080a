// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_extent --heading-base-level=0

//! Understory Extent: run-length encoded 1D silhouettes.
//!
//! An [`Extent`] describes how far a subtree of boxes reaches in one direction, as a
//! sequence of runs along the perpendicular axis.
//! Each run has a length and a size; a NaN size marks a run where nothing is present.
//!
//! - Build profiles with [`Extent::append_ls`] and [`Extent::prepend_ls`]; adjacent runs with equal sizes coalesce.
//! - Merge a child's profile into a parent's with [`Extent::combine_extent`] (exact) or
//!   [`Extent::combine_extent_and_simplify`] (single run, cheap and lossy).
//! - Ask how far apart two facing profiles must be with [`Extent::separation`].
//!
//! The crate knows nothing about graphs or nodes.
//! Higher layers (like the direction graph layout) keep one extent per direction per node
//! and feed child positions in as length and size adjustments.
//!
//! # Example
//!
//! ```rust
//! use understory_extent::Extent;
//!
//! // A 20x10 box, seen from below: 20 units long, reaching 5 units down, centered.
//! let parent = Extent::from_run(20.0, 5.0, 10.0).unwrap();
//! // A 10x4 box facing it from below.
//! let child = Extent::from_run(10.0, 2.0, 5.0).unwrap();
//!
//! // Centers aligned: the child starts 5 units into the parent's profile.
//! let position = parent.offset() - child.offset();
//! let separation = parent.separation(&child, position, true, 1.0, 0.0);
//! assert_eq!(separation, 7.0);
//!
//! // Merge the child, placed `separation` below, into the parent's downward profile.
//! let mut down = parent.clone();
//! down.combine_extent(&child, position, separation, 1.0).unwrap();
//! assert_eq!(down.bounding_values().max_size, 9.0);
//! ```
//!
//! ### Float semantics
//!
//! NaN is meaningful only as a run size. Lengths, offsets, scales and adjustments must be finite;
//! invalid values are reported as [`ExtentError`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod error;
pub mod extent;

pub use error::{ExtentError, Result};
pub use extent::{BoundingValues, Extent, Run};
