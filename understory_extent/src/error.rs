// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by [`Extent`](crate::Extent) operations.

/// Errors reported by [`Extent`](crate::Extent) operations.
///
/// These all indicate caller misuse: the profile is left unchanged when one is returned.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum ExtentError {
    /// A run length was negative, zero where not permitted, NaN, or infinite.
    #[error("run length must be finite and positive, got {0}")]
    InvalidLength(f64),
    /// A scale factor was not finite and positive.
    #[error("scale must be finite and positive, got {0}")]
    InvalidScale(f64),
    /// The center offset would end up negative.
    #[error("extent offset must not be negative, got {0}")]
    NegativeOffset(f64),
}

/// Result alias for extent operations.
pub type Result<T> = core::result::Result<T, ExtentError>;
