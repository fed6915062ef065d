// Copyright 2025 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for rejected input.

use core::fmt;

/// Input rejected before any mutation took place.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Error {
    /// A box with `min > max` (or NaN) on `axis`.
    InvalidBounds {
        /// Offending axis.
        axis: usize,
        /// Minimum supplied for that axis.
        min: f64,
        /// Maximum supplied for that axis.
        max: f64,
    },
    /// Fan-out parameters outside `1 <= min <= max / 2`.
    InvalidFanout {
        /// Requested minimum entries per node.
        min: usize,
        /// Requested maximum entries per node.
        max: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBounds { axis, min, max } => {
                write!(f, "invalid bounds on axis {axis}: min {min} > max {max}")
            }
            Self::InvalidFanout { min, max } => {
                write!(
                    f,
                    "invalid fan-out: need 1 <= min <= max / 2, got min {min}, max {max}"
                )
            }
        }
    }
}

impl core::error::Error for Error {}
