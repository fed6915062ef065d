// Copyright 2025 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use crate::error::Error;

/// Axis-aligned bounding box in `D` dimensions.
///
/// A box with `min == max` on every axis is a point. Boxes built through
/// [`Bounds::new`] are guaranteed to satisfy `min[i] <= max[i]` with no NaN.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds<const D: usize> {
    /// Minimum corner.
    pub min: [f64; D],
    /// Maximum corner.
    pub max: [f64; D],
}

impl<const D: usize> Bounds<D> {
    /// Create a box from its corners, rejecting inverted or NaN axes.
    pub fn new(min: [f64; D], max: [f64; D]) -> Result<Self, Error> {
        for axis in 0..D {
            // False for NaN on either side.
            let ordered = min[axis] <= max[axis];
            if !ordered {
                return Err(Error::InvalidBounds {
                    axis,
                    min: min[axis],
                    max: max[axis],
                });
            }
        }
        Ok(Self { min, max })
    }

    /// Create a degenerate box covering a single point.
    pub const fn point(p: [f64; D]) -> Self {
        Self { min: p, max: p }
    }

    /// True if the box has zero extent on every axis.
    pub fn is_point(&self) -> bool {
        self.min == self.max
    }

    /// Whether the two boxes share at least one point (touching edges count).
    pub fn overlaps(&self, other: &Self) -> bool {
        (0..D).all(|i| self.min[i] <= other.max[i] && other.min[i] <= self.max[i])
    }

    /// Whether `other` lies fully inside this box.
    pub fn contains(&self, other: &Self) -> bool {
        (0..D).all(|i| self.min[i] <= other.min[i] && other.max[i] <= self.max[i])
    }

    /// Smallest box covering both inputs.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut out = *self;
        for i in 0..D {
            out.min[i] = out.min[i].min(other.min[i]);
            out.max[i] = out.max[i].max(other.max[i]);
        }
        out
    }

    /// Product of the per-axis extents. Degenerate boxes have area 0.
    pub fn area(&self) -> f64 {
        (0..D).map(|i| self.max[i] - self.min[i]).product()
    }

    /// Sum of the per-axis extents.
    pub fn margin(&self) -> f64 {
        (0..D).map(|i| self.max[i] - self.min[i]).sum()
    }

    /// Growth in area needed for this box to also cover `other`.
    pub fn enlargement_area(&self, other: &Self) -> f64 {
        self.union(other).area() - self.area()
    }

    /// Midpoint along `axis`.
    pub fn center(&self, axis: usize) -> f64 {
        0.5 * (self.min[axis] + self.max[axis])
    }
}

impl Bounds<2> {
    /// Create a 2D box from origin and size.
    ///
    /// Negative sizes produce an inverted box; use [`Bounds::new`] when the input is untrusted.
    pub const fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            min: [x, y],
            max: [x + w, y + h],
        }
    }
}

/// Union of an iterator of boxes, `None` when it is empty.
pub(crate) fn union_all<'a, const D: usize>(
    mut it: impl Iterator<Item = &'a Bounds<D>>,
) -> Option<Bounds<D>> {
    let first = *it.next()?;
    Some(it.fold(first, |acc, b| acc.union(b)))
}
