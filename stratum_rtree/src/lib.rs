// Copyright 2025 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=stratum_rtree --heading-base-level=0

//! Stratum R-tree: a dynamic, in-memory R-tree over `D`-dimensional boxes.
//!
//! Stratum R-tree is the spatial core of the Stratum workspace.
//!
//! - Insert and remove boxed values at any time; the tree rebalances itself.
//! - Query by overlapping box, scan everything, or iterate.
//! - Walk values nearest-first under any caller-supplied distance via [`RTree::nearby`].
//!
//! The dimension `D` is a const generic and values `V` are opaque: the tree looks only at
//! boxes, plus `V: PartialEq` to pick the right item on removal.
//!
//! # Example
//!
//! ```rust
//! use stratum_rtree::{BoxDistance, RTree};
//!
//! let mut tree: RTree<2, &str> = RTree::new();
//! tree.insert([0.0, 0.0], [1.0, 1.0], "a").unwrap();
//! tree.insert([5.0, 5.0], [6.0, 6.0], "b").unwrap();
//! tree.insert([0.5, 0.5], [0.5, 0.5], "c").unwrap();
//! assert_eq!(tree.len(), 3);
//!
//! // Range query.
//! let mut hits = Vec::new();
//! tree.search([0.0, 0.0], [1.0, 1.0], |_, v| {
//!     hits.push(*v);
//!     true
//! });
//! hits.sort();
//! assert_eq!(hits, ["a", "c"]);
//!
//! // Removal matches both box and value.
//! assert!(tree.remove([5.0, 5.0], [6.0, 6.0], &"b"));
//! assert_eq!(tree.len(), 2);
//!
//! // Nearest first from the origin.
//! let order: Vec<_> = tree
//!     .nearby_iter(BoxDistance::point([0.0, 0.0]))
//!     .map(|(_, v, _)| *v)
//!     .collect();
//! assert_eq!(order, ["a", "c"]);
//! ```
//!
//! ## Distance algorithms
//!
//! [`RTree::nearby`] accepts any [`DistanceAlgorithm`], including plain closures
//! `Fn(&Bounds<D>) -> f64`. Ordering is exact when the score is monotonic: a box must never
//! score higher than a box nested inside it. [`BoxDistance`] (squared Euclidean distance
//! between boxes) satisfies this.
//!
//! ## Fan-out and splits
//!
//! Nodes hold between `min` and `max` entries ([`Fanout`], default 8 / 4). Overfull nodes
//! split with an SAH-like sweep: for a split point `k` along an axis sorted by box centre,
//! minimize `area(L_k) * k + area(R_k) * (n - k)`, breaking ties by margin. Underfull nodes
//! left behind by a removal are detached and their entries reinserted at their own height.
//!
//! ### Float semantics
//!
//! Boxes with NaN or inverted axes are rejected with [`Error::InvalidBounds`].
//! Query boxes with inverted or NaN axes match nothing.

#![no_std]

extern crate alloc;

pub mod error;
pub mod index;
pub mod nearby;
mod node;
pub mod tree;
pub mod types;

pub use error::Error;
pub use index::SpatialIndex;
pub use nearby::{BoxDistance, DistanceAlgorithm, Nearby};
pub use tree::{Fanout, Iter, NodeInfo, RTree};
pub use types::Bounds;
