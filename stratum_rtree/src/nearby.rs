// Copyright 2025 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Best-first traversal ordered by a caller-supplied distance.
//!
//! The traversal keeps a min-heap of subtrees and items keyed by
//! [`DistanceAlgorithm::score`]. Popping a subtree pushes its entries; popping an item
//! yields it. Items therefore come out in non-decreasing score order, provided the score
//! is monotonic: a box never scores higher than any box nested inside it. A non-monotonic
//! score, NaN included, still visits every item, in no guaranteed order.

use alloc::collections::BinaryHeap;
use core::cmp::Ordering;
use core::fmt::Debug;

use crate::node::{Item, Node};
use crate::tree::RTree;
use crate::types::Bounds;

/// Distance from a query shape (captured by the implementor) to a candidate box.
///
/// Scores should be non-negative, and for `outer ⊇ inner`,
/// `score(outer) <= score(inner)` must hold for ordered delivery.
pub trait DistanceAlgorithm<const D: usize> {
    /// Score a candidate box; lower is nearer.
    fn score(&self, bounds: &Bounds<D>) -> f64;
}

impl<const D: usize, F> DistanceAlgorithm<D> for F
where
    F: Fn(&Bounds<D>) -> f64,
{
    fn score(&self, bounds: &Bounds<D>) -> f64 {
        self(bounds)
    }
}

/// Squared Euclidean distance between a target box and each candidate.
///
/// Overlapping boxes score 0. This metric is monotonic, so it gives exact
/// nearest-first ordering.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoxDistance<const D: usize> {
    target: Bounds<D>,
}

impl<const D: usize> BoxDistance<D> {
    /// Measure from a box.
    pub const fn new(target: Bounds<D>) -> Self {
        Self { target }
    }

    /// Measure from a point.
    pub const fn point(p: [f64; D]) -> Self {
        Self {
            target: Bounds::point(p),
        }
    }

    /// The box distances are measured from.
    pub const fn target(&self) -> &Bounds<D> {
        &self.target
    }
}

impl<const D: usize> DistanceAlgorithm<D> for BoxDistance<D> {
    fn score(&self, bounds: &Bounds<D>) -> f64 {
        let mut dist = 0.0;
        for i in 0..D {
            let lo = bounds.min[i].max(self.target.min[i]);
            let hi = bounds.max[i].min(self.target.max[i]);
            let gap = lo - hi;
            if gap > 0.0 {
                dist += gap * gap;
            }
        }
        dist
    }
}

enum Candidate<'a, const D: usize, V> {
    Node(&'a Node<D, V>),
    Item(&'a Item<D, V>),
}

struct Queued<'a, const D: usize, V> {
    score: f64,
    seq: u64,
    candidate: Candidate<'a, D, V>,
}

impl<const D: usize, V> PartialEq for Queued<'_, D, V> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<const D: usize, V> Eq for Queued<'_, D, V> {}

impl<const D: usize, V> PartialOrd for Queued<'_, D, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const D: usize, V> Ord for Queued<'_, D, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the lowest score, oldest first on ties.
        other
            .score
            .total_cmp(&self.score)
            .then(other.seq.cmp(&self.seq))
    }
}

/// Lazy nearest-first iterator returned by [`RTree::nearby_iter`].
///
/// Yields `(bounds, value, score)` in non-decreasing score for monotonic algorithms.
pub struct Nearby<'a, const D: usize, V, A> {
    algo: A,
    heap: BinaryHeap<Queued<'a, D, V>>,
    seq: u64,
}

impl<'a, const D: usize, V, A: DistanceAlgorithm<D>> Nearby<'a, D, V, A> {
    fn new(root: &'a Node<D, V>, algo: A) -> Self {
        let mut this = Self {
            algo,
            heap: BinaryHeap::new(),
            seq: 0,
        };
        if let Some(bounds) = root.bounds() {
            let score = this.algo.score(&bounds);
            this.push(score, Candidate::Node(root));
        }
        this
    }

    fn push(&mut self, score: f64, candidate: Candidate<'a, D, V>) {
        self.heap.push(Queued {
            score,
            seq: self.seq,
            candidate,
        });
        self.seq += 1;
    }
}

impl<'a, const D: usize, V, A: DistanceAlgorithm<D>> Iterator for Nearby<'a, D, V, A> {
    type Item = (&'a Bounds<D>, &'a V, f64);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(Queued {
            score, candidate, ..
        }) = self.heap.pop()
        {
            match candidate {
                Candidate::Item(item) => return Some((&item.bounds, &item.value, score)),
                Candidate::Node(Node::Leaf(items)) => {
                    for item in items {
                        let s = self.algo.score(&item.bounds);
                        self.push(s, Candidate::Item(item));
                    }
                }
                Candidate::Node(Node::Branch(children)) => {
                    for child in children {
                        let s = self.algo.score(&child.bounds);
                        self.push(s, Candidate::Node(&*child.node));
                    }
                }
            }
        }
        None
    }
}

impl<const D: usize, V, A> Debug for Nearby<'_, D, V, A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Nearby")
            .field("queued", &self.heap.len())
            .finish_non_exhaustive()
    }
}

impl<const D: usize, V> RTree<D, V> {
    /// Iterate items nearest-first according to `algo`.
    pub fn nearby_iter<A: DistanceAlgorithm<D>>(&self, algo: A) -> Nearby<'_, D, V, A> {
        Nearby::new(self.root(), algo)
    }

    /// Visit items nearest-first according to `algo`, passing each item's score.
    /// Return `false` from `visit` to stop.
    pub fn nearby<A, F>(&self, algo: &A, mut visit: F)
    where
        A: DistanceAlgorithm<D> + ?Sized,
        F: FnMut(&Bounds<D>, &V, f64) -> bool,
    {
        for (bounds, value, dist) in self.nearby_iter(|b: &Bounds<D>| algo.score(b)) {
            if !visit(bounds, value, dist) {
                break;
            }
        }
    }
}
