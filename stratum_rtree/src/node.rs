// Copyright 2025 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree nodes, their entries, and the overflow split.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::types::{Bounds, union_all};

/// A caller value and the box it was inserted with.
#[derive(Debug)]
pub(crate) struct Item<const D: usize, V> {
    pub(crate) bounds: Bounds<D>,
    pub(crate) value: V,
}

/// An owned subtree and the tight box around everything in it.
#[derive(Debug)]
pub(crate) struct Child<const D: usize, V> {
    pub(crate) bounds: Bounds<D>,
    pub(crate) node: Box<Node<D, V>>,
}

/// Leaf nodes hold items; branch nodes hold subtrees one level down.
#[derive(Debug)]
pub(crate) enum Node<const D: usize, V> {
    Leaf(Vec<Item<D, V>>),
    Branch(Vec<Child<D, V>>),
}

/// Anything with a box that a node can hold.
pub(crate) trait Entry<const D: usize> {
    fn bounds(&self) -> &Bounds<D>;
}

impl<const D: usize, V> Entry<D> for Item<D, V> {
    fn bounds(&self) -> &Bounds<D> {
        &self.bounds
    }
}

impl<const D: usize, V> Entry<D> for Child<D, V> {
    fn bounds(&self) -> &Bounds<D> {
        &self.bounds
    }
}

impl<const D: usize, V> Node<D, V> {
    pub(crate) const fn empty_leaf() -> Self {
        Self::Leaf(Vec::new())
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Self::Leaf(items) => items.len(),
            Self::Branch(children) => children.len(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tight box around all entries, `None` for an empty node.
    pub(crate) fn bounds(&self) -> Option<Bounds<D>> {
        match self {
            Self::Leaf(items) => union_all(items.iter().map(|i| &i.bounds)),
            Self::Branch(children) => union_all(children.iter().map(|c| &c.bounds)),
        }
    }

    /// Wrap this node as a child entry. Empty nodes have no box and yield `None`.
    pub(crate) fn into_child(self) -> Option<Child<D, V>> {
        let bounds = self.bounds()?;
        Some(Child {
            bounds,
            node: Box::new(self),
        })
    }
}

/// Index of the child needing the least area enlargement to absorb `bbox`.
///
/// Ties go to the smaller resulting area, then to the earlier child.
pub(crate) fn choose_subtree<const D: usize, V>(children: &[Child<D, V>], bbox: &Bounds<D>) -> usize {
    let mut best_idx = 0_usize;
    let mut best_cost: Option<(f64, f64)> = None;
    for (i, c) in children.iter().enumerate() {
        let enlarged = c.bounds.union(bbox).area();
        let cost = (enlarged - c.bounds.area(), enlarged);
        if best_cost.map(|bc| cost < bc).unwrap_or(true) {
            best_cost = Some(cost);
            best_idx = i;
        }
    }
    best_idx
}

/// SAH-like split of an overfull entry list.
///
/// For each axis the entries are stably sorted by box centre, prefix and suffix boxes are
/// accumulated, and the split point `k` minimizing `area(L_k) * k + area(R_k) * (n - k)`
/// wins. Equal costs fall back to the smaller combined margin, then the earlier axis and `k`.
/// Both halves keep at least `min_entries` entries.
pub(crate) fn split_entries<const D: usize, E: Entry<D>>(
    mut entries: Vec<E>,
    min_entries: usize,
) -> (Vec<E>, Vec<E>) {
    let n = entries.len();
    debug_assert!(
        n >= 2 * min_entries,
        "split needs room for two minimum-fill halves"
    );
    let mut order: Vec<usize> = Vec::with_capacity(n);
    let mut prefix: Vec<Bounds<D>> = Vec::with_capacity(n);
    let mut suffix: Vec<Bounds<D>> = Vec::with_capacity(n);
    // (cost, margin, axis, k)
    let mut best: Option<(f64, f64, usize, usize)> = None;

    for axis in 0..D {
        // Restart from input order so the final stable sort reproduces this permutation.
        order.clear();
        order.extend(0..n);
        order.sort_by(|&a, &b| {
            entries[a]
                .bounds()
                .center(axis)
                .total_cmp(&entries[b].bounds().center(axis))
        });

        prefix.clear();
        for &i in &order {
            let bb = *entries[i].bounds();
            let acc = prefix.last().map_or(bb, |prev| prev.union(&bb));
            prefix.push(acc);
        }
        suffix.clear();
        for &i in order.iter().rev() {
            let bb = *entries[i].bounds();
            let acc = suffix.last().map_or(bb, |prev| prev.union(&bb));
            suffix.push(acc);
        }
        suffix.reverse();

        for k in min_entries..=(n - min_entries) {
            let lb = &prefix[k - 1];
            let rb = &suffix[k];
            let cost = lb.area() * k as f64 + rb.area() * (n - k) as f64;
            let margin = lb.margin() + rb.margin();
            let better = match best {
                None => true,
                Some((bc, bm, _, _)) => cost < bc || (cost == bc && margin < bm),
            };
            if better {
                best = Some((cost, margin, axis, k));
            }
        }
    }

    let (axis, k) = match best {
        Some((_, _, axis, k)) => (axis, k),
        // Zero dimensions: nothing to sort by.
        None => (usize::MAX, n / 2),
    };
    if axis != usize::MAX {
        entries.sort_by(|a, b| a.bounds().center(axis).total_cmp(&b.bounds().center(axis)));
    }
    let right = entries.split_off(k);
    (entries, right)
}
