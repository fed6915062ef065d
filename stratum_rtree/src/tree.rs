// Copyright 2025 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dynamic R-tree: insertion with overflow splits, deletion with condensation,
//! and pruned range traversal.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::error::Error;
use crate::node::{Child, Item, Node, choose_subtree, split_entries};
use crate::types::Bounds;

/// Fan-out limits for tree nodes.
///
/// Every node except the root keeps between `min_entries` and `max_entries` entries.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Fanout {
    max_entries: usize,
    min_entries: usize,
}

impl Fanout {
    /// Validate and build fan-out limits. Requires `1 <= min_entries <= max_entries / 2`.
    pub const fn new(max_entries: usize, min_entries: usize) -> Result<Self, Error> {
        if min_entries == 0 || min_entries > max_entries / 2 {
            return Err(Error::InvalidFanout {
                min: min_entries,
                max: max_entries,
            });
        }
        Ok(Self {
            max_entries,
            min_entries,
        })
    }

    /// Maximum entries per node before it splits.
    pub const fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Minimum entries per non-root node before it is condensed.
    pub const fn min_entries(&self) -> usize {
        self.min_entries
    }
}

impl Default for Fanout {
    fn default() -> Self {
        Self {
            max_entries: 8,
            min_entries: 4,
        }
    }
}

/// One node as reported by [`RTree::visit_nodes`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NodeInfo<const D: usize> {
    /// Tight box around the node's entries.
    pub bounds: Bounds<D>,
    /// Distance from the root; the root is depth 0.
    pub depth: usize,
    /// Whether the node holds items rather than subtrees.
    pub leaf: bool,
    /// Number of entries in the node.
    pub entries: usize,
}

/// Entry detached from an underfull node, waiting to be reinserted.
enum Orphan<const D: usize, V> {
    Item(Item<D, V>),
    /// A subtree that must hang from a node at `level` (leaves are level 0).
    Child { child: Child<D, V>, level: usize },
}

impl<const D: usize, V> Orphan<D, V> {
    fn bounds(&self) -> Bounds<D> {
        match self {
            Self::Item(item) => item.bounds,
            Self::Child { child, .. } => child.bounds,
        }
    }

    fn level(&self) -> usize {
        match self {
            Self::Item(_) => 0,
            Self::Child { level, .. } => *level,
        }
    }
}

/// Dynamic R-tree mapping `D`-dimensional boxes to values.
///
/// Values are opaque to the tree; only their boxes drive the structure. The same value may
/// be stored many times, under the same or different boxes.
pub struct RTree<const D: usize, V> {
    root: Node<D, V>,
    len: usize,
    height: usize,
    fanout: Fanout,
}

impl<const D: usize, V> Default for RTree<D, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const D: usize, V> RTree<D, V> {
    /// Create an empty tree with the default fan-out (8 / 4).
    pub fn new() -> Self {
        Self::with_fanout(Fanout::default())
    }

    /// Create an empty tree with explicit fan-out limits.
    pub fn with_fanout(fanout: Fanout) -> Self {
        Self {
            root: Node::empty_leaf(),
            len: 0,
            height: 0,
            fanout,
        }
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no items are stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of branch levels above the leaves; 0 while the root is a leaf.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The fan-out limits this tree was built with.
    pub fn fanout(&self) -> Fanout {
        self.fanout
    }

    /// Box around every stored item, `None` when empty.
    pub fn bounds(&self) -> Option<Bounds<D>> {
        self.root.bounds()
    }

    /// Drop all items.
    pub fn clear(&mut self) {
        self.root = Node::empty_leaf();
        self.len = 0;
        self.height = 0;
    }

    /// Insert `value` under the box `min..=max`.
    ///
    /// Inverted or NaN boxes are rejected and leave the tree untouched.
    pub fn insert(&mut self, min: [f64; D], max: [f64; D], value: V) -> Result<(), Error> {
        let bounds = Bounds::new(min, max)?;
        self.insert_orphan(Orphan::Item(Item { bounds, value }));
        self.len += 1;
        Ok(())
    }

    /// Visit items whose box overlaps `min..=max`. Return `false` from `visit` to stop early.
    ///
    /// A query box with inverted or NaN axes matches nothing.
    pub fn search<F>(&self, min: [f64; D], max: [f64; D], mut visit: F)
    where
        F: FnMut(&Bounds<D>, &V) -> bool,
    {
        let Ok(query) = Bounds::new(min, max) else {
            return;
        };
        if self.root.is_empty() {
            return;
        }
        let _ = search_node(&self.root, &query, &mut visit);
    }

    /// Visit every item. Return `false` from `visit` to stop early.
    pub fn scan<F>(&self, mut visit: F)
    where
        F: FnMut(&Bounds<D>, &V) -> bool,
    {
        let _ = scan_node(&self.root, &mut visit);
    }

    /// Iterate over all items in no particular order.
    pub fn iter(&self) -> Iter<'_, D, V> {
        Iter {
            stack: vec![&self.root],
            items: core::slice::Iter::default(),
        }
    }

    /// Walk every node pre-order. Return `false` from `visit` to stop early.
    pub fn visit_nodes<F>(&self, mut visit: F)
    where
        F: FnMut(NodeInfo<D>) -> bool,
    {
        let Some(bounds) = self.root.bounds() else {
            return;
        };
        let _ = walk_nodes(&self.root, bounds, 0, &mut visit);
    }

    pub(crate) fn root(&self) -> &Node<D, V> {
        &self.root
    }

    fn insert_orphan(&mut self, orphan: Orphan<D, V>) {
        if self.root.is_empty() {
            // Restart the tree at whatever height the orphan needs.
            match orphan {
                Orphan::Item(item) => {
                    self.root = Node::Leaf(vec![item]);
                    self.height = 0;
                }
                Orphan::Child { child, level } => {
                    self.root = Node::Branch(vec![child]);
                    self.height = level;
                }
            }
            return;
        }
        debug_assert!(orphan.level() <= self.height, "orphan above the root level");
        let Some(sibling) = insert_at(&mut self.root, self.height, orphan, self.fanout) else {
            return;
        };
        let old_root = core::mem::replace(&mut self.root, Node::empty_leaf());
        let mut children = Vec::with_capacity(2);
        children.extend(old_root.into_child());
        children.push(sibling);
        self.root = Node::Branch(children);
        self.height += 1;
        log::trace!("root split, height now {}", self.height);
    }
}

impl<const D: usize, V: PartialEq> RTree<D, V> {
    /// Remove one item equal to `value` stored under exactly `min..=max`.
    ///
    /// Returns `false`, leaving the tree unchanged, if no such item exists.
    pub fn remove(&mut self, min: [f64; D], max: [f64; D], value: &V) -> bool {
        let target = Bounds { min, max };
        let mut path = Vec::with_capacity(self.height + 1);
        if self.root.is_empty() || !find_item(&self.root, &target, value, &mut path) {
            return false;
        }
        let Some((item_idx, branch_path)) = path.split_last() else {
            return false;
        };

        if let Node::Leaf(items) = node_at_mut(&mut self.root, branch_path) {
            let _ = items.remove(*item_idx);
        }
        self.len -= 1;

        let orphans = self.condense(branch_path);
        if !orphans.is_empty() {
            log::debug!("condensed path, reinserting {} entries", orphans.len());
        }
        for orphan in orphans {
            self.insert_orphan(orphan);
        }

        while let Node::Branch(children) = &mut self.root
            && children.len() == 1
        {
            let Some(only) = children.pop() else { break };
            self.root = *only.node;
            self.height -= 1;
            log::debug!("root collapsed, height now {}", self.height);
        }
        if self.root.is_empty() {
            self.height = 0;
            self.root = Node::empty_leaf();
        }
        true
    }

    /// Walk the removal path from the leaf back to the root, detaching underfull nodes and
    /// tightening the boxes of the rest. Returns the entries of detached nodes.
    fn condense(&mut self, branch_path: &[usize]) -> Vec<Orphan<D, V>> {
        let mut orphans = Vec::new();
        for depth in (1..=branch_path.len()).rev() {
            let level = self.height - depth;
            let idx = branch_path[depth - 1];
            let Node::Branch(children) = node_at_mut(&mut self.root, &branch_path[..depth - 1])
            else {
                continue;
            };
            if children[idx].node.len() < self.fanout.min_entries {
                let detached = children.remove(idx);
                match *detached.node {
                    Node::Leaf(items) => orphans.extend(items.into_iter().map(Orphan::Item)),
                    Node::Branch(grandchildren) => orphans.extend(
                        grandchildren
                            .into_iter()
                            .map(|child| Orphan::Child { child, level }),
                    ),
                }
            } else if let Some(bounds) = children[idx].node.bounds() {
                children[idx].bounds = bounds;
            }
        }
        orphans
    }
}

impl<const D: usize, V> Debug for RTree<D, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RTree")
            .field("len", &self.len)
            .field("height", &self.height)
            .field("fanout", &self.fanout)
            .field("bounds", &self.bounds())
            .finish_non_exhaustive()
    }
}

/// Borrowing iterator over every item, returned by [`RTree::iter`].
pub struct Iter<'a, const D: usize, V> {
    stack: Vec<&'a Node<D, V>>,
    items: core::slice::Iter<'a, Item<D, V>>,
}

impl<'a, const D: usize, V> Iterator for Iter<'a, D, V> {
    type Item = (&'a Bounds<D>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.items.next() {
                return Some((&item.bounds, &item.value));
            }
            match self.stack.pop()? {
                Node::Leaf(items) => self.items = items.iter(),
                Node::Branch(children) => self.stack.extend(children.iter().map(|c| &*c.node)),
            }
        }
    }
}

impl<const D: usize, V> Debug for Iter<'_, D, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Iter")
            .field("pending_nodes", &self.stack.len())
            .field("pending_items", &self.items.len())
            .finish()
    }
}

impl<'a, const D: usize, V> IntoIterator for &'a RTree<D, V> {
    type Item = (&'a Bounds<D>, &'a V);
    type IntoIter = Iter<'a, D, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Insert `orphan` below `node` (which sits at `level`). Returns the new right sibling
/// when `node` overflowed and was split.
fn insert_at<const D: usize, V>(
    node: &mut Node<D, V>,
    level: usize,
    orphan: Orphan<D, V>,
    fanout: Fanout,
) -> Option<Child<D, V>> {
    let bbox = orphan.bounds();
    match (node, orphan) {
        (Node::Leaf(items), Orphan::Item(item)) => {
            items.push(item);
            if items.len() <= fanout.max_entries {
                return None;
            }
            let (left, right) = split_entries(core::mem::take(items), fanout.min_entries);
            log::trace!("leaf split {} / {}", left.len(), right.len());
            *items = left;
            Node::Leaf(right).into_child()
        }
        (Node::Branch(children), Orphan::Child { child, level: target }) if target == level => {
            children.push(child);
            split_branch(children, fanout)
        }
        (Node::Branch(children), orphan) => {
            let idx = choose_subtree(children, &bbox);
            let split = insert_at(&mut children[idx].node, level - 1, orphan, fanout);
            match split {
                None => {
                    children[idx].bounds = children[idx].bounds.union(&bbox);
                    None
                }
                Some(sibling) => {
                    if let Some(bounds) = children[idx].node.bounds() {
                        children[idx].bounds = bounds;
                    }
                    children.insert(idx + 1, sibling);
                    split_branch(children, fanout)
                }
            }
        }
        (Node::Leaf(_), Orphan::Child { .. }) => {
            unreachable!("subtree orphans never descend to the leaf level")
        }
    }
}

fn split_branch<const D: usize, V>(
    children: &mut Vec<Child<D, V>>,
    fanout: Fanout,
) -> Option<Child<D, V>> {
    if children.len() <= fanout.max_entries {
        return None;
    }
    let (left, right) = split_entries(core::mem::take(children), fanout.min_entries);
    log::trace!("branch split {} / {}", left.len(), right.len());
    *children = left;
    Node::Branch(right).into_child()
}

/// Depth-first search for an item matching box and value, recording child indices.
/// On success `path` holds the branch indices from the root followed by the item index.
fn find_item<const D: usize, V: PartialEq>(
    node: &Node<D, V>,
    target: &Bounds<D>,
    value: &V,
    path: &mut Vec<usize>,
) -> bool {
    match node {
        Node::Leaf(items) => {
            if let Some(i) = items
                .iter()
                .position(|item| item.bounds == *target && item.value == *value)
            {
                path.push(i);
                return true;
            }
            false
        }
        Node::Branch(children) => {
            for (i, c) in children.iter().enumerate() {
                if !c.bounds.contains(target) {
                    continue;
                }
                path.push(i);
                if find_item(&c.node, target, value, path) {
                    return true;
                }
                let _ = path.pop();
            }
            false
        }
    }
}

/// Follow `path` (branch indices) down from `node`.
fn node_at_mut<'a, const D: usize, V>(
    mut node: &'a mut Node<D, V>,
    path: &[usize],
) -> &'a mut Node<D, V> {
    for &i in path {
        node = match node {
            Node::Branch(children) => &mut children[i].node,
            Node::Leaf(_) => unreachable!("removal path runs through branches only"),
        };
    }
    node
}

/// Returns `false` if the visitor asked to stop.
fn search_node<const D: usize, V, F>(node: &Node<D, V>, query: &Bounds<D>, visit: &mut F) -> bool
where
    F: FnMut(&Bounds<D>, &V) -> bool,
{
    match node {
        Node::Leaf(items) => items
            .iter()
            .filter(|item| item.bounds.overlaps(query))
            .all(|item| visit(&item.bounds, &item.value)),
        Node::Branch(children) => children
            .iter()
            .filter(|c| c.bounds.overlaps(query))
            .all(|c| search_node(&c.node, query, visit)),
    }
}

fn scan_node<const D: usize, V, F>(node: &Node<D, V>, visit: &mut F) -> bool
where
    F: FnMut(&Bounds<D>, &V) -> bool,
{
    match node {
        Node::Leaf(items) => items.iter().all(|item| visit(&item.bounds, &item.value)),
        Node::Branch(children) => children.iter().all(|c| scan_node(&c.node, visit)),
    }
}

fn walk_nodes<const D: usize, V, F>(
    node: &Node<D, V>,
    bounds: Bounds<D>,
    depth: usize,
    visit: &mut F,
) -> bool
where
    F: FnMut(NodeInfo<D>) -> bool,
{
    let info = NodeInfo {
        bounds,
        depth,
        leaf: matches!(node, Node::Leaf(_)),
        entries: node.len(),
    };
    if !visit(info) {
        return false;
    }
    match node {
        Node::Leaf(_) => true,
        Node::Branch(children) => children
            .iter()
            .all(|c| walk_nodes(&c.node, c.bounds, depth + 1, visit)),
    }
}
