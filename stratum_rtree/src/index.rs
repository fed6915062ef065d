// Copyright 2025 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Box-keyed index abstraction so drivers and renderers need not name a concrete tree.

use alloc::vec::Vec;

use crate::error::Error;
use crate::nearby::{BoxDistance, DistanceAlgorithm};
use crate::tree::{NodeInfo, RTree};
use crate::types::Bounds;

/// A store of values keyed by `D`-dimensional boxes.
pub trait SpatialIndex<const D: usize, V> {
    /// Insert `value` under `min..=max`.
    fn insert(&mut self, min: [f64; D], max: [f64; D], value: V) -> Result<(), Error>;

    /// Remove one matching `(box, value)` pair. Returns `false` if none was stored.
    fn remove(&mut self, min: [f64; D], max: [f64; D], value: &V) -> bool;

    /// Visit values whose box overlaps `min..=max` until `visit` returns `false`.
    /// An inverted or NaN query box matches nothing.
    fn search(&self, min: [f64; D], max: [f64; D], visit: &mut dyn FnMut(&Bounds<D>, &V) -> bool);

    /// Visit all values until `visit` returns `false`.
    fn scan(&self, visit: &mut dyn FnMut(&Bounds<D>, &V) -> bool);

    /// Visit values nearest-first by `algo` until `visit` returns `false`.
    fn nearby(
        &self,
        algo: &dyn DistanceAlgorithm<D>,
        visit: &mut dyn FnMut(&Bounds<D>, &V, f64) -> bool,
    );

    /// Walk the index's internal nodes, for diagnostics and rendering.
    fn visit_nodes(&self, visit: &mut dyn FnMut(NodeInfo<D>) -> bool);

    /// Number of stored values.
    fn len(&self) -> usize;

    /// Box around every stored value.
    fn bounds(&self) -> Option<Bounds<D>>;

    /// True if nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Nearest-first by squared distance to the box `min..=max`.
    fn nearby_boxes(
        &self,
        min: [f64; D],
        max: [f64; D],
        visit: &mut dyn FnMut(&Bounds<D>, &V, f64) -> bool,
    ) -> Result<(), Error> {
        let algo = BoxDistance::new(Bounds::new(min, max)?);
        self.nearby(&algo, visit);
        Ok(())
    }

    /// Clone every stored value out, in traversal order.
    fn collect_values(&self) -> Vec<V>
    where
        V: Clone,
    {
        let mut out = Vec::with_capacity(self.len());
        self.scan(&mut |_, v| {
            out.push(v.clone());
            true
        });
        out
    }
}

impl<const D: usize, V: PartialEq> SpatialIndex<D, V> for RTree<D, V> {
    fn insert(&mut self, min: [f64; D], max: [f64; D], value: V) -> Result<(), Error> {
        Self::insert(self, min, max, value)
    }

    fn remove(&mut self, min: [f64; D], max: [f64; D], value: &V) -> bool {
        Self::remove(self, min, max, value)
    }

    fn search(&self, min: [f64; D], max: [f64; D], visit: &mut dyn FnMut(&Bounds<D>, &V) -> bool) {
        Self::search(self, min, max, visit);
    }

    fn scan(&self, visit: &mut dyn FnMut(&Bounds<D>, &V) -> bool) {
        Self::scan(self, visit);
    }

    fn nearby(
        &self,
        algo: &dyn DistanceAlgorithm<D>,
        visit: &mut dyn FnMut(&Bounds<D>, &V, f64) -> bool,
    ) {
        Self::nearby(self, algo, visit);
    }

    fn visit_nodes(&self, visit: &mut dyn FnMut(NodeInfo<D>) -> bool) {
        Self::visit_nodes(self, visit);
    }

    fn len(&self) -> usize {
        Self::len(self)
    }

    fn bounds(&self) -> Option<Bounds<D>> {
        Self::bounds(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::boxed::Box;
    use alloc::vec;

    fn fill(index: &mut dyn SpatialIndex<2, u32>) {
        for i in 0..40 {
            let x = f64::from(i);
            index.insert([x, x], [x + 1.0, x + 1.0], i).unwrap();
        }
    }

    #[test]
    fn drives_tree_through_trait_object() {
        let mut index: Box<dyn SpatialIndex<2, u32>> = Box::new(RTree::<2, u32>::new());
        fill(index.as_mut());
        assert_eq!(index.len(), 40);
        assert!(!index.is_empty());

        let mut hits = Vec::new();
        index.search([10.5, 10.5], [12.5, 12.5], &mut |_, v| {
            hits.push(*v);
            true
        });
        hits.sort_unstable();
        assert_eq!(hits, vec![10, 11, 12]);

        let mut inverted = 0;
        index.search([12.0, 12.0], [11.0, 11.0], &mut |_, _| {
            inverted += 1;
            true
        });
        assert_eq!(inverted, 0);

        assert!(index.remove([10.0, 10.0], [11.0, 11.0], &10));
        assert!(!index.remove([10.0, 10.0], [11.0, 11.0], &10));
        assert_eq!(index.len(), 39);

        let mut values = index.collect_values();
        values.sort_unstable();
        assert_eq!(values.len(), 39);
        assert!(!values.contains(&10));
    }

    #[test]
    fn nearby_boxes_uses_box_distance() {
        let mut tree = RTree::<2, u32>::new();
        fill(&mut tree);
        let index: &dyn SpatialIndex<2, u32> = &tree;
        let mut order = Vec::new();
        index
            .nearby_boxes([30.2, 30.2], [30.4, 30.4], &mut |_, v, _| {
                order.push(*v);
                order.len() < 3
            })
            .unwrap();
        assert_eq!(order[0], 30);
        assert_eq!(order.len(), 3);
        assert!(order[1..].contains(&29) && order[1..].contains(&31));
        assert!(
            index
                .nearby_boxes([1.0, 1.0], [0.0, 0.0], &mut |_, _, _| true)
                .is_err()
        );
    }

    #[test]
    fn visit_nodes_through_trait() {
        let mut tree = RTree::<2, u32>::new();
        fill(&mut tree);
        let index: &dyn SpatialIndex<2, u32> = &tree;
        let mut nodes = 0;
        index.visit_nodes(&mut |_| {
            nodes += 1;
            true
        });
        assert!(nodes > 1);
        assert_eq!(index.bounds(), tree.bounds());
    }
}
