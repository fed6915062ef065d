// Copyright 2025 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! R-tree basics.
//!
//! Insert a few boxes, run a range query, remove one, and inspect the tree shape.
//!
//! Run:
//! - `cargo run -p stratum_demos --example rtree_basics`

use stratum_rtree::{Error, Fanout, RTree};

fn main() -> Result<(), Error> {
    colog::basic_builder()
        .filter_level(log::LevelFilter::Debug)
        .init();

    // Small fan-out so a few dozen boxes already build a multi-level tree
    let mut tree: RTree<2, String> = RTree::with_fanout(Fanout::new(4, 2)?);
    for i in 0..40 {
        let x = f64::from(i % 8) * 10.0;
        let y = f64::from(i / 8) * 10.0;
        tree.insert([x, y], [x + 6.0, y + 6.0], format!("cell-{i}"))?;
    }
    println!("{} items, height {}", tree.len(), tree.height());

    let mut hits = Vec::new();
    tree.search([15.0, 15.0], [25.0, 25.0], |_, v| {
        hits.push(v.clone());
        true
    });
    hits.sort();
    println!("window hits: {hits:?}");

    assert!(tree.remove([10.0, 10.0], [16.0, 16.0], &"cell-9".to_string()));
    println!("after remove: {} items, height {}", tree.len(), tree.height());

    tree.visit_nodes(|info| {
        let kind = if info.leaf { "leaf" } else { "branch" };
        println!(
            "{:indent$}{kind} {:?}..{:?} ({} entries)",
            "",
            info.bounds.min,
            info.bounds.max,
            info.entries,
            indent = info.depth * 2
        );
        true
    });

    // Degenerate boxes are rejected up front
    let err = tree.insert([1.0, 1.0], [0.0, 2.0], "bad".into());
    println!("inverted box: {}", err.unwrap_err());
    Ok(())
}
