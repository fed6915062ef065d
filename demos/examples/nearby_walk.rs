// Copyright 2025 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nearest-first traversal.
//!
//! Walk cities outward from a point, first with the built-in box distance and then with a
//! custom metric.
//!
//! Run:
//! - `cargo run -p stratum_demos --example nearby_walk`

use stratum_rtree::{Bounds, BoxDistance, Error, RTree};

const CITIES: [(&str, f64, f64); 8] = [
    ("Amsterdam", 4.90, 52.37),
    ("Berlin", 13.40, 52.52),
    ("Lisbon", -9.14, 38.72),
    ("Madrid", -3.70, 40.42),
    ("Paris", 2.35, 48.86),
    ("Rome", 12.50, 41.90),
    ("Vienna", 16.37, 48.21),
    ("Warsaw", 21.01, 52.23),
];

fn main() -> Result<(), Error> {
    colog::init();

    let mut tree: RTree<2, &str> = RTree::new();
    for (name, lon, lat) in CITIES {
        tree.insert([lon, lat], [lon, lat], name)?;
    }

    println!("three nearest to Brussels:");
    let mut seen = 0;
    tree.nearby(&BoxDistance::point([4.35, 50.85]), |_, name, d| {
        println!("  {name:<10} {:.2}", d.sqrt());
        seen += 1;
        seen < 3
    });

    // Any monotonic score works; here, distance east of the prime meridian only.
    let east = |b: &Bounds<2>| b.min[0].max(0.0);
    let order: Vec<_> = tree.nearby_iter(east).map(|(_, name, _)| *name).collect();
    println!("by longitude east of Greenwich: {order:?}");

    // Stop early: only the first city inside a region around Iberia.
    let iberia = Bounds::new([-10.0, 36.0], [3.0, 44.0])?;
    tree.nearby(&BoxDistance::new(iberia), |_, name, d| {
        println!("first hit near Iberia: {name} at {d}");
        false
    });
    Ok(())
}
