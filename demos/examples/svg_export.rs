// Copyright 2025 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG export.
//!
//! Fill a tree with random boxes and points, then write a picture of its nodes.
//!
//! Run:
//! - `cargo run -p stratum_demos --example svg_export -- out.svg`

use std::error::Error;

use stratum_rtree::RTree;
use stratum_svg::{SvgOptions, render};

/// Small xorshift so the picture is reproducible.
struct Rng(u64);

impl Rng {
    fn next_f64(&mut self) -> f64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        ((x >> 11) as f64) / ((1u64 << 53) as f64)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    colog::basic_builder()
        .filter_level(log::LevelFilter::Debug)
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "rtree.svg".into());
    let mut rng = Rng(0x5EED_0F57_A7A7);
    let mut tree: RTree<2, usize> = RTree::new();
    for i in 0..2_000 {
        let lon = rng.next_f64() * 360.0 - 180.0;
        let lat = rng.next_f64() * 180.0 - 90.0;
        if i % 2 == 0 {
            tree.insert([lon, lat], [lon, lat], i)?;
        } else {
            let w = rng.next_f64() * 3.0;
            let h = rng.next_f64() * 3.0;
            tree.insert([lon, lat], [lon + w, lat + h], i)?;
        }
    }

    let svg = render(&tree, &SvgOptions::default());
    std::fs::write(&path, svg)?;
    log::info!("wrote {} items at height {} to {path}", tree.len(), tree.height());
    Ok(())
}
