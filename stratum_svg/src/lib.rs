// Copyright 2025 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=stratum_svg --heading-base-level=0

//! Stratum SVG: debug pictures of a 2D spatial index.
//!
//! Renders any [`SpatialIndex<2, V>`](stratum_rtree::SpatialIndex) to a standalone SVG
//! document: node outlines coloured by depth, leaf outlines, and the stored items.
//! Useful for eyeballing split quality and for bug reports.
//!
//! Geometry goes through [Kurbo](kurbo): world boxes become [`kurbo::Rect`]s, are mapped into
//! the pixel frame by a single [`kurbo::Affine`], and are written as SVG path data.
//!
//! ```rust
//! use stratum_rtree::RTree;
//! use stratum_svg::{Layers, SvgOptions, render};
//!
//! let mut tree: RTree<2, u32> = RTree::new();
//! for i in 0..50 {
//!     let x = f64::from(i % 10);
//!     let y = f64::from(i / 10);
//!     tree.insert([x, y], [x + 0.5, y + 0.5], i).unwrap();
//! }
//!
//! let svg = render(&tree, &SvgOptions {
//!     layers: Layers::LEAVES | Layers::ITEMS,
//!     ..SvgOptions::default()
//! });
//! assert!(svg.starts_with("<svg"));
//! assert_eq!(svg.matches("fill-opacity").count(), 50);
//! ```
//!
//! With [`SvgOptions::flip_y`] (the default) larger `y` is drawn higher, as on a map.

mod render;
mod types;

pub use render::{render, write_svg};
pub use types::{Layers, SvgOptions};
