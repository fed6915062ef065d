// Copyright 2025 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendering options: layer selection and output geometry.

bitflags::bitflags! {
    /// Which parts of an index to draw.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Layers: u8 {
        /// Outlines of branch nodes, coloured by depth.
        const BRANCHES = 0b0000_0001;
        /// Outlines of leaf nodes.
        const LEAVES   = 0b0000_0010;
        /// The stored items themselves. Points are drawn as small squares.
        const ITEMS    = 0b0000_0100;
    }
}

impl Default for Layers {
    fn default() -> Self {
        Self::all()
    }
}

/// Output configuration for [`render`](crate::render).
#[derive(Clone, Debug)]
pub struct SvgOptions {
    /// Layers to draw.
    pub layers: Layers,
    /// Document width in pixels. Height follows the index's aspect ratio.
    pub width: f64,
    /// Blank border around the drawing, in pixels.
    pub margin: f64,
    /// Outline width in pixels.
    pub stroke_width: f64,
    /// Side of the square drawn for point items, in pixels.
    pub point_size: f64,
    /// Draw larger y values higher up (map/plot convention) instead of lower down.
    pub flip_y: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            layers: Layers::default(),
            width: 1024.0,
            margin: 8.0,
            stroke_width: 1.0,
            point_size: 2.0,
            flip_y: true,
        }
    }
}

/// Stroke colours for branch outlines, cycled by depth.
pub(crate) const DEPTH_PALETTE: [&str; 6] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#9467bd", "#8c564b", "#e377c2",
];

/// Stroke colour for leaf outlines.
pub(crate) const LEAF_COLOR: &str = "#d62728";

/// Fill colour for items.
pub(crate) const ITEM_COLOR: &str = "#333333";
