// Copyright 2025 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Map index geometry to pixels and emit SVG elements.

use core::fmt::{self, Write};

use kurbo::{Affine, Point, Rect, Shape};
use stratum_rtree::{Bounds, SpatialIndex};

use crate::types::{DEPTH_PALETTE, ITEM_COLOR, LEAF_COLOR, Layers, SvgOptions};

/// Rects are exact polylines, so any tolerance works.
const PATH_TOLERANCE: f64 = 0.1;

/// Render `index` to a standalone SVG document.
pub fn render<V, I>(index: &I, options: &SvgOptions) -> String
where
    I: SpatialIndex<2, V> + ?Sized,
{
    let mut out = String::new();
    // Writing into a `String` cannot fail.
    let _ = write_svg(&mut out, index, options);
    out
}

/// Stream the SVG document for `index` into `out`.
pub fn write_svg<V, I, W>(out: &mut W, index: &I, options: &SvgOptions) -> fmt::Result
where
    I: SpatialIndex<2, V> + ?Sized,
    W: Write,
{
    let Some(world) = index.bounds() else {
        let side = options.margin * 2.0;
        write_header(out, options.width.max(side), side)?;
        return out.write_str("</svg>\n");
    };
    let world = to_rect(&world);
    let (to_px, height) = world_to_pixels(world, options);
    write_header(out, options.width, height)?;

    let mut result = Ok(());
    let mut nodes = 0_usize;
    let want_nodes = options.layers.intersects(Layers::BRANCHES | Layers::LEAVES);
    if want_nodes {
        index.visit_nodes(&mut |info| {
            let color = match (info.leaf, options.layers) {
                (true, layers) if layers.contains(Layers::LEAVES) => LEAF_COLOR,
                (false, layers) if layers.contains(Layers::BRANCHES) => {
                    DEPTH_PALETTE[info.depth % DEPTH_PALETTE.len()]
                }
                _ => return true,
            };
            nodes += 1;
            let rect = to_px.transform_rect_bbox(to_rect(&info.bounds));
            result = write_outline(out, rect, color, options.stroke_width);
            result.is_ok()
        });
        result?;
    }

    let mut items = 0_usize;
    if options.layers.contains(Layers::ITEMS) {
        index.scan(&mut |bounds, _| {
            items += 1;
            let rect = if bounds.is_point() {
                let center = to_px * Point::new(bounds.min[0], bounds.min[1]);
                Rect::from_center_size(center, (options.point_size, options.point_size))
            } else {
                to_px.transform_rect_bbox(to_rect(bounds))
            };
            result = write_fill(out, rect, ITEM_COLOR);
            result.is_ok()
        });
        result?;
    }

    log::debug!("rendered {nodes} node outlines and {items} items");
    out.write_str("</svg>\n")
}

fn to_rect(b: &Bounds<2>) -> Rect {
    Rect::new(b.min[0], b.min[1], b.max[0], b.max[1])
}

/// Transform from world space into the pixel frame, plus the document height.
fn world_to_pixels(world: Rect, options: &SvgOptions) -> (Affine, f64) {
    let inner = (options.width - 2.0 * options.margin).max(1.0);
    let scale = if world.width() > 0.0 {
        inner / world.width()
    } else if world.height() > 0.0 {
        inner / world.height()
    } else {
        1.0
    };
    let height = world.height() * scale + 2.0 * options.margin;
    let flip = if options.flip_y {
        // Mirror within the world box so it keeps its extent.
        Affine::new([1.0, 0.0, 0.0, -1.0, 0.0, world.y0 + world.y1])
    } else {
        Affine::IDENTITY
    };
    let to_px = Affine::translate((options.margin, options.margin))
        * Affine::scale(scale)
        * Affine::translate((-world.x0, -world.y0))
        * flip;
    (to_px, height)
}

fn write_header<W: Write>(out: &mut W, width: f64, height: f64) -> fmt::Result {
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    )
}

fn write_outline<W: Write>(out: &mut W, rect: Rect, color: &str, stroke_width: f64) -> fmt::Result {
    writeln!(
        out,
        r#"<path d="{}" fill="none" stroke="{color}" stroke-width="{stroke_width}"/>"#,
        rect.to_path(PATH_TOLERANCE).to_svg()
    )
}

fn write_fill<W: Write>(out: &mut W, rect: Rect, color: &str) -> fmt::Result {
    writeln!(
        out,
        r#"<path d="{}" fill="{color}" fill-opacity="0.5" stroke="none"/>"#,
        rect.to_path(PATH_TOLERANCE).to_svg()
    )
}
