//! Raster output for rendered icons.
//!
//! Feature-gated (`raster`): turns the engine's serialized markup into an
//! RGBA image for callers that want pixels rather than markup, e.g. preview
//! thumbnails or texture atlases.

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

use crate::descriptor::IconDescriptor;
use crate::props::{DimensionValue, RenderProperties};
use crate::render::serialize;

/// Rasterizes a rendered icon to fit within `size x size` pixels, preserving
/// aspect ratio (the larger dimension will be `size`).
///
/// Width/height overrides in `props` are replaced with the raw box values so
/// the parsed document carries pixel dimensions; every other property
/// (color, flips, rotation, alignment) applies as usual.
///
/// Returns `None` if the markup cannot be parsed or the pixmap cannot be
/// allocated.
pub fn rasterize(icon: &IconDescriptor, props: &RenderProperties, size: u32) -> Option<RgbaImage> {
    let mut props = props.clone();
    props.width = Some(DimensionValue::Auto);
    props.height = Some(DimensionValue::Auto);
    let svg = serialize(icon, &props, &[]);

    let tree = Tree::from_str(&svg, &Options::default()).ok()?;

    let svg_size = tree.size();
    let scale = (size as f32) / svg_size.width().max(svg_size.height());
    let width = (svg_size.width() * scale).ceil() as u32;
    let height = (svg_size.height() * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(width, height)?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    Some(pixmap_to_rgba_image(&pixmap))
}

/// Converts a tiny_skia pixmap (premultiplied alpha) to an `RgbaImage`.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let width = pixmap.width();
    let height = pixmap.height();
    let mut img = RgbaImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            if let Some(pixel) = pixmap.pixel(x, y) {
                let (r, g, b, a) =
                    unpremultiply(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha());
                img.put_pixel(x, y, Rgba([r, g, b, a]));
            }
        }
    }

    img
}

fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}
