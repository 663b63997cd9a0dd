//! glyphforge: declarative SVG icon rendering engine
//!
//! This crate turns a declarative icon descriptor (a bounding box, an opaque
//! markup body, and default transform state) plus caller-supplied overrides
//! (size, color, flip, rotation, alignment, inline placement) into fully
//! resolved markup attributes, inline style declarations, and a transformed
//! body ready to embed in a document.
//!
//! # Example
//!
//! ```
//! use glyphforge::{IconDescriptor, RenderProperties, render, serialize};
//!
//! let icon = IconDescriptor::new(r#"<path d="M2 2h12v12z" fill="currentColor"/>"#)
//!     .with_size(16.0, 16.0);
//!
//! // Structured output for a binding layer
//! let result = render(&icon, &RenderProperties::new().with_height(24.0));
//! assert_eq!(result.attributes["viewBox"], "0 0 16 16");
//! assert_eq!(result.attributes["height"], "24");
//!
//! // Or a self-contained markup string
//! let svg = serialize(
//!     &icon,
//!     &RenderProperties::new().with_color("#aa0000").with_flip("horizontal"),
//!     &[],
//! );
//! assert!(svg.starts_with("<svg"));
//! ```
//!
//! # Stringly interfaces
//!
//! Upstream layers that receive flat string attributes (query parameters,
//! element props) can classify them with [`split_attributes`]: engine
//! properties become a typed [`RenderProperties`], everything else passes
//! through for the caller to copy onto the rendered element.
//!
//! # Collections
//!
//! The [`export`] module converts bulk icon collection documents into
//! per-icon descriptor modules; the `cli` feature adds the `glyphforge`
//! binary wrapping it. The `raster` feature adds [`rasterize`] for callers
//! that want pixels instead of markup.

mod align;
mod body;
mod descriptor;
mod dimension;
pub mod export;
mod props;
mod render;
mod transform;

#[cfg(feature = "raster")]
mod raster;

pub use align::{Alignment, HorizontalAlign, VerticalAlign};
pub use body::{replace_ids, transform_body};
pub use descriptor::{IconDescriptor, NormalizedDescriptor, normalize};
pub use dimension::{
    DEFAULT_PRECISION, ResolvedDimensions, derive_dimension, resolve_dimensions, scale_numeric,
    scale_text,
};
pub use export::{ExportError, IconAlias, IconCollection, export_collection, export_file};
pub use props::{
    DimensionValue, RenderProperties, RotationValue, is_render_property, split_attributes,
};
pub use render::{RenderResult, render, render_normalized, serialize};
pub use transform::{BoundingBox, TransformState, resolve_transform};

#[cfg(feature = "raster")]
pub use raster::rasterize;
