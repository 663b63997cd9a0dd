//! Render orchestration: descriptor + properties in, resolved output out.
//!
//! [`render`] sequences the engine components — normalization, transform
//! resolution, dimension calculation, alignment, body rewriting — into a
//! single [`RenderResult`]. [`serialize`] builds a self-contained `<svg>`
//! string on top of it for direct embedding or file writing.

use indexmap::IndexMap;
use serde::Serialize;

use crate::align::Alignment;
use crate::body::transform_body;
use crate::descriptor::{IconDescriptor, NormalizedDescriptor, normalize};
use crate::dimension::resolve_dimensions;
use crate::props::RenderProperties;
use crate::transform::resolve_transform;

// ============================================================================
// RenderResult
// ============================================================================

/// Fully resolved rendering output.
///
/// `attributes` and `style` preserve insertion order and have unique keys;
/// a binding layer copies them onto its rendered element and injects `body`
/// as the element content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderResult {
    /// Element attributes: `width`/`height` (when not omitted),
    /// `preserveAspectRatio`, `viewBox`.
    pub attributes: IndexMap<String, String>,

    /// Inline style declarations (`vertical-align` for inline icons).
    pub style: IndexMap<String, String>,

    /// Transformed markup body.
    pub body: String,
}

// ============================================================================
// render
// ============================================================================

/// Resolves a descriptor and per-call properties into a [`RenderResult`].
///
/// # Example
///
/// ```
/// use glyphforge::{IconDescriptor, RenderProperties, render};
///
/// let icon = IconDescriptor::new(r#"<path d="M0 0h16v16z" fill="currentColor"/>"#);
/// let result = render(&icon, &RenderProperties::new().with_color("#900"));
///
/// assert_eq!(result.attributes["viewBox"], "0 0 16 16");
/// assert_eq!(result.attributes["height"], "1em");
/// assert!(result.body.contains("#900"));
/// ```
pub fn render(icon: &IconDescriptor, props: &RenderProperties) -> RenderResult {
    render_normalized(&normalize(icon), props)
}

/// [`render`] for a descriptor that has already been normalized.
pub fn render_normalized(icon: &NormalizedDescriptor, props: &RenderProperties) -> RenderResult {
    let (_state, bbox, operations) = resolve_transform(icon, props);
    let dimensions = resolve_dimensions(&bbox, props.width.as_ref(), props.height.as_ref());

    let mut attributes = IndexMap::new();
    if let Some(width) = dimensions.width {
        attributes.insert("width".to_string(), width);
    }
    if let Some(height) = dimensions.height {
        attributes.insert("height".to_string(), height);
    }

    let mut style = IndexMap::new();
    if props.inline == Some(true) && icon.vertical_align != 0.0 {
        style.insert(
            "vertical-align".to_string(),
            format!("{}em", icon.vertical_align),
        );
    }

    let align = Alignment::parse(props.align.as_deref().unwrap_or(""));
    attributes.insert("preserveAspectRatio".to_string(), align.directive());
    attributes.insert("viewBox".to_string(), bbox.view_box());

    let body = transform_body(
        &icon.body,
        props.color.as_deref(),
        &operations,
        props.box_marker == Some(true),
        &bbox,
    );

    RenderResult {
        attributes,
        style,
        body,
    }
}

// ============================================================================
// serialize
// ============================================================================

/// Fixed no-op rotation that works around a sub-pixel rendering artifact in
/// some renderers.
const SUBPIXEL_FIX: &str =
    "-ms-transform: rotate(360deg); -webkit-transform: rotate(360deg); transform: rotate(360deg);";

/// Renders and serializes into a self-contained `<svg>` markup string.
///
/// `extra_attributes` are emitted before the computed attributes; names and
/// values are written as given, so the caller is responsible for escaping
/// them.
pub fn serialize(
    icon: &IconDescriptor,
    props: &RenderProperties,
    extra_attributes: &[(String, String)],
) -> String {
    let data = render(icon, props);

    let mut svg = String::from(
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink""#,
    );
    for (name, value) in extra_attributes {
        svg.push_str(&format!(" {name}=\"{value}\""));
    }
    for (name, value) in &data.attributes {
        svg.push_str(&format!(" {name}=\"{value}\""));
    }

    svg.push_str(" style=\"");
    svg.push_str(SUBPIXEL_FIX);
    for (name, value) in &data.style {
        svg.push_str(&format!(" {name}: {value};"));
    }
    svg.push_str("\">");

    svg.push_str(&data.body);
    svg.push_str("</svg>");
    svg
}

// ============================================================================
// Tests
// ============================================================================
