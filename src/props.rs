//! Per-call render properties and the property classifier.
//!
//! [`RenderProperties`] is the typed record of caller-supplied overrides.
//! Fields that accept several shapes in the stringly upstream API (query
//! parameters, element attributes) are tagged unions here: [`DimensionValue`]
//! for width/height, [`RotationValue`] for rotation.
//!
//! [`split_attributes`] is the classifier: it consumes flat string key/value
//! pairs and splits them into a typed `RenderProperties` plus passthrough
//! attributes the caller should copy onto the rendered element verbatim.

// ============================================================================
// Value types
// ============================================================================

/// A caller-supplied width or height override.
#[derive(Debug, Clone, PartialEq)]
pub enum DimensionValue {
    /// Plain number, used as-is (and scaled by ratio when deriving the other
    /// axis).
    Number(f64),
    /// String with optional unit suffixes, e.g. `"24px"` or `"1em"`.
    Text(String),
    /// Use the bounding box's raw value for this axis.
    Auto,
    /// Omit the attribute from the output entirely.
    Omit,
}

impl DimensionValue {
    /// Parses the stringly form used by attribute/query interfaces.
    ///
    /// `"auto"` and `"false"`/`"none"` map to the [`Auto`](Self::Auto) and
    /// [`Omit`](Self::Omit) markers; anything numeric becomes a number;
    /// everything else is kept as text.
    pub fn parse(value: &str) -> Self {
        match value {
            "auto" => Self::Auto,
            "false" | "none" => Self::Omit,
            _ => match value.parse::<f64>() {
                Ok(n) => Self::Number(n),
                Err(_) => Self::Text(value.to_string()),
            },
        }
    }
}

impl From<f64> for DimensionValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for DimensionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A caller-supplied rotation override.
///
/// Numeric values are quarter-turns added to the descriptor's default
/// rotation. Text values carry an optional unit suffix (`deg`, `%`, or none)
/// and are parsed by the transform resolver; unparsable text is silently
/// ignored there.
#[derive(Debug, Clone, PartialEq)]
pub enum RotationValue {
    /// Quarter-turns, added directly.
    Quarters(i32),
    /// Unparsed rotation spec, e.g. `"90deg"`, `"25%"`, `"2"`.
    Text(String),
}

impl From<i32> for RotationValue {
    fn from(value: i32) -> Self {
        Self::Quarters(value)
    }
}

impl From<&str> for RotationValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

// ============================================================================
// RenderProperties
// ============================================================================

/// Caller-supplied rendering overrides. All fields optional.
///
/// Boolean-like fields follow the upstream toggle convention: only a `true`
/// value has an effect. `Some(false)` does not un-flip a descriptor that
/// flips by default.
///
/// # Example
///
/// ```
/// use glyphforge::RenderProperties;
///
/// let props = RenderProperties::new()
///     .with_height(32.0)
///     .with_color("#ff0000")
///     .with_flip("horizontal");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderProperties {
    /// Render for inline (text-flow) placement.
    pub inline: Option<bool>,
    /// Toggle horizontal flip.
    pub h_flip: Option<bool>,
    /// Toggle vertical flip.
    pub v_flip: Option<bool>,
    /// Space/comma-separated `horizontal`/`vertical` keywords; each toggles
    /// an axis.
    pub flip: Option<String>,
    /// Rotation to add to the descriptor default.
    pub rotate: Option<RotationValue>,
    /// Width override.
    pub width: Option<DimensionValue>,
    /// Height override.
    pub height: Option<DimensionValue>,
    /// Space/comma-separated alignment keywords.
    pub align: Option<String>,
    /// Replacement for `currentColor` in the body.
    pub color: Option<String>,
    /// Append a transparent rectangle matching the final bounding box.
    pub box_marker: Option<bool>,
}

impl RenderProperties {
    /// Creates an empty property set (descriptor defaults apply everywhere).
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests inline placement.
    pub fn with_inline(mut self, inline: bool) -> Self {
        self.inline = Some(inline);
        self
    }

    /// Toggles the horizontal flip.
    pub fn with_h_flip(mut self, flip: bool) -> Self {
        self.h_flip = Some(flip);
        self
    }

    /// Toggles the vertical flip.
    pub fn with_v_flip(mut self, flip: bool) -> Self {
        self.v_flip = Some(flip);
        self
    }

    /// Sets the flip keyword list, e.g. `"horizontal, vertical"`.
    pub fn with_flip(mut self, spec: impl Into<String>) -> Self {
        self.flip = Some(spec.into());
        self
    }

    /// Sets the rotation override.
    pub fn with_rotate(mut self, rotate: impl Into<RotationValue>) -> Self {
        self.rotate = Some(rotate.into());
        self
    }

    /// Sets the width override.
    pub fn with_width(mut self, width: impl Into<DimensionValue>) -> Self {
        self.width = Some(width.into());
        self
    }

    /// Sets the height override.
    pub fn with_height(mut self, height: impl Into<DimensionValue>) -> Self {
        self.height = Some(height.into());
        self
    }

    /// Sets the alignment keyword list, e.g. `"left top crop"`.
    pub fn with_align(mut self, spec: impl Into<String>) -> Self {
        self.align = Some(spec.into());
        self
    }

    /// Sets the `currentColor` replacement.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Requests the transparent bounding-box marker rectangle.
    pub fn with_box_marker(mut self, marker: bool) -> Self {
        self.box_marker = Some(marker);
        self
    }
}

// ============================================================================
// Classifier
// ============================================================================

/// Property names the engine consumes; everything else passes through.
const RENDER_PROPERTY_NAMES: [&str; 10] = [
    "width", "height", "inline", "hFlip", "vFlip", "flip", "rotate", "align", "color", "box",
];

/// Returns true if `name` is consumed by the engine rather than passed
/// through to the rendered element.
pub fn is_render_property(name: &str) -> bool {
    RENDER_PROPERTY_NAMES.contains(&name)
}

/// Boolean-like truthiness for stringly interfaces.
fn truthy(value: &str) -> bool {
    value == "true" || value == "1"
}

/// Splits flat string key/value pairs into typed render properties and
/// passthrough attributes.
///
/// Classification is by the fixed name set; unknown names are never an
/// error, they are simply passed through in their original order.
pub fn split_attributes<'a, I>(pairs: I) -> (RenderProperties, Vec<(String, String)>)
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut props = RenderProperties::new();
    let mut passthrough = Vec::new();

    for (name, value) in pairs {
        match name {
            "inline" => props.inline = Some(truthy(value)),
            "hFlip" => props.h_flip = Some(truthy(value)),
            "vFlip" => props.v_flip = Some(truthy(value)),
            "flip" => props.flip = Some(value.to_string()),
            "rotate" => props.rotate = Some(RotationValue::Text(value.to_string())),
            "width" => props.width = Some(DimensionValue::parse(value)),
            "height" => props.height = Some(DimensionValue::parse(value)),
            "align" => props.align = Some(value.to_string()),
            "color" => props.color = Some(value.to_string()),
            "box" => props.box_marker = Some(truthy(value)),
            _ => passthrough.push((name.to_string(), value.to_string())),
        }
    }

    (props, passthrough)
}

// ============================================================================
// Tests
// ============================================================================
