//! Icon descriptor types and normalization.
//!
//! An [`IconDescriptor`] is the immutable input to the engine: a markup body,
//! a bounding box, and a default transform state. Descriptors commonly come
//! from per-icon JSON modules emitted by the collection export tool (see
//! [`crate::export`]), where absent fields mean "use the default".
//!
//! [`normalize`] fills every absent field and derives the inline-placement
//! fields, producing a [`NormalizedDescriptor`] the rest of the engine can
//! read without option-juggling.

use serde::{Deserialize, Serialize};

// ============================================================================
// IconDescriptor
// ============================================================================

/// Raw icon descriptor as stored in icon collections and per-icon modules.
///
/// Only `body` is required; every other field defaults during normalization.
/// The serialized form uses camelCase keys (`hFlip`, `inlineTop`, ...) for
/// compatibility with existing icon databases.
///
/// # Example
///
/// ```
/// use glyphforge::IconDescriptor;
///
/// let icon: IconDescriptor = serde_json::from_str(
///     r#"{"body": "<path d=\"M0 0h16v16z\"/>", "width": 24, "height": 24}"#,
/// ).unwrap();
/// assert_eq!(icon.width, Some(24.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct IconDescriptor {
    /// Opaque markup fragment (the SVG content, without the `<svg>` wrapper).
    pub body: String,

    /// Left edge of the bounding box. Defaults to 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,

    /// Top edge of the bounding box. Defaults to 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,

    /// Bounding box width. Defaults to 16.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,

    /// Bounding box height. Defaults to 16.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    /// Default rotation in quarter-turns. Defaults to 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<i32>,

    /// Default horizontal flip. Defaults to false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h_flip: Option<bool>,

    /// Default vertical flip. Defaults to false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v_flip: Option<bool>,

    /// Top edge used for inline (text-flow) placement. Derived from `top`
    /// when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_top: Option<f64>,

    /// Height used for inline placement. Derived from `height` when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_height: Option<f64>,

    /// Vertical alignment offset for inline placement, in em.
    /// Derived from the design height when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<f64>,
}

impl IconDescriptor {
    /// Creates a descriptor with the given body and all geometry defaulted.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Self::default()
        }
    }

    /// Sets the bounding box dimensions.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Sets the bounding box origin.
    pub fn with_origin(mut self, left: f64, top: f64) -> Self {
        self.left = Some(left);
        self.top = Some(top);
        self
    }

    /// Sets the default rotation in quarter-turns.
    pub fn with_rotation(mut self, quarter_turns: i32) -> Self {
        self.rotate = Some(quarter_turns);
        self
    }

    /// Sets the default flip state.
    pub fn with_flip(mut self, horizontal: bool, vertical: bool) -> Self {
        self.h_flip = Some(horizontal);
        self.v_flip = Some(vertical);
        self
    }
}

// ============================================================================
// NormalizedDescriptor
// ============================================================================

/// A descriptor with every field resolved to a concrete value.
///
/// Produced by [`normalize`]; this is what the transform resolver and render
/// orchestrator actually read.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDescriptor {
    pub body: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub rotate: i32,
    pub h_flip: bool,
    pub v_flip: bool,
    pub inline_top: f64,
    pub inline_height: f64,
    pub vertical_align: f64,
}

/// Fills defaults and derives the inline-placement fields.
///
/// Defaults: `left = 0`, `top = 0`, `width = 16`, `height = 16`,
/// `rotate = 0`, no flips. Derived fields (only when absent):
///
/// - `inline_top` from `top`
/// - `inline_height` from `height`
/// - `vertical_align`: `-0.143` if the height is a multiple of 7 but not of 8
///   (icon designed on a 14px grid), otherwise `-0.125` (16px grid)
///
/// Pure function; never fails.
pub fn normalize(icon: &IconDescriptor) -> NormalizedDescriptor {
    let top = icon.top.unwrap_or(0.0);
    let height = icon.height.unwrap_or(16.0);
    NormalizedDescriptor {
        body: icon.body.clone(),
        left: icon.left.unwrap_or(0.0),
        top,
        width: icon.width.unwrap_or(16.0),
        height,
        rotate: icon.rotate.unwrap_or(0),
        h_flip: icon.h_flip.unwrap_or(false),
        v_flip: icon.v_flip.unwrap_or(false),
        inline_top: icon.inline_top.unwrap_or(top),
        inline_height: icon.inline_height.unwrap_or(height),
        vertical_align: icon.vertical_align.unwrap_or(if height % 7.0 == 0.0 && height % 8.0 != 0.0 {
            -0.143
        } else {
            -0.125
        }),
    }
}

// ============================================================================
// Tests
// ============================================================================
