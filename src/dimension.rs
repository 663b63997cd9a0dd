//! Unit-aware dimension calculation.
//!
//! Resolves the final width/height attribute values from 0, 1, or 2 caller
//! overrides, deriving the unset axis from the bounding-box ratio. String
//! sizes keep their unit suffixes: `"24px"` scaled by 2 is `"48px"`.

use std::sync::LazyLock;

use regex::Regex;

use crate::props::DimensionValue;
use crate::transform::BoundingBox;

/// Default rounding precision: scaled values are ceiled to 1/100.
pub const DEFAULT_PRECISION: f64 = 100.0;

/// Signed decimal runs inside a dimension string.
static NUMERIC_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?[0-9.]*[0-9]+[0-9.]*").expect("numeric run pattern"));

// ============================================================================
// Scaling primitives
// ============================================================================

/// Scales a numeric size by `ratio`, ceiling at the given precision.
///
/// A ratio of exactly 1 returns the size unchanged (no rounding).
pub fn scale_numeric(size: f64, ratio: f64, precision: f64) -> f64 {
    if ratio == 1.0 {
        return size;
    }
    (size * ratio * precision).ceil() / precision
}

/// Scales every numeric run inside a dimension string by `ratio`, passing
/// unit suffixes and separators through unchanged.
///
/// A ratio of exactly 1 returns the string unchanged. Returns `None` when the
/// input cannot be decomposed (empty string); callers treat an absent result
/// as "omit this attribute".
pub fn scale_text(size: &str, ratio: f64, precision: f64) -> Option<String> {
    if size.is_empty() {
        return None;
    }
    if ratio == 1.0 {
        return Some(size.to_string());
    }

    let mut out = String::with_capacity(size.len() + 4);
    let mut last = 0;
    for run in NUMERIC_RUN.find_iter(size) {
        out.push_str(&size[last..run.start()]);
        match run.as_str().parse::<f64>() {
            Ok(number) => {
                let scaled = (number * ratio * precision).ceil() / precision;
                out.push_str(&scaled.to_string());
            }
            // Degenerate runs like "1.2.3" pass through untouched
            Err(_) => out.push_str(run.as_str()),
        }
        last = run.end();
    }
    out.push_str(&size[last..]);
    Some(out)
}

/// Derives the other axis from a known dimension value and the box ratio.
///
/// `Auto` derives to `Auto` (both axes fall back to raw box values), and an
/// omitted value derives to nothing — the other attribute is omitted too.
pub fn derive_dimension(value: &DimensionValue, ratio: f64) -> Option<DimensionValue> {
    match value {
        DimensionValue::Number(n) => Some(DimensionValue::Number(scale_numeric(
            *n,
            ratio,
            DEFAULT_PRECISION,
        ))),
        DimensionValue::Text(s) => {
            scale_text(s, ratio, DEFAULT_PRECISION).map(DimensionValue::Text)
        }
        DimensionValue::Auto => Some(DimensionValue::Auto),
        DimensionValue::Omit => None,
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Final width/height attribute values. `None` means the attribute is
/// omitted from the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDimensions {
    pub width: Option<String>,
    pub height: Option<String>,
}

/// Resolves final width/height from the caller overrides.
///
/// The cases are mutually exclusive:
///
/// - neither given: height defaults to `"1em"`, width derived by ratio
/// - exactly one given: the other derived by ratio
/// - both given: used verbatim, no ratio math
pub fn resolve_dimensions(
    bbox: &BoundingBox,
    width: Option<&DimensionValue>,
    height: Option<&DimensionValue>,
) -> ResolvedDimensions {
    let (width, height) = match (width, height) {
        (None, None) => {
            let height = DimensionValue::Text("1em".to_string());
            let width = derive_dimension(&height, bbox.width / bbox.height);
            (width, Some(height))
        }
        (Some(width), None) => {
            let height = derive_dimension(width, bbox.height / bbox.width);
            (Some(width.clone()), height)
        }
        (None, Some(height)) => {
            let width = derive_dimension(height, bbox.width / bbox.height);
            (width, Some(height.clone()))
        }
        (Some(width), Some(height)) => (Some(width.clone()), Some(height.clone())),
    };

    ResolvedDimensions {
        width: materialize(width, bbox.width),
        height: materialize(height, bbox.height),
    }
}

/// Turns a resolved dimension into its attribute string, substituting the
/// raw box value for `Auto`.
fn materialize(value: Option<DimensionValue>, box_axis: f64) -> Option<String> {
    match value? {
        DimensionValue::Number(n) => Some(n.to_string()),
        DimensionValue::Text(s) => Some(s),
        DimensionValue::Auto => Some(box_axis.to_string()),
        DimensionValue::Omit => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
