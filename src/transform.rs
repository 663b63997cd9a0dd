//! Transform resolution: flip/rotate composition with bounding-box reflow.
//!
//! [`resolve_transform`] merges a descriptor's default rotate/flip state with
//! the caller's overrides into a normalized [`TransformState`], a mutated
//! [`BoundingBox`], and an ordered list of SVG transform operations to wrap
//! around the body.

use crate::descriptor::NormalizedDescriptor;
use crate::props::{RenderProperties, RotationValue};

// ============================================================================
// BoundingBox / TransformState
// ============================================================================

/// The icon's bounding box, mutated in place during transform resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// The `viewBox` attribute value: `"left top width height"`.
    pub fn view_box(&self) -> String {
        format!("{} {} {} {}", self.left, self.top, self.width, self.height)
    }
}

/// Normalized transform state after merging descriptor defaults with caller
/// overrides.
///
/// After [`resolve_transform`] returns, `rotate` is in `{0, 1, 2, 3}` and at
/// most one flip flag is set (a double flip collapses into `rotate += 2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformState {
    /// Net rotation in quarter-turns.
    pub rotate: i32,
    pub h_flip: bool,
    pub v_flip: bool,
}

// ============================================================================
// Rotation spec parsing
// ============================================================================

/// Length of the leading `-?[0-9.]*` run of a rotation spec.
fn numeric_prefix_len(spec: &str) -> usize {
    let bytes = spec.as_bytes();
    let mut len = 0;
    if bytes.first() == Some(&b'-') {
        len = 1;
    }
    while len < bytes.len() && (bytes[len].is_ascii_digit() || bytes[len] == b'.') {
        len += 1;
    }
    len
}

/// Parses a rotation override into quarter-turns to add.
///
/// - plain numbers are truncated to integer quarter-turns (`"2.5"` adds 2)
/// - `deg` suffix: divided by 90 and rounded (`"135deg"` adds 2)
/// - `%` suffix: divided by 25 and rounded (`"50%"` adds 2)
/// - anything else yields `None` and is ignored by the caller
fn rotation_delta(value: &RotationValue) -> Option<i32> {
    let spec = match value {
        RotationValue::Quarters(n) => return Some(*n),
        RotationValue::Text(spec) => spec.as_str(),
    };

    let split = numeric_prefix_len(spec);
    let units = &spec[split..];
    if units.is_empty() {
        // Purely numeric string, already in quarter-turns
        return spec.parse::<f64>().ok().map(|n| n.trunc() as i32);
    }
    if units == spec {
        return None;
    }
    let divisor = match units {
        // 25% -> 1, 50% -> 2, ...
        "%" => 25.0,
        // 90deg -> 1, 180deg -> 2, ...
        "deg" => 90.0,
        _ => return None,
    };
    let number = spec[..split].parse::<f64>().ok()?.trunc();
    Some((number / divisor).round() as i32)
}

// ============================================================================
// Transform resolution
// ============================================================================

/// Resolves the final transform state, bounding box, and operation list.
///
/// Steps:
/// 1. Seed the box from the descriptor, using the inline variant fields when
///    `props.inline` is set.
/// 2. Seed the transform from the descriptor's rotate/flip defaults.
/// 3. Apply `hFlip`/`vFlip` toggles, then `flip` keywords (unknown keywords
///    are ignored), then the rotation override.
/// 4. Collapse a double flip into a half-turn; a single-axis flip emits a
///    translate+scale pair and zeroes the box origin.
/// 5. Reduce rotation mod 4 and emit the rotation operation, swapping box
///    axes for quarter and three-quarter turns.
///
/// The rotation operation is inserted at the front of the list, ahead of any
/// flip operations already collected. The rendered transform chain therefore
/// reads rotation first; reordering it changes output.
pub fn resolve_transform(
    icon: &NormalizedDescriptor,
    props: &RenderProperties,
) -> (TransformState, BoundingBox, Vec<String>) {
    let inline = props.inline == Some(true);

    let mut bbox = BoundingBox {
        left: icon.left,
        top: if inline { icon.inline_top } else { icon.top },
        width: icon.width,
        height: if inline { icon.inline_height } else { icon.height },
    };
    let mut state = TransformState {
        rotate: icon.rotate,
        h_flip: icon.h_flip,
        v_flip: icon.v_flip,
    };

    // Boolean toggles: only truthy values flip
    if props.h_flip == Some(true) {
        state.h_flip = !state.h_flip;
    }
    if props.v_flip == Some(true) {
        state.v_flip = !state.v_flip;
    }
    if let Some(spec) = &props.flip {
        for keyword in spec
            .to_lowercase()
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
        {
            match keyword {
                "horizontal" => state.h_flip = !state.h_flip,
                "vertical" => state.v_flip = !state.v_flip,
                _ => {}
            }
        }
    }
    if let Some(rotate) = &props.rotate {
        if let Some(delta) = rotation_delta(rotate) {
            state.rotate += delta;
        }
    }

    let mut operations: Vec<String> = Vec::new();

    // Flips are applied to the box first; a double flip is a half-turn and
    // never emits flip operations
    if state.h_flip {
        if state.v_flip {
            state.rotate += 2;
            state.h_flip = false;
            state.v_flip = false;
        } else {
            operations.push(format!(
                "translate({} {})",
                bbox.width + bbox.left,
                0.0 - bbox.top
            ));
            operations.push("scale(-1 1)".to_string());
            bbox.left = 0.0;
            bbox.top = 0.0;
        }
    } else if state.v_flip {
        operations.push(format!(
            "translate({} {})",
            0.0 - bbox.left,
            bbox.height + bbox.top
        ));
        operations.push("scale(1 -1)".to_string());
        bbox.left = 0.0;
        bbox.top = 0.0;
    }

    state.rotate = state.rotate.rem_euclid(4);
    match state.rotate {
        1 => {
            let center = bbox.height / 2.0 + bbox.top;
            operations.insert(0, format!("rotate(90 {center} {center})"));
            reflow_quarter_turn(&mut bbox);
        }
        2 => {
            operations.insert(
                0,
                format!(
                    "rotate(180 {} {})",
                    bbox.width / 2.0 + bbox.left,
                    bbox.height / 2.0 + bbox.top
                ),
            );
        }
        3 => {
            let center = bbox.width / 2.0 + bbox.left;
            operations.insert(0, format!("rotate(-90 {center} {center})"));
            reflow_quarter_turn(&mut bbox);
        }
        _ => {}
    }

    (state, bbox, operations)
}

/// Box reflow for a quarter or three-quarter turn: width and height swap,
/// and so do left and top when the origin is non-zero.
fn reflow_quarter_turn(bbox: &mut BoundingBox) {
    if bbox.left != 0.0 || bbox.top != 0.0 {
        std::mem::swap(&mut bbox.left, &mut bbox.top);
    }
    if bbox.width != bbox.height {
        std::mem::swap(&mut bbox.width, &mut bbox.height);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{IconDescriptor, normalize};

    fn icon(width: f64, height: f64) -> NormalizedDescriptor {
        normalize(&IconDescriptor::new("<path/>").with_size(width, height))
    }

    #[test]
    fn no_overrides_is_identity() {
        let (state, bbox, ops) = resolve_transform(&icon(16.0, 16.0), &RenderProperties::new());
        assert_eq!(state.rotate, 0);
        assert!(!state.h_flip && !state.v_flip);
        assert_eq!(bbox.view_box(), "0 0 16 16");
        assert!(ops.is_empty());
    }

    #[test]
    fn quarter_turn_swaps_box_and_anchors_on_height_axis() {
        let props = RenderProperties::new().with_rotate(1);
        let (state, bbox, ops) = resolve_transform(&icon(16.0, 10.0), &props);
        assert_eq!(state.rotate, 1);
        assert_eq!(
            bbox,
            BoundingBox {
                left: 0.0,
                top: 0.0,
                width: 10.0,
                height: 16.0
            }
        );
        assert_eq!(ops, vec!["rotate(90 5 5)".to_string()]);
    }

    #[test]
    fn three_quarter_turn_anchors_on_width_axis() {
        let props = RenderProperties::new().with_rotate(3);
        let (_, bbox, ops) = resolve_transform(&icon(16.0, 10.0), &props);
        assert_eq!(ops, vec!["rotate(-90 8 8)".to_string()]);
        assert_eq!(bbox.width, 10.0);
        assert_eq!(bbox.height, 16.0);
    }

    #[test]
    fn half_turn_keeps_dimensions() {
        let props = RenderProperties::new().with_rotate(2);
        let (_, bbox, ops) = resolve_transform(&icon(16.0, 10.0), &props);
        assert_eq!(ops, vec!["rotate(180 8 5)".to_string()]);
        assert_eq!(bbox.width, 16.0);
        assert_eq!(bbox.height, 10.0);
    }

    #[test]
    fn rotation_is_periodic_mod_four() {
        for extra in [0, 4, 8, -4] {
            let props = RenderProperties::new().with_rotate(1 + extra);
            let (state, bbox, ops) = resolve_transform(&icon(16.0, 10.0), &props);
            assert_eq!(state.rotate, 1);
            assert_eq!(bbox.width, 10.0);
            assert_eq!(ops.len(), 1);
        }
    }

    #[test]
    fn negative_rotation_normalizes_into_range() {
        let props = RenderProperties::new().with_rotate(-1);
        let (state, _, ops) = resolve_transform(&icon(16.0, 16.0), &props);
        assert_eq!(state.rotate, 3);
        assert_eq!(ops, vec!["rotate(-90 8 8)".to_string()]);
    }

    #[test]
    fn rotation_spec_strings() {
        for (spec, expected) in [
            ("1", 1),
            ("2", 2),
            ("90deg", 1),
            ("180deg", 2),
            ("-90deg", 3),
            ("25%", 1),
            ("200%", 0), // 8 quarter-turns
            ("135deg", 2),
        ] {
            let props = RenderProperties::new().with_rotate(spec);
            let (state, _, _) = resolve_transform(&icon(16.0, 16.0), &props);
            assert_eq!(state.rotate, expected, "spec {spec:?}");
        }
    }

    #[test]
    fn unparsable_rotation_is_ignored() {
        for spec in ["deg", "north", "90rad", "", "-"] {
            let props = RenderProperties::new().with_rotate(spec);
            let (state, _, ops) = resolve_transform(&icon(16.0, 16.0), &props);
            assert_eq!(state.rotate, 0, "spec {spec:?}");
            assert!(ops.is_empty());
        }
    }

    #[test]
    fn horizontal_flip_operations() {
        let props = RenderProperties::new().with_h_flip(true);
        let (state, bbox, ops) = resolve_transform(&icon(16.0, 16.0), &props);
        assert!(state.h_flip);
        assert_eq!(
            ops,
            vec!["translate(16 0)".to_string(), "scale(-1 1)".to_string()]
        );
        assert_eq!(bbox.left, 0.0);
        assert_eq!(bbox.top, 0.0);
    }

    #[test]
    fn vertical_flip_operations() {
        let props = RenderProperties::new().with_v_flip(true);
        let (_, _, ops) = resolve_transform(&icon(16.0, 16.0), &props);
        assert_eq!(
            ops,
            vec!["translate(0 16)".to_string(), "scale(1 -1)".to_string()]
        );
    }

    #[test]
    fn double_flip_collapses_to_half_turn() {
        // Whatever the initial flip/rotate combination, a merged state with
        // both flips set must produce the same box and operations as the
        // unflipped state rotated two extra quarter-turns.
        for rotate in 0..4 {
            for (h, v) in [(false, false), (true, false), (false, true), (true, true)] {
                let base = normalize(
                    &IconDescriptor::new("<path/>")
                        .with_size(16.0, 10.0)
                        .with_rotation(rotate)
                        .with_flip(h, v),
                );
                // Toggle each axis that is not already flipped
                let mut keywords = String::new();
                if !h {
                    keywords.push_str("horizontal ");
                }
                if !v {
                    keywords.push_str("vertical");
                }
                let flipped =
                    resolve_transform(&base, &RenderProperties::new().with_flip(keywords));

                let plain = normalize(
                    &IconDescriptor::new("<path/>")
                        .with_size(16.0, 10.0)
                        .with_rotation(rotate),
                );
                let turned = resolve_transform(&plain, &RenderProperties::new().with_rotate(2));

                assert_eq!(flipped.0, turned.0, "state for rotate={rotate} h={h} v={v}");
                assert_eq!(flipped.1, turned.1, "box for rotate={rotate} h={h} v={v}");
                assert_eq!(flipped.2, turned.2, "ops for rotate={rotate} h={h} v={v}");
            }
        }
    }

    #[test]
    fn flip_keywords_toggle_and_ignore_unknown() {
        let props = RenderProperties::new().with_flip("Horizontal, sideways,,vertical horizontal");
        let (state, _, _) = resolve_transform(&icon(16.0, 16.0), &props);
        // horizontal toggled twice, vertical once
        assert!(!state.h_flip);
        assert!(state.v_flip);
    }

    #[test]
    fn false_overrides_do_not_untoggle_descriptor_defaults() {
        let base = normalize(
            &IconDescriptor::new("<path/>")
                .with_size(16.0, 16.0)
                .with_flip(true, false),
        );
        let props = RenderProperties::new().with_h_flip(false);
        let (state, _, ops) = resolve_transform(&base, &props);
        assert!(state.h_flip);
        assert_eq!(ops.len(), 2);
    }

    #[test]
    fn rotation_operation_precedes_flip_operations() {
        let props = RenderProperties::new().with_h_flip(true).with_rotate(1);
        let (_, _, ops) = resolve_transform(&icon(16.0, 16.0), &props);
        assert_eq!(ops.len(), 3);
        assert!(ops[0].starts_with("rotate("));
        assert!(ops[1].starts_with("translate("));
        assert_eq!(ops[2], "scale(-1 1)");
    }

    #[test]
    fn inline_uses_inline_box_fields() {
        let mut raw = IconDescriptor::new("<path/>").with_size(16.0, 16.0);
        raw.inline_top = Some(-2.0);
        raw.inline_height = Some(20.0);
        let base = normalize(&raw);

        let (_, bbox, _) = resolve_transform(&base, &RenderProperties::new().with_inline(true));
        assert_eq!(bbox.top, -2.0);
        assert_eq!(bbox.height, 20.0);

        let (_, bbox, _) = resolve_transform(&base, &RenderProperties::new());
        assert_eq!(bbox.top, 0.0);
        assert_eq!(bbox.height, 16.0);
    }

    #[test]
    fn flip_of_offset_box_zeroes_origin() {
        let base = normalize(
            &IconDescriptor::new("<path/>")
                .with_origin(2.0, 3.0)
                .with_size(16.0, 16.0),
        );
        let props = RenderProperties::new().with_h_flip(true);
        let (_, bbox, ops) = resolve_transform(&base, &props);
        assert_eq!(ops[0], "translate(18 -3)");
        assert_eq!((bbox.left, bbox.top), (0.0, 0.0));
    }

    #[test]
    fn quarter_turn_of_offset_box_swaps_origin() {
        let base = normalize(
            &IconDescriptor::new("<path/>")
                .with_origin(2.0, 3.0)
                .with_size(16.0, 10.0),
        );
        let props = RenderProperties::new().with_rotate(1);
        let (_, bbox, _) = resolve_transform(&base, &props);
        assert_eq!((bbox.left, bbox.top), (3.0, 2.0));
        assert_eq!((bbox.width, bbox.height), (10.0, 16.0));
    }
}
