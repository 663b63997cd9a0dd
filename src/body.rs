//! Markup body rewriting.
//!
//! Three rewrites, all textual: identifier rewriting to process-unique ids,
//! `currentColor` substitution, and wrapping in a transform group. The body
//! is treated as an opaque, well-formed fragment; nothing here parses XML.

use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use regex::Regex;

use crate::transform::BoundingBox;

// ============================================================================
// Unique identifier state
// ============================================================================

/// Identifier-defining attribute pattern, matched against the raw body.
static ID_ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\sid="(\S+)""#).expect("id attribute pattern"));

/// Replacement-id prefix, derived once per process from the clock and a
/// random component so that separate processes sharing a document do not
/// collide either.
static ID_PREFIX: LazyLock<String> = LazyLock::new(|| {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let salt = uuid::Uuid::new_v4().as_u128() & 0xff_ffff;
    format!("glyphforge-{millis:x}-{salt:x}-")
});

/// Monotonic counter shared by every rewrite in the process. Never reset,
/// never reused.
static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

fn next_id() -> String {
    let count = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}{count}", &*ID_PREFIX)
}

// ============================================================================
// Identifier rewriting
// ============================================================================

/// Replaces every identifier defined in the body with a process-unique one.
///
/// Identifiers are collected from `id="..."` attributes, then every literal
/// occurrence in the three reference forms — direct attribute value
/// (`="id"`), fragment reference (`="#id"`), and functional reference
/// (`(#id)`) — is rewritten by exact substring replacement. Bodies defining
/// no identifiers are returned unchanged.
///
/// Known limitation: an identifier whose text is a substring of another
/// identifier in the same body can be rewritten incorrectly. Avoiding a full
/// markup parse is deliberate; collection tooling does not emit such ids.
pub fn replace_ids(body: &str) -> String {
    let mut ids: Vec<&str> = Vec::new();
    for capture in ID_ATTRIBUTE.captures_iter(body) {
        let id = capture.get(1).map_or("", |m| m.as_str());
        if !id.is_empty() && !ids.contains(&id) {
            ids.push(id);
        }
    }
    if ids.is_empty() {
        return body.to_string();
    }

    let mut body = body.to_string();
    for id in ids {
        let new_id = next_id();
        body = body.replace(&format!("=\"{id}\""), &format!("=\"{new_id}\""));
        body = body.replace(&format!("=\"#{id}\""), &format!("=\"#{new_id}\""));
        body = body.replace(&format!("(#{id})"), &format!("(#{new_id})"));
    }
    body
}

// ============================================================================
// Body transformation
// ============================================================================

/// Produces the final body for a render.
///
/// Identifier rewriting runs first, on the original markup. Then, in order:
/// `currentColor` substitution (global, structure-unaware), a single `<g>`
/// wrapper carrying the space-joined operation list when any transform
/// operations exist, and an appended transparent rectangle matching the
/// final box when the marker is requested.
pub fn transform_body(
    body: &str,
    color: Option<&str>,
    operations: &[String],
    add_box: bool,
    bbox: &BoundingBox,
) -> String {
    let mut body = replace_ids(body);

    if let Some(color) = color {
        body = body.replace("currentColor", color);
    }
    if !operations.is_empty() {
        body = format!("<g transform=\"{}\">{body}</g>", operations.join(" "));
    }
    if add_box {
        body.push_str(&format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"rgba(0, 0, 0, 0)\" />",
            bbox.left, bbox.top, bbox.width, bbox.height
        ));
    }
    body
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const BOX: BoundingBox = BoundingBox {
        left: 0.0,
        top: 0.0,
        width: 16.0,
        height: 16.0,
    };

    fn collect_ids(body: &str) -> Vec<String> {
        ID_ATTRIBUTE
            .captures_iter(body)
            .map(|c| c[1].to_string())
            .collect()
    }

    #[test]
    fn body_without_ids_is_unchanged() {
        let body = r#"<path d="M0 0h16v16z" fill="currentColor"/>"#;
        assert_eq!(replace_ids(body), body);
    }

    #[test]
    fn all_reference_forms_are_rewritten() {
        let body = concat!(
            r##"<defs><linearGradient id="grad"><stop/></linearGradient>"##,
            r##"<clipPath id="clip"><rect/></clipPath></defs>"##,
            r##"<path fill="url(#grad)" clip-path="url(#clip)"/>"##,
            r##"<use href="#grad"/>"##,
        );
        let out = replace_ids(body);

        assert!(!out.contains("\"grad\""));
        assert!(!out.contains("#grad"));
        assert!(!out.contains("\"clip\""));

        let new_ids = collect_ids(&out);
        assert_eq!(new_ids.len(), 2);
        assert_ne!(new_ids[0], new_ids[1]);
        // References follow their definitions
        assert!(out.contains(&format!("url(#{})", new_ids[0])));
        assert!(out.contains(&format!("href=\"#{}\"", new_ids[0])));
        assert!(out.contains(&format!("url(#{})", new_ids[1])));
    }

    #[test]
    fn sequential_calls_never_collide() {
        let body = r##"<g id="a"/><g id="b"/>"##;
        let first = collect_ids(&replace_ids(body));
        let second = collect_ids(&replace_ids(body));
        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 2);
        for id in &second {
            assert!(!first.contains(id), "{id} reused across calls");
        }
    }

    #[test]
    fn concurrent_calls_never_collide() {
        let body = r##"<g id="a"/><g id="b"/>"##;
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(move || collect_ids(&replace_ids(body))))
            .collect();
        let mut seen = Vec::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(!seen.contains(&id), "{id} generated twice");
                seen.push(id);
            }
        }
        assert_eq!(seen.len(), 16);
    }

    #[test]
    fn repeated_definitions_count_once() {
        // The same id defined twice is still one identifier
        let body = r##"<g id="dup"/><g id="dup"/>"##;
        let out = replace_ids(body);
        let new_ids = collect_ids(&out);
        assert_eq!(new_ids.len(), 2);
        assert_eq!(new_ids[0], new_ids[1]);
    }

    #[test]
    fn color_substitution_is_global() {
        let body = r#"<path fill="currentColor" stroke="currentColor"/>"#;
        let out = transform_body(body, Some("#f00"), &[], false, &BOX);
        assert!(!out.contains("currentColor"));
        assert_eq!(out.matches("#f00").count(), 2);
    }

    #[test]
    fn no_color_leaves_body_alone() {
        let body = r#"<path fill="currentColor"/>"#;
        let out = transform_body(body, None, &[], false, &BOX);
        assert_eq!(out, body);
    }

    #[test]
    fn operations_wrap_body_in_group() {
        let ops = vec!["rotate(90 8 8)".to_string(), "scale(-1 1)".to_string()];
        let out = transform_body("<path/>", None, &ops, false, &BOX);
        assert_eq!(
            out,
            r#"<g transform="rotate(90 8 8) scale(-1 1)"><path/></g>"#
        );
    }

    #[test]
    fn box_marker_appends_transparent_rect() {
        let bbox = BoundingBox {
            left: 1.0,
            top: 2.0,
            width: 20.0,
            height: 16.0,
        };
        let out = transform_body("<path/>", None, &[], true, &bbox);
        assert_eq!(
            out,
            r#"<path/><rect x="1" y="2" width="20" height="16" fill="rgba(0, 0, 0, 0)" />"#
        );
    }
}
