//! Collection export tool.
//!
//! Converts a bulk icon collection (one JSON document mapping names to
//! descriptors, plus alias entries) into individual per-icon descriptor
//! modules — one JSON file per icon or alias, each in exactly the
//! [`IconDescriptor`] shape the engine consumes.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use crate::descriptor::IconDescriptor;

// ============================================================================
// Collection model
// ============================================================================

/// A bulk icon collection document.
///
/// Collection-level `width`/`height` act as defaults for icons that do not
/// set their own.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct IconCollection {
    /// Collection prefix, e.g. `"mdi"`. Informational only.
    #[serde(default)]
    pub prefix: Option<String>,

    /// Icons by name, in document order.
    pub icons: IndexMap<String, IconDescriptor>,

    /// Aliases by name. Each references a parent icon with optional deltas.
    #[serde(default)]
    pub aliases: IndexMap<String, IconAlias>,

    /// Default width for icons that do not set one.
    #[serde(default)]
    pub width: Option<f64>,

    /// Default height for icons that do not set one.
    #[serde(default)]
    pub height: Option<f64>,
}

/// An alias entry: a parent icon plus overriding deltas.
///
/// Flip deltas toggle the parent's flips, rotation is added mod 4, and
/// geometry fields replace the parent's values outright.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct IconAlias {
    pub parent: String,
    #[serde(default)]
    pub h_flip: Option<bool>,
    #[serde(default)]
    pub v_flip: Option<bool>,
    #[serde(default)]
    pub rotate: Option<i32>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub left: Option<f64>,
    #[serde(default)]
    pub top: Option<f64>,
    #[serde(default)]
    pub inline_top: Option<f64>,
    #[serde(default)]
    pub inline_height: Option<f64>,
    #[serde(default)]
    pub vertical_align: Option<f64>,
}

/// Errors from collection loading and export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid collection JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("alias '{alias}' references missing icon '{parent}'")]
    MissingParent { alias: String, parent: String },
}

// ============================================================================
// Alias resolution
// ============================================================================

/// Merges an alias's deltas over its parent descriptor.
pub fn resolve_alias(parent: &IconDescriptor, alias: &IconAlias) -> IconDescriptor {
    let mut icon = parent.clone();

    if let Some(flip) = alias.h_flip {
        let base = parent.h_flip.unwrap_or(false);
        icon.h_flip = Some(base != flip);
    }
    if let Some(flip) = alias.v_flip {
        let base = parent.v_flip.unwrap_or(false);
        icon.v_flip = Some(base != flip);
    }
    if let Some(rotate) = alias.rotate {
        let base = parent.rotate.unwrap_or(0);
        icon.rotate = Some((base + rotate).rem_euclid(4));
    }

    if alias.width.is_some() {
        icon.width = alias.width;
    }
    if alias.height.is_some() {
        icon.height = alias.height;
    }
    if alias.left.is_some() {
        icon.left = alias.left;
    }
    if alias.top.is_some() {
        icon.top = alias.top;
    }
    if alias.inline_top.is_some() {
        icon.inline_top = alias.inline_top;
    }
    if alias.inline_height.is_some() {
        icon.inline_height = alias.inline_height;
    }
    if alias.vertical_align.is_some() {
        icon.vertical_align = alias.vertical_align;
    }

    icon
}

// ============================================================================
// Export
// ============================================================================

impl IconCollection {
    /// Parses a collection from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ExportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a collection from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ExportError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Applies collection-level width/height defaults to an icon.
    fn with_defaults(&self, icon: &IconDescriptor) -> IconDescriptor {
        let mut icon = icon.clone();
        if icon.width.is_none() {
            icon.width = self.width;
        }
        if icon.height.is_none() {
            icon.height = self.height;
        }
        icon
    }

    /// Materializes every icon and alias into its final descriptor.
    ///
    /// Aliases are resolved against their parent (before collection defaults
    /// are applied, so a default never overrides an alias delta).
    pub fn descriptors(&self) -> Result<Vec<(String, IconDescriptor)>, ExportError> {
        let mut out = Vec::with_capacity(self.icons.len() + self.aliases.len());
        for (name, icon) in &self.icons {
            out.push((name.clone(), self.with_defaults(icon)));
        }
        for (name, alias) in &self.aliases {
            let parent = self.icons.get(&alias.parent).ok_or_else(|| {
                ExportError::MissingParent {
                    alias: name.clone(),
                    parent: alias.parent.clone(),
                }
            })?;
            out.push((name.clone(), self.with_defaults(&resolve_alias(parent, alias))));
        }
        Ok(out)
    }
}

/// Writes one pretty-printed JSON descriptor per icon and alias into
/// `out_dir` (created if missing). Returns the number of files written.
pub fn export_collection(
    collection: &IconCollection,
    out_dir: &Path,
) -> Result<usize, ExportError> {
    let descriptors = collection.descriptors()?;
    fs::create_dir_all(out_dir)?;

    for (name, icon) in &descriptors {
        let path = out_dir.join(format!("{name}.json"));
        fs::write(&path, serde_json::to_string_pretty(icon)?)?;
        log::debug!("wrote {}", path.display());
    }
    log::info!(
        "exported {} descriptors to {}",
        descriptors.len(),
        out_dir.display()
    );
    Ok(descriptors.len())
}

/// Loads a collection file and exports its descriptors. See
/// [`export_collection`].
pub fn export_file(input: &Path, out_dir: &Path) -> Result<usize, ExportError> {
    export_collection(&IconCollection::load(input)?, out_dir)
}

// ============================================================================
// Tests
// ============================================================================
