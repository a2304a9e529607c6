use anyhow::{Context, Result};

use crate::core::registry::Registry;

/// Serialize the registry as a pretty-printed JSON object keyed by item name.
///
/// Lazy loaders are never part of the manifest. Output ends with a newline.
pub fn emit_manifest(registry: &Registry) -> Result<String> {
    let json = serde_json::to_string_pretty(registry).context("Failed to serialize manifest")?;
    Ok(format!("{}\n", json))
}
