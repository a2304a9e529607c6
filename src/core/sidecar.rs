use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Optional per-file manifest overrides, stored as `<stem>.json` beside the
/// source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidecarConfig {
    #[serde(default)]
    pub additional_dependencies: Vec<String>,
    #[serde(default)]
    pub dev_dependencies: Vec<String>,
    #[serde(default)]
    pub tailwind: Option<String>,
}

/// Outcome of looking for a sidecar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidecarLoad {
    Absent,
    Loaded(SidecarConfig),
    /// The file exists but is not a valid sidecar; carries the parse error.
    Malformed(String),
}

pub fn sidecar_path(source: &Path) -> PathBuf {
    source.with_extension("json")
}

/// Load the sidecar of `source`.
///
/// A malformed file is reported as [`SidecarLoad::Malformed`] rather than an
/// error; only I/O failures on an existing file are errors.
pub fn load_sidecar(source: &Path) -> Result<SidecarLoad> {
    let path = sidecar_path(source);
    if !path.is_file() {
        return Ok(SidecarLoad::Absent);
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read sidecar: {}", path.display()))?;

    Ok(match serde_json::from_str::<SidecarConfig>(&content) {
        Ok(config) => SidecarLoad::Loaded(config),
        Err(err) => SidecarLoad::Malformed(err.to_string()),
    })
}
