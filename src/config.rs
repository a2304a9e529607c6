use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::UnitKind;

pub const CONFIG_FILE_NAME: &str = ".registryrc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_components_root")]
    pub components_root: String,
    #[serde(default = "default_examples_root")]
    pub examples_root: String,
    #[serde(default = "default_hooks_root")]
    pub hooks_root: String,
    #[serde(default = "default_utils_root")]
    pub utils_root: String,

    #[serde(default = "default_tsx_extension")]
    pub components_extension: String,
    #[serde(default = "default_tsx_extension")]
    pub examples_extension: String,
    #[serde(default = "default_ts_extension")]
    pub hooks_extension: String,
    #[serde(default = "default_ts_extension")]
    pub utils_extension: String,

    /// Subfolder of the utilities root that is never distributed.
    #[serde(default = "default_utils_ignored_dir")]
    pub utils_ignored_dir: Option<String>,

    /// Registry namespace used for component file paths and registry links.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    #[serde(default = "default_components_alias")]
    pub components_alias: String,
    #[serde(default = "default_examples_alias")]
    pub examples_alias: String,
    #[serde(default = "default_hooks_alias")]
    pub hooks_alias: String,
    #[serde(default = "default_utils_alias")]
    pub utils_alias: String,

    /// Framework packages never listed as external dependencies.
    #[serde(default = "default_excluded_packages")]
    pub excluded_packages: Vec<String>,

    #[serde(default)]
    pub ignores: Vec<String>,

    #[serde(default = "default_module_output")]
    pub module_output: String,
    #[serde(default = "default_manifest_output")]
    pub manifest_output: String,
}

fn default_components_root() -> String {
    "components".to_string()
}

fn default_examples_root() -> String {
    "examples".to_string()
}

fn default_hooks_root() -> String {
    "hooks".to_string()
}

fn default_utils_root() -> String {
    "utils".to_string()
}

fn default_tsx_extension() -> String {
    "tsx".to_string()
}

fn default_ts_extension() -> String {
    "ts".to_string()
}

fn default_utils_ignored_dir() -> Option<String> {
    Some("internal".to_string())
}

fn default_namespace() -> String {
    "smoothui".to_string()
}

fn default_components_alias() -> String {
    "@/components/".to_string()
}

fn default_examples_alias() -> String {
    "@/examples/".to_string()
}

fn default_hooks_alias() -> String {
    "@/hooks/".to_string()
}

fn default_utils_alias() -> String {
    "@/utils/".to_string()
}

fn default_excluded_packages() -> Vec<String> {
    ["react", "react-dom", "next", "@types/react", "@types/react-dom"]
        .map(String::from)
        .to_vec()
}

fn default_module_output() -> String {
    "registry/index.tsx".to_string()
}

fn default_manifest_output() -> String {
    "public/registry.json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            components_root: default_components_root(),
            examples_root: default_examples_root(),
            hooks_root: default_hooks_root(),
            utils_root: default_utils_root(),
            components_extension: default_tsx_extension(),
            examples_extension: default_tsx_extension(),
            hooks_extension: default_ts_extension(),
            utils_extension: default_ts_extension(),
            utils_ignored_dir: default_utils_ignored_dir(),
            namespace: default_namespace(),
            components_alias: default_components_alias(),
            examples_alias: default_examples_alias(),
            hooks_alias: default_hooks_alias(),
            utils_alias: default_utils_alias(),
            excluded_packages: default_excluded_packages(),
            ignores: Vec::new(),
            module_output: default_module_output(),
            manifest_output: default_manifest_output(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid, or if an
    /// import alias or the namespace is empty.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        for (field, alias) in [
            ("componentsAlias", &self.components_alias),
            ("examplesAlias", &self.examples_alias),
            ("hooksAlias", &self.hooks_alias),
            ("utilsAlias", &self.utils_alias),
        ] {
            if alias.trim_end_matches('/').is_empty() {
                bail!("'{}' must not be empty", field);
            }
        }

        if self.namespace.is_empty() || self.namespace.contains('/') {
            bail!("'namespace' must be a single non-empty path segment");
        }

        Ok(())
    }

    /// Source root for the given unit kind, relative to the project root.
    pub fn root(&self, kind: UnitKind) -> &str {
        match kind {
            UnitKind::Component => &self.components_root,
            UnitKind::Example => &self.examples_root,
            UnitKind::Hook => &self.hooks_root,
            UnitKind::Util => &self.utils_root,
        }
    }

    /// Source extension (without the dot) for the given unit kind.
    pub fn extension(&self, kind: UnitKind) -> &str {
        match kind {
            UnitKind::Component => &self.components_extension,
            UnitKind::Example => &self.examples_extension,
            UnitKind::Hook => &self.hooks_extension,
            UnitKind::Util => &self.utils_extension,
        }
    }

    /// Import alias under which units of the given kind are imported.
    pub fn alias(&self, kind: UnitKind) -> &str {
        match kind {
            UnitKind::Component => &self.components_alias,
            UnitKind::Example => &self.examples_alias,
            UnitKind::Hook => &self.hooks_alias,
            UnitKind::Util => &self.utils_alias,
        }
    }

    /// Prefix of registry file paths for the given unit kind.
    pub fn file_prefix(&self, kind: UnitKind) -> &str {
        match kind {
            UnitKind::Component => &self.namespace,
            UnitKind::Example => "examples",
            UnitKind::Hook => "hooks",
            UnitKind::Util => "utils",
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

/// Search `start_dir` and its ancestors for the config file.
///
/// The search stops at the first directory containing `.git`.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = fs::canonicalize(start_dir).unwrap_or_else(|_| start_dir.to_path_buf());

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Path of the config file, `None` when using defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
