use std::collections::HashSet;

use crate::{
    config::Config,
    utils::{strip_source_extension, to_kebab_case},
};

/// Classification of one import source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportTarget {
    /// A component or example file; carries the kebab-cased unit name.
    Unit(String),
    /// The components or examples alias root itself; names come from bindings.
    UnitBarrel,
    Hook(String),
    Util(String),
    /// A third-party package, at scope+name or first-segment granularity.
    Package(String),
    /// Relative, project-internal, builtin or excluded framework import.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AliasKind {
    Unit,
    Hook,
    Util,
}

/// Import classification rules derived from [`Config`].
#[derive(Debug, Clone)]
pub struct ImportRules {
    namespace: String,
    /// Aliases with a trailing `/`, longest first so nested aliases win.
    aliases: Vec<(String, AliasKind)>,
    excluded_packages: HashSet<String>,
}

impl ImportRules {
    pub fn from_config(config: &Config) -> Self {
        let mut aliases: Vec<(String, AliasKind)> = [
            (&config.components_alias, AliasKind::Unit),
            (&config.examples_alias, AliasKind::Unit),
            (&config.hooks_alias, AliasKind::Hook),
            (&config.utils_alias, AliasKind::Util),
        ]
        .into_iter()
        .map(|(alias, kind)| (format!("{}/", alias.trim_end_matches('/')), kind))
        .collect();
        aliases.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        Self {
            namespace: config.namespace.clone(),
            aliases,
            excluded_packages: config.excluded_packages.iter().cloned().collect(),
        }
    }

    /// Registry namespace that prefixes unit links.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn is_excluded(&self, package: &str) -> bool {
        self.excluded_packages.contains(package)
    }

    pub fn classify(&self, source: &str) -> ImportTarget {
        if source.starts_with('.') || source.starts_with('/') {
            return ImportTarget::Ignored;
        }

        for (alias, kind) in &self.aliases {
            let rest = match source.strip_prefix(alias.as_str()) {
                Some(rest) => rest.trim_end_matches('/'),
                None if source == alias.trim_end_matches('/') => "",
                None => continue,
            };

            return match kind {
                AliasKind::Unit => match unit_name(rest) {
                    Some(name) => ImportTarget::Unit(name),
                    None => ImportTarget::UnitBarrel,
                },
                AliasKind::Hook if !rest.is_empty() => {
                    ImportTarget::Hook(strip_source_extension(rest).to_string())
                }
                AliasKind::Util if !rest.is_empty() => {
                    ImportTarget::Util(strip_source_extension(rest).to_string())
                }
                _ => ImportTarget::Ignored,
            };
        }

        if source.starts_with("@/")
            || source.starts_with("~/")
            || source.starts_with('#')
            || source.starts_with("node:")
        {
            return ImportTarget::Ignored;
        }

        match package_name(source) {
            Some(name) if !self.is_excluded(&name) => ImportTarget::Package(name),
            _ => ImportTarget::Ignored,
        }
    }
}

/// Unit name of a path under a unit alias, matching the name the unit's own
/// file gets: the last segment, or the one before it when that is `index`.
///
/// `None` for the alias root itself, including a bare `index`.
fn unit_name(rest: &str) -> Option<String> {
    let mut segments = rest.rsplit('/').map(strip_source_extension);
    let last = segments.next().filter(|s| !s.is_empty())?;
    let stem = if last == "index" {
        segments.next().filter(|s| !s.is_empty())?
    } else {
        last
    };
    Some(to_kebab_case(stem))
}

/// Package name of a bare import specifier.
///
/// Scoped packages keep `@scope/name`, unscoped packages keep their first
/// path segment, so `motion/react` resolves to `motion`.
pub fn package_name(source: &str) -> Option<String> {
    let mut segments = source.split('/');
    let first = segments.next().filter(|s| !s.is_empty())?;

    if let Some(scope) = first.strip_prefix('@') {
        let name = segments.next().filter(|s| !s.is_empty())?;
        if scope.is_empty() {
            return None;
        }
        return Some(format!("{}/{}", first, name));
    }

    Some(first.to_string())
}
