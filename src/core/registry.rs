//! Registry data model.
//!
//! A [`RegistryItem`] is one distributable unit. The four per-kind registries
//! built during a run are merged into a single [`Registry`] by
//! [`KindRegistries::merge`].

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Kind of a distributable unit, one per source root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitKind {
    #[serde(rename = "registry:ui")]
    Component,
    #[serde(rename = "registry:example")]
    Example,
    #[serde(rename = "registry:hook")]
    Hook,
    #[serde(rename = "registry:lib")]
    Util,
}

impl UnitKind {
    /// All kinds in merge precedence order.
    pub const ALL: [UnitKind; 4] = [
        UnitKind::Component,
        UnitKind::Example,
        UnitKind::Hook,
        UnitKind::Util,
    ];

    /// The installer-facing type string.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitKind::Component => "registry:ui",
            UnitKind::Example => "registry:example",
            UnitKind::Hook => "registry:hook",
            UnitKind::Util => "registry:lib",
        }
    }

    /// Components and examples are renderable and carry a lazy loader.
    pub fn is_renderable(&self) -> bool {
        matches!(self, UnitKind::Component | UnitKind::Example)
    }
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitKind::Component => write!(f, "component"),
            UnitKind::Example => write!(f, "example"),
            UnitKind::Hook => write!(f, "hook"),
            UnitKind::Util => write!(f, "util"),
        }
    }
}

/// One file an installer copies for an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryFile {
    /// Kind-prefixed relative path, e.g. `smoothui/ButtonCopy.tsx`.
    pub path: String,
    #[serde(rename = "type")]
    pub kind: UnitKind,
}

/// Deferred-instantiation reference to a unit's own module.
///
/// Only the module artifact renders it; the JSON manifest never does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LazyLoader {
    /// Import specifier of the module, e.g. `@/components/ButtonCopy`.
    pub module: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryItem {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: UnitKind,
    pub files: Vec<RegistryFile>,
    #[serde(default)]
    pub registry_dependencies: BTreeSet<String>,
    #[serde(default)]
    pub dependencies: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub dev_dependencies: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tailwind: Option<String>,
    #[serde(skip)]
    pub loader: Option<LazyLoader>,
}

/// Merged mapping from item name to item, in insertion order.
pub type Registry = IndexMap<String, RegistryItem>;

/// The four registries produced by one run, one per unit kind.
#[derive(Debug, Default)]
pub struct KindRegistries {
    pub ui: Registry,
    pub example: Registry,
    pub hook: Registry,
    pub util: Registry,
}

impl KindRegistries {
    pub fn get_mut(&mut self, kind: UnitKind) -> &mut Registry {
        match kind {
            UnitKind::Component => &mut self.ui,
            UnitKind::Example => &mut self.example,
            UnitKind::Hook => &mut self.hook,
            UnitKind::Util => &mut self.util,
        }
    }

    /// Merge in precedence order ui, example, hook, util.
    ///
    /// On a name collision the later group's item replaces the earlier one;
    /// the key keeps the position of its first insertion.
    pub fn merge(self) -> Registry {
        let mut merged = Registry::new();
        for group in [self.ui, self.example, self.hook, self.util] {
            for (name, item) in group {
                merged.insert(name, item);
            }
        }
        merged
    }
}

/// Registry link for a unit name, e.g. `smoothui/button-copy`.
pub fn registry_link(namespace: &str, name: &str) -> String {
    format!("{}/{}", namespace, name)
}

/// Item name targeted by a registry link.
pub fn link_target<'a>(namespace: &str, link: &'a str) -> &'a str {
    link.strip_prefix(namespace)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(link)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn item(name: &str, kind: UnitKind) -> RegistryItem {
        RegistryItem {
            name: name.to_string(),
            kind,
            files: vec![RegistryFile {
                path: format!("x/{}.tsx", name),
                kind,
            }],
            registry_dependencies: BTreeSet::new(),
            dependencies: BTreeSet::new(),
            dev_dependencies: BTreeSet::new(),
            tailwind: None,
            loader: None,
        }
    }

    #[test]
    fn test_merge_precedence_later_group_wins() {
        let mut groups = KindRegistries::default();
        groups
            .ui
            .insert("button".into(), item("button", UnitKind::Component));
        groups
            .ui
            .insert("card".into(), item("card", UnitKind::Component));
        groups
            .util
            .insert("button".into(), item("button", UnitKind::Util));
        groups
            .hook
            .insert("use-copy".into(), item("use-copy", UnitKind::Hook));

        let merged = groups.merge();

        let keys: Vec<&str> = merged.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["button", "card", "use-copy"]);
        assert_eq!(merged["button"].kind, UnitKind::Util);
    }

    #[test]
    fn test_loader_is_not_serialized() {
        let mut value = item("button", UnitKind::Component);
        value.loader = Some(LazyLoader {
            module: "@/components/Button".into(),
        });

        let json = serde_json::to_string(&value).unwrap();
        assert!(!json.contains("@/components/Button"));
        assert!(json.contains(r#""type":"registry:ui""#));
        assert!(json.contains(r#""registryDependencies":[]"#));
        assert!(!json.contains("devDependencies"));
        assert!(!json.contains("tailwind"));
    }

    #[test]
    fn test_registry_link_round_trip() {
        let link = registry_link("smoothui", "button-copy");
        assert_eq!(link, "smoothui/button-copy");
        assert_eq!(link_target("smoothui", &link), "button-copy");
        assert_eq!(link_target("smoothui", "other/button"), "other/button");
        assert_eq!(link_target("smoothui", "smoothuix"), "smoothuix");
    }
}
