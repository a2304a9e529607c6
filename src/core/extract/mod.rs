//! Import extraction - per-file reference collection.
//!
//! Each source file yields a [`FileReferences`] value with four reference
//! categories: internal unit links (static and deferred), hooks, utilities and
//! external packages.
//!
//! Files are parsed with swc and walked by [`ImportVisitor`]. When swc rejects
//! a file, the regex grammar in [`fallback`] is applied to the raw text
//! instead so one malformed file never hides its dependencies.

pub mod fallback;
mod rules;
mod visitor;


use std::collections::BTreeSet;

use indexmap::IndexSet;
use swc_ecma_visit::VisitWith;

use crate::{
    core::{parsers::jsx::parse_source, registry::registry_link},
    utils::to_kebab_case,
};

pub use rules::{ImportRules, ImportTarget, package_name};
pub use visitor::ImportVisitor;

/// How an import was written in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOrigin {
    /// `import … from`, `export … from`, or a side-effect import.
    Static,
    /// `import("…")`, typically inside a `lazy(() => …)` thunk.
    Deferred,
}

/// References extracted from one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReferences {
    /// Registry links from static imports, e.g. `smoothui/button-copy`.
    pub static_units: IndexSet<String>,
    /// Registry links from dynamic imports.
    pub deferred_units: IndexSet<String>,
    /// Hook identifiers, relative to the hooks alias.
    pub hooks: IndexSet<String>,
    /// Utility identifiers, relative to the utils alias.
    pub utils: IndexSet<String>,
    /// External package names.
    pub packages: BTreeSet<String>,
}

impl FileReferences {
    /// Static links followed by deferred links not already seen statically.
    pub fn unit_links(&self) -> impl Iterator<Item = &String> {
        self.static_units.iter().chain(
            self.deferred_units
                .iter()
                .filter(|link| !self.static_units.contains(*link)),
        )
    }

    /// Record one import source with the binding names it brings in.
    pub fn record<'b>(
        &mut self,
        rules: &ImportRules,
        source: &str,
        bindings: impl IntoIterator<Item = &'b str>,
        origin: ImportOrigin,
    ) {
        let units = match origin {
            ImportOrigin::Static => &mut self.static_units,
            ImportOrigin::Deferred => &mut self.deferred_units,
        };

        match rules.classify(source) {
            ImportTarget::Unit(name) => {
                units.insert(registry_link(rules.namespace(), &name));
            }
            ImportTarget::UnitBarrel => {
                for binding in bindings {
                    let name = to_kebab_case(binding);
                    if !name.is_empty() {
                        units.insert(registry_link(rules.namespace(), &name));
                    }
                }
            }
            ImportTarget::Hook(id) => {
                self.hooks.insert(id);
            }
            ImportTarget::Util(id) => {
                self.utils.insert(id);
            }
            ImportTarget::Package(name) => {
                self.packages.insert(name);
            }
            ImportTarget::Ignored => {}
        }
    }
}

/// Result of extracting one file.
#[derive(Debug, Clone)]
pub struct ExtractOutcome {
    pub references: FileReferences,
    /// Set when swc rejected the file and the regex fallback was used.
    pub parse_error: Option<String>,
}

/// Extract the references of one file's source text.
pub fn extract_references(code: &str, file_path: &str, rules: &ImportRules) -> ExtractOutcome {
    match parse_source(code.to_string(), file_path) {
        Ok(module) => {
            let mut visitor = ImportVisitor::new(rules);
            module.visit_with(&mut visitor);
            ExtractOutcome {
                references: visitor.into_references(),
                parse_error: None,
            }
        }
        Err(err) => ExtractOutcome {
            references: fallback::extract(code, rules),
            parse_error: Some(err.to_string()),
        },
    }
}
