//! Dependency resolution - one-hop expansion through hooks and utilities.
//!
//! A component or example inherits the external packages of every hook and
//! utility it imports, but not those of their own collaborators. Sidecar
//! overrides are merged for every unit kind.

use std::{
    collections::{BTreeSet, HashMap},
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::{
    config::Config,
    core::{
        AnalyzedUnit, UnitKind,
        extract::{ImportRules, extract_references},
        sidecar::{SidecarLoad, load_sidecar, sidecar_path},
    },
    issues::{Issue, MalformedSidecarIssue},
    utils::to_forward_slashes,
};

/// A hook or utility referenced by a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collaborator {
    pub kind: UnitKind,
    /// Path relative to the collaborator's root, with extension.
    pub relative: String,
    /// Whether the file exists on disk.
    pub exists: bool,
}

/// Everything the resolver adds to one unit.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub collaborators: Vec<Collaborator>,
    pub dependencies: BTreeSet<String>,
    pub dev_dependencies: BTreeSet<String>,
    pub tailwind: Option<String>,
    /// Malformed sidecar diagnostic, if any.
    pub issue: Option<Issue>,
}

/// Path-keyed read-through cache of collaborator package references.
pub struct CollaboratorCache<'a> {
    rules: &'a ImportRules,
    packages: HashMap<PathBuf, BTreeSet<String>>,
}

impl<'a> CollaboratorCache<'a> {
    pub fn new(rules: &'a ImportRules) -> Self {
        Self {
            rules,
            packages: HashMap::new(),
        }
    }

    /// Record packages already extracted for `path`.
    pub fn seed(&mut self, path: PathBuf, packages: BTreeSet<String>) {
        self.packages.insert(path, packages);
    }

    /// Packages referenced by the existing file at `path`, reading it on first use.
    pub fn packages(&mut self, path: &Path) -> Result<&BTreeSet<String>> {
        if !self.packages.contains_key(path) {
            let code = fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            let outcome = extract_references(&code, &path.to_string_lossy(), self.rules);
            self.packages
                .insert(path.to_path_buf(), outcome.references.packages);
        }
        Ok(&self.packages[path])
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

pub struct Resolver<'a> {
    config: &'a Config,
    root_dir: &'a Path,
    cache: CollaboratorCache<'a>,
}

impl<'a> Resolver<'a> {
    pub fn new(config: &'a Config, root_dir: &'a Path, cache: CollaboratorCache<'a>) -> Self {
        Self {
            config,
            root_dir,
            cache,
        }
    }

    /// Find the file of collaborator `id`: `<root>/<id>.<ext>`, then
    /// `<root>/<id>/index.<ext>`.
    ///
    /// Returns the path relative to the root and whether it exists. An absent
    /// collaborator reports the `<id>.<ext>` form.
    pub fn locate(&self, kind: UnitKind, id: &str) -> (String, Option<PathBuf>) {
        let root = self.root_dir.join(self.config.root(kind));
        let ext = self.config.extension(kind);

        let direct = format!("{}.{}", id, ext);
        let direct_path = root.join(&direct);
        if direct_path.is_file() {
            return (direct, Some(direct_path));
        }

        let index = format!("{}/index.{}", id, ext);
        let index_path = root.join(&index);
        if index_path.is_file() {
            return (index, Some(index_path));
        }

        (direct, None)
    }

    pub fn resolve(&mut self, unit: &AnalyzedUnit) -> Result<Resolution> {
        let mut resolution = Resolution {
            dependencies: unit.references.packages.clone(),
            ..Resolution::default()
        };

        if unit.source.kind.is_renderable() {
            let references = unit
                .references
                .hooks
                .iter()
                .map(|id| (UnitKind::Hook, id))
                .chain(unit.references.utils.iter().map(|id| (UnitKind::Util, id)));

            for (kind, id) in references {
                let (relative, path) = self.locate(kind, id);
                // Missing collaborators are skipped so renamed files don't abort the build.
                if let Some(path) = &path {
                    let packages = self.cache.packages(path)?;
                    resolution.dependencies.extend(packages.iter().cloned());
                }
                resolution.collaborators.push(Collaborator {
                    kind,
                    relative,
                    exists: path.is_some(),
                });
            }
        }

        match load_sidecar(&unit.source.path)? {
            SidecarLoad::Absent => {}
            SidecarLoad::Loaded(sidecar) => {
                let rules = self.cache.rules;
                resolution.dependencies.extend(
                    sidecar
                        .additional_dependencies
                        .into_iter()
                        .filter(|package| !rules.is_excluded(package)),
                );
                resolution
                    .dev_dependencies
                    .extend(sidecar.dev_dependencies);
                resolution.tailwind = sidecar.tailwind;
            }
            SidecarLoad::Malformed(error) => {
                resolution.issue = Some(Issue::MalformedSidecar(MalformedSidecarIssue {
                    file_path: to_forward_slashes(&sidecar_path(Path::new(&unit.display_path))),
                    error,
                }));
            }
        }

        Ok(resolution)
    }

    pub fn cache(&self) -> &CollaboratorCache<'a> {
        &self.cache
    }
}
