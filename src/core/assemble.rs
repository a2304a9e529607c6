//! Registry assembly - one item per unit, plus link validation.

use std::{
    collections::{BTreeSet, HashSet},
    path::Path,
};

use crate::{
    config::Config,
    core::{
        AnalyzedUnit, UnitKind,
        registry::{LazyLoader, Registry, RegistryFile, RegistryItem, link_target},
        resolve::Resolution,
    },
    issues::{DanglingDependencyIssue, Issue},
    utils::{strip_source_extension, unit_name_from_path},
};

/// Kind-prefixed registry path, e.g. `hooks/use-copy.ts`.
pub fn registry_file_path(config: &Config, kind: UnitKind, relative: &str) -> String {
    format!("{}/{}", config.file_prefix(kind), relative)
}

/// Import specifier a lazy loader uses for a unit, e.g. `@/components/ButtonCopy`.
pub fn loader_module(config: &Config, kind: UnitKind, relative: &str) -> String {
    format!(
        "{}/{}",
        config.alias(kind).trim_end_matches('/'),
        strip_source_extension(relative)
    )
}

/// Build the registry item of one resolved unit.
///
/// Only component and example items list collaborator files, and only those
/// found on disk. Only example items get registry dependencies: a demo links
/// to the units it showcases, while components importing siblings keep no
/// link. A link is dropped when the item already embeds a renderable file of
/// that name, which covers the example linking to itself.
pub fn assemble_item(unit: &AnalyzedUnit, resolution: Resolution, config: &Config) -> RegistryItem {
    let kind = unit.source.kind;

    let mut files = vec![RegistryFile {
        path: registry_file_path(config, kind, &unit.source.relative),
        kind,
    }];
    if kind.is_renderable() {
        for collaborator in resolution.collaborators.iter().filter(|c| c.exists) {
            let file = RegistryFile {
                path: registry_file_path(config, collaborator.kind, &collaborator.relative),
                kind: collaborator.kind,
            };
            if !files.contains(&file) {
                files.push(file);
            }
        }
    }

    let registry_dependencies = if kind == UnitKind::Example {
        let embedded: HashSet<String> = files
            .iter()
            .filter(|file| file.kind.is_renderable())
            .map(|file| unit_name_from_path(Path::new(&file.path)))
            .collect();
        unit.references
            .unit_links()
            .filter(|link| !embedded.contains(link_target(&config.namespace, link)))
            .cloned()
            .collect()
    } else {
        BTreeSet::new()
    };

    let loader = kind.is_renderable().then(|| LazyLoader {
        module: loader_module(config, kind, &unit.source.relative),
    });

    RegistryItem {
        name: unit.name.clone(),
        kind,
        files,
        registry_dependencies,
        dependencies: resolution.dependencies,
        dev_dependencies: resolution.dev_dependencies,
        tailwind: resolution.tailwind,
        loader,
    }
}

/// Registry dependencies of `registry` naming no merged item.
pub fn dangling_dependencies(registry: &Registry, namespace: &str, strict: bool) -> Vec<Issue> {
    registry
        .values()
        .flat_map(|item| {
            item.registry_dependencies
                .iter()
                .filter(move |link| !registry.contains_key(link_target(namespace, link)))
                .map(move |link| {
                    Issue::DanglingDependency(DanglingDependencyIssue {
                        item: item.name.clone(),
                        dependency: link.clone(),
                        strict,
                    })
                })
        })
        .collect()
}
