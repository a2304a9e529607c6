use crate::{
    core::{Registry, UnitCounts, UnitKind},
    issues::Issue,
};

#[derive(Debug)]
pub enum CommandSummary {
    Build(BuildSummary),
    Check(CheckSummary),
    Init(InitSummary),
}

/// One row of the verbose item table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub name: String,
    pub kind: UnitKind,
    pub file_count: usize,
    pub dependency_count: usize,
    pub registry_dependency_count: usize,
}

impl ItemRow {
    pub fn from_registry(registry: &Registry) -> Vec<ItemRow> {
        registry
            .values()
            .map(|item| ItemRow {
                name: item.name.clone(),
                kind: item.kind,
                file_count: item.files.len(),
                dependency_count: item.dependencies.len(),
                registry_dependency_count: item.registry_dependencies.len(),
            })
            .collect()
    }
}

#[derive(Debug)]
pub struct BuildSummary {
    pub items: Vec<ItemRow>,
    pub unit_counts: UnitCounts,
    /// Artifact paths relative to the project root, module first.
    pub artifacts: Vec<String>,
    pub dry_run: bool,
    /// False when an error-severity issue kept the artifacts from being written.
    pub written: bool,
}

#[derive(Debug)]
pub struct CheckSummary {
    pub item_count: usize,
    pub artifacts: Vec<String>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: String,
    pub error: Option<String>,
}

/// Result of running a registry command.
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// All issues found, sorted.
    pub issues: Vec<Issue>,
}
