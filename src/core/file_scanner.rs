use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use glob::Pattern;
use walkdir::WalkDir;

use crate::{core::UnitKind, utils::to_forward_slashes};

/// One source file discovered under a typed root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    pub kind: UnitKind,
    /// Path on disk (root joined with `relative`).
    pub path: PathBuf,
    /// Path relative to the kind's root, `/`-separated, with extension.
    pub relative: String,
}

/// Per-root scanning rules.
pub struct ScanOptions<'a> {
    /// Extension of unit source files, without the dot.
    pub extension: &'a str,
    /// Top-level subfolder of the root that is skipped entirely.
    pub ignored_dir: Option<&'a str>,
    /// Glob patterns matched against `relative` paths.
    pub ignores: &'a [Pattern],
    pub verbose: bool,
}

/// Enumerate every unit file of `kind` under `root`.
///
/// Results are sorted by relative path so repeated runs over the same tree
/// see the same order. A missing root yields no files. Any other traversal
/// error aborts the scan.
pub fn scan_units(root: &Path, kind: UnitKind, options: &ScanOptions) -> Result<Vec<SourceUnit>> {
    if !root.is_dir() {
        if options.verbose {
            eprintln!(
                "{} {} root does not exist: {}",
                "note:".bold().cyan(),
                kind,
                root.display()
            );
        }
        return Ok(Vec::new());
    }

    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        !(entry.depth() == 1
            && entry.file_type().is_dir()
            && options
                .ignored_dir
                .is_some_and(|dir| entry.file_name() == dir))
    });

    let mut units = Vec::new();
    for entry in walker {
        let entry = entry.with_context(|| format!("Cannot access path under {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(options.extension) {
            continue;
        }

        let relative = path
            .strip_prefix(root)
            .map(to_forward_slashes)
            .with_context(|| format!("Path escapes its root: {}", path.display()))?;

        if options.ignores.iter().any(|p| p.matches(&relative)) {
            continue;
        }

        units.push(SourceUnit {
            kind,
            path: path.to_path_buf(),
            relative,
        });
    }

    units.sort_by(|a, b| a.relative.cmp(&b.relative));
    Ok(units)
}
