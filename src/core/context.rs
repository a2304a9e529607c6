use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result};
use colored::Colorize;
use glob::Pattern;
use rayon::prelude::*;

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::{
        UnitKind,
        assemble::{assemble_item, dangling_dependencies},
        emit::{emit_manifest, emit_module},
        extract::{ExtractOutcome, FileReferences, ImportRules, extract_references},
        file_scanner::{ScanOptions, SourceUnit, scan_units},
        registry::{KindRegistries, Registry},
        resolve::{CollaboratorCache, Resolver},
    },
    issues::{DuplicateNameIssue, Issue, ParseErrorIssue},
    utils::unit_name_from_path,
};

/// A scanned unit with its extracted references.
#[derive(Debug, Clone)]
pub struct AnalyzedUnit {
    pub source: SourceUnit,
    /// Registry name derived from the file name.
    pub name: String,
    /// Path relative to the project root, for diagnostics.
    pub display_path: String,
    pub references: FileReferences,
}

/// Number of units found per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitCounts {
    pub components: usize,
    pub examples: usize,
    pub hooks: usize,
    pub utils: usize,
}

impl UnitCounts {
    fn add(&mut self, kind: UnitKind) {
        match kind {
            UnitKind::Component => self.components += 1,
            UnitKind::Example => self.examples += 1,
            UnitKind::Hook => self.hooks += 1,
            UnitKind::Util => self.utils += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.components + self.examples + self.hooks + self.utils
    }
}

/// Result of one in-memory build, before anything is written.
pub struct BuildOutput {
    pub registry: Registry,
    pub issues: Vec<Issue>,
    pub unit_counts: UnitCounts,
    /// Contents of the TypeScript module artifact.
    pub module: String,
    /// Contents of the JSON manifest artifact.
    pub manifest: String,
}

/// Build context: merged configuration plus the project root.
///
/// # Pipeline
///
/// 1. **Scan**: walk the four typed roots
/// 2. **Analyze**: read and extract every file (parallel, order preserved)
/// 3. **Resolve + assemble**: one item per unit into per-kind registries
/// 4. **Merge + validate**: fixed precedence merge, dangling link check
/// 5. **Emit**: module and manifest contents
///
/// Every run starts from nothing; no state survives between builds.
pub struct BuildContext {
    pub config: Config,
    /// Project root directory (for resolving relative paths).
    pub root_dir: PathBuf,
    /// Path of the loaded config file, if any.
    pub config_path: Option<PathBuf>,
    pub verbose: bool,
    /// Escalate dangling registry dependencies to errors.
    pub strict: bool,
}

impl BuildContext {
    /// Create a context from command line arguments.
    ///
    /// The config file is searched from `--root` (default: current directory)
    /// upwards. When one is found, its directory becomes the project root.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let start_dir = common_args
            .root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let config_result = load_config(&start_dir)?;
        let root_dir = config_result
            .path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or(start_dir);

        let ctx = Self {
            config: config_result.config,
            root_dir,
            config_path: config_result.path,
            verbose: common_args.verbose,
            strict: common_args.strict,
        };
        if ctx.verbose {
            ctx.print_config_note();
        }
        Ok(ctx)
    }

    fn print_config_note(&self) {
        match &self.config_path {
            Some(path) => eprintln!("{} Using config {}", "note:".bold().cyan(), path.display()),
            None => eprintln!(
                "{} No {} found, using default configuration",
                "note:".bold().cyan(),
                crate::config::CONFIG_FILE_NAME
            ),
        }
    }

    pub fn from_config(config: Config, root_dir: PathBuf) -> Self {
        Self {
            config,
            root_dir,
            config_path: None,
            verbose: false,
            strict: false,
        }
    }

    pub fn module_output_path(&self) -> PathBuf {
        self.root_dir.join(&self.config.module_output)
    }

    pub fn manifest_output_path(&self) -> PathBuf {
        self.root_dir.join(&self.config.manifest_output)
    }

    /// Scan all four roots, in merge precedence order.
    pub fn scan(&self) -> Result<Vec<SourceUnit>> {
        let ignores = self
            .config
            .ignores
            .iter()
            .map(|p| Pattern::new(p).with_context(|| format!("Invalid glob pattern: {}", p)))
            .collect::<Result<Vec<_>>>()?;

        let mut units = Vec::new();
        for kind in UnitKind::ALL {
            let options = ScanOptions {
                extension: self.config.extension(kind),
                ignored_dir: match kind {
                    UnitKind::Util => self.config.utils_ignored_dir.as_deref(),
                    _ => None,
                },
                ignores: &ignores,
                verbose: self.verbose,
            };
            let root = self.root_dir.join(self.config.root(kind));
            units.extend(scan_units(&root, kind, &options)?);
        }
        Ok(units)
    }

    /// Read and extract every unit.
    ///
    /// Files are processed in parallel; the result keeps the input order. A
    /// file swc cannot parse yields a parse-error issue and fallback references.
    pub fn analyze(
        &self,
        units: Vec<SourceUnit>,
        rules: &ImportRules,
    ) -> Result<(Vec<AnalyzedUnit>, Vec<Issue>)> {
        let results = units
            .into_par_iter()
            .map(|source| -> Result<(SourceUnit, ExtractOutcome)> {
                let code = fs::read_to_string(&source.path)
                    .with_context(|| format!("Failed to read file: {}", source.path.display()))?;
                let outcome = extract_references(&code, &source.path.to_string_lossy(), rules);
                Ok((source, outcome))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut analyzed = Vec::with_capacity(results.len());
        let mut issues = Vec::new();
        for (source, outcome) in results {
            let display_path = format!(
                "{}/{}",
                self.config.root(source.kind).trim_end_matches('/'),
                source.relative
            );
            if let Some(error) = outcome.parse_error {
                issues.push(Issue::ParseError(ParseErrorIssue {
                    file_path: display_path.clone(),
                    error,
                }));
            }
            analyzed.push(AnalyzedUnit {
                name: unit_name_from_path(&source.path),
                display_path,
                source,
                references: outcome.references,
            });
        }

        Ok((analyzed, issues))
    }

    /// Run the whole pipeline in memory.
    pub fn build(&self) -> Result<BuildOutput> {
        let rules = ImportRules::from_config(&self.config);

        let units = self.scan()?;
        let (analyzed, mut issues) = self.analyze(units, &rules)?;

        let mut cache = CollaboratorCache::new(&rules);
        for unit in &analyzed {
            if !unit.source.kind.is_renderable() {
                cache.seed(unit.source.path.clone(), unit.references.packages.clone());
            }
        }
        let mut resolver = Resolver::new(&self.config, &self.root_dir, cache);

        let mut groups = KindRegistries::default();
        let mut origins: HashMap<(UnitKind, String), String> = HashMap::new();
        let mut unit_counts = UnitCounts::default();

        for unit in &analyzed {
            let kind = unit.source.kind;
            unit_counts.add(kind);

            let mut resolution = resolver.resolve(unit)?;
            issues.extend(resolution.issue.take());
            let item = assemble_item(unit, resolution, &self.config);

            if let Some(replaced_path) =
                origins.insert((kind, unit.name.clone()), unit.display_path.clone())
            {
                issues.push(Issue::DuplicateName(DuplicateNameIssue {
                    file_path: unit.display_path.clone(),
                    name: unit.name.clone(),
                    kind,
                    replaced_path,
                }));
            }
            groups.get_mut(kind).insert(unit.name.clone(), item);
        }

        let registry = groups.merge();
        issues.extend(dangling_dependencies(
            &registry,
            &self.config.namespace,
            self.strict,
        ));
        issues.sort();

        let module = emit_module(&registry)?;
        let manifest = emit_manifest(&registry)?;

        Ok(BuildOutput {
            registry,
            issues,
            unit_counts,
            module,
            manifest,
        })
    }
}
