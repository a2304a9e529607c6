use std::{fs, io, path::Path};

use anyhow::{Context, Result};

use super::super::args::CheckCommand;
use super::{
    helper::finish,
    {CheckSummary, CommandResult, CommandSummary},
};
use crate::{
    core::BuildContext,
    issues::{Issue, StaleArtifactIssue},
};

/// Build in memory and compare against the artifacts on disk.
pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = BuildContext::new(&cmd.common)?;
    let output = ctx.build()?;
    let mut issues = output.issues;

    let artifacts = [
        (&ctx.config.module_output, ctx.module_output_path(), &output.module),
        (&ctx.config.manifest_output, ctx.manifest_output_path(), &output.manifest),
    ];
    for (relative, path, expected) in artifacts {
        if let Some(issue) = compare_artifact(relative, &path, expected)? {
            issues.push(issue);
        }
    }

    let summary = CheckSummary {
        item_count: output.registry.len(),
        artifacts: vec![
            ctx.config.module_output.clone(),
            ctx.config.manifest_output.clone(),
        ],
    };

    Ok(finish(CommandSummary::Check(summary), issues))
}

fn compare_artifact(relative: &str, path: &Path, expected: &str) -> Result<Option<Issue>> {
    let stale = |missing| {
        Some(Issue::StaleArtifact(StaleArtifactIssue {
            file_path: relative.to_string(),
            missing,
        }))
    };

    match fs::read_to_string(path) {
        Ok(actual) if actual == expected => Ok(None),
        Ok(_) => Ok(stale(false)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(stale(true)),
        Err(err) => {
            Err(err).with_context(|| format!("Failed to read artifact: {}", path.display()))
        }
    }
}
