use anyhow::Result;

use super::super::args::BuildCommand;
use super::{
    helper::{finish, write_artifact},
    {BuildSummary, CommandResult, CommandSummary, ItemRow},
};
use crate::{core::BuildContext, issues::Severity};

/// Build the registry and write both artifacts.
///
/// The module is written before the manifest. Nothing is written on
/// `--dry-run` or when the build produced an error-severity issue.
pub fn build(cmd: BuildCommand) -> Result<CommandResult> {
    let ctx = BuildContext::new(&cmd.common)?;
    let output = ctx.build()?;

    let blocked = output
        .issues
        .iter()
        .any(|issue| issue.severity() == Severity::Error);
    let written = !blocked && !cmd.dry_run;

    if written {
        write_artifact(&ctx.module_output_path(), &output.module)?;
        write_artifact(&ctx.manifest_output_path(), &output.manifest)?;
    }

    let summary = BuildSummary {
        items: ItemRow::from_registry(&output.registry),
        unit_counts: output.unit_counts,
        artifacts: vec![
            ctx.config.module_output.clone(),
            ctx.config.manifest_output.clone(),
        ],
        dry_run: cmd.dry_run,
        written,
    };

    Ok(finish(CommandSummary::Build(summary), output.issues))
}
