//! Report formatting and printing utilities.
//!
//! Issues go to stderr in cargo-style format; command summaries go to stdout.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    BuildSummary, CheckSummary, CommandResult, CommandSummary, InitSummary, ItemRow,
};
use crate::issues::{Issue, Report, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult, verbose: bool) {
    print_to(
        result,
        verbose,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    );
}

/// Print a command result to custom writers.
pub fn print_to<O: Write, E: Write>(
    result: &CommandResult,
    verbose: bool,
    out: &mut O,
    err: &mut E,
) {
    if !result.issues.is_empty() {
        for issue in &result.issues {
            print_issue(issue, err);
        }
        print_problem_count(result.error_count, result.warning_count, err);
    }

    match &result.summary {
        CommandSummary::Build(summary) => print_build(summary, result, verbose, out, err),
        CommandSummary::Check(summary) => print_check(summary, result, out),
        CommandSummary::Init(summary) => print_init(summary, out, err),
    }
}

/// Print issues followed by a problem count.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    for issue in issues {
        print_issue(issue, writer);
    }

    let errors = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    print_problem_count(errors, issues.len() - errors, writer);
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W) {
    let severity = match issue.severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}[{}]: {}",
        severity,
        issue.rule().to_string().cyan(),
        issue.message()
    );
    let _ = writeln!(writer, "  {} {}", "-->".blue(), issue.location());

    if let Some(hint) = issue.hint() {
        let _ = writeln!(writer, "  {} {} {}", "=".blue(), "hint:".bold().cyan(), hint);
    }

    let _ = writeln!(writer);
}

fn print_problem_count<W: Write>(errors: usize, warnings: usize, writer: &mut W) {
    let total = errors + warnings;
    let _ = writeln!(
        writer,
        "{} {} {} ({} {}, {} {})",
        FAILURE_MARK.red(),
        total,
        if total == 1 { "problem" } else { "problems" },
        errors,
        if errors == 1 { "error" } else { "errors" }.red(),
        warnings,
        if warnings == 1 { "warning" } else { "warnings" }.yellow()
    );
}

fn print_build<O: Write, E: Write>(
    summary: &BuildSummary,
    result: &CommandResult,
    verbose: bool,
    out: &mut O,
    err: &mut E,
) {
    if verbose {
        print_item_table(&summary.items, out);
    }

    if result.error_count > 0 {
        let _ = writeln!(
            err,
            "{} {}",
            FAILURE_MARK.red(),
            format!(
                "Build failed with {} {}, no artifacts written",
                result.error_count,
                if result.error_count == 1 { "error" } else { "errors" }
            )
            .red()
        );
        return;
    }

    let counts = &summary.unit_counts;
    let _ = writeln!(
        out,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Built {} {} ({} components, {} examples, {} hooks, {} utils)",
            summary.items.len(),
            if summary.items.len() == 1 { "item" } else { "items" },
            counts.components,
            counts.examples,
            counts.hooks,
            counts.utils
        )
        .green()
    );

    let verb = if summary.written { "wrote" } else { "would write" };
    for artifact in &summary.artifacts {
        let _ = writeln!(out, "  {} {}", verb.dimmed(), artifact);
    }
    if summary.dry_run {
        let _ = writeln!(out, "Run without {} to write the artifacts.", "--dry-run".cyan());
    }
}

fn print_check<O: Write>(summary: &CheckSummary, result: &CommandResult, out: &mut O) {
    if result.error_count > 0 {
        return;
    }
    let _ = writeln!(
        out,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Registry is up to date ({} {})",
            summary.item_count,
            if summary.item_count == 1 { "item" } else { "items" }
        )
        .green()
    );
    for artifact in &summary.artifacts {
        let _ = writeln!(out, "  {} {}", "checked".dimmed(), artifact);
    }
}

fn print_init<O: Write, E: Write>(summary: &InitSummary, out: &mut O, err: &mut E) {
    match &summary.error {
        Some(error) => {
            let _ = writeln!(err, "{} {}", "error:".bold().red(), error);
        }
        None => {
            let _ = writeln!(
                out,
                "{} {}",
                SUCCESS_MARK.green(),
                format!("Created {}", summary.path).green()
            );
        }
    }
}

/// Aligned table of the built items, one row per item.
fn print_item_table<W: Write>(items: &[ItemRow], writer: &mut W) {
    if items.is_empty() {
        return;
    }

    let name_width = items
        .iter()
        .map(|row| UnicodeWidthStr::width(row.name.as_str()))
        .max()
        .unwrap_or(0);

    for row in items {
        let padding = name_width - UnicodeWidthStr::width(row.name.as_str());
        let _ = writeln!(
            writer,
            "  {}{:padding$}  {:<16}  {} files, {} deps, {} registry deps",
            row.name.bold(),
            "",
            row.kind.as_str(),
            row.file_count,
            row.dependency_count,
            row.registry_dependency_count,
            padding = padding
        );
    }
    let _ = writeln!(writer);
}
