use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_check_reports_missing_artifacts() -> Result<()> {
    let test = CliTest::button_copy()?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "");
    assert_eq!(
        stderr(&output),
        "error[stale-artifact]: artifact does not exist\n  --> public/registry.json\n  = hint: run `registry build` to regenerate\n\n\
         error[stale-artifact]: artifact does not exist\n  --> registry/index.tsx\n  = hint: run `registry build` to regenerate\n\n\
         ✘ 2 problems (2 errors, 0 warnings)\n"
    );

    Ok(())
}

#[test]
fn test_check_passes_after_build() -> Result<()> {
    let test = CliTest::button_copy()?;
    test.build_command().output()?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "✓ Registry is up to date (2 items)\n  checked registry/index.tsx\n  checked public/registry.json\n"
    );

    Ok(())
}

#[test]
fn test_check_detects_source_change() -> Result<()> {
    let test = CliTest::button_copy()?;
    test.build_command().output()?;

    test.write_file(
        "components/ButtonCopy.tsx",
        "import { motion } from \"motion/react\";\nimport confetti from \"canvas-confetti\";",
    )?;
    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("error[stale-artifact]: artifact is out of date\n  --> public/registry.json"));
    assert!(err.contains("error[stale-artifact]: artifact is out of date\n  --> registry/index.tsx"));

    Ok(())
}
