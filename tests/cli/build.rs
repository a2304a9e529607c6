use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_build_writes_both_artifacts() -> Result<()> {
    let test = CliTest::button_copy()?;

    let output = test.build_command().output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "✓ Built 2 items (1 components, 1 examples, 0 hooks, 0 utils)\n  wrote registry/index.tsx\n  wrote public/registry.json\n"
    );
    assert_eq!(stderr(&output), "");

    let module = test.read_file("registry/index.tsx")?;
    assert!(module.starts_with("// @generated by registry-builder."));
    assert!(module.contains(r#"component: React.lazy(() => import("@/components/ButtonCopy")),"#));
    assert!(module.contains(r#"component: React.lazy(() => import("@/examples/ButtonCopyDemo")),"#));

    let manifest: Value = serde_json::from_str(&test.read_file("public/registry.json")?)?;
    assert_eq!(
        manifest["button-copy"]["dependencies"],
        serde_json::json!(["lucide-react", "motion"])
    );
    assert_eq!(manifest["button-copy"]["registryDependencies"], serde_json::json!([]));
    assert_eq!(manifest["button-copy"]["type"], "registry:ui");
    assert_eq!(manifest["button-copy-demo"]["type"], "registry:example");
    assert_eq!(
        manifest["button-copy-demo"]["registryDependencies"],
        serde_json::json!(["smoothui/button-copy"])
    );
    assert!(manifest["button-copy"].get("component").is_none());

    Ok(())
}

#[test]
fn test_rebuild_is_byte_identical() -> Result<()> {
    let test = CliTest::button_copy()?;
    test.write_file("hooks/use-copy.ts", "import copy from \"copy-to-clipboard\";")?;
    test.write_file("utils/cn.ts", "import { clsx } from \"clsx\";")?;

    test.build_command().output()?;
    let module = test.read_file("registry/index.tsx")?;
    let manifest = test.read_file("public/registry.json")?;

    test.build_command().output()?;
    assert_eq!(test.read_file("registry/index.tsx")?, module);
    assert_eq!(test.read_file("public/registry.json")?, manifest);

    Ok(())
}

#[test]
fn test_dry_run_writes_nothing() -> Result<()> {
    let test = CliTest::button_copy()?;

    let output = test.build_command().arg("--dry-run").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("  would write public/registry.json"));
    assert!(!test.root().join("registry").exists());
    assert!(!test.root().join("public").exists());

    Ok(())
}

#[test]
fn test_dangling_dependency_warns_and_builds() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "examples/GhostDemo.tsx",
        "import { Ghost } from \"@/components\";\nexport default function GhostDemo() { return <Ghost />; }",
    )?;

    let output = test.build_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).contains(
        "warning[dangling-dependency]: registry dependency 'smoothui/ghost' has no matching item"
    ));
    assert!(test.root().join("public/registry.json").exists());

    Ok(())
}

#[test]
fn test_strict_dangling_dependency_fails_without_writing() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "examples/GhostDemo.tsx",
        "import { Ghost } from \"@/components\";\nexport default function GhostDemo() { return <Ghost />; }",
    )?;

    let output = test.build_command().arg("--strict").output()?;

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("error[dangling-dependency]"));
    assert!(err.contains("  --> ghost-demo"));
    assert!(err.contains("Build failed with 1 error, no artifacts written"));
    assert!(!test.root().join("registry/index.tsx").exists());
    assert!(!test.root().join("public/registry.json").exists());

    Ok(())
}

#[test]
fn test_root_flag_and_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "site/.registryrc.json",
        r#"{ "namespace": "acme", "componentsRoot": "src/ui", "manifestOutput": "dist/registry.json" }"#,
    )?;
    test.write_file("site/src/ui/Button.tsx", "import { Slot } from \"@radix-ui/react-slot\";")?;
    test.write_file(
        "site/examples/ButtonDemo.tsx",
        "import Button from \"@/components/Button\";",
    )?;

    let output = test.build_command().args(["-C", "site"]).output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let manifest: Value = serde_json::from_str(&test.read_file("site/dist/registry.json")?)?;
    assert_eq!(manifest["button"]["files"][0]["path"], "acme/Button.tsx");
    assert_eq!(
        manifest["button"]["dependencies"],
        serde_json::json!(["@radix-ui/react-slot"])
    );
    assert_eq!(
        manifest["button-demo"]["registryDependencies"],
        serde_json::json!(["acme/button"])
    );
    assert!(test.root().join("site/registry/index.tsx").exists());

    Ok(())
}

#[test]
fn test_parse_error_is_reported_but_not_fatal() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "components/Broken.tsx",
        "import { motion } from \"motion/react\";\nexport default function Broken() { return <div>; }",
    )?;

    let output = test.build_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    let err = stderr(&output);
    assert!(err.contains("warning[parse-error]"));
    assert!(err.contains("  --> components/Broken.tsx"));

    let manifest: Value = serde_json::from_str(&test.read_file("public/registry.json")?)?;
    assert_eq!(manifest["broken"]["dependencies"], serde_json::json!(["motion"]));

    Ok(())
}

#[test]
fn test_invalid_config_is_internal_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".registryrc.json", r#"{ "ignores": ["[unclosed"] }"#)?;

    let output = test.build_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error: "));

    Ok(())
}

#[test]
fn test_verbose_prints_item_table() -> Result<()> {
    let test = CliTest::button_copy()?;

    let output = test.build_command().arg("-v").output()?;

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("  button-copy       registry:ui       1 files, 2 deps, 0 registry deps"));
    assert!(out.contains("  button-copy-demo  registry:example  1 files, 0 deps, 1 registry deps"));

    Ok(())
}

#[test]
fn test_verbose_names_config_file() -> Result<()> {
    let test = CliTest::button_copy()?;

    let output = test.build_command().arg("-v").output()?;
    assert!(stderr(&output).contains("note: No .registryrc.json found, using default configuration"));

    test.command().arg("init").output()?;
    let output = test.build_command().arg("-v").output()?;
    let err = stderr(&output);
    let first = err.lines().next().unwrap_or_default();
    assert!(first.starts_with("note: Using config "), "stderr: {}", err);
    assert!(first.ends_with(".registryrc.json"));

    Ok(())
}
