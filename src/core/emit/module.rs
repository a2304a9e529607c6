use std::collections::BTreeSet;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::registry::{LazyLoader, Registry, RegistryItem};

/// Header line of the generated module.
pub const GENERATED_HEADER: &str = "// @generated by registry-builder. Do not edit by hand.";

/// Line-oriented writer with two-space indentation.
struct ModuleWriter {
    indent_level: usize,
    buffer: String,
}

impl ModuleWriter {
    fn new() -> Self {
        Self {
            indent_level: 0,
            buffer: String::new(),
        }
    }

    fn line(&mut self, s: &str) {
        for _ in 0..self.indent_level {
            self.buffer.push_str("  ");
        }
        self.buffer.push_str(s);
        self.buffer.push('\n');
    }

    fn blank(&mut self) {
        self.buffer.push('\n');
    }

    fn indent(&mut self) {
        self.indent_level += 1;
    }

    fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// `key: <json>,` where the value is rendered by serde_json.
    fn field<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)
            .with_context(|| format!("Failed to serialize field '{}'", key))?;
        self.line(&format!("{}: {},", key, json));
        Ok(())
    }

    fn build(self) -> String {
        self.buffer
    }
}

/// Render the registry as a TypeScript module exporting `Index`.
///
/// Every value is written through a JSON serializer, so names and paths with
/// quotes or backslashes come out escaped. Renderable items get a
/// `component` field holding a `React.lazy` loader for their own module.
pub fn emit_module(registry: &Registry) -> Result<String> {
    let mut w = ModuleWriter::new();
    w.line(GENERATED_HEADER);
    w.line("import * as React from \"react\"");
    w.blank();
    w.line("export const Index: Record<string, any> = {");
    w.indent();
    for (name, item) in registry {
        write_item(&mut w, name, item)?;
    }
    w.dedent();
    w.line("}");
    Ok(w.build())
}

fn write_item(w: &mut ModuleWriter, key: &str, item: &RegistryItem) -> Result<()> {
    let key = serde_json::to_string(key).context("Failed to serialize item key")?;
    w.line(&format!("{}: {{", key));
    w.indent();
    w.field("name", &item.name)?;
    w.field("type", &item.kind)?;
    w.field("registryDependencies", &item.registry_dependencies)?;
    w.field("dependencies", &item.dependencies)?;
    write_optional_set(w, "devDependencies", &item.dev_dependencies)?;
    if let Some(tailwind) = &item.tailwind {
        w.field("tailwind", tailwind)?;
    }
    w.field("files", &item.files)?;
    if let Some(loader) = &item.loader {
        write_loader(w, loader)?;
    }
    w.dedent();
    w.line("},");
    Ok(())
}

fn write_optional_set(w: &mut ModuleWriter, key: &str, set: &BTreeSet<String>) -> Result<()> {
    if set.is_empty() {
        return Ok(());
    }
    w.field(key, set)
}

fn write_loader(w: &mut ModuleWriter, loader: &LazyLoader) -> Result<()> {
    let module = serde_json::to_string(&loader.module).context("Failed to serialize loader")?;
    w.line(&format!(
        "component: React.lazy(() => import({})),",
        module
    ));
    Ok(())
}
