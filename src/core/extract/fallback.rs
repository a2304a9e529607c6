//! Regex grammar used when a file cannot be parsed.
//!
//! Matched forms, applied to the raw text:
//!
//! - `import <clause> from "<src>"` and `import type <clause> from "<src>"`
//! - `export <clause> from "<src>"` (covers `export * from` and `export { … } from`)
//! - `import "<src>"` (side-effect import)
//! - `import("<src>")` (deferred import, e.g. inside `lazy(() => …)`)
//!
//! `<clause>` is made of identifiers, `*`, commas, whitespace and flat
//! `{ … }` groups, so a statement such as `export const x = { … }` never
//! starts a match that runs on into a later `from`. Named bindings are read
//! from the first `{ … }` group of the clause, with `type` modifiers and `as`
//! renames dropped; a leading identifier before `{` or `,` is the default
//! binding.
//!
//! Limitations: matches inside comments or string literals are not
//! distinguished from code, and a clause-shaped statement without a `from`
//! (e.g. `export default Foo` on the line before an import) is absorbed into
//! the following import's clause. Its source is still recorded correctly.

use std::sync::LazyLock;

use regex::Regex;

use super::{FileReferences, ImportOrigin, ImportRules};

static FROM_CLAUSE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\b(?:import|export)\s+(?:type\s+)?((?:[\w$*,\s]|\{[^{};"'`]*\})*?)\s*\bfrom\s*["']([^"']+)["']"#,
    )
    .unwrap()
});

static BARE_IMPORT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bimport\s*["']([^"']+)["']"#).unwrap());

static DYNAMIC_IMPORT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bimport\s*\(\s*["']([^"']+)["']\s*\)"#).unwrap());

static NAMED_BINDINGS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^}]*)\}").unwrap());

/// Extract references from raw source text.
pub fn extract(code: &str, rules: &ImportRules) -> FileReferences {
    let mut references = FileReferences::default();

    for caps in FROM_CLAUSE_REGEX.captures_iter(code) {
        let bindings = clause_bindings(&caps[1]);
        references.record(
            rules,
            &caps[2],
            bindings.iter().map(String::as_str),
            ImportOrigin::Static,
        );
    }

    for caps in BARE_IMPORT_REGEX.captures_iter(code) {
        references.record(rules, &caps[1], [], ImportOrigin::Static);
    }

    for caps in DYNAMIC_IMPORT_REGEX.captures_iter(code) {
        references.record(rules, &caps[1], [], ImportOrigin::Deferred);
    }

    references
}

/// Binding names of an import or export clause, default binding first.
fn clause_bindings(clause: &str) -> Vec<String> {
    let mut names = Vec::new();

    let default = clause.split(['{', ',']).next().unwrap_or_default().trim();
    if is_identifier(default) {
        names.push(default.to_string());
    }

    if let Some(caps) = NAMED_BINDINGS_REGEX.captures(clause) {
        for part in caps[1].split(',') {
            let part = part.trim();
            let part = part.strip_prefix("type ").unwrap_or(part).trim_start();
            if let Some(imported) = part.split_whitespace().next()
                && is_identifier(imported)
            {
                names.push(imported.to_string());
            }
        }
    }

    names
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}
