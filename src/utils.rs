//! Common utility functions shared across the codebase.

use std::path::Path;

/// Source extensions stripped from import specifiers and file names.
pub const SOURCE_EXTENSIONS: &[&str] = &["tsx", "ts", "jsx", "js"];

/// Converts an identifier or file stem to kebab-case.
///
/// Word boundaries are lowercase-to-uppercase transitions, the end of an
/// uppercase run followed by a lowercase letter, and any of `_`, `-`, `.` or
/// whitespace.
///
/// # Examples
///
/// ```
/// use registry_builder::utils::to_kebab_case;
///
/// assert_eq!(to_kebab_case("ButtonCopy"), "button-copy");
/// assert_eq!(to_kebab_case("useCopyToClipboard"), "use-copy-to-clipboard");
/// assert_eq!(to_kebab_case("AIChatInput"), "ai-chat-input");
/// assert_eq!(to_kebab_case("button_copy"), "button-copy");
/// assert_eq!(to_kebab_case("button-copy"), "button-copy");
/// ```
pub fn to_kebab_case(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c == '.' || c.is_whitespace() {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            continue;
        }

        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || ((prev.is_uppercase() || prev.is_ascii_digit()) && next_is_lower);
            if boundary && !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
        }

        out.extend(c.to_lowercase());
    }

    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Strips a known source extension from the end of `segment`.
pub fn strip_source_extension(segment: &str) -> &str {
    for ext in SOURCE_EXTENSIONS {
        if let Some(stem) = segment.strip_suffix(ext)
            && let Some(stem) = stem.strip_suffix('.')
        {
            return stem;
        }
    }
    segment
}

/// Derives the registry name of a unit from its path.
///
/// The name is the kebab-cased file stem; a stem of `index` takes the name of
/// its parent directory instead.
pub fn unit_name_from_path(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();

    if stem == "index"
        && let Some(parent) = path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|p| p.to_str())
    {
        return to_kebab_case(parent);
    }

    to_kebab_case(stem)
}

/// Joins path components with `/`, independent of the host separator.
pub fn to_forward_slashes(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use crate::utils::*;

    #[test]
    fn test_to_kebab_case() {
        assert_eq!(to_kebab_case("ButtonCopy"), "button-copy");
        assert_eq!(to_kebab_case("ButtonCopyDemo"), "button-copy-demo");
        assert_eq!(to_kebab_case("buttonCopy"), "button-copy");
        assert_eq!(to_kebab_case("AIChat"), "ai-chat");
        assert_eq!(to_kebab_case("Grid2Cols"), "grid2-cols");
        assert_eq!(to_kebab_case("Button3D"), "button3d");
        assert_eq!(to_kebab_case("use-copy"), "use-copy");
        assert_eq!(to_kebab_case("my component"), "my-component");
        assert_eq!(to_kebab_case("__private__"), "private");
        assert_eq!(to_kebab_case(""), "");
    }

    #[test]
    fn test_strip_source_extension() {
        assert_eq!(strip_source_extension("ButtonCopy.tsx"), "ButtonCopy");
        assert_eq!(strip_source_extension("cn.ts"), "cn");
        assert_eq!(strip_source_extension("ButtonCopy"), "ButtonCopy");
        assert_eq!(strip_source_extension("styles.css"), "styles.css");
        assert_eq!(strip_source_extension("tsx"), "tsx");
    }

    #[test]
    fn test_unit_name_from_path() {
        assert_eq!(
            unit_name_from_path(&PathBuf::from("components/ButtonCopy.tsx")),
            "button-copy"
        );
        assert_eq!(
            unit_name_from_path(&PathBuf::from("components/SiriOrb/index.tsx")),
            "siri-orb"
        );
        assert_eq!(unit_name_from_path(&PathBuf::from("hooks/useCopy.ts")), "use-copy");
    }

    #[test]
    fn test_to_forward_slashes() {
        let path: PathBuf = ["ui", "buttons", "ButtonCopy.tsx"].iter().collect();
        assert_eq!(to_forward_slashes(&path), "ui/buttons/ButtonCopy.tsx");
    }
}
