//! Diagnostic types reported during a registry build.
//!
//! Each issue is self-contained with everything the reporter needs. None of
//! them stops a build by itself; the CLI decides from severity whether the
//! run fails.

use enum_dispatch::enum_dispatch;

use crate::core::UnitKind;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    ParseError,
    MalformedSidecar,
    DuplicateName,
    DanglingDependency,
    StaleArtifact,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::ParseError => write!(f, "parse-error"),
            Rule::MalformedSidecar => write!(f, "malformed-sidecar"),
            Rule::DuplicateName => write!(f, "duplicate-name"),
            Rule::DanglingDependency => write!(f, "dangling-dependency"),
            Rule::StaleArtifact => write!(f, "stale-artifact"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// Source file swc could not parse; its imports were read by the regex fallback.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

/// Sidecar JSON that failed to deserialize and was ignored.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MalformedSidecarIssue {
    pub file_path: String,
    pub error: String,
}

/// Two files of one traversal produced the same item name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DuplicateNameIssue {
    pub file_path: String,
    pub name: String,
    pub kind: UnitKind,
    /// File whose item was replaced.
    pub replaced_path: String,
}

/// Registry dependency that names no item of the merged registry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DanglingDependencyIssue {
    pub item: String,
    pub dependency: String,
    /// Escalated to an error by `--strict`.
    pub strict: bool,
}

/// Artifact on disk that differs from what a build would write.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct StaleArtifactIssue {
    pub file_path: String,
    pub missing: bool,
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Issue {
    ParseError(ParseErrorIssue),
    MalformedSidecar(MalformedSidecarIssue),
    DuplicateName(DuplicateNameIssue),
    DanglingDependency(DanglingDependencyIssue),
    StaleArtifact(StaleArtifactIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Trait for types that can be reported to CLI.
///
/// Uses `enum_dispatch` for static dispatch on the `Issue` enum.
#[enum_dispatch]
pub trait Report {
    /// File path or item name the issue is about.
    fn location(&self) -> &str;

    /// Primary message to display.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> &str {
        &self.file_path
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Severity::Warning
    }

    fn report_rule(&self) -> Rule {
        Rule::ParseError
    }

    fn hint(&self) -> Option<&str> {
        Some("imports were read with the text fallback and may be incomplete")
    }
}

impl Report for MalformedSidecarIssue {
    fn location(&self) -> &str {
        &self.file_path
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Severity::Warning
    }

    fn report_rule(&self) -> Rule {
        Rule::MalformedSidecar
    }

    fn hint(&self) -> Option<&str> {
        Some("the sidecar was ignored for this build")
    }
}

impl Report for DuplicateNameIssue {
    fn location(&self) -> &str {
        &self.file_path
    }

    fn message(&self) -> String {
        format!(
            "{} name '{}' is also produced by {}",
            self.kind, self.name, self.replaced_path
        )
    }

    fn report_severity(&self) -> Severity {
        Severity::Warning
    }

    fn report_rule(&self) -> Rule {
        Rule::DuplicateName
    }
}

impl Report for DanglingDependencyIssue {
    fn location(&self) -> &str {
        &self.item
    }

    fn message(&self) -> String {
        format!("registry dependency '{}' has no matching item", self.dependency)
    }

    fn report_severity(&self) -> Severity {
        if self.strict {
            Severity::Error
        } else {
            Severity::Warning
        }
    }

    fn report_rule(&self) -> Rule {
        Rule::DanglingDependency
    }
}

impl Report for StaleArtifactIssue {
    fn location(&self) -> &str {
        &self.file_path
    }

    fn message(&self) -> String {
        if self.missing {
            "artifact does not exist".to_string()
        } else {
            "artifact is out of date".to_string()
        }
    }

    fn report_severity(&self) -> Severity {
        Severity::Error
    }

    fn report_rule(&self) -> Rule {
        Rule::StaleArtifact
    }

    fn hint(&self) -> Option<&str> {
        Some("run `registry build` to regenerate")
    }
}
