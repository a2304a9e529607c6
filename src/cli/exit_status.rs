use std::process::ExitCode;

use super::commands::CommandResult;

/// Exit status of the registry CLI.
///
/// - `Success` (0): artifacts built or verified; warnings alone never fail
/// - `Failure` (1): error-severity findings (stale artifacts, `--strict` dangling links)
/// - `Error` (2): the command itself failed (unreadable tree, bad config, write error)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    pub fn from_result(result: &CommandResult) -> Self {
        if result.error_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
