//! Process exit codes and the `--json-errors` error object.
//!
//! | code | meaning                              |
//! |------|--------------------------------------|
//! | 0    | duplicates found                     |
//! | 1    | scan, configuration or output failed |
//! | 2    | finished, no duplicates              |
//! | 64   | invalid command line                 |
//!
//! clap exits with 2 on its own usage errors. `main` parses with
//! `try_parse` and maps those to [`ExitCode::Usage`] instead, so a script
//! can treat 2 as "nothing found".

use serde::Serialize;

/// Outcome of a `dupefinder` run, as seen by the calling shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitCode {
    /// At least one duplicate group was reported
    Found,
    /// The run aborted
    Failed,
    /// The run finished without finding duplicates
    NoDuplicates,
    /// The command line could not be parsed (EX_USAGE)
    Usage,
}

impl ExitCode {
    /// Numeric status passed to the OS.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Found => 0,
            Self::Failed => 1,
            Self::NoDuplicates => 2,
            Self::Usage => 64,
        }
    }

    /// Stable identifier used in error lines, e.g. `DF001`.
    #[must_use]
    pub fn label(self) -> String {
        format!("DF{:03}", self.code())
    }

    /// Exit code for a run that completed.
    #[must_use]
    pub fn from_outcome(found_duplicates: bool) -> Self {
        if found_duplicates {
            Self::Found
        } else {
            Self::NoDuplicates
        }
    }

    /// Exit code for a command line clap rejected.
    ///
    /// `--help` and `--version` also surface as clap errors; they are not
    /// failures and yield `None`.
    #[must_use]
    pub fn for_parse_error(err: &clap::Error) -> Option<Self> {
        err.use_stderr().then_some(Self::Usage)
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code.code())
    }
}

/// Error object printed to stderr with `--json-errors`.
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    /// Identifier such as `DF001`
    pub code: String,
    /// Process exit status
    pub exit_code: u8,
    /// Message with its whole context chain
    pub message: String,
}

impl ErrorReport {
    /// Describe `err`, which ends the process with `exit_code`.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.label(),
            exit_code: exit_code.code(),
            message: format!("{:#}", err),
        }
    }
}
