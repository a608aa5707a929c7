use anyhow::Error;
use hcplog_config::ConfigError;
use hcplog_core::time::TimeParseError;
use hcplog_core::CoreError;
use hcplog_remote::RemoteError;
use hcplog_store::error::{StoreError, StoreErrorKind};
use std::error::Error as StdError;
use std::process::ExitCode;
use thiserror::Error as ThisError;

/// Failures raised by the command layer itself, before any backend is involved.
#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn not_found(message: impl Into<String>) -> Error {
    CliError::NotFound(message.into()).into()
}

/// Process outcome for a failed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Failure = 1,
    NotFound = 2,
    InvalidInput = 3,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}

pub fn report_error(err: &Error, verbose: bool) {
    if verbose {
        eprintln!("error: {:#}", err);
    } else {
        eprintln!("error: {}", err);
    }
}

/// The first cause in the chain that names a status decides it.
pub fn exit_status_for(err: &Error) -> ExitStatus {
    err.chain()
        .find_map(classify)
        .unwrap_or(ExitStatus::Failure)
}

fn classify(cause: &(dyn StdError + 'static)) -> Option<ExitStatus> {
    if let Some(err) = cause.downcast_ref::<CliError>() {
        return Some(match err {
            CliError::InvalidInput(_) => ExitStatus::InvalidInput,
            CliError::NotFound(_) => ExitStatus::NotFound,
        });
    }
    if let Some(err) = cause.downcast_ref::<StoreError>() {
        return Some(store_status(err));
    }
    if let Some(err) = cause.downcast_ref::<ConfigError>() {
        return Some(match err {
            ConfigError::MissingHomeDir => ExitStatus::Failure,
            _ => ExitStatus::InvalidInput,
        });
    }
    if let Some(err) = cause.downcast_ref::<RemoteError>() {
        return Some(remote_status(err));
    }
    if cause.is::<CoreError>() || cause.is::<TimeParseError>() {
        return Some(ExitStatus::InvalidInput);
    }
    None
}

fn store_status(err: &StoreError) -> ExitStatus {
    match err.kind() {
        StoreErrorKind::NotFound => ExitStatus::NotFound,
        StoreErrorKind::InvalidInteraction | StoreErrorKind::BadPath => ExitStatus::InvalidInput,
        StoreErrorKind::Schema
        | StoreErrorKind::Corrupt
        | StoreErrorKind::Environment
        | StoreErrorKind::Database => ExitStatus::Failure,
    }
}

fn remote_status(err: &RemoteError) -> ExitStatus {
    match err {
        RemoteError::Status { status: 404, .. } => ExitStatus::NotFound,
        err if err.is_client_error() => ExitStatus::InvalidInput,
        RemoteError::Url(_) | RemoteError::InvalidRequest(_) => ExitStatus::InvalidInput,
        RemoteError::Http(_) | RemoteError::Status { .. } => ExitStatus::Failure,
    }
}

#[cfg(test)]
mod tests {
    use super::{exit_status_for, invalid_input, not_found, ExitStatus};
    use anyhow::{anyhow, Context};
    use hcplog_core::CoreError;
    use hcplog_store::error::StoreError;
    use std::path::PathBuf;

    #[test]
    fn command_errors_keep_their_status_under_context() {
        let err = Err::<(), _>(not_found("log 9"))
            .context("show interaction")
            .unwrap_err();
        assert_eq!(exit_status_for(&err), ExitStatus::NotFound);
        assert_eq!(exit_status_for(&invalid_input("bad")), ExitStatus::InvalidInput);
    }

    #[test]
    fn store_errors_map_by_kind() {
        let missing: anyhow::Error = StoreError::LogNotFound(4).into();
        assert_eq!(exit_status_for(&missing), ExitStatus::NotFound);

        let rejected: anyhow::Error =
            StoreError::Rejected(CoreError::EmptyHcpName).into();
        assert_eq!(exit_status_for(&rejected), ExitStatus::InvalidInput);

        let target: anyhow::Error = StoreError::BackupTarget {
            path: PathBuf::from("/tmp/x.db"),
            reason: "it is the live database or one of its files",
        }
        .into();
        assert_eq!(exit_status_for(&target), ExitStatus::InvalidInput);

        let schema: anyhow::Error = StoreError::UnsupportedSchema {
            found: 9,
            supported: 1,
        }
        .into();
        assert_eq!(exit_status_for(&schema), ExitStatus::Failure);
    }

    #[test]
    fn unclassified_errors_are_plain_failures() {
        assert_eq!(exit_status_for(&anyhow!("boom")), ExitStatus::Failure);
    }
}
