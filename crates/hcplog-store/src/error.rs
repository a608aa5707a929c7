use hcplog_core::CoreError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The record failed the strict checks applied before anything is saved.
    #[error("interaction rejected: {0}")]
    Rejected(#[from] CoreError),
    #[error("no interaction log with id {0}")]
    LogNotFound(i64),
    #[error("database schema version {found} is newer than this build supports ({supported})")]
    UnsupportedSchema { found: i64, supported: i64 },
    #[error("schema bookkeeping is inconsistent: {0}")]
    SchemaState(String),
    #[error("stored {column} value is unreadable: {detail}")]
    CorruptValue { column: &'static str, detail: String },
    #[error("cannot back up to {path}: {reason}")]
    BackupTarget { path: PathBuf, reason: &'static str },
    #[error("invalid data path: {0}")]
    InvalidDataPath(PathBuf),
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("sqlite error: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Coarse grouping of [`StoreError`] for callers that only need to know who
/// is at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// Missing or malformed interaction fields.
    InvalidInteraction,
    NotFound,
    /// A path supplied by the caller cannot be used.
    BadPath,
    /// The database was written by a newer build or has broken bookkeeping.
    Schema,
    /// A stored row no longer decodes.
    Corrupt,
    Environment,
    Database,
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::Rejected(_) => StoreErrorKind::InvalidInteraction,
            StoreError::LogNotFound(_) => StoreErrorKind::NotFound,
            StoreError::BackupTarget { .. } | StoreError::InvalidDataPath(_) => {
                StoreErrorKind::BadPath
            }
            StoreError::UnsupportedSchema { .. } | StoreError::SchemaState(_) => {
                StoreErrorKind::Schema
            }
            StoreError::CorruptValue { .. } => StoreErrorKind::Corrupt,
            StoreError::MissingHomeDir => StoreErrorKind::Environment,
            StoreError::Sql(_) | StoreError::Io(_) => StoreErrorKind::Database,
        }
    }

    /// The validation failure behind a rejected interaction, if that is
    /// what this is.
    pub fn rejection(&self) -> Option<&CoreError> {
        match self {
            StoreError::Rejected(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{StoreError, StoreErrorKind};
    use hcplog_core::CoreError;
    use std::path::PathBuf;

    #[test]
    fn validation_failures_are_invalid_interactions() {
        let err = StoreError::from(CoreError::EmptyTopics);
        assert_eq!(err.kind(), StoreErrorKind::InvalidInteraction);
        assert_eq!(err.rejection(), Some(&CoreError::EmptyTopics));
        assert_eq!(err.to_string(), format!("interaction rejected: {}", CoreError::EmptyTopics));
    }

    #[test]
    fn caller_paths_and_schema_problems_are_told_apart() {
        let target = StoreError::BackupTarget {
            path: PathBuf::from("/tmp/x"),
            reason: "it does not name a file",
        };
        assert_eq!(target.kind(), StoreErrorKind::BadPath);
        assert!(target.rejection().is_none());

        let schema = StoreError::UnsupportedSchema {
            found: 9,
            supported: 1,
        };
        assert_eq!(schema.kind(), StoreErrorKind::Schema);
        assert_eq!(StoreError::LogNotFound(4).kind(), StoreErrorKind::NotFound);
    }
}
