// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Transport port between the panel controller and whatever owns the storage
//! record (a local backend, the filesystem adapter, a test double).

use crate::snapshot::ConfigSnapshot;
use std::future::Future;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for transport operations.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Command issued with an empty record path.
    #[error("empty config path")]
    EmptyPath,
    /// The record location could not be resolved on this platform.
    #[error("could not resolve storage record location")]
    PathUnresolved,
    /// No record at the given path.
    #[error("storage record not found: {0}")]
    NotFound(PathBuf),
    /// The record is locked read-only.
    #[error("storage record is read-only: {0}")]
    ReadOnly(PathBuf),
    /// Restore requested but no backup exists.
    #[error("no backup found at {0}")]
    MissingBackup(PathBuf),
    /// The record (or its backup) is not a JSON object.
    #[error("invalid storage record: {0}")]
    InvalidRecord(String),
    /// I/O error while reading/writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Catch-all error variant.
    #[error("other: {0}")]
    Other(String),
}

/// Result alias for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// The five operations the panel issues against the storage record.
///
/// `fetch` is a suspension point and resolves asynchronously; the mutating
/// commands return their result synchronously (their effect may still settle
/// on the backend side afterwards).
pub trait ConfigTransport: Send + Sync + 'static {
    /// Read the current record.
    fn fetch(&self) -> impl Future<Output = TransportResult<ConfigSnapshot>> + Send;
    /// Lock (`true`) or unlock (`false`) the record at `path`.
    fn set_read_only(&self, path: &str, read_only: bool) -> TransportResult<()>;
    /// Replace the record's identifiers with freshly generated ones.
    fn reset(&self, path: &str) -> TransportResult<()>;
    /// Copy the record aside.
    fn backup(&self, path: &str) -> TransportResult<()>;
    /// Put the last backup back in place.
    fn restore(&self, path: &str) -> TransportResult<()>;
}
