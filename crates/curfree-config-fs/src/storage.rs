// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `ConfigTransport` over the editor's `storage.json`.
//!
//! The record is a flat JSON object; the four telemetry identifiers sit under
//! dotted keys next to many unrelated ones. Reset rewrites only those four.
//! The backup is a byte copy at `<record>.back`.

use crate::ids;
use curfree_app_core::snapshot::{ConfigSnapshot, Identifier};
use curfree_app_core::transport::{ConfigTransport, TransportError, TransportResult};
use directories::BaseDirs;
use serde_json::{Map, Value};
use std::ffi::OsString;
use std::fs;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Default record location for the current platform, if the home dir resolves.
pub fn default_storage_path() -> Option<PathBuf> {
    let home = BaseDirs::new()?.home_dir().to_path_buf();
    let path = if cfg!(target_os = "macos") {
        home.join("Library/Application Support/Cursor/User/globalStorage/storage.json")
    } else if cfg!(windows) {
        home.join("AppData")
            .join("Roaming")
            .join("Cursor")
            .join("User")
            .join("globalStorage")
            .join("storage.json")
    } else {
        home.join(".cursor").join("storage.json")
    };
    Some(path)
}

/// Backup location for `record`.
pub fn backup_path(record: &Path) -> PathBuf {
    let mut name = OsString::from(record.as_os_str());
    name.push(".back");
    PathBuf::from(name)
}

/// Filesystem transport. `fetch` reads the configured record; the commands
/// act on the path the controller hands them.
#[derive(Debug, Clone)]
pub struct FsTransport {
    record: Option<PathBuf>,
}

impl FsTransport {
    /// Transport over the record at `record`.
    pub fn new(record: impl Into<PathBuf>) -> Self {
        Self {
            record: Some(record.into()),
        }
    }

    /// Transport over `override_path`, or the platform default when unset.
    /// Fetches fail with [`TransportError::PathUnresolved`] if neither exists.
    pub fn with_default_location(override_path: Option<PathBuf>) -> Self {
        let record = override_path.or_else(default_storage_path);
        if record.is_none() {
            tracing::warn!("could not resolve the storage record location");
        }
        Self { record }
    }

    /// Record this transport fetches.
    pub fn record_path(&self) -> Option<&Path> {
        self.record.as_deref()
    }
}

fn non_empty(path: &str) -> TransportResult<&Path> {
    if path.is_empty() {
        Err(TransportError::EmptyPath)
    } else {
        Ok(Path::new(path))
    }
}

fn read_bytes(path: &Path) -> TransportResult<Vec<u8>> {
    fs::read(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => TransportError::NotFound(path.to_path_buf()),
        _ => TransportError::Io(err),
    })
}

fn parse_object(bytes: &[u8], what: &Path) -> TransportResult<Map<String, Value>> {
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Object(map) => Ok(map),
        _ => Err(TransportError::InvalidRecord(format!(
            "{} is not a JSON object",
            what.display()
        ))),
    }
}

#[cfg(unix)]
fn is_read_only(path: &Path) -> TransportResult<bool> {
    use std::os::unix::fs::PermissionsExt;
    Ok(fs::metadata(path)?.permissions().mode() & 0o200 == 0)
}

#[cfg(not(unix))]
fn is_read_only(path: &Path) -> TransportResult<bool> {
    Ok(fs::metadata(path)?.permissions().readonly())
}

#[cfg(unix)]
fn apply_read_only(path: &Path, read_only: bool) -> TransportResult<()> {
    use std::os::unix::fs::PermissionsExt;
    let mode = if read_only { 0o444 } else { 0o644 };
    fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    Ok(())
}

#[cfg(not(unix))]
#[allow(clippy::permissions_set_readonly_false)]
fn apply_read_only(path: &Path, read_only: bool) -> TransportResult<()> {
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_readonly(read_only);
    fs::set_permissions(path, perms)?;
    Ok(())
}

fn read_snapshot(path: &Path) -> TransportResult<ConfigSnapshot> {
    let bytes = read_bytes(path)?;
    parse_object(&bytes, path)?;
    let mut snapshot: ConfigSnapshot = serde_json::from_slice(&bytes)?;
    snapshot.config_path = Some(path.display().to_string());
    snapshot.is_read_only = is_read_only(path)?;
    Ok(snapshot)
}

/// Reads the record, checks it is an object, and writes the backup copy.
fn back_up(path: &Path) -> TransportResult<(Vec<u8>, Map<String, Value>)> {
    let bytes = read_bytes(path)?;
    let record = parse_object(&bytes, path)?;
    fs::write(backup_path(path), &bytes)?;
    Ok((bytes, record))
}

impl ConfigTransport for FsTransport {
    fn fetch(&self) -> impl Future<Output = TransportResult<ConfigSnapshot>> + Send {
        let record = self.record.clone();
        async move {
            let record = record.ok_or(TransportError::PathUnresolved)?;
            tokio::task::spawn_blocking(move || read_snapshot(&record))
                .await
                .map_err(|err| TransportError::Other(format!("fetch task failed: {err}")))?
        }
    }

    fn set_read_only(&self, path: &str, read_only: bool) -> TransportResult<()> {
        apply_read_only(non_empty(path)?, read_only)
    }

    fn reset(&self, path: &str) -> TransportResult<()> {
        let path = non_empty(path)?;
        let (original, mut record) = back_up(path)?;
        for id in Identifier::ALL {
            record.insert(id.wire_key().to_owned(), Value::String(ids::fresh(id)));
        }
        let updated = serde_json::to_vec_pretty(&Value::Object(record))?;
        if let Err(err) = fs::write(path, updated) {
            if let Err(undo) = fs::write(path, &original) {
                tracing::error!(path = %path.display(), error = %undo, "could not put the original record back");
            }
            return Err(err.into());
        }
        Ok(())
    }

    fn backup(&self, path: &str) -> TransportResult<()> {
        back_up(non_empty(path)?).map(|_| ())
    }

    fn restore(&self, path: &str) -> TransportResult<()> {
        let path = non_empty(path)?;
        if is_read_only(path)? {
            return Err(TransportError::ReadOnly(path.to_path_buf()));
        }
        let backup = backup_path(path);
        let bytes = match fs::read(&backup) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(TransportError::MissingBackup(backup))
            }
            Err(err) => return Err(err.into()),
        };
        parse_object(&bytes, &backup)?;
        fs::write(path, bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use tempfile::TempDir;

    const RECORD: &str = r#"{
        "telemetry.machineId": "m1",
        "telemetry.macMachineId": "mac1",
        "telemetry.devDeviceId": "dev1",
        "telemetry.sqmId": "{SQM1}",
        "theme": "dark"
    }"#;

    fn record_in(dir: &TempDir) -> (FsTransport, PathBuf, String) {
        let path = dir.path().join("storage.json");
        fs::write(&path, RECORD).unwrap();
        let text = path.display().to_string();
        (FsTransport::new(&path), path, text)
    }

    fn stored(path: &Path) -> Map<String, Value> {
        parse_object(&fs::read(path).unwrap(), path).unwrap()
    }

    #[tokio::test]
    async fn fetch_reads_identifiers_and_path() {
        let dir = tempfile::tempdir().unwrap();
        let (transport, _, text) = record_in(&dir);
        let snap = transport.fetch().await.unwrap();
        assert_eq!(snap.path(), Some(text.as_str()));
        assert!(!snap.is_read_only);
        assert_eq!(snap.machine_id.as_deref(), Some("m1"));
        assert_eq!(snap.sqm_id.as_deref(), Some("{SQM1}"));
    }

    #[tokio::test]
    async fn fetch_missing_record_fails() {
        let dir = tempfile::tempdir().unwrap();
        let transport = FsTransport::new(dir.path().join("absent.json"));
        assert!(matches!(
            transport.fetch().await,
            Err(TransportError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn fetch_rejects_non_object_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "[1, 2]").unwrap();
        assert!(matches!(
            FsTransport::new(&path).fetch().await,
            Err(TransportError::InvalidRecord(_))
        ));
    }

    #[tokio::test]
    async fn read_only_round_trip_shows_in_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let (transport, _, text) = record_in(&dir);
        transport.set_read_only(&text, true).unwrap();
        assert!(transport.fetch().await.unwrap().is_read_only);
        transport.set_read_only(&text, false).unwrap();
        assert!(!transport.fetch().await.unwrap().is_read_only);
    }

    #[test]
    fn empty_path_is_rejected_everywhere() {
        let transport = FsTransport::new("/unused");
        assert!(matches!(transport.set_read_only("", true), Err(TransportError::EmptyPath)));
        assert!(matches!(transport.reset(""), Err(TransportError::EmptyPath)));
        assert!(matches!(transport.backup(""), Err(TransportError::EmptyPath)));
        assert!(matches!(transport.restore(""), Err(TransportError::EmptyPath)));
    }

    #[test]
    fn backup_copies_bytes_aside() {
        let dir = tempfile::tempdir().unwrap();
        let (transport, path, text) = record_in(&dir);
        transport.backup(&text).unwrap();
        assert_eq!(fs::read_to_string(backup_path(&path)).unwrap(), RECORD);
    }

    #[test]
    fn reset_replaces_identifiers_and_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let (transport, path, text) = record_in(&dir);
        transport.reset(&text).unwrap();

        let record = stored(&path);
        assert_eq!(record["theme"], "dark");
        assert_ne!(record["telemetry.machineId"], "m1");
        assert_eq!(record["telemetry.machineId"].as_str().unwrap().len(), 64);
        assert!(record["telemetry.sqmId"].as_str().unwrap().starts_with('{'));
        assert_eq!(fs::read_to_string(backup_path(&path)).unwrap(), RECORD);
    }

    #[test]
    fn reset_of_invalid_record_leaves_it_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();
        let text = path.display().to_string();
        assert!(FsTransport::new(&path).reset(&text).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "not json");
        assert!(!backup_path(&path).exists());
    }

    #[cfg(unix)]
    #[test]
    fn reset_write_failure_reports_and_keeps_record() {
        let dir = tempfile::tempdir().unwrap();
        let (transport, path, text) = record_in(&dir);
        apply_read_only(&path, true).unwrap();
        if fs::OpenOptions::new().write(true).open(&path).is_ok() {
            // permission bits do not bind this user (e.g. root)
            return;
        }
        assert!(matches!(transport.reset(&text), Err(TransportError::Io(_))));
        apply_read_only(&path, false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), RECORD);
        assert_eq!(fs::read_to_string(backup_path(&path)).unwrap(), RECORD);
    }

    #[test]
    fn restore_puts_backup_back() {
        let dir = tempfile::tempdir().unwrap();
        let (transport, path, text) = record_in(&dir);
        transport.reset(&text).unwrap();
        transport.restore(&text).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), RECORD);
    }

    #[test]
    fn restore_without_backup_fails() {
        let dir = tempfile::tempdir().unwrap();
        let (transport, _, text) = record_in(&dir);
        assert!(matches!(
            transport.restore(&text),
            Err(TransportError::MissingBackup(_))
        ));
    }

    #[test]
    fn restore_refuses_read_only_record() {
        let dir = tempfile::tempdir().unwrap();
        let (transport, path, text) = record_in(&dir);
        transport.backup(&text).unwrap();
        transport.set_read_only(&text, true).unwrap();
        assert!(matches!(
            transport.restore(&text),
            Err(TransportError::ReadOnly(_))
        ));
        transport.set_read_only(&text, false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), RECORD);
    }

    #[test]
    fn restore_rejects_corrupt_backup() {
        let dir = tempfile::tempdir().unwrap();
        let (transport, path, text) = record_in(&dir);
        fs::write(backup_path(&path), "oops").unwrap();
        assert!(transport.restore(&text).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), RECORD);
    }

    #[test]
    fn backup_path_appends_suffix() {
        assert_eq!(
            backup_path(Path::new("/x/storage.json")),
            PathBuf::from("/x/storage.json.back")
        );
    }

    #[tokio::test]
    async fn unresolved_location_fails_fetch() {
        let transport = FsTransport { record: None };
        assert!(matches!(
            transport.fetch().await,
            Err(TransportError::PathUnresolved)
        ));
    }
}
