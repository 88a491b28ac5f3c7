// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scripted transport double that records every call.

use curfree_app_core::snapshot::ConfigSnapshot;
use curfree_app_core::transport::{ConfigTransport, TransportError, TransportResult};
use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// A call observed by [`ScriptedTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCall {
    /// `fetch()`
    Fetch,
    /// `set_read_only(path, read_only)`
    SetReadOnly {
        /// Record path.
        path: String,
        /// Requested flag.
        read_only: bool,
    },
    /// `reset(path)`
    Reset {
        /// Record path.
        path: String,
    },
    /// `backup(path)`
    Backup {
        /// Record path.
        path: String,
    },
    /// `restore(path)`
    Restore {
        /// Record path.
        path: String,
    },
}

impl TransportCall {
    /// Whether this is one of the four mutating commands.
    pub fn is_command(&self) -> bool {
        !matches!(self, TransportCall::Fetch)
    }
}

#[derive(Debug)]
struct FetchStep {
    delay: Duration,
    response: Option<ConfigSnapshot>,
}

/// In-memory stand-in for the storage backend.
///
/// Holds a "live" record that the commands mutate the way the real backend
/// would (lock flag, regenerated ids, backup copy), so follow-up fetches see
/// the effect. Fetches answer from a script first and fall back to the live
/// record. Clones share state.
///
/// # Example
///
/// ```
/// use curfree_dry_tests::{ScriptedTransport, SnapshotBuilder};
/// use curfree_app_core::transport::ConfigTransport;
///
/// let transport = ScriptedTransport::with_record(SnapshotBuilder::new().path("/a/b").build());
/// transport.set_read_only("/a/b", true).unwrap();
/// assert!(transport.record().is_read_only);
/// assert_eq!(transport.command_count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    inner: Arc<Mutex<ScriptedTransportInner>>,
}

#[derive(Default)]
struct ScriptedTransportInner {
    record: ConfigSnapshot,
    backup: Option<ConfigSnapshot>,
    fetch_script: VecDeque<FetchStep>,
    calls: Vec<TransportCall>,
    resets: u64,
    fail_fetch: bool,
    fail_set_read_only: bool,
    fail_reset: bool,
    fail_backup: bool,
    fail_restore: bool,
}

impl ScriptedTransport {
    /// Transport whose live record is empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport whose live record is `record`.
    pub fn with_record(record: ConfigSnapshot) -> Self {
        let transport = Self::default();
        transport.lock().record = record;
        transport
    }

    fn lock(&self) -> MutexGuard<'_, ScriptedTransportInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Current live record.
    pub fn record(&self) -> ConfigSnapshot {
        self.lock().record.clone()
    }

    /// Replace the live record.
    pub fn set_record(&self, record: ConfigSnapshot) {
        self.lock().record = record;
    }

    /// Answer the next fetch with `snapshot` after `delay`.
    pub fn push_fetch(&self, snapshot: ConfigSnapshot, delay: Duration) {
        self.lock().fetch_script.push_back(FetchStep {
            delay,
            response: Some(snapshot),
        });
    }

    /// Fail the next fetch after `delay`.
    pub fn push_fetch_failure(&self, delay: Duration) {
        self.lock().fetch_script.push_back(FetchStep {
            delay,
            response: None,
        });
    }

    /// Make every unscripted fetch fail.
    pub fn set_fail_fetch(&self, fail: bool) {
        self.lock().fail_fetch = fail;
    }

    /// Make `set_read_only` fail.
    pub fn set_fail_set_read_only(&self, fail: bool) {
        self.lock().fail_set_read_only = fail;
    }

    /// Make `reset` fail.
    pub fn set_fail_reset(&self, fail: bool) {
        self.lock().fail_reset = fail;
    }

    /// Make `backup` fail.
    pub fn set_fail_backup(&self, fail: bool) {
        self.lock().fail_backup = fail;
    }

    /// Make `restore` fail.
    pub fn set_fail_restore(&self, fail: bool) {
        self.lock().fail_restore = fail;
    }

    /// Every call so far, in order.
    pub fn calls(&self) -> Vec<TransportCall> {
        self.lock().calls.clone()
    }

    /// Number of `fetch` calls.
    pub fn fetch_count(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| !c.is_command())
            .count()
    }

    /// Number of mutating command calls.
    pub fn command_count(&self) -> usize {
        self.lock().calls.iter().filter(|c| c.is_command()).count()
    }

    /// Whether a backup copy exists.
    pub fn has_backup(&self) -> bool {
        self.lock().backup.is_some()
    }
}

fn simulated(what: &str) -> TransportError {
    TransportError::Other(format!("simulated {what} failure"))
}

impl ConfigTransport for ScriptedTransport {
    fn fetch(&self) -> impl Future<Output = TransportResult<ConfigSnapshot>> + Send {
        let step = {
            let mut inner = self.lock();
            inner.calls.push(TransportCall::Fetch);
            match inner.fetch_script.pop_front() {
                Some(step) => step,
                None => FetchStep {
                    delay: Duration::ZERO,
                    response: (!inner.fail_fetch).then(|| inner.record.clone()),
                },
            }
        };
        async move {
            if !step.delay.is_zero() {
                tokio::time::sleep(step.delay).await;
            }
            step.response.ok_or_else(|| simulated("fetch"))
        }
    }

    fn set_read_only(&self, path: &str, read_only: bool) -> TransportResult<()> {
        let mut inner = self.lock();
        inner.calls.push(TransportCall::SetReadOnly {
            path: path.to_owned(),
            read_only,
        });
        if inner.fail_set_read_only {
            return Err(simulated("set read-only"));
        }
        inner.record.is_read_only = read_only;
        Ok(())
    }

    fn reset(&self, path: &str) -> TransportResult<()> {
        let mut inner = self.lock();
        inner.calls.push(TransportCall::Reset {
            path: path.to_owned(),
        });
        if inner.fail_reset {
            return Err(simulated("reset"));
        }
        inner.backup = Some(inner.record.clone());
        inner.resets += 1;
        let n = inner.resets;
        let record = &mut inner.record;
        record.machine_id = Some(format!("machine-{n}"));
        record.mac_machine_id = Some(format!("mac-{n}"));
        record.dev_device_id = Some(format!("device-{n}"));
        record.sqm_id = Some(format!("{{SQM-{n}}}"));
        Ok(())
    }

    fn backup(&self, path: &str) -> TransportResult<()> {
        let mut inner = self.lock();
        inner.calls.push(TransportCall::Backup {
            path: path.to_owned(),
        });
        if inner.fail_backup {
            return Err(simulated("backup"));
        }
        inner.backup = Some(inner.record.clone());
        Ok(())
    }

    fn restore(&self, path: &str) -> TransportResult<()> {
        let mut inner = self.lock();
        inner.calls.push(TransportCall::Restore {
            path: path.to_owned(),
        });
        if inner.fail_restore {
            return Err(simulated("restore"));
        }
        if inner.record.is_read_only {
            return Err(TransportError::ReadOnly(path.into()));
        }
        let Some(backup) = inner.backup.clone() else {
            return Err(TransportError::MissingBackup(format!("{path}.back").into()));
        };
        inner.record = ConfigSnapshot {
            is_read_only: false,
            ..backup
        };
        Ok(())
    }
}
