// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Panel controller: owns the config snapshot and the loading flag, drives the
//! transport, and turns every outcome into a notice.
//!
//! Fetches and settle delays run as tasks on the controller's runtime handle.
//! Every deferred continuation holds a weak reference to the panel state, so
//! anything firing after the controller is dropped is a no-op. Settle timers
//! carry an operation generation and only clear the in-flight marker they set.

use crate::notice::{Notice, NoticeKind, Notifier, NOTICE_TTL};
use crate::render_port::RenderPort;
use crate::snapshot::ConfigSnapshot;
use crate::sync::lock;
use crate::transport::{ConfigTransport, TransportResult};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Wait after a successful reset/restore before re-fetching, covering the
/// backend's own settling time.
pub const SETTLE_DELAY: Duration = Duration::from_millis(1000);

/// User-facing notice and hint texts.
pub mod messages {
    /// Fetch failed.
    pub const LOAD_FAILED: &str = "Failed to load config";
    /// Refresh requested.
    pub const REFRESHED: &str = "Refreshed successfully!";
    /// Mutating action attempted before any successful fetch.
    pub const PATH_NOT_FOUND: &str = "Config path not found";
    /// Record locked.
    pub const READ_ONLY_SET: &str = "Set read-only mode successfully!";
    /// Record unlocked.
    pub const WRITABLE_SET: &str = "Set writable mode successfully!";
    /// Lock/unlock failed.
    pub const READ_ONLY_FAILED: &str = "Failed to set read-only mode";
    /// Reset settled.
    pub const RESET_DONE: &str = "Configuration reset successfully!";
    /// Reset failed.
    pub const RESET_FAILED: &str = "Failed to reset configuration";
    /// Backup written.
    pub const BACKUP_DONE: &str = "Backup successfully!";
    /// Backup failed.
    pub const BACKUP_FAILED: &str = "Failed to backup";
    /// Restore settled.
    pub const RESTORE_DONE: &str = "Restore successfully!";
    /// Restore failed.
    pub const RESTORE_FAILED: &str = "Failed to restore";
    /// Hint on controls disabled by the read-only guard.
    pub const HINT_READ_ONLY: &str = "Disabled while the config is read-only";
    /// Hint on controls disabled by the single-flight guard.
    pub const HINT_BUSY: &str = "Waiting for the previous operation to settle";
}

/// Actions the panel exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    /// Re-fetch and confirm.
    Refresh,
    /// Lock (`true`) or unlock (`false`) the record.
    SetReadOnly(bool),
    /// Generate new identifiers.
    Reset,
    /// Copy the record aside.
    Backup,
    /// Put the backup back.
    Restore,
}

impl PanelAction {
    /// Whether the action writes to the record.
    pub const fn is_mutating(self) -> bool {
        !matches!(self, PanelAction::Refresh)
    }

    /// Whether the read-only guard disables the action.
    pub const fn blocked_by_read_only(self) -> bool {
        matches!(
            self,
            PanelAction::Reset | PanelAction::Backup | PanelAction::Restore
        )
    }
}

/// Why an action did not reach the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The record is read-only.
    ReadOnly,
    /// Another mutating action is still settling.
    Busy,
    /// No record path is known yet.
    MissingPath,
}

/// Result of invoking an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Transport accepted the command; notice shown.
    Completed,
    /// Transport accepted the command; re-fetch and notice follow after the settle delay.
    Settling,
    /// Transport reported failure; error notice shown.
    Failed,
    /// Not sent to the transport.
    Rejected(Rejection),
}

/// Whether a control is usable, and why not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionAvailability {
    /// Control accepts input.
    pub enabled: bool,
    /// Explanation shown on a disabled control.
    pub hint: Option<&'static str>,
}

/// Controller timing and guard options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelOptions {
    /// Delay before re-fetching after reset/restore.
    pub settle_delay: Duration,
    /// Notice time-to-live.
    pub notice_ttl: Duration,
    /// Reject mutating actions while a reset/restore is settling.
    pub single_flight: bool,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            settle_delay: SETTLE_DELAY,
            notice_ttl: NOTICE_TTL,
            single_flight: true,
        }
    }
}

/// Read-only view handed to the renderer.
#[derive(Debug, Clone)]
pub struct PanelView {
    /// Last successfully fetched snapshot.
    pub snapshot: Arc<ConfigSnapshot>,
    /// Reset pending; drives the refresh spinner.
    pub loading: bool,
    /// Notice on screen, if any.
    pub notice: Option<Notice>,
    /// Mutating action currently settling.
    pub in_flight: Option<PanelAction>,
    /// Whether the single-flight guard is on.
    pub single_flight: bool,
}

impl PanelView {
    /// Availability of `action` under the read-only and single-flight guards.
    pub fn availability(&self, action: PanelAction) -> ActionAvailability {
        match guard(
            action,
            &self.snapshot,
            self.in_flight.is_some(),
            self.single_flight,
        ) {
            Some(Rejection::ReadOnly) => ActionAvailability {
                enabled: false,
                hint: Some(messages::HINT_READ_ONLY),
            },
            Some(Rejection::Busy) => ActionAvailability {
                enabled: false,
                hint: Some(messages::HINT_BUSY),
            },
            Some(Rejection::MissingPath) | None => ActionAvailability {
                enabled: true,
                hint: None,
            },
        }
    }
}

fn guard(
    action: PanelAction,
    snapshot: &ConfigSnapshot,
    busy: bool,
    single_flight: bool,
) -> Option<Rejection> {
    if action.blocked_by_read_only() && snapshot.is_read_only {
        return Some(Rejection::ReadOnly);
    }
    if single_flight && busy && action.is_mutating() {
        return Some(Rejection::Busy);
    }
    None
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    action: PanelAction,
    generation: u64,
}

#[derive(Debug, Default)]
struct PanelState {
    snapshot: Arc<ConfigSnapshot>,
    loading: bool,
    in_flight: Option<InFlight>,
    generation: u64,
}

struct Shared {
    state: Mutex<PanelState>,
    notifier: Notifier,
    render: Arc<dyn RenderPort>,
}

impl Shared {
    fn finish_load(&self, result: TransportResult<ConfigSnapshot>) {
        let failed = {
            let mut state = lock(&self.state);
            let failed = match result {
                Ok(snapshot) => {
                    tracing::debug!(
                        path = ?snapshot.path(),
                        read_only = snapshot.is_read_only,
                        "config loaded"
                    );
                    state.snapshot = Arc::new(snapshot);
                    false
                }
                Err(err) => {
                    tracing::warn!(error = %err, "config fetch failed; keeping previous snapshot");
                    true
                }
            };
            state.loading = false;
            failed
        };
        if failed {
            self.notifier
                .show(NoticeKind::Error, messages::LOAD_FAILED);
        }
        self.render.request_redraw();
    }

    fn set_loading(&self, loading: bool) {
        lock(&self.state).loading = loading;
        self.render.request_redraw();
    }

    fn begin_settling(&self, action: PanelAction) -> u64 {
        let mut state = lock(&self.state);
        state.generation += 1;
        let generation = state.generation;
        state.in_flight = Some(InFlight { action, generation });
        generation
    }

    fn settle_elapsed(&self, generation: u64) {
        let mut state = lock(&self.state);
        if state.in_flight.is_some_and(|f| f.generation == generation) {
            state.in_flight = None;
        }
    }
}

fn spawn_load<T: ConfigTransport>(
    handle: &Handle,
    transport: Arc<T>,
    shared: Weak<Shared>,
) -> JoinHandle<()> {
    handle.spawn(async move {
        let result = transport.fetch().await;
        let Some(shared) = shared.upgrade() else {
            tracing::debug!("panel dropped; discarding fetch result");
            return;
        };
        shared.finish_load(result);
    })
}

/// Single authority over the panel's view of the storage record.
pub struct PanelController<T> {
    transport: Arc<T>,
    shared: Arc<Shared>,
    options: PanelOptions,
    handle: Handle,
}

impl<T: ConfigTransport> PanelController<T> {
    /// Create a controller with an empty snapshot. Background work runs on `handle`.
    pub fn new(
        transport: T,
        options: PanelOptions,
        handle: Handle,
        render: Arc<dyn RenderPort>,
    ) -> Self {
        let notifier = Notifier::new(options.notice_ttl, handle.clone(), Arc::clone(&render));
        Self {
            transport: Arc::new(transport),
            shared: Arc::new(Shared {
                state: Mutex::new(PanelState::default()),
                notifier,
                render,
            }),
            options,
            handle,
        }
    }

    /// Create a controller and issue the initial fetch.
    pub fn mount(
        transport: T,
        options: PanelOptions,
        handle: Handle,
        render: Arc<dyn RenderPort>,
    ) -> Self {
        let controller = Self::new(transport, options, handle, render);
        controller.load();
        controller
    }

    /// Fetch the record and replace the snapshot on success. On failure the
    /// previous snapshot stays and an error notice is shown. The loading flag
    /// is cleared either way.
    pub fn load(&self) -> JoinHandle<()> {
        tracing::debug!("fetching config");
        spawn_load(
            &self.handle,
            Arc::clone(&self.transport),
            Arc::downgrade(&self.shared),
        )
    }

    /// Fetch and confirm immediately; the confirmation does not wait for the
    /// fetch, and a failing fetch replaces it with an error notice.
    pub fn refresh(&self) -> JoinHandle<()> {
        let load = self.load();
        self.shared
            .notifier
            .show(NoticeKind::Success, messages::REFRESHED);
        load
    }

    /// Lock or unlock the record, then re-fetch.
    pub fn set_read_only(&self, read_only: bool) -> ActionOutcome {
        let path = match self.admit(PanelAction::SetReadOnly(read_only)) {
            Ok(path) => path,
            Err(rejection) => return ActionOutcome::Rejected(rejection),
        };
        match self.transport.set_read_only(&path, read_only) {
            Ok(()) => {
                tracing::info!(%path, read_only, "read-only flag updated");
                self.load();
                let message = if read_only {
                    messages::READ_ONLY_SET
                } else {
                    messages::WRITABLE_SET
                };
                self.shared.notifier.show(NoticeKind::Success, message);
                ActionOutcome::Completed
            }
            Err(err) => {
                tracing::warn!(%path, read_only, error = %err, "set read-only failed");
                self.shared
                    .notifier
                    .show(NoticeKind::Error, messages::READ_ONLY_FAILED);
                ActionOutcome::Failed
            }
        }
    }

    /// Regenerate identifiers. The loading flag stays up through the settle
    /// delay and the follow-up fetch.
    pub fn reset(&self) -> ActionOutcome {
        let path = match self.admit(PanelAction::Reset) {
            Ok(path) => path,
            Err(rejection) => return ActionOutcome::Rejected(rejection),
        };
        self.shared.set_loading(true);
        match self.transport.reset(&path) {
            Ok(()) => {
                tracing::info!(%path, "reset accepted");
                self.settle(PanelAction::Reset, messages::RESET_DONE);
                ActionOutcome::Settling
            }
            Err(err) => {
                tracing::warn!(%path, error = %err, "reset failed");
                self.shared
                    .notifier
                    .show(NoticeKind::Error, messages::RESET_FAILED);
                self.shared.set_loading(false);
                ActionOutcome::Failed
            }
        }
    }

    /// Copy the record aside. The live record is unchanged, so no re-fetch.
    pub fn backup(&self) -> ActionOutcome {
        let path = match self.admit(PanelAction::Backup) {
            Ok(path) => path,
            Err(rejection) => return ActionOutcome::Rejected(rejection),
        };
        match self.transport.backup(&path) {
            Ok(()) => {
                tracing::info!(%path, "backup written");
                self.shared
                    .notifier
                    .show(NoticeKind::Success, messages::BACKUP_DONE);
                ActionOutcome::Completed
            }
            Err(err) => {
                tracing::warn!(%path, error = %err, "backup failed");
                self.shared
                    .notifier
                    .show(NoticeKind::Error, messages::BACKUP_FAILED);
                ActionOutcome::Failed
            }
        }
    }

    /// Put the backup back. Unlike reset, the loading flag is not touched.
    pub fn restore(&self) -> ActionOutcome {
        let path = match self.admit(PanelAction::Restore) {
            Ok(path) => path,
            Err(rejection) => return ActionOutcome::Rejected(rejection),
        };
        match self.transport.restore(&path) {
            Ok(()) => {
                tracing::info!(%path, "restore accepted");
                self.settle(PanelAction::Restore, messages::RESTORE_DONE);
                ActionOutcome::Settling
            }
            Err(err) => {
                tracing::warn!(%path, error = %err, "restore failed");
                self.shared
                    .notifier
                    .show(NoticeKind::Error, messages::RESTORE_FAILED);
                ActionOutcome::Failed
            }
        }
    }

    /// Route a UI action to its operation.
    pub fn dispatch(&self, action: PanelAction) -> ActionOutcome {
        tracing::debug!(?action, "dispatch");
        match action {
            PanelAction::Refresh => {
                self.refresh();
                ActionOutcome::Completed
            }
            PanelAction::SetReadOnly(read_only) => self.set_read_only(read_only),
            PanelAction::Reset => self.reset(),
            PanelAction::Backup => self.backup(),
            PanelAction::Restore => self.restore(),
        }
    }

    /// Current state for rendering.
    pub fn view(&self) -> PanelView {
        let (snapshot, loading, in_flight) = {
            let state = lock(&self.shared.state);
            (
                Arc::clone(&state.snapshot),
                state.loading,
                state.in_flight.map(|f| f.action),
            )
        };
        PanelView {
            snapshot,
            loading,
            notice: self.shared.notifier.visible(),
            in_flight,
            single_flight: self.options.single_flight,
        }
    }

    /// Guard checks, then the path precondition. Returns the record path.
    fn admit(&self, action: PanelAction) -> Result<String, Rejection> {
        let (snapshot, busy) = {
            let state = lock(&self.shared.state);
            (Arc::clone(&state.snapshot), state.in_flight.is_some())
        };
        if let Some(rejection) = guard(action, &snapshot, busy, self.options.single_flight) {
            tracing::debug!(?action, ?rejection, "action rejected");
            return Err(rejection);
        }
        match snapshot.path() {
            Some(path) => Ok(path.to_owned()),
            None => {
                tracing::debug!(?action, "no config path yet");
                self.shared
                    .notifier
                    .show(NoticeKind::Error, messages::PATH_NOT_FOUND);
                Err(Rejection::MissingPath)
            }
        }
    }

    /// Mark `action` in flight, then after the settle delay re-fetch and
    /// show `message`.
    fn settle(&self, action: PanelAction, message: &'static str) {
        let generation = self.shared.begin_settling(action);
        self.shared.render.request_redraw();

        let handle = self.handle.clone();
        let transport = Arc::clone(&self.transport);
        let shared = Arc::downgrade(&self.shared);
        let delay = self.options.settle_delay;
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(live) = shared.upgrade() else {
                tracing::debug!(?action, "panel dropped; skipping settle continuation");
                return;
            };
            live.settle_elapsed(generation);
            spawn_load(&handle, transport, Arc::downgrade(&live));
            live.notifier.show(NoticeKind::Success, message);
        });
    }
}
