// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Snapshot builders for tests.

use curfree_app_core::snapshot::ConfigSnapshot;

/// Path used by [`sample_snapshot`].
pub const SAMPLE_PATH: &str = "/a/b";

/// Builder for [`ConfigSnapshot`] fixtures.
///
/// # Example
///
/// ```
/// use curfree_dry_tests::SnapshotBuilder;
///
/// let snap = SnapshotBuilder::new().path("/a/b").read_only(true).machine_id("m1").build();
/// assert_eq!(snap.path(), Some("/a/b"));
/// assert!(snap.is_read_only);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SnapshotBuilder {
    snapshot: ConfigSnapshot,
}

impl SnapshotBuilder {
    /// Start from an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `configPath`.
    pub fn path(mut self, path: &str) -> Self {
        self.snapshot.config_path = Some(path.to_owned());
        self
    }

    /// Set `isReadOnly`.
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.snapshot.is_read_only = read_only;
        self
    }

    /// Set `telemetry.machineId`.
    pub fn machine_id(mut self, id: &str) -> Self {
        self.snapshot.machine_id = Some(id.to_owned());
        self
    }

    /// Set `telemetry.macMachineId`.
    pub fn mac_machine_id(mut self, id: &str) -> Self {
        self.snapshot.mac_machine_id = Some(id.to_owned());
        self
    }

    /// Set `telemetry.devDeviceId`.
    pub fn dev_device_id(mut self, id: &str) -> Self {
        self.snapshot.dev_device_id = Some(id.to_owned());
        self
    }

    /// Set `telemetry.sqmId`.
    pub fn sqm_id(mut self, id: &str) -> Self {
        self.snapshot.sqm_id = Some(id.to_owned());
        self
    }

    /// Finish.
    pub fn build(self) -> ConfigSnapshot {
        self.snapshot
    }
}

/// Writable record at [`SAMPLE_PATH`] with all four identifiers set.
pub fn sample_snapshot() -> ConfigSnapshot {
    SnapshotBuilder::new()
        .path(SAMPLE_PATH)
        .read_only(false)
        .machine_id("m1")
        .mac_machine_id("mac1")
        .dev_device_id("dev1")
        .sqm_id("{SQM1}")
        .build()
}
