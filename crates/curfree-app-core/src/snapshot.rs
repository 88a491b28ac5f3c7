// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Last-known state of the editor's storage record, as reported by the
//! transport. The wire shape keeps the record's dotted keys verbatim.

use serde::{Deserialize, Serialize};

/// One of the four identity/telemetry identifiers carried by the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Identifier {
    /// `telemetry.machineId`
    MachineId,
    /// `telemetry.macMachineId`
    MacMachineId,
    /// `telemetry.devDeviceId`
    DevDeviceId,
    /// `telemetry.sqmId`
    SqmId,
}

impl Identifier {
    /// Display order used by the panel.
    pub const ALL: [Identifier; 4] = [
        Identifier::MachineId,
        Identifier::MacMachineId,
        Identifier::DevDeviceId,
        Identifier::SqmId,
    ];

    /// Human-facing label.
    pub const fn label(self) -> &'static str {
        match self {
            Identifier::MachineId => "Machine ID",
            Identifier::MacMachineId => "Mac Machine ID",
            Identifier::DevDeviceId => "Dev Device ID",
            Identifier::SqmId => "SQM ID",
        }
    }

    /// Dotted key inside the storage record.
    pub const fn wire_key(self) -> &'static str {
        match self {
            Identifier::MachineId => "telemetry.machineId",
            Identifier::MacMachineId => "telemetry.macMachineId",
            Identifier::DevDeviceId => "telemetry.devDeviceId",
            Identifier::SqmId => "telemetry.sqmId",
        }
    }
}

/// Label of the config path row.
pub const CONFIG_PATH_LABEL: &str = "Config Path";

/// Snapshot of the storage record. Every field is unset until the first
/// successful fetch; the controller replaces snapshots wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    /// Filesystem path of the record.
    #[serde(rename = "configPath", default, skip_serializing_if = "Option::is_none")]
    pub config_path: Option<String>,
    /// Whether the record is currently locked read-only.
    #[serde(rename = "isReadOnly", default)]
    pub is_read_only: bool,
    /// `telemetry.machineId`
    #[serde(rename = "telemetry.machineId", default, skip_serializing_if = "Option::is_none")]
    pub machine_id: Option<String>,
    /// `telemetry.macMachineId`
    #[serde(rename = "telemetry.macMachineId", default, skip_serializing_if = "Option::is_none")]
    pub mac_machine_id: Option<String>,
    /// `telemetry.devDeviceId`
    #[serde(rename = "telemetry.devDeviceId", default, skip_serializing_if = "Option::is_none")]
    pub dev_device_id: Option<String>,
    /// `telemetry.sqmId`
    #[serde(rename = "telemetry.sqmId", default, skip_serializing_if = "Option::is_none")]
    pub sqm_id: Option<String>,
}

impl ConfigSnapshot {
    /// Record path, treating an empty string as unset.
    pub fn path(&self) -> Option<&str> {
        self.config_path.as_deref().filter(|p| !p.is_empty())
    }

    /// Value of `id`, if the record carried it.
    pub fn identifier(&self, id: Identifier) -> Option<&str> {
        let value = match id {
            Identifier::MachineId => &self.machine_id,
            Identifier::MacMachineId => &self.mac_machine_id,
            Identifier::DevDeviceId => &self.dev_device_id,
            Identifier::SqmId => &self.sqm_id,
        };
        value.as_deref()
    }

    /// The five display rows: the identifiers in [`Identifier::ALL`] order,
    /// then the config path. Unset values render as empty strings.
    pub fn rows(&self) -> Vec<(&'static str, &str)> {
        let mut rows: Vec<(&'static str, &str)> = Identifier::ALL
            .iter()
            .map(|id| (id.label(), self.identifier(*id).unwrap_or_default()))
            .collect();
        rows.push((CONFIG_PATH_LABEL, self.config_path.as_deref().unwrap_or_default()));
        rows
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn wire_shape_keeps_dotted_keys() {
        let raw = r#"{
            "configPath": "/a/b",
            "isReadOnly": true,
            "telemetry.machineId": "m1",
            "telemetry.macMachineId": "mac1",
            "telemetry.devDeviceId": "dev1",
            "telemetry.sqmId": "{SQM}"
        }"#;
        let snap: ConfigSnapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(snap.path(), Some("/a/b"));
        assert!(snap.is_read_only);
        assert_eq!(snap.identifier(Identifier::MachineId), Some("m1"));
        assert_eq!(snap.identifier(Identifier::SqmId), Some("{SQM}"));

        let value = serde_json::to_value(&snap).unwrap();
        assert_eq!(value["telemetry.macMachineId"], "mac1");
        assert_eq!(value["isReadOnly"], true);
    }

    #[test]
    fn missing_fields_default_to_unset() {
        let snap: ConfigSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snap, ConfigSnapshot::default());
        assert!(!snap.is_read_only);
        assert_eq!(snap.path(), None);
    }

    #[test]
    fn empty_path_counts_as_unset() {
        let snap = ConfigSnapshot {
            config_path: Some(String::new()),
            ..ConfigSnapshot::default()
        };
        assert_eq!(snap.path(), None);
    }

    #[test]
    fn rows_follow_display_order() {
        let snap = ConfigSnapshot {
            config_path: Some("/a/b".into()),
            machine_id: Some("m1".into()),
            ..ConfigSnapshot::default()
        };
        let rows = snap.rows();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], ("Machine ID", "m1"));
        assert_eq!(rows[1], ("Mac Machine ID", ""));
        assert_eq!(rows[3].0, "SQM ID");
        assert_eq!(rows[4], ("Config Path", "/a/b"));
    }
}
