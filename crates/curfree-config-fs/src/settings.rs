// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `panel.json` in the platform config directory.

use curfree_app_core::settings::{SettingsError, SettingsSource};
use directories::ProjectDirs;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const FILE_NAME: &str = "panel.json";

/// Reads `panel.json` from a config directory (e.g., `~/.config/curfree`).
#[derive(Debug, Clone)]
pub struct FsSettingsSource {
    file: PathBuf,
}

impl FsSettingsSource {
    /// Source in the user config directory.
    pub fn new() -> Result<Self, SettingsError> {
        let proj =
            ProjectDirs::from("dev", "curfree", "curfree").ok_or(SettingsError::NoConfigDir)?;
        Ok(Self::at(proj.config_dir()))
    }

    /// Source in `dir`.
    pub fn at(dir: &Path) -> Self {
        Self {
            file: dir.join(FILE_NAME),
        }
    }
}

impl SettingsSource for FsSettingsSource {
    fn read_panel_json(&self) -> Result<Option<Vec<u8>>, SettingsError> {
        match fs::read(&self.file) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use curfree_app_core::settings::PanelSettings;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let source = FsSettingsSource::at(dir.path());
        assert!(source.read_panel_json().unwrap().is_none());
        assert_eq!(PanelSettings::load(&source), PanelSettings::default());
    }

    #[test]
    fn reads_hand_written_panel_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("panel.json"),
            br#"{ "single_flight": false, "log_filter": "curfree=debug" }"#,
        )
        .unwrap();
        let settings = PanelSettings::load(&FsSettingsSource::at(dir.path()));
        assert!(!settings.single_flight);
        assert_eq!(settings.log_filter.as_deref(), Some("curfree=debug"));
        assert_eq!(settings.settle_delay_ms, 1000);
    }

    #[test]
    fn directory_in_place_of_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("panel.json")).unwrap();
        let source = FsSettingsSource::at(dir.path());
        assert!(matches!(source.read_panel_json(), Err(SettingsError::Io(_))));
        assert_eq!(PanelSettings::load(&source), PanelSettings::default());
    }
}
