// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Panel shell settings, read once at startup from a hand-written
//! `panel.json`. The panel never writes them back.

use crate::controller::PanelOptions;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Where `panel.json` comes from.
pub trait SettingsSource {
    /// Raw `panel.json` contents, or `None` when the user has not written one.
    fn read_panel_json(&self) -> Result<Option<Vec<u8>>, SettingsError>;
}

/// Why settings could not be read.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// No per-user config directory on this platform.
    #[error("config directory unavailable")]
    NoConfigDir,
    /// The settings file exists but could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The settings file is not valid panel JSON.
    #[error("malformed panel settings: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// User-editable shell settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PanelSettings {
    /// Override for the storage record location.
    pub storage_path: Option<PathBuf>,
    /// Delay before re-fetching after reset/restore.
    pub settle_delay_ms: u64,
    /// How long notices stay visible.
    pub notice_ttl_ms: u64,
    /// Reject mutating actions while another one is settling.
    pub single_flight: bool,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_filter: Option<String>,
}

impl Default for PanelSettings {
    fn default() -> Self {
        let options = PanelOptions::default();
        Self {
            storage_path: None,
            settle_delay_ms: duration_ms(options.settle_delay),
            notice_ttl_ms: duration_ms(options.notice_ttl),
            single_flight: options.single_flight,
            log_filter: None,
        }
    }
}

impl PanelSettings {
    /// Parse `panel.json`. Blank contents mean "no overrides".
    pub fn from_json(bytes: &[u8]) -> Result<Self, SettingsError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Settings from `source`. A missing file yields defaults; an unreadable
    /// or malformed one is logged and also yields defaults.
    pub fn load(source: &impl SettingsSource) -> Self {
        let parsed = source
            .read_panel_json()
            .and_then(|raw| raw.map_or_else(|| Ok(Self::default()), |b| Self::from_json(&b)));
        match parsed {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!(error = %err, "unreadable panel settings; using defaults");
                Self::default()
            }
        }
    }

    /// Controller options derived from these settings.
    pub fn options(&self) -> PanelOptions {
        PanelOptions {
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            notice_ttl: Duration::from_millis(self.notice_ttl_ms),
            single_flight: self.single_flight,
        }
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
