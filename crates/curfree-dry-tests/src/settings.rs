// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory settings source for testing without filesystem I/O.

use curfree_app_core::settings::{SettingsError, SettingsSource};
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

/// In-memory [`SettingsSource`] with a read counter and a failure switch.
///
/// # Example
///
/// ```
/// use curfree_dry_tests::InMemorySettingsSource;
/// use curfree_app_core::settings::PanelSettings;
///
/// let source = InMemorySettingsSource::new();
/// assert_eq!(PanelSettings::load(&source), PanelSettings::default());
/// assert_eq!(source.read_count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct InMemorySettingsSource {
    inner: Arc<Mutex<InMemorySettingsSourceInner>>,
}

#[derive(Default)]
struct InMemorySettingsSourceInner {
    json: Option<Vec<u8>>,
    read_count: usize,
    fail_on_read: bool,
}

impl InMemorySettingsSource {
    /// Source with no `panel.json`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Source whose `panel.json` holds `json`.
    pub fn with_json(json: &[u8]) -> Self {
        let source = Self::default();
        source.lock().json = Some(json.to_vec());
        source
    }

    fn lock(&self) -> MutexGuard<'_, InMemorySettingsSourceInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Make reads fail with an I/O error.
    pub fn set_fail_on_read(&self, fail: bool) {
        self.lock().fail_on_read = fail;
    }

    /// Number of reads, failed ones included.
    pub fn read_count(&self) -> usize {
        self.lock().read_count
    }
}

impl SettingsSource for InMemorySettingsSource {
    fn read_panel_json(&self) -> Result<Option<Vec<u8>>, SettingsError> {
        let mut inner = self.lock();
        inner.read_count += 1;
        if inner.fail_on_read {
            return Err(io::Error::other("simulated read failure").into());
        }
        Ok(inner.json.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curfree_app_core::settings::PanelSettings;

    #[test]
    fn overrides_are_applied() {
        let source =
            InMemorySettingsSource::with_json(br#"{"settle_delay_ms": 50, "single_flight": false}"#);
        let settings = PanelSettings::load(&source);
        assert_eq!(settings.settle_delay_ms, 50);
        assert!(!settings.single_flight);
        assert_eq!(settings.notice_ttl_ms, 2000);
    }

    #[test]
    fn read_failure_falls_back_to_defaults() {
        let source = InMemorySettingsSource::new();
        source.set_fail_on_read(true);
        assert_eq!(PanelSettings::load(&source), PanelSettings::default());
        assert_eq!(source.read_count(), 1);
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let source = InMemorySettingsSource::with_json(b"{not json");
        assert_eq!(PanelSettings::load(&source), PanelSettings::default());
    }
}
