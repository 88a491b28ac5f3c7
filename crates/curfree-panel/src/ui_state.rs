// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Pure mapping from panel interactions to effects. Guards are applied here,
//! so a disabled control never reaches a controller entry point.

use curfree_app_core::{ActionAvailability, PanelAction, PanelView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    ThemeToggleClicked,
    ReadOnlyToggled(bool),
    RestoreClicked,
    BackupClicked,
    RefreshClicked,
    ResetClicked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEffect {
    ToggleTheme,
    Dispatch(PanelAction),
}

const fn action_for(ev: UiEvent) -> Option<PanelAction> {
    match ev {
        UiEvent::ThemeToggleClicked => None,
        UiEvent::ReadOnlyToggled(checked) => Some(PanelAction::SetReadOnly(checked)),
        UiEvent::RestoreClicked => Some(PanelAction::Restore),
        UiEvent::BackupClicked => Some(PanelAction::Backup),
        UiEvent::RefreshClicked => Some(PanelAction::Refresh),
        UiEvent::ResetClicked => Some(PanelAction::Reset),
    }
}

/// Control state for `action`: the controller's guards, plus refresh stays
/// disabled while its spinner runs.
pub fn control(view: &PanelView, action: PanelAction) -> ActionAvailability {
    let availability = view.availability(action);
    if availability.enabled && action == PanelAction::Refresh && view.loading {
        return ActionAvailability {
            enabled: false,
            hint: None,
        };
    }
    availability
}

pub fn reduce(view: &PanelView, ev: UiEvent) -> Vec<UiEffect> {
    let mut fx = Vec::new();
    match action_for(ev) {
        None => fx.push(UiEffect::ToggleTheme),
        Some(action) => {
            if control(view, action).enabled {
                fx.push(UiEffect::Dispatch(action));
            } else {
                tracing::debug!(?action, "ignored input on disabled control");
            }
        }
    }
    fx
}

#[cfg(test)]
mod tests {
    use super::*;
    use curfree_dry_tests::{sample_snapshot, SnapshotBuilder, SAMPLE_PATH};
    use std::sync::Arc;

    fn view_of(snapshot: curfree_app_core::ConfigSnapshot) -> PanelView {
        PanelView {
            snapshot: Arc::new(snapshot),
            loading: false,
            notice: None,
            in_flight: None,
            single_flight: true,
        }
    }

    #[test]
    fn clicks_dispatch_matching_actions() {
        let view = view_of(sample_snapshot());
        assert_eq!(
            reduce(&view, UiEvent::ResetClicked),
            vec![UiEffect::Dispatch(PanelAction::Reset)]
        );
        assert_eq!(
            reduce(&view, UiEvent::ReadOnlyToggled(true)),
            vec![UiEffect::Dispatch(PanelAction::SetReadOnly(true))]
        );
        assert_eq!(
            reduce(&view, UiEvent::ThemeToggleClicked),
            vec![UiEffect::ToggleTheme]
        );
    }

    #[test]
    fn read_only_swallows_mutating_clicks() {
        let view = view_of(SnapshotBuilder::new().path(SAMPLE_PATH).read_only(true).build());
        for ev in [UiEvent::RestoreClicked, UiEvent::BackupClicked, UiEvent::ResetClicked] {
            assert!(reduce(&view, ev).is_empty(), "{ev:?} should be ignored");
        }
        assert_eq!(
            reduce(&view, UiEvent::ReadOnlyToggled(false)),
            vec![UiEffect::Dispatch(PanelAction::SetReadOnly(false))]
        );
        assert_eq!(
            reduce(&view, UiEvent::RefreshClicked),
            vec![UiEffect::Dispatch(PanelAction::Refresh)]
        );
    }

    #[test]
    fn refresh_disabled_while_loading() {
        let view = PanelView {
            loading: true,
            ..view_of(sample_snapshot())
        };
        assert!(!control(&view, PanelAction::Refresh).enabled);
        assert!(reduce(&view, UiEvent::RefreshClicked).is_empty());
    }

    #[test]
    fn settling_blocks_other_mutations() {
        let view = PanelView {
            in_flight: Some(PanelAction::Restore),
            ..view_of(sample_snapshot())
        };
        assert!(reduce(&view, UiEvent::BackupClicked).is_empty());
        assert!(reduce(&view, UiEvent::ReadOnlyToggled(true)).is_empty());
    }

    #[test]
    fn missing_path_still_reaches_controller() {
        // the controller reports "Config path not found"
        let view = view_of(curfree_app_core::ConfigSnapshot::default());
        assert_eq!(
            reduce(&view, UiEvent::BackupClicked),
            vec![UiEffect::Dispatch(PanelAction::Backup)]
        );
    }
}
