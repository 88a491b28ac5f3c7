// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Top-level application wiring: controller, theme cell, and the frame loop.

use crate::render_port::{EguiRenderPort, EguiThemeSink};
use crate::ui::{self, Tooltips};
use crate::ui_state::{self, UiEffect, UiEvent};
use curfree_app_core::settings::PanelSettings;
use curfree_app_core::theme::{self, ThemeCell};
use curfree_app_core::{PanelController, PanelView};
use curfree_config_fs::FsTransport;
use std::sync::Arc;
use tokio::runtime::Handle;

pub struct PanelApp {
    controller: PanelController<FsTransport>,
    theme: &'static ThemeCell,
    tooltips: Tooltips,
}

impl PanelApp {
    pub fn new(cc: &eframe::CreationContext<'_>, handle: Handle, settings: &PanelSettings) -> Self {
        let ctx = cc.egui_ctx.clone();
        let prefers_dark = matches!(ctx.system_theme(), Some(egui::Theme::Dark));
        let theme = theme::init(prefers_dark);
        theme.apply(&EguiThemeSink(&ctx));

        let transport = FsTransport::with_default_location(settings.storage_path.clone());
        tracing::info!(record = ?transport.record_path(), "storage record");
        let controller = PanelController::mount(
            transport,
            settings.options(),
            handle,
            Arc::new(EguiRenderPort::new(ctx)),
        );
        Self {
            controller,
            theme,
            tooltips: Tooltips::default(),
        }
    }

    fn apply_ui_event(&self, ctx: &egui::Context, view: &PanelView, ev: UiEvent) {
        for effect in ui_state::reduce(view, ev) {
            match effect {
                UiEffect::ToggleTheme => {
                    self.theme.toggle();
                    self.theme.apply(&EguiThemeSink(ctx));
                }
                UiEffect::Dispatch(action) => {
                    let outcome = self.controller.dispatch(action);
                    tracing::debug!(?action, ?outcome, "action handled");
                }
            }
        }
    }
}

impl eframe::App for PanelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let view = self.controller.view();
        let events = ui::draw(ctx, &view, self.theme.current(), &mut self.tooltips);
        for ev in events {
            self.apply_ui_event(ctx, &view, ev);
        }
    }
}
