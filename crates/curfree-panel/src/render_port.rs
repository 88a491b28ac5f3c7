// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! egui-backed adapters for the core's render and theme ports.

use curfree_app_core::render_port::RenderPort;
use curfree_app_core::theme::{Theme, ThemeSink};

/// Forwards redraw requests from runtime tasks to the egui context.
#[derive(Clone)]
pub struct EguiRenderPort {
    ctx: egui::Context,
}

impl EguiRenderPort {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl RenderPort for EguiRenderPort {
    fn request_redraw(&self) {
        self.ctx.request_repaint();
    }
}

/// Applies the theme cell's value to the egui context.
pub struct EguiThemeSink<'a>(pub &'a egui::Context);

impl ThemeSink for EguiThemeSink<'_> {
    fn apply_theme(&self, theme: Theme) {
        let preference = match theme {
            Theme::Light => egui::ThemePreference::Light,
            Theme::Dark => egui::ThemePreference::Dark,
        };
        self.0.set_theme(preference);
    }
}
