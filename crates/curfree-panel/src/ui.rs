// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Panel drawing. Widgets only report [`UiEvent`]s; nothing here calls the
//! controller.

use crate::ui_state::{control, UiEvent};
use curfree_app_core::placement::{Bounds, TooltipPlacement};
use curfree_app_core::theme::Theme;
use curfree_app_core::{Notice, NoticeKind, PanelAction, PanelView};
use egui::{Color32, RichText};

const SUCCESS: Color32 = Color32::from_rgb(34, 197, 94);
const ERROR: Color32 = Color32::from_rgb(239, 68, 68);
const SMALL: f32 = 12.0;
const ICON_SIZE: f32 = 28.0;
const TOOLTIP_PAD: egui::Vec2 = egui::vec2(8.0, 4.0);
const TOOLTIP_GAP: f32 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IconButton {
    Backup,
    Refresh,
    Reset,
}

impl IconButton {
    const fn index(self) -> usize {
        match self {
            IconButton::Backup => 0,
            IconButton::Refresh => 1,
            IconButton::Reset => 2,
        }
    }

    const fn icon(self) -> &'static str {
        match self {
            IconButton::Backup => "💾",
            IconButton::Refresh => "🔄",
            IconButton::Reset => "✨",
        }
    }

    const fn tooltip(self) -> &'static str {
        match self {
            IconButton::Backup => "Backup Config",
            IconButton::Refresh => "Refresh Config",
            IconButton::Reset => "Generate New Config",
        }
    }

    const fn action(self) -> PanelAction {
        match self {
            IconButton::Backup => PanelAction::Backup,
            IconButton::Refresh => PanelAction::Refresh,
            IconButton::Reset => PanelAction::Reset,
        }
    }

    const fn event(self) -> UiEvent {
        match self {
            IconButton::Backup => UiEvent::BackupClicked,
            IconButton::Refresh => UiEvent::RefreshClicked,
            IconButton::Reset => UiEvent::ResetClicked,
        }
    }
}

/// Placement trackers for the icon-button tooltips; lives as long as the window.
#[derive(Debug, Default)]
pub struct Tooltips {
    placements: [TooltipPlacement; 3],
}

pub fn draw(
    ctx: &egui::Context,
    view: &PanelView,
    theme: Theme,
    tooltips: &mut Tooltips,
) -> Vec<UiEvent> {
    let mut events = Vec::new();
    egui::CentralPanel::default().show(ctx, |ui| {
        header(ui, theme, &mut events);
        title_card(ui, view.notice.as_ref());
        ui.add_space(8.0);
        storage_section(ui, view, tooltips, &mut events);
    });
    events
}

fn header(ui: &mut egui::Ui, theme: Theme, events: &mut Vec<UiEvent>) {
    ui.horizontal(|ui| {
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let icon = match theme {
                Theme::Dark => "☀",
                Theme::Light => "🌙",
            };
            if ui.button(icon).clicked() {
                events.push(UiEvent::ThemeToggleClicked);
            }
        });
    });
}

fn title_card(ui: &mut egui::Ui, notice: Option<&Notice>) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.label(RichText::new("🎯").size(20.0));
            ui.label(RichText::new("Cursor Free").size(16.0).strong());
            ui.label(RichText::new("Cursor Too Many Free Fixed").size(SMALL).weak());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(notice) = notice {
                    notice_badge(ui, notice);
                }
            });
        });
    });
}

fn notice_badge(ui: &mut egui::Ui, notice: &Notice) {
    let color = match notice.kind {
        NoticeKind::Success => SUCCESS,
        NoticeKind::Error => ERROR,
    };
    egui::Frame::new()
        .fill(color.gamma_multiply(0.2))
        .corner_radius(10.0)
        .inner_margin(egui::Margin::symmetric(8, 2))
        .show(ui, |ui| {
            ui.label(RichText::new(&notice.message).size(SMALL).color(color));
        });
}

fn storage_section(
    ui: &mut egui::Ui,
    view: &PanelView,
    tooltips: &mut Tooltips,
    events: &mut Vec<UiEvent>,
) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.label(RichText::new("Cursor Storage").size(15.0).strong());
            read_only_checkbox(ui, view, events);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                for button in [IconButton::Reset, IconButton::Refresh, IconButton::Backup] {
                    icon_button(ui, view, button, tooltips, events);
                }
                ui.separator();
                restore_button(ui, view, events);
            });
        });
        ui.add_space(6.0);
        egui::ScrollArea::vertical().show(ui, |ui| {
            for (label, value) in view.snapshot.rows() {
                config_row(ui, label, value);
            }
        });
    });
}

fn read_only_checkbox(ui: &mut egui::Ui, view: &PanelView, events: &mut Vec<UiEvent>) {
    let mut checked = view.snapshot.is_read_only;
    let availability = control(view, PanelAction::SetReadOnly(!checked));
    let mut response = ui.add_enabled(
        availability.enabled,
        egui::Checkbox::new(&mut checked, RichText::new("Read Only").size(SMALL)),
    );
    if let Some(hint) = availability.hint {
        response = response.on_disabled_hover_text(hint);
    }
    if response.changed() {
        events.push(UiEvent::ReadOnlyToggled(checked));
    }
}

fn restore_button(ui: &mut egui::Ui, view: &PanelView, events: &mut Vec<UiEvent>) {
    let availability = control(view, PanelAction::Restore);
    let text = RichText::new("Restore Backup").size(SMALL);
    let text = if availability.enabled {
        text
    } else {
        text.color(ERROR.gamma_multiply(0.8))
    };
    let mut response = ui.add_enabled(availability.enabled, egui::Button::new(text));
    if let Some(hint) = availability.hint {
        response = response.on_disabled_hover_text(hint);
    }
    if response.clicked() {
        events.push(UiEvent::RestoreClicked);
    }
}

fn icon_button(
    ui: &mut egui::Ui,
    view: &PanelView,
    button: IconButton,
    tooltips: &mut Tooltips,
    events: &mut Vec<UiEvent>,
) {
    let availability = control(view, button.action());
    let size = egui::vec2(ICON_SIZE, ICON_SIZE);
    let response = if button == IconButton::Refresh && view.loading {
        ui.add_sized(size, egui::Spinner::new())
    } else {
        ui.add_enabled(
            availability.enabled,
            egui::Button::new(button.icon())
                .min_size(size)
                .corner_radius(ICON_SIZE * 0.5),
        )
    };
    if response.clicked() {
        events.push(button.event());
    }

    let placement = &mut tooltips.placements[button.index()];
    let owner = bounds_of(response.rect);
    let viewport_width = ui.ctx().screen_rect().width();
    placement.on_resize(owner, viewport_width);
    if response.contains_pointer() {
        let text = availability.hint.unwrap_or(button.tooltip());
        show_tooltip(ui, button, text, owner, viewport_width, placement);
    }
}

fn show_tooltip(
    ui: &egui::Ui,
    button: IconButton,
    text: &str,
    owner: Bounds,
    viewport_width: f32,
    placement: &mut TooltipPlacement,
) {
    let galley = ui.painter().layout_no_wrap(
        text.to_owned(),
        egui::FontId::proportional(SMALL),
        ui.visuals().text_color(),
    );
    let size = galley.size() + TOOLTIP_PAD * 2.0;
    placement.on_label_width(owner, size.x, viewport_width);
    let left = placement.label_left(owner, size.x);
    let top = owner.top - TOOLTIP_GAP - size.y;

    egui::Area::new(ui.id().with(("tooltip", button.index())))
        .order(egui::Order::Tooltip)
        .fixed_pos(egui::pos2(left, top))
        .interactable(false)
        .show(ui.ctx(), |ui| {
            egui::Frame::popup(ui.style())
                .inner_margin(egui::Margin::symmetric(8, 4))
                .show(ui, |ui| {
                    ui.label(RichText::new(text).size(SMALL));
                });
        });
}

fn bounds_of(rect: egui::Rect) -> Bounds {
    Bounds::new(rect.left(), rect.top(), rect.right(), rect.bottom())
}

fn config_row(ui: &mut egui::Ui, label: &str, value: &str) {
    egui::Frame::new()
        .fill(ui.visuals().faint_bg_color)
        .corner_radius(6.0)
        .inner_margin(egui::Margin::same(8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(format!("{label}:")).size(SMALL).strong());
            let shown = if value.is_empty() { "Loading..." } else { value };
            ui.add(egui::Label::new(RichText::new(shown).size(SMALL).monospace()).wrap());
        });
    ui.add_space(4.0);
}
