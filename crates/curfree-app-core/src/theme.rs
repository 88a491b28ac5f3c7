// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Process-wide light/dark theme state.
//!
//! One mutable cell outside any component: initialised once from the system
//! preference, flipped by the toggle handler, and re-applied to whatever
//! surface renders it. Nothing is persisted.

use crate::sync::lock;
use std::sync::{Mutex, OnceLock};

/// Colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Light scheme.
    #[default]
    Light,
    /// Dark scheme.
    Dark,
}

impl Theme {
    /// Theme matching a system preference.
    pub const fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// The other theme.
    pub const fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Attribute value used by renderers (`"light"` / `"dark"`).
    pub const fn attribute(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Surface that can display a theme. Applying the same theme twice must leave
/// the surface unchanged.
pub trait ThemeSink {
    /// Switch the surface to `theme`.
    fn apply_theme(&self, theme: Theme);
}

/// Mutable theme cell.
#[derive(Debug, Default)]
pub struct ThemeCell {
    current: Mutex<Theme>,
}

impl ThemeCell {
    /// Cell starting at `theme`.
    pub const fn new(theme: Theme) -> Self {
        Self {
            current: Mutex::new(theme),
        }
    }

    /// Current theme.
    pub fn current(&self) -> Theme {
        *lock(&self.current)
    }

    /// Flip the theme and return the new value.
    pub fn toggle(&self) -> Theme {
        let mut current = lock(&self.current);
        *current = current.toggled();
        tracing::debug!(theme = current.attribute(), "theme toggled");
        *current
    }

    /// Push the current theme to `sink`.
    pub fn apply(&self, sink: &dyn ThemeSink) {
        sink.apply_theme(self.current());
    }
}

static GLOBAL: OnceLock<ThemeCell> = OnceLock::new();

/// Initialise the process-wide cell from the system preference. Only the
/// first call reads `prefers_dark`; later calls return the existing cell.
pub fn init(prefers_dark: bool) -> &'static ThemeCell {
    GLOBAL.get_or_init(|| ThemeCell::new(Theme::from_prefers_dark(prefers_dark)))
}
