// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Port trait for the panel core to request a repaint after background work
//! (fetch completion, settle timers, notice expiry) without depending on a
//! specific UI crate.

/// Minimal redraw port; implementations are expected to be cheap/best-effort
/// and typically just forward to the UI context's repaint request. Called from
/// runtime worker threads, hence `Send + Sync`.
pub trait RenderPort: Send + Sync {
    /// Request a redraw of the panel surface.
    fn request_redraw(&self);
}

/// Port that ignores redraw requests (headless use, tests).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRenderPort;

impl RenderPort for NoopRenderPort {
    fn request_redraw(&self) {}
}
