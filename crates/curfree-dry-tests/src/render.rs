// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Render port that counts redraw requests.

use curfree_app_core::render_port::RenderPort;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// [`RenderPort`] that counts calls. Clones share the counter.
#[derive(Debug, Clone, Default)]
pub struct CountingRenderPort {
    count: Arc<AtomicUsize>,
}

impl CountingRenderPort {
    /// Fresh counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of redraw requests so far.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl RenderPort for CountingRenderPort {
    fn request_redraw(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}
