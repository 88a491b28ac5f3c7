// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Single-slot feedback notice with TTL expiry.
//!
//! [`NoticeBoard`] is the pure state (at most one notice, newest wins);
//! [`Notifier`] wraps it with per-notice expiry timers on a tokio runtime.
//! Each timer only hides the notice it was armed for.

use crate::render_port::RenderPort;
use crate::sync::lock;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;
use tokio::runtime::Handle;

/// How long a notice stays visible unless superseded.
pub const NOTICE_TTL: Duration = Duration::from_millis(2000);

/// Notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Operation went through.
    Success,
    /// Operation failed or was refused.
    Error,
}

/// Identifier for a notice entry.
pub type NoticeId = u64;

/// Notice data stored on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Stable identifier.
    pub id: NoticeId,
    /// Severity.
    pub kind: NoticeKind,
    /// Message text.
    pub message: String,
    /// Whether the notice is still on screen.
    pub visible: bool,
}

/// Holds the current notice; a new one immediately replaces the old.
#[derive(Debug)]
pub struct NoticeBoard {
    current: Option<Notice>,
    next_id: NoticeId,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self {
            current: None,
            next_id: 1,
        }
    }
}

impl NoticeBoard {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a notice, superseding whatever was there. Returns its id.
    pub fn show(&mut self, kind: NoticeKind, message: impl Into<String>) -> NoticeId {
        let id = self.next_id;
        self.next_id += 1;
        self.current = Some(Notice {
            id,
            kind,
            message: message.into(),
            visible: true,
        });
        id
    }

    /// Hide notice `id`. No-op (returns `false`) when a newer notice has
    /// replaced it or it is already hidden.
    pub fn expire(&mut self, id: NoticeId) -> bool {
        match self.current.as_mut() {
            Some(notice) if notice.id == id && notice.visible => {
                notice.visible = false;
                true
            }
            _ => false,
        }
    }

    /// The latest notice, visible or not.
    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    /// The latest notice if it is still visible.
    pub fn visible(&self) -> Option<&Notice> {
        self.current.as_ref().filter(|n| n.visible)
    }
}

/// Notice board plus its expiry timers.
///
/// Timers hold a weak reference to the board, so a timer firing after every
/// `Notifier` handle is gone does nothing.
#[derive(Clone)]
pub struct Notifier {
    board: Arc<Mutex<NoticeBoard>>,
    ttl: Duration,
    handle: Handle,
    render: Arc<dyn RenderPort>,
}

impl Notifier {
    /// Create a notifier whose timers run on `handle`.
    pub fn new(ttl: Duration, handle: Handle, render: Arc<dyn RenderPort>) -> Self {
        Self {
            board: Arc::new(Mutex::new(NoticeBoard::new())),
            ttl,
            handle,
            render,
        }
    }

    /// Show `message` and arm a fresh expiry timer for it.
    pub fn show(&self, kind: NoticeKind, message: impl Into<String>) -> NoticeId {
        let message = message.into();
        tracing::debug!(?kind, %message, "notice");
        let id = lock(&self.board).show(kind, message);
        self.render.request_redraw();

        let board: Weak<Mutex<NoticeBoard>> = Arc::downgrade(&self.board);
        let render = Arc::clone(&self.render);
        let ttl = self.ttl;
        self.handle.spawn(async move {
            tokio::time::sleep(ttl).await;
            let Some(board) = board.upgrade() else {
                return;
            };
            if lock(&board).expire(id) {
                render.request_redraw();
            }
        });
        id
    }

    /// Clone of the notice currently on screen, if any.
    pub fn visible(&self) -> Option<Notice> {
        lock(&self.board).visible().cloned()
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("board", &self.board)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
