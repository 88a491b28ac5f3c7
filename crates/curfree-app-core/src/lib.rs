// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared application services for the curfree storage panel (snapshot model,
//! transport port, controller, notices, placement, theme, settings).
//! Keeps UI/runtime adapters thin and framework-agnostic.

pub mod controller;
pub mod notice;
pub mod placement;
pub mod render_port;
pub mod settings;
pub mod snapshot;
pub mod theme;
pub mod transport;

pub(crate) mod sync;

pub use controller::{
    ActionAvailability, ActionOutcome, PanelAction, PanelController, PanelOptions, PanelView,
    Rejection,
};
pub use notice::{Notice, NoticeBoard, NoticeId, NoticeKind, Notifier};
pub use snapshot::{ConfigSnapshot, Identifier};
pub use transport::{ConfigTransport, TransportError, TransportResult};
