// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for curfree crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`fixtures`] - `ConfigSnapshot` builders and a sample record
//! - [`render`] - Render port that counts redraw requests
//! - [`settings`] - In-memory settings source for testing without filesystem
//! - [`transport`] - Scripted transport with call log and failure switches

pub mod fixtures;
pub mod render;
pub mod settings;
pub mod transport;

// Re-export commonly used items at crate root for convenience
pub use fixtures::{sample_snapshot, SnapshotBuilder, SAMPLE_PATH};
pub use render::CountingRenderPort;
pub use settings::InMemorySettingsSource;
pub use transport::{ScriptedTransport, TransportCall};
