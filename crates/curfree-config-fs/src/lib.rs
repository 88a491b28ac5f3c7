// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Filesystem adapters for curfree: the storage record transport and the
//! `panel.json` settings source (platform config dir).

mod ids;
pub mod settings;
pub mod storage;

pub use ids::{machine_id, sqm_id, uuid_v4};
pub use settings::FsSettingsSource;
pub use storage::{backup_path, default_storage_path, FsTransport};
