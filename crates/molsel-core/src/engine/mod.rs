//! # Engine Module
//!
//! The stateful selection engine.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - History capacity and boundary fitting settings
//! - **Selection Store** ([`entry`], [`manager`]) - Per-structure selections and the mutation API
//! - **History** ([`history`]) - Bounded, de-duplicated, most-recently-used selection log
//! - **Statistics** ([`stats`]) - Lazily computed counts and labels over the whole selection
//! - **Notifications** ([`events`]) - `changed` / `additions-history-updated` subscribers
//! - **Error Handling** ([`error`]) - Engine-specific error types
//!
//! Geometry aggregation and state graph synchronization are implemented on the manager in the
//! private `aggregate` and `lifecycle` submodules.
//!
//! ## Key Capabilities
//!
//! - **Single source of truth**: every selection change funnels through
//!   [`manager::StructureSelectionManager::modify`]
//! - **Coalesced notifications**: at most one `changed` event per effective modification
//! - **Lifecycle safety**: selections never outlive or dangle past their structure snapshot

mod aggregate;
pub mod config;
pub mod entry;
pub mod error;
pub mod events;
pub mod history;
mod lifecycle;
pub mod manager;
pub mod stats;
