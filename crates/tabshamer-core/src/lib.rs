//! # Tab Shamer Core Library
//!
//! This library provides the core logic for Tab Shamer: it tracks how many
//! tabs a user has open and how long each has been open, and selects
//! escalating "shame" messages when either crosses a configured threshold.
//! The browser is a boundary collaborator: tab lifecycle events and tab
//! enumerations come in from a host bridge, and notifications go out through
//! a sink trait. The CLI binary is a thin surface over this crate.
//!
//! ## Key Components
//!
//! - [`shame`]: pure message-selection policy and tab-age arithmetic
//! - [`Settings`]: user thresholds and tone, persisted as TOML
//! - [`TabStore`]: SQLite key-value store of per-tab open timestamps
//! - [`TabEvent`]: host tab lifecycle events applied to the store
//! - [`ShameNotifier`]: cooldown-governed notification scheduling

pub mod error;
pub mod events;
pub mod notify;
pub mod settings;
pub mod shame;
pub mod storage;
pub mod tabs;

pub use error::{CoreError, NotifyError, SettingsError, StoreError};
pub use events::TabEvent;
pub use notify::{CheckOutcome, NotificationSink, ShameNotifier};
pub use settings::{Settings, Tone};
pub use storage::{SettingsStore, SyncSummary, TabStore};
pub use tabs::{AncientTab, OpenTab, TabId, TabRecord};
