#![forbid(unsafe_code)]

//! Runtime side of the sidepane layout.
//!
//! - [`controller`]: [`LayoutController`], the owner of the authoritative
//!   panel state.
//! - [`storage`]: [`KeyValueStore`] backends and the typed
//!   [`PersistedLayout`] view.
//! - [`observable`]: [`Observable`] values for the render layer.
//! - [`config`]: [`LayoutPolicy`], policy-as-data configuration.
//! - `logging` (feature `tracing-json`): subscriber setup for binaries.

pub mod config;
pub mod controller;
#[cfg(feature = "tracing-json")]
pub mod logging;
pub mod observable;
pub mod storage;

pub use config::{LayoutPolicy, LayoutPolicyError, PolicyConfigError};
pub use controller::{LayoutController, PanelView};
pub use observable::{Observable, Subscription};
pub use storage::{
    JsonFileStore, KeyValueStore, MemoryStore, PanelStorageKeys, PersistedLayout, StorageError,
    StorageResult,
};
