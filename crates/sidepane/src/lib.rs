#![forbid(unsafe_code)]

//! Sidepane public facade crate.
//!
//! Re-exports the layout model, the controller and storage, and (with the
//! default `web` feature) the browser-facing workspace host, plus a prelude
//! for day-to-day usage.
//!
//! ```rust,ignore
//! use sidepane::prelude::*;
//!
//! let store = JsonFileStore::open("layout.json")?;
//! let mut host = WorkspaceHost::mount(store, PanelStorageKeys::default(), 1280, &LayoutPolicy::default())?;
//! host.toggle();
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use sidepane_core::{Cooldown, DeterministicClock, FrameCoalescer, OneShot, PointerButton};

// --- Layout re-exports -----------------------------------------------------

pub use sidepane_layout::{
    LayoutBounds, LayoutInvariant, PanelLayoutState, SplitterConfig, SplitterConfigError,
    SplitterGesture, SplitterHit, SplitterIntent, SplitterVisual,
};

// --- Runtime re-exports ----------------------------------------------------

pub use sidepane_runtime::{
    JsonFileStore, KeyValueStore, LayoutController, LayoutPolicy, LayoutPolicyError, MemoryStore,
    Observable, PanelStorageKeys, PanelView, PersistedLayout, PolicyConfigError, StorageError,
    Subscription,
};

// --- Web re-exports --------------------------------------------------------

#[cfg(feature = "web")]
pub use sidepane_web::{
    LeftPanelTab, SplitterCaptureAdapter, SplitterCaptureCommand, SplitterDispatch, Unmounted,
    WorkspaceError, WorkspaceHost,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for sidepane hosts.
#[derive(Debug)]
pub enum Error {
    /// Backing store failed to open or flush.
    Storage(StorageError),
    /// Policy values out of range.
    Policy(LayoutPolicyError),
    /// Policy file unreadable or malformed.
    PolicyConfig(PolicyConfigError),
    Splitter(SplitterConfigError),
    #[cfg(feature = "web")]
    Workspace(WorkspaceError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Policy(err) => write!(f, "{err}"),
            Self::PolicyConfig(err) => write!(f, "{err}"),
            Self::Splitter(err) => write!(f, "{err}"),
            #[cfg(feature = "web")]
            Self::Workspace(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Policy(err) => Some(err),
            Self::PolicyConfig(err) => Some(err),
            Self::Splitter(err) => Some(err),
            #[cfg(feature = "web")]
            Self::Workspace(err) => Some(err),
        }
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

impl From<LayoutPolicyError> for Error {
    fn from(err: LayoutPolicyError) -> Self {
        Self::Policy(err)
    }
}

impl From<PolicyConfigError> for Error {
    fn from(err: PolicyConfigError) -> Self {
        Self::PolicyConfig(err)
    }
}

impl From<SplitterConfigError> for Error {
    fn from(err: SplitterConfigError) -> Self {
        Self::Splitter(err)
    }
}

#[cfg(feature = "web")]
impl From<WorkspaceError> for Error {
    fn from(err: WorkspaceError) -> Self {
        Self::Workspace(err)
    }
}

/// Standard result type for sidepane APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Error, JsonFileStore, KeyValueStore, LayoutController, LayoutPolicy, MemoryStore,
        PanelLayoutState, PanelStorageKeys, PanelView, PointerButton, Result, SplitterHit,
        SplitterIntent,
    };

    #[cfg(feature = "web")]
    pub use crate::{LeftPanelTab, SplitterCaptureCommand, WorkspaceHost};

    pub use crate::{core, layout, runtime};
    #[cfg(feature = "web")]
    pub use crate::web;
}

pub use sidepane_core as core;
pub use sidepane_layout as layout;
pub use sidepane_runtime as runtime;
#[cfg(feature = "web")]
pub use sidepane_web as web;
