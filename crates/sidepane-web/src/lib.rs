#![forbid(unsafe_code)]

//! Browser-host glue for the sidepane layout.
//!
//! The host owns no timers or DOM handles: it feeds pointer, frame, resize
//! and time signals in and executes the [`SplitterCaptureCommand`]s that come
//! back.
//!
//! - [`splitter_capture`]: pointer lifecycle adapter around the splitter
//!   gesture, with listener acquire/release commands and structured logs.
//! - [`workspace`]: [`WorkspaceHost`], which routes splitter intents into the
//!   layout controller and tracks the left-panel tab.

pub mod splitter_capture;
pub mod workspace;

pub use splitter_capture::{
    SplitterCaptureAdapter, SplitterCaptureCommand, SplitterCaptureConfig, SplitterDispatch,
    SplitterIgnoredReason, SplitterLifecyclePhase, SplitterLogEntry, SplitterLogOutcome,
};
pub use workspace::{LeftPanelTab, Unmounted, WorkspaceError, WorkspaceHost};
