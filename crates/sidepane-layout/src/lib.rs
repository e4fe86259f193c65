#![forbid(unsafe_code)]

//! Layout model and splitter gesture for a two-pane workspace.
//!
//! - [`panel`]: the authoritative [`PanelLayoutState`] and the width geometry
//!   ([`LayoutBounds`]) shared by gesture and controller.
//! - [`splitter`]: [`SplitterGesture`], which turns pointer input on the pane
//!   boundary into [`SplitterIntent`]s with clamping and auto-collapse
//!   hysteresis.
//!
//! Nothing in this crate persists or renders; see `sidepane-runtime` for the
//! controller that owns state and storage.

pub mod panel;
pub mod splitter;

pub use panel::{LayoutBounds, LayoutInvariant, PanelLayoutState};
pub use splitter::{
    COLLAPSE_ZONE_FACTOR, SplitterConfig, SplitterConfigError, SplitterGesture, SplitterHit,
    SplitterIntent, SplitterVisual,
};
