//! Scripted host events and the replay loop.
//!
//! A script is a JSON array of events tagged by `event`:
//!
//! ```json
//! [
//!   { "event": "pointer_down", "x": 300 },
//!   { "event": "pointer_move", "x": 420 },
//!   { "event": "frame" },
//!   { "event": "pointer_up" },
//!   { "event": "advance", "ms": 300 },
//!   { "event": "select_tab", "tab": "fileSystem" }
//! ]
//! ```
//!
//! `pointer_id` defaults to 1 and `button` to `primary`. An explicit
//! `unmount` may only appear last; without one the host is unmounted after
//! the final event so the layout is persisted either way.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sidepane_core::PointerButton;
use sidepane_layout::{PanelLayoutState, SplitterHit, SplitterIntent};
use sidepane_runtime::{KeyValueStore, PanelView};
use sidepane_web::{LeftPanelTab, SplitterDispatch, WorkspaceHost};
use tracing::debug;

use crate::error::{ReplayError, Result};

const fn default_pointer_id() -> u32 {
    1
}

const fn default_button() -> PointerButton {
    PointerButton::Primary
}

const fn default_hit() -> SplitterHit {
    SplitterHit::Handle
}

/// One host-side signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    PointerDown {
        #[serde(default = "default_pointer_id")]
        pointer_id: u32,
        x: i32,
        #[serde(default = "default_button")]
        button: PointerButton,
        #[serde(default = "default_hit")]
        hit: SplitterHit,
    },
    PointerMove {
        #[serde(default = "default_pointer_id")]
        pointer_id: u32,
        x: i32,
    },
    /// Display refresh: applies the latest queued move.
    Frame,
    PointerUp {
        #[serde(default = "default_pointer_id")]
        pointer_id: u32,
        #[serde(default = "default_button")]
        button: PointerButton,
    },
    PointerCancel {
        #[serde(default)]
        pointer_id: Option<u32>,
    },
    PointerLeave {
        #[serde(default = "default_pointer_id")]
        pointer_id: u32,
    },
    Blur,
    Toggle,
    Resize {
        container_width: u32,
    },
    Advance {
        ms: u64,
    },
    SelectTab {
        tab: LeftPanelTab,
    },
    Unmount,
}

/// Outcome of a replay, printed by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    pub state: PanelLayoutState,
    pub active_tab: LeftPanelTab,
    pub view: PanelView,
    /// Every intent the splitter emitted, in order.
    pub intents: Vec<SplitterIntent>,
    pub events: usize,
    /// Events the splitter dropped (wrong pointer, cooldown, ...).
    pub ignored: usize,
    pub elapsed_ms: u64,
}

/// Read a script file.
pub fn load_script(path: &Path) -> Result<Vec<HostEvent>> {
    if !path.exists() {
        return Err(ReplayError::MissingScript {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Drive `host` through `events`, unmount it, and return the report and
/// the store.
pub fn replay<S: KeyValueStore>(
    mut host: WorkspaceHost<S>,
    events: &[HostEvent],
) -> Result<(ReplayReport, S)> {
    let mut intents = Vec::new();
    let mut ignored = 0;

    for (index, event) in events.iter().enumerate() {
        if *event == HostEvent::Unmount {
            if index + 1 != events.len() {
                return Err(ReplayError::invalid_event(
                    index,
                    "unmount must be the last event",
                ));
            }
            break;
        }
        let Some(dispatch) = apply(&mut host, event) else {
            continue;
        };
        if dispatch.is_ignored() {
            ignored += 1;
            debug!(target: "sidepane.replay", index, outcome = ?dispatch.log.outcome, "event ignored");
        }
        intents.extend(dispatch.intents);
    }

    let elapsed = host.now();
    let report = ReplayReport {
        state: *host.state(),
        active_tab: host.active_tab(),
        view: host.view().get(),
        intents,
        events: events.len(),
        ignored,
        elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
    };
    let unmounted = host.unmount();
    Ok((report, unmounted.store))
}

fn apply<S: KeyValueStore>(host: &mut WorkspaceHost<S>, event: &HostEvent) -> Option<SplitterDispatch> {
    match *event {
        HostEvent::PointerDown {
            pointer_id,
            x,
            button,
            hit,
        } => {
            let dispatch = host.pointer_down(pointer_id, button, hit, x);
            // The replay plays the host role and acknowledges capture at once.
            if dispatch.capture_command.is_some() {
                host.capture_acquired(pointer_id);
            }
            Some(dispatch)
        }
        HostEvent::PointerMove { pointer_id, x } => Some(host.pointer_move(pointer_id, x)),
        HostEvent::Frame => Some(host.animation_frame()),
        HostEvent::PointerUp { pointer_id, button } => Some(host.pointer_up(pointer_id, button)),
        HostEvent::PointerCancel { pointer_id } => Some(host.pointer_cancel(pointer_id)),
        HostEvent::PointerLeave { pointer_id } => Some(host.pointer_leave(pointer_id)),
        HostEvent::Blur => Some(host.blur()),
        HostEvent::Toggle => Some(host.toggle()),
        HostEvent::Resize { container_width } => {
            host.resize(container_width);
            None
        }
        HostEvent::Advance { ms } => {
            let dispatch = host.advance(Duration::from_millis(ms));
            (!dispatch.is_ignored()).then_some(dispatch)
        }
        HostEvent::SelectTab { tab } => {
            host.select_tab(tab);
            None
        }
        HostEvent::Unmount => None,
    }
}
