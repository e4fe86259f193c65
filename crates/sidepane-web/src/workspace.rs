#![forbid(unsafe_code)]

//! Two-pane workspace host.
//!
//! [`WorkspaceHost`] is the glue a browser shell drives: it owns the
//! [`SplitterCaptureAdapter`], the [`LayoutController`], a deterministic
//! clock and the active left-panel tab, and routes splitter intents into the
//! controller:
//!
//! | Intent            | Controller call                        |
//! |-------------------|----------------------------------------|
//! | `Expand`          | `expand` (only when collapsed)         |
//! | `Width(w)`        | `apply_width_intent(w)`                |
//! | `Collapse`        | `collapse` (only when expanded)        |
//! | `ToggleCollapsed` | `apply_collapse_intent`                |
//! | `DragEnded`       | `commit_width_intent(current width)`   |
//!
//! Time only moves when the host calls [`WorkspaceHost::advance`] or
//! [`WorkspaceHost::set_time`]; both fire due timers.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sidepane_core::{DeterministicClock, PointerButton};
use sidepane_layout::{PanelLayoutState, SplitterConfigError, SplitterHit, SplitterIntent, SplitterVisual};
use sidepane_runtime::{
    KeyValueStore, LayoutController, LayoutPolicy, LayoutPolicyError, Observable, PanelStorageKeys,
    PanelView,
};

use crate::splitter_capture::{
    SplitterCaptureAdapter, SplitterCaptureCommand, SplitterCaptureConfig, SplitterDispatch,
};

/// Tabs hosted by the left panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LeftPanelTab {
    #[default]
    Thoughts,
    McpConfig,
    FileSystem,
}

impl LeftPanelTab {
    pub const ALL: [Self; 3] = [Self::Thoughts, Self::McpConfig, Self::FileSystem];

    /// Identifier used in storage and by the shell.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Thoughts => "thoughts",
            Self::McpConfig => "mcpConfig",
            Self::FileSystem => "fileSystem",
        }
    }
}

impl fmt::Display for LeftPanelTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure mounting a [`WorkspaceHost`].
#[derive(Debug, Clone, PartialEq)]
pub enum WorkspaceError {
    Policy(LayoutPolicyError),
    Splitter(SplitterConfigError),
}

impl fmt::Display for WorkspaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Policy(e) => write!(f, "layout policy: {e}"),
            Self::Splitter(e) => write!(f, "splitter config: {e}"),
        }
    }
}

impl std::error::Error for WorkspaceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Policy(e) => Some(e),
            Self::Splitter(e) => Some(e),
        }
    }
}

impl From<LayoutPolicyError> for WorkspaceError {
    fn from(err: LayoutPolicyError) -> Self {
        Self::Policy(err)
    }
}

impl From<SplitterConfigError> for WorkspaceError {
    fn from(err: SplitterConfigError) -> Self {
        Self::Splitter(err)
    }
}

/// Store and final listener command handed back by [`WorkspaceHost::unmount`].
#[derive(Debug)]
pub struct Unmounted<S> {
    pub store: S,
    pub capture_command: Option<SplitterCaptureCommand>,
}

/// Mounted two-pane workspace.
#[derive(Debug)]
pub struct WorkspaceHost<S> {
    controller: LayoutController<S>,
    splitter: SplitterCaptureAdapter,
    clock: DeterministicClock,
    active_tab: LeftPanelTab,
}

impl<S: KeyValueStore> WorkspaceHost<S> {
    /// Restore layout and active tab from `store` and mount.
    pub fn mount(
        store: S,
        keys: PanelStorageKeys,
        container_width: u32,
        policy: &LayoutPolicy,
    ) -> Result<Self, WorkspaceError> {
        let splitter = SplitterCaptureAdapter::new(SplitterCaptureConfig {
            gesture: policy.splitter_config(),
            ..SplitterCaptureConfig::default()
        })?;
        let controller = LayoutController::initialize(store, keys, container_width, policy)?;
        let tab_key = controller.storage().keys().active_tab.clone();
        let active_tab = controller
            .storage()
            .read::<LeftPanelTab>(&tab_key)
            .unwrap_or_default();
        Ok(Self {
            controller,
            splitter,
            clock: DeterministicClock::new(),
            active_tab,
        })
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    #[must_use]
    pub const fn state(&self) -> &PanelLayoutState {
        self.controller.state()
    }

    #[must_use]
    pub const fn controller(&self) -> &LayoutController<S> {
        &self.controller
    }

    #[must_use]
    pub const fn splitter(&self) -> &SplitterCaptureAdapter {
        &self.splitter
    }

    /// Render-layer handle for the panel.
    #[must_use]
    pub fn view(&self) -> Observable<PanelView> {
        self.controller.view()
    }

    /// Splitter visual hints.
    #[must_use]
    pub fn visual(&self) -> SplitterVisual {
        self.splitter.visual(self.controller.is_collapsed())
    }

    #[must_use]
    pub const fn active_tab(&self) -> LeftPanelTab {
        self.active_tab
    }

    /// Switch the left-panel tab and persist the choice.
    pub fn select_tab(&mut self, tab: LeftPanelTab) {
        if tab == self.active_tab {
            return;
        }
        self.active_tab = tab;
        let key = self.controller.storage().keys().active_tab.clone();
        self.controller.storage_mut().write(&key, &tab);
    }

    /// Advance host time by `delta`, firing due timers.
    pub fn advance(&mut self, delta: Duration) -> SplitterDispatch {
        self.clock.advance(delta);
        self.run_timers()
    }

    /// Move host time to `now` (never backwards), firing due timers.
    pub fn set_time(&mut self, now: Duration) -> SplitterDispatch {
        self.clock.set(now);
        self.run_timers()
    }

    pub fn pointer_enter(&mut self) {
        self.splitter.set_hovering(true);
    }

    /// Pointer left the splitter: ends hover, and cancels a drag whose
    /// capture the host never acknowledged.
    pub fn pointer_leave(&mut self, pointer_id: u32) -> SplitterDispatch {
        self.splitter.set_hovering(false);
        let width = self.controller.width();
        let dispatch = self.splitter.pointer_leave(pointer_id, width);
        self.route(&dispatch);
        dispatch
    }

    pub fn pointer_down(
        &mut self,
        pointer_id: u32,
        button: PointerButton,
        hit: SplitterHit,
        x: i32,
    ) -> SplitterDispatch {
        let collapsed = self.controller.is_collapsed();
        let dispatch = self.splitter.pointer_down(pointer_id, button, hit, x, collapsed);
        if !dispatch.is_ignored() {
            self.controller.begin_drag();
        }
        self.route(&dispatch);
        dispatch
    }

    pub fn capture_acquired(&mut self, pointer_id: u32) -> SplitterDispatch {
        self.splitter.capture_acquired(pointer_id)
    }

    /// Queue a move; it is applied on the next [`WorkspaceHost::animation_frame`].
    pub fn pointer_move(&mut self, pointer_id: u32, x: i32) -> SplitterDispatch {
        let container_width = self.controller.container_width();
        self.splitter.pointer_move(pointer_id, x, container_width)
    }

    pub fn animation_frame(&mut self) -> SplitterDispatch {
        let dispatch = self.splitter.animation_frame(self.clock.now());
        self.route(&dispatch);
        dispatch
    }

    pub fn pointer_up(&mut self, pointer_id: u32, button: PointerButton) -> SplitterDispatch {
        let width = self.controller.width();
        let dispatch = self.splitter.pointer_up(pointer_id, button, width);
        self.route(&dispatch);
        dispatch
    }

    pub fn pointer_cancel(&mut self, pointer_id: Option<u32>) -> SplitterDispatch {
        let width = self.controller.width();
        let dispatch = self.splitter.pointer_cancel(pointer_id, width);
        self.route(&dispatch);
        dispatch
    }

    pub fn blur(&mut self) -> SplitterDispatch {
        let width = self.controller.width();
        let dispatch = self.splitter.blur(width);
        self.route(&dispatch);
        dispatch
    }

    pub fn visibility_hidden(&mut self) -> SplitterDispatch {
        let width = self.controller.width();
        let dispatch = self.splitter.visibility_hidden(width);
        self.route(&dispatch);
        dispatch
    }

    pub fn lost_pointer_capture(&mut self, pointer_id: u32) -> SplitterDispatch {
        let width = self.controller.width();
        let dispatch = self.splitter.lost_pointer_capture(pointer_id, width);
        self.route(&dispatch);
        dispatch
    }

    pub fn toggle(&mut self) -> SplitterDispatch {
        let dispatch = self.splitter.toggle_click(self.clock.now());
        self.route(&dispatch);
        dispatch
    }

    /// Report a new container width from the render layer.
    pub fn resize(&mut self, container_width: u32) -> bool {
        self.controller
            .on_container_resize(container_width, self.clock.now())
    }

    /// Tear everything down and hand the store back.
    ///
    /// Pending timers are cancelled, listeners released, and the layout
    /// persisted.
    pub fn unmount(mut self) -> Unmounted<S> {
        let dispatch = self.splitter.teardown();
        self.controller.teardown();
        Unmounted {
            store: self.controller.into_store(),
            capture_command: dispatch.capture_command,
        }
    }

    fn run_timers(&mut self) -> SplitterDispatch {
        let now = self.clock.now();
        let dispatch = self.splitter.poll(now);
        self.route(&dispatch);
        self.controller.tick(now);
        dispatch
    }

    fn route(&mut self, dispatch: &SplitterDispatch) {
        let now = self.clock.now();
        for intent in &dispatch.intents {
            match *intent {
                SplitterIntent::Expand => {
                    self.controller.expand(now);
                }
                SplitterIntent::Width(width) => {
                    self.controller.apply_width_intent(width);
                }
                SplitterIntent::Collapse => {
                    self.controller.collapse(now);
                }
                SplitterIntent::ToggleCollapsed => self.controller.apply_collapse_intent(now),
                SplitterIntent::DragEnded => {
                    let width = self.controller.width();
                    self.controller.commit_width_intent(width);
                }
            }
        }
    }
}
