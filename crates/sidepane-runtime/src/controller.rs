#![forbid(unsafe_code)]

//! Layout controller: owner of the authoritative panel state.
//!
//! [`LayoutController`] applies splitter intents, keeps the width
//! proportional across container resizes, persists committed state, and
//! publishes a [`PanelView`] for the render layer.
//!
//! # State machine
//!
//! ```text
//!   Expanded/Idle ──pointer-down──▶ Expanded/Dragging ──commit──▶ Expanded/Idle
//!        │   ▲                              │
//!  toggle│   │toggle / drag-open            │collapse (release in zone, auto)
//!        ▼   │                              ▼
//!   Collapsed/Idle ◀────────────────────────┘
//! ```
//!
//! Storage writes happen on commits (drag end, collapse, expand, resize,
//! teardown), never on transient drag frames.
//! The view follows the same split: drag frames are published transient
//! and the commit settles them.
//!
//! # Invariants
//!
//! 1. `collapsed` iff `width == 0` after every committing operation.
//! 2. `expanded_width` only changes when a drag, resize or collapse settles.
//! 3. `width_ratio` only changes on drag end or expand, never on resize.
//! 4. Resize is a no-op for the width while dragging or transitioning.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use sidepane_core::Cooldown;
use sidepane_layout::panel::width_ratio;
use sidepane_layout::{LayoutBounds, LayoutInvariant, PanelLayoutState};
use tracing::{debug, debug_span};

use crate::config::{LayoutPolicy, LayoutPolicyError};
use crate::observable::Observable;
use crate::storage::{KeyValueStore, PanelStorageKeys, PersistedLayout};

/// Snapshot published to the render layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PanelView {
    pub width: u32,
    pub collapsed: bool,
    /// Drop the panel content entirely, not just shrink it.
    pub content_hidden: bool,
    /// A collapse/expand transition is in flight.
    pub animating: bool,
}

/// Owner of [`PanelLayoutState`] and its persistence.
#[derive(Debug)]
pub struct LayoutController<S> {
    state: PanelLayoutState,
    bounds: LayoutBounds,
    container_width: u32,
    dragging: bool,
    transition: Cooldown,
    now: Duration,
    storage: PersistedLayout<S>,
    view: Observable<PanelView>,
}

impl<S: KeyValueStore> LayoutController<S> {
    /// Restore state from `store`, synthesizing defaults where keys are
    /// missing or unusable.
    ///
    /// Stored widths are clamped into bounds. A collapsed layout recovers its
    /// expanded width from storage, falling back to
    /// `container_width * default_width_fraction`.
    pub fn initialize(
        store: S,
        keys: PanelStorageKeys,
        container_width: u32,
        policy: &LayoutPolicy,
    ) -> Result<Self, LayoutPolicyError> {
        let policy = policy.clone().validated()?;
        let bounds = policy.bounds();
        let storage = PersistedLayout::new(store, keys);

        let stored_width = storage.width().filter(|w| *w > 0);
        let stored_expanded = storage.expanded_width().filter(|w| *w > 0);
        let stored_ratio = storage
            .width_ratio()
            .filter(|r| r.is_finite() && *r > 0.0 && *r <= 1.0);
        let default_width = bounds.default_width(container_width, policy.default_width_fraction);

        let state = if storage.collapsed().unwrap_or(false) {
            let expanded = stored_expanded
                .or(stored_width)
                .map_or(default_width, |w| bounds.clamp_settled(w));
            let ratio = stored_ratio.unwrap_or_else(|| width_ratio(expanded, container_width));
            PanelLayoutState::collapsed(expanded, ratio)
        } else {
            let width = stored_width
                .or(stored_expanded)
                .map_or(default_width, |w| bounds.clamp_settled(w));
            let ratio = stored_ratio.unwrap_or_else(|| width_ratio(width, container_width));
            PanelLayoutState {
                width,
                collapsed: false,
                expanded_width: width,
                width_ratio: ratio,
            }
        };

        debug!(
            target: "sidepane.layout",
            width = state.width,
            collapsed = state.collapsed,
            expanded_width = state.expanded_width,
            width_ratio = state.width_ratio,
            "layout restored"
        );

        let view = Observable::new(PanelView::default());
        let controller = Self {
            state,
            bounds,
            container_width,
            dragging: false,
            transition: Cooldown::new(policy.transition()),
            now: Duration::ZERO,
            storage,
            view,
        };
        controller.publish();
        Ok(controller)
    }

    #[must_use]
    pub const fn state(&self) -> &PanelLayoutState {
        &self.state
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.state.width
    }

    #[must_use]
    pub const fn is_collapsed(&self) -> bool {
        self.state.collapsed
    }

    #[must_use]
    pub const fn bounds(&self) -> &LayoutBounds {
        &self.bounds
    }

    #[must_use]
    pub const fn container_width(&self) -> u32 {
        self.container_width
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Whether a collapse/expand transition is in flight at `now`.
    #[must_use]
    pub fn is_transitioning(&self, now: Duration) -> bool {
        self.transition.is_active(now)
    }

    /// Handle for render-layer subscriptions.
    #[must_use]
    pub fn view(&self) -> Observable<PanelView> {
        self.view.clone()
    }

    #[must_use]
    pub const fn storage(&self) -> &PersistedLayout<S> {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut PersistedLayout<S> {
        &mut self.storage
    }

    /// Hand back the store, typically after [`LayoutController::teardown`].
    #[must_use]
    pub fn into_store(self) -> S {
        self.storage.into_inner()
    }

    /// Settled-state invariant violations; empty when consistent.
    #[must_use]
    pub fn check_invariants(&self) -> Vec<LayoutInvariant> {
        self.state.check(&self.bounds)
    }

    /// Mark a drag session as started.
    pub fn begin_drag(&mut self) {
        self.dragging = true;
        self.publish();
    }

    /// Apply a transient drag width without persisting.
    ///
    /// Returns `false` when the change is below one pixel or the panel is
    /// collapsed.
    pub fn apply_width_intent(&mut self, candidate: u32) -> bool {
        if self.state.collapsed || candidate.abs_diff(self.state.width) < 1 {
            return false;
        }
        self.dragging = true;
        self.state.width = candidate;
        self.publish();
        true
    }

    /// Settle a drag at `final_width`, capturing ratio and expanded width.
    pub fn commit_width_intent(&mut self, final_width: u32) {
        let _span = debug_span!(target: "sidepane.layout", "layout.commit", final_width).entered();
        self.dragging = false;

        if self.state.collapsed {
            // Collapse already persisted its fields.
            self.publish();
            return;
        }
        if final_width == 0 {
            self.state = PanelLayoutState::collapsed(self.state.expanded_width, self.state.width_ratio);
            self.storage.set_width(0);
            self.storage.set_collapsed(true);
            self.publish();
            return;
        }

        let width = self.bounds.clamp_settled(final_width);
        self.state.width = width;
        self.state.expanded_width = width;
        self.state.width_ratio = width_ratio(width, self.container_width);
        self.storage.set_width(width);
        self.storage.set_width_ratio(self.state.width_ratio);
        self.storage.set_expanded_width(width);
        self.storage.set_collapsed(false);
        debug!(
            target: "sidepane.layout",
            width,
            width_ratio = self.state.width_ratio,
            "drag committed"
        );
        self.publish();
    }

    /// Flip between collapsed and expanded, starting the transition window.
    pub fn apply_collapse_intent(&mut self, now: Duration) {
        self.now = self.now.max(now);
        self.transition.reset();
        self.transition.try_enter(now);

        if self.state.collapsed {
            let width = self.bounds.clamp_settled(self.state.expanded_width);
            self.state.width = width;
            self.state.collapsed = false;
            self.state.expanded_width = width;
            self.state.width_ratio = width_ratio(width, self.container_width);
            self.storage.set_width(width);
            self.storage.set_collapsed(false);
            self.storage.set_width_ratio(self.state.width_ratio);
            debug!(target: "sidepane.layout", width, "panel expanded");
        } else {
            // A transient collapse-zone width is not worth restoring.
            let expanded = if self.state.width >= self.bounds.min_width {
                self.bounds.clamp_settled(self.state.width)
            } else {
                self.state.expanded_width
            };
            self.state = PanelLayoutState::collapsed(expanded, self.state.width_ratio);
            self.storage.set_width(0);
            self.storage.set_collapsed(true);
            self.storage.set_expanded_width(self.state.expanded_width);
            debug!(target: "sidepane.layout", expanded_width = expanded, "panel collapsed");
        }
        self.publish();
    }

    /// Expand if collapsed; returns whether anything changed.
    pub fn expand(&mut self, now: Duration) -> bool {
        if !self.state.collapsed {
            return false;
        }
        self.apply_collapse_intent(now);
        true
    }

    /// Collapse if expanded; returns whether anything changed.
    pub fn collapse(&mut self, now: Duration) -> bool {
        if self.state.collapsed {
            return false;
        }
        self.apply_collapse_intent(now);
        true
    }

    /// Rescale the width for a new container size.
    ///
    /// The container size is always recorded. The width only changes when
    /// expanded and neither dragging nor transitioning. Returns whether the
    /// width changed.
    pub fn on_container_resize(&mut self, container_width: u32, now: Duration) -> bool {
        self.now = self.now.max(now);
        self.container_width = container_width;
        if self.dragging || self.transition.is_active(now) {
            debug!(
                target: "sidepane.layout",
                container_width,
                dragging = self.dragging,
                "resize deferred to gesture"
            );
            self.publish();
            return false;
        }
        if self.state.collapsed || container_width == 0 {
            return false;
        }
        if self.state.width_ratio <= 0.0 {
            // Ratio unknown until the first measured container.
            self.state.width_ratio = width_ratio(self.state.width, container_width);
            self.storage.set_width_ratio(self.state.width_ratio);
            return false;
        }

        let width = self.bounds.rescale(container_width, self.state.width_ratio);
        if width == self.state.width {
            return false;
        }
        self.state.width = width;
        self.state.expanded_width = width;
        self.storage.set_width(width);
        debug!(target: "sidepane.layout", container_width, width, "width rescaled");
        self.publish();
        true
    }

    /// Advance host time, ending the transition once its window elapses.
    pub fn tick(&mut self, now: Duration) {
        self.now = self.now.max(now);
        self.publish();
    }

    /// Persist everything on unmount.
    pub fn teardown(&mut self) {
        self.dragging = false;
        self.storage.set_width(self.state.width);
        self.storage.set_collapsed(self.state.collapsed);
        if !self.state.collapsed {
            self.storage.set_expanded_width(self.state.expanded_width);
        }
        debug!(target: "sidepane.layout", width = self.state.width, "layout torn down");
    }

    /// Drag frames go out transient; everything else settles the view.
    fn publish(&self) {
        let view = PanelView {
            width: self.state.width,
            collapsed: self.state.collapsed,
            content_hidden: self.state.content_hidden(),
            animating: !self.dragging && self.transition.is_active(self.now),
        };
        if self.dragging {
            self.view.set_transient(view);
        } else {
            self.view.set(view);
        }
    }
}
