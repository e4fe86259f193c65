#![forbid(unsafe_code)]

//! Splitter gesture state machine.
//!
//! [`SplitterGesture`] converts pointer input on the boundary between two
//! panels into [`SplitterIntent`]s. It owns no layout state: the caller feeds
//! it pointer positions and the current width and applies the intents it
//! returns.
//!
//! # Clamping
//!
//! The boundary follows the absolute cursor position (`raw = x`), not a delta.
//! With `upper = min(container - min_width, max_width)`:
//!
//! - inside the collapse zone (`raw <= threshold * collapse_zone_factor`) the
//!   candidate is `min(raw, upper)`, so the panel may shrink toward zero;
//! - outside it the candidate is `clamp(raw, min_width, upper)`.
//!
//! # Auto-collapse
//!
//! The first leftward sample at or below `auto_collapse_threshold` latches the
//! trigger, ends the session, and arms a deferred collapse. [`SplitterGesture::poll`]
//! emits it once the delay elapses. Rightward motion never triggers, even
//! below the threshold.
//!
//! # Invariants
//!
//! 1. At most one session is active; a second pointer-down is ignored.
//! 2. The deferred collapse fires at most once per session and never after
//!    [`SplitterGesture::teardown`].
//! 3. Every session that emitted intents ends with exactly one
//!    [`SplitterIntent::DragEnded`].
//! 4. Emitted widths never exceed `max_width`, and never fall below
//!    `min_width` outside the collapse zone.

use core::fmt;
use core::time::Duration;

use serde::{Deserialize, Serialize};
use sidepane_core::{Cooldown, FrameCoalescer, OneShot, PointerSample};

/// Default width of the collapse-zone band relative to the threshold.
pub const COLLAPSE_ZONE_FACTOR: f64 = 1.5;

/// Default delay between the auto-collapse trigger and the collapse intent.
pub const DEFAULT_COLLAPSE_DELAY: Duration = Duration::from_millis(100);

/// Default toggle re-entrancy window, matching the width transition.
pub const DEFAULT_TOGGLE_COOLDOWN: Duration = Duration::from_millis(300);

/// Construction-time gesture configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitterConfig {
    pub min_width: u32,
    pub max_width: u32,
    pub auto_collapse_threshold: u32,
    /// Collapse-zone band is `auto_collapse_threshold * collapse_zone_factor`.
    pub collapse_zone_factor: f64,
    pub collapse_delay: Duration,
    pub toggle_cooldown: Duration,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            min_width: 100,
            max_width: 800,
            auto_collapse_threshold: 50,
            collapse_zone_factor: COLLAPSE_ZONE_FACTOR,
            collapse_delay: DEFAULT_COLLAPSE_DELAY,
            toggle_cooldown: DEFAULT_TOGGLE_COOLDOWN,
        }
    }
}

impl SplitterConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), SplitterConfigError> {
        if self.min_width == 0 {
            return Err(SplitterConfigError::ZeroMinWidth);
        }
        if self.max_width < self.min_width {
            return Err(SplitterConfigError::MaxBelowMin {
                min_width: self.min_width,
                max_width: self.max_width,
            });
        }
        if !self.collapse_zone_factor.is_finite() || self.collapse_zone_factor < 1.0 {
            return Err(SplitterConfigError::InvalidZoneFactor {
                factor: self.collapse_zone_factor,
            });
        }
        Ok(())
    }

    /// Upper edge of the collapse-zone band in pixels.
    #[must_use]
    pub fn collapse_zone_edge(&self) -> f64 {
        f64::from(self.auto_collapse_threshold) * self.collapse_zone_factor
    }

    fn in_collapse_zone(&self, raw: u32) -> bool {
        f64::from(raw) <= self.collapse_zone_edge()
    }

    /// Candidate width for a cursor at `raw` inside `container_width`.
    #[must_use]
    pub fn candidate_width(&self, raw: u32, container_width: u32) -> u32 {
        let upper = container_width
            .saturating_sub(self.min_width)
            .min(self.max_width);
        if self.in_collapse_zone(raw) {
            raw.min(upper)
        } else {
            raw.min(upper).max(self.min_width)
        }
    }
}

/// Errors from [`SplitterConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplitterConfigError {
    ZeroMinWidth,
    MaxBelowMin { min_width: u32, max_width: u32 },
    InvalidZoneFactor { factor: f64 },
}

impl fmt::Display for SplitterConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMinWidth => write!(f, "min_width must be > 0"),
            Self::MaxBelowMin {
                min_width,
                max_width,
            } => write!(f, "max_width ({max_width}) must be >= min_width ({min_width})"),
            Self::InvalidZoneFactor { factor } => {
                write!(f, "collapse_zone_factor must be finite and >= 1.0, got {factor}")
            }
        }
    }
}

impl std::error::Error for SplitterConfigError {}

/// Which part of the splitter received the pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitterHit {
    /// The draggable boundary itself.
    Handle,
    /// The nested collapse/expand button; handled by its own click.
    ToggleButton,
}

/// Layout intent emitted by the gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitterIntent {
    /// Re-open a collapsed panel so it can be dragged from zero width.
    Expand,
    /// Transient width for the current frame.
    Width(u32),
    /// Hide the panel.
    Collapse,
    /// Flip collapsed state from the toggle button.
    ToggleCollapsed,
    /// The drag is over; the caller commits the current width.
    DragEnded,
}

/// Splitter hints for the render layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitterVisual {
    pub dragging: bool,
    pub hovering: bool,
    pub near_collapse: bool,
    pub collapsed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GestureSession {
    last_pointer_x: i32,
    in_collapse_zone: bool,
    collapse_triggered: bool,
}

/// Pointer-drag translator for a one-dimensional panel boundary.
#[derive(Debug, Clone)]
pub struct SplitterGesture {
    config: SplitterConfig,
    session: Option<GestureSession>,
    pending_collapse: OneShot,
    toggle_guard: Cooldown,
    frames: FrameCoalescer<PointerSample>,
    hovering: bool,
}

impl SplitterGesture {
    /// Construct a gesture after validating `config`.
    pub fn new(config: SplitterConfig) -> Result<Self, SplitterConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            session: None,
            pending_collapse: OneShot::new(),
            toggle_guard: Cooldown::new(config.toggle_cooldown),
            frames: FrameCoalescer::new(),
            hovering: false,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &SplitterConfig {
        &self.config
    }

    /// Whether a drag session is active.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Whether the pointer sits in the collapse-zone band, or a collapse is
    /// about to fire.
    #[must_use]
    pub fn is_near_collapse(&self) -> bool {
        self.pending_collapse.is_armed() || self.session.is_some_and(|s| s.in_collapse_zone)
    }

    /// Whether an auto-collapse is waiting for its delay.
    #[must_use]
    pub const fn has_pending_collapse(&self) -> bool {
        self.pending_collapse.is_armed()
    }

    /// Deadline of the pending auto-collapse, if any.
    #[must_use]
    pub const fn pending_collapse_deadline(&self) -> Option<Duration> {
        self.pending_collapse.deadline()
    }

    /// Whether a pointer-move sample is waiting for the next frame.
    #[must_use]
    pub const fn has_queued_move(&self) -> bool {
        self.frames.has_pending()
    }

    /// Number of pointer samples replaced before a frame consumed them.
    #[must_use]
    pub const fn superseded_moves(&self) -> u64 {
        self.frames.superseded_count()
    }

    pub fn set_hovering(&mut self, hovering: bool) {
        self.hovering = hovering;
    }

    /// Visual hints given the owner's current collapsed state.
    #[must_use]
    pub fn visual(&self, collapsed: bool) -> SplitterVisual {
        SplitterVisual {
            dragging: self.is_dragging(),
            hovering: self.hovering,
            near_collapse: self.is_near_collapse(),
            collapsed,
        }
    }

    /// Start a drag session.
    ///
    /// Emits [`SplitterIntent::Expand`] when the panel is collapsed. Ignored
    /// for toggle-button hits, while a session is active, and while an
    /// auto-collapse is pending.
    pub fn on_pointer_down(
        &mut self,
        x: i32,
        currently_collapsed: bool,
        hit: SplitterHit,
    ) -> Vec<SplitterIntent> {
        if hit == SplitterHit::ToggleButton
            || self.session.is_some()
            || self.pending_collapse.is_armed()
        {
            return Vec::new();
        }
        self.session = Some(GestureSession {
            last_pointer_x: x.max(0),
            in_collapse_zone: false,
            collapse_triggered: false,
        });
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "sidepane.layout", x, currently_collapsed, "splitter drag started");
        if currently_collapsed {
            vec![SplitterIntent::Expand]
        } else {
            Vec::new()
        }
    }

    /// Queue a pointer-move for the next animation frame.
    ///
    /// A newer sample replaces a pending one. Returns `false` when no session
    /// is active and the sample was dropped.
    pub fn queue_pointer_move(&mut self, x: i32, container_width: u32) -> bool {
        if self.session.is_none() {
            return false;
        }
        self.frames.push(PointerSample::new(x, container_width));
        true
    }

    /// Process the queued pointer-move, if any.
    pub fn on_animation_frame(&mut self, now: Duration) -> Option<SplitterIntent> {
        let sample = self.frames.take()?;
        self.on_pointer_move(sample.x, sample.container_width, now)
    }

    /// Process one pointer sample immediately.
    ///
    /// Returns the width intent, or `None` when no session is active or the
    /// sample armed the auto-collapse.
    pub fn on_pointer_move(
        &mut self,
        x: i32,
        container_width: u32,
        now: Duration,
    ) -> Option<SplitterIntent> {
        let config = self.config;
        let session = self.session.as_mut()?;
        let x = x.max(0);
        let raw = x.unsigned_abs();

        session.in_collapse_zone = config.in_collapse_zone(raw);

        if !session.collapse_triggered
            && raw <= config.auto_collapse_threshold
            && x < session.last_pointer_x
        {
            session.collapse_triggered = true;
            self.session = None;
            self.frames.cancel();
            self.pending_collapse.arm(now, config.collapse_delay);
            #[cfg(feature = "tracing")]
            tracing::debug!(target: "sidepane.layout", x, "auto-collapse armed");
            return None;
        }

        let width = config.candidate_width(raw, container_width);
        session.last_pointer_x = x;
        Some(SplitterIntent::Width(width))
    }

    /// Fire the deferred auto-collapse once its delay has elapsed.
    ///
    /// Yields `[Collapse, DragEnded]` exactly once per trigger.
    pub fn poll(&mut self, now: Duration) -> Vec<SplitterIntent> {
        if !self.pending_collapse.fire_if_due(now) {
            return Vec::new();
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "sidepane.layout", "auto-collapse fired");
        vec![SplitterIntent::Collapse, SplitterIntent::DragEnded]
    }

    /// End the session on pointer release.
    ///
    /// Releasing inside the collapse zone collapses immediately; a width
    /// below `min_width` snaps back to `min_width`. After an auto-collapse
    /// trigger the session is already over and nothing is emitted.
    pub fn on_pointer_up(&mut self, current_width: u32) -> Vec<SplitterIntent> {
        self.frames.cancel();
        let Some(session) = self.session.take() else {
            return Vec::new();
        };
        let mut intents = Vec::with_capacity(2);
        if session.in_collapse_zone && !session.collapse_triggered {
            intents.push(SplitterIntent::Collapse);
        } else if current_width < self.config.min_width {
            intents.push(SplitterIntent::Width(self.config.min_width));
        }
        intents.push(SplitterIntent::DragEnded);
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "sidepane.layout", current_width, ?intents, "splitter drag ended");
        intents
    }

    /// End the session after a host interruption (blur, lost capture).
    ///
    /// Same as a release outside the collapse zone: never collapses.
    pub fn cancel(&mut self, current_width: u32) -> Vec<SplitterIntent> {
        self.frames.cancel();
        if self.session.take().is_none() {
            return Vec::new();
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "sidepane.layout", current_width, "splitter drag cancelled");
        if current_width < self.config.min_width {
            vec![
                SplitterIntent::Width(self.config.min_width),
                SplitterIntent::DragEnded,
            ]
        } else {
            vec![SplitterIntent::DragEnded]
        }
    }

    /// Toggle-button activation, ignored while the cooldown window is open.
    pub fn on_toggle_click(&mut self, now: Duration) -> Option<SplitterIntent> {
        if self.toggle_guard.try_enter(now) {
            Some(SplitterIntent::ToggleCollapsed)
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!(target: "sidepane.layout", "toggle ignored during cooldown");
            None
        }
    }

    /// Drop the session, queued samples and the deferred collapse.
    pub fn teardown(&mut self) {
        self.session = None;
        self.frames.cancel();
        self.pending_collapse.cancel();
        self.toggle_guard.reset();
        self.hovering = false;
    }
}
