#![forbid(unsafe_code)]

//! Deterministic pointer-capture adapter for the panel splitter.
//!
//! This module bridges browser pointer lifecycle signals into
//! [`SplitterGesture`] calls while enforcing:
//! - one active pointer at a time,
//! - explicit listener acquire/release commands for JS hosts (document-level
//!   `pointermove`/`pointerup` listeners or `setPointerCapture()`), released
//!   on every exit path including the auto-collapse early return, and
//! - cancellation on interruption paths (blur/visibility/lost-capture).
//!
//! Every dispatch carries a [`SplitterLogEntry`] describing what happened.

use std::time::Duration;

use sidepane_core::PointerButton;
use sidepane_layout::{
    SplitterConfig, SplitterConfigError, SplitterGesture, SplitterHit, SplitterIntent,
    SplitterVisual,
};

/// Adapter configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitterCaptureConfig {
    pub gesture: SplitterConfig,
    /// Button required to begin a drag.
    pub activation_button: PointerButton,
    /// If true, pointer leave cancels a drag whose capture was requested but
    /// never acknowledged.
    pub cancel_on_leave_without_capture: bool,
}

impl Default for SplitterCaptureConfig {
    fn default() -> Self {
        Self {
            gesture: SplitterConfig::default(),
            activation_button: PointerButton::Primary,
            cancel_on_leave_without_capture: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureState {
    Requested,
    Acquired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActivePointer {
    pointer_id: u32,
    button: PointerButton,
    capture_state: CaptureState,
}

/// Host command for global listener / pointer-capture control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitterCaptureCommand {
    Acquire { pointer_id: u32 },
    Release { pointer_id: u32 },
}

/// Lifecycle phase recorded for one adapter dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitterLifecyclePhase {
    PointerDown,
    PointerMove,
    AnimationFrame,
    PointerUp,
    PointerCancel,
    PointerLeave,
    Blur,
    VisibilityHidden,
    LostPointerCapture,
    CaptureAcquired,
    ToggleClick,
    Timer,
    Teardown,
}

/// Reason an incoming lifecycle signal was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitterIgnoredReason {
    InvalidPointerId,
    ButtonNotAllowed,
    ButtonMismatch,
    ToggleButtonHit,
    ActivePointerAlreadyInProgress,
    CollapsePending,
    NoActivePointer,
    PointerMismatch,
    LeaveWhileCaptured,
    NoQueuedMove,
    ToggleCoolingDown,
    NothingDue,
}

/// Outcome category for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitterLogOutcome {
    /// The gesture ran and its intents (possibly none) are attached.
    GestureApplied,
    /// A pointer-move was parked for the next animation frame.
    MoveQueued,
    CaptureStateUpdated,
    Ignored(SplitterIgnoredReason),
}

/// Structured log record for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitterLogEntry {
    pub phase: SplitterLifecyclePhase,
    pub sequence: Option<u64>,
    pub pointer_id: Option<u32>,
    pub x: Option<i32>,
    pub capture_command: Option<SplitterCaptureCommand>,
    pub outcome: SplitterLogOutcome,
}

/// Result of one lifecycle dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitterDispatch {
    pub intents: Vec<SplitterIntent>,
    pub capture_command: Option<SplitterCaptureCommand>,
    pub log: SplitterLogEntry,
}

impl SplitterDispatch {
    fn ignored(
        phase: SplitterLifecyclePhase,
        reason: SplitterIgnoredReason,
        pointer_id: Option<u32>,
        x: Option<i32>,
    ) -> Self {
        Self {
            intents: Vec::new(),
            capture_command: None,
            log: SplitterLogEntry {
                phase,
                sequence: None,
                pointer_id,
                x,
                capture_command: None,
                outcome: SplitterLogOutcome::Ignored(reason),
            },
        }
    }

    /// Whether the dispatch was dropped.
    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        matches!(self.log.outcome, SplitterLogOutcome::Ignored(_))
    }
}

/// Pointer lifecycle adapter wrapping a [`SplitterGesture`].
#[derive(Debug, Clone)]
pub struct SplitterCaptureAdapter {
    gesture: SplitterGesture,
    config: SplitterCaptureConfig,
    active: Option<ActivePointer>,
    next_sequence: u64,
}

impl SplitterCaptureAdapter {
    /// Construct an adapter with a validated gesture configuration.
    pub fn new(config: SplitterCaptureConfig) -> Result<Self, SplitterConfigError> {
        let gesture = SplitterGesture::new(config.gesture)?;
        Ok(Self {
            gesture,
            config,
            active: None,
            next_sequence: 1,
        })
    }

    #[must_use]
    pub const fn config(&self) -> SplitterCaptureConfig {
        self.config
    }

    /// Active pointer ID, if any.
    #[must_use]
    pub fn active_pointer_id(&self) -> Option<u32> {
        self.active.map(|active| active.pointer_id)
    }

    #[must_use]
    pub const fn gesture(&self) -> &SplitterGesture {
        &self.gesture
    }

    /// Visual hints for the splitter.
    #[must_use]
    pub fn visual(&self, collapsed: bool) -> SplitterVisual {
        self.gesture.visual(collapsed)
    }

    pub fn set_hovering(&mut self, hovering: bool) {
        self.gesture.set_hovering(hovering);
    }

    /// Handle pointer-down on the splitter.
    pub fn pointer_down(
        &mut self,
        pointer_id: u32,
        button: PointerButton,
        hit: SplitterHit,
        x: i32,
        currently_collapsed: bool,
    ) -> SplitterDispatch {
        let phase = SplitterLifecyclePhase::PointerDown;
        if pointer_id == 0 {
            return SplitterDispatch::ignored(
                phase,
                SplitterIgnoredReason::InvalidPointerId,
                Some(pointer_id),
                Some(x),
            );
        }
        if hit == SplitterHit::ToggleButton {
            return SplitterDispatch::ignored(
                phase,
                SplitterIgnoredReason::ToggleButtonHit,
                Some(pointer_id),
                Some(x),
            );
        }
        if button != self.config.activation_button {
            return SplitterDispatch::ignored(
                phase,
                SplitterIgnoredReason::ButtonNotAllowed,
                Some(pointer_id),
                Some(x),
            );
        }
        if self.active.is_some() {
            return SplitterDispatch::ignored(
                phase,
                SplitterIgnoredReason::ActivePointerAlreadyInProgress,
                Some(pointer_id),
                Some(x),
            );
        }
        if self.gesture.has_pending_collapse() {
            return SplitterDispatch::ignored(
                phase,
                SplitterIgnoredReason::CollapsePending,
                Some(pointer_id),
                Some(x),
            );
        }

        let intents = self.gesture.on_pointer_down(x, currently_collapsed, hit);
        self.active = Some(ActivePointer {
            pointer_id,
            button,
            capture_state: CaptureState::Requested,
        });
        self.applied(
            phase,
            Some(pointer_id),
            Some(x),
            intents,
            Some(SplitterCaptureCommand::Acquire { pointer_id }),
        )
    }

    /// Mark listener / pointer capture as acquired by the host.
    pub fn capture_acquired(&mut self, pointer_id: u32) -> SplitterDispatch {
        let phase = SplitterLifecyclePhase::CaptureAcquired;
        let Some(mut active) = self.active else {
            return SplitterDispatch::ignored(
                phase,
                SplitterIgnoredReason::NoActivePointer,
                Some(pointer_id),
                None,
            );
        };
        if active.pointer_id != pointer_id {
            return SplitterDispatch::ignored(
                phase,
                SplitterIgnoredReason::PointerMismatch,
                Some(pointer_id),
                None,
            );
        }
        active.capture_state = CaptureState::Acquired;
        self.active = Some(active);
        let entry = SplitterLogEntry {
            phase,
            sequence: None,
            pointer_id: Some(pointer_id),
            x: None,
            capture_command: None,
            outcome: SplitterLogOutcome::CaptureStateUpdated,
        };
        trace_entry(&entry);
        SplitterDispatch {
            intents: Vec::new(),
            capture_command: None,
            log: entry,
        }
    }

    /// Queue a pointer-move for the next animation frame.
    pub fn pointer_move(&mut self, pointer_id: u32, x: i32, container_width: u32) -> SplitterDispatch {
        let phase = SplitterLifecyclePhase::PointerMove;
        let Some(active) = self.active else {
            return SplitterDispatch::ignored(
                phase,
                SplitterIgnoredReason::NoActivePointer,
                Some(pointer_id),
                Some(x),
            );
        };
        if active.pointer_id != pointer_id {
            return SplitterDispatch::ignored(
                phase,
                SplitterIgnoredReason::PointerMismatch,
                Some(pointer_id),
                Some(x),
            );
        }
        self.gesture.queue_pointer_move(x, container_width);
        let entry = SplitterLogEntry {
            phase,
            sequence: Some(self.next_sequence()),
            pointer_id: Some(pointer_id),
            x: Some(x),
            capture_command: None,
            outcome: SplitterLogOutcome::MoveQueued,
        };
        trace_entry(&entry);
        SplitterDispatch {
            intents: Vec::new(),
            capture_command: None,
            log: entry,
        }
    }

    /// Run the display-refresh callback: process the latest queued move.
    ///
    /// Releases listeners when the move armed the auto-collapse.
    pub fn animation_frame(&mut self, now: Duration) -> SplitterDispatch {
        let phase = SplitterLifecyclePhase::AnimationFrame;
        if !self.gesture.has_queued_move() {
            return SplitterDispatch::ignored(
                phase,
                SplitterIgnoredReason::NoQueuedMove,
                self.active_pointer_id(),
                None,
            );
        }
        let pointer_id = self.active_pointer_id();
        let intents: Vec<SplitterIntent> = self.gesture.on_animation_frame(now).into_iter().collect();
        let command = self.release_if_gesture_ended();
        self.applied(phase, pointer_id, None, intents, command)
    }

    /// Fire the deferred auto-collapse if it is due.
    pub fn poll(&mut self, now: Duration) -> SplitterDispatch {
        let intents = self.gesture.poll(now);
        if intents.is_empty() {
            return SplitterDispatch::ignored(
                SplitterLifecyclePhase::Timer,
                SplitterIgnoredReason::NothingDue,
                None,
                None,
            );
        }
        self.applied(SplitterLifecyclePhase::Timer, None, None, intents, None)
    }

    /// Handle pointer-up and release listeners for the active pointer.
    pub fn pointer_up(
        &mut self,
        pointer_id: u32,
        button: PointerButton,
        current_width: u32,
    ) -> SplitterDispatch {
        let phase = SplitterLifecyclePhase::PointerUp;
        let Some(active) = self.active else {
            return SplitterDispatch::ignored(
                phase,
                SplitterIgnoredReason::NoActivePointer,
                Some(pointer_id),
                None,
            );
        };
        if active.pointer_id != pointer_id {
            return SplitterDispatch::ignored(
                phase,
                SplitterIgnoredReason::PointerMismatch,
                Some(pointer_id),
                None,
            );
        }
        if active.button != button {
            return SplitterDispatch::ignored(
                phase,
                SplitterIgnoredReason::ButtonMismatch,
                Some(pointer_id),
                None,
            );
        }
        let intents = self.gesture.on_pointer_up(current_width);
        self.active = None;
        self.applied(
            phase,
            Some(pointer_id),
            None,
            intents,
            Some(SplitterCaptureCommand::Release { pointer_id }),
        )
    }

    /// Handle browser pointer-cancel events.
    pub fn pointer_cancel(&mut self, pointer_id: Option<u32>, current_width: u32) -> SplitterDispatch {
        self.cancel_active(SplitterLifecyclePhase::PointerCancel, pointer_id, current_width)
    }

    /// Handle pointer-leave; only cancels while capture is unacknowledged.
    pub fn pointer_leave(&mut self, pointer_id: u32, current_width: u32) -> SplitterDispatch {
        let phase = SplitterLifecyclePhase::PointerLeave;
        let Some(active) = self.active else {
            return SplitterDispatch::ignored(
                phase,
                SplitterIgnoredReason::NoActivePointer,
                Some(pointer_id),
                None,
            );
        };
        if active.pointer_id != pointer_id {
            return SplitterDispatch::ignored(
                phase,
                SplitterIgnoredReason::PointerMismatch,
                Some(pointer_id),
                None,
            );
        }
        if active.capture_state == CaptureState::Requested
            && self.config.cancel_on_leave_without_capture
        {
            self.cancel_active(phase, Some(pointer_id), current_width)
        } else {
            SplitterDispatch::ignored(
                phase,
                SplitterIgnoredReason::LeaveWhileCaptured,
                Some(pointer_id),
                None,
            )
        }
    }

    /// Handle window blur.
    pub fn blur(&mut self, current_width: u32) -> SplitterDispatch {
        self.cancel_active(SplitterLifecyclePhase::Blur, None, current_width)
    }

    /// Handle visibility-hidden interruptions.
    pub fn visibility_hidden(&mut self, current_width: u32) -> SplitterDispatch {
        self.cancel_active(SplitterLifecyclePhase::VisibilityHidden, None, current_width)
    }

    /// Handle `lostpointercapture`.
    pub fn lost_pointer_capture(&mut self, pointer_id: u32, current_width: u32) -> SplitterDispatch {
        self.cancel_active(
            SplitterLifecyclePhase::LostPointerCapture,
            Some(pointer_id),
            current_width,
        )
    }

    /// Handle a click on the collapse/expand button.
    pub fn toggle_click(&mut self, now: Duration) -> SplitterDispatch {
        let phase = SplitterLifecyclePhase::ToggleClick;
        match self.gesture.on_toggle_click(now) {
            Some(intent) => self.applied(phase, None, None, vec![intent], None),
            None => SplitterDispatch::ignored(
                phase,
                SplitterIgnoredReason::ToggleCoolingDown,
                None,
                None,
            ),
        }
    }

    /// Tear down on unmount: cancel timers and release any held listeners.
    ///
    /// Emits no intents; the owner persists its own state.
    pub fn teardown(&mut self) -> SplitterDispatch {
        self.gesture.teardown();
        let pointer_id = self.active_pointer_id();
        let command = self
            .active
            .take()
            .map(|active| SplitterCaptureCommand::Release {
                pointer_id: active.pointer_id,
            });
        self.applied(
            SplitterLifecyclePhase::Teardown,
            pointer_id,
            None,
            Vec::new(),
            command,
        )
    }

    fn cancel_active(
        &mut self,
        phase: SplitterLifecyclePhase,
        pointer_id: Option<u32>,
        current_width: u32,
    ) -> SplitterDispatch {
        let Some(active) = self.active else {
            return SplitterDispatch::ignored(
                phase,
                SplitterIgnoredReason::NoActivePointer,
                pointer_id,
                None,
            );
        };
        if let Some(id) = pointer_id
            && id != active.pointer_id
        {
            return SplitterDispatch::ignored(
                phase,
                SplitterIgnoredReason::PointerMismatch,
                Some(id),
                None,
            );
        }
        let intents = self.gesture.cancel(current_width);
        self.active = None;
        self.applied(
            phase,
            Some(active.pointer_id),
            None,
            intents,
            Some(SplitterCaptureCommand::Release {
                pointer_id: active.pointer_id,
            }),
        )
    }

    /// The gesture ends its own session when the auto-collapse arms; the
    /// listeners go with it.
    fn release_if_gesture_ended(&mut self) -> Option<SplitterCaptureCommand> {
        if self.gesture.is_dragging() {
            return None;
        }
        self.active
            .take()
            .map(|active| SplitterCaptureCommand::Release {
                pointer_id: active.pointer_id,
            })
    }

    fn applied(
        &mut self,
        phase: SplitterLifecyclePhase,
        pointer_id: Option<u32>,
        x: Option<i32>,
        intents: Vec<SplitterIntent>,
        capture_command: Option<SplitterCaptureCommand>,
    ) -> SplitterDispatch {
        let entry = SplitterLogEntry {
            phase,
            sequence: Some(self.next_sequence()),
            pointer_id,
            x,
            capture_command,
            outcome: SplitterLogOutcome::GestureApplied,
        };
        trace_entry(&entry);
        SplitterDispatch {
            intents,
            capture_command,
            log: entry,
        }
    }

    fn next_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.saturating_add(1);
        sequence
    }
}

#[cfg(feature = "tracing")]
fn trace_entry(entry: &SplitterLogEntry) {
    tracing::debug!(
        target: "sidepane.web",
        phase = ?entry.phase,
        sequence = entry.sequence,
        pointer_id = entry.pointer_id,
        command = ?entry.capture_command,
        outcome = ?entry.outcome,
        "splitter dispatch"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_entry(_entry: &SplitterLogEntry) {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn adapter() -> SplitterCaptureAdapter {
        SplitterCaptureAdapter::new(SplitterCaptureConfig::default())
            .expect("default config should be valid")
    }

    #[test]
    fn pointer_down_requests_listeners() {
        let mut adapter = adapter();
        let dispatch = adapter.pointer_down(11, PointerButton::Primary, SplitterHit::Handle, 300, false);
        assert_eq!(
            dispatch.capture_command,
            Some(SplitterCaptureCommand::Acquire { pointer_id: 11 })
        );
        assert_eq!(adapter.active_pointer_id(), Some(11));
        assert!(adapter.gesture().is_dragging());
        assert_eq!(dispatch.log.sequence, Some(1));
    }

    #[test]
    fn pointer_down_on_collapsed_panel_forwards_expand() {
        let mut adapter = adapter();
        let dispatch = adapter.pointer_down(1, PointerButton::Primary, SplitterHit::Handle, 0, true);
        assert_eq!(dispatch.intents, vec![SplitterIntent::Expand]);
    }

    #[test]
    fn non_activation_button_is_ignored() {
        let mut adapter = adapter();
        let dispatch = adapter.pointer_down(3, PointerButton::Secondary, SplitterHit::Handle, 5, false);
        assert_eq!(dispatch.intents, Vec::new());
        assert_eq!(dispatch.capture_command, None);
        assert_eq!(adapter.active_pointer_id(), None);
        assert_eq!(
            dispatch.log.outcome,
            SplitterLogOutcome::Ignored(SplitterIgnoredReason::ButtonNotAllowed)
        );
    }

    #[test]
    fn toggle_button_hit_never_starts_drag() {
        let mut adapter = adapter();
        let dispatch =
            adapter.pointer_down(4, PointerButton::Primary, SplitterHit::ToggleButton, 300, false);
        assert_eq!(
            dispatch.log.outcome,
            SplitterLogOutcome::Ignored(SplitterIgnoredReason::ToggleButtonHit)
        );
        assert!(!adapter.gesture().is_dragging());
    }

    #[test]
    fn second_pointer_is_rejected() {
        let mut adapter = adapter();
        adapter.pointer_down(1, PointerButton::Primary, SplitterHit::Handle, 300, false);
        let dispatch = adapter.pointer_down(2, PointerButton::Primary, SplitterHit::Handle, 100, false);
        assert_eq!(
            dispatch.log.outcome,
            SplitterLogOutcome::Ignored(SplitterIgnoredReason::ActivePointerAlreadyInProgress)
        );
        assert_eq!(adapter.active_pointer_id(), Some(1));
    }

    #[test]
    fn moves_coalesce_until_frame() {
        let mut adapter = adapter();
        adapter.pointer_down(1, PointerButton::Primary, SplitterHit::Handle, 300, false);
        for x in [310, 320, 330] {
            let dispatch = adapter.pointer_move(1, x, 1000);
            assert_eq!(dispatch.log.outcome, SplitterLogOutcome::MoveQueued);
            assert_eq!(dispatch.intents, Vec::new());
        }
        let frame = adapter.animation_frame(ms(16));
        assert_eq!(frame.intents, vec![SplitterIntent::Width(330)]);
        let idle = adapter.animation_frame(ms(32));
        assert_eq!(
            idle.log.outcome,
            SplitterLogOutcome::Ignored(SplitterIgnoredReason::NoQueuedMove)
        );
    }

    #[test]
    fn pointer_move_mismatch_is_ignored() {
        let mut adapter = adapter();
        adapter.pointer_down(9, PointerButton::Primary, SplitterHit::Handle, 300, false);
        let dispatch = adapter.pointer_move(77, 250, 1000);
        assert_eq!(
            dispatch.log.outcome,
            SplitterLogOutcome::Ignored(SplitterIgnoredReason::PointerMismatch)
        );
        assert!(!adapter.gesture().has_queued_move());
    }

    #[test]
    fn pointer_up_releases_listeners() {
        let mut adapter = adapter();
        adapter.pointer_down(9, PointerButton::Primary, SplitterHit::Handle, 300, false);
        let ack = adapter.capture_acquired(9);
        assert_eq!(ack.log.outcome, SplitterLogOutcome::CaptureStateUpdated);
        let dispatch = adapter.pointer_up(9, PointerButton::Primary, 300);
        assert_eq!(
            dispatch.capture_command,
            Some(SplitterCaptureCommand::Release { pointer_id: 9 })
        );
        assert_eq!(dispatch.intents, vec![SplitterIntent::DragEnded]);
        assert_eq!(adapter.active_pointer_id(), None);
    }

    #[test]
    fn pointer_up_button_mismatch_keeps_session() {
        let mut adapter = adapter();
        adapter.pointer_down(9, PointerButton::Primary, SplitterHit::Handle, 300, false);
        let dispatch = adapter.pointer_up(9, PointerButton::Middle, 300);
        assert_eq!(
            dispatch.log.outcome,
            SplitterLogOutcome::Ignored(SplitterIgnoredReason::ButtonMismatch)
        );
        assert_eq!(adapter.active_pointer_id(), Some(9));
    }

    #[test]
    fn auto_collapse_releases_listeners_early() {
        let mut adapter = adapter();
        adapter.pointer_down(5, PointerButton::Primary, SplitterHit::Handle, 300, false);
        adapter.pointer_move(5, 30, 1000);
        let frame = adapter.animation_frame(ms(16));
        assert_eq!(frame.intents, Vec::new());
        assert_eq!(
            frame.capture_command,
            Some(SplitterCaptureCommand::Release { pointer_id: 5 })
        );
        assert_eq!(adapter.active_pointer_id(), None);

        let late_up = adapter.pointer_up(5, PointerButton::Primary, 300);
        assert!(late_up.is_ignored());

        assert!(adapter.poll(ms(100)).is_ignored());
        let fired = adapter.poll(ms(116));
        assert_eq!(
            fired.intents,
            vec![SplitterIntent::Collapse, SplitterIntent::DragEnded]
        );
    }

    #[test]
    fn blur_cancels_without_collapsing() {
        let mut adapter = adapter();
        adapter.pointer_down(5, PointerButton::Primary, SplitterHit::Handle, 300, false);
        adapter.pointer_move(5, 70, 1000);
        adapter.animation_frame(ms(16));
        let dispatch = adapter.blur(70);
        assert_eq!(
            dispatch.intents,
            vec![SplitterIntent::Width(100), SplitterIntent::DragEnded]
        );
        assert_eq!(
            dispatch.capture_command,
            Some(SplitterCaptureCommand::Release { pointer_id: 5 })
        );
    }

    #[test]
    fn leave_only_cancels_without_capture() {
        let mut adapter = adapter();
        adapter.pointer_down(5, PointerButton::Primary, SplitterHit::Handle, 300, false);
        adapter.capture_acquired(5);
        let captured = adapter.pointer_leave(5, 300);
        assert_eq!(
            captured.log.outcome,
            SplitterLogOutcome::Ignored(SplitterIgnoredReason::LeaveWhileCaptured)
        );

        let mut adapter = self::adapter();
        adapter.pointer_down(6, PointerButton::Primary, SplitterHit::Handle, 300, false);
        let uncaptured = adapter.pointer_leave(6, 300);
        assert_eq!(uncaptured.intents, vec![SplitterIntent::DragEnded]);
        assert_eq!(adapter.active_pointer_id(), None);
    }

    #[test]
    fn lost_capture_and_visibility_release() {
        let mut adapter = adapter();
        adapter.pointer_down(5, PointerButton::Primary, SplitterHit::Handle, 300, false);
        let lost = adapter.lost_pointer_capture(5, 300);
        assert_eq!(
            lost.capture_command,
            Some(SplitterCaptureCommand::Release { pointer_id: 5 })
        );

        adapter.pointer_down(6, PointerButton::Primary, SplitterHit::Handle, 300, false);
        let hidden = adapter.visibility_hidden(300);
        assert_eq!(hidden.log.phase, SplitterLifecyclePhase::VisibilityHidden);
        assert_eq!(adapter.active_pointer_id(), None);
    }

    #[test]
    fn teardown_releases_and_cancels_timer() {
        let mut adapter = adapter();
        adapter.pointer_down(5, PointerButton::Primary, SplitterHit::Handle, 300, false);
        let dispatch = adapter.teardown();
        assert_eq!(
            dispatch.capture_command,
            Some(SplitterCaptureCommand::Release { pointer_id: 5 })
        );

        adapter.pointer_down(6, PointerButton::Primary, SplitterHit::Handle, 300, false);
        adapter.pointer_move(6, 20, 1000);
        adapter.animation_frame(ms(0));
        adapter.teardown();
        assert!(adapter.poll(ms(1_000)).is_ignored());
    }

    #[test]
    fn toggle_click_cooldown_is_logged() {
        let mut adapter = adapter();
        let first = adapter.toggle_click(ms(0));
        assert_eq!(first.intents, vec![SplitterIntent::ToggleCollapsed]);
        let second = adapter.toggle_click(ms(10));
        assert_eq!(
            second.log.outcome,
            SplitterLogOutcome::Ignored(SplitterIgnoredReason::ToggleCoolingDown)
        );
    }
}
