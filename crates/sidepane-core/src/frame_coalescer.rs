#![forbid(unsafe_code)]

//! Per-frame coalescing for high-frequency pointer samples.
//!
//! Pointer-move events can arrive far faster than the display refreshes.
//! Processing each one would re-run layout math and publish a new width many
//! times per frame. [`FrameCoalescer`] keeps at most one pending sample:
//!
//! - `push` replaces any pending sample (latest wins, nothing is queued),
//! - `take` hands the pending sample to the frame callback,
//! - `cancel` drops it, for example when the drag ends before the frame runs.
//!
//! Motion is therefore sampled, not integrated: a burst of moves between two
//! frames is observed as its final position only.
//!
//! # Usage
//!
//! ```
//! use sidepane_core::FrameCoalescer;
//!
//! let mut frames = FrameCoalescer::new();
//! assert!(frames.push(10).is_none());
//! assert_eq!(frames.push(20), Some(10)); // superseded
//! assert_eq!(frames.take(), Some(20));
//! assert!(frames.take().is_none());
//! ```

/// Holds at most one pending sample until the next animation frame.
///
/// # Thread Safety
///
/// Not thread-safe; owned by the single UI event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameCoalescer<T> {
    pending: Option<T>,
    superseded: u64,
}

impl<T> Default for FrameCoalescer<T> {
    fn default() -> Self {
        Self {
            pending: None,
            superseded: 0,
        }
    }
}

impl<T> FrameCoalescer<T> {
    /// Create an empty coalescer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `sample` for the next frame.
    ///
    /// Returns the sample it replaced, if one was still pending.
    pub fn push(&mut self, sample: T) -> Option<T> {
        let replaced = self.pending.replace(sample);
        if replaced.is_some() {
            self.superseded = self.superseded.saturating_add(1);
        }
        replaced
    }

    /// Take the pending sample for processing.
    pub fn take(&mut self) -> Option<T> {
        self.pending.take()
    }

    /// Drop the pending sample without processing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a sample is waiting for a frame.
    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of samples replaced before they were processed.
    #[must_use]
    pub const fn superseded_count(&self) -> u64 {
        self.superseded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_coalescer_has_no_pending() {
        let frames: FrameCoalescer<i32> = FrameCoalescer::new();
        assert!(!frames.has_pending());
        assert_eq!(frames.superseded_count(), 0);
    }

    #[test]
    fn latest_sample_wins() {
        let mut frames = FrameCoalescer::new();
        frames.push(1);
        frames.push(2);
        frames.push(3);
        assert_eq!(frames.take(), Some(3));
        assert_eq!(frames.superseded_count(), 2);
    }

    #[test]
    fn take_empties_the_slot() {
        let mut frames = FrameCoalescer::new();
        frames.push(5);
        assert_eq!(frames.take(), Some(5));
        assert!(!frames.has_pending());
        assert_eq!(frames.take(), None);
    }

    #[test]
    fn cancel_drops_pending_sample() {
        let mut frames = FrameCoalescer::new();
        frames.push(9);
        frames.cancel();
        assert_eq!(frames.take(), None);
        assert_eq!(frames.superseded_count(), 0);
    }
}
