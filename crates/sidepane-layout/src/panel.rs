#![forbid(unsafe_code)]

//! Panel layout state and width geometry.
//!
//! [`PanelLayoutState`] is the authoritative, persisted description of the
//! primary (left) panel in a two-pane workspace. [`LayoutBounds`] holds the
//! owner-supplied width limits and the arithmetic shared by the gesture and
//! the controller: clamping, default synthesis, and proportional rescale.
//!
//! # Invariants
//!
//! 1. `collapsed == true` if and only if `width == 0`.
//! 2. `expanded_width > 0`.
//! 3. When expanded and settled, `min_width <= width <= max_width`.
//! 4. `width_ratio` lies in `[0, 1]`.
//!
//! Transient drag frames may violate (3) while the pointer is inside the
//! collapse zone; [`PanelLayoutState::check`] is meant to run after commits.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default lower width bound in pixels.
pub const DEFAULT_MIN_WIDTH: u32 = 100;

/// Default upper width bound in pixels.
pub const DEFAULT_MAX_WIDTH: u32 = 800;

/// Fraction of the container used when no width was ever stored.
pub const DEFAULT_WIDTH_FRACTION: f64 = 0.3;

/// Largest fraction of the container the panel may occupy after a resize.
pub const DEFAULT_MAX_WIDTH_FRACTION: f64 = 0.7;

/// Owner-supplied width limits for the primary panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutBounds {
    pub min_width: u32,
    pub max_width: u32,
    /// Upper bound as a fraction of the container, applied on rescale.
    pub max_width_fraction: f64,
}

impl Default for LayoutBounds {
    fn default() -> Self {
        Self {
            min_width: DEFAULT_MIN_WIDTH,
            max_width: DEFAULT_MAX_WIDTH,
            max_width_fraction: DEFAULT_MAX_WIDTH_FRACTION,
        }
    }
}

impl LayoutBounds {
    #[must_use]
    pub const fn new(min_width: u32, max_width: u32) -> Self {
        Self {
            min_width,
            max_width,
            max_width_fraction: DEFAULT_MAX_WIDTH_FRACTION,
        }
    }

    /// Clamp a settled (non-zero) width into `[min_width, max_width]`.
    #[must_use]
    pub fn clamp_settled(&self, width: u32) -> u32 {
        width.max(self.min_width).min(self.max_width.max(self.min_width))
    }

    /// Largest width allowed inside a container of `container_width`.
    ///
    /// Never smaller than `min_width`, so a tiny container cannot invert the
    /// clamp range.
    #[must_use]
    pub fn effective_max(&self, container_width: u32) -> u32 {
        let fraction_cap = round_px((f64::from(container_width) * self.max_width_fraction).floor());
        self.max_width.min(fraction_cap).max(self.min_width)
    }

    /// Width synthesized from a container fraction, clamped into bounds.
    #[must_use]
    pub fn default_width(&self, container_width: u32, fraction: f64) -> u32 {
        self.clamp_settled(round_px(f64::from(container_width) * fraction))
    }

    /// Proportional width for a resized container.
    ///
    /// `clamp(round(container * ratio), min_width, effective_max(container))`.
    #[must_use]
    pub fn rescale(&self, container_width: u32, ratio: f64) -> u32 {
        let scaled = round_px(f64::from(container_width) * ratio);
        scaled
            .max(self.min_width)
            .min(self.effective_max(container_width))
    }
}

/// Authoritative primary-panel state, persisted across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelLayoutState {
    /// Current width in pixels; `0` while collapsed.
    pub width: u32,
    pub collapsed: bool,
    /// Last settled width while expanded; restored on un-collapse.
    pub expanded_width: u32,
    /// `width / container_width` at the last deliberate width change.
    pub width_ratio: f64,
}

impl PanelLayoutState {
    /// Expanded state at `width` inside `container_width`.
    #[must_use]
    pub fn expanded(width: u32, container_width: u32) -> Self {
        Self {
            width,
            collapsed: false,
            expanded_width: width.max(1),
            width_ratio: width_ratio(width, container_width),
        }
    }

    /// Collapsed state remembering `expanded_width` for the next expand.
    #[must_use]
    pub fn collapsed(expanded_width: u32, width_ratio: f64) -> Self {
        Self {
            width: 0,
            collapsed: true,
            expanded_width: expanded_width.max(1),
            width_ratio: sanitize_ratio(width_ratio),
        }
    }

    /// Whether the render layer should drop the panel content entirely.
    #[must_use]
    pub const fn content_hidden(&self) -> bool {
        self.width == 0
    }

    /// Check the settled-state invariants against `bounds`.
    ///
    /// Returns an empty list when the state is consistent.
    #[must_use]
    pub fn check(&self, bounds: &LayoutBounds) -> Vec<LayoutInvariant> {
        let mut violations = Vec::new();
        if self.collapsed != (self.width == 0) {
            violations.push(LayoutInvariant::CollapsedWidthMismatch {
                collapsed: self.collapsed,
                width: self.width,
            });
        }
        if self.expanded_width == 0 {
            violations.push(LayoutInvariant::ZeroExpandedWidth);
        }
        if !self.collapsed
            && (self.width < bounds.min_width || self.width > bounds.max_width.max(bounds.min_width))
        {
            violations.push(LayoutInvariant::WidthOutOfBounds {
                width: self.width,
                min_width: bounds.min_width,
                max_width: bounds.max_width,
            });
        }
        if !(0.0..=1.0).contains(&self.width_ratio) {
            violations.push(LayoutInvariant::RatioOutOfRange {
                ratio: self.width_ratio,
            });
        }
        violations
    }
}

/// One violated [`PanelLayoutState`] invariant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutInvariant {
    CollapsedWidthMismatch { collapsed: bool, width: u32 },
    ZeroExpandedWidth,
    WidthOutOfBounds { width: u32, min_width: u32, max_width: u32 },
    RatioOutOfRange { ratio: f64 },
}

impl fmt::Display for LayoutInvariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CollapsedWidthMismatch { collapsed, width } => {
                write!(f, "collapsed={collapsed} disagrees with width={width}")
            }
            Self::ZeroExpandedWidth => write!(f, "expanded width must be > 0"),
            Self::WidthOutOfBounds {
                width,
                min_width,
                max_width,
            } => write!(f, "width {width} outside [{min_width}, {max_width}]"),
            Self::RatioOutOfRange { ratio } => write!(f, "width ratio {ratio} outside [0, 1]"),
        }
    }
}

/// `width / container_width`, clamped into `[0, 1]`; `0` for an empty container.
#[must_use]
pub fn width_ratio(width: u32, container_width: u32) -> f64 {
    if container_width == 0 {
        return 0.0;
    }
    sanitize_ratio(f64::from(width) / f64::from(container_width))
}

fn sanitize_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Round a pixel quantity to the nearest non-negative integer.
///
/// Float-to-int `as` casts saturate, so NaN maps to 0 and overflow to `u32::MAX`.
#[must_use]
pub fn round_px(value: f64) -> u32 {
    value.round() as u32
}
