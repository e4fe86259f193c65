#![forbid(unsafe_code)]

//! Pointer primitives shared by gesture and host adapters.

/// Pointer button reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// One pointer-move sample along the splitter axis.
///
/// `x` is relative to the container's leading edge and may be negative or
/// exceed the container when the pointer leaves it mid-drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerSample {
    pub x: i32,
    pub container_width: u32,
}

impl PointerSample {
    #[must_use]
    pub const fn new(x: i32, container_width: u32) -> Self {
        Self { x, container_width }
    }

    /// Position clamped into `[0, container_width]`.
    #[must_use]
    pub fn clamped_x(self) -> u32 {
        u32::try_from(self.x.max(0))
            .unwrap_or(0)
            .min(self.container_width)
    }
}
