#![forbid(unsafe_code)]

//! Core: host-driven time, deferred timers, and pointer-move coalescing.
//!
//! # Role in sidepane
//! `sidepane-core` is the input/time layer. Nothing here performs I/O or owns
//! a thread: the embedding host advances a monotonic clock and pushes pointer
//! samples, and the layout and runtime crates consume the results.
//!
//! # Primary responsibilities
//! - **DeterministicClock**: monotonic time advanced explicitly by the host.
//! - **OneShot / Cooldown**: deferred callbacks and re-entrancy guards expressed
//!   as explicit state with deadlines instead of timer handles.
//! - **FrameCoalescer**: one pending pointer sample per animation frame.
//! - **Pointer primitives**: buttons and ids shared by the gesture and web
//!   adapters.

pub mod clock;
pub mod frame_coalescer;
pub mod pointer;
pub mod timer;

pub use clock::DeterministicClock;
pub use frame_coalescer::FrameCoalescer;
pub use pointer::{PointerButton, PointerSample};
pub use timer::{Cooldown, OneShot};
