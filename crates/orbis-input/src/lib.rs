//! Pointer input normalized to device space.

pub mod pointer;

pub use pointer::{PointerTracker, VerticalMapping};
