//! `geom_viewer`
//!
//! Viewer-side systems:
//! - Keyboard snapshots with newly-pressed detection
//! - Console-backed parameter overlay
//! - Per-frame recompute-then-draw of the closest-point scene

pub mod app;
pub mod input;
pub mod overlay;

pub use app::{ClosestPointApp, FrameReport};
