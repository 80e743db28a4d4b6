//! Rendering abstraction.
//!
//! This crate intentionally does not depend on a graphics backend.
//! Everything is drawn as integer screen-space line segments through
//! [`RenderBackend`]; a host window would implement it.

use serde::{Deserialize, Serialize};

/// Packed `0xRRGGBBAA` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Self = Self(0xFFFF_FFFF);
    pub const BLACK: Self = Self(0x0000_00FF);
    pub const RED: Self = Self(0xFF00_00FF);
    pub const GRID: Self = Self(0xAAAA_AAFF);
}

/// A single line draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub color: Color,
}

/// A minimal rendering API.
pub trait RenderBackend {
    fn begin_frame(&mut self);
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color);
    fn end_frame(&mut self);
}

/// A no-op renderer useful for headless runs.
#[derive(Default)]
pub struct NullRenderer;

impl RenderBackend for NullRenderer {
    fn begin_frame(&mut self) {}
    fn draw_line(&mut self, _x1: i32, _y1: i32, _x2: i32, _y2: i32, _color: Color) {}
    fn end_frame(&mut self) {}
}

/// Draw calls of one finished frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub index: u64,
    pub lines: Vec<Line>,
}

/// Keeps the draw calls of the last finished frame.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    current: Vec<Line>,
    last: Option<Frame>,
    frames: u64,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.last.as_ref()
    }
}

impl RenderBackend for RecordingRenderer {
    fn begin_frame(&mut self) {
        self.current.clear();
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        self.current.push(Line { x1, y1, x2, y2, color });
    }

    fn end_frame(&mut self) {
        self.last = Some(Frame {
            index: self.frames,
            lines: std::mem::take(&mut self.current),
        });
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_keeps_last_frame_only() {
        let mut r = RecordingRenderer::new();
        r.begin_frame();
        r.draw_line(0, 0, 1, 1, Color::RED);
        r.draw_line(1, 1, 2, 2, Color::RED);
        r.end_frame();
        r.begin_frame();
        r.draw_line(5, 5, 6, 6, Color::WHITE);
        r.end_frame();

        let last = r.last_frame().unwrap();
        assert_eq!(last.index, 1);
        assert_eq!(last.lines.len(), 1);
        assert_eq!(last.lines[0].color, Color::WHITE);
    }
}
