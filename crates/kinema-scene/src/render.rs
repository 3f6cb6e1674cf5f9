//! The draw-and-present seam between the scene runtime and a graphics
//! backend, plus a headless sink that records what it is given.

use kinema_core::{Color, Vec3};

/// A frame sink the orchestrator draws into.
///
/// Implementations own the window, context, and shaders; the runtime only
/// issues draw calls and never inspects the sink's state.
pub trait RenderSink {
    /// Background color used by subsequent `clear_screen` calls.
    fn set_clear_color(&mut self, _color: Color) {}

    fn clear_screen(&mut self);

    /// Draw one filled triangle given in world space.
    fn draw_triangle(&mut self, vertices: &[Vec3], color: Color);

    fn present(&mut self);

    /// Polled once per frame; `true` aborts the current play or wait.
    fn should_quit(&mut self) -> bool;
}

/// A single draw call captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub vertices: Vec<Vec3>,
    pub color: Color,
}

/// Draw calls issued between one clear and the following present.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFrame {
    pub clear_color: Color,
    pub draws: Vec<DrawCall>,
}

/// Headless sink that keeps every presented frame in memory.
#[derive(Debug, Clone)]
pub struct RecordingSink {
    clear_color: Color,
    pending: Option<RecordedFrame>,
    frames: Vec<RecordedFrame>,
    quit_after: Option<usize>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            clear_color: Color::CHARCOAL,
            pending: None,
            frames: Vec::new(),
            quit_after: None,
        }
    }

    /// Report a quit request once `frames` frames have been presented.
    pub fn quit_after(mut self, frames: usize) -> Self {
        self.quit_after = Some(frames);
        self
    }

    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn last_frame(&self) -> Option<&RecordedFrame> {
        self.frames.last()
    }

    pub fn clear_frames(&mut self) {
        self.frames.clear();
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSink for RecordingSink {
    fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    fn clear_screen(&mut self) {
        self.pending = Some(RecordedFrame {
            clear_color: self.clear_color,
            draws: Vec::new(),
        });
    }

    fn draw_triangle(&mut self, vertices: &[Vec3], color: Color) {
        let clear_color = self.clear_color;
        self.pending
            .get_or_insert_with(|| RecordedFrame {
                clear_color,
                draws: Vec::new(),
            })
            .draws
            .push(DrawCall {
                vertices: vertices.to_vec(),
                color,
            });
    }

    fn present(&mut self) {
        if let Some(frame) = self.pending.take() {
            self.frames.push(frame);
        }
    }

    fn should_quit(&mut self) -> bool {
        self.quit_after
            .is_some_and(|limit| self.frames.len() >= limit)
    }
}
