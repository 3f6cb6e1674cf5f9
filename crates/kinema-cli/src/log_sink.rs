//! A render sink that has no window and reports frames through `tracing`.

use kinema_core::{Color, Vec3};
use kinema_scene::RenderSink;

/// Counts frames and draw calls and logs a one-line summary per frame.
#[derive(Debug)]
pub struct LogSink {
    clear_color: Color,
    draws: usize,
    frames: u64,
    max_frames: Option<u64>,
}

impl LogSink {
    pub fn new(max_frames: Option<u64>) -> Self {
        Self {
            clear_color: Color::CHARCOAL,
            draws: 0,
            frames: 0,
            max_frames,
        }
    }
}

impl RenderSink for LogSink {
    fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    fn clear_screen(&mut self) {
        self.draws = 0;
    }

    fn draw_triangle(&mut self, vertices: &[Vec3], color: Color) {
        self.draws += 1;
        if let Some(first) = vertices.first() {
            tracing::trace!(
                "triangle {} at ({:.2}, {:.2}) in {}",
                self.draws,
                first.x,
                first.y,
                color
            );
        }
    }

    fn present(&mut self) {
        self.frames += 1;
        tracing::debug!(
            "frame {}: {} triangle(s) over {}",
            self.frames,
            self.draws,
            self.clear_color
        );
    }

    fn should_quit(&mut self) -> bool {
        self.max_frames.is_some_and(|limit| self.frames >= limit)
    }
}
