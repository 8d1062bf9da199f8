use crate::error::FrameResult;
use crate::render::{FrameSurface, Renderer};

/// No-op renderer used by tests and headless layout.
///
/// It still validates the surface so tests catch invalid geometry before a
/// real backend is involved.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_line_count: usize,
    pub last_text_count: usize,
    pub render_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, surface: &FrameSurface) -> FrameResult<()> {
        surface.validate()?;
        self.last_line_count = surface.line_count();
        self.last_text_count = surface.text_count();
        self.render_count += 1;
        Ok(())
    }
}
