mod frame;
mod null_renderer;
mod primitives;

pub use frame::{FrameGroupKind, FrameSurface, GridGroup, LabelGroup};
pub use null_renderer::NullRenderer;
pub use primitives::{GridLinePrimitive, TextAnchor, TextPrimitive, TextTransform};

use crate::error::FrameResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive the fully materialized `FrameSurface` after each layout
/// pass so drawing code stays isolated from tick and visibility rules.
pub trait Renderer {
    fn render(&mut self, surface: &FrameSurface) -> FrameResult<()>;
}
