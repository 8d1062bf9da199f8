use serde::{Deserialize, Serialize};

use crate::core::{AxisSide, PlotSize};
use crate::error::{FrameError, FrameResult};
use crate::render::{GridLinePrimitive, TextAnchor, TextPrimitive};

/// Addressable groups of a frame surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameGroupKind {
    XGrid,
    YGrid,
    XLabels,
    YLabels,
}

/// Grid lines for one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridGroup {
    pub side: AxisSide,
    pub lines: Vec<GridLinePrimitive>,
}

impl GridGroup {
    #[must_use]
    pub fn new(side: AxisSide) -> Self {
        Self {
            side,
            lines: Vec::new(),
        }
    }
}

/// Tick labels for one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelGroup {
    pub side: AxisSide,
    pub class: String,
    /// Vertical translation of the whole group (plot height for the bottom axis).
    pub translate_y: f64,
    /// Anchor used by labels without an explicit one.
    pub default_anchor: TextAnchor,
    /// Paint-hides the whole group without removing it from layout.
    pub hidden: bool,
    pub texts: Vec<TextPrimitive>,
}

impl LabelGroup {
    #[must_use]
    pub fn new(side: AxisSide) -> Self {
        let default_anchor = match side {
            AxisSide::Bottom => TextAnchor::Middle,
            AxisSide::Left => TextAnchor::End,
        };
        Self {
            side,
            class: String::new(),
            translate_y: 0.0,
            default_anchor,
            hidden: false,
            texts: Vec::new(),
        }
    }

    /// Drops prior content so the next pass rebuilds the group from scratch.
    pub fn clear(&mut self) {
        self.class.clear();
        self.translate_y = 0.0;
        self.hidden = false;
        self.texts.clear();
    }

    #[must_use]
    pub fn resolved_anchor(&self, text: &TextPrimitive) -> TextAnchor {
        text.anchor.unwrap_or(self.default_anchor)
    }
}

/// Draw target re-entered by every layout pass.
///
/// A group slot is `None` while its anchor is not attached; drawing into a
/// detached group is skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSurface {
    pub plot: PlotSize,
    pub x_grid: Option<GridGroup>,
    pub y_grid: Option<GridGroup>,
    pub x_labels: Option<LabelGroup>,
    pub y_labels: Option<LabelGroup>,
    pub y_unit: Option<TextPrimitive>,
}

impl FrameSurface {
    #[must_use]
    pub fn new(plot: PlotSize) -> Self {
        Self {
            plot,
            x_grid: None,
            y_grid: None,
            x_labels: None,
            y_labels: None,
            y_unit: None,
        }
    }

    #[must_use]
    pub fn is_attached(&self, kind: FrameGroupKind) -> bool {
        match kind {
            FrameGroupKind::XGrid => self.x_grid.is_some(),
            FrameGroupKind::YGrid => self.y_grid.is_some(),
            FrameGroupKind::XLabels => self.x_labels.is_some(),
            FrameGroupKind::YLabels => self.y_labels.is_some(),
        }
    }

    /// Attaches or detaches a group; attaching an attached group keeps its content.
    pub fn set_attached(&mut self, kind: FrameGroupKind, attached: bool) {
        match (kind, attached) {
            (FrameGroupKind::XGrid, true) => {
                self.x_grid.get_or_insert_with(|| GridGroup::new(AxisSide::Bottom));
            }
            (FrameGroupKind::YGrid, true) => {
                self.y_grid.get_or_insert_with(|| GridGroup::new(AxisSide::Left));
            }
            (FrameGroupKind::XLabels, true) => {
                self.x_labels.get_or_insert_with(|| LabelGroup::new(AxisSide::Bottom));
            }
            (FrameGroupKind::YLabels, true) => {
                self.y_labels.get_or_insert_with(|| LabelGroup::new(AxisSide::Left));
            }
            (FrameGroupKind::XGrid, false) => self.x_grid = None,
            (FrameGroupKind::YGrid, false) => self.y_grid = None,
            (FrameGroupKind::XLabels, false) => self.x_labels = None,
            (FrameGroupKind::YLabels, false) => {
                self.y_labels = None;
                self.y_unit = None;
            }
        }
    }

    #[must_use]
    pub fn label_group(&self, side: AxisSide) -> Option<&LabelGroup> {
        match side {
            AxisSide::Bottom => self.x_labels.as_ref(),
            AxisSide::Left => self.y_labels.as_ref(),
        }
    }

    pub fn label_group_mut(&mut self, side: AxisSide) -> Option<&mut LabelGroup> {
        match side {
            AxisSide::Bottom => self.x_labels.as_mut(),
            AxisSide::Left => self.y_labels.as_mut(),
        }
    }

    #[must_use]
    pub fn grid_group(&self, side: AxisSide) -> Option<&GridGroup> {
        match side {
            AxisSide::Bottom => self.x_grid.as_ref(),
            AxisSide::Left => self.y_grid.as_ref(),
        }
    }

    pub fn grid_group_mut(&mut self, side: AxisSide) -> Option<&mut GridGroup> {
        match side {
            AxisSide::Bottom => self.x_grid.as_mut(),
            AxisSide::Left => self.y_grid.as_mut(),
        }
    }

    pub fn validate(&self) -> FrameResult<()> {
        if !self.plot.is_valid() {
            return Err(FrameError::InvalidPlotSize {
                width: self.plot.width,
                height: self.plot.height,
            });
        }

        for grid in [&self.x_grid, &self.y_grid].into_iter().flatten() {
            for line in &grid.lines {
                line.validate()?;
            }
        }
        for labels in [&self.x_labels, &self.y_labels].into_iter().flatten() {
            if !labels.translate_y.is_finite() {
                return Err(FrameError::InvalidData(
                    "label group translation must be finite".to_owned(),
                ));
            }
            for text in &labels.texts {
                text.validate()?;
            }
        }
        if let Some(unit) = &self.y_unit {
            unit.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        [&self.x_grid, &self.y_grid]
            .into_iter()
            .flatten()
            .map(|grid| grid.lines.len())
            .sum()
    }

    #[must_use]
    pub fn text_count(&self) -> usize {
        let labels: usize = [&self.x_labels, &self.y_labels]
            .into_iter()
            .flatten()
            .map(|group| group.texts.len())
            .sum();
        labels + usize::from(self.y_unit.is_some())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.line_count() == 0 && self.text_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::{FrameGroupKind, FrameSurface};
    use crate::core::PlotSize;

    #[test]
    fn detaching_labels_drops_unit_text() {
        let mut surface = FrameSurface::new(PlotSize::new(100.0, 50.0));
        surface.set_attached(FrameGroupKind::YLabels, true);
        surface.y_unit = Some(crate::render::TextPrimitive::new("kg", 0.0, (0.0, 0.0), (0.0, 0.0)));

        surface.set_attached(FrameGroupKind::YLabels, false);
        assert!(!surface.is_attached(FrameGroupKind::YLabels));
        assert!(surface.y_unit.is_none());
    }

    #[test]
    fn negative_plot_size_fails_validation() {
        let surface = FrameSurface::new(PlotSize::new(-1.0, 50.0));
        assert!(surface.validate().is_err());
    }
}
