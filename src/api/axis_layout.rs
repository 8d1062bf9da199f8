use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::{
    AxisPair, AxisSide, PlotSize, ScaleHandle, merge_guide_into_ticks, resolve_tick_set,
};
use crate::render::{
    FrameGroupKind, FrameSurface, GridLinePrimitive, TextAnchor, TextPrimitive, TextTransform,
};

use super::measurement::UNIT_Y_MARGIN;
use super::{FrameConfig, GridConfig, LabelFormatter, LabelFormatterFn};

/// Label padding of the left axis; the bottom axis uses half of it.
pub const TICK_PADDING: f64 = 15.0;
/// Cross-axis offset applied to rotated bottom labels.
pub const X_TICK_OFFSET: f64 = 18.0;
/// Inner tick length that label positions are measured from.
pub const TICK_SIZE_INNER: f64 = 6.0;
pub const X_LABEL_ROTATION_DEG: f64 = -90.0;

pub const X_LABELS_CLASS: &str = "frame-labels frame-labels-x";
pub const Y_LABELS_CLASS: &str = "frame-labels frame-labels-y";

const BOTTOM_BASELINE_SHIFT_EM: f64 = 0.71;
const LEFT_BASELINE_SHIFT_EM: f64 = 0.32;

/// Caller-supplied inputs of one layout pass.
#[derive(Debug, Clone)]
pub struct FrameInput {
    pub plot: PlotSize,
    pub x_scale: Option<ScaleHandle>,
    pub y_scale: Option<ScaleHandle>,
    pub x_tick_values: Vec<f64>,
    pub y_tick_values: Vec<f64>,
}

impl FrameInput {
    #[must_use]
    pub fn new(plot: PlotSize) -> Self {
        Self {
            plot,
            x_scale: None,
            y_scale: None,
            x_tick_values: Vec::new(),
            y_tick_values: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_x_scale(mut self, scale: ScaleHandle, tick_values: Vec<f64>) -> Self {
        self.x_scale = Some(scale);
        self.x_tick_values = tick_values;
        self
    }

    #[must_use]
    pub fn with_y_scale(mut self, scale: ScaleHandle, tick_values: Vec<f64>) -> Self {
        self.y_scale = Some(scale);
        self.y_tick_values = tick_values;
        self
    }

    #[must_use]
    pub fn scale(&self, side: AxisSide) -> Option<&ScaleHandle> {
        match side {
            AxisSide::Bottom => self.x_scale.as_ref(),
            AxisSide::Left => self.y_scale.as_ref(),
        }
    }

    #[must_use]
    pub fn tick_values(&self, side: AxisSide) -> &[f64] {
        match side {
            AxisSide::Bottom => &self.x_tick_values,
            AxisSide::Left => &self.y_tick_values,
        }
    }
}

/// Which frame groups exist for the current pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameVisibility {
    /// Neither axis shows its grid.
    pub grids_hidden: bool,
    pub show_only_y: bool,
    pub x_grid: bool,
    pub y_grid: bool,
    pub x_labels: bool,
    pub y_labels: bool,
}

impl FrameVisibility {
    /// Grid lines exist when the axis shows its grid or both grids are hidden.
    /// Labels exist when the axis shows its grid, or when both grids are
    /// hidden and the axis still has ticks.
    #[must_use]
    pub fn resolve(grid: GridConfig, ticks: &AxisPair<Vec<f64>>, show_only_y: bool) -> Self {
        let grids_hidden = grid.grids_hidden();
        Self {
            grids_hidden,
            show_only_y,
            x_grid: grid.x.show_grid || grids_hidden,
            y_grid: grid.y.show_grid || grids_hidden,
            x_labels: grid.x.show_grid || (!ticks.x.is_empty() && grids_hidden),
            y_labels: grid.y.show_grid || (!ticks.y.is_empty() && grids_hidden),
        }
    }

    #[must_use]
    pub fn labels_visible(self, side: AxisSide) -> bool {
        match side {
            AxisSide::Bottom => self.x_labels,
            AxisSide::Left => self.y_labels,
        }
    }

    /// Whether the group is part of the frame this pass; `show_only_y`
    /// keeps only the left labels.
    #[must_use]
    pub fn is_mounted(self, kind: FrameGroupKind) -> bool {
        match kind {
            FrameGroupKind::XGrid => self.x_grid && !self.show_only_y,
            FrameGroupKind::YGrid => self.y_grid && !self.show_only_y,
            FrameGroupKind::XLabels => self.x_labels && !self.show_only_y,
            FrameGroupKind::YLabels => self.y_labels,
        }
    }

    #[must_use]
    pub fn observes_labels(self, side: AxisSide) -> bool {
        match side {
            AxisSide::Bottom => self.is_mounted(FrameGroupKind::XLabels),
            AxisSide::Left => self.is_mounted(FrameGroupKind::YLabels),
        }
    }

    /// Attaches mounted groups and detaches the others.
    pub fn attach_groups(self, surface: &mut FrameSurface) {
        for kind in [
            FrameGroupKind::XGrid,
            FrameGroupKind::YGrid,
            FrameGroupKind::XLabels,
            FrameGroupKind::YLabels,
        ] {
            surface.set_attached(kind, self.is_mounted(kind));
        }
    }
}

/// Per-axis label bundle shared by label and grid drawing.
#[derive(Debug, Clone)]
pub struct AxisLabelSpec {
    pub side: AxisSide,
    pub scale: ScaleHandle,
    pub ticks: Vec<f64>,
    pub class: &'static str,
    pub translate_y: f64,
    pub formatter: LabelFormatter,
}

impl AxisLabelSpec {
    #[must_use]
    pub fn tick_padding(&self) -> f64 {
        match self.side {
            AxisSide::Bottom => TICK_PADDING / 2.0,
            AxisSide::Left => TICK_PADDING,
        }
    }

    /// Projects every tick and lays out its label. Ticks the scale cannot
    /// project are skipped; anchors follow the index among drawn labels.
    #[must_use]
    pub fn build_texts(&self) -> Vec<TextPrimitive> {
        let projected: Vec<(f64, f64)> = self
            .ticks
            .iter()
            .filter_map(|&value| project(&self.scale, value))
            .collect();
        let last_index = projected.len().saturating_sub(1);
        let distance = TICK_SIZE_INNER + self.tick_padding();

        projected
            .into_iter()
            .enumerate()
            .map(|(index, (value, pixel))| {
                let text = self.formatter.format(value);
                match self.side {
                    AxisSide::Bottom => {
                        let anchor = if index == 0 {
                            TextAnchor::Start
                        } else if index == last_index {
                            TextAnchor::End
                        } else {
                            TextAnchor::Middle
                        };
                        TextPrimitive::new(text, value, (pixel, self.translate_y), (0.0, distance))
                            .with_baseline_shift_em(BOTTOM_BASELINE_SHIFT_EM)
                            .with_anchor(anchor)
                    }
                    AxisSide::Left => {
                        TextPrimitive::new(text, value, (0.0, pixel), (-distance, 0.0))
                            .with_baseline_shift_em(LEFT_BASELINE_SHIFT_EM)
                    }
                }
            })
            .collect()
    }
}

// Ticks whose projection is missing or non-finite are not drawn.
fn project(scale: &ScaleHandle, value: f64) -> Option<(f64, f64)> {
    scale
        .scale(value)
        .filter(|pixel| pixel.is_finite())
        .map(|pixel| (value, pixel))
}

/// Result of the tick and visibility resolution of one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPass {
    pub ticks: AxisPair<Vec<f64>>,
    pub visibility: FrameVisibility,
}

/// Stateless per-pass layout of grid lines and axis labels.
#[derive(Clone, Copy)]
pub struct AxisLayoutEngine<'a> {
    config: &'a FrameConfig,
    formatters: &'a AxisPair<Option<LabelFormatterFn>>,
}

impl<'a> AxisLayoutEngine<'a> {
    #[must_use]
    pub fn new(
        config: &'a FrameConfig,
        formatters: &'a AxisPair<Option<LabelFormatterFn>>,
    ) -> Self {
        Self { config, formatters }
    }

    /// Resolves each axis's tick set against its own domain and guide flag.
    #[must_use]
    pub fn resolve_ticks(&self, input: &FrameInput) -> AxisPair<Vec<f64>> {
        let resolve = |side: AxisSide| {
            let candidates = input.tick_values(side);
            match input.scale(side) {
                Some(scale) => resolve_tick_set(
                    candidates,
                    scale.domain(),
                    self.config.grid.item(side).show_guide,
                    self.config.guide_value,
                ),
                None => merge_guide_into_ticks(candidates, None),
            }
        };
        AxisPair::new(resolve(AxisSide::Bottom), resolve(AxisSide::Left))
    }

    #[must_use]
    pub fn prepare(&self, input: &FrameInput) -> LayoutPass {
        let ticks = self.resolve_ticks(input);
        let visibility = FrameVisibility::resolve(self.config.grid, &ticks, self.config.show_only_y);
        LayoutPass { ticks, visibility }
    }

    #[must_use]
    pub fn formatter(&self, side: AxisSide) -> LabelFormatter {
        match side {
            AxisSide::Bottom => LabelFormatter::resolve(self.formatters.x.as_ref(), false),
            AxisSide::Left => LabelFormatter::resolve(
                self.formatters.y.as_ref(),
                self.config.y_labels_show_in_percent,
            ),
        }
    }

    /// Builds the label specs of every visible label axis that has a scale.
    #[must_use]
    pub fn label_specs(&self, input: &FrameInput, pass: &LayoutPass) -> SmallVec<[AxisLabelSpec; 2]> {
        let mut specs = SmallVec::new();
        for side in AxisSide::ALL {
            if !pass.visibility.observes_labels(side) {
                continue;
            }
            let Some(scale) = input.scale(side) else {
                debug!(?side, "no scale for visible labels; skipping axis");
                continue;
            };
            specs.push(AxisLabelSpec {
                side,
                scale: scale.clone(),
                ticks: pass.ticks.get(side).clone(),
                class: match side {
                    AxisSide::Bottom => X_LABELS_CLASS,
                    AxisSide::Left => Y_LABELS_CLASS,
                },
                translate_y: match side {
                    AxisSide::Bottom => input.plot.height,
                    AxisSide::Left => 0.0,
                },
                formatter: self.formatter(side),
            });
        }
        specs
    }

    /// Resolves the pass and redraws every attached group of `surface`.
    pub fn layout(&self, input: &FrameInput, surface: &mut FrameSurface) -> LayoutPass {
        let pass = self.prepare(input);
        self.draw(input, &pass, surface);
        pass
    }

    /// Clears and rebuilds the attached groups. Detached groups and axes
    /// without a scale are skipped.
    pub fn draw(&self, input: &FrameInput, pass: &LayoutPass, surface: &mut FrameSurface) {
        surface.plot = input.plot;
        self.draw_labels(input, pass, surface);
        self.draw_grids(input, pass, surface);
        self.draw_unit(surface);
        trace!(
            x_ticks = pass.ticks.x.len(),
            y_ticks = pass.ticks.y.len(),
            lines = surface.line_count(),
            texts = surface.text_count(),
            "frame layout pass drawn"
        );
    }

    fn draw_labels(&self, input: &FrameInput, pass: &LayoutPass, surface: &mut FrameSurface) {
        for side in AxisSide::ALL {
            if let Some(group) = surface.label_group_mut(side) {
                group.clear();
            }
        }

        for spec in self.label_specs(input, pass) {
            let Some(group) = surface.label_group_mut(spec.side) else {
                debug!(side = ?spec.side, "label group not attached; skipping axis");
                continue;
            };
            group.class = spec.class.to_owned();
            group.translate_y = spec.translate_y;
            group.texts = spec.build_texts();

            match spec.side {
                AxisSide::Bottom => {
                    if self.config.x_labels_show_vertical {
                        for text in &mut group.texts {
                            text.transform = Some(TextTransform::new(
                                X_LABEL_ROTATION_DEG,
                                -TICK_PADDING,
                                -X_TICK_OFFSET,
                            ));
                            text.anchor = Some(TextAnchor::End);
                        }
                    }
                    if self.config.x_hide_first_label {
                        if let Some(first) = group.texts.first_mut() {
                            first.visible = false;
                        }
                    }
                }
                AxisSide::Left => group.hidden = self.config.hide_y_labels,
            }
        }
    }

    fn draw_grids(&self, input: &FrameInput, pass: &LayoutPass, surface: &mut FrameSurface) {
        let plot = input.plot;
        for side in AxisSide::ALL {
            let Some(group) = surface.grid_group_mut(side) else {
                continue;
            };
            group.lines.clear();
            let Some(scale) = input.scale(side) else {
                debug!(?side, "no scale for grid; skipping axis");
                continue;
            };

            let show_guide = self.config.grid.item(side).show_guide;
            let guide_value = self.config.guide_value;
            let grids_hidden = pass.visibility.grids_hidden;
            group.lines = pass
                .ticks
                .get(side)
                .iter()
                .filter_map(|&value| project(scale, value))
                .enumerate()
                .map(|(index, (value, pixel))| {
                    let (x1, y1, x2, y2) = match side {
                        AxisSide::Bottom => (pixel, 0.0, pixel, plot.height),
                        AxisSide::Left => (0.0, pixel, plot.width, pixel),
                    };
                    GridLinePrimitive {
                        value,
                        x1,
                        y1,
                        x2,
                        y2,
                        is_guide: show_guide && value == guide_value,
                        // With both grids hidden only the first line stays painted,
                        // whether or not it sits on the guide value.
                        visible: !grids_hidden || index == 0,
                    }
                })
                .collect();
        }
    }

    fn draw_unit(&self, surface: &mut FrameSurface) {
        let unit = match (&surface.y_labels, &self.config.y_dimension_unit) {
            (Some(_), Some(unit)) => {
                let mut text = TextPrimitive::new(
                    unit.clone(),
                    0.0,
                    (0.0, 0.0),
                    (-(TICK_SIZE_INNER + TICK_PADDING), -UNIT_Y_MARGIN),
                )
                .with_anchor(TextAnchor::End);
                text.visible = !self.config.hide_y_labels;
                Some(text)
            }
            _ => None,
        };
        surface.y_unit = unit;
    }
}
