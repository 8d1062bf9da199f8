use serde::{Deserialize, Serialize};

use crate::core::{AxisSide, DEFAULT_GRID_TICKS, DEFAULT_GUIDE_VALUE, linear_tick_candidates};
use crate::error::{FrameError, FrameResult};

/// Per-axis grid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfigItem {
    /// Lower domain override applied by `resolve_domain`.
    #[serde(default)]
    pub min: Option<f64>,
    /// Upper domain override applied by `resolve_domain`.
    #[serde(default)]
    pub max: Option<f64>,
    /// Injects the guide value into the tick set when it is inside the domain.
    #[serde(default)]
    pub show_guide: bool,
    #[serde(default = "default_show_grid")]
    pub show_grid: bool,
    /// Candidate density hint for `tick_candidates`.
    #[serde(default)]
    pub grid_ticks: Option<usize>,
    /// Padding hint for hosts that inset the plotted data; not used by the frame layout.
    #[serde(default)]
    pub with_paddings: bool,
}

impl Default for GridConfigItem {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            show_guide: false,
            show_grid: default_show_grid(),
            grid_ticks: None,
            with_paddings: false,
        }
    }
}

impl GridConfigItem {
    #[must_use]
    pub fn with_guide(mut self, show_guide: bool) -> Self {
        self.show_guide = show_guide;
        self
    }

    #[must_use]
    pub fn with_grid(mut self, show_grid: bool) -> Self {
        self.show_grid = show_grid;
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    #[must_use]
    pub fn with_grid_ticks(mut self, grid_ticks: usize) -> Self {
        self.grid_ticks = Some(grid_ticks);
        self
    }

    /// Applies the configured `min`/`max` overrides to a data-derived domain.
    #[must_use]
    pub fn resolve_domain(self, data_domain: (f64, f64)) -> (f64, f64) {
        (
            self.min.unwrap_or(data_domain.0),
            self.max.unwrap_or(data_domain.1),
        )
    }

    #[must_use]
    pub fn grid_tick_count(self) -> usize {
        self.grid_ticks.unwrap_or(DEFAULT_GRID_TICKS)
    }

    /// Evenly spaced candidates for callers that have none of their own.
    #[must_use]
    pub fn tick_candidates(self, domain: (f64, f64)) -> Vec<f64> {
        linear_tick_candidates(domain, self.grid_tick_count())
    }

    fn validate(self, axis: &str) -> FrameResult<()> {
        for (name, bound) in [("min", self.min), ("max", self.max)] {
            if bound.is_some_and(|value| !value.is_finite()) {
                return Err(FrameError::InvalidData(format!(
                    "grid config `{axis}.{name}` must be finite"
                )));
            }
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(FrameError::InvalidData(format!(
                    "grid config `{axis}.min` must not exceed `{axis}.max`"
                )));
            }
        }
        Ok(())
    }
}

/// Grid configuration for both axes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default)]
    pub x: GridConfigItem,
    #[serde(default)]
    pub y: GridConfigItem,
}

impl GridConfig {
    #[must_use]
    pub fn new(x: GridConfigItem, y: GridConfigItem) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn item(self, side: AxisSide) -> GridConfigItem {
        match side {
            AxisSide::Bottom => self.x,
            AxisSide::Left => self.y,
        }
    }

    /// Both axes have their grid switched off. Labels may still show and the
    /// first grid line of each axis stays painted as a baseline.
    #[must_use]
    pub fn grids_hidden(self) -> bool {
        !self.x.show_grid && !self.y.show_grid
    }
}

/// Frame layout configuration.
///
/// This type is serializable so host applications can persist/load frame
/// setup without inventing their own format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameConfig {
    #[serde(default)]
    pub grid: GridConfig,
    /// Reference value injected into tick sets and highlighted on the grid.
    #[serde(default = "default_guide_value")]
    pub guide_value: f64,
    #[serde(default)]
    pub y_labels_show_in_percent: bool,
    #[serde(default)]
    pub x_labels_show_vertical: bool,
    #[serde(default)]
    pub x_hide_first_label: bool,
    #[serde(default)]
    pub hide_y_labels: bool,
    #[serde(default)]
    pub show_only_y: bool,
    #[serde(default)]
    pub y_dimension_unit: Option<String>,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            guide_value: default_guide_value(),
            y_labels_show_in_percent: false,
            x_labels_show_vertical: false,
            x_hide_first_label: false,
            hide_y_labels: false,
            show_only_y: false,
            y_dimension_unit: None,
        }
    }
}

impl FrameConfig {
    #[must_use]
    pub fn with_grid(mut self, grid: GridConfig) -> Self {
        self.grid = grid;
        self
    }

    #[must_use]
    pub fn with_guide_value(mut self, guide_value: f64) -> Self {
        self.guide_value = guide_value;
        self
    }

    /// Formats left-axis labels as whole percentages.
    #[must_use]
    pub fn with_y_labels_in_percent(mut self, enabled: bool) -> Self {
        self.y_labels_show_in_percent = enabled;
        self
    }

    /// Rotates bottom-axis labels to read vertically.
    #[must_use]
    pub fn with_x_labels_vertical(mut self, enabled: bool) -> Self {
        self.x_labels_show_vertical = enabled;
        self
    }

    #[must_use]
    pub fn with_x_first_label_hidden(mut self, enabled: bool) -> Self {
        self.x_hide_first_label = enabled;
        self
    }

    #[must_use]
    pub fn with_y_labels_hidden(mut self, enabled: bool) -> Self {
        self.hide_y_labels = enabled;
        self
    }

    /// Keeps only the left-axis labels; grids and bottom labels are not drawn.
    #[must_use]
    pub fn with_only_y(mut self, enabled: bool) -> Self {
        self.show_only_y = enabled;
        self
    }

    #[must_use]
    pub fn with_y_dimension_unit(mut self, unit: impl Into<String>) -> Self {
        self.y_dimension_unit = Some(unit.into());
        self
    }

    pub fn validate(&self) -> FrameResult<()> {
        if !self.guide_value.is_finite() {
            return Err(FrameError::InvalidData(
                "guide value must be finite".to_owned(),
            ));
        }
        self.grid.x.validate("x")?;
        self.grid.y.validate("y")
    }
}

fn default_show_grid() -> bool {
    true
}

fn default_guide_value() -> f64 {
    DEFAULT_GUIDE_VALUE
}
