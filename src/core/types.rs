use serde::{Deserialize, Serialize};

/// Pixel size of the plotting area the frame is laid out around.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotSize {
    pub width: f64,
    pub height: f64,
}

impl PlotSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Zero-sized plots are valid (nothing visible yet); negative or
    /// non-finite sizes are not.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }
}

/// Which of the two frame axes a group belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisSide {
    /// Horizontal axis drawn under the plot (x).
    Bottom,
    /// Vertical axis drawn left of the plot (y).
    Left,
}

impl AxisSide {
    pub const ALL: [AxisSide; 2] = [AxisSide::Bottom, AxisSide::Left];
}

/// Per-axis pair of values, `x` for the bottom axis and `y` for the left one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisPair<T> {
    pub x: T,
    pub y: T,
}

impl<T> AxisPair<T> {
    #[must_use]
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn get(&self, side: AxisSide) -> &T {
        match side {
            AxisSide::Bottom => &self.x,
            AxisSide::Left => &self.y,
        }
    }

    pub fn get_mut(&mut self, side: AxisSide) -> &mut T {
        match side {
            AxisSide::Bottom => &mut self.x,
            AxisSide::Left => &mut self.y,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> AxisPair<U> {
        AxisPair {
            x: f(self.x),
            y: f(self.y),
        }
    }
}

/// Measured bounding-box size of a rendered group.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxSize {
    pub width: f64,
    pub height: f64,
}

impl BoxSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Space consumed by the rendered axis labels, reported back to the host.
///
/// `x_axis_height` already includes the unit-label margin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameSize {
    pub x_axis_height: f64,
    pub y_axis_width: f64,
}

impl FrameSize {
    #[must_use]
    pub fn new(x_axis_height: f64, y_axis_width: f64) -> Self {
        Self {
            x_axis_height,
            y_axis_width,
        }
    }
}
