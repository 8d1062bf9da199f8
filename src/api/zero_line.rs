use serde::{Deserialize, Serialize};

use crate::core::{PlotSize, Scale};

/// Reference line of a bar-style chart at a guide value (usually zero).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ZeroLine {
    /// Horizontal bars: a vertical line at `x` spanning the full height.
    Vertical { x: f64 },
    /// Vertical bars: a horizontal line at `y` spanning the full width.
    Horizontal { y: f64 },
    None,
}

/// Pixel endpoints of a resolved zero line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl ZeroLine {
    /// Projects `guide_value` through the values scale.
    ///
    /// A position of exactly `0.0` counts as "not placed", like an unresolved
    /// one, so no line is produced for it.
    #[must_use]
    pub fn resolve(values_scale: &dyn Scale, is_horizontal: bool, guide_value: f64) -> Self {
        match values_scale.scale(guide_value) {
            Some(position) if position.is_finite() && position != 0.0 => {
                if is_horizontal {
                    Self::Vertical { x: position }
                } else {
                    Self::Horizontal { y: position }
                }
            }
            _ => Self::None,
        }
    }

    #[must_use]
    pub fn segment(self, plot: PlotSize) -> Option<LineSegment> {
        match self {
            Self::Vertical { x } => Some(LineSegment {
                x1: x,
                y1: 0.0,
                x2: x,
                y2: plot.height,
            }),
            Self::Horizontal { y } => Some(LineSegment {
                x1: 0.0,
                y1: y,
                x2: plot.width,
                y2: y,
            }),
            Self::None => None,
        }
    }

    #[must_use]
    pub fn is_drawn(self) -> bool {
        !matches!(self, Self::None)
    }
}
