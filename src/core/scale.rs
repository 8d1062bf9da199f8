use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};

/// Continuous data-to-pixel mapping consumed by the frame layout.
///
/// Only the forward direction is needed during a layout pass. `scale`
/// returns `None` when the value cannot be projected (scale not ready,
/// non-finite input or output); callers skip such ticks.
pub trait Scale: fmt::Debug {
    /// Data-space domain as authored, which may be reversed.
    fn domain(&self) -> (f64, f64);

    fn scale(&self, value: f64) -> Option<f64>;
}

/// Shared scale handle held by layout inputs for the duration of a pass.
pub type ScaleHandle = Arc<dyn Scale + Send + Sync>;

/// Affine scale from a data domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> FrameResult<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() || domain.0 == domain.1 {
            return Err(FrameError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(FrameError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Returns the same domain mapped onto a new pixel range, used when the
    /// host resizes the plot after a frame-size report.
    pub fn with_range(self, range: (f64, f64)) -> FrameResult<Self> {
        Self::new(self.domain(), range)
    }

    pub fn domain_to_pixel(self, value: f64) -> FrameResult<f64> {
        if !value.is_finite() {
            return Err(FrameError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        Ok(self.range_start + normalized * (self.range_end - self.range_start))
    }

    pub fn pixel_to_domain(self, pixel: f64) -> FrameResult<f64> {
        if !pixel.is_finite() {
            return Err(FrameError::InvalidData("pixel must be finite".to_owned()));
        }

        let range_span = self.range_end - self.range_start;
        if range_span == 0.0 {
            return Err(FrameError::InvalidData(
                "cannot invert a scale with an empty range".to_owned(),
            ));
        }
        let normalized = (pixel - self.range_start) / range_span;
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }

    #[must_use]
    pub fn into_handle(self) -> ScaleHandle {
        Arc::new(self)
    }
}

impl Scale for LinearScale {
    fn domain(&self) -> (f64, f64) {
        LinearScale::domain(*self)
    }

    fn scale(&self, value: f64) -> Option<f64> {
        self.domain_to_pixel(value)
            .ok()
            .filter(|pixel| pixel.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::{LinearScale, Scale};

    #[test]
    fn reversed_range_maps_domain_max_to_top() {
        let scale = LinearScale::new((0.0, 1.0), (200.0, 0.0)).expect("valid scale");
        assert_eq!(scale.scale(1.0), Some(0.0));
        assert_eq!(scale.scale(0.0), Some(200.0));
        assert_eq!(scale.scale(0.25), Some(150.0));
    }

    #[test]
    fn non_finite_value_is_not_projected() {
        let scale = LinearScale::new((0.0, 10.0), (0.0, 100.0)).expect("valid scale");
        assert_eq!(scale.scale(f64::NAN), None);
        assert_eq!(scale.scale(f64::INFINITY), None);
    }

    #[test]
    fn degenerate_domain_is_rejected() {
        assert!(LinearScale::new((3.0, 3.0), (0.0, 100.0)).is_err());
        assert!(LinearScale::new((0.0, f64::NAN), (0.0, 100.0)).is_err());
    }

    #[test]
    fn empty_range_cannot_be_inverted() {
        let scale = LinearScale::new((0.0, 10.0), (0.0, 0.0)).expect("valid scale");
        assert_eq!(scale.scale(5.0), Some(0.0));
        assert!(scale.pixel_to_domain(0.0).is_err());
    }
}
