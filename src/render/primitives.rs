use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};

/// Horizontal text anchoring relative to the label position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// Rotation followed by a translation, both applied in the label's local
/// coordinate system around its tick origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextTransform {
    pub rotate_deg: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl TextTransform {
    #[must_use]
    pub const fn new(rotate_deg: f64, translate_x: f64, translate_y: f64) -> Self {
        Self {
            rotate_deg,
            translate_x,
            translate_y,
        }
    }

    /// Maps a local point through the transform (translate, then rotate).
    #[must_use]
    pub fn apply(self, x: f64, y: f64) -> (f64, f64) {
        let tx = x + self.translate_x;
        let ty = y + self.translate_y;
        let (sin, cos) = self.rotate_deg.to_radians().sin_cos();
        (tx * cos - ty * sin, tx * sin + ty * cos)
    }
}

/// One full-length grid line at a tick position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLinePrimitive {
    pub value: f64,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    /// Set on the line sitting at the guide value so hosts can style it apart.
    pub is_guide: bool,
    /// Paint visibility; hidden lines still exist in the group.
    pub visible: bool,
}

impl GridLinePrimitive {
    pub fn validate(self) -> FrameResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(FrameError::InvalidData(
                "grid line coordinates must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

/// One tick label.
///
/// `origin_*` is the tick position in frame coordinates; `offset_*` is the
/// label position relative to that origin before `transform` is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub text: String,
    pub value: f64,
    pub origin_x: f64,
    pub origin_y: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    /// Baseline shift in em units (perpendicular to the text direction).
    pub baseline_shift_em: f64,
    /// `None` inherits the group's default anchor.
    pub anchor: Option<TextAnchor>,
    pub transform: Option<TextTransform>,
    pub visible: bool,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(text: impl Into<String>, value: f64, origin: (f64, f64), offset: (f64, f64)) -> Self {
        Self {
            text: text.into(),
            value,
            origin_x: origin.0,
            origin_y: origin.1,
            offset_x: offset.0,
            offset_y: offset.1,
            baseline_shift_em: 0.0,
            anchor: None,
            transform: None,
            visible: true,
        }
    }

    #[must_use]
    pub fn with_baseline_shift_em(mut self, shift: f64) -> Self {
        self.baseline_shift_em = shift;
        self
    }

    #[must_use]
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Anchor point in frame coordinates after the transform.
    #[must_use]
    pub fn anchor_point(&self) -> (f64, f64) {
        let (x, y) = match self.transform {
            Some(transform) => transform.apply(self.offset_x, self.offset_y),
            None => (self.offset_x, self.offset_y),
        };
        (self.origin_x + x, self.origin_y + y)
    }

    pub fn validate(&self) -> FrameResult<()> {
        let coords = [
            self.origin_x,
            self.origin_y,
            self.offset_x,
            self.offset_y,
            self.baseline_shift_em,
        ];
        if coords.iter().any(|value| !value.is_finite()) {
            return Err(FrameError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if let Some(transform) = self.transform {
            if !transform.rotate_deg.is_finite()
                || !transform.translate_x.is_finite()
                || !transform.translate_y.is_finite()
            {
                return Err(FrameError::InvalidData(
                    "text transform must be finite".to_owned(),
                ));
            }
        }
        Ok(())
    }
}
