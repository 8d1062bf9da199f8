use tracing::{debug, trace};

use crate::core::{AxisPair, AxisSide, BoxSize, FrameSize};
use crate::render::{LabelGroup, TextAnchor, TextPrimitive};

use super::FrameVisibility;

/// Room reserved under the bottom labels for the unit annotation.
pub const UNIT_Y_MARGIN: f64 = 8.0;

pub type FrameSizeListener = Box<dyn FnMut(FrameSize) + 'static>;

/// Host-side size observation of label groups.
///
/// Implementations subscribe to size changes of the group rendered for
/// `side` and deliver them back through `MeasurementFeedbackLoop::notify`.
pub trait ResizeObserver {
    fn observe(&mut self, side: AxisSide);
    fn unobserve(&mut self, side: AxisSide);
}

/// Observer for hosts that measure synchronously after each pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessResizeObserver;

impl ResizeObserver for HeadlessResizeObserver {
    fn observe(&mut self, _side: AxisSide) {}

    fn unobserve(&mut self, _side: AxisSide) {}
}

/// Bounding-box measurement of a rendered label group.
pub trait LabelGroupMeasurer {
    fn measure(&self, group: &LabelGroup) -> BoxSize;
}

/// Text metrics estimate for headless layout.
///
/// Glyphs are assumed `char_width_em` wide and one em tall, with the
/// baseline `ascent_em` below the top of the box. Rotations and anchors are
/// applied, so rotated bottom labels grow the group height by their width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicLabelMeasurer {
    pub font_size_px: f64,
    pub char_width_em: f64,
    pub ascent_em: f64,
}

impl Default for HeuristicLabelMeasurer {
    fn default() -> Self {
        Self {
            font_size_px: 12.0,
            char_width_em: 0.6,
            ascent_em: 0.8,
        }
    }
}

impl HeuristicLabelMeasurer {
    #[must_use]
    pub fn with_font_size(mut self, font_size_px: f64) -> Self {
        self.font_size_px = font_size_px;
        self
    }

    fn text_corners(&self, text: &TextPrimitive, anchor: TextAnchor) -> [(f64, f64); 4] {
        let font_size = self.font_size_px;
        let width = text.text.chars().count() as f64 * self.char_width_em * font_size;
        let left = match anchor {
            TextAnchor::Start => 0.0,
            TextAnchor::Middle => -width / 2.0,
            TextAnchor::End => -width,
        };
        let top = (text.baseline_shift_em - self.ascent_em) * font_size;

        let local = [
            (left, top),
            (left + width, top),
            (left, top + font_size),
            (left + width, top + font_size),
        ];
        local.map(|(dx, dy)| {
            let (x, y) = (text.offset_x + dx, text.offset_y + dy);
            let (x, y) = match text.transform {
                Some(transform) => transform.apply(x, y),
                None => (x, y),
            };
            (text.origin_x + x, text.origin_y + y)
        })
    }
}

impl LabelGroupMeasurer for HeuristicLabelMeasurer {
    fn measure(&self, group: &LabelGroup) -> BoxSize {
        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        // Paint-hidden labels still occupy layout space.
        for text in group.texts.iter().filter(|text| !text.text.is_empty()) {
            for (x, y) in self.text_corners(text, group.resolved_anchor(text)) {
                bounds = Some(match bounds {
                    None => (x, y, x, y),
                    Some((min_x, min_y, max_x, max_y)) => {
                        (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
                    }
                });
            }
        }

        bounds.map_or_else(BoxSize::default, |(min_x, min_y, max_x, max_y)| {
            BoxSize::new(max_x - min_x, max_y - min_y)
        })
    }
}

/// Turns label-group measurements into `FrameSize` reports.
///
/// Subscriptions follow label visibility; a report reaches the listener only
/// when the derived frame size changes. Dropping the loop releases every
/// remaining subscription.
pub struct MeasurementFeedbackLoop<O: ResizeObserver = HeadlessResizeObserver> {
    observer: O,
    observed: AxisPair<bool>,
    measured: AxisPair<Option<BoxSize>>,
    reported: Option<FrameSize>,
    listener: Option<FrameSizeListener>,
}

impl Default for MeasurementFeedbackLoop {
    fn default() -> Self {
        Self::new(HeadlessResizeObserver)
    }
}

impl<O: ResizeObserver> MeasurementFeedbackLoop<O> {
    #[must_use]
    pub fn new(observer: O) -> Self {
        Self {
            observer,
            observed: AxisPair::default(),
            measured: AxisPair::default(),
            reported: None,
            listener: None,
        }
    }

    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn set_listener(&mut self, listener: Option<FrameSizeListener>) {
        self.listener = listener;
    }

    #[must_use]
    pub fn is_observing(&self, side: AxisSide) -> bool {
        *self.observed.get(side)
    }

    /// Subscribes to size changes of the labels on `side`. Idempotent.
    pub fn observe(&mut self, side: AxisSide) {
        if self.is_observing(side) {
            return;
        }
        *self.observed.get_mut(side) = true;
        self.observer.observe(side);
        trace!(?side, "observing label group");
    }

    /// Releases the subscription for `side`. Idempotent, and safe for an
    /// axis that was never observed.
    ///
    /// The axis's last measurement is dropped; if that changes the frame
    /// size, the new size is reported.
    pub fn unobserve(&mut self, side: AxisSide) -> Option<FrameSize> {
        if !self.is_observing(side) {
            return None;
        }
        *self.observed.get_mut(side) = false;
        self.observer.unobserve(side);
        trace!(?side, "stopped observing label group");

        let had_measurement = self.measured.get_mut(side).take().is_some();
        if had_measurement { self.report() } else { None }
    }

    /// Aligns subscriptions with the label groups mounted this pass.
    pub fn sync_subscriptions(&mut self, visibility: FrameVisibility) -> Option<FrameSize> {
        let mut reported = None;
        for side in AxisSide::ALL {
            if visibility.observes_labels(side) {
                self.observe(side);
            } else if let Some(size) = self.unobserve(side) {
                reported = Some(size);
            }
        }
        reported
    }

    /// Records a size notification for the labels on `side`.
    ///
    /// Notifications for unobserved groups are stale and ignored. Returns
    /// the new frame size when it differs from the last reported one.
    pub fn notify(&mut self, side: AxisSide, size: BoxSize) -> Option<FrameSize> {
        if !self.is_observing(side) {
            trace!(?side, "ignoring size notification for unobserved labels");
            return None;
        }
        if !size.width.is_finite() || !size.height.is_finite() {
            debug!(?side, ?size, "ignoring non-finite label size");
            return None;
        }
        *self.measured.get_mut(side) = Some(size);
        self.report()
    }

    /// Frame size derived from the current measurements.
    #[must_use]
    pub fn frame_size(&self) -> FrameSize {
        let x_labels_height = self.measured.x.map_or(0.0, |size| size.height);
        let y_labels_width = self.measured.y.map_or(0.0, |size| size.width);
        FrameSize::new(x_labels_height + UNIT_Y_MARGIN, y_labels_width)
    }

    #[must_use]
    pub fn last_reported(&self) -> Option<FrameSize> {
        self.reported
    }

    /// Releases every subscription without reporting.
    pub fn teardown(&mut self) {
        for side in AxisSide::ALL {
            if self.is_observing(side) {
                *self.observed.get_mut(side) = false;
                self.observer.unobserve(side);
            }
        }
        self.measured = AxisPair::default();
    }

    fn report(&mut self) -> Option<FrameSize> {
        let size = self.frame_size();
        if self.reported == Some(size) {
            return None;
        }
        self.reported = Some(size);
        debug!(
            x_axis_height = size.x_axis_height,
            y_axis_width = size.y_axis_width,
            "frame size changed"
        );
        if let Some(listener) = self.listener.as_mut() {
            listener(size);
        }
        Some(size)
    }
}

impl<O: ResizeObserver> Drop for MeasurementFeedbackLoop<O> {
    fn drop(&mut self) {
        self.teardown();
    }
}
