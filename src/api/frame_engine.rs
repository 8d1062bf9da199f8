use tracing::{debug, warn};

use crate::core::{AxisPair, AxisSide, BoxSize, FrameSize, PlotSize};
use crate::error::{FrameError, FrameResult};
use crate::render::{FrameSurface, Renderer};

use super::{
    AxisLayoutEngine, FrameConfig, FrameInput, FrameSizeListener, HeadlessResizeObserver,
    HeuristicLabelMeasurer, LabelFormatterFn, LabelGroupMeasurer, LayoutPass,
    MeasurementFeedbackLoop, ResizeObserver,
};

/// Upper bound of layout passes `settle` runs before giving up.
pub const DEFAULT_MAX_SETTLE_PASSES: usize = 8;

/// Outcome of a `FrameEngine::settle` run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleOutcome {
    pub passes: usize,
    pub frame_size: FrameSize,
    pub converged: bool,
}

/// Main orchestration facade consumed by host applications.
///
/// `FrameEngine` owns the draw target, runs layout passes against it, hands
/// the result to the renderer and feeds label measurements back to the host.
pub struct FrameEngine<
    R: Renderer,
    M: LabelGroupMeasurer = HeuristicLabelMeasurer,
    O: ResizeObserver = HeadlessResizeObserver,
> {
    renderer: R,
    measurer: M,
    config: FrameConfig,
    formatters: AxisPair<Option<LabelFormatterFn>>,
    surface: FrameSurface,
    feedback: MeasurementFeedbackLoop<O>,
    last_pass: Option<LayoutPass>,
}

impl<R: Renderer> FrameEngine<R> {
    pub fn new(renderer: R, config: FrameConfig) -> FrameResult<Self> {
        Self::with_parts(
            renderer,
            HeuristicLabelMeasurer::default(),
            HeadlessResizeObserver,
            config,
        )
    }
}

impl<R: Renderer, M: LabelGroupMeasurer, O: ResizeObserver> FrameEngine<R, M, O> {
    pub fn with_parts(renderer: R, measurer: M, observer: O, config: FrameConfig) -> FrameResult<Self> {
        config.validate()?;
        Ok(Self {
            renderer,
            measurer,
            config,
            formatters: AxisPair::default(),
            surface: FrameSurface::new(PlotSize::new(0.0, 0.0)),
            feedback: MeasurementFeedbackLoop::new(observer),
            last_pass: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    /// Replaces the configuration; takes effect on the next pass.
    pub fn set_config(&mut self, config: FrameConfig) -> FrameResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Installs or clears the caller formatter of one axis.
    pub fn set_label_formatter(&mut self, side: AxisSide, formatter: Option<LabelFormatterFn>) {
        *self.formatters.get_mut(side) = formatter;
    }

    pub fn set_frame_size_listener(&mut self, listener: Option<FrameSizeListener>) {
        self.feedback.set_listener(listener);
    }

    #[must_use]
    pub fn surface(&self) -> &FrameSurface {
        &self.surface
    }

    /// Detached groups are skipped by the next pass until visibility
    /// changes attach them again.
    pub fn surface_mut(&mut self) -> &mut FrameSurface {
        &mut self.surface
    }

    #[must_use]
    pub fn last_pass(&self) -> Option<&LayoutPass> {
        self.last_pass.as_ref()
    }

    #[must_use]
    pub fn frame_size(&self) -> FrameSize {
        self.feedback.frame_size()
    }

    #[must_use]
    pub fn feedback(&self) -> &MeasurementFeedbackLoop<O> {
        &self.feedback
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Runs one layout pass: resolves ticks and visibility, rebuilds the
    /// surface, renders it and measures the observed label groups.
    ///
    /// Returns the frame size when this pass changed it.
    pub fn layout(&mut self, input: &FrameInput) -> FrameResult<Option<FrameSize>> {
        if !input.plot.is_valid() {
            return Err(FrameError::InvalidPlotSize {
                width: input.plot.width,
                height: input.plot.height,
            });
        }

        let engine = AxisLayoutEngine::new(&self.config, &self.formatters);
        let pass = engine.prepare(input);
        pass.visibility.attach_groups(&mut self.surface);
        engine.draw(input, &pass, &mut self.surface);

        // Subscriptions track the attached groups even when rendering fails.
        let mut reported = self.feedback.sync_subscriptions(pass.visibility);
        self.last_pass = Some(pass);
        self.renderer.render(&self.surface)?;

        for side in AxisSide::ALL {
            if !self.feedback.is_observing(side) {
                continue;
            }
            let Some(group) = self.surface.label_group(side) else {
                continue;
            };
            let size = self.measurer.measure(group);
            if let Some(frame_size) = self.feedback.notify(side, size) {
                reported = Some(frame_size);
            }
        }

        Ok(reported)
    }

    /// Delivers a host-side size notification (font load, reflow, ...).
    pub fn notify_label_size(&mut self, side: AxisSide, size: BoxSize) -> Option<FrameSize> {
        self.feedback.notify(side, size)
    }

    /// Repeats layout passes, rebuilding the input from the latest frame
    /// size, until the frame size stops changing or `max_passes` is reached.
    pub fn settle<F>(&mut self, mut input_for: F, max_passes: usize) -> FrameResult<SettleOutcome>
    where
        F: FnMut(FrameSize) -> FrameInput,
    {
        let mut frame_size = self.feedback.frame_size();
        for passes in 1..=max_passes {
            let input = input_for(frame_size);
            self.layout(&input)?;
            let next = self.feedback.frame_size();
            if next == frame_size {
                debug!(passes, ?frame_size, "frame layout settled");
                return Ok(SettleOutcome {
                    passes,
                    frame_size,
                    converged: true,
                });
            }
            frame_size = next;
        }

        warn!(max_passes, ?frame_size, "frame layout did not settle");
        Ok(SettleOutcome {
            passes: max_passes,
            frame_size,
            converged: false,
        })
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
