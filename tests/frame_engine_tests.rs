use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use chart_frame::api::{
    DEFAULT_MAX_SETTLE_PASSES, FrameConfig, FrameEngine, FrameInput, HeuristicLabelMeasurer,
    ResizeObserver,
};
use chart_frame::core::{AxisSide, BoxSize, FrameSize, LinearScale, PlotSize, Scale};
use chart_frame::render::{FrameSurface, NullRenderer, Renderer, TextAnchor};
use chart_frame::{FrameError, FrameResult};

const CANVAS_WIDTH: f64 = 400.0;
const CANVAS_HEIGHT: f64 = 240.0;

fn input_for(frame: FrameSize) -> FrameInput {
    let plot = PlotSize::new(
        CANVAS_WIDTH - frame.y_axis_width,
        CANVAS_HEIGHT - frame.x_axis_height,
    );
    let x = LinearScale::new((0.0, 10.0), (0.0, plot.width)).expect("x scale");
    let y = LinearScale::new((0.0, 1.0), (plot.height, 0.0)).expect("y scale");
    FrameInput::new(plot)
        .with_x_scale(x.into_handle(), vec![0.0, 5.0, 10.0])
        .with_y_scale(y.into_handle(), vec![0.0, 0.5, 1.0])
}

fn percent_engine() -> FrameEngine<NullRenderer> {
    FrameEngine::new(
        NullRenderer::default(),
        FrameConfig::default().with_y_labels_in_percent(true),
    )
    .expect("engine init")
}

#[test]
fn first_pass_reports_measured_frame_size() {
    let mut engine = percent_engine();
    let size = engine
        .layout(&input_for(FrameSize::default()))
        .expect("layout")
        .expect("first pass changes the frame size");

    // One 12px line of bottom labels plus the unit margin.
    assert_relative_eq!(size.x_axis_height, 20.0, epsilon = 1e-9);
    // "100%" at 0.6em per glyph.
    assert_relative_eq!(size.y_axis_width, 28.8, epsilon = 1e-9);
    assert_eq!(engine.frame_size(), size);

    let renderer = engine.renderer();
    assert_eq!(renderer.render_count, 1);
    assert_eq!(renderer.last_line_count, 6);
    assert_eq!(renderer.last_text_count, 6);
}

#[test]
fn unchanged_pass_does_not_report_again() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    let mut engine = percent_engine();
    engine.set_frame_size_listener(Some(Box::new(move |size: FrameSize| {
        sink.borrow_mut().push(size);
    })));

    let input = input_for(FrameSize::default());
    assert!(engine.layout(&input).expect("first layout").is_some());
    assert!(engine.layout(&input).expect("second layout").is_none());
    assert_eq!(calls.borrow().len(), 1);
}

#[test]
fn settle_converges_once_labels_stop_changing() {
    let mut engine = percent_engine();
    let outcome = engine
        .settle(input_for, DEFAULT_MAX_SETTLE_PASSES)
        .expect("settle");

    assert!(outcome.converged);
    assert_eq!(outcome.passes, 2);
    assert_eq!(outcome.frame_size, engine.frame_size());
    assert_relative_eq!(
        engine.surface().plot.width,
        CANVAS_WIDTH - outcome.frame_size.y_axis_width
    );
}

#[test]
fn settle_stops_after_max_passes_when_labels_keep_growing() {
    let mut engine = percent_engine();
    let mut pass = 0;
    let outcome = engine
        .settle(
            |frame| {
                pass += 1;
                let mut input = input_for(frame);
                // Every pass adds a digit to the widest label.
                input.y_tick_values = vec![0.0, 10_f64.powi(pass)];
                input
            },
            3,
        )
        .expect("settle");

    assert!(!outcome.converged);
    assert_eq!(outcome.passes, 3);
}

#[test]
fn invalid_plot_size_is_rejected() {
    let mut engine = percent_engine();
    let input = FrameInput::new(PlotSize::new(-1.0, 100.0));
    assert!(matches!(
        engine.layout(&input),
        Err(FrameError::InvalidPlotSize { .. })
    ));
    assert_eq!(engine.renderer().render_count, 0);
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let config = FrameConfig::default().with_guide_value(f64::NAN);
    assert!(FrameEngine::new(NullRenderer::default(), config).is_err());
}

#[test]
fn custom_formatter_changes_reported_width() {
    let mut engine = percent_engine();
    engine.set_label_formatter(
        AxisSide::Left,
        Some(std::sync::Arc::new(|value: f64| format!("{value:.3} units"))),
    );
    let size = engine
        .layout(&input_for(FrameSize::default()))
        .expect("layout")
        .expect("frame size");

    // "0.000 units" is 11 glyphs.
    assert_relative_eq!(size.y_axis_width, 11.0 * 7.2, epsilon = 1e-9);
}

#[test]
fn host_notifications_feed_the_same_loop() {
    let mut engine = percent_engine();
    engine.layout(&input_for(FrameSize::default())).expect("layout");

    let grown = engine
        .notify_label_size(AxisSide::Left, BoxSize::new(64.0, 200.0))
        .expect("wider labels change the frame");
    assert_relative_eq!(grown.y_axis_width, 64.0);
    assert_eq!(engine.notify_label_size(AxisSide::Left, BoxSize::new(64.0, 200.0)), None);
}

#[test]
fn switching_to_show_only_y_releases_bottom_observation() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let observer = SharedObserver {
        events: Rc::clone(&events),
    };
    let mut engine = FrameEngine::with_parts(
        NullRenderer::default(),
        HeuristicLabelMeasurer::default(),
        observer,
        FrameConfig::default(),
    )
    .expect("engine init");
    let input = input_for(FrameSize::default());
    engine.layout(&input).expect("first layout");

    engine
        .set_config(FrameConfig::default().with_only_y(true))
        .expect("valid config");
    let shrunk = engine
        .layout(&input)
        .expect("second layout")
        .expect("bottom labels no longer take space");

    assert_relative_eq!(shrunk.x_axis_height, 8.0);
    assert!(!engine.feedback().is_observing(AxisSide::Bottom));
    assert!(engine.surface().x_labels.is_none());
    assert!(engine.surface().x_grid.is_none());

    drop(engine);
    assert_eq!(
        *events.borrow(),
        vec![
            (AxisSide::Bottom, true),
            (AxisSide::Left, true),
            (AxisSide::Bottom, false),
            (AxisSide::Left, false),
        ]
    );
}

#[test]
fn bottom_observation_resumes_when_labels_return() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let observer = SharedObserver {
        events: Rc::clone(&events),
    };
    let mut engine = FrameEngine::with_parts(
        NullRenderer::default(),
        HeuristicLabelMeasurer::default(),
        observer,
        FrameConfig::default(),
    )
    .expect("engine init");
    let input = input_for(FrameSize::default());

    let measured = engine
        .layout(&input)
        .expect("first layout")
        .expect("initial frame size");
    assert_relative_eq!(measured.x_axis_height, 20.0, epsilon = 1e-9);

    engine
        .set_config(FrameConfig::default().with_only_y(true))
        .expect("valid config");
    let hidden = engine
        .layout(&input)
        .expect("second layout")
        .expect("bottom labels removed");
    assert_relative_eq!(hidden.x_axis_height, 8.0);

    engine.set_config(FrameConfig::default()).expect("valid config");
    let restored = engine
        .layout(&input)
        .expect("third layout")
        .expect("bottom labels measured again");
    assert_relative_eq!(restored.x_axis_height, measured.x_axis_height);
    assert!(engine.feedback().is_observing(AxisSide::Bottom));
    assert_eq!(
        *events.borrow(),
        vec![
            (AxisSide::Bottom, true),
            (AxisSide::Left, true),
            (AxisSide::Bottom, false),
            (AxisSide::Bottom, true),
        ]
    );
}

#[test]
fn non_finite_projections_are_skipped() {
    for edge in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
        let mut input = input_for(FrameSize::default());
        input.x_scale = Some(std::sync::Arc::new(EdgeScale { edge }));

        let mut engine = percent_engine();
        engine.layout(&input).expect("layout draws the finite ticks");

        let surface = engine.surface();
        let labels = &surface.x_labels.as_ref().expect("x labels").texts;
        let values: Vec<f64> = labels.iter().map(|text| text.value).collect();
        assert_eq!(values, vec![0.0, 5.0]);
        assert_eq!(labels[1].anchor, Some(TextAnchor::End));
        assert_eq!(surface.x_grid.as_ref().expect("x grid").lines.len(), 2);
    }
}

#[test]
fn failed_render_still_tracks_subscriptions() {
    let mut engine = FrameEngine::new(FailingRenderer, FrameConfig::default().with_only_y(true))
        .expect("engine init");

    assert!(engine.layout(&input_for(FrameSize::default())).is_err());
    assert!(engine.feedback().is_observing(AxisSide::Left));
    assert!(!engine.feedback().is_observing(AxisSide::Bottom));
    assert!(engine.last_pass().is_some());
}

#[test]
fn layout_pass_exposes_resolved_ticks() {
    let mut engine = percent_engine();
    assert!(engine.last_pass().is_none());
    engine.layout(&input_for(FrameSize::default())).expect("layout");

    let pass = engine.last_pass().expect("pass recorded");
    assert_eq!(pass.ticks.y, vec![0.0, 0.5, 1.0]);
    assert!(pass.visibility.y_labels);
}

#[derive(Debug)]
struct EdgeScale {
    edge: f64,
}

impl Scale for EdgeScale {
    fn domain(&self) -> (f64, f64) {
        (0.0, 10.0)
    }

    fn scale(&self, value: f64) -> Option<f64> {
        if value >= 10.0 {
            Some(self.edge)
        } else {
            Some(value * 20.0)
        }
    }
}

struct FailingRenderer;

impl Renderer for FailingRenderer {
    fn render(&mut self, _surface: &FrameSurface) -> FrameResult<()> {
        Err(FrameError::InvalidData("backend unavailable".to_owned()))
    }
}

struct SharedObserver {
    events: Rc<RefCell<Vec<(AxisSide, bool)>>>,
}

impl ResizeObserver for SharedObserver {
    fn observe(&mut self, side: AxisSide) {
        self.events.borrow_mut().push((side, true));
    }

    fn unobserve(&mut self, side: AxisSide) {
        self.events.borrow_mut().push((side, false));
    }
}

#[cfg(not(feature = "telemetry"))]
#[test]
fn tracing_init_is_a_noop_without_telemetry_feature() {
    assert!(!chart_frame::telemetry::init_default_tracing());
}
