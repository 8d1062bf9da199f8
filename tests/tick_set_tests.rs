use chart_frame::api::{AxisLayoutEngine, FrameConfig, FrameInput, GridConfig, GridConfigItem};
use chart_frame::core::{
    AxisPair, LinearScale, PlotSize, linear_tick_candidates, resolve_tick_set,
};

fn guided_config() -> FrameConfig {
    FrameConfig::default().with_grid(GridConfig::new(
        GridConfigItem::default().with_guide(true),
        GridConfigItem::default().with_guide(true),
    ))
}

#[test]
fn guide_zero_is_merged_into_symmetric_domain() {
    let ticks = resolve_tick_set(&[-10.0, -5.0, 5.0, 10.0], (-10.0, 10.0), true, 0.0);
    assert_eq!(ticks, vec![-10.0, -5.0, 0.0, 5.0, 10.0]);
}

#[test]
fn non_zero_guide_value_is_supported() {
    let ticks = resolve_tick_set(&[0.0, 50.0, 100.0], (0.0, 100.0), true, 75.0);
    assert_eq!(ticks, vec![0.0, 50.0, 75.0, 100.0]);
}

#[test]
fn each_axis_uses_its_own_domain_for_the_guide() {
    let plot = PlotSize::new(200.0, 100.0);
    let x = LinearScale::new((-10.0, 10.0), (0.0, plot.width)).expect("x scale");
    let y = LinearScale::new((5.0, 15.0), (plot.height, 0.0)).expect("y scale");
    let input = FrameInput::new(plot)
        .with_x_scale(x.into_handle(), vec![-10.0, 10.0])
        .with_y_scale(y.into_handle(), vec![5.0, 10.0, 15.0]);

    let config = guided_config();
    let formatters = AxisPair::default();
    let ticks = AxisLayoutEngine::new(&config, &formatters).resolve_ticks(&input);

    assert_eq!(ticks.x, vec![-10.0, 0.0, 10.0]);
    assert_eq!(ticks.y, vec![5.0, 10.0, 15.0]);
}

#[test]
fn guide_flag_is_per_axis() {
    let plot = PlotSize::new(200.0, 100.0);
    let x = LinearScale::new((-1.0, 1.0), (0.0, plot.width)).expect("x scale");
    let y = LinearScale::new((-1.0, 1.0), (plot.height, 0.0)).expect("y scale");
    let input = FrameInput::new(plot)
        .with_x_scale(x.into_handle(), vec![-1.0, 1.0])
        .with_y_scale(y.into_handle(), vec![-1.0, 1.0]);

    let config = FrameConfig::default().with_grid(GridConfig::new(
        GridConfigItem::default(),
        GridConfigItem::default().with_guide(true),
    ));
    let formatters = AxisPair::default();
    let ticks = AxisLayoutEngine::new(&config, &formatters).resolve_ticks(&input);

    assert_eq!(ticks.x, vec![-1.0, 1.0]);
    assert_eq!(ticks.y, vec![-1.0, 0.0, 1.0]);
}

#[test]
fn axis_without_scale_keeps_candidates_without_guide() {
    let input = FrameInput {
        x_tick_values: vec![3.0, 1.0, 2.0],
        ..FrameInput::new(PlotSize::new(100.0, 100.0))
    };
    let config = guided_config();
    let formatters = AxisPair::default();
    let ticks = AxisLayoutEngine::new(&config, &formatters).resolve_ticks(&input);

    assert_eq!(ticks.x, vec![1.0, 2.0, 3.0]);
    assert!(ticks.y.is_empty());
}

#[test]
fn grid_ticks_hint_controls_generated_candidates() {
    let coarse = GridConfigItem::default().with_grid_ticks(2);
    let fine = GridConfigItem::default().with_grid_ticks(10);

    assert_eq!(coarse.tick_candidates((0.0, 100.0)), vec![0.0, 50.0, 100.0]);
    assert_eq!(fine.tick_candidates((0.0, 100.0)).len(), 11);
    assert_eq!(
        GridConfigItem::default().tick_candidates((0.0, 1.0)),
        linear_tick_candidates((0.0, 1.0), 5)
    );
}

#[test]
fn generated_candidates_stay_inside_domain() {
    let ticks = linear_tick_candidates((0.3, 9.7), 5);
    assert_eq!(ticks, vec![2.0, 4.0, 6.0, 8.0]);
}
