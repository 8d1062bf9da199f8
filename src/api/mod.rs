mod axis_layout;
mod frame_config;
mod frame_engine;
mod json_contract;
mod label_formatter;
mod measurement;
mod zero_line;

pub use axis_layout::{
    AxisLabelSpec, AxisLayoutEngine, FrameInput, FrameVisibility, LayoutPass, TICK_PADDING,
    TICK_SIZE_INNER, X_LABEL_ROTATION_DEG, X_LABELS_CLASS, X_TICK_OFFSET, Y_LABELS_CLASS,
};
pub use frame_config::{FrameConfig, GridConfig, GridConfigItem};
pub use frame_engine::{DEFAULT_MAX_SETTLE_PASSES, FrameEngine, SettleOutcome};
pub use json_contract::{FRAME_CONFIG_JSON_SCHEMA_V1, FrameConfigJsonContractV1};
pub use label_formatter::{
    LabelFormatter, LabelFormatterFn, format_default_label, format_percent_label,
};
pub use measurement::{
    FrameSizeListener, HeadlessResizeObserver, HeuristicLabelMeasurer, LabelGroupMeasurer,
    MeasurementFeedbackLoop, ResizeObserver, UNIT_Y_MARGIN,
};
pub use zero_line::{LineSegment, ZeroLine};
