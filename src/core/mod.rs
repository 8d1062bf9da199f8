pub mod guide;
pub mod scale;
pub mod ticks;
pub mod types;

pub use guide::{DEFAULT_GUIDE_VALUE, is_in_domain, resolve_guide_value};
pub use scale::{LinearScale, Scale, ScaleHandle};
pub use ticks::{
    DEFAULT_GRID_TICKS, linear_tick_candidates, merge_guide_into_ticks, resolve_tick_set,
};
pub use types::{AxisPair, AxisSide, BoxSize, FrameSize, PlotSize};
