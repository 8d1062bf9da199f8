//! chart-frame: axis, grid and label layout for two-dimensional charts.
//!
//! The crate turns continuous scales and caller-supplied tick candidates into
//! pixel-positioned grid lines and labels, and feeds the measured label space
//! back to the host so the plot area can be resized until the layout settles.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{FrameConfig, FrameEngine, FrameInput};
pub use error::{FrameError, FrameResult};
