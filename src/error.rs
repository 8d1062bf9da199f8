use thiserror::Error;

pub type FrameResult<T> = Result<T, FrameError>;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("invalid plot size: width={width}, height={height}")]
    InvalidPlotSize { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
