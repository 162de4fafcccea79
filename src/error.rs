use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("actual case data was requested but none was supplied")]
    MissingCaseData,

    #[error("invalid ISO date: {0:?}")]
    InvalidDate(String),

    #[error("series has {values} values but only {timestamps} timestamps")]
    SeriesLengthMismatch { values: usize, timestamps: usize },

    #[error("invalid chart configuration: {0}")]
    Config(#[from] serde_json::Error),
}
