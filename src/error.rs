use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum WheelError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] PartitionError),
    #[error("Invalid section index {index} (wheel has {count} sections)")]
    InvalidIndex { index: usize, count: usize },
}

/// Ways a data source can fail to tile the circle.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PartitionError {
    #[error("data source returned no sections")]
    Empty,
    #[error("section {index} has non-positive radius {radius}")]
    NonPositiveRadius { index: usize, radius: f64 },
    #[error("section {index} has a non-finite angle or radius")]
    NonFinite { index: usize },
    #[error("section at position {position} reports index {index}")]
    IndexMismatch { position: usize, index: usize },
    #[error("midpoint of section {index} lies outside its arc")]
    MidpointOutOfBounds { index: usize },
    #[error("gap or overlap between sections {before} and {after}")]
    Discontinuous { before: usize, after: usize },
    #[error("sections cover {covered} radians instead of a full turn")]
    IncompleteCoverage { covered: f64 },
}
