use thiserror::Error;

#[derive(Error, Debug)]
pub enum StrokeForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Invalid point {point} in stroke {stroke}: ({x}, {y})")]
    InvalidPoint {
        stroke: usize,
        point: usize,
        x: f32,
        y: f32,
    },

    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),
}

pub type SfResult<T> = Result<T, StrokeForgeError>;
