use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Binary recording error: {0}")]
    Binary(#[from] bincode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid frame: {width}x{height} packed frame needs {expected} bytes, got {actual}")]
    InvalidFrame {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid frame geometry: width {width} is smaller than height {height}")]
    InvalidGeometry { width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;
