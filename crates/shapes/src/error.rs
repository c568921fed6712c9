use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShapeError {
    #[error("Invalid analysis configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load label font: {0}")]
    Font(String),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ShapeError>;
