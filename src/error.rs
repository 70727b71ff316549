use thiserror::Error;

#[derive(Error, Debug)]
pub enum InsightsError {
    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The input is not table-shaped at all.
    #[error("Input is not a table: {0}")]
    StructuralInput(String),

    #[error("Store error: {message}")]
    Store { message: String },
}

pub type Result<T> = std::result::Result<T, InsightsError>;
