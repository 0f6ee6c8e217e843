use thiserror::Error;

#[derive(Debug, Error)]
pub enum BinFitError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid {kind} '{name}': dimensions must be positive (got {width}x{height})")]
    InvalidDimensions {
        kind: &'static str,
        name: String,
        width: u32,
        height: u32,
    },
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("No bins to pack into")]
    Empty,
}

pub type Result<T> = std::result::Result<T, BinFitError>;
