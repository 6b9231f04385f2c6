use thiserror::Error;

#[derive(Debug, Error)]
pub enum GardenError {
    #[error("founding quote must contain at least one non-whitespace character")]
    EmptyInput,

    #[error("invalid garden configuration: {0}")]
    InvalidConfig(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
