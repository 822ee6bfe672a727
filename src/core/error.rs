use thiserror::Error;

#[derive(Error, Debug)]
pub enum NameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid nickname rule file: {0}")]
    InvalidRuleFile(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NameError>;
