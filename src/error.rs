use thiserror::Error;

#[derive(Error, Debug)]
pub enum StampinatorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Schema generation error: {0}")]
    SchemaGeneration(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for StampinatorError {
    fn from(err: toml::de::Error) -> Self {
        StampinatorError::Config(format!("TOML parse error: {}", err))
    }
}

impl From<toml::ser::Error> for StampinatorError {
    fn from(err: toml::ser::Error) -> Self {
        StampinatorError::Serialization(format!("TOML serialization error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, StampinatorError>;
