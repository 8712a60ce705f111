use thiserror::Error;

#[derive(Debug, Error)]
pub enum IhtError {
    #[error("Failed to parse factory configuration: {0}")]
    Config(#[from] toml::de::Error),
}

pub type IhtResult<T> = Result<T, IhtError>;
