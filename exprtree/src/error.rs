use thiserror::Error;

use crate::expr::path::Path;

#[derive(Debug, Error)]
pub enum ExprError {
    #[error("Path {path:?} does not resolve within the expression")]
    InvalidPath { path: Path },

    #[error("Unrecognized expression variant tag {0}")]
    UnrecognizedVariant(u8),

    #[error("Invalid expression construction: {0}")]
    ConstructionPrecondition(String),

    #[error("Failed to parse expression:\n{}", .0.join("\n"))]
    Parse(Vec<String>),

    #[error("Failed to parse configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ExprResult<T> = Result<T, ExprError>;
