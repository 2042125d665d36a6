//! Common error types for tracklink

use thiserror::Error;

/// Common result type for tracklink operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across tracklink crates
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
