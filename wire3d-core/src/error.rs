//! Error types for the wireframe viewer
//!
//! The projection math itself never fails: degenerate parameters come out
//! as NaN or infinity in the projected points. Errors only arise where the
//! core meets files, scripts and its fixed-size line buffer.

use thiserror::Error;

/// Result type alias for viewer operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Reading a configuration or script file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file was not valid TOML for [`crate::config::Config`]
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// A configuration value parsed but is out of range
    #[error("Invalid configuration value for {field}: {message}")]
    InvalidConfig { field: &'static str, message: String },

    /// An input script line could not be parsed
    #[error("Script error on line {line}: {message}")]
    Script { line: usize, message: String },

    /// A frame tried to queue more vertices than the line buffer holds
    #[error("Line buffer full: capacity is {capacity} vertices")]
    CapacityExceeded { capacity: usize },
}

impl Error {
    pub fn script(line: usize, message: impl Into<String>) -> Self {
        Self::Script {
            line,
            message: message.into(),
        }
    }
}
