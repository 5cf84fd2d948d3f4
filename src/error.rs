//! Error types for the uiset driver

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Connection closed while waiting for the {0} response")]
    ConnectionClosed(&'static str),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

pub type Result<T> = std::result::Result<T, DriverError>;
