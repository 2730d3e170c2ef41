//! Core error types

use thiserror::Error;

use segment_selection::SelectionError;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Tab error: {0}")]
    Tab(#[from] segment_tabs::TabError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<SelectionError> for CoreError {
    fn from(err: SelectionError) -> Self {
        match err {
            SelectionError::Tab(e) => CoreError::Tab(e),
        }
    }
}
