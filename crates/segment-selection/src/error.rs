//! Selection error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SelectionError {
    #[error("Tab error: {0}")]
    Tab(#[from] segment_tabs::TabError),
}
