//! Tab error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabError {
    #[error("Tab index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },
}
