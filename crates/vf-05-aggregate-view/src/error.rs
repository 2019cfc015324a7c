//! Error types for the Aggregate View

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("Page size must be at least 1")]
    ZeroPageSize,
}

pub type ViewResult<T> = Result<T, ViewError>;
