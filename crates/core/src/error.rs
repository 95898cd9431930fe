//! Construction-time configuration errors.
//!
//! Everything here is fail-fast and unrecoverable: a caller that receives a
//! `ConfigError` must not proceed with the half-built component. All
//! post-construction operations in this crate are total.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("zero or negative board height is not allowed")]
    InvalidBoardHeight,

    #[error("zero or negative board width is not allowed")]
    InvalidBoardWidth,

    #[error("an empty bounding box is not allowed")]
    EmptyBoundingBox,

    #[error("duplicate coordinates in the shape cells")]
    DuplicateCells,

    #[error("at least one shape template must be specified")]
    EmptyCatalog,
}
