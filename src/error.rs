use thiserror::Error;

use crate::entity::EntityId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuadtreeError {
    #[error("could not find entity {0} in tree to remove")]
    NotFound(EntityId),
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

pub type Result<T> = std::result::Result<T, QuadtreeError>;
