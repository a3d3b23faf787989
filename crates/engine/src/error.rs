//! The module contains the errors the engine can return.
//!
//! Domain outcomes are plain variants returned to the caller:
//!
//! - [`InvalidFlow`] when a flow token is not `In` or `Out`.
//! - [`DuplicateName`] when the owner already uses the name for that kind.
//! - [`FlowMismatch`] when a category disagrees with its group's flow.
//! - [`NotFound`] when the record does not exist *for this owner*.
//! - [`HasDependents`] when a delete is blocked by child records.
//!
//! Infrastructure failures end up in [`Storage`], whose message never
//! carries the underlying cause.
//!
//!  [`InvalidFlow`]: EngineError::InvalidFlow
//!  [`DuplicateName`]: EngineError::DuplicateName
//!  [`FlowMismatch`]: EngineError::FlowMismatch
//!  [`NotFound`]: EngineError::NotFound
//!  [`HasDependents`]: EngineError::HasDependents
//!  [`Storage`]: EngineError::Storage
use std::fmt;

use thiserror::Error;

use crate::store::StoreError;

/// The kind of record an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Group,
    Category,
    Cash,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Category => "category",
            Self::Cash => "cash entry",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid flow: \"{0}\" is neither In nor Out")]
    InvalidFlow(String),
    #[error("invalid name: {0}")]
    InvalidName(String),
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("a {0} with this name already exists for this owner")]
    DuplicateName(EntityKind),
    #[error("the category flow does not match the flow of its group")]
    FlowMismatch,
    #[error("{0} not found")]
    NotFound(EntityKind),
    #[error("this {0} cannot be removed because dependents exist")]
    HasDependents(EntityKind),
    #[error("operation could not complete")]
    Storage(#[source] StoreError),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidFlow(a), Self::InvalidFlow(b)) => a == b,
            (Self::InvalidName(a), Self::InvalidName(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::DuplicateName(a), Self::DuplicateName(b)) => a == b,
            (Self::FlowMismatch, Self::FlowMismatch) => true,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::HasDependents(a), Self::HasDependents(b)) => a == b,
            (Self::Storage(a), Self::Storage(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
