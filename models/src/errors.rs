// models/src/errors.rs

pub use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("field '{0}' must not be empty")]
    EmptyField(&'static str),
    #[error("unknown appointment status: {0}")]
    UnknownStatus(String),
    #[error("room ids must not contain duplicates")]
    DuplicateRoomIds,
}

pub type ValidationResult<T> = Result<T, ValidationError>;
