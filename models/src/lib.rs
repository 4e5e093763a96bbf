pub mod errors;
pub mod medical;

pub use errors::{ValidationError, ValidationResult};
