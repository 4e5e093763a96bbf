// models/src/medical/staff.rs
use serde::{Deserialize, Serialize};

use crate::errors::{ValidationError, ValidationResult};

/// Fields shared by doctors and nurses. Embedded (serde-flattened) into the
/// concrete staff types rather than modelled as an inheritance hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaffProfile {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub qualifications: String,
    pub availability: String,
    pub department_id: i32,
}

impl StaffProfile {
    pub fn validate(&self) -> ValidationResult<()> {
        if self.first_name.trim().is_empty() {
            return Err(ValidationError::EmptyField("first_name"));
        }
        if self.last_name.trim().is_empty() {
            return Err(ValidationError::EmptyField("last_name"));
        }
        Ok(())
    }
}
