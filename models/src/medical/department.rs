// models/src/medical/department.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ValidationError, ValidationResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentPayload {
    pub name: String,
    pub description: String,
}

impl DepartmentPayload {
    pub fn validate(&self) -> ValidationResult<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyField("name"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DepartmentDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Department> for DepartmentDto {
    fn from(d: &Department) -> Self {
        DepartmentDto {
            id: d.id,
            name: d.name.clone(),
            description: d.description.clone(),
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}
