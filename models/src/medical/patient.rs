// models/src/medical/patient.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ValidationError, ValidationResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: i32,
    pub user_id: Option<i32>, // Links to an existing User (if patient is also a user)
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String, // e.g., "Male", "Female", "Other"
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or fully overwriting a patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientPayload {
    pub user_id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl PatientPayload {
    pub fn validate(&self) -> ValidationResult<()> {
        if self.first_name.trim().is_empty() {
            return Err(ValidationError::EmptyField("first_name"));
        }
        if self.last_name.trim().is_empty() {
            return Err(ValidationError::EmptyField("last_name"));
        }
        if self.gender.trim().is_empty() {
            return Err(ValidationError::EmptyField("gender"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientDto {
    pub id: i32,
    pub user_id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Patient> for PatientDto {
    fn from(p: &Patient) -> Self {
        PatientDto {
            id: p.id,
            user_id: p.user_id,
            first_name: p.first_name.clone(),
            last_name: p.last_name.clone(),
            date_of_birth: p.date_of_birth,
            gender: p.gender.clone(),
            address: p.address.clone(),
            phone: p.phone.clone(),
            email: p.email.clone(),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}
