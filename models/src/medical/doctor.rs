// models/src/medical/doctor.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ValidationError, ValidationResult};
use crate::medical::staff::StaffProfile;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i32,
    #[serde(flatten)]
    pub profile: StaffProfile,
    pub specialty: String,
    pub license_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorPayload {
    #[serde(flatten)]
    pub profile: StaffProfile,
    pub specialty: String,
    pub license_number: String,
}

impl DoctorPayload {
    pub fn validate(&self) -> ValidationResult<()> {
        self.profile.validate()?;
        if self.specialty.trim().is_empty() {
            return Err(ValidationError::EmptyField("specialty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoctorDto {
    pub id: i32,
    #[serde(flatten)]
    pub profile: StaffProfile,
    pub specialty: String,
    pub license_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Doctor> for DoctorDto {
    fn from(d: &Doctor) -> Self {
        DoctorDto {
            id: d.id,
            profile: d.profile.clone(),
            specialty: d.specialty.clone(),
            license_number: d.license_number.clone(),
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}
