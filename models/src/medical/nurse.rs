// models/src/medical/nurse.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationResult;
use crate::medical::staff::StaffProfile;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nurse {
    pub id: i32,
    #[serde(flatten)]
    pub profile: StaffProfile,
    pub license_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NursePayload {
    #[serde(flatten)]
    pub profile: StaffProfile,
    pub license_number: String,
}

impl NursePayload {
    pub fn validate(&self) -> ValidationResult<()> {
        self.profile.validate()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NurseDto {
    pub id: i32,
    #[serde(flatten)]
    pub profile: StaffProfile,
    pub license_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Nurse> for NurseDto {
    fn from(n: &Nurse) -> Self {
        NurseDto {
            id: n.id,
            profile: n.profile.clone(),
            license_number: n.license_number.clone(),
            created_at: n.created_at,
            updated_at: n.updated_at,
        }
    }
}
