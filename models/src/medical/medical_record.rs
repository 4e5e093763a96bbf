// models/src/medical/medical_record.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ValidationError, ValidationResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub id: i32,
    pub patient_id: i32,
    pub doctor_id: Option<i32>,
    pub nurse_id: Option<i32>,
    pub prescription_id: Option<i32>,
    pub record_date: DateTime<Utc>,
    pub details: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalRecordPayload {
    pub patient_id: i32,
    pub doctor_id: Option<i32>,
    pub nurse_id: Option<i32>,
    pub prescription_id: Option<i32>,
    pub record_date: DateTime<Utc>,
    pub details: String,
}

impl MedicalRecordPayload {
    pub fn validate(&self) -> ValidationResult<()> {
        if self.details.trim().is_empty() {
            return Err(ValidationError::EmptyField("details"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicalRecordDto {
    pub id: i32,
    pub patient_id: i32,
    pub doctor_id: Option<i32>,
    pub nurse_id: Option<i32>,
    pub prescription_id: Option<i32>,
    pub record_date: DateTime<Utc>,
    pub details: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&MedicalRecord> for MedicalRecordDto {
    fn from(r: &MedicalRecord) -> Self {
        MedicalRecordDto {
            id: r.id,
            patient_id: r.patient_id,
            doctor_id: r.doctor_id,
            nurse_id: r.nurse_id,
            prescription_id: r.prescription_id,
            record_date: r.record_date,
            details: r.details.clone(),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}
