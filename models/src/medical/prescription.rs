// models/src/medical/prescription.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ValidationError, ValidationResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    pub id: i32,
    pub doctor_id: i32,
    pub patient_id: i32,
    pub medication: String,
    pub dosage: String, // e.g., "500mg twice daily"
    pub instructions: String,
    pub date_issued: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrescriptionPayload {
    pub doctor_id: i32,
    pub patient_id: i32,
    pub medication: String,
    pub dosage: String,
    pub instructions: String,
    pub date_issued: NaiveDate,
}

impl PrescriptionPayload {
    pub fn validate(&self) -> ValidationResult<()> {
        if self.medication.trim().is_empty() {
            return Err(ValidationError::EmptyField("medication"));
        }
        if self.dosage.trim().is_empty() {
            return Err(ValidationError::EmptyField("dosage"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrescriptionDto {
    pub id: i32,
    pub doctor_id: i32,
    pub patient_id: i32,
    pub medication: String,
    pub dosage: String,
    pub instructions: String,
    pub date_issued: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Prescription> for PrescriptionDto {
    fn from(p: &Prescription) -> Self {
        PrescriptionDto {
            id: p.id,
            doctor_id: p.doctor_id,
            patient_id: p.patient_id,
            medication: p.medication.clone(),
            dosage: p.dosage.clone(),
            instructions: p.instructions.clone(),
            date_issued: p.date_issued,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}
