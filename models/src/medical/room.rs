// models/src/medical/room.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ValidationError, ValidationResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: i32,
    pub room_number: String,
    pub room_type: String, // e.g., "Ward", "ICU", "Operating"
    pub occupied: bool,    // derived: true iff current_patient_id is set
    pub current_patient_id: Option<i32>,
    pub department_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The occupied flag is not client-supplied; it is recomputed from
/// `current_patient_id` on every write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomPayload {
    pub room_number: String,
    pub room_type: String,
    pub current_patient_id: Option<i32>,
    pub department_id: i32,
}

impl RoomPayload {
    pub fn validate(&self) -> ValidationResult<()> {
        if self.room_number.trim().is_empty() {
            return Err(ValidationError::EmptyField("room_number"));
        }
        if self.room_type.trim().is_empty() {
            return Err(ValidationError::EmptyField("room_type"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomDto {
    pub id: i32,
    pub room_number: String,
    pub room_type: String,
    pub occupied: bool,
    pub current_patient_id: Option<i32>,
    pub department_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Room> for RoomDto {
    fn from(r: &Room) -> Self {
        RoomDto {
            id: r.id,
            room_number: r.room_number.clone(),
            room_type: r.room_type.clone(),
            occupied: r.occupied,
            current_patient_id: r.current_patient_id,
            department_id: r.department_id,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}
