// models/src/medical/appointment.rs
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ValidationError, ValidationResult};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no_show",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for AppointmentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> ValidationResult<Self> {
        match s {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "no_show" => Ok(AppointmentStatus::NoShow),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i32,
    pub doctor_id: i32,
    pub patient_id: i32,
    pub room_id: Option<i32>,
    pub scheduled_at: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentPayload {
    pub doctor_id: i32,
    pub patient_id: i32,
    pub room_id: Option<i32>,
    pub scheduled_at: DateTime<Utc>,
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppointmentDto {
    pub id: i32,
    pub doctor_id: i32,
    pub patient_id: i32,
    pub room_id: Option<i32>,
    pub scheduled_at: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Appointment> for AppointmentDto {
    fn from(a: &Appointment) -> Self {
        AppointmentDto {
            id: a.id,
            doctor_id: a.doctor_id,
            patient_id: a.patient_id,
            room_id: a.room_id,
            scheduled_at: a.scheduled_at,
            status: a.status,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AppointmentStatus;
    use crate::errors::ValidationError;
    use core::str::FromStr;

    #[test]
    fn should_parse_known_statuses() {
        assert_eq!(
            AppointmentStatus::from_str("scheduled").unwrap(),
            AppointmentStatus::Scheduled
        );
        assert_eq!(
            AppointmentStatus::from_str("no_show").unwrap(),
            AppointmentStatus::NoShow
        );
    }

    #[test]
    fn should_reject_unknown_status() {
        let err = AppointmentStatus::from_str("pending").unwrap_err();
        assert_eq!(err, ValidationError::UnknownStatus("pending".to_string()));
    }

    #[test]
    fn status_serde_round_trip() {
        let json = serde_json::to_string(&AppointmentStatus::NoShow).unwrap();
        assert_eq!(json, "\"no_show\"");
        let back: AppointmentStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AppointmentStatus::NoShow);
    }
}
