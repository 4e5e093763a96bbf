// rest_api/src/services/appointments.rs

use std::sync::Arc;

use chrono::Utc;
use models::medical::{Appointment, AppointmentDto, AppointmentPayload};
use storage::HospitalStore;
use tracing::info;

use crate::errors::ApiError;

pub struct AppointmentService {
    store: Arc<dyn HospitalStore>,
}

impl AppointmentService {
    pub fn new(store: Arc<dyn HospitalStore>) -> Self {
        AppointmentService { store }
    }

    async fn check_refs(&self, payload: &AppointmentPayload) -> Result<(), ApiError> {
        if self.store.get_doctor(payload.doctor_id).await?.is_none() {
            return Err(ApiError::Validation(format!(
                "doctor {} does not exist",
                payload.doctor_id
            )));
        }
        if self.store.get_patient(payload.patient_id).await?.is_none() {
            return Err(ApiError::Validation(format!(
                "patient {} does not exist",
                payload.patient_id
            )));
        }
        if let Some(room_id) = payload.room_id {
            if self.store.get_room(room_id).await?.is_none() {
                return Err(ApiError::Validation(format!(
                    "room {} does not exist",
                    room_id
                )));
            }
        }
        Ok(())
    }

    pub async fn get(&self, id: i32) -> Result<AppointmentDto, ApiError> {
        let row = self
            .store
            .get_appointment(id)
            .await?
            .ok_or(ApiError::NotFound("appointment", id))?;
        Ok(AppointmentDto::from(&row))
    }

    pub async fn list(&self) -> Result<Vec<AppointmentDto>, ApiError> {
        let rows = self.store.list_appointments().await?;
        Ok(rows.iter().map(AppointmentDto::from).collect())
    }

    pub async fn create(&self, payload: AppointmentPayload) -> Result<AppointmentDto, ApiError> {
        self.check_refs(&payload).await?;

        let now = Utc::now();
        let row = Appointment {
            id: 0,
            doctor_id: payload.doctor_id,
            patient_id: payload.patient_id,
            room_id: payload.room_id,
            scheduled_at: payload.scheduled_at,
            status: payload.status,
            created_at: now,
            updated_at: now,
        };
        let id = self.store.insert_appointment(row).await?;
        info!(appointment_id = id, "created appointment");
        self.get(id).await
    }

    pub async fn update(
        &self,
        id: i32,
        payload: AppointmentPayload,
    ) -> Result<AppointmentDto, ApiError> {
        let existing = self
            .store
            .get_appointment(id)
            .await?
            .ok_or(ApiError::NotFound("appointment", id))?;
        self.check_refs(&payload).await?;

        let row = Appointment {
            id,
            doctor_id: payload.doctor_id,
            patient_id: payload.patient_id,
            room_id: payload.room_id,
            scheduled_at: payload.scheduled_at,
            status: payload.status,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        if !self.store.update_appointment(row).await? {
            return Err(ApiError::NotFound("appointment", id));
        }
        self.get(id).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), ApiError> {
        if self.store.delete_appointment(id).await? {
            info!(appointment_id = id, "deleted appointment");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use models::medical::{
        AppointmentStatus, DepartmentPayload, DoctorPayload, PatientPayload, StaffProfile,
    };
    use storage::MemoryStorage;

    use crate::services::{DepartmentService, DoctorService, PatientService};

    async fn fixture() -> (Arc<dyn HospitalStore>, i32, i32) {
        let store: Arc<dyn HospitalStore> = Arc::new(MemoryStorage::new());
        let dept = DepartmentService::new(store.clone())
            .create(DepartmentPayload {
                name: "Clinic".to_string(),
                description: "".to_string(),
            })
            .await
            .unwrap();
        let doctor = DoctorService::new(store.clone())
            .create(DoctorPayload {
                profile: StaffProfile {
                    first_name: "Perry".to_string(),
                    last_name: "Cox".to_string(),
                    phone: "555-0104".to_string(),
                    email: "cox@example.com".to_string(),
                    qualifications: "MD".to_string(),
                    availability: "Mon-Fri".to_string(),
                    department_id: dept.id,
                },
                specialty: "Internal Medicine".to_string(),
                license_number: "L-9".to_string(),
            })
            .await
            .unwrap();
        let patient = PatientService::new(store.clone())
            .create(PatientPayload {
                user_id: None,
                first_name: "Harvey".to_string(),
                last_name: "Corman".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(1960, 1, 15).unwrap(),
                gender: "Male".to_string(),
                address: None,
                phone: None,
                email: None,
            })
            .await
            .unwrap();
        (store, doctor.id, patient.id)
    }

    #[tokio::test]
    async fn create_and_cancel() {
        let (store, doctor_id, patient_id) = fixture().await;
        let svc = AppointmentService::new(store);

        let created = svc
            .create(AppointmentPayload {
                doctor_id,
                patient_id,
                room_id: None,
                scheduled_at: Utc::now(),
                status: AppointmentStatus::Scheduled,
            })
            .await
            .unwrap();
        assert_eq!(created.status, AppointmentStatus::Scheduled);

        let cancelled = svc
            .update(
                created.id,
                AppointmentPayload {
                    doctor_id,
                    patient_id,
                    room_id: None,
                    scheduled_at: created.scheduled_at,
                    status: AppointmentStatus::Cancelled,
                },
            )
            .await
            .unwrap();
        assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
        assert_eq!(cancelled.created_at, created.created_at);
    }

    #[tokio::test]
    async fn unknown_doctor_or_patient_is_rejected() {
        let (store, doctor_id, patient_id) = fixture().await;
        let svc = AppointmentService::new(store);

        let bad_doctor = svc
            .create(AppointmentPayload {
                doctor_id: 404,
                patient_id,
                room_id: None,
                scheduled_at: Utc::now(),
                status: AppointmentStatus::Scheduled,
            })
            .await;
        assert!(matches!(bad_doctor.unwrap_err(), ApiError::Validation(_)));

        let bad_patient = svc
            .create(AppointmentPayload {
                doctor_id,
                patient_id: 404,
                room_id: None,
                scheduled_at: Utc::now(),
                status: AppointmentStatus::Scheduled,
            })
            .await;
        assert!(matches!(bad_patient.unwrap_err(), ApiError::Validation(_)));
        assert!(svc.list().await.unwrap().is_empty());
    }
}
