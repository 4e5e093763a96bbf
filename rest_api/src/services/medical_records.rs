// rest_api/src/services/medical_records.rs

use std::sync::Arc;

use chrono::Utc;
use models::medical::{MedicalRecord, MedicalRecordDto, MedicalRecordPayload};
use storage::HospitalStore;
use tracing::info;

use crate::errors::ApiError;

pub struct MedicalRecordService {
    store: Arc<dyn HospitalStore>,
}

impl MedicalRecordService {
    pub fn new(store: Arc<dyn HospitalStore>) -> Self {
        MedicalRecordService { store }
    }

    async fn check_refs(&self, payload: &MedicalRecordPayload) -> Result<(), ApiError> {
        if self.store.get_patient(payload.patient_id).await?.is_none() {
            return Err(ApiError::Validation(format!(
                "patient {} does not exist",
                payload.patient_id
            )));
        }
        if let Some(doctor_id) = payload.doctor_id {
            if self.store.get_doctor(doctor_id).await?.is_none() {
                return Err(ApiError::Validation(format!(
                    "doctor {} does not exist",
                    doctor_id
                )));
            }
        }
        if let Some(nurse_id) = payload.nurse_id {
            if self.store.get_nurse(nurse_id).await?.is_none() {
                return Err(ApiError::Validation(format!(
                    "nurse {} does not exist",
                    nurse_id
                )));
            }
        }
        if let Some(prescription_id) = payload.prescription_id {
            if self
                .store
                .get_prescription(prescription_id)
                .await?
                .is_none()
            {
                return Err(ApiError::Validation(format!(
                    "prescription {} does not exist",
                    prescription_id
                )));
            }
        }
        Ok(())
    }

    pub async fn get(&self, id: i32) -> Result<MedicalRecordDto, ApiError> {
        let row = self
            .store
            .get_medical_record(id)
            .await?
            .ok_or(ApiError::NotFound("medical record", id))?;
        Ok(MedicalRecordDto::from(&row))
    }

    pub async fn list(&self) -> Result<Vec<MedicalRecordDto>, ApiError> {
        let rows = self.store.list_medical_records().await?;
        Ok(rows.iter().map(MedicalRecordDto::from).collect())
    }

    pub async fn create(
        &self,
        payload: MedicalRecordPayload,
    ) -> Result<MedicalRecordDto, ApiError> {
        payload.validate()?;
        self.check_refs(&payload).await?;

        let now = Utc::now();
        let row = MedicalRecord {
            id: 0,
            patient_id: payload.patient_id,
            doctor_id: payload.doctor_id,
            nurse_id: payload.nurse_id,
            prescription_id: payload.prescription_id,
            record_date: payload.record_date,
            details: payload.details,
            created_at: now,
            updated_at: now,
        };
        let id = self.store.insert_medical_record(row).await?;
        info!(record_id = id, "created medical record");
        self.get(id).await
    }

    pub async fn update(
        &self,
        id: i32,
        payload: MedicalRecordPayload,
    ) -> Result<MedicalRecordDto, ApiError> {
        payload.validate()?;
        let existing = self
            .store
            .get_medical_record(id)
            .await?
            .ok_or(ApiError::NotFound("medical record", id))?;
        self.check_refs(&payload).await?;

        let row = MedicalRecord {
            id,
            patient_id: payload.patient_id,
            doctor_id: payload.doctor_id,
            nurse_id: payload.nurse_id,
            prescription_id: payload.prescription_id,
            record_date: payload.record_date,
            details: payload.details,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        if !self.store.update_medical_record(row).await? {
            return Err(ApiError::NotFound("medical record", id));
        }
        self.get(id).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), ApiError> {
        if self.store.delete_medical_record(id).await? {
            info!(record_id = id, "deleted medical record");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use models::medical::PatientPayload;
    use storage::MemoryStorage;

    use crate::services::PatientService;

    async fn fixture() -> (Arc<dyn HospitalStore>, i32) {
        let store: Arc<dyn HospitalStore> = Arc::new(MemoryStorage::new());
        let patient = PatientService::new(store.clone())
            .create(PatientPayload {
                user_id: None,
                first_name: "Harold".to_string(),
                last_name: "Abbott".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(1952, 2, 9).unwrap(),
                gender: "Male".to_string(),
                address: None,
                phone: None,
                email: None,
            })
            .await
            .unwrap();
        (store, patient.id)
    }

    fn payload(patient_id: i32) -> MedicalRecordPayload {
        MedicalRecordPayload {
            patient_id,
            doctor_id: None,
            nurse_id: None,
            prescription_id: None,
            record_date: Utc::now(),
            details: "Admitted with chest pain".to_string(),
        }
    }

    #[tokio::test]
    async fn round_trip_update_and_idempotent_delete() {
        let (store, patient_id) = fixture().await;
        let svc = MedicalRecordService::new(store);

        let created = svc.create(payload(patient_id)).await.unwrap();
        let fetched = svc.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.patient_id, patient_id);
        assert_eq!(fetched.doctor_id, None);

        let mut changed = payload(patient_id);
        changed.details = "Discharged after observation".to_string();
        let updated = svc.update(created.id, changed).await.unwrap();
        assert_eq!(updated.details, "Discharged after observation");
        assert_eq!(updated.created_at, created.created_at);

        svc.delete(created.id).await.unwrap();
        assert!(matches!(
            svc.get(created.id).await.unwrap_err(),
            ApiError::NotFound("medical record", _)
        ));
        svc.delete(created.id).await.unwrap();
    }

    #[tokio::test]
    async fn create_rejects_unknown_refs_and_writes_nothing() {
        let (store, patient_id) = fixture().await;
        let svc = MedicalRecordService::new(store);

        assert!(matches!(
            svc.create(payload(99)).await.unwrap_err(),
            ApiError::Validation(_)
        ));

        let mut bad_prescription = payload(patient_id);
        bad_prescription.prescription_id = Some(42);
        assert!(matches!(
            svc.create(bad_prescription).await.unwrap_err(),
            ApiError::Validation(_)
        ));

        assert!(svc.list().await.unwrap().is_empty());
    }
}
