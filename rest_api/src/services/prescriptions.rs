// rest_api/src/services/prescriptions.rs

use std::sync::Arc;

use chrono::Utc;
use models::medical::{Prescription, PrescriptionDto, PrescriptionPayload};
use storage::HospitalStore;
use tracing::info;

use crate::errors::ApiError;

pub struct PrescriptionService {
    store: Arc<dyn HospitalStore>,
}

impl PrescriptionService {
    pub fn new(store: Arc<dyn HospitalStore>) -> Self {
        PrescriptionService { store }
    }

    async fn check_refs(&self, payload: &PrescriptionPayload) -> Result<(), ApiError> {
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
        Ok(())
    }

    pub async fn get(&self, id: i32) -> Result<PrescriptionDto, ApiError> {
        let row = self
            .store
            .get_prescription(id)
            .await?
            .ok_or(ApiError::NotFound("prescription", id))?;
        Ok(PrescriptionDto::from(&row))
    }

    pub async fn list(&self) -> Result<Vec<PrescriptionDto>, ApiError> {
        let rows = self.store.list_prescriptions().await?;
        Ok(rows.iter().map(PrescriptionDto::from).collect())
    }

    pub async fn create(&self, payload: PrescriptionPayload) -> Result<PrescriptionDto, ApiError> {
        payload.validate()?;
        self.check_refs(&payload).await?;

        let now = Utc::now();
        let row = Prescription {
            id: 0,
            doctor_id: payload.doctor_id,
            patient_id: payload.patient_id,
            medication: payload.medication,
            dosage: payload.dosage,
            instructions: payload.instructions,
            date_issued: payload.date_issued,
            created_at: now,
            updated_at: now,
        };
        let id = self.store.insert_prescription(row).await?;
        info!(prescription_id = id, "created prescription");
        self.get(id).await
    }

    pub async fn update(
        &self,
        id: i32,
        payload: PrescriptionPayload,
    ) -> Result<PrescriptionDto, ApiError> {
        payload.validate()?;
        let existing = self
            .store
            .get_prescription(id)
            .await?
            .ok_or(ApiError::NotFound("prescription", id))?;
        self.check_refs(&payload).await?;

        let row = Prescription {
            id,
            doctor_id: payload.doctor_id,
            patient_id: payload.patient_id,
            medication: payload.medication,
            dosage: payload.dosage,
            instructions: payload.instructions,
            date_issued: payload.date_issued,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        if !self.store.update_prescription(row).await? {
            return Err(ApiError::NotFound("prescription", id));
        }
        self.get(id).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), ApiError> {
        if self.store.delete_prescription(id).await? {
            info!(prescription_id = id, "deleted prescription");
        }
        Ok(())
    }
}
