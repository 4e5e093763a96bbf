// rest_api/src/services/patients.rs

use std::sync::Arc;

use chrono::Utc;
use models::medical::{Patient, PatientDto, PatientPayload};
use storage::HospitalStore;
use tracing::info;

use crate::errors::ApiError;

pub struct PatientService {
    store: Arc<dyn HospitalStore>,
}

impl PatientService {
    pub fn new(store: Arc<dyn HospitalStore>) -> Self {
        PatientService { store }
    }

    async fn check_refs(&self, payload: &PatientPayload) -> Result<(), ApiError> {
        if let Some(user_id) = payload.user_id {
            if self.store.get_user(user_id).await?.is_none() {
                return Err(ApiError::Validation(format!(
                    "user {} does not exist",
                    user_id
                )));
            }
        }
        Ok(())
    }

    pub async fn get(&self, id: i32) -> Result<PatientDto, ApiError> {
        let row = self
            .store
            .get_patient(id)
            .await?
            .ok_or(ApiError::NotFound("patient", id))?;
        Ok(PatientDto::from(&row))
    }

    pub async fn list(&self) -> Result<Vec<PatientDto>, ApiError> {
        let rows = self.store.list_patients().await?;
        Ok(rows.iter().map(PatientDto::from).collect())
    }

    pub async fn create(&self, payload: PatientPayload) -> Result<PatientDto, ApiError> {
        payload.validate()?;
        self.check_refs(&payload).await?;

        let now = Utc::now();
        let row = Patient {
            id: 0,
            user_id: payload.user_id,
            first_name: payload.first_name,
            last_name: payload.last_name,
            date_of_birth: payload.date_of_birth,
            gender: payload.gender,
            address: payload.address,
            phone: payload.phone,
            email: payload.email,
            created_at: now,
            updated_at: now,
        };
        let id = self.store.insert_patient(row).await?;
        info!(patient_id = id, "created patient");
        self.get(id).await
    }

    /// Full-field overwrite; only the timestamps are carried over.
    pub async fn update(&self, id: i32, payload: PatientPayload) -> Result<PatientDto, ApiError> {
        payload.validate()?;
        let existing = self
            .store
            .get_patient(id)
            .await?
            .ok_or(ApiError::NotFound("patient", id))?;
        self.check_refs(&payload).await?;

        let row = Patient {
            id,
            user_id: payload.user_id,
            first_name: payload.first_name,
            last_name: payload.last_name,
            date_of_birth: payload.date_of_birth,
            gender: payload.gender,
            address: payload.address,
            phone: payload.phone,
            email: payload.email,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        if !self.store.update_patient(row).await? {
            return Err(ApiError::NotFound("patient", id));
        }
        self.get(id).await
    }

    /// Idempotent: deleting an absent patient is a successful no-op.
    pub async fn delete(&self, id: i32) -> Result<(), ApiError> {
        if self.store.delete_patient(id).await? {
            info!(patient_id = id, "deleted patient");
        }
        Ok(())
    }
}
