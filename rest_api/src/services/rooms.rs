// rest_api/src/services/rooms.rs

use std::sync::Arc;

use chrono::Utc;
use models::medical::{Room, RoomDto, RoomPayload};
use storage::HospitalStore;
use tracing::info;

use crate::errors::ApiError;

pub struct RoomService {
    store: Arc<dyn HospitalStore>,
}

impl RoomService {
    pub fn new(store: Arc<dyn HospitalStore>) -> Self {
        RoomService { store }
    }

    async fn check_refs(&self, payload: &RoomPayload) -> Result<(), ApiError> {
        if self
            .store
            .get_department(payload.department_id)
            .await?
            .is_none()
        {
            return Err(ApiError::Validation(format!(
                "department {} does not exist",
                payload.department_id
            )));
        }
        if let Some(patient_id) = payload.current_patient_id {
            if self.store.get_patient(patient_id).await?.is_none() {
                return Err(ApiError::Validation(format!(
                    "patient {} does not exist",
                    patient_id
                )));
            }
        }
        Ok(())
    }

    pub async fn get(&self, id: i32) -> Result<RoomDto, ApiError> {
        let row = self
            .store
            .get_room(id)
            .await?
            .ok_or(ApiError::NotFound("room", id))?;
        Ok(RoomDto::from(&row))
    }

    pub async fn list(&self) -> Result<Vec<RoomDto>, ApiError> {
        let rows = self.store.list_rooms().await?;
        Ok(rows.iter().map(RoomDto::from).collect())
    }

    pub async fn create(&self, payload: RoomPayload) -> Result<RoomDto, ApiError> {
        payload.validate()?;
        self.check_refs(&payload).await?;

        let now = Utc::now();
        let row = Room {
            id: 0,
            room_number: payload.room_number,
            room_type: payload.room_type,
            occupied: payload.current_patient_id.is_some(),
            current_patient_id: payload.current_patient_id,
            department_id: payload.department_id,
            created_at: now,
            updated_at: now,
        };
        let id = self.store.insert_room(row).await?;
        info!(room_id = id, "created room");
        self.get(id).await
    }

    pub async fn update(&self, id: i32, payload: RoomPayload) -> Result<RoomDto, ApiError> {
        payload.validate()?;
        let existing = self
            .store
            .get_room(id)
            .await?
            .ok_or(ApiError::NotFound("room", id))?;
        self.check_refs(&payload).await?;

        let row = Room {
            id,
            room_number: payload.room_number,
            room_type: payload.room_type,
            occupied: payload.current_patient_id.is_some(),
            current_patient_id: payload.current_patient_id,
            department_id: payload.department_id,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        if !self.store.update_room(row).await? {
            return Err(ApiError::NotFound("room", id));
        }
        self.get(id).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), ApiError> {
        if self.store.delete_room(id).await? {
            info!(room_id = id, "deleted room");
        }
        Ok(())
    }
}
