// rest_api/src/services/nurses.rs

use std::sync::Arc;

use chrono::Utc;
use models::medical::{Nurse, NurseDto, NursePayload, RoomDto};
use storage::HospitalStore;
use tracing::info;

use crate::errors::ApiError;
use crate::services::check_rooms_exist;

pub struct NurseService {
    store: Arc<dyn HospitalStore>,
}

impl NurseService {
    pub fn new(store: Arc<dyn HospitalStore>) -> Self {
        NurseService { store }
    }

    async fn check_refs(&self, payload: &NursePayload) -> Result<(), ApiError> {
        let department_id = payload.profile.department_id;
        if self.store.get_department(department_id).await?.is_none() {
            return Err(ApiError::Validation(format!(
                "department {} does not exist",
                department_id
            )));
        }
        Ok(())
    }

    pub async fn get(&self, id: i32) -> Result<NurseDto, ApiError> {
        let row = self
            .store
            .get_nurse(id)
            .await?
            .ok_or(ApiError::NotFound("nurse", id))?;
        Ok(NurseDto::from(&row))
    }

    pub async fn list(&self) -> Result<Vec<NurseDto>, ApiError> {
        let rows = self.store.list_nurses().await?;
        Ok(rows.iter().map(NurseDto::from).collect())
    }

    pub async fn create(&self, payload: NursePayload) -> Result<NurseDto, ApiError> {
        payload.validate()?;
        self.check_refs(&payload).await?;

        let now = Utc::now();
        let row = Nurse {
            id: 0,
            profile: payload.profile,
            license_number: payload.license_number,
            created_at: now,
            updated_at: now,
        };
        let id = self.store.insert_nurse(row).await?;
        info!(nurse_id = id, "created nurse");
        self.get(id).await
    }

    pub async fn update(&self, id: i32, payload: NursePayload) -> Result<NurseDto, ApiError> {
        payload.validate()?;
        let existing = self
            .store
            .get_nurse(id)
            .await?
            .ok_or(ApiError::NotFound("nurse", id))?;
        self.check_refs(&payload).await?;

        let row = Nurse {
            id,
            profile: payload.profile,
            license_number: payload.license_number,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        if !self.store.update_nurse(row).await? {
            return Err(ApiError::NotFound("nurse", id));
        }
        self.get(id).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), ApiError> {
        self.store.clear_nurse_rooms(id).await?;
        if self.store.delete_nurse(id).await? {
            info!(nurse_id = id, "deleted nurse");
        }
        Ok(())
    }

    pub async fn rooms(&self, id: i32) -> Result<Vec<RoomDto>, ApiError> {
        self.store
            .get_nurse(id)
            .await?
            .ok_or(ApiError::NotFound("nurse", id))?;
        let mut rooms = Vec::new();
        for room_id in self.store.nurse_room_ids(id).await? {
            if let Some(room) = self.store.get_room(room_id).await? {
                rooms.push(RoomDto::from(&room));
            }
        }
        Ok(rooms)
    }

    pub async fn assign_rooms(&self, id: i32, room_ids: &[i32]) -> Result<Vec<RoomDto>, ApiError> {
        self.store
            .get_nurse(id)
            .await?
            .ok_or(ApiError::NotFound("nurse", id))?;
        check_rooms_exist(&self.store, room_ids).await?;
        self.store.replace_nurse_rooms(id, room_ids).await?;
        info!(nurse_id = id, rooms = room_ids.len(), "assigned rooms");
        self.rooms(id).await
    }

    pub async fn remove_rooms(&self, id: i32, room_ids: &[i32]) -> Result<Vec<RoomDto>, ApiError> {
        self.store
            .get_nurse(id)
            .await?
            .ok_or(ApiError::NotFound("nurse", id))?;
        self.store.remove_nurse_rooms(id, room_ids).await?;
        self.rooms(id).await
    }
}
