// rest_api/src/services/doctors.rs

use std::sync::Arc;

use chrono::Utc;
use models::medical::{Doctor, DoctorDto, DoctorPayload, RoomDto};
use storage::HospitalStore;
use tracing::info;

use crate::errors::ApiError;
use crate::services::check_rooms_exist;

pub struct DoctorService {
    store: Arc<dyn HospitalStore>,
}

impl DoctorService {
    pub fn new(store: Arc<dyn HospitalStore>) -> Self {
        DoctorService { store }
    }

    async fn check_refs(&self, payload: &DoctorPayload) -> Result<(), ApiError> {
        let department_id = payload.profile.department_id;
        if self.store.get_department(department_id).await?.is_none() {
            return Err(ApiError::Validation(format!(
                "department {} does not exist",
                department_id
            )));
        }
        Ok(())
    }

    pub async fn get(&self, id: i32) -> Result<DoctorDto, ApiError> {
        let row = self
            .store
            .get_doctor(id)
            .await?
            .ok_or(ApiError::NotFound("doctor", id))?;
        Ok(DoctorDto::from(&row))
    }

    pub async fn list(&self) -> Result<Vec<DoctorDto>, ApiError> {
        let rows = self.store.list_doctors().await?;
        Ok(rows.iter().map(DoctorDto::from).collect())
    }

    pub async fn create(&self, payload: DoctorPayload) -> Result<DoctorDto, ApiError> {
        payload.validate()?;
        self.check_refs(&payload).await?;

        let now = Utc::now();
        let row = Doctor {
            id: 0,
            profile: payload.profile,
            specialty: payload.specialty,
            license_number: payload.license_number,
            created_at: now,
            updated_at: now,
        };
        let id = self.store.insert_doctor(row).await?;
        info!(doctor_id = id, "created doctor");
        self.get(id).await
    }

    pub async fn update(&self, id: i32, payload: DoctorPayload) -> Result<DoctorDto, ApiError> {
        payload.validate()?;
        let existing = self
            .store
            .get_doctor(id)
            .await?
            .ok_or(ApiError::NotFound("doctor", id))?;
        self.check_refs(&payload).await?;

        let row = Doctor {
            id,
            profile: payload.profile,
            specialty: payload.specialty,
            license_number: payload.license_number,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        if !self.store.update_doctor(row).await? {
            return Err(ApiError::NotFound("doctor", id));
        }
        self.get(id).await
    }

    /// Join rows go first so no dangling assignment can survive the staff
    /// row. Idempotent for an absent id.
    pub async fn delete(&self, id: i32) -> Result<(), ApiError> {
        self.store.clear_doctor_rooms(id).await?;
        if self.store.delete_doctor(id).await? {
            info!(doctor_id = id, "deleted doctor");
        }
        Ok(())
    }

    pub async fn rooms(&self, id: i32) -> Result<Vec<RoomDto>, ApiError> {
        self.store
            .get_doctor(id)
            .await?
            .ok_or(ApiError::NotFound("doctor", id))?;
        let mut rooms = Vec::new();
        for room_id in self.store.doctor_room_ids(id).await? {
            if let Some(room) = self.store.get_room(room_id).await? {
                rooms.push(RoomDto::from(&room));
            }
        }
        Ok(rooms)
    }

    /// Replaces the doctor's whole room assignment with the requested set.
    pub async fn assign_rooms(&self, id: i32, room_ids: &[i32]) -> Result<Vec<RoomDto>, ApiError> {
        self.store
            .get_doctor(id)
            .await?
            .ok_or(ApiError::NotFound("doctor", id))?;
        check_rooms_exist(&self.store, room_ids).await?;
        self.store.replace_doctor_rooms(id, room_ids).await?;
        info!(doctor_id = id, rooms = room_ids.len(), "assigned rooms");
        self.rooms(id).await
    }

    /// Removes only the named assignments, keeping the rest.
    pub async fn remove_rooms(&self, id: i32, room_ids: &[i32]) -> Result<Vec<RoomDto>, ApiError> {
        self.store
            .get_doctor(id)
            .await?
            .ok_or(ApiError::NotFound("doctor", id))?;
        self.store.remove_doctor_rooms(id, room_ids).await?;
        self.rooms(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::medical::{DepartmentPayload, RoomPayload, StaffProfile};
    use storage::MemoryStorage;

    use crate::services::{DepartmentService, RoomService};

    async fn fixture() -> (Arc<dyn HospitalStore>, i32, Vec<i32>) {
        let store: Arc<dyn HospitalStore> = Arc::new(MemoryStorage::new());
        let dept = DepartmentService::new(store.clone())
            .create(DepartmentPayload {
                name: "Surgery".to_string(),
                description: "".to_string(),
            })
            .await
            .unwrap();
        let rooms_svc = RoomService::new(store.clone());
        let mut room_ids = Vec::new();
        for n in ["101", "102", "103"] {
            let room = rooms_svc
                .create(RoomPayload {
                    room_number: n.to_string(),
                    room_type: "Operating".to_string(),
                    current_patient_id: None,
                    department_id: dept.id,
                })
                .await
                .unwrap();
            room_ids.push(room.id);
        }
        (store, dept.id, room_ids)
    }

    fn doctor_payload(department_id: i32) -> DoctorPayload {
        DoctorPayload {
            profile: StaffProfile {
                first_name: "Meredith".to_string(),
                last_name: "Grey".to_string(),
                phone: "555-0102".to_string(),
                email: "grey@example.com".to_string(),
                qualifications: "MD, FACS".to_string(),
                availability: "Mon-Wed".to_string(),
                department_id,
            },
            specialty: "General Surgery".to_string(),
            license_number: "L-77".to_string(),
        }
    }

    #[tokio::test]
    async fn create_rejects_unknown_department_and_writes_nothing() {
        let store: Arc<dyn HospitalStore> = Arc::new(MemoryStorage::new());
        let doctors = DoctorService::new(store.clone());
        assert!(matches!(
            doctors.create(doctor_payload(55)).await.unwrap_err(),
            ApiError::Validation(_)
        ));
        assert!(doctors.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn assign_rooms_replaces_prior_set() {
        let (store, dept_id, room_ids) = fixture().await;
        let doctors = DoctorService::new(store);
        let doctor = doctors.create(doctor_payload(dept_id)).await.unwrap();

        let assigned = doctors
            .assign_rooms(doctor.id, &room_ids[..2])
            .await
            .unwrap();
        assert_eq!(
            assigned.iter().map(|r| r.id).collect::<Vec<_>>(),
            &room_ids[..2]
        );

        let replaced = doctors
            .assign_rooms(doctor.id, &room_ids[2..])
            .await
            .unwrap();
        assert_eq!(
            replaced.iter().map(|r| r.id).collect::<Vec<_>>(),
            &room_ids[2..]
        );
    }

    #[tokio::test]
    async fn remove_rooms_keeps_the_rest() {
        let (store, dept_id, room_ids) = fixture().await;
        let doctors = DoctorService::new(store);
        let doctor = doctors.create(doctor_payload(dept_id)).await.unwrap();

        doctors.assign_rooms(doctor.id, &room_ids).await.unwrap();
        let left = doctors
            .remove_rooms(doctor.id, &room_ids[..1])
            .await
            .unwrap();
        assert_eq!(
            left.iter().map(|r| r.id).collect::<Vec<_>>(),
            &room_ids[1..]
        );
    }

    #[tokio::test]
    async fn assign_rooms_validates_every_id() {
        let (store, dept_id, room_ids) = fixture().await;
        let doctors = DoctorService::new(store);
        let doctor = doctors.create(doctor_payload(dept_id)).await.unwrap();

        let mut wanted = room_ids.clone();
        wanted.push(999);
        let err = doctors.assign_rooms(doctor.id, &wanted).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        // nothing was written
        assert!(doctors.rooms(doctor.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn assign_rooms_for_unknown_doctor_is_not_found() {
        let (store, _, room_ids) = fixture().await;
        let doctors = DoctorService::new(store);
        assert!(matches!(
            doctors.assign_rooms(42, &room_ids).await.unwrap_err(),
            ApiError::NotFound("doctor", 42)
        ));
    }

    #[tokio::test]
    async fn delete_clears_join_rows_first() {
        let (store, dept_id, room_ids) = fixture().await;
        let doctors = DoctorService::new(store.clone());
        let doctor = doctors.create(doctor_payload(dept_id)).await.unwrap();
        doctors.assign_rooms(doctor.id, &room_ids).await.unwrap();

        doctors.delete(doctor.id).await.unwrap();
        assert!(store.doctor_room_ids(doctor.id).await.unwrap().is_empty());
    }
}
