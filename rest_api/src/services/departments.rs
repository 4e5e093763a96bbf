// rest_api/src/services/departments.rs

use std::sync::Arc;

use chrono::Utc;
use models::medical::{Department, DepartmentDto, DepartmentPayload};
use storage::HospitalStore;
use tracing::info;

use crate::errors::ApiError;

pub struct DepartmentService {
    store: Arc<dyn HospitalStore>,
}

impl DepartmentService {
    pub fn new(store: Arc<dyn HospitalStore>) -> Self {
        DepartmentService { store }
    }

    pub async fn get(&self, id: i32) -> Result<DepartmentDto, ApiError> {
        let row = self
            .store
            .get_department(id)
            .await?
            .ok_or(ApiError::NotFound("department", id))?;
        Ok(DepartmentDto::from(&row))
    }

    pub async fn list(&self) -> Result<Vec<DepartmentDto>, ApiError> {
        let rows = self.store.list_departments().await?;
        Ok(rows.iter().map(DepartmentDto::from).collect())
    }

    pub async fn create(&self, payload: DepartmentPayload) -> Result<DepartmentDto, ApiError> {
        payload.validate()?;
        let now = Utc::now();
        let row = Department {
            id: 0,
            name: payload.name,
            description: payload.description,
            created_at: now,
            updated_at: now,
        };
        let id = self.store.insert_department(row).await?;
        info!(department_id = id, "created department");
        self.get(id).await
    }

    pub async fn update(
        &self,
        id: i32,
        payload: DepartmentPayload,
    ) -> Result<DepartmentDto, ApiError> {
        payload.validate()?;
        let existing = self
            .store
            .get_department(id)
            .await?
            .ok_or(ApiError::NotFound("department", id))?;
        let row = Department {
            id,
            name: payload.name,
            description: payload.description,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        if !self.store.update_department(row).await? {
            return Err(ApiError::NotFound("department", id));
        }
        self.get(id).await
    }

    /// Refused while any doctor, nurse, or room still references the
    /// department; otherwise an idempotent delete.
    pub async fn delete(&self, id: i32) -> Result<(), ApiError> {
        if self.store.get_department(id).await?.is_none() {
            return Ok(());
        }
        if self.store.department_in_use(id).await? {
            return Err(ApiError::Conflict(format!(
                "department {} is still referenced by staff or rooms",
                id
            )));
        }
        if self.store.delete_department(id).await? {
            info!(department_id = id, "deleted department");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::medical::{DoctorPayload, StaffProfile};
    use storage::MemoryStorage;

    use crate::services::DoctorService;

    fn dept_payload(name: &str) -> DepartmentPayload {
        DepartmentPayload {
            name: name.to_string(),
            description: "".to_string(),
        }
    }

    #[tokio::test]
    async fn delete_with_dependents_is_refused() {
        let store: Arc<dyn HospitalStore> = Arc::new(MemoryStorage::new());
        let departments = DepartmentService::new(store.clone());
        let doctors = DoctorService::new(store.clone());

        let dept = departments.create(dept_payload("Cardiology")).await.unwrap();
        let doctor = doctors
            .create(DoctorPayload {
                profile: StaffProfile {
                    first_name: "A".to_string(),
                    last_name: "B".to_string(),
                    phone: "555-0100".to_string(),
                    email: "ab@example.com".to_string(),
                    qualifications: "MD".to_string(),
                    availability: "Mon-Fri".to_string(),
                    department_id: dept.id,
                },
                specialty: "Cardiology".to_string(),
                license_number: "L-1".to_string(),
            })
            .await
            .unwrap();

        assert!(matches!(
            departments.delete(dept.id).await.unwrap_err(),
            ApiError::Conflict(_)
        ));

        doctors.delete(doctor.id).await.unwrap();
        departments.delete(dept.id).await.unwrap();
        assert!(departments.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_of_absent_department_is_a_no_op() {
        let store: Arc<dyn HospitalStore> = Arc::new(MemoryStorage::new());
        let departments = DepartmentService::new(store);
        departments.delete(123).await.unwrap();
    }

    #[tokio::test]
    async fn create_requires_a_name() {
        let store: Arc<dyn HospitalStore> = Arc::new(MemoryStorage::new());
        let departments = DepartmentService::new(store);
        assert!(matches!(
            departments.create(dept_payload("  ")).await.unwrap_err(),
            ApiError::Validation(_)
        ));
    }
}
