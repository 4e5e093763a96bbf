// storage/src/store.rs

use async_trait::async_trait;
use models::medical::{
    Appointment, Department, Doctor, MedicalRecord, Nurse, Patient, Prescription, Room, User,
};

use crate::errors::StorageResult;

/// Persistence contract for the hospital records. One method family per
/// resource: get, list, insert (the store assigns the id), full-row update,
/// delete. Join rows for the staff/room many-to-many relations are managed
/// through dedicated operations so the replace-all semantics stay in one
/// place.
#[async_trait]
pub trait HospitalStore: Send + Sync + 'static {
    // -- patients
    async fn get_patient(&self, id: i32) -> StorageResult<Option<Patient>>;
    async fn list_patients(&self) -> StorageResult<Vec<Patient>>;
    async fn insert_patient(&self, row: Patient) -> StorageResult<i32>;
    async fn update_patient(&self, row: Patient) -> StorageResult<bool>;
    async fn delete_patient(&self, id: i32) -> StorageResult<bool>;

    // -- doctors
    async fn get_doctor(&self, id: i32) -> StorageResult<Option<Doctor>>;
    async fn list_doctors(&self) -> StorageResult<Vec<Doctor>>;
    async fn insert_doctor(&self, row: Doctor) -> StorageResult<i32>;
    async fn update_doctor(&self, row: Doctor) -> StorageResult<bool>;
    async fn delete_doctor(&self, id: i32) -> StorageResult<bool>;

    // -- nurses
    async fn get_nurse(&self, id: i32) -> StorageResult<Option<Nurse>>;
    async fn list_nurses(&self) -> StorageResult<Vec<Nurse>>;
    async fn insert_nurse(&self, row: Nurse) -> StorageResult<i32>;
    async fn update_nurse(&self, row: Nurse) -> StorageResult<bool>;
    async fn delete_nurse(&self, id: i32) -> StorageResult<bool>;

    // -- departments
    async fn get_department(&self, id: i32) -> StorageResult<Option<Department>>;
    async fn list_departments(&self) -> StorageResult<Vec<Department>>;
    async fn insert_department(&self, row: Department) -> StorageResult<i32>;
    async fn update_department(&self, row: Department) -> StorageResult<bool>;
    async fn delete_department(&self, id: i32) -> StorageResult<bool>;

    // -- rooms
    async fn get_room(&self, id: i32) -> StorageResult<Option<Room>>;
    async fn list_rooms(&self) -> StorageResult<Vec<Room>>;
    async fn insert_room(&self, row: Room) -> StorageResult<i32>;
    async fn update_room(&self, row: Room) -> StorageResult<bool>;
    async fn delete_room(&self, id: i32) -> StorageResult<bool>;

    // -- appointments
    async fn get_appointment(&self, id: i32) -> StorageResult<Option<Appointment>>;
    async fn list_appointments(&self) -> StorageResult<Vec<Appointment>>;
    async fn insert_appointment(&self, row: Appointment) -> StorageResult<i32>;
    async fn update_appointment(&self, row: Appointment) -> StorageResult<bool>;
    async fn delete_appointment(&self, id: i32) -> StorageResult<bool>;

    // -- prescriptions
    async fn get_prescription(&self, id: i32) -> StorageResult<Option<Prescription>>;
    async fn list_prescriptions(&self) -> StorageResult<Vec<Prescription>>;
    async fn insert_prescription(&self, row: Prescription) -> StorageResult<i32>;
    async fn update_prescription(&self, row: Prescription) -> StorageResult<bool>;
    async fn delete_prescription(&self, id: i32) -> StorageResult<bool>;

    // -- medical records
    async fn get_medical_record(&self, id: i32) -> StorageResult<Option<MedicalRecord>>;
    async fn list_medical_records(&self) -> StorageResult<Vec<MedicalRecord>>;
    async fn insert_medical_record(&self, row: MedicalRecord) -> StorageResult<i32>;
    async fn update_medical_record(&self, row: MedicalRecord) -> StorageResult<bool>;
    async fn delete_medical_record(&self, id: i32) -> StorageResult<bool>;

    // -- user accounts
    async fn get_user(&self, id: i32) -> StorageResult<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>>;
    async fn insert_user(&self, row: User) -> StorageResult<i32>;

    // -- doctor/room join rows
    async fn doctor_room_ids(&self, doctor_id: i32) -> StorageResult<Vec<i32>>;
    /// Full replacement: every existing join row for the doctor is dropped,
    /// then one row per requested room is inserted. Last writer wins.
    async fn replace_doctor_rooms(&self, doctor_id: i32, room_ids: &[i32]) -> StorageResult<()>;
    /// Removes only the named pairs; other assignments stay.
    async fn remove_doctor_rooms(&self, doctor_id: i32, room_ids: &[i32]) -> StorageResult<()>;
    async fn clear_doctor_rooms(&self, doctor_id: i32) -> StorageResult<()>;

    // -- nurse/room join rows
    async fn nurse_room_ids(&self, nurse_id: i32) -> StorageResult<Vec<i32>>;
    async fn replace_nurse_rooms(&self, nurse_id: i32, room_ids: &[i32]) -> StorageResult<()>;
    async fn remove_nurse_rooms(&self, nurse_id: i32, room_ids: &[i32]) -> StorageResult<()>;
    async fn clear_nurse_rooms(&self, nurse_id: i32) -> StorageResult<()>;

    /// True while any doctor, nurse, or room still references the department.
    async fn department_in_use(&self, department_id: i32) -> StorageResult<bool>;
}
