// storage/src/memory.rs

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use models::medical::{
    Appointment, Department, Doctor, MedicalRecord, Nurse, Patient, Prescription, Room, User,
};
use tokio::sync::RwLock;

use crate::errors::StorageResult;
use crate::keys::Keyed;
use crate::store::HospitalStore;

/// One in-memory table: rows keyed by id plus a per-table id counter.
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i32, T>,
    next_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Table {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T: Keyed + Clone> Table<T> {
    fn get(&self, id: i32) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn list(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    fn insert(&mut self, mut row: T) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        row.set_key(id);
        self.rows.insert(id, row);
        id
    }

    fn update(&mut self, row: T) -> bool {
        let id = row.key();
        if self.rows.contains_key(&id) {
            self.rows.insert(id, row);
            true
        } else {
            false
        }
    }

    fn delete(&mut self, id: i32) -> bool {
        self.rows.remove(&id).is_some()
    }
}

#[derive(Debug, Default)]
struct Inner {
    patients: Table<Patient>,
    doctors: Table<Doctor>,
    nurses: Table<Nurse>,
    departments: Table<Department>,
    rooms: Table<Room>,
    appointments: Table<Appointment>,
    prescriptions: Table<Prescription>,
    medical_records: Table<MedicalRecord>,
    users: Table<User>,
    doctor_rooms: BTreeSet<(i32, i32)>,
    nurse_rooms: BTreeSet<(i32, i32)>,
}

/// Non-persistent store. One writer or many readers at a time; a request
/// holds the lock only for the duration of a single operation.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    inner: RwLock<Inner>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn room_ids_for(set: &BTreeSet<(i32, i32)>, staff_id: i32) -> Vec<i32> {
    set.iter()
        .filter(|(s, _)| *s == staff_id)
        .map(|(_, r)| *r)
        .collect()
}

fn replace_rooms(set: &mut BTreeSet<(i32, i32)>, staff_id: i32, room_ids: &[i32]) {
    set.retain(|(s, _)| *s != staff_id);
    for &room_id in room_ids {
        set.insert((staff_id, room_id));
    }
}

fn remove_rooms(set: &mut BTreeSet<(i32, i32)>, staff_id: i32, room_ids: &[i32]) {
    for &room_id in room_ids {
        set.remove(&(staff_id, room_id));
    }
}

#[async_trait]
impl HospitalStore for MemoryStorage {
    async fn get_patient(&self, id: i32) -> StorageResult<Option<Patient>> {
        Ok(self.inner.read().await.patients.get(id))
    }

    async fn list_patients(&self) -> StorageResult<Vec<Patient>> {
        Ok(self.inner.read().await.patients.list())
    }

    async fn insert_patient(&self, row: Patient) -> StorageResult<i32> {
        Ok(self.inner.write().await.patients.insert(row))
    }

    async fn update_patient(&self, row: Patient) -> StorageResult<bool> {
        Ok(self.inner.write().await.patients.update(row))
    }

    async fn delete_patient(&self, id: i32) -> StorageResult<bool> {
        Ok(self.inner.write().await.patients.delete(id))
    }

    async fn get_doctor(&self, id: i32) -> StorageResult<Option<Doctor>> {
        Ok(self.inner.read().await.doctors.get(id))
    }

    async fn list_doctors(&self) -> StorageResult<Vec<Doctor>> {
        Ok(self.inner.read().await.doctors.list())
    }

    async fn insert_doctor(&self, row: Doctor) -> StorageResult<i32> {
        Ok(self.inner.write().await.doctors.insert(row))
    }

    async fn update_doctor(&self, row: Doctor) -> StorageResult<bool> {
        Ok(self.inner.write().await.doctors.update(row))
    }

    async fn delete_doctor(&self, id: i32) -> StorageResult<bool> {
        Ok(self.inner.write().await.doctors.delete(id))
    }

    async fn get_nurse(&self, id: i32) -> StorageResult<Option<Nurse>> {
        Ok(self.inner.read().await.nurses.get(id))
    }

    async fn list_nurses(&self) -> StorageResult<Vec<Nurse>> {
        Ok(self.inner.read().await.nurses.list())
    }

    async fn insert_nurse(&self, row: Nurse) -> StorageResult<i32> {
        Ok(self.inner.write().await.nurses.insert(row))
    }

    async fn update_nurse(&self, row: Nurse) -> StorageResult<bool> {
        Ok(self.inner.write().await.nurses.update(row))
    }

    async fn delete_nurse(&self, id: i32) -> StorageResult<bool> {
        Ok(self.inner.write().await.nurses.delete(id))
    }

    async fn get_department(&self, id: i32) -> StorageResult<Option<Department>> {
        Ok(self.inner.read().await.departments.get(id))
    }

    async fn list_departments(&self) -> StorageResult<Vec<Department>> {
        Ok(self.inner.read().await.departments.list())
    }

    async fn insert_department(&self, row: Department) -> StorageResult<i32> {
        Ok(self.inner.write().await.departments.insert(row))
    }

    async fn update_department(&self, row: Department) -> StorageResult<bool> {
        Ok(self.inner.write().await.departments.update(row))
    }

    async fn delete_department(&self, id: i32) -> StorageResult<bool> {
        Ok(self.inner.write().await.departments.delete(id))
    }

    async fn get_room(&self, id: i32) -> StorageResult<Option<Room>> {
        Ok(self.inner.read().await.rooms.get(id))
    }

    async fn list_rooms(&self) -> StorageResult<Vec<Room>> {
        Ok(self.inner.read().await.rooms.list())
    }

    async fn insert_room(&self, row: Room) -> StorageResult<i32> {
        Ok(self.inner.write().await.rooms.insert(row))
    }

    async fn update_room(&self, row: Room) -> StorageResult<bool> {
        Ok(self.inner.write().await.rooms.update(row))
    }

    async fn delete_room(&self, id: i32) -> StorageResult<bool> {
        Ok(self.inner.write().await.rooms.delete(id))
    }

    async fn get_appointment(&self, id: i32) -> StorageResult<Option<Appointment>> {
        Ok(self.inner.read().await.appointments.get(id))
    }

    async fn list_appointments(&self) -> StorageResult<Vec<Appointment>> {
        Ok(self.inner.read().await.appointments.list())
    }

    async fn insert_appointment(&self, row: Appointment) -> StorageResult<i32> {
        Ok(self.inner.write().await.appointments.insert(row))
    }

    async fn update_appointment(&self, row: Appointment) -> StorageResult<bool> {
        Ok(self.inner.write().await.appointments.update(row))
    }

    async fn delete_appointment(&self, id: i32) -> StorageResult<bool> {
        Ok(self.inner.write().await.appointments.delete(id))
    }

    async fn get_prescription(&self, id: i32) -> StorageResult<Option<Prescription>> {
        Ok(self.inner.read().await.prescriptions.get(id))
    }

    async fn list_prescriptions(&self) -> StorageResult<Vec<Prescription>> {
        Ok(self.inner.read().await.prescriptions.list())
    }

    async fn insert_prescription(&self, row: Prescription) -> StorageResult<i32> {
        Ok(self.inner.write().await.prescriptions.insert(row))
    }

    async fn update_prescription(&self, row: Prescription) -> StorageResult<bool> {
        Ok(self.inner.write().await.prescriptions.update(row))
    }

    async fn delete_prescription(&self, id: i32) -> StorageResult<bool> {
        Ok(self.inner.write().await.prescriptions.delete(id))
    }

    async fn get_medical_record(&self, id: i32) -> StorageResult<Option<MedicalRecord>> {
        Ok(self.inner.read().await.medical_records.get(id))
    }

    async fn list_medical_records(&self) -> StorageResult<Vec<MedicalRecord>> {
        Ok(self.inner.read().await.medical_records.list())
    }

    async fn insert_medical_record(&self, row: MedicalRecord) -> StorageResult<i32> {
        Ok(self.inner.write().await.medical_records.insert(row))
    }

    async fn update_medical_record(&self, row: MedicalRecord) -> StorageResult<bool> {
        Ok(self.inner.write().await.medical_records.update(row))
    }

    async fn delete_medical_record(&self, id: i32) -> StorageResult<bool> {
        Ok(self.inner.write().await.medical_records.delete(id))
    }


    async fn get_user(&self, id: i32) -> StorageResult<Option<User>> {
        Ok(self.inner.read().await.users.get(id))
    }

    async fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        Ok(self
            .inner
            .read()
            .await
            .users
            .rows
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn insert_user(&self, row: User) -> StorageResult<i32> {
        Ok(self.inner.write().await.users.insert(row))
    }

    async fn doctor_room_ids(&self, doctor_id: i32) -> StorageResult<Vec<i32>> {
        Ok(room_ids_for(
            &self.inner.read().await.doctor_rooms,
            doctor_id,
        ))
    }

    async fn replace_doctor_rooms(&self, doctor_id: i32, room_ids: &[i32]) -> StorageResult<()> {
        replace_rooms(&mut self.inner.write().await.doctor_rooms, doctor_id, room_ids);
        Ok(())
    }

    async fn remove_doctor_rooms(&self, doctor_id: i32, room_ids: &[i32]) -> StorageResult<()> {
        remove_rooms(&mut self.inner.write().await.doctor_rooms, doctor_id, room_ids);
        Ok(())
    }

    async fn clear_doctor_rooms(&self, doctor_id: i32) -> StorageResult<()> {
        self.inner
            .write()
            .await
            .doctor_rooms
            .retain(|(s, _)| *s != doctor_id);
        Ok(())
    }

    async fn nurse_room_ids(&self, nurse_id: i32) -> StorageResult<Vec<i32>> {
        Ok(room_ids_for(&self.inner.read().await.nurse_rooms, nurse_id))
    }

    async fn replace_nurse_rooms(&self, nurse_id: i32, room_ids: &[i32]) -> StorageResult<()> {
        replace_rooms(&mut self.inner.write().await.nurse_rooms, nurse_id, room_ids);
        Ok(())
    }

    async fn remove_nurse_rooms(&self, nurse_id: i32, room_ids: &[i32]) -> StorageResult<()> {
        remove_rooms(&mut self.inner.write().await.nurse_rooms, nurse_id, room_ids);
        Ok(())
    }

    async fn clear_nurse_rooms(&self, nurse_id: i32) -> StorageResult<()> {
        self.inner
            .write()
            .await
            .nurse_rooms
            .retain(|(s, _)| *s != nurse_id);
        Ok(())
    }

    async fn department_in_use(&self, department_id: i32) -> StorageResult<bool> {
        let inner = self.inner.read().await;
        let by_doctor = inner
            .doctors
            .rows
            .values()
            .any(|d| d.profile.department_id == department_id);
        let by_nurse = inner
            .nurses
            .rows
            .values()
            .any(|n| n.profile.department_id == department_id);
        let by_room = inner
            .rooms
            .rows
            .values()
            .any(|r| r.department_id == department_id);
        Ok(by_doctor || by_nurse || by_room)
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStorage;
    use crate::store::HospitalStore;
    use chrono::{NaiveDate, Utc};
    use models::medical::{Department, Patient, StaffProfile};

    fn sample_patient() -> Patient {
        let now = Utc::now();
        Patient {
            id: 0,
            user_id: None,
            first_name: "Ana".to_string(),
            last_name: "Silva".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1984, 3, 12).unwrap(),
            gender: "Female".to_string(),
            address: Some("12 Elm St".to_string()),
            phone: None,
            email: Some("ana@example.com".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_department(name: &str) -> Department {
        let now = Utc::now();
        Department {
            id: 0,
            name: name.to_string(),
            description: "".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn crud_round_trip() {
        let store = MemoryStorage::new();
        let id = store.insert_patient(sample_patient()).await.unwrap();
        assert_eq!(id, 1);

        let loaded = store.get_patient(id).await.unwrap().unwrap();
        assert_eq!(loaded.first_name, "Ana");
        assert_eq!(loaded.id, id);

        let mut updated = loaded.clone();
        updated.last_name = "Souza".to_string();
        assert!(store.update_patient(updated).await.unwrap());
        let loaded = store.get_patient(id).await.unwrap().unwrap();
        assert_eq!(loaded.last_name, "Souza");

        assert_eq!(store.list_patients().await.unwrap().len(), 1);
        assert!(store.delete_patient(id).await.unwrap());
        assert!(store.get_patient(id).await.unwrap().is_none());
        assert!(!store.delete_patient(id).await.unwrap());
    }

    #[tokio::test]
    async fn update_unknown_row_is_rejected() {
        let store = MemoryStorage::new();
        let mut row = sample_patient();
        row.id = 42;
        assert!(!store.update_patient(row).await.unwrap());
    }

    #[tokio::test]
    async fn ids_are_per_table() {
        let store = MemoryStorage::new();
        let p = store.insert_patient(sample_patient()).await.unwrap();
        let d = store
            .insert_department(sample_department("Cardiology"))
            .await
            .unwrap();
        assert_eq!(p, 1);
        assert_eq!(d, 1);
    }

    #[tokio::test]
    async fn room_assignment_is_replace_then_remove() {
        let store = MemoryStorage::new();
        store.replace_doctor_rooms(7, &[1, 2]).await.unwrap();
        assert_eq!(store.doctor_room_ids(7).await.unwrap(), vec![1, 2]);

        // full replacement drops the prior set
        store.replace_doctor_rooms(7, &[3]).await.unwrap();
        assert_eq!(store.doctor_room_ids(7).await.unwrap(), vec![3]);

        store.replace_doctor_rooms(7, &[1, 2, 3]).await.unwrap();
        store.remove_doctor_rooms(7, &[1]).await.unwrap();
        assert_eq!(store.doctor_room_ids(7).await.unwrap(), vec![2, 3]);

        // other staff untouched
        store.replace_doctor_rooms(8, &[1]).await.unwrap();
        store.clear_doctor_rooms(7).await.unwrap();
        assert!(store.doctor_room_ids(7).await.unwrap().is_empty());
        assert_eq!(store.doctor_room_ids(8).await.unwrap(), vec![1]);
    }

    #[tokio::test]
    async fn department_in_use_tracks_references() {
        let store = MemoryStorage::new();
        let dept = store
            .insert_department(sample_department("Oncology"))
            .await
            .unwrap();
        assert!(!store.department_in_use(dept).await.unwrap());

        let now = Utc::now();
        store
            .insert_doctor(models::medical::Doctor {
                id: 0,
                profile: StaffProfile {
                    first_name: "Gregory".to_string(),
                    last_name: "House".to_string(),
                    phone: "555-0100".to_string(),
                    email: "house@example.com".to_string(),
                    qualifications: "MD".to_string(),
                    availability: "Mon-Fri".to_string(),
                    department_id: dept,
                },
                specialty: "Diagnostics".to_string(),
                license_number: "L-100".to_string(),
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
        assert!(store.department_in_use(dept).await.unwrap());
    }
}
