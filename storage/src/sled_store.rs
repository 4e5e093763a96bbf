// storage/src/sled_store.rs

use std::path::Path;

use async_trait::async_trait;
use models::medical::{
    Appointment, Department, Doctor, MedicalRecord, Nurse, Patient, Prescription, Room, User,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::StorageResult;
use crate::keys::Keyed;
use crate::store::HospitalStore;

const T_PATIENTS: &str = "patients";
const T_DOCTORS: &str = "doctors";
const T_NURSES: &str = "nurses";
const T_DEPARTMENTS: &str = "departments";
const T_ROOMS: &str = "rooms";
const T_APPOINTMENTS: &str = "appointments";
const T_PRESCRIPTIONS: &str = "prescriptions";
const T_MEDICAL_RECORDS: &str = "medical_records";
const T_USERS: &str = "users";
const T_DOCTOR_ROOMS: &str = "doctor_rooms";
const T_NURSE_ROOMS: &str = "nurse_rooms";
const T_META: &str = "meta";

fn decode_i32(bytes: &[u8]) -> i32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[..4]);
    i32::from_be_bytes(buf)
}

// Join-row key: staff id then room id, both big-endian, so a staff prefix
// scan walks exactly that staff's assignments.
fn pair_key(staff_id: i32, room_id: i32) -> [u8; 8] {
    let mut key = [0u8; 8];
    key[..4].copy_from_slice(&staff_id.to_be_bytes());
    key[4..].copy_from_slice(&room_id.to_be_bytes());
    key
}

/// Persistent store: one sled tree per table, rows JSON-encoded, keys the
/// big-endian id bytes. Per-table id counters live in a meta tree.
pub struct SledStorage {
    db: sled::Db,
}

impl SledStorage {
    pub fn open(path: &Path) -> StorageResult<Self> {
        let db = sled::open(path)?;
        Ok(SledStorage { db })
    }

    /// Forces a flush to disk. Sled otherwise flushes in the background.
    pub fn flush(&self) -> StorageResult<()> {
        self.db.flush()?;
        Ok(())
    }

    fn tree(&self, name: &str) -> StorageResult<sled::Tree> {
        Ok(self.db.open_tree(name)?)
    }

    fn next_id(&self, table: &str) -> StorageResult<i32> {
        let meta = self.tree(T_META)?;
        let bumped = meta.update_and_fetch(table, |old| {
            let current = old.map(decode_i32).unwrap_or(0);
            Some(current.wrapping_add(1).to_be_bytes().to_vec())
        })?;
        Ok(bumped.as_deref().map(decode_i32).unwrap_or(1))
    }

    fn fetch<T: DeserializeOwned>(&self, table: &str, id: i32) -> StorageResult<Option<T>> {
        match self.tree(table)?.get(id.to_be_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn scan<T: DeserializeOwned>(&self, table: &str) -> StorageResult<Vec<T>> {
        let mut rows = Vec::new();
        for entry in self.tree(table)?.iter() {
            let (_, bytes) = entry?;
            rows.push(serde_json::from_slice(&bytes)?);
        }
        Ok(rows)
    }

    fn insert_row<T: Keyed + Serialize>(&self, table: &str, mut row: T) -> StorageResult<i32> {
        let id = self.next_id(table)?;
        row.set_key(id);
        self.tree(table)?
            .insert(id.to_be_bytes(), serde_json::to_vec(&row)?)?;
        Ok(id)
    }

    fn update_row<T: Keyed + Serialize>(&self, table: &str, row: T) -> StorageResult<bool> {
        let tree = self.tree(table)?;
        let key = row.key().to_be_bytes();
        if !tree.contains_key(key)? {
            return Ok(false);
        }
        tree.insert(key, serde_json::to_vec(&row)?)?;
        Ok(true)
    }

    fn delete_row(&self, table: &str, id: i32) -> StorageResult<bool> {
        Ok(self.tree(table)?.remove(id.to_be_bytes())?.is_some())
    }

    fn pair_room_ids(&self, table: &str, staff_id: i32) -> StorageResult<Vec<i32>> {
        let mut room_ids = Vec::new();
        for entry in self.tree(table)?.scan_prefix(staff_id.to_be_bytes()) {
            let (key, _) = entry?;
            room_ids.push(decode_i32(&key[4..]));
        }
        Ok(room_ids)
    }

    fn clear_pairs(&self, table: &str, staff_id: i32) -> StorageResult<()> {
        let tree = self.tree(table)?;
        let keys: Vec<_> = tree
            .scan_prefix(staff_id.to_be_bytes())
            .keys()
            .collect::<Result<_, _>>()?;
        for key in keys {
            tree.remove(key)?;
        }
        Ok(())
    }

    fn replace_pairs(&self, table: &str, staff_id: i32, room_ids: &[i32]) -> StorageResult<()> {
        self.clear_pairs(table, staff_id)?;
        let tree = self.tree(table)?;
        for &room_id in room_ids {
            tree.insert(pair_key(staff_id, room_id), sled::IVec::default())?;
        }
        Ok(())
    }

    fn remove_pairs(&self, table: &str, staff_id: i32, room_ids: &[i32]) -> StorageResult<()> {
        let tree = self.tree(table)?;
        for &room_id in room_ids {
            tree.remove(pair_key(staff_id, room_id))?;
        }
        Ok(())
    }
}

#[async_trait]
impl HospitalStore for SledStorage {
    async fn get_patient(&self, id: i32) -> StorageResult<Option<Patient>> {
        self.fetch(T_PATIENTS, id)
    }

    async fn list_patients(&self) -> StorageResult<Vec<Patient>> {
        self.scan(T_PATIENTS)
    }

    async fn insert_patient(&self, row: Patient) -> StorageResult<i32> {
        self.insert_row(T_PATIENTS, row)
    }

    async fn update_patient(&self, row: Patient) -> StorageResult<bool> {
        self.update_row(T_PATIENTS, row)
    }

    async fn delete_patient(&self, id: i32) -> StorageResult<bool> {
        self.delete_row(T_PATIENTS, id)
    }

    async fn get_doctor(&self, id: i32) -> StorageResult<Option<Doctor>> {
        self.fetch(T_DOCTORS, id)
    }

    async fn list_doctors(&self) -> StorageResult<Vec<Doctor>> {
        self.scan(T_DOCTORS)
    }

    async fn insert_doctor(&self, row: Doctor) -> StorageResult<i32> {
        self.insert_row(T_DOCTORS, row)
    }

    async fn update_doctor(&self, row: Doctor) -> StorageResult<bool> {
        self.update_row(T_DOCTORS, row)
    }

    async fn delete_doctor(&self, id: i32) -> StorageResult<bool> {
        self.delete_row(T_DOCTORS, id)
    }

    async fn get_nurse(&self, id: i32) -> StorageResult<Option<Nurse>> {
        self.fetch(T_NURSES, id)
    }

    async fn list_nurses(&self) -> StorageResult<Vec<Nurse>> {
        self.scan(T_NURSES)
    }

    async fn insert_nurse(&self, row: Nurse) -> StorageResult<i32> {
        self.insert_row(T_NURSES, row)
    }

    async fn update_nurse(&self, row: Nurse) -> StorageResult<bool> {
        self.update_row(T_NURSES, row)
    }

    async fn delete_nurse(&self, id: i32) -> StorageResult<bool> {
        self.delete_row(T_NURSES, id)
    }

    async fn get_department(&self, id: i32) -> StorageResult<Option<Department>> {
        self.fetch(T_DEPARTMENTS, id)
    }

    async fn list_departments(&self) -> StorageResult<Vec<Department>> {
        self.scan(T_DEPARTMENTS)
    }

    async fn insert_department(&self, row: Department) -> StorageResult<i32> {
        self.insert_row(T_DEPARTMENTS, row)
    }

    async fn update_department(&self, row: Department) -> StorageResult<bool> {
        self.update_row(T_DEPARTMENTS, row)
    }

    async fn delete_department(&self, id: i32) -> StorageResult<bool> {
        self.delete_row(T_DEPARTMENTS, id)
    }

    async fn get_room(&self, id: i32) -> StorageResult<Option<Room>> {
        self.fetch(T_ROOMS, id)
    }

    async fn list_rooms(&self) -> StorageResult<Vec<Room>> {
        self.scan(T_ROOMS)
    }

    async fn insert_room(&self, row: Room) -> StorageResult<i32> {
        self.insert_row(T_ROOMS, row)
    }

    async fn update_room(&self, row: Room) -> StorageResult<bool> {
        self.update_row(T_ROOMS, row)
    }

    async fn delete_room(&self, id: i32) -> StorageResult<bool> {
        self.delete_row(T_ROOMS, id)
    }

    async fn get_appointment(&self, id: i32) -> StorageResult<Option<Appointment>> {
        self.fetch(T_APPOINTMENTS, id)
    }

    async fn list_appointments(&self) -> StorageResult<Vec<Appointment>> {
        self.scan(T_APPOINTMENTS)
    }

    async fn insert_appointment(&self, row: Appointment) -> StorageResult<i32> {
        self.insert_row(T_APPOINTMENTS, row)
    }

    async fn update_appointment(&self, row: Appointment) -> StorageResult<bool> {
        self.update_row(T_APPOINTMENTS, row)
    }

    async fn delete_appointment(&self, id: i32) -> StorageResult<bool> {
        self.delete_row(T_APPOINTMENTS, id)
    }

    async fn get_prescription(&self, id: i32) -> StorageResult<Option<Prescription>> {
        self.fetch(T_PRESCRIPTIONS, id)
    }

    async fn list_prescriptions(&self) -> StorageResult<Vec<Prescription>> {
        self.scan(T_PRESCRIPTIONS)
    }

    async fn insert_prescription(&self, row: Prescription) -> StorageResult<i32> {
        self.insert_row(T_PRESCRIPTIONS, row)
    }

    async fn update_prescription(&self, row: Prescription) -> StorageResult<bool> {
        self.update_row(T_PRESCRIPTIONS, row)
    }

    async fn delete_prescription(&self, id: i32) -> StorageResult<bool> {
        self.delete_row(T_PRESCRIPTIONS, id)
    }

    async fn get_medical_record(&self, id: i32) -> StorageResult<Option<MedicalRecord>> {
        self.fetch(T_MEDICAL_RECORDS, id)
    }

    async fn list_medical_records(&self) -> StorageResult<Vec<MedicalRecord>> {
        self.scan(T_MEDICAL_RECORDS)
    }

    async fn insert_medical_record(&self, row: MedicalRecord) -> StorageResult<i32> {
        self.insert_row(T_MEDICAL_RECORDS, row)
    }

    async fn update_medical_record(&self, row: MedicalRecord) -> StorageResult<bool> {
        self.update_row(T_MEDICAL_RECORDS, row)
    }

    async fn delete_medical_record(&self, id: i32) -> StorageResult<bool> {
        self.delete_row(T_MEDICAL_RECORDS, id)
    }

    async fn get_user(&self, id: i32) -> StorageResult<Option<User>> {
        self.fetch(T_USERS, id)
    }

    async fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        let users: Vec<User> = self.scan(T_USERS)?;
        Ok(users.into_iter().find(|u| u.username == username))
    }

    async fn insert_user(&self, row: User) -> StorageResult<i32> {
        self.insert_row(T_USERS, row)
    }

    async fn doctor_room_ids(&self, doctor_id: i32) -> StorageResult<Vec<i32>> {
        self.pair_room_ids(T_DOCTOR_ROOMS, doctor_id)
    }

    async fn replace_doctor_rooms(&self, doctor_id: i32, room_ids: &[i32]) -> StorageResult<()> {
        self.replace_pairs(T_DOCTOR_ROOMS, doctor_id, room_ids)
    }

    async fn remove_doctor_rooms(&self, doctor_id: i32, room_ids: &[i32]) -> StorageResult<()> {
        self.remove_pairs(T_DOCTOR_ROOMS, doctor_id, room_ids)
    }

    async fn clear_doctor_rooms(&self, doctor_id: i32) -> StorageResult<()> {
        self.clear_pairs(T_DOCTOR_ROOMS, doctor_id)
    }

    async fn nurse_room_ids(&self, nurse_id: i32) -> StorageResult<Vec<i32>> {
        self.pair_room_ids(T_NURSE_ROOMS, nurse_id)
    }

    async fn replace_nurse_rooms(&self, nurse_id: i32, room_ids: &[i32]) -> StorageResult<()> {
        self.replace_pairs(T_NURSE_ROOMS, nurse_id, room_ids)
    }

    async fn remove_nurse_rooms(&self, nurse_id: i32, room_ids: &[i32]) -> StorageResult<()> {
        self.remove_pairs(T_NURSE_ROOMS, nurse_id, room_ids)
    }

    async fn clear_nurse_rooms(&self, nurse_id: i32) -> StorageResult<()> {
        self.clear_pairs(T_NURSE_ROOMS, nurse_id)
    }

    async fn department_in_use(&self, department_id: i32) -> StorageResult<bool> {
        let doctors: Vec<Doctor> = self.scan(T_DOCTORS)?;
        if doctors
            .iter()
            .any(|d| d.profile.department_id == department_id)
        {
            return Ok(true);
        }
        let nurses: Vec<Nurse> = self.scan(T_NURSES)?;
        if nurses
            .iter()
            .any(|n| n.profile.department_id == department_id)
        {
            return Ok(true);
        }
        let rooms: Vec<Room> = self.scan(T_ROOMS)?;
        Ok(rooms.iter().any(|r| r.department_id == department_id))
    }
}

#[cfg(test)]
mod tests {
    use super::SledStorage;
    use crate::store::HospitalStore;
    use chrono::Utc;
    use models::medical::Department;
    use tempfile::tempdir;

    fn sample_department(name: &str) -> Department {
        let now = Utc::now();
        Department {
            id: 0,
            name: name.to_string(),
            description: "General".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn rows_survive_reopen() {
        let dir = tempdir().unwrap();

        let id = {
            let store = SledStorage::open(dir.path()).unwrap();
            let id = store
                .insert_department(sample_department("Cardiology"))
                .await
                .unwrap();
            store.flush().unwrap();
            id
        };

        let store = SledStorage::open(dir.path()).unwrap();
        let loaded = store.get_department(id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Cardiology");

        // counter survives too
        let next = store
            .insert_department(sample_department("Oncology"))
            .await
            .unwrap();
        assert_eq!(next, id + 1);
    }

    #[tokio::test]
    async fn crud_and_idempotent_delete() {
        let dir = tempdir().unwrap();
        let store = SledStorage::open(dir.path()).unwrap();

        let id = store
            .insert_department(sample_department("ER"))
            .await
            .unwrap();
        let mut row = store.get_department(id).await.unwrap().unwrap();
        row.description = "Emergency".to_string();
        assert!(store.update_department(row).await.unwrap());
        assert_eq!(
            store
                .get_department(id)
                .await
                .unwrap()
                .unwrap()
                .description,
            "Emergency"
        );

        assert!(store.delete_department(id).await.unwrap());
        assert!(!store.delete_department(id).await.unwrap());
        assert!(store.get_department(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn join_rows_replace_and_remove() {
        let dir = tempdir().unwrap();
        let store = SledStorage::open(dir.path()).unwrap();

        store.replace_nurse_rooms(3, &[10, 11]).await.unwrap();
        assert_eq!(store.nurse_room_ids(3).await.unwrap(), vec![10, 11]);

        store.replace_nurse_rooms(3, &[12]).await.unwrap();
        assert_eq!(store.nurse_room_ids(3).await.unwrap(), vec![12]);

        store.replace_nurse_rooms(3, &[10, 11, 12]).await.unwrap();
        store.remove_nurse_rooms(3, &[11]).await.unwrap();
        assert_eq!(store.nurse_room_ids(3).await.unwrap(), vec![10, 12]);

        store.replace_nurse_rooms(4, &[10]).await.unwrap();
        store.clear_nurse_rooms(3).await.unwrap();
        assert!(store.nurse_room_ids(3).await.unwrap().is_empty());
        assert_eq!(store.nurse_room_ids(4).await.unwrap(), vec![10]);
    }
}
