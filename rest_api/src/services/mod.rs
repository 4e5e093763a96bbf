pub mod appointments;
pub mod departments;
pub mod doctors;
pub mod medical_records;
pub mod nurses;
pub mod patients;
pub mod prescriptions;
pub mod rooms;

use std::collections::BTreeSet;
use std::sync::Arc;

use models::errors::ValidationError;
use storage::HospitalStore;

use crate::errors::ApiError;

pub use appointments::AppointmentService;
pub use departments::DepartmentService;
pub use doctors::DoctorService;
pub use medical_records::MedicalRecordService;
pub use nurses::NurseService;
pub use patients::PatientService;
pub use prescriptions::PrescriptionService;
pub use rooms::RoomService;

/// Every requested room id must exist before any join row is written; the
/// error reports the found/requested count mismatch.
pub(crate) async fn check_rooms_exist(
    store: &Arc<dyn HospitalStore>,
    room_ids: &[i32],
) -> Result<(), ApiError> {
    let unique: BTreeSet<i32> = room_ids.iter().copied().collect();
    if unique.len() != room_ids.len() {
        return Err(ValidationError::DuplicateRoomIds.into());
    }
    let mut found = 0usize;
    for &room_id in room_ids {
        if store.get_room(room_id).await?.is_some() {
            found += 1;
        }
    }
    if found != room_ids.len() {
        return Err(ApiError::Validation(format!(
            "only {} of {} requested rooms exist",
            found,
            room_ids.len()
        )));
    }
    Ok(())
}
