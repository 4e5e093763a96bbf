// storage/src/keys.rs

use models::medical::{
    Appointment, Department, Doctor, MedicalRecord, Nurse, Patient, Prescription, Room, User,
};

/// Rows with a store-assigned surrogate key.
pub(crate) trait Keyed {
    fn key(&self) -> i32;
    fn set_key(&mut self, id: i32);
}

macro_rules! impl_keyed {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Keyed for $ty {
                fn key(&self) -> i32 {
                    self.id
                }
                fn set_key(&mut self, id: i32) {
                    self.id = id;
                }
            }
        )*
    };
}

impl_keyed!(
    Patient,
    Doctor,
    Nurse,
    Department,
    Room,
    Appointment,
    Prescription,
    MedicalRecord,
    User,
);
