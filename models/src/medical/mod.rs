pub mod appointment;
pub mod department;
pub mod doctor;
pub mod medical_record;
pub mod nurse;
pub mod patient;
pub mod prescription;
pub mod room;
pub mod staff;
pub mod user;

pub use appointment::{Appointment, AppointmentDto, AppointmentPayload, AppointmentStatus};
pub use department::{Department, DepartmentDto, DepartmentPayload};
pub use doctor::{Doctor, DoctorDto, DoctorPayload};
pub use medical_record::{MedicalRecord, MedicalRecordDto, MedicalRecordPayload};
pub use nurse::{Nurse, NurseDto, NursePayload};
pub use patient::{Patient, PatientDto, PatientPayload};
pub use prescription::{Prescription, PrescriptionDto, PrescriptionPayload};
pub use room::{Room, RoomDto, RoomPayload};
pub use staff::StaffProfile;
pub use user::{User, UserDto};
