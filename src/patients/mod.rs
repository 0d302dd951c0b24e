//! Patients

pub mod data;
pub mod errors;
pub mod records;
pub mod status;

pub use errors::IdAlreadyAssigned;
pub use records::PatientRecord;
pub use status::PatientStatus;
