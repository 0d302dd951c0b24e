//! Patients

pub mod errors;
mod repository;
pub mod service;

pub use errors::PatientsServiceError;
pub use service::*;
