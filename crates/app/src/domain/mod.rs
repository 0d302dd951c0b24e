//! Clinic Domain Concerns

pub mod patients;
