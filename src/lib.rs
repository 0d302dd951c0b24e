//! Clinic
//!
//! Patient records for a clinic-management backend: registration, partial updates and
//! soft deletion of patients, along with the embedded address they carry.

pub mod addresses;
pub mod ids;
pub mod patients;
pub mod prelude;
pub mod validation;

#[cfg(test)]
pub(crate) mod fixtures;

mod utils;
