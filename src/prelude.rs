//! Clinic prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    addresses::{
        Address,
        data::{AddressPayload, AddressUpdatePayload},
    },
    ids::PatientId,
    patients::{
        IdAlreadyAssigned, PatientRecord, PatientStatus,
        data::{RegistrationPayload, UpdatePayload},
    },
    validation::{FieldError, Validate, ValidationErrorKind, ValidationErrors},
};
