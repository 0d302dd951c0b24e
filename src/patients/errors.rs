//! Patient errors.

use thiserror::Error;

use crate::ids::PatientId;

/// Raised when storage tries to give an identifier to a patient that already has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("patient already has identifier {existing}")]
pub struct IdAlreadyAssigned {
    /// The identifier the patient kept.
    pub existing: PatientId,
}
