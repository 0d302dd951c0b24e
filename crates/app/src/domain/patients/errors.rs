//! Patients service errors.

use clinic::validation::ValidationErrors;
use thiserror::Error;

use crate::store::StoreError;

/// Patient service error variants.
#[derive(Debug, Error)]
pub enum PatientsServiceError {
    /// No patient under the requested id.
    #[error("patient not found")]
    NotFound,

    /// Another patient already uses this e-mail or national id.
    #[error("patient already exists: {field} is taken")]
    AlreadyExists {
        /// The clashing field.
        field: &'static str,
    },

    /// The patient has been deactivated and can no longer be updated.
    #[error("patient is inactive")]
    Inactive,

    /// The payload failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    /// Underlying storage error.
    #[error("storage error")]
    Storage(#[source] StoreError),
}

impl From<StoreError> for PatientsServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::NotFound,
            StoreError::UniqueViolation { field } => Self::AlreadyExists { field },
            error @ (StoreError::Unpersisted
            | StoreError::AlreadyPersisted(_)
            | StoreError::Io { .. }
            | StoreError::Decode { .. }
            | StoreError::Encode(_)) => Self::Storage(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_row_maps_to_not_found() {
        let error = PatientsServiceError::from(StoreError::NotFound);

        assert!(
            matches!(error, PatientsServiceError::NotFound),
            "expected NotFound, got {error:?}"
        );
    }

    #[test]
    fn unique_violation_maps_to_already_exists() {
        let error = PatientsServiceError::from(StoreError::UniqueViolation { field: "email" });

        assert!(
            matches!(error, PatientsServiceError::AlreadyExists { field: "email" }),
            "expected AlreadyExists, got {error:?}"
        );
    }

    #[test]
    fn other_store_errors_are_storage_errors() {
        let error = PatientsServiceError::from(StoreError::Unpersisted);

        assert!(
            matches!(error, PatientsServiceError::Storage(StoreError::Unpersisted)),
            "expected Storage, got {error:?}"
        );
    }
}
