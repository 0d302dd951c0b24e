//! Patient Status

use serde::{Deserialize, Serialize};

/// Lifecycle state of a patient record.
///
/// `Active` is the initial state. `Inactive` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatientStatus {
    /// Registered and visible to the clinic.
    Active,

    /// Soft-deleted.
    Inactive,
}

impl PatientStatus {
    /// Whether this is the active state.
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl From<bool> for PatientStatus {
    fn from(active: bool) -> Self {
        if active { Self::Active } else { Self::Inactive }
    }
}
