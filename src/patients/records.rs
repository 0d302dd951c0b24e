//! Patient Records

use serde::{Deserialize, Serialize};

use crate::{
    addresses::Address,
    ids::PatientId,
    patients::{
        data::{RegistrationPayload, UpdatePayload},
        errors::IdAlreadyAssigned,
        status::PatientStatus,
    },
    utils::overwrite,
};

/// Patient Record
///
/// Equality only looks at the identifier: two records are the same patient when both
/// have been persisted under the same id. A record that has not been persisted
/// yet equals nothing, so `PartialEq` is not reflexive for it and there is no `Eq`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<PatientId>,
    name: String,
    national_id: String,
    email: String,
    phone: String,
    address: Address,
    active: bool,
}

impl PatientRecord {
    /// Build an active, not yet persisted record from registration data.
    #[must_use]
    pub fn new(payload: RegistrationPayload) -> Self {
        let RegistrationPayload {
            name,
            national_id,
            phone,
            email,
            address,
        } = payload;

        Self {
            id: None,
            name,
            national_id,
            email,
            phone,
            address: Address::new(address),
            active: true,
        }
    }

    /// Apply a partial update in place.
    ///
    /// Only name, phone and address can change. Absent fields are left as they are, and
    /// address changes are handed to [`Address::apply_update`] rather than replacing the
    /// address.
    pub fn apply_update(&mut self, update: UpdatePayload) {
        let UpdatePayload {
            name,
            phone,
            address,
        } = update;

        overwrite(&mut self.name, name);
        overwrite(&mut self.phone, phone);

        if let Some(address) = address {
            self.address.apply_update(address);
        }
    }

    /// Soft-delete the record. Calling it again has no further effect.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Give the record its storage identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdAlreadyAssigned`] if the record already has an identifier; the
    /// existing one is kept.
    pub fn assign_id(&mut self, id: PatientId) -> Result<(), IdAlreadyAssigned> {
        match self.id {
            Some(existing) => Err(IdAlreadyAssigned { existing }),
            None => {
                self.id = Some(id);

                Ok(())
            }
        }
    }

    /// Storage identifier, once persisted.
    pub fn id(&self) -> Option<PatientId> {
        self.id
    }

    /// Full name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// National identity number.
    pub fn national_id(&self) -> &str {
        &self.national_id
    }

    /// E-mail address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Phone number.
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Embedded address.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Whether the record has not been deactivated.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Lifecycle state.
    pub fn status(&self) -> PatientStatus {
        PatientStatus::from(self.active)
    }
}

impl From<RegistrationPayload> for PatientRecord {
    fn from(payload: RegistrationPayload) -> Self {
        Self::new(payload)
    }
}

impl PartialEq for PatientRecord {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        }
    }
}
