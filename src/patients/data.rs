//! Patient Data

use serde::{Deserialize, Serialize};

use crate::addresses::data::{AddressPayload, AddressUpdatePayload};

/// New Patient Data
///
/// Every field is required. Completeness and format are checked by
/// [`Validate`](crate::validation::Validate) before a record is built from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrationPayload {
    /// Full name.
    pub name: String,

    /// National identity (CPF) number.
    pub national_id: String,

    /// Contact phone number.
    pub phone: String,

    /// Contact e-mail address.
    pub email: String,

    /// Home address.
    pub address: AddressPayload,
}

/// Patient Update Data
///
/// National id and e-mail are fixed at registration and deliberately absent here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdatePayload {
    /// New full name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Address changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<AddressUpdatePayload>,
}

impl UpdatePayload {
    /// Whether applying this update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self
                .address
                .as_ref()
                .is_none_or(AddressUpdatePayload::is_empty)
    }
}
