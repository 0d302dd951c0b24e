//! Address Data

use serde::{Deserialize, Serialize};

/// New Address Data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddressPayload {
    /// Street name.
    pub street: String,

    /// Building number, when there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,

    /// Apartment, block, floor and the like.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,

    /// Neighbourhood or district.
    pub neighbourhood: String,

    /// City name.
    pub city: String,

    /// Two-letter state code.
    pub state: String,

    /// Eight-digit postal code.
    pub postal_code: String,
}

/// Address Update Data
///
/// Every field is optional. Absent fields leave the stored address untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddressUpdatePayload {
    /// New street name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,

    /// New building number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,

    /// New complement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,

    /// New neighbourhood.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighbourhood: Option<String>,

    /// New city.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// New state code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// New postal code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

impl AddressUpdatePayload {
    /// Whether the update carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.street.is_none()
            && self.number.is_none()
            && self.complement.is_none()
            && self.neighbourhood.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.postal_code.is_none()
    }
}
