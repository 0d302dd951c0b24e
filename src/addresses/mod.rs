//! Addresses
//!
//! The address a patient is registered with. It has no identity of its own: it is stored
//! inside its owner and only changes through its owner's update path.

use serde::{Deserialize, Serialize};

use crate::{
    addresses::data::{AddressPayload, AddressUpdatePayload},
    utils::{overwrite, overwrite_optional},
};

pub mod data;

/// Embedded Address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    street: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    complement: Option<String>,
    neighbourhood: String,
    city: String,
    state: String,
    postal_code: String,
}

impl Address {
    /// Build an address from its registration data.
    #[must_use]
    pub fn new(payload: AddressPayload) -> Self {
        let AddressPayload {
            street,
            number,
            complement,
            neighbourhood,
            city,
            state,
            postal_code,
        } = payload;

        Self {
            street,
            number,
            complement,
            neighbourhood,
            city,
            state,
            postal_code,
        }
    }

    /// Apply a partial update in place.
    ///
    /// Present fields overwrite, absent fields are left alone. `number` and `complement`
    /// can be set through here but never cleared.
    pub fn apply_update(&mut self, update: AddressUpdatePayload) {
        let AddressUpdatePayload {
            street,
            number,
            complement,
            neighbourhood,
            city,
            state,
            postal_code,
        } = update;

        overwrite(&mut self.street, street);
        overwrite_optional(&mut self.number, number);
        overwrite_optional(&mut self.complement, complement);
        overwrite(&mut self.neighbourhood, neighbourhood);
        overwrite(&mut self.city, city);
        overwrite(&mut self.state, state);
        overwrite(&mut self.postal_code, postal_code);
    }

    /// Street name.
    pub fn street(&self) -> &str {
        &self.street
    }

    /// Building number.
    pub fn number(&self) -> Option<&str> {
        self.number.as_deref()
    }

    /// Complement.
    pub fn complement(&self) -> Option<&str> {
        self.complement.as_deref()
    }

    /// Neighbourhood.
    pub fn neighbourhood(&self) -> &str {
        &self.neighbourhood
    }

    /// City.
    pub fn city(&self) -> &str {
        &self.city
    }

    /// State code.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Postal code.
    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }
}

impl From<AddressPayload> for Address {
    fn from(payload: AddressPayload) -> Self {
        Self::new(payload)
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures::address_payload;

    use super::*;

    #[test]
    fn new_copies_every_field() {
        let address = Address::new(address_payload());

        assert_eq!(address.street(), "Rua das Flores");
        assert_eq!(address.number(), Some("100"));
        assert_eq!(address.complement(), None);
        assert_eq!(address.neighbourhood(), "Boa Vista");
        assert_eq!(address.city(), "Recife");
        assert_eq!(address.state(), "PE");
        assert_eq!(address.postal_code(), "50050000");
    }

    #[test]
    fn empty_update_changes_nothing() {
        let mut address = Address::new(address_payload());
        let before = address.clone();

        address.apply_update(AddressUpdatePayload::default());

        assert_eq!(address, before);
    }

    #[test]
    fn update_touches_only_present_fields() {
        let mut address = Address::new(address_payload());

        address.apply_update(AddressUpdatePayload {
            city: Some("Olinda".to_string()),
            postal_code: Some("53010000".to_string()),
            complement: Some("Casa 2".to_string()),
            ..AddressUpdatePayload::default()
        });

        assert_eq!(address.city(), "Olinda");
        assert_eq!(address.postal_code(), "53010000");
        assert_eq!(address.complement(), Some("Casa 2"));
        assert_eq!(address.street(), "Rua das Flores");
        assert_eq!(address.number(), Some("100"));
        assert_eq!(address.neighbourhood(), "Boa Vista");
        assert_eq!(address.state(), "PE");
    }

    #[test]
    fn update_cannot_clear_number() {
        let mut address = Address::new(address_payload());

        address.apply_update(AddressUpdatePayload {
            number: None,
            street: Some("Avenida Norte".to_string()),
            ..AddressUpdatePayload::default()
        });

        assert_eq!(address.number(), Some("100"));
    }
}
