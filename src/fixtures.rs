//! Test fixtures

use crate::{
    addresses::data::AddressPayload,
    patients::{PatientRecord, data::RegistrationPayload},
};

pub(crate) fn address_payload() -> AddressPayload {
    AddressPayload {
        street: "Rua das Flores".to_string(),
        number: Some("100".to_string()),
        complement: None,
        neighbourhood: "Boa Vista".to_string(),
        city: "Recife".to_string(),
        state: "PE".to_string(),
        postal_code: "50050000".to_string(),
    }
}

pub(crate) fn registration_payload() -> RegistrationPayload {
    RegistrationPayload {
        name: "Ana".to_string(),
        national_id: "123.456.789-09".to_string(),
        phone: "555".to_string(),
        email: "a@x.com".to_string(),
        address: address_payload(),
    }
}

pub(crate) fn patient() -> PatientRecord {
    PatientRecord::new(registration_payload())
}
