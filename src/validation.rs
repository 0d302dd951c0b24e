//! Payload validation.
//!
//! Records trust their input: construction and partial updates never check anything.
//! These checks run first, at the boundary, and report every offending field at once
//! rather than stopping at the first.
//!
//! Rules for registration:
//! - name, phone, e-mail and national id must not be blank
//! - the e-mail must look like `local@domain.tld`
//! - the national id must be a CPF, `ddd.ddd.ddd-dd`, punctuation optional
//! - the address must pass [`AddressPayload`] validation
//!
//! Updates apply the same rules, but only to the fields they carry.

use std::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;

use crate::{
    addresses::data::{AddressPayload, AddressUpdatePayload},
    patients::data::{RegistrationPayload, UpdatePayload},
};

const ADDRESS_PREFIX: &str = "address.";

/// What is wrong with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationErrorKind {
    /// Empty or whitespace only.
    #[error("must not be blank")]
    Blank,

    /// Not shaped like an e-mail address.
    #[error("must be a valid e-mail address")]
    InvalidEmail,

    /// Not shaped like a CPF.
    #[error("must be a CPF number (ddd.ddd.ddd-dd)")]
    InvalidNationalId,

    /// Not eight digits.
    #[error("must be eight digits")]
    InvalidPostalCode,

    /// Not a two-letter code.
    #[error("must be a two-letter state code")]
    InvalidState,
}

/// A single failed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Dotted path of the field, e.g. `address.postal_code`.
    pub field: String,

    /// The rule it broke.
    pub kind: ValidationErrorKind,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}: {}", self.field, self.kind)
    }
}

/// Every field that failed validation, in payload order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid payload: {}", list(.0))]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// The failed fields.
    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    /// Whether `field` is among the failures.
    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|error| error.field == field)
    }

    /// Kind of the failure recorded for `field`, if any.
    pub fn kind_of(&self, field: &str) -> Option<ValidationErrorKind> {
        self.0
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.kind)
    }
}

fn list(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Payloads that can be checked before use.
pub trait Validate {
    /// Check the payload.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] listing every field that broke a rule.
    fn validate(&self) -> Result<(), ValidationErrors>;
}

impl Validate for RegistrationPayload {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut report = Report::new();

        report.required("name", &self.name, |_| None);
        report.required("national_id", &self.national_id, national_id);
        report.required("phone", &self.phone, |_| None);
        report.required("email", &self.email, email);

        report.prefix = ADDRESS_PREFIX;
        check_address(&mut report, &self.address);

        report.finish()
    }
}

impl Validate for AddressPayload {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut report = Report::new();

        check_address(&mut report, self);

        report.finish()
    }
}

impl Validate for UpdatePayload {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut report = Report::new();

        report.optional("name", self.name.as_deref(), |_| None);
        report.optional("phone", self.phone.as_deref(), |_| None);

        if let Some(address) = &self.address {
            report.prefix = ADDRESS_PREFIX;
            check_address_update(&mut report, address);
        }

        report.finish()
    }
}

impl Validate for AddressUpdatePayload {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut report = Report::new();

        check_address_update(&mut report, self);

        report.finish()
    }
}

fn check_address(report: &mut Report, address: &AddressPayload) {
    report.required("street", &address.street, |_| None);
    report.required("neighbourhood", &address.neighbourhood, |_| None);
    report.required("city", &address.city, |_| None);
    report.required("state", &address.state, state);
    report.required("postal_code", &address.postal_code, postal_code);
}

fn check_address_update(report: &mut Report, address: &AddressUpdatePayload) {
    report.optional("street", address.street.as_deref(), |_| None);
    report.optional("number", address.number.as_deref(), |_| None);
    report.optional("complement", address.complement.as_deref(), |_| None);
    report.optional("neighbourhood", address.neighbourhood.as_deref(), |_| None);
    report.optional("city", address.city.as_deref(), |_| None);
    report.optional("state", address.state.as_deref(), state);
    report.optional("postal_code", address.postal_code.as_deref(), postal_code);
}

/// Accumulates field failures under a path prefix.
struct Report {
    prefix: &'static str,
    errors: Vec<FieldError>,
}

impl Report {
    fn new() -> Self {
        Self {
            prefix: "",
            errors: Vec::new(),
        }
    }

    fn required(
        &mut self,
        field: &str,
        value: &str,
        format: fn(&str) -> Option<ValidationErrorKind>,
    ) {
        if value.trim().is_empty() {
            self.push(field, ValidationErrorKind::Blank);
        } else if let Some(kind) = format(value) {
            self.push(field, kind);
        }
    }

    fn optional(
        &mut self,
        field: &str,
        value: Option<&str>,
        format: fn(&str) -> Option<ValidationErrorKind>,
    ) {
        if let Some(value) = value {
            self.required(field, value, format);
        }
    }

    fn push(&mut self, field: &str, kind: ValidationErrorKind) {
        self.errors.push(FieldError {
            field: format!("{}{field}", self.prefix),
            kind,
        });
    }

    fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}

fn email(value: &str) -> Option<ValidationErrorKind> {
    let valid = !value.chars().any(char::is_whitespace)
        && value.split_once('@').is_some_and(|(local, domain)| {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, _)| !host.is_empty())
                && !domain.ends_with('.')
        });

    (!valid).then_some(ValidationErrorKind::InvalidEmail)
}

fn national_id(value: &str) -> Option<ValidationErrorKind> {
    const GROUPS: [(usize, Option<u8>); 4] = [
        (3, Some(b'.')),
        (3, Some(b'.')),
        (3, Some(b'-')),
        (2, None),
    ];

    let mut bytes = value.bytes().peekable();

    for (digits, separator) in GROUPS {
        for _ in 0..digits {
            if !bytes.next().is_some_and(|byte| byte.is_ascii_digit()) {
                return Some(ValidationErrorKind::InvalidNationalId);
            }
        }

        if let Some(separator) = separator {
            bytes.next_if_eq(&separator);
        }
    }

    bytes
        .next()
        .map(|_| ValidationErrorKind::InvalidNationalId)
}

fn postal_code(value: &str) -> Option<ValidationErrorKind> {
    let valid = value.len() == 8 && value.bytes().all(|byte| byte.is_ascii_digit());

    (!valid).then_some(ValidationErrorKind::InvalidPostalCode)
}

fn state(value: &str) -> Option<ValidationErrorKind> {
    let valid = value.len() == 2 && value.bytes().all(|byte| byte.is_ascii_alphabetic());

    (!valid).then_some(ValidationErrorKind::InvalidState)
}
