//! Patients Repository

use clinic::{ids::PatientId, patients::PatientRecord};

use crate::store::{Snapshot, StoreError};

/// Snapshot-backed patients repository.
#[derive(Debug, Clone, Default)]
pub(crate) struct PatientsRepository;

impl PatientsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Store a new patient, giving it a fresh identifier.
    pub(crate) fn insert_patient(
        &self,
        snapshot: &mut Snapshot,
        mut patient: PatientRecord,
    ) -> Result<PatientRecord, StoreError> {
        Self::check_unique(snapshot, &patient)?;

        let id = PatientId::generate();

        patient.assign_id(id)?;
        snapshot.patients.insert(id, patient.clone());

        Ok(patient)
    }

    pub(crate) fn get_patient(
        &self,
        snapshot: &Snapshot,
        patient: PatientId,
    ) -> Result<PatientRecord, StoreError> {
        snapshot
            .patients
            .get(&patient)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    /// Overwrite a stored patient with a modified copy of itself.
    pub(crate) fn replace_patient(
        &self,
        snapshot: &mut Snapshot,
        patient: PatientRecord,
    ) -> Result<(), StoreError> {
        let id = patient.id().ok_or(StoreError::Unpersisted)?;

        let stored = snapshot
            .patients
            .get_mut(&id)
            .ok_or(StoreError::NotFound)?;

        *stored = patient;

        Ok(())
    }

    fn check_unique(snapshot: &Snapshot, patient: &PatientRecord) -> Result<(), StoreError> {
        for stored in snapshot.patients.values() {
            if stored.email() == patient.email() {
                return Err(StoreError::UniqueViolation { field: "email" });
            }

            if stored.national_id() == patient.national_id() {
                return Err(StoreError::UniqueViolation {
                    field: "national_id",
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::fixtures::{patient, registration_for, stored_patient};

    use super::*;

    #[test]
    fn insert_assigns_distinct_ids() -> TestResult {
        let repository = PatientsRepository::new();
        let mut snapshot = Snapshot::default();

        let first = repository.insert_patient(&mut snapshot, patient())?;
        let second = repository.insert_patient(
            &mut snapshot,
            PatientRecord::new(registration_for("b@x.com", "987.654.321-00")),
        )?;

        assert!(first.id().is_some(), "insert should assign an id");
        assert_ne!(first.id(), second.id());
        assert_eq!(snapshot.len(), 2);

        Ok(())
    }

    #[test]
    fn insert_rejects_already_persisted_record() -> TestResult {
        let repository = PatientsRepository::new();
        let mut snapshot = Snapshot::default();

        let result = repository.insert_patient(&mut snapshot, stored_patient()?);

        assert!(
            matches!(result, Err(StoreError::AlreadyPersisted(_))),
            "expected AlreadyPersisted, got {result:?}"
        );
        assert!(snapshot.is_empty());

        Ok(())
    }

    #[test]
    fn insert_rejects_duplicate_email() -> TestResult {
        let repository = PatientsRepository::new();
        let mut snapshot = Snapshot::default();

        repository.insert_patient(&mut snapshot, patient())?;

        let result = repository.insert_patient(
            &mut snapshot,
            PatientRecord::new(registration_for("a@x.com", "987.654.321-00")),
        );

        assert!(
            matches!(result, Err(StoreError::UniqueViolation { field: "email" })),
            "expected email UniqueViolation, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn insert_rejects_duplicate_national_id() -> TestResult {
        let repository = PatientsRepository::new();
        let mut snapshot = Snapshot::default();

        repository.insert_patient(&mut snapshot, patient())?;

        let result = repository.insert_patient(
            &mut snapshot,
            PatientRecord::new(registration_for("b@x.com", "123.456.789-09")),
        );

        assert!(
            matches!(
                result,
                Err(StoreError::UniqueViolation {
                    field: "national_id"
                })
            ),
            "expected national_id UniqueViolation, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn replace_requires_persisted_record() {
        let repository = PatientsRepository::new();
        let mut snapshot = Snapshot::default();

        let result = repository.replace_patient(&mut snapshot, patient());

        assert!(
            matches!(result, Err(StoreError::Unpersisted)),
            "expected Unpersisted, got {result:?}"
        );
    }

    #[test]
    fn replace_unknown_record_returns_not_found() -> TestResult {
        let repository = PatientsRepository::new();
        let mut snapshot = Snapshot::default();

        let result = repository.replace_patient(&mut snapshot, stored_patient()?);

        assert!(
            matches!(result, Err(StoreError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }
}
