//! Patients service.

use async_trait::async_trait;
use clinic::{
    ids::PatientId,
    patients::{
        PatientRecord,
        data::{RegistrationPayload, UpdatePayload},
    },
    validation::Validate,
};
use mockall::automock;

use crate::{
    domain::patients::{errors::PatientsServiceError, repository::PatientsRepository},
    store::Store,
};

/// Patients service backed by the snapshot [`Store`].
#[derive(Debug, Clone)]
pub struct StorePatientsService {
    store: Store,
    repository: PatientsRepository,
}

impl StorePatientsService {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            store,
            repository: PatientsRepository::new(),
        }
    }
}

#[async_trait]
impl PatientsService for StorePatientsService {
    #[tracing::instrument(name = "patients.register", skip_all, err)]
    async fn register_patient(
        &self,
        payload: RegistrationPayload,
    ) -> Result<PatientRecord, PatientsServiceError> {
        payload.validate()?;

        let patient = PatientRecord::new(payload);

        let created = self
            .store
            .write(|snapshot| self.repository.insert_patient(snapshot, patient))
            .await
            .map_err(PatientsServiceError::from)?;

        if let Some(id) = created.id() {
            tracing::info!(patient_id = %id, "registered patient");
        }

        Ok(created)
    }

    #[tracing::instrument(name = "patients.get", skip(self), fields(patient_id = %patient), err)]
    async fn get_patient(&self, patient: PatientId) -> Result<PatientRecord, PatientsServiceError> {
        self.store
            .read(|snapshot| self.repository.get_patient(snapshot, patient))
            .await
            .map_err(Into::into)
    }

    #[tracing::instrument(
        name = "patients.update",
        skip(self, update),
        fields(patient_id = %patient, empty = update.is_empty()),
        err
    )]
    async fn update_patient(
        &self,
        patient: PatientId,
        update: UpdatePayload,
    ) -> Result<PatientRecord, PatientsServiceError> {
        update.validate()?;

        let updated = self
            .store
            .write(|snapshot| {
                let mut stored = self.repository.get_patient(snapshot, patient)?;

                if !stored.is_active() {
                    return Err(PatientsServiceError::Inactive);
                }

                stored.apply_update(update);
                self.repository.replace_patient(snapshot, stored.clone())?;

                Ok(stored)
            })
            .await?;

        tracing::info!(patient_id = %patient, "updated patient");

        Ok(updated)
    }

    #[tracing::instrument(name = "patients.deactivate", skip(self), fields(patient_id = %patient), err)]
    async fn deactivate_patient(&self, patient: PatientId) -> Result<(), PatientsServiceError> {
        let was_active = self
            .store
            .write(|snapshot| {
                let mut stored = self.repository.get_patient(snapshot, patient)?;
                let was_active = stored.is_active();

                stored.deactivate();
                self.repository.replace_patient(snapshot, stored)?;

                Ok::<_, PatientsServiceError>(was_active)
            })
            .await?;

        if was_active {
            tracing::info!(patient_id = %patient, "deactivated patient");
        } else {
            tracing::debug!(patient_id = %patient, "patient was already inactive");
        }

        Ok(())
    }
}

#[automock]
#[async_trait]
/// Patient lifecycle operations.
pub trait PatientsService: Send + Sync {
    /// Validates the payload and stores a new, active patient.
    async fn register_patient(
        &self,
        payload: RegistrationPayload,
    ) -> Result<PatientRecord, PatientsServiceError>;

    /// Retrieves a single patient, active or not.
    async fn get_patient(&self, patient: PatientId) -> Result<PatientRecord, PatientsServiceError>;

    /// Validates and applies a partial update to an active patient.
    async fn update_patient(
        &self,
        patient: PatientId,
        update: UpdatePayload,
    ) -> Result<PatientRecord, PatientsServiceError>;

    /// Soft-deletes a patient. Deactivating an inactive patient succeeds and changes
    /// nothing.
    async fn deactivate_patient(&self, patient: PatientId) -> Result<(), PatientsServiceError>;
}
