//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    config::StoreConfig,
    domain::patients::{PatientsService, StorePatientsService},
    store::{Store, StoreError},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to open patient store")]
    Store(#[source] StoreError),
}

#[derive(Clone)]
pub struct AppContext {
    pub patients: Arc<dyn PatientsService>,
}

impl AppContext {
    /// Build application context from storage settings.
    ///
    /// # Errors
    ///
    /// Returns an error when the patient snapshot cannot be opened.
    pub async fn from_config(config: &StoreConfig) -> Result<Self, AppInitError> {
        let store = Store::open(&config.path)
            .await
            .map_err(AppInitError::Store)?;

        Ok(Self::from_store(store))
    }

    #[must_use]
    pub fn from_store(store: Store) -> Self {
        Self {
            patients: Arc::new(StorePatientsService::new(store)),
        }
    }
}
