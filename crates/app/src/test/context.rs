//! Test context for service-level tests.

use std::path::Path;

use crate::{
    domain::patients::StorePatientsService,
    store::{Store, StoreError},
};

pub(crate) struct TestContext {
    pub store: Store,
    pub patients: StorePatientsService,
}

impl TestContext {
    /// Context over a fresh in-memory store.
    pub(crate) fn new() -> Self {
        Self::with_store(Store::in_memory())
    }

    /// Context over the snapshot file at `path`.
    pub(crate) async fn open(path: &Path) -> Result<Self, StoreError> {
        Ok(Self::with_store(Store::open(path).await?))
    }

    fn with_store(store: Store) -> Self {
        Self {
            patients: StorePatientsService::new(store.clone()),
            store,
        }
    }
}
