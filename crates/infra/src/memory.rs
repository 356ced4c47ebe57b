//! In-memory repository implementations.
//!
//! Back the integration tests and offline sessions. Handles are cheap to
//! clone and share one store, so a test can keep a handle while the service
//! owns another. Each repository carries a one-shot failure switch so
//! fail-closed behavior can be exercised.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use stockroom_catalog::{NamedRef, Product, WarehouseLocation};
use stockroom_core::MovementId;
use stockroom_movements::MovementRecord;

use crate::error::TransportError;
use crate::repository::{
    Envelope, LocationRepository, MovementPatch, MovementRepository, ProductRepository, QueryParams,
};

/// One-shot transport failure injection.
#[derive(Debug, Default)]
struct FailureSwitch(Mutex<Option<String>>);

impl FailureSwitch {
    fn arm(&self, message: impl Into<String>) {
        *self.0.lock().unwrap_or_else(|e| e.into_inner()) = Some(message.into());
    }

    /// Trip the switch: an armed failure fires once, then clears.
    fn check(&self) -> Result<(), TransportError> {
        match self.0.lock().unwrap_or_else(|e| e.into_inner()).take() {
            Some(message) => Err(TransportError::new(message)),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<Mutex<Vec<Product>>>,
    categories: Arc<Mutex<Vec<NamedRef>>>,
    failure: Arc<FailureSwitch>,
}

impl InMemoryProductRepository {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(Mutex::new(products)),
            ..Default::default()
        }
    }

    pub fn with_categories(self, categories: Vec<NamedRef>) -> Self {
        *self.categories.lock().unwrap_or_else(|e| e.into_inner()) = categories;
        self
    }

    pub fn fail_next_with(&self, message: &str) {
        self.failure.arm(message);
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn get_all(&self, _params: &QueryParams) -> Result<Envelope<Vec<Product>>, TransportError> {
        self.failure.check()?;
        Ok(Envelope::ok(
            self.products.lock().unwrap_or_else(|e| e.into_inner()).clone(),
        ))
    }

    async fn get_categories(&self) -> Result<Envelope<Vec<NamedRef>>, TransportError> {
        self.failure.check()?;
        Ok(Envelope::ok(
            self.categories.lock().unwrap_or_else(|e| e.into_inner()).clone(),
        ))
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryLocationRepository {
    locations: Arc<Mutex<Vec<WarehouseLocation>>>,
    failure: Arc<FailureSwitch>,
}

impl InMemoryLocationRepository {
    pub fn new(locations: Vec<WarehouseLocation>) -> Self {
        Self {
            locations: Arc::new(Mutex::new(locations)),
            failure: Arc::default(),
        }
    }

    pub fn fail_next_with(&self, message: &str) {
        self.failure.arm(message);
    }
}

#[async_trait]
impl LocationRepository for InMemoryLocationRepository {
    async fn get_all(
        &self,
        _params: &QueryParams,
    ) -> Result<Envelope<Vec<WarehouseLocation>>, TransportError> {
        self.failure.check()?;
        Ok(Envelope::ok(
            self.locations.lock().unwrap_or_else(|e| e.into_inner()).clone(),
        ))
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryMovementRepository {
    movements: Arc<Mutex<Vec<MovementRecord>>>,
    failure: Arc<FailureSwitch>,
}

impl InMemoryMovementRepository {
    pub fn new(movements: Vec<MovementRecord>) -> Self {
        Self {
            movements: Arc::new(Mutex::new(movements)),
            failure: Arc::default(),
        }
    }

    pub fn fail_next_with(&self, message: &str) {
        self.failure.arm(message);
    }

    /// Current store contents, for asserting repository-side state.
    pub fn records(&self) -> Vec<MovementRecord> {
        self.movements.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl MovementRepository for InMemoryMovementRepository {
    async fn get_all(
        &self,
        _params: &QueryParams,
    ) -> Result<Envelope<Vec<MovementRecord>>, TransportError> {
        self.failure.check()?;
        Ok(Envelope::ok(
            self.movements.lock().unwrap_or_else(|e| e.into_inner()).clone(),
        ))
    }

    async fn create(&self, record: MovementRecord) -> Result<MovementRecord, TransportError> {
        self.failure.check()?;
        self.movements
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        id: MovementId,
        patch: MovementPatch,
    ) -> Result<MovementRecord, TransportError> {
        self.failure.check()?;
        let mut movements = self.movements.lock().unwrap_or_else(|e| e.into_inner());
        let record = movements
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| TransportError::new(format!("movement {id} not found")))?;
        if let Some(status) = patch.status {
            record.status = status;
        }
        if let Some(notes) = patch.notes {
            record.notes = notes;
        }
        Ok(record.clone())
    }

    async fn delete(&self, id: MovementId) -> Result<(), TransportError> {
        self.failure.check()?;
        let mut movements = self.movements.lock().unwrap_or_else(|e| e.into_inner());
        let before = movements.len();
        movements.retain(|m| m.id != id);
        if movements.len() == before {
            return Err(TransportError::new(format!("movement {id} not found")));
        }
        Ok(())
    }
}
