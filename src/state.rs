//! Application state management
//!
//! Contains shared state accessible across all handlers. Storage comes in
//! two flavors behind the same call surface: MongoDB-backed services, or
//! the demo-mode stores when no database is configured. Handlers never
//! know which one they are talking to.

use mongodb::Database;
use std::sync::Arc;

use crate::db::{CarService, InquiryService};
use crate::error::AppError;
use crate::inventory::{parse_local_id, InventoryStore, LocalInquiryStore};
use crate::mailer::Mailer;
use crate::models::{Car, CarInput, CreateInquiryRequest, Inquiry, InquiryStatus};

/// Car catalog, dispatching to the configured backend
pub enum CarStore {
    Mongo(CarService),
    Local(InventoryStore),
}

impl CarStore {
    pub async fn create(&self, input: CarInput) -> Result<Car, AppError> {
        match self {
            CarStore::Mongo(service) => service.create(input).await,
            CarStore::Local(store) => store.create(input).await,
        }
    }

    pub async fn list(&self) -> Result<Vec<Car>, AppError> {
        match self {
            CarStore::Mongo(service) => service.list().await,
            CarStore::Local(store) => Ok(store.list().await),
        }
    }

    pub async fn get(&self, id: &str) -> Result<Car, AppError> {
        match self {
            CarStore::Mongo(service) => service.get(id).await,
            CarStore::Local(store) => store.get(parse_local_id(id)?).await,
        }
    }

    pub async fn replace(&self, id: &str, input: CarInput) -> Result<Car, AppError> {
        match self {
            CarStore::Mongo(service) => service.replace(id, input).await,
            CarStore::Local(store) => store.replace(parse_local_id(id)?, input).await,
        }
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        match self {
            CarStore::Mongo(service) => service.delete(id).await,
            CarStore::Local(store) => store.delete(parse_local_id(id)?).await,
        }
    }
}

/// Inquiry log, dispatching to the configured backend
pub enum InquiryStore {
    Mongo(InquiryService),
    Local(LocalInquiryStore),
}

impl InquiryStore {
    pub async fn create(&self, request: CreateInquiryRequest) -> Result<Inquiry, AppError> {
        match self {
            InquiryStore::Mongo(service) => service.create(request).await,
            InquiryStore::Local(store) => Ok(store.create(request).await),
        }
    }

    pub async fn list(&self) -> Result<Vec<Inquiry>, AppError> {
        match self {
            InquiryStore::Mongo(service) => service.list().await,
            InquiryStore::Local(store) => Ok(store.list().await),
        }
    }

    pub async fn update_status(
        &self,
        id: &str,
        status: InquiryStatus,
    ) -> Result<Inquiry, AppError> {
        match self {
            InquiryStore::Mongo(service) => service.update_status(id, status).await,
            InquiryStore::Local(store) => {
                store.update_status(parse_local_id(id)?, status).await
            }
        }
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        match self {
            InquiryStore::Mongo(service) => service.delete(id).await,
            InquiryStore::Local(store) => store.delete(parse_local_id(id)?).await,
        }
    }
}

/// Application state shared across all handlers
pub struct AppState {
    /// Database handle, present only in database mode (health probe)
    pub db: Option<Database>,

    /// Car catalog (database or demo backend)
    pub cars: CarStore,

    /// Inquiry log (database or demo backend)
    pub inquiries: InquiryStore,

    /// SMTP contact relay
    pub mailer: Mailer,
}

impl AppState {
    /// Database mode: both collections served from MongoDB
    pub fn with_database(db: Database, mailer: Mailer) -> Self {
        let cars = CarStore::Mongo(CarService::new(&db));
        let inquiries = InquiryStore::Mongo(InquiryService::new(&db));
        Self {
            db: Some(db),
            cars,
            inquiries,
            mailer,
        }
    }

    /// Demo mode: seeded local inventory, in-process inquiries
    pub fn standalone(store: InventoryStore, mailer: Mailer) -> Self {
        Self {
            db: None,
            cars: CarStore::Local(store),
            inquiries: InquiryStore::Local(LocalInquiryStore::new()),
            mailer,
        }
    }
}

/// Type alias for shared state
pub type SharedState = Arc<AppState>;
