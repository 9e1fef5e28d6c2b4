//! Database connection management
//!
//! Connects once at startup and hands a single database handle to the
//! per-collection services.

pub mod service;

pub use service::{CarService, InquiryService};

use bson::{doc, oid::ObjectId};
use mongodb::{Client, Database};
use tracing::info;

use crate::error::AppError;

/// Connect to MongoDB and verify the server is reachable
pub async fn connect(uri: &str, database: &str) -> Result<Database, AppError> {
    let client = Client::with_uri_str(uri).await?;
    let db = client.database(database);

    // Round-trip a ping so a bad URI fails at startup, not first request
    db.run_command(doc! { "ping": 1 }).await?;

    info!("Connected to MongoDB database '{}'", database);
    Ok(db)
}

/// Liveness probe for the health endpoint
pub async fn ping(db: &Database) -> bool {
    db.run_command(doc! { "ping": 1 }).await.is_ok()
}

/// Parse a path identifier into an ObjectId, rejecting malformed input
pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id)
        .map_err(|_| AppError::MalformedId(format!("'{}' is not a valid identifier", id)))
}
