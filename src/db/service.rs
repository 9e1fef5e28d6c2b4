// Collection services for cars and inquiries
//
// Each request maps to a single driver call; MongoDB's per-document
// atomicity is the only consistency mechanism in play.

use bson::{doc, DateTime as BsonDateTime};
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::{Collection, Database};
use tracing::debug;

use crate::db::parse_object_id;
use crate::error::AppError;
use crate::models::{
    check_transition, Car, CarDocument, CarInput, CreateInquiryRequest, Inquiry, InquiryDocument,
    InquiryStatus,
};

/// Car catalog backed by the `cars` collection
pub struct CarService {
    collection: Collection<CarDocument>,
}

impl CarService {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("cars"),
        }
    }

    /// Insert a new car and return it with its generated id
    pub async fn create(&self, input: CarInput) -> Result<Car, AppError> {
        let mut document = input.into_document(Utc::now());
        let result = self.collection.insert_one(&document).await?;
        document.id = result.inserted_id.as_object_id();

        debug!("Car created: {} {}", document.make, document.model);
        Ok(Car::from(document))
    }

    /// All cars in insertion order
    pub async fn list(&self) -> Result<Vec<Car>, AppError> {
        let cursor = self.collection.find(doc! {}).await?;
        let documents: Vec<CarDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(Car::from).collect())
    }

    pub async fn get(&self, id: &str) -> Result<Car, AppError> {
        let oid = parse_object_id(id)?;
        self.collection
            .find_one(doc! { "_id": oid })
            .await?
            .map(Car::from)
            .ok_or_else(|| AppError::NotFound(format!("Car {} not found", id)))
    }

    /// Full replace of editable fields; createdAt survives, updatedAt refreshed
    pub async fn replace(&self, id: &str, input: CarInput) -> Result<Car, AppError> {
        let oid = parse_object_id(id)?;
        let mut document = self
            .collection
            .find_one(doc! { "_id": oid })
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Car {} not found", id)))?;

        input.apply_to(&mut document, Utc::now());
        self.collection
            .replace_one(doc! { "_id": oid }, &document)
            .await?;

        debug!("Car replaced: {}", id);
        Ok(Car::from(document))
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let oid = parse_object_id(id)?;
        let result = self.collection.delete_one(doc! { "_id": oid }).await?;
        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!("Car {} not found", id)));
        }

        debug!("Car deleted: {}", id);
        Ok(())
    }
}

/// Inquiry log backed by the `inquiries` collection
pub struct InquiryService {
    collection: Collection<InquiryDocument>,
}

impl InquiryService {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("inquiries"),
        }
    }

    /// Store a contact-form submission; status always starts as `new`
    pub async fn create(&self, request: CreateInquiryRequest) -> Result<Inquiry, AppError> {
        let mut document = request.into_document(Utc::now());
        let result = self.collection.insert_one(&document).await?;
        document.id = result.inserted_id.as_object_id();

        debug!("Inquiry created from {}", document.email);
        Ok(Inquiry::from(document))
    }

    /// All inquiries, newest first
    pub async fn list(&self) -> Result<Vec<Inquiry>, AppError> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "createdAt": -1 })
            .await?;
        let documents: Vec<InquiryDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(Inquiry::from).collect())
    }

    /// Move an inquiry out of `new`; terminal states admit no change
    pub async fn update_status(&self, id: &str, status: InquiryStatus) -> Result<Inquiry, AppError> {
        let oid = parse_object_id(id)?;
        let mut document = self
            .collection
            .find_one(doc! { "_id": oid })
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Inquiry {} not found", id)))?;

        check_transition(document.status, status)?;

        let now = Utc::now();
        self.collection
            .update_one(
                doc! { "_id": oid },
                doc! { "$set": {
                    "status": status.as_str(),
                    "updatedAt": BsonDateTime::from_chrono(now),
                } },
            )
            .await?;

        document.status = status;
        document.updated_at = now;

        debug!("Inquiry {} marked {}", id, status.as_str());
        Ok(Inquiry::from(document))
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let oid = parse_object_id(id)?;
        let result = self.collection.delete_one(doc! { "_id": oid }).await?;
        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!("Inquiry {} not found", id)));
        }

        debug!("Inquiry deleted: {}", id);
        Ok(())
    }
}
