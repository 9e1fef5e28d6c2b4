//! Car listing models and DTOs

use bson::oid::ObjectId;
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Fuel type of a listed vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FuelType {
    #[default]
    Gasoline,
    Diesel,
    Hybrid,
    Electric,
}

/// Transmission of a listed vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Transmission {
    #[default]
    Automatic,
    Manual,
    #[serde(rename = "CVT")]
    Cvt,
}

/// Body style of a listed vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BodyStyle {
    #[default]
    Sedan,
    #[serde(rename = "SUV")]
    Suv,
    Coupe,
    Convertible,
    Truck,
    Hatchback,
}

/// Car document as stored in the `cars` collection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    pub mileage: u32,
    pub fuel: FuelType,
    pub transmission: Transmission,
    pub body: BodyStyle,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub description: String,
    pub images: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

/// Car as returned to API clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    pub mileage: u32,
    pub fuel: FuelType,
    pub transmission: Transmission,
    pub body: BodyStyle,
    pub color: String,
    pub description: String,
    pub images: Vec<String>,
    pub features: Vec<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CarDocument> for Car {
    fn from(doc: CarDocument) -> Self {
        Self {
            id: doc.id.map(|id| id.to_hex()).unwrap_or_default(),
            make: doc.make,
            model: doc.model,
            year: doc.year,
            price: doc.price,
            mileage: doc.mileage,
            fuel: doc.fuel,
            transmission: doc.transmission,
            body: doc.body,
            color: doc.color,
            description: doc.description,
            images: doc.images,
            features: doc.features,
            featured: doc.featured,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

/// Request body for creating a car or fully replacing one (PUT)
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CarInput {
    #[validate(length(min = 1, message = "Make is required"))]
    pub make: String,

    #[validate(length(min = 1, message = "Model is required"))]
    pub model: String,

    #[validate(custom(function = "validate_year"))]
    pub year: i32,

    #[validate(range(exclusive_min = 0.0, message = "Price must be greater than zero"))]
    pub price: f64,

    pub mileage: u32,

    #[serde(default)]
    pub fuel: FuelType,

    #[serde(default)]
    pub transmission: Transmission,

    #[serde(default)]
    pub body: BodyStyle,

    #[serde(default)]
    pub color: String,

    #[serde(default)]
    pub description: String,

    #[validate(length(min = 1, message = "At least one image URL is required"))]
    #[validate(custom(function = "validate_image_urls"))]
    pub images: Vec<String>,

    #[serde(default)]
    pub features: Vec<String>,

    #[serde(default)]
    pub featured: bool,
}

impl CarInput {
    /// Build a fresh document with both timestamps set to `now`
    pub fn into_document(self, now: DateTime<Utc>) -> CarDocument {
        CarDocument {
            id: None,
            make: self.make,
            model: self.model,
            year: self.year,
            price: self.price,
            mileage: self.mileage,
            fuel: self.fuel,
            transmission: self.transmission,
            body: self.body,
            color: self.color,
            description: self.description,
            images: self.images,
            features: self.features,
            featured: self.featured,
            created_at: now,
            updated_at: now,
        }
    }

    /// Full replace of editable fields; id and createdAt survive,
    /// updatedAt is refreshed
    pub fn apply_to(self, doc: &mut CarDocument, now: DateTime<Utc>) {
        doc.make = self.make;
        doc.model = self.model;
        doc.year = self.year;
        doc.price = self.price;
        doc.mileage = self.mileage;
        doc.fuel = self.fuel;
        doc.transmission = self.transmission;
        doc.body = self.body;
        doc.color = self.color;
        doc.description = self.description;
        doc.images = self.images;
        doc.features = self.features;
        doc.featured = self.featured;
        doc.updated_at = now;
    }
}

/// Model years are accepted up to one year ahead of the current one
fn validate_year(year: i32) -> Result<(), ValidationError> {
    let max = Utc::now().year() + 1;
    if year < 1900 || year > max {
        let mut err = ValidationError::new("year_out_of_range");
        err.message = Some(format!("Year must be between 1900 and {}", max).into());
        return Err(err);
    }
    Ok(())
}

fn validate_image_urls(images: &[String]) -> Result<(), ValidationError> {
    for image in images {
        if url::Url::parse(image).is_err() {
            let mut err = ValidationError::new("invalid_image_url");
            err.message = Some(format!("Invalid image URL: {}", image).into());
            return Err(err);
        }
    }
    Ok(())
}
