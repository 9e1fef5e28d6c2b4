//! Customer inquiry models and DTOs

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;

/// Lifecycle status of an inquiry
///
/// `new` is the only non-terminal state; `contacted` and `rejected`
/// admit no further transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    #[default]
    New,
    Contacted,
    Rejected,
}

impl InquiryStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, InquiryStatus::Contacted | InquiryStatus::Rejected)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryStatus::New => "new",
            InquiryStatus::Contacted => "contacted",
            InquiryStatus::Rejected => "rejected",
        }
    }
}

/// Reject transitions the state machine does not allow
pub fn check_transition(current: InquiryStatus, target: InquiryStatus) -> Result<(), AppError> {
    if target == InquiryStatus::New {
        return Err(AppError::Validation(
            "Status must be 'contacted' or 'rejected'".to_string(),
        ));
    }
    if current.is_terminal() {
        return Err(AppError::Conflict(format!(
            "Inquiry is already '{}' and cannot change status",
            current.as_str()
        )));
    }
    Ok(())
}

/// Snapshot of the car an inquiry refers to (not a foreign key)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarSnapshot {
    pub make: String,
    pub model: String,
}

/// Inquiry document as stored in the `inquiries` collection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
    #[serde(default)]
    pub car: Option<CarSnapshot>,
    #[serde(default)]
    pub status: InquiryStatus,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

/// Inquiry as returned to API clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub car: Option<CarSnapshot>,
    pub status: InquiryStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<InquiryDocument> for Inquiry {
    fn from(doc: InquiryDocument) -> Self {
        Self {
            id: doc.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: doc.name,
            email: doc.email,
            phone: doc.phone,
            message: doc.message,
            car: doc.car,
            status: doc.status,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

/// Request body for the public contact form
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInquiryRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "A valid email address is required"))]
    pub email: String,

    #[serde(default)]
    pub phone: Option<String>,

    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,

    #[serde(default)]
    pub car: Option<CarSnapshot>,
}

impl CreateInquiryRequest {
    /// New inquiries always start out in `new`, whatever the client sent
    pub fn into_document(self, now: DateTime<Utc>) -> InquiryDocument {
        InquiryDocument {
            id: None,
            name: self.name,
            email: self.email,
            phone: self.phone,
            message: self.message,
            car: self.car,
            status: InquiryStatus::New,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Request body for the admin status update
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInquiryStatusRequest {
    pub status: InquiryStatus,
}
