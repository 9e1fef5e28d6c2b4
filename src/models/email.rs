//! Contact relay models and DTOs

use serde::Deserialize;

use crate::error::AppError;

/// Raw request body for the contact relay endpoint
///
/// Every field is optional at the deserialization layer so the endpoint
/// can answer missing input with its documented 400 body instead of a
/// deserialization rejection. Empty strings count as missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendEmailRequest {
    pub recipient: Option<String>,
    pub subject: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

/// A fully validated contact message ready for the mailer
#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub recipient: String,
    pub subject: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

impl SendEmailRequest {
    /// Check required fields and produce the message to relay
    pub fn into_message(self) -> Result<ContactMessage, AppError> {
        let required = |field: Option<String>| field.filter(|value| !value.trim().is_empty());

        match (
            required(self.recipient),
            required(self.subject),
            required(self.name),
            required(self.email),
            required(self.message),
        ) {
            (Some(recipient), Some(subject), Some(name), Some(email), Some(message)) => {
                Ok(ContactMessage {
                    recipient,
                    subject,
                    name,
                    email,
                    phone: self.phone.filter(|value| !value.trim().is_empty()),
                    message,
                })
            }
            _ => Err(AppError::Validation("Missing required fields".to_string())),
        }
    }
}
