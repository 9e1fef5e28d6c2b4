//! SMTP contact relay
//!
//! Wraps the `lettre` async SMTP transport to forward contact-form
//! submissions to the dealership mailbox. A transport is built per send;
//! failures propagate to the caller without retry.

use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::info;

use crate::config::EmailConfig;
use crate::models::ContactMessage;

/// Display name used on outgoing relay messages
const FROM_DISPLAY_NAME: &str = "Car Sales Contact";

/// Error type for mail relay failures
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// SMTP transport-level failure (authentication, connection, etc.)
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled
    #[error("Email build error: {0}")]
    Build(String),

    /// No sender address configured (EMAIL_FROM / EMAIL_USER)
    #[error("No sender address configured")]
    NoSender,
}

/// Sends contact-form messages through the configured SMTP relay
#[derive(Clone)]
pub struct Mailer {
    config: EmailConfig,
}

impl Mailer {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Relay a contact message to its recipient
    pub async fn send(&self, contact: &ContactMessage) -> Result<(), MailError> {
        let from_address = self.config.from_address().ok_or(MailError::NoSender)?;
        let from = Mailbox::new(Some(FROM_DISPLAY_NAME.to_string()), from_address.parse()?);

        let email = Message::builder()
            .from(from)
            .to(contact.recipient.parse()?)
            .subject(contact.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                plain_body(contact),
                html_body(contact),
            ))
            .map_err(|e| MailError::Build(e.to_string()))?;

        let mut transport_builder = if self.config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.host)?
                .port(self.config.port)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)?
                .port(self.config.port)
        };

        if let (Some(user), Some(pass)) = (&self.config.user, &self.config.password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(email).await?;

        info!(to = %contact.recipient, "Contact email relayed");
        Ok(())
    }
}

/// Plain-text rendering of a contact message
fn plain_body(contact: &ContactMessage) -> String {
    format!(
        "Name: {}\nEmail: {}\nPhone: {}\n\nMessage:\n{}\n",
        contact.name,
        contact.email,
        contact.phone.as_deref().unwrap_or("Not provided"),
        contact.message,
    )
}

/// HTML rendering of a contact message
fn html_body(contact: &ContactMessage) -> String {
    let phone_row = match &contact.phone {
        Some(phone) => format!(
            "<p><strong>Phone:</strong> <a href=\"tel:{phone}\">{phone}</a></p>"
        ),
        None => String::new(),
    };

    format!(
        concat!(
            "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">",
            "<h2 style=\"color: #333;\">New Vehicle Inquiry</h2>",
            "<div style=\"background: #f9f9f9; padding: 20px; border-radius: 5px;\">",
            "<p><strong>Name:</strong> {name}</p>",
            "<p><strong>Email:</strong> <a href=\"mailto:{email}\">{email}</a></p>",
            "{phone_row}",
            "<p><strong>Message:</strong></p>",
            "<p style=\"white-space: pre-line;\">{message}</p>",
            "</div></div>"
        ),
        name = contact.name,
        email = contact.email,
        phone_row = phone_row,
        message = contact.message,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn contact() -> ContactMessage {
        ContactMessage {
            recipient: "sales@dealer.test".to_string(),
            subject: "Vehicle inquiry".to_string(),
            name: "Jamie".to_string(),
            email: "jamie@example.com".to_string(),
            phone: None,
            message: "Is the Corolla still available?".to_string(),
        }
    }

    #[test]
    fn plain_body_marks_missing_phone() {
        let body = plain_body(&contact());
        assert!(body.contains("Phone: Not provided"));
        assert!(body.contains("Name: Jamie"));
    }

    #[test]
    fn plain_body_includes_phone_when_present() {
        let mut message = contact();
        message.phone = Some("555-0100".to_string());
        assert!(plain_body(&message).contains("Phone: 555-0100"));
    }

    #[test]
    fn html_body_omits_phone_row_when_absent() {
        let html = html_body(&contact());
        assert!(!html.contains("tel:"));
        assert!(html.contains("mailto:jamie@example.com"));
    }

    #[test]
    fn mail_error_display_build() {
        let err = MailError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }
}
