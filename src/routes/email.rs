//! Contact relay route handler

use axum::{extract::State, Json};
use tracing::{debug, info};

use crate::error::ApiResult;
use crate::extract::AppJson;
use crate::models::{MessageResponse, SendEmailRequest};
use crate::state::SharedState;

/// Relay a contact-form message to the dealership mailbox
///
/// Transport failures propagate to the caller as 500 with the underlying
/// diagnostic; there is no retry.
pub async fn send_email(
    State(state): State<SharedState>,
    AppJson(payload): AppJson<SendEmailRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let contact = payload.into_message()?;

    debug!("Relaying contact message to {}", contact.recipient);
    state.mailer.send(&contact).await?;

    info!("Contact email sent for {}", contact.email);
    Ok(Json(MessageResponse::new("Email sent successfully")))
}
