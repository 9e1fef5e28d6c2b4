//! Inquiry route handlers
//!
//! Public contact-form submissions plus the admin actions that move an
//! inquiry through its one-way status lifecycle.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, info};
use validator::Validate;

use crate::error::{validation_error, ApiResult};
use crate::extract::AppJson;
use crate::models::{
    CreateInquiryRequest, Inquiry, SuccessResponse, UpdateInquiryStatusRequest,
};
use crate::state::SharedState;

/// Record a contact-form submission
pub async fn create_inquiry(
    State(state): State<SharedState>,
    AppJson(payload): AppJson<CreateInquiryRequest>,
) -> ApiResult<(StatusCode, Json<Inquiry>)> {
    // Validate input
    payload.validate().map_err(|e| validation_error(e.to_string()))?;

    debug!("Creating inquiry from {}", payload.email);
    let inquiry = state.inquiries.create(payload).await?;

    info!("Inquiry created (id: {})", inquiry.id);
    Ok((StatusCode::CREATED, Json(inquiry)))
}

/// List all inquiries, newest first
pub async fn list_inquiries(
    State(state): State<SharedState>,
) -> ApiResult<Json<Vec<Inquiry>>> {
    let inquiries = state.inquiries.list().await?;
    debug!("Listed {} inquiries", inquiries.len());
    Ok(Json(inquiries))
}

/// Move an inquiry to `contacted` or `rejected`
pub async fn update_inquiry_status(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateInquiryStatusRequest>,
) -> ApiResult<Json<SuccessResponse<Inquiry>>> {
    let inquiry = state.inquiries.update_status(&id, payload.status).await?;

    info!("Inquiry {} marked {}", inquiry.id, inquiry.status.as_str());
    Ok(Json(SuccessResponse::with_data(
        "Inquiry status updated.",
        inquiry,
    )))
}

/// Delete an inquiry
pub async fn delete_inquiry(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SuccessResponse<()>>> {
    state.inquiries.delete(&id).await?;
    info!("Inquiry deleted: {}", id);
    Ok(Json(SuccessResponse::<()>::message_only(
        "Inquiry deleted successfully.",
    )))
}
