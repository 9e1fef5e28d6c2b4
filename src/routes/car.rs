//! Car catalog route handlers
//!
//! CRUD over the car inventory. Bodies are validated at the boundary
//! before any storage call.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, info};
use validator::Validate;

use crate::error::{validation_error, ApiResult};
use crate::extract::AppJson;
use crate::models::{Car, CarInput, SuccessResponse};
use crate::state::SharedState;

/// Create a new car listing
pub async fn create_car(
    State(state): State<SharedState>,
    AppJson(payload): AppJson<CarInput>,
) -> ApiResult<(StatusCode, Json<Car>)> {
    // Validate input
    payload.validate().map_err(|e| validation_error(e.to_string()))?;

    debug!("Creating car: {} {}", payload.make, payload.model);
    let car = state.cars.create(payload).await?;

    info!("Car created: {} {} (id: {})", car.make, car.model, car.id);
    Ok((StatusCode::CREATED, Json(car)))
}

/// List all cars
pub async fn list_cars(State(state): State<SharedState>) -> ApiResult<Json<Vec<Car>>> {
    let cars = state.cars.list().await?;
    debug!("Listed {} cars", cars.len());
    Ok(Json(cars))
}

/// Fetch a single car by id
pub async fn get_car(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Car>> {
    let car = state.cars.get(&id).await?;
    Ok(Json(car))
}

/// Full replace of a car's editable fields
pub async fn update_car(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<CarInput>,
) -> ApiResult<Json<Car>> {
    // Validate input
    payload.validate().map_err(|e| validation_error(e.to_string()))?;

    let car = state.cars.replace(&id, payload).await?;
    info!("Car updated: {}", car.id);
    Ok(Json(car))
}

/// Delete a car listing
pub async fn delete_car(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SuccessResponse<()>>> {
    state.cars.delete(&id).await?;
    info!("Car deleted: {}", id);
    Ok(Json(SuccessResponse::<()>::message_only(
        "Car deleted successfully.",
    )))
}
