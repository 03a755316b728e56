use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::delivery_controller::DeliveryController;
use crate::dto::delivery_dto::{RecordDeliveryRequest, RecordDeliveryResponse};
use crate::middleware::AuthenticatedUser;
use crate::models::delivery::{Delivery, DeliveryPlan, PendingDelivery};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_delivery_plan_router() -> Router<AppState> {
    Router::new().route("/:trip_id", get(plans_for_trip))
}

pub fn create_delivery_router() -> Router<AppState> {
    Router::new()
        .route("/", post(record_delivery))
        .route("/pending/:trip_id", get(pending_for_trip))
        .route("/completed/:trip_id", get(completed_for_trip))
}

fn controller(state: &AppState) -> DeliveryController {
    DeliveryController::new(
        state.pool.clone(),
        state.notifier.clone(),
        state.metrics.clone(),
    )
}

async fn plans_for_trip(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<Vec<DeliveryPlan>>, AppError> {
    let response = controller(&state).plans(&user, trip_id).await?;
    Ok(Json(response))
}

async fn record_delivery(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<RecordDeliveryRequest>,
) -> Result<Json<RecordDeliveryResponse>, AppError> {
    let response = controller(&state).record(&user, request).await?;
    Ok(Json(response))
}

async fn pending_for_trip(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<Vec<PendingDelivery>>, AppError> {
    let response = controller(&state).pending(&user, trip_id).await?;
    Ok(Json(response))
}

async fn completed_for_trip(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<Vec<Delivery>>, AppError> {
    let response = controller(&state).completed(&user, trip_id).await?;
    Ok(Json(response))
}
