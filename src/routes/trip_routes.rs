use axum::{
    extract::{Path, Query, State},
    response::Response,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::invoice_controller::InvoiceController;
use crate::controllers::trip_controller::TripController;
use crate::dto::common::DeletedResponse;
use crate::dto::trip_dto::{
    AddTripOrderRequest, AddTripOrderResponse, AssignTripRequest, AssignTripResponse,
    ResetSerialResponse, TripDetail, TripListQuery, TripLoginRequest, TripLoginResponse,
    TripLogoutRequest, TripLogoutResponse,
};
use crate::middleware::AuthenticatedUser;
use crate::models::trip::{Trip, TripStatus};
use crate::routes::invoice_routes::pdf_response;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_trip_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_trips))
        .route("/assign", post(assign_trip))
        .route("/login", post(login_trip))
        .route("/logout", post(logout_trip))
        .route("/reset-serial", post(reset_serial))
        .route("/assigned/:driver_id", get(assigned_for_driver))
        .route("/active/:driver_id", get(active_for_driver))
        .route("/:id", get(get_trip).delete(delete_trip))
        .route("/:id/orders", post(add_order))
        .route("/:id/invoice", get(trip_invoice_pdf))
}

fn controller(state: &AppState) -> TripController {
    TripController::new(state.pool.clone(), state.metrics.clone())
}

async fn list_trips(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<TripListQuery>,
) -> Result<Json<Vec<Trip>>, AppError> {
    let response = controller(&state).list(&user, query).await?;
    Ok(Json(response))
}

async fn assign_trip(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<AssignTripRequest>,
) -> Result<Json<AssignTripResponse>, AppError> {
    let response = controller(&state).assign(&user, request).await?;
    Ok(Json(response))
}

async fn login_trip(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<TripLoginRequest>,
) -> Result<Json<TripLoginResponse>, AppError> {
    let response = controller(&state).login(&user, request).await?;
    Ok(Json(response))
}

async fn logout_trip(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<TripLogoutRequest>,
) -> Result<Json<TripLogoutResponse>, AppError> {
    let response = controller(&state).logout(&user, request).await?;
    Ok(Json(response))
}

async fn reset_serial(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ResetSerialResponse>, AppError> {
    let response = controller(&state).reset_serial(&user).await?;
    Ok(Json(response))
}

async fn assigned_for_driver(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(driver_id): Path<Uuid>,
) -> Result<Json<Trip>, AppError> {
    let response = controller(&state)
        .latest_for_driver(&user, driver_id, TripStatus::Assigned)
        .await?;
    Ok(Json(response))
}

async fn active_for_driver(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(driver_id): Path<Uuid>,
) -> Result<Json<Trip>, AppError> {
    let response = controller(&state)
        .latest_for_driver(&user, driver_id, TripStatus::Active)
        .await?;
    Ok(Json(response))
}

async fn get_trip(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<TripDetail>, AppError> {
    let response = controller(&state).get(&user, id).await?;
    Ok(Json(response))
}

async fn delete_trip(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, AppError> {
    let response = controller(&state).delete(&user, id).await?;
    Ok(Json(response))
}

async fn add_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddTripOrderRequest>,
) -> Result<Json<AddTripOrderResponse>, AppError> {
    let response = controller(&state).add_order(&user, id, request).await?;
    Ok(Json(response))
}

async fn trip_invoice_pdf(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let invoices = InvoiceController::new(
        state.pool.clone(),
        state.config.clone(),
        state.metrics.clone(),
    );
    let pdf = invoices.trip_pdf(&user, id).await?;
    Ok(pdf_response(pdf))
}
