//! Rutas de cobros/pagos y del libro de contabilidad (payrecs)

use axum::{
    extract::{Path, Query, State},
    routing::{get, patch, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::payment_controller::PaymentController;
use crate::controllers::payrec_controller::PayRecController;
use crate::dto::payment_dto::{
    CreatePaymentRequest, PaymentCreatedResponse, PaymentListQuery, PaymentListResponse,
    UpdatePaymentRequest,
};
use crate::dto::payrec_dto::{
    CreatePayRecRequest, PayRecDeletedResponse, PayRecListQuery, PayRecListResponse,
    PayRecRestoredResponse, UpdatePayRecRequest, UpdatePayRecStatusRequest,
};
use crate::middleware::AuthenticatedUser;
use crate::models::payment::Payment;
use crate::models::payrec::PayRec;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_payment_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_payments).post(create_payment))
        .route(
            "/:id",
            get(get_payment).put(update_payment).delete(delete_payment),
        )
        .route("/:id/submit", post(submit_payment))
        .route("/:id/reset", post(reset_payment))
}

pub fn create_payrec_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_payrecs).post(create_payrec))
        .route("/:id", get(get_payrec).put(update_payrec).delete(delete_payrec))
        .route("/:id/status", patch(update_payrec_status))
        .route("/:id/restore", post(restore_payrec).patch(restore_payrec))
}

// Payments

async fn list_payments(
    State(state): State<AppState>,
    Query(query): Query<PaymentListQuery>,
) -> Result<Json<PaymentListResponse>, AppError> {
    let controller = PaymentController::new(state.pool.clone());
    Ok(Json(controller.list(query).await?))
}

async fn create_payment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreatePaymentRequest>,
) -> Result<Json<PaymentCreatedResponse>, AppError> {
    let controller = PaymentController::new(state.pool.clone());
    Ok(Json(controller.create(&user, request).await?))
}

async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Payment>, AppError> {
    let controller = PaymentController::new(state.pool.clone());
    Ok(Json(controller.get(id).await?))
}

async fn update_payment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePaymentRequest>,
) -> Result<Json<Payment>, AppError> {
    let controller = PaymentController::new(state.pool.clone());
    Ok(Json(controller.update(&user, id, request).await?))
}

async fn submit_payment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Payment>, AppError> {
    let controller = PaymentController::new(state.pool.clone());
    Ok(Json(controller.submit(&user, id).await?))
}

async fn reset_payment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Payment>, AppError> {
    let controller = PaymentController::new(state.pool.clone());
    Ok(Json(controller.reset(&user, id).await?))
}

async fn delete_payment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Payment>, AppError> {
    let controller = PaymentController::new(state.pool.clone());
    Ok(Json(controller.delete(&user, id).await?))
}

// PayRecs

async fn list_payrecs(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<PayRecListQuery>,
) -> Result<Json<PayRecListResponse>, AppError> {
    let controller = PayRecController::new(state.pool.clone());
    Ok(Json(controller.list(&user, query).await?))
}

async fn create_payrec(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreatePayRecRequest>,
) -> Result<Json<PayRec>, AppError> {
    let controller = PayRecController::new(state.pool.clone());
    Ok(Json(controller.create(&user, request).await?))
}

async fn get_payrec(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<PayRec>, AppError> {
    let controller = PayRecController::new(state.pool.clone());
    Ok(Json(controller.get(&user, id).await?))
}

async fn update_payrec(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePayRecRequest>,
) -> Result<Json<PayRec>, AppError> {
    let controller = PayRecController::new(state.pool.clone());
    Ok(Json(controller.update(&user, id, request).await?))
}

async fn update_payrec_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePayRecStatusRequest>,
) -> Result<Json<PayRec>, AppError> {
    let controller = PayRecController::new(state.pool.clone());
    Ok(Json(controller.update_status(&user, id, request).await?))
}

async fn delete_payrec(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<PayRecDeletedResponse>, AppError> {
    let controller = PayRecController::new(state.pool.clone());
    Ok(Json(controller.delete(&user, id).await?))
}

async fn restore_payrec(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<PayRecRestoredResponse>, AppError> {
    let controller = PayRecController::new(state.pool.clone());
    Ok(Json(controller.restore(&user, id).await?))
}
