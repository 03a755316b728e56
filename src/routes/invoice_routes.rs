use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::invoice_controller::{InvoiceController, InvoicePdf};
use crate::dto::common::Paginated;
use crate::dto::invoice_dto::{FromTripRequest, InvoiceListQuery, InvoicePrefill};
use crate::middleware::AuthenticatedUser;
use crate::models::invoice::Invoice;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_invoice_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_invoices))
        .route("/prefill-from-trip/:trip_id", get(prefill_from_trip))
        .route("/from-trip/:trip_id", post(from_trip))
        .route("/:id", get(get_invoice))
        .route("/:id/pdf", get(invoice_pdf))
}

/// PDF en línea con su nombre de fichero
pub fn pdf_response(pdf: InvoicePdf) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", pdf.file_name),
            ),
        ],
        pdf.bytes,
    )
        .into_response()
}

fn controller(state: &AppState) -> InvoiceController {
    InvoiceController::new(
        state.pool.clone(),
        state.config.clone(),
        state.metrics.clone(),
    )
}

async fn list_invoices(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<InvoiceListQuery>,
) -> Result<Json<Paginated<Invoice>>, AppError> {
    let response = controller(&state).list(&user, query).await?;
    Ok(Json(response))
}

async fn get_invoice(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Invoice>, AppError> {
    let response = controller(&state).get(&user, id).await?;
    Ok(Json(response))
}

async fn invoice_pdf(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let pdf = controller(&state).pdf(&user, id).await?;
    Ok(pdf_response(pdf))
}

async fn prefill_from_trip(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<InvoicePrefill>, AppError> {
    let response = controller(&state).prefill(&user, trip_id).await?;
    Ok(Json(response))
}

async fn from_trip(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(trip_id): Path<Uuid>,
    request: Option<Json<FromTripRequest>>,
) -> Result<Json<Invoice>, AppError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let response = controller(&state).from_trip(&user, trip_id, request).await?;
    Ok(Json(response))
}
