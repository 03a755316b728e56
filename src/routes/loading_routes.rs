use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::inventory_controller::InventoryController;
use crate::controllers::loading_controller::LoadingController;
use crate::dto::common::DeletedResponse;
use crate::dto::inventory_dto::{InventoryListQuery, LedgerQuery, ReceiptRequest, ReceiptResponse};
use crate::dto::loading_dto::{
    CreateLoadingRequest, CreateLoadingResponse, GenerateCodeRequest, GenerateCodeResponse,
    MapStationRequest, VerifyCodeRequest, VerifyCodeResponse,
};
use crate::middleware::AuthenticatedUser;
use crate::models::inventory::{BowserInventory, BowserLedgerEntry};
use crate::models::loading::{Loading, LoadingStation, RouteStation};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_loading_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_loading))
        .route("/trip/:trip_id", get(loadings_for_trip))
        .route("/generate-code", post(generate_code))
        .route("/verify-code", post(verify_code))
        .route("/stations", get(list_station_mappings).post(map_station))
        // GET recibe el id de la ruta; DELETE, el de la asignación
        .route("/stations/:id", get(stations_for_route).delete(unmap_station))
}

pub fn create_inventory_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_inventory))
        .route("/:vehicle_no", get(get_inventory))
        .route("/:vehicle_no/ledger", get(inventory_ledger))
        .route("/:vehicle_no/receipt", post(record_receipt))
}

async fn list_station_mappings(
    State(state): State<AppState>,
) -> Result<Json<Vec<LoadingStation>>, AppError> {
    let controller = LoadingController::new(state.pool.clone());
    Ok(Json(controller.list_stations().await?))
}

async fn map_station(
    State(state): State<AppState>,
    Json(request): Json<MapStationRequest>,
) -> Result<Json<LoadingStation>, AppError> {
    let controller = LoadingController::new(state.pool.clone());
    Ok(Json(controller.map_station(request).await?))
}

async fn stations_for_route(
    State(state): State<AppState>,
    Path(route_id): Path<Uuid>,
) -> Result<Json<Vec<RouteStation>>, AppError> {
    let controller = LoadingController::new(state.pool.clone());
    Ok(Json(controller.stations_for_route(route_id).await?))
}

async fn unmap_station(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, AppError> {
    let controller = LoadingController::new(state.pool.clone());
    Ok(Json(controller.unmap_station(id).await?))
}

async fn loadings_for_trip(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<Vec<Loading>>, AppError> {
    let controller = LoadingController::new(state.pool.clone());
    let response = controller.list_for_trip(&user, trip_id).await?;
    Ok(Json(response))
}

async fn create_loading(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateLoadingRequest>,
) -> Result<Json<CreateLoadingResponse>, AppError> {
    let controller = LoadingController::new(state.pool.clone());
    let response = controller.create(&user, request).await?;
    Ok(Json(response))
}

async fn generate_code(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<GenerateCodeRequest>,
) -> Result<Json<GenerateCodeResponse>, AppError> {
    let controller = LoadingController::new(state.pool.clone());
    let response = controller.generate_code(&user, request).await?;
    Ok(Json(response))
}

async fn verify_code(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<VerifyCodeRequest>,
) -> Result<Json<VerifyCodeResponse>, AppError> {
    let controller = LoadingController::new(state.pool.clone());
    let response = controller.verify_code(&user, request).await?;
    Ok(Json(response))
}

async fn list_inventory(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<InventoryListQuery>,
) -> Result<Json<Vec<BowserInventory>>, AppError> {
    let controller = InventoryController::new(state.pool.clone());
    let response = controller.list(&user, query).await?;
    Ok(Json(response))
}

async fn get_inventory(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(vehicle_no): Path<String>,
) -> Result<Json<BowserInventory>, AppError> {
    let controller = InventoryController::new(state.pool.clone());
    let response = controller.get(&user, &vehicle_no).await?;
    Ok(Json(response))
}

async fn inventory_ledger(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(vehicle_no): Path<String>,
    Query(query): Query<LedgerQuery>,
) -> Result<Json<Vec<BowserLedgerEntry>>, AppError> {
    let controller = InventoryController::new(state.pool.clone());
    let response = controller.ledger(&user, &vehicle_no, query).await?;
    Ok(Json(response))
}

async fn record_receipt(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(vehicle_no): Path<String>,
    Json(request): Json<ReceiptRequest>,
) -> Result<Json<ReceiptResponse>, AppError> {
    let controller = InventoryController::new(state.pool.clone());
    let response = controller.receipt(&user, &vehicle_no, request).await?;
    Ok(Json(response))
}
