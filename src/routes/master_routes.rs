//! Rutas de datos maestros: depósitos, rutas de reparto y estaciones

use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::depot_controller::DepotController;
use crate::controllers::route_controller::RouteController;
use crate::controllers::station_controller::StationController;
use crate::dto::common::DeletedResponse;
use crate::dto::master_dto::{
    CreateDepotRequest, CreateRouteRequest, CreateStationRequest, UpdateDepotRequest,
    UpdateRouteRequest, UpdateStationRequest,
};
use crate::middleware::AuthenticatedUser;
use crate::models::master::{Depot, Route, Station};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_depot_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_depots).post(create_depot))
        .route("/:id", get(get_depot).put(update_depot).delete(delete_depot))
}

pub fn create_route_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_routes).post(create_route))
        .route("/:id", get(get_route).put(update_route).delete(delete_route))
}

pub fn create_station_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stations).post(create_station))
        .route("/:id", get(get_station).put(update_station).delete(delete_station))
}

// Depósitos

async fn list_depots(State(state): State<AppState>) -> Result<Json<Vec<Depot>>, AppError> {
    let controller = DepotController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}

async fn get_depot(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Depot>, AppError> {
    let controller = DepotController::new(state.pool.clone());
    Ok(Json(controller.get(id).await?))
}

async fn create_depot(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateDepotRequest>,
) -> Result<Json<Depot>, AppError> {
    let controller = DepotController::new(state.pool.clone());
    Ok(Json(controller.create(&user, request).await?))
}

async fn update_depot(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateDepotRequest>,
) -> Result<Json<Depot>, AppError> {
    let controller = DepotController::new(state.pool.clone());
    Ok(Json(controller.update(&user, id, request).await?))
}

async fn delete_depot(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, AppError> {
    let controller = DepotController::new(state.pool.clone());
    Ok(Json(controller.delete(&user, id).await?))
}

// Rutas de reparto

async fn list_routes(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<Route>>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    Ok(Json(controller.list(&user).await?))
}

async fn get_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Route>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    Ok(Json(controller.get(id).await?))
}

async fn create_route(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateRouteRequest>,
) -> Result<Json<Route>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    Ok(Json(controller.create(&user, request).await?))
}

async fn update_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRouteRequest>,
) -> Result<Json<Route>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    Ok(Json(controller.delete(id).await?))
}

// Estaciones

async fn list_stations(State(state): State<AppState>) -> Result<Json<Vec<Station>>, AppError> {
    let controller = StationController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}

async fn get_station(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Station>, AppError> {
    let controller = StationController::new(state.pool.clone());
    Ok(Json(controller.get(id).await?))
}

async fn create_station(
    State(state): State<AppState>,
    Json(request): Json<CreateStationRequest>,
) -> Result<Json<Station>, AppError> {
    let controller = StationController::new(state.pool.clone());
    Ok(Json(controller.create(request).await?))
}

async fn update_station(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStationRequest>,
) -> Result<Json<Station>, AppError> {
    let controller = StationController::new(state.pool.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_station(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, AppError> {
    let controller = StationController::new(state.pool.clone());
    Ok(Json(controller.delete(id).await?))
}
