use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::fleet_controller::FleetController;
use crate::dto::fleet_dto::{
    AssignDriverRequest, FleetListQuery, FleetOrderRequest, ReleaseDriverRequest,
    SyncFleetsResponse,
};
use crate::middleware::AuthenticatedUser;
use crate::models::fleet::{Fleet, FleetView};
use crate::models::order::Order;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_fleet_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_fleets))
        .route("/assign-driver", post(assign_driver))
        .route("/release-driver", post(release_driver))
        .route("/sync-from-vehicles", post(sync_from_vehicles))
        .route("/:id/allocate", post(allocate_order))
        .route("/:id/release", post(release_order))
}

async fn list_fleets(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<FleetListQuery>,
) -> Result<Json<Vec<FleetView>>, AppError> {
    let controller = FleetController::new(state.pool.clone());
    let response = controller.list(&user, query).await?;
    Ok(Json(response))
}

async fn assign_driver(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<AssignDriverRequest>,
) -> Result<Json<Fleet>, AppError> {
    let controller = FleetController::new(state.pool.clone());
    let response = controller.assign_driver(&user, request).await?;
    Ok(Json(response))
}

async fn release_driver(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<ReleaseDriverRequest>,
) -> Result<Json<Fleet>, AppError> {
    let controller = FleetController::new(state.pool.clone());
    let response = controller.release_driver(&user, request).await?;
    Ok(Json(response))
}

async fn sync_from_vehicles(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<SyncFleetsResponse>, AppError> {
    let controller = FleetController::new(state.pool.clone());
    let response = controller.sync_from_vehicles(&user).await?;
    Ok(Json(response))
}

async fn allocate_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(fleet_id): Path<Uuid>,
    Json(request): Json<FleetOrderRequest>,
) -> Result<Json<Order>, AppError> {
    let controller = FleetController::new(state.pool.clone());
    let response = controller.allocate(&user, fleet_id, request).await?;
    Ok(Json(response))
}

async fn release_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(fleet_id): Path<Uuid>,
    Json(request): Json<FleetOrderRequest>,
) -> Result<Json<Order>, AppError> {
    let controller = FleetController::new(state.pool.clone());
    let response = controller.release(&user, fleet_id, request).await?;
    Ok(Json(response))
}
