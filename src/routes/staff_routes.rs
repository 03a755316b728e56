//! Rutas de personas: usuarios, empleados y asociados de ventas

use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::employee_controller::EmployeeController;
use crate::controllers::sales_associate_controller::SalesAssociateController;
use crate::controllers::user_controller::UserController;
use crate::dto::common::DeletedResponse;
use crate::dto::employee_dto::{
    CreateEmployeeRequest, CreateSalesAssociateRequest, UpdateEmployeeRequest,
    UpdateSalesAssociateRequest,
};
use crate::dto::user_dto::UpdateUserRequest;
use crate::middleware::AuthenticatedUser;
use crate::models::employee::{Employee, SalesAssociate};
use crate::models::user::UserProfile;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

pub fn create_employee_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route("/:id", get(get_employee).put(update_employee).delete(delete_employee))
}

pub fn create_sales_associate_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sales_associates).post(create_sales_associate))
        .route(
            "/:id",
            get(get_sales_associate)
                .put(update_sales_associate)
                .delete(delete_sales_associate),
        )
}

// Usuarios

async fn list_users(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<UserProfile>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    Ok(Json(controller.list(&user).await?))
}

async fn get_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserProfile>, AppError> {
    let controller = UserController::new(state.pool.clone());
    Ok(Json(controller.get(&user, id).await?))
}

async fn update_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let controller = UserController::new(state.pool.clone());
    Ok(Json(controller.update(&user, id, request).await?))
}

async fn delete_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, AppError> {
    let controller = UserController::new(state.pool.clone());
    Ok(Json(controller.delete(&user, id).await?))
}

// Empleados

async fn list_employees(State(state): State<AppState>) -> Result<Json<Vec<Employee>>, AppError> {
    let controller = EmployeeController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}

async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Employee>, AppError> {
    let controller = EmployeeController::new(state.pool.clone());
    Ok(Json(controller.get(id).await?))
}

async fn create_employee(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateEmployeeRequest>,
) -> Result<Json<Employee>, AppError> {
    let controller = EmployeeController::new(state.pool.clone());
    Ok(Json(controller.create(&user, request).await?))
}

async fn update_employee(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateEmployeeRequest>,
) -> Result<Json<Employee>, AppError> {
    let controller = EmployeeController::new(state.pool.clone());
    Ok(Json(controller.update(&user, id, request).await?))
}

async fn delete_employee(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, AppError> {
    let controller = EmployeeController::new(state.pool.clone());
    Ok(Json(controller.delete(&user, id).await?))
}

// Asociados de ventas

async fn list_sales_associates(
    State(state): State<AppState>,
) -> Result<Json<Vec<SalesAssociate>>, AppError> {
    let controller = SalesAssociateController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}

async fn get_sales_associate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SalesAssociate>, AppError> {
    let controller = SalesAssociateController::new(state.pool.clone());
    Ok(Json(controller.get(id).await?))
}

async fn create_sales_associate(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateSalesAssociateRequest>,
) -> Result<Json<SalesAssociate>, AppError> {
    let controller = SalesAssociateController::new(state.pool.clone());
    Ok(Json(controller.create(&user, request).await?))
}

async fn update_sales_associate(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateSalesAssociateRequest>,
) -> Result<Json<SalesAssociate>, AppError> {
    let controller = SalesAssociateController::new(state.pool.clone());
    Ok(Json(controller.update(&user, id, request).await?))
}

async fn delete_sales_associate(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, AppError> {
    let controller = SalesAssociateController::new(state.pool.clone());
    Ok(Json(controller.delete(&user, id).await?))
}
