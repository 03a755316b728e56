use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, MeResponse, RegisterRequest};
use crate::middleware::AuthenticatedUser;
use crate::models::user::UserProfile;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::JwtConfig;

/// Rutas protegidas de autenticación
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/me", get(me))
}

/// Login: la única ruta de la API sin token
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let controller = AuthController::new(state.pool.clone());
    let jwt = JwtConfig::from(state.config.as_ref());
    let response = controller.login(request, &jwt).await?;
    Ok(Json(response))
}

async fn register(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let controller = AuthController::new(state.pool.clone());
    let response = controller.register(&user, request).await?;
    Ok(Json(response))
}

async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<MeResponse>, AppError> {
    let controller = AuthController::new(state.pool.clone());
    let response = controller.me(&user).await?;
    Ok(Json(response))
}
