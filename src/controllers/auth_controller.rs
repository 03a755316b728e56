//! Controlador de autenticación
//!
//! Login con contraseña bcrypt, alta de usuarios por administradores y
//! perfil del usuario autenticado.

use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::PgPool;
use tracing::{info, warn};
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, LoginResponse, MeResponse, RegisterRequest};
use crate::middleware::AuthenticatedUser;
use crate::models::user::{UserProfile, UserType};
use crate::repositories::trip_repository::TripRepository;
use crate::repositories::user_repository::{NewUser, UserRepository};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::jwt::{generate_token, JwtConfig};

pub struct AuthController {
    users: UserRepository,
    trips: TripRepository,
}

impl AuthController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            trips: TripRepository::new(pool),
        }
    }

    pub async fn login(&self, request: LoginRequest, jwt: &JwtConfig) -> AppResult<LoginResponse> {
        request.validate()?;

        // Mismo mensaje para usuario inexistente y contraseña incorrecta
        let invalid = || AppError::Unauthorized("Invalid credentials".to_string());

        let user = self
            .users
            .find_by_login(request.user_id.trim())
            .await?
            .ok_or_else(invalid)?;

        if !verify(&request.pwd, &user.password_hash)? {
            warn!("🔒 Contraseña incorrecta para {}", user.user_id);
            return Err(invalid());
        }

        // Un conductor solo entra si tiene un viaje asignado o en curso
        if user.user_type == UserType::Driver {
            let driver_id = user.driver_id.ok_or_else(|| {
                AppError::Forbidden("Driver account is not linked to a driver".to_string())
            })?;
            if !self.trips.driver_has_open_trip(driver_id).await? {
                return Err(AppError::Forbidden(
                    "No assigned or active trip for this driver".to_string(),
                ));
            }
        }

        let token = generate_token(&user, jwt)?;
        info!("✅ Login correcto: {} ({:?})", user.user_id, user.user_type);

        Ok(LoginResponse {
            token,
            is_admin: user.is_admin(),
            user_id: user.user_id,
            user_type: user.user_type,
        })
    }

    pub async fn register(
        &self,
        caller: &AuthenticatedUser,
        request: RegisterRequest,
    ) -> AppResult<UserProfile> {
        caller.ensure_admin()?;
        request.validate()?;

        let user_id = request.user_id.trim().to_string();
        if self.users.find_by_login(&user_id).await?.is_some() {
            return Err(AppError::Conflict(format!("User {} already exists", user_id)));
        }
        if request.user_type == UserType::Driver && request.driver_id.is_none() {
            return Err(AppError::BadRequest(
                "driverId is required for driver accounts".to_string(),
            ));
        }

        let password_hash = hash(&request.pwd, DEFAULT_COST)?;
        let user = self
            .users
            .create(NewUser {
                user_id,
                password_hash,
                user_type: request.user_type,
                name: request.name,
                access_level: request.access_level.unwrap_or(1),
                emp_cd: request.emp_cd,
                depot_cd: request.depot_cd,
                driver_id: request.driver_id,
                customer_id: request.customer_id,
            })
            .await?;

        info!("👤 Usuario {} creado por {}", user.user_id, caller.user_id);
        Ok(UserProfile::from(user))
    }

    pub async fn me(&self, caller: &AuthenticatedUser) -> AppResult<MeResponse> {
        let user = self
            .users
            .find_by_id(caller.id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(MeResponse {
            user: UserProfile::from(user),
        })
    }
}
