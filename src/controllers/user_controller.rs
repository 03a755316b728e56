//! Controlador de usuarios
//!
//! Consulta y mantenimiento de cuentas ya dadas de alta; el alta sigue en
//! `/api/auth/register`. Las referencias a empleado, conductor y cliente
//! deben existir.

use bcrypt::{hash, DEFAULT_COST};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::DeletedResponse;
use crate::dto::user_dto::UpdateUserRequest;
use crate::middleware::AuthenticatedUser;
use crate::models::user::UserProfile;
use crate::repositories::customer_repository::CustomerRepository;
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::employee_repository::EmployeeRepository;
use crate::repositories::user_repository::{UserChanges, UserRepository};
use crate::utils::errors::{AppError, AppResult};

pub struct UserController {
    repository: UserRepository,
    employees: EmployeeRepository,
    drivers: DriverRepository,
    customers: CustomerRepository,
}

impl UserController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool.clone()),
            employees: EmployeeRepository::new(pool.clone()),
            drivers: DriverRepository::new(pool.clone()),
            customers: CustomerRepository::new(pool),
        }
    }

    pub async fn list(&self, caller: &AuthenticatedUser) -> AppResult<Vec<UserProfile>> {
        caller.ensure_admin()?;
        let users = self.repository.list().await?;
        Ok(users.into_iter().map(UserProfile::from).collect())
    }

    /// Un usuario puede consultarse a sí mismo; el resto, solo administradores
    pub async fn get(&self, caller: &AuthenticatedUser, id: Uuid) -> AppResult<UserProfile> {
        if caller.id != id {
            caller.ensure_admin()?;
        }
        self.repository
            .find_by_id(id)
            .await?
            .map(UserProfile::from)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn update(
        &self,
        caller: &AuthenticatedUser,
        id: Uuid,
        request: UpdateUserRequest,
    ) -> AppResult<UserProfile> {
        caller.ensure_admin()?;
        request.validate()?;

        let emp_cd = request.emp_cd.map(|c| c.trim().to_string()).filter(|c| !c.is_empty());
        if let Some(code) = emp_cd.as_deref() {
            if self.employees.find_by_code(code).await?.is_none() {
                return Err(AppError::BadRequest(format!("Employee {} not found", code)));
            }
        }
        if let Some(driver_id) = request.driver_id {
            if self.drivers.find_by_id(driver_id).await?.is_none() {
                return Err(AppError::BadRequest(format!("Driver {} not found", driver_id)));
            }
        }
        if let Some(customer_id) = request.customer_id {
            if self.customers.find_by_id(customer_id).await?.is_none() {
                return Err(AppError::BadRequest(format!("Customer {} not found", customer_id)));
            }
        }

        let password_hash = match request.pwd.as_deref() {
            Some(pwd) => Some(hash(pwd, DEFAULT_COST)?),
            None => None,
        };

        let user = self
            .repository
            .update(
                id,
                UserChanges {
                    user_id: request.user_id.map(|u| u.trim().to_string()),
                    password_hash,
                    user_type: request.user_type,
                    name: request.name,
                    mobile_no: request.mobile_no,
                    access_level: request.access_level,
                    emp_cd,
                    depot_cd: request.depot_cd,
                    driver_id: request.driver_id,
                    customer_id: request.customer_id,
                },
            )
            .await?;

        info!("👤 Usuario {} actualizado por {}", user.user_id, caller.user_id);
        Ok(UserProfile::from(user))
    }

    pub async fn delete(&self, caller: &AuthenticatedUser, id: Uuid) -> AppResult<DeletedResponse> {
        caller.ensure_admin()?;
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        info!("🗑️ Usuario {} eliminado por {}", id, caller.user_id);
        Ok(DeletedResponse::new(id))
    }
}
