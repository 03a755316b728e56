//! Controlador de empleados
//!
//! Las altas y cambios son de administradores; la contraseña se guarda
//! hasheada y nunca se devuelve.

use bcrypt::{hash, DEFAULT_COST};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::DeletedResponse;
use crate::dto::employee_dto::{CreateEmployeeRequest, UpdateEmployeeRequest};
use crate::middleware::AuthenticatedUser;
use crate::models::employee::Employee;
use crate::repositories::employee_repository::EmployeeRepository;
use crate::utils::errors::{AppError, AppResult};

pub struct EmployeeController {
    repository: EmployeeRepository,
}

fn duplicate_code() -> AppError {
    AppError::Conflict("empCd already exists".to_string())
}

impl EmployeeController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: EmployeeRepository::new(pool),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<Employee>> {
        self.repository.list().await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Employee> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))
    }

    pub async fn create(
        &self,
        caller: &AuthenticatedUser,
        request: CreateEmployeeRequest,
    ) -> AppResult<Employee> {
        caller.ensure_admin()?;
        request.validate()?;

        if self.repository.find_by_code(&request.emp_cd).await?.is_some() {
            return Err(duplicate_code());
        }

        let password_hash = hash(&request.password, DEFAULT_COST)?;
        let employee = self
            .repository
            .create(request, password_hash)
            .await
            .map_err(unique_code)?;

        info!("🧑‍💼 Empleado {} creado por {}", employee.emp_cd, caller.user_id);
        Ok(employee)
    }

    pub async fn update(
        &self,
        caller: &AuthenticatedUser,
        id: Uuid,
        request: UpdateEmployeeRequest,
    ) -> AppResult<Employee> {
        caller.ensure_admin()?;
        request.validate()?;

        if let Some(code) = request.emp_cd.as_deref() {
            if let Some(other) = self.repository.find_by_code(code).await? {
                if other.id != id {
                    return Err(duplicate_code());
                }
            }
        }

        let password_hash = match request.password.as_deref() {
            Some(password) => Some(hash(password, DEFAULT_COST)?),
            None => None,
        };

        let employee = self
            .repository
            .update(id, request, password_hash)
            .await
            .map_err(unique_code)?;

        info!("🧑‍💼 Empleado {} actualizado", employee.emp_cd);
        Ok(employee)
    }

    pub async fn delete(&self, caller: &AuthenticatedUser, id: Uuid) -> AppResult<DeletedResponse> {
        caller.ensure_admin()?;
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound("Employee not found".to_string()));
        }
        Ok(DeletedResponse::new(id))
    }
}

/// Una carrera entre dos altas con el mismo código acaba en la restricción única
fn unique_code(err: AppError) -> AppError {
    match err {
        AppError::Conflict(msg) if msg.contains("employees_emp_cd_key") => duplicate_code(),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_on_emp_cd_reads_as_duplicate_code() {
        let err = unique_code(AppError::Conflict(
            "Duplicate value violates employees_emp_cd_key".to_string(),
        ));
        assert_eq!(err.to_string(), "empCd already exists");

        let other = unique_code(AppError::Conflict("Record is still referenced (x)".to_string()));
        assert_eq!(other.to_string(), "Record is still referenced (x)");
    }
}
