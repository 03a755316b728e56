use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::employee_dto::{CreateEmployeeRequest, UpdateEmployeeRequest};
use crate::models::employee::Employee;
use crate::utils::errors::{AppError, AppResult};

pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>("SELECT * FROM employees ORDER BY emp_cd")
            .fetch_all(&self.pool)
            .await?;

        Ok(employees)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(employee)
    }

    pub async fn find_by_code(&self, emp_cd: &str) -> AppResult<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE emp_cd = $1")
            .bind(emp_cd.trim())
            .fetch_optional(&self.pool)
            .await?;

        Ok(employee)
    }

    /// Alta con la contraseña ya hasheada
    pub async fn create(&self, req: CreateEmployeeRequest, password_hash: String) -> AppResult<Employee> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (id, emp_cd, emp_name, depot_cd, access_level, status, roles,
                                   password_hash)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(req.emp_cd.trim())
        .bind(req.emp_name.trim())
        .bind(req.depot_cd)
        .bind(req.access_level.unwrap_or(0))
        .bind(req.status)
        .bind(req.roles)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(employee)
    }

    pub async fn update(
        &self,
        id: Uuid,
        req: UpdateEmployeeRequest,
        password_hash: Option<String>,
    ) -> AppResult<Employee> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

        let employee = sqlx::query_as::<_, Employee>(
            r#"
            UPDATE employees
            SET emp_cd = $2, emp_name = $3, depot_cd = $4, access_level = $5, status = $6,
                roles = $7, password_hash = $8, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(req.emp_cd.map(|c| c.trim().to_string()).unwrap_or(current.emp_cd))
        .bind(req.emp_name.map(|n| n.trim().to_string()).unwrap_or(current.emp_name))
        .bind(req.depot_cd.or(current.depot_cd))
        .bind(req.access_level.unwrap_or(current.access_level))
        .bind(req.status.or(current.status))
        .bind(req.roles.unwrap_or(current.roles))
        .bind(password_hash.unwrap_or(current.password_hash))
        .fetch_one(&self.pool)
        .await?;

        Ok(employee)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
