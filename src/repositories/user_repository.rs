use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::{User, UserType};
use crate::utils::errors::{AppError, AppResult};

/// Datos para crear un usuario; la contraseña ya viene hasheada
pub struct NewUser {
    pub user_id: String,
    pub password_hash: String,
    pub user_type: UserType,
    pub name: Option<String>,
    pub access_level: i32,
    pub emp_cd: Option<String>,
    pub depot_cd: Option<String>,
    pub driver_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
}

/// Cambios ya resueltos; `None` conserva el valor actual
#[derive(Default)]
pub struct UserChanges {
    pub user_id: Option<String>,
    pub password_hash: Option<String>,
    pub user_type: Option<UserType>,
    pub name: Option<String>,
    pub mobile_no: Option<String>,
    pub access_level: Option<i32>,
    pub emp_cd: Option<String>,
    pub depot_cd: Option<String>,
    pub driver_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
}

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_login(&self, user_id: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn create(&self, new: NewUser) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, user_id, password_hash, user_type, name, access_level,
                               emp_cd, depot_cd, driver_id, customer_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(new.password_hash)
        .bind(new.user_type)
        .bind(new.name)
        .bind(new.access_level)
        .bind(new.emp_cd)
        .bind(new.depot_cd)
        .bind(new.driver_id)
        .bind(new.customer_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY user_id")
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    pub async fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<User> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET user_id = $2, password_hash = $3, user_type = $4, name = $5, mobile_no = $6,
                access_level = $7, emp_cd = $8, depot_cd = $9, driver_id = $10,
                customer_id = $11, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.user_id.unwrap_or(current.user_id))
        .bind(changes.password_hash.unwrap_or(current.password_hash))
        .bind(changes.user_type.unwrap_or(current.user_type))
        .bind(changes.name.or(current.name))
        .bind(changes.mobile_no.or(current.mobile_no))
        .bind(changes.access_level.unwrap_or(current.access_level))
        .bind(changes.emp_cd.or(current.emp_cd))
        .bind(changes.depot_cd.or(current.depot_cd))
        .bind(changes.driver_id.or(current.driver_id))
        .bind(changes.customer_id.or(current.customer_id))
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
