use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::employee_dto::UpdateSalesAssociateRequest;
use crate::models::employee::SalesAssociate;
use crate::utils::errors::{AppError, AppResult};

pub struct SalesAssociateRepository {
    pool: PgPool,
}

impl SalesAssociateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<SalesAssociate>> {
        let associates =
            sqlx::query_as::<_, SalesAssociate>("SELECT * FROM sales_associates ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(associates)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<SalesAssociate>> {
        let associate =
            sqlx::query_as::<_, SalesAssociate>("SELECT * FROM sales_associates WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(associate)
    }

    pub async fn create(&self, name: &str, depot_id: Uuid, password_hash: String) -> AppResult<SalesAssociate> {
        let associate = sqlx::query_as::<_, SalesAssociate>(
            r#"
            INSERT INTO sales_associates (id, name, depot_id, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name.trim())
        .bind(depot_id)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(associate)
    }

    pub async fn update(
        &self,
        id: Uuid,
        req: UpdateSalesAssociateRequest,
        password_hash: Option<String>,
    ) -> AppResult<SalesAssociate> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Sales associate not found".to_string()))?;

        let associate = sqlx::query_as::<_, SalesAssociate>(
            r#"
            UPDATE sales_associates
            SET name = $2, depot_id = $3, password_hash = $4, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(req.name.map(|n| n.trim().to_string()).unwrap_or(current.name))
        .bind(req.depot_id.unwrap_or(current.depot_id))
        .bind(password_hash.unwrap_or(current.password_hash))
        .fetch_one(&self.pool)
        .await?;

        Ok(associate)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM sales_associates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
