use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::driver_dto::{CreateDriverRequest, UpdateDriverRequest};
use crate::models::driver::Driver;
use crate::utils::errors::{AppError, AppResult};

pub async fn find_in_tx(conn: &mut PgConnection, id: Uuid) -> AppResult<Option<Driver>> {
    let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = $1")
        .bind(id)
        .fetch_optional(conn)
        .await?;

    Ok(driver)
}

/// Apuntar (o limpiar con `None`) el viaje en curso del conductor
pub async fn set_current_trip(
    conn: &mut PgConnection,
    driver_id: Uuid,
    trip_id: Option<Uuid>,
) -> AppResult<()> {
    sqlx::query("UPDATE drivers SET current_trip_id = $2, updated_at = now() WHERE id = $1")
        .bind(driver_id)
        .bind(trip_id)
        .execute(conn)
        .await?;

    Ok(())
}

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, depot_cd: Option<&str>) -> AppResult<Vec<Driver>> {
        let drivers = sqlx::query_as::<_, Driver>(
            r#"
            SELECT * FROM drivers
            WHERE ($1::text IS NULL OR depot_cd = $1)
            ORDER BY driver_name
            "#,
        )
        .bind(depot_cd)
        .fetch_all(&self.pool)
        .await?;

        Ok(drivers)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Driver>> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(driver)
    }

    pub async fn create(&self, req: CreateDriverRequest) -> AppResult<Driver> {
        let driver = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (id, driver_name, depot_cd, profile, mobile_no,
                                 peso_license_no, license_number)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(req.driver_name.trim().to_string())
        .bind(req.depot_cd)
        .bind(req.profile)
        .bind(req.mobile_no)
        .bind(req.peso_license_no)
        .bind(req.license_number)
        .fetch_one(&self.pool)
        .await?;

        Ok(driver)
    }

    pub async fn update(&self, id: Uuid, req: UpdateDriverRequest) -> AppResult<Driver> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Driver not found".to_string()))?;

        let driver = sqlx::query_as::<_, Driver>(
            r#"
            UPDATE drivers
            SET driver_name = $2, depot_cd = $3, profile = $4, mobile_no = $5,
                peso_license_no = $6, license_number = $7, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(req.driver_name.unwrap_or(current.driver_name))
        .bind(req.depot_cd.unwrap_or(current.depot_cd))
        .bind(req.profile.or(current.profile))
        .bind(req.mobile_no.or(current.mobile_no))
        .bind(req.peso_license_no.or(current.peso_license_no))
        .bind(req.license_number.or(current.license_number))
        .fetch_one(&self.pool)
        .await?;

        Ok(driver)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
