use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest};
use crate::models::vehicle::Vehicle;
use crate::utils::errors::{AppError, AppResult};

pub async fn find_in_tx(conn: &mut PgConnection, id: Uuid) -> AppResult<Option<Vehicle>> {
    let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
        .bind(id)
        .fetch_optional(conn)
        .await?;

    Ok(vehicle)
}

/// Guardar las últimas lecturas de odómetro y totalizador al cerrar un viaje
pub async fn record_readings(
    conn: &mut PgConnection,
    id: Uuid,
    last_km: Decimal,
    last_totalizer: Decimal,
) -> AppResult<()> {
    sqlx::query(
        "UPDATE vehicles SET last_km = $2, last_totalizer = $3, updated_at = now() WHERE id = $1",
    )
    .bind(id)
    .bind(last_km)
    .bind(last_totalizer)
    .execute(conn)
    .await?;

    Ok(())
}

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, depot_cd: Option<&str>) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE ($1::text IS NULL OR depot_cd = $1)
            ORDER BY vehicle_no
            "#,
        )
        .bind(depot_cd)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn find_by_vehicle_no(&self, vehicle_no: &str) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE vehicle_no = $1")
            .bind(vehicle_no)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn create(&self, req: CreateVehicleRequest) -> AppResult<Vehicle> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, vehicle_no, depot_cd, brand, model, capacity,
                                  calibrated_capacity, dip_stick, gps, load_sensor, route_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(req.vehicle_no.trim().to_uppercase())
        .bind(req.depot_cd)
        .bind(req.brand)
        .bind(req.model)
        .bind(req.capacity)
        .bind(req.calibrated_capacity)
        .bind(req.dip_stick)
        .bind(req.gps)
        .bind(req.load_sensor)
        .bind(req.route_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn update(&self, id: Uuid, req: UpdateVehicleRequest) -> AppResult<Vehicle> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET depot_cd = $2, brand = $3, model = $4, capacity = $5, calibrated_capacity = $6,
                dip_stick = $7, gps = $8, load_sensor = $9, route_id = $10, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(req.depot_cd.unwrap_or(current.depot_cd))
        .bind(req.brand.or(current.brand))
        .bind(req.model.or(current.model))
        .bind(req.capacity.or(current.capacity))
        .bind(req.calibrated_capacity.or(current.calibrated_capacity))
        .bind(req.dip_stick.unwrap_or(current.dip_stick))
        .bind(req.gps.unwrap_or(current.gps))
        .bind(req.load_sensor.unwrap_or(current.load_sensor))
        .bind(req.route_id.or(current.route_id))
        .fetch_one(&self.pool)
        .await?;

        // La flota copia depósito y GPS del vehículo
        sqlx::query("UPDATE fleets SET depot_cd = $2, gps = $3, updated_at = now() WHERE vehicle_id = $1")
            .bind(id)
            .bind(&vehicle.depot_cd)
            .bind(vehicle.gps)
            .execute(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
