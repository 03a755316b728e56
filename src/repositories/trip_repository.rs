use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::trip::{Trip, TripStatus};
use crate::utils::errors::AppResult;

/// Viaje a crear con la foto del vehículo ya resuelta
pub struct NewTrip {
    pub trip_no: String,
    pub fleet_id: Uuid,
    pub order_id: Uuid,
    pub driver_id: Uuid,
    pub vehicle_id: Uuid,
    pub vehicle_no: String,
    pub depot_cd: String,
    pub gps: bool,
    pub capacity: Decimal,
    pub planned_qty: Decimal,
    pub route_id: Option<Uuid>,
    pub remarks: Option<String>,
}

/// Lecturas de inicio de viaje
pub struct LoginReadings {
    pub start_km: Decimal,
    pub totalizer_start: Decimal,
    pub diesel_opening: Decimal,
    pub route_id: Option<Uuid>,
    pub remarks: Option<String>,
}

pub async fn insert(conn: &mut PgConnection, new: NewTrip) -> AppResult<Trip> {
    let trip = sqlx::query_as::<_, Trip>(
        r#"
        INSERT INTO trips (id, trip_no, fleet_id, order_id, driver_id, vehicle_id, vehicle_no,
                           depot_cd, gps, capacity, planned_qty, status, route_id, remarks)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, 'ASSIGNED', $12, $13)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.trip_no)
    .bind(new.fleet_id)
    .bind(new.order_id)
    .bind(new.driver_id)
    .bind(new.vehicle_id)
    .bind(new.vehicle_no)
    .bind(new.depot_cd)
    .bind(new.gps)
    .bind(new.capacity)
    .bind(new.planned_qty)
    .bind(new.route_id)
    .bind(new.remarks)
    .fetch_one(conn)
    .await?;

    Ok(trip)
}

pub async fn lock(conn: &mut PgConnection, id: Uuid) -> AppResult<Option<Trip>> {
    let trip = sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(conn)
        .await?;

    Ok(trip)
}

/// Sumar `qty` a lo planificado solo si cabe en la capacidad
///
/// Devuelve `None` cuando el viaje no está abierto o la cantidad no cabe.
pub async fn add_planned(
    conn: &mut PgConnection,
    id: Uuid,
    qty: Decimal,
) -> AppResult<Option<Trip>> {
    let trip = sqlx::query_as::<_, Trip>(
        r#"
        UPDATE trips
        SET planned_qty = planned_qty + $2, updated_at = now()
        WHERE id = $1
          AND status IN ('ASSIGNED', 'ACTIVE')
          AND planned_qty + $2 <= capacity
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(qty)
    .fetch_optional(conn)
    .await?;

    Ok(trip)
}

/// Viaje ASSIGNED del conductor en ese vehículo
pub async fn find_assigned_for(
    conn: &mut PgConnection,
    driver_id: Uuid,
    vehicle_no: &str,
) -> AppResult<Option<Trip>> {
    let trip = sqlx::query_as::<_, Trip>(
        r#"
        SELECT * FROM trips
        WHERE driver_id = $1 AND vehicle_no = $2 AND status = 'ASSIGNED'
        ORDER BY created_at DESC
        LIMIT 1
        FOR UPDATE
        "#,
    )
    .bind(driver_id)
    .bind(vehicle_no.trim().to_uppercase())
    .fetch_optional(conn)
    .await?;

    Ok(trip)
}

/// ASSIGNED → ACTIVE
pub async fn start(
    conn: &mut PgConnection,
    id: Uuid,
    readings: LoginReadings,
) -> AppResult<Option<Trip>> {
    let trip = sqlx::query_as::<_, Trip>(
        r#"
        UPDATE trips
        SET status = 'ACTIVE', start_km = $2, totalizer_start = $3, diesel_opening = $4,
            route_id = COALESCE($5, route_id), remarks = COALESCE($6, remarks),
            login_time = now(), updated_at = now()
        WHERE id = $1 AND status = 'ASSIGNED'
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(readings.start_km)
    .bind(readings.totalizer_start)
    .bind(readings.diesel_opening)
    .bind(readings.route_id)
    .bind(readings.remarks)
    .fetch_optional(conn)
    .await?;

    Ok(trip)
}

/// ACTIVE → COMPLETED
pub async fn complete(
    conn: &mut PgConnection,
    id: Uuid,
    end_km: Decimal,
    totalizer_end: Decimal,
) -> AppResult<Option<Trip>> {
    let trip = sqlx::query_as::<_, Trip>(
        r#"
        UPDATE trips
        SET status = 'COMPLETED', end_km = $2, totalizer_end = $3,
            logout_time = now(), updated_at = now()
        WHERE id = $1 AND status = 'ACTIVE'
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(end_km)
    .bind(totalizer_end)
    .fetch_optional(conn)
    .await?;

    Ok(trip)
}

pub async fn delete(conn: &mut PgConnection, id: Uuid) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM trips WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub struct TripRepository {
    pool: PgPool,
}

impl TripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        status: Option<TripStatus>,
        driver_id: Option<Uuid>,
        depot_scope: Option<&str>,
    ) -> AppResult<Vec<Trip>> {
        let trips = sqlx::query_as::<_, Trip>(
            r#"
            SELECT * FROM trips
            WHERE ($1::trip_status IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR driver_id = $2)
              AND ($3::text IS NULL OR depot_cd = $3)
            ORDER BY created_at DESC
            "#,
        )
        .bind(status)
        .bind(driver_id)
        .bind(depot_scope)
        .fetch_all(&self.pool)
        .await?;

        Ok(trips)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Trip>> {
        let trip = sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(trip)
    }

    /// Último viaje del conductor en un estado dado
    pub async fn find_latest_for_driver(
        &self,
        driver_id: Uuid,
        status: TripStatus,
    ) -> AppResult<Option<Trip>> {
        let trip = sqlx::query_as::<_, Trip>(
            r#"
            SELECT * FROM trips
            WHERE driver_id = $1 AND status = $2
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(driver_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(trip)
    }

    /// ¿Tiene el conductor un viaje ASSIGNED o ACTIVE?
    pub async fn driver_has_open_trip(&self, driver_id: Uuid) -> AppResult<bool> {
        let (open,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM trips
                WHERE driver_id = $1 AND status IN ('ASSIGNED', 'ACTIVE')
            )
            "#,
        )
        .bind(driver_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(open)
    }
}
