use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::fleet_dto::FleetListQuery;
use crate::models::fleet::{Fleet, FleetView};
use crate::utils::errors::AppResult;

const FLEET_VIEW_SELECT: &str = r#"
    SELECT f.*, v.vehicle_no, v.capacity, v.calibrated_capacity, d.driver_name,
           EXISTS (
               SELECT 1 FROM trips t
               WHERE t.fleet_id = f.id AND t.status IN ('ASSIGNED', 'ACTIVE')
           ) AS is_allocated
    FROM fleets f
    JOIN vehicles v ON v.id = f.vehicle_id
    LEFT JOIN drivers d ON d.id = f.driver_id
"#;

/// Flota bloqueada para la asignación de un viaje
pub async fn lock_view(conn: &mut PgConnection, id: Uuid) -> AppResult<Option<FleetView>> {
    let sql = format!("{} WHERE f.id = $1 FOR UPDATE OF f", FLEET_VIEW_SELECT);
    let fleet = sqlx::query_as::<_, FleetView>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;

    Ok(fleet)
}

pub struct FleetRepository {
    pool: PgPool,
}

impl FleetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, query: &FleetListQuery) -> AppResult<Vec<FleetView>> {
        let pattern = query
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(|q| format!("%{}%", q));

        let sql = format!(
            r#"{}
            WHERE ($1::text IS NULL OR f.depot_cd = $1)
              AND ($2::bool IS NULL OR f.gps = $2)
              AND ($3::text IS NULL OR v.vehicle_no ILIKE $3 OR v.brand ILIKE $3
                   OR v.model ILIKE $3 OR d.driver_name ILIKE $3)
            ORDER BY v.vehicle_no
            "#,
            FLEET_VIEW_SELECT
        );

        let fleets = sqlx::query_as::<_, FleetView>(&sql)
            .bind(query.depot_cd.as_deref().map(str::to_uppercase))
            .bind(query.gps)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;

        Ok(fleets)
    }

    pub async fn find_view(&self, id: Uuid) -> AppResult<Option<FleetView>> {
        let sql = format!("{} WHERE f.id = $1", FLEET_VIEW_SELECT);
        let fleet = sqlx::query_as::<_, FleetView>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(fleet)
    }

    /// Emparejar conductor y vehículo, creando la flota si no existe
    pub async fn upsert_driver(
        &self,
        vehicle_id: Uuid,
        driver_id: Uuid,
        assigned_by: &str,
    ) -> AppResult<Fleet> {
        let fleet = sqlx::query_as::<_, Fleet>(
            r#"
            INSERT INTO fleets (id, vehicle_id, driver_id, depot_cd, gps, assigned_at, assigned_by)
            SELECT $1, v.id, $3, v.depot_cd, v.gps, now(), $4
            FROM vehicles v WHERE v.id = $2
            ON CONFLICT (vehicle_id) DO UPDATE
            SET driver_id = EXCLUDED.driver_id,
                depot_cd = EXCLUDED.depot_cd,
                gps = EXCLUDED.gps,
                assigned_at = EXCLUDED.assigned_at,
                assigned_by = EXCLUDED.assigned_by,
                updated_at = now()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle_id)
        .bind(driver_id)
        .bind(assigned_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(fleet)
    }

    pub async fn release_driver(&self, vehicle_id: Uuid) -> AppResult<Option<Fleet>> {
        let fleet = sqlx::query_as::<_, Fleet>(
            r#"
            UPDATE fleets
            SET driver_id = NULL, assigned_at = NULL, assigned_by = NULL, updated_at = now()
            WHERE vehicle_id = $1
            RETURNING *
            "#,
        )
        .bind(vehicle_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(fleet)
    }

    /// Crear la flota vacía de cada vehículo que aún no tenga una
    pub async fn sync_from_vehicles(&self) -> AppResult<(u64, u64)> {
        let (vehicles,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicles")
            .fetch_one(&self.pool)
            .await?;

        let result = sqlx::query(
            r#"
            INSERT INTO fleets (id, vehicle_id, depot_cd, gps)
            SELECT gen_random_uuid(), v.id, v.depot_cd, v.gps FROM vehicles v
            ON CONFLICT (vehicle_id) DO NOTHING
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok((vehicles.max(0) as u64, result.rows_affected()))
    }
}
