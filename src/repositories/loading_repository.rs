use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::loading::{Loading, LoadingAuth, LoadingStation, RouteStation};
use crate::utils::errors::AppResult;

pub struct NewLoading {
    pub trip_id: Uuid,
    pub station_id: Uuid,
    pub product: String,
    pub qty: Decimal,
    pub vehicle_no: String,
    pub depot_cd: String,
}

pub async fn insert(conn: &mut PgConnection, new: NewLoading) -> AppResult<Loading> {
    let loading = sqlx::query_as::<_, Loading>(
        r#"
        INSERT INTO loadings (id, trip_id, station_id, product, qty, vehicle_no, depot_cd)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.trip_id)
    .bind(new.station_id)
    .bind(new.product)
    .bind(new.qty)
    .bind(new.vehicle_no)
    .bind(new.depot_cd)
    .fetch_one(conn)
    .await?;

    Ok(loading)
}

pub async fn find_auth(conn: &mut PgConnection, trip_id: Uuid) -> AppResult<Option<LoadingAuth>> {
    let auth = sqlx::query_as::<_, LoadingAuth>("SELECT * FROM loading_auths WHERE trip_id = $1")
        .bind(trip_id)
        .fetch_optional(conn)
        .await?;

    Ok(auth)
}

/// Consumir el código en una sola sentencia; `None` si ya no es válido
pub async fn consume_code(
    conn: &mut PgConnection,
    trip_id: Uuid,
    code: &str,
) -> AppResult<Option<LoadingAuth>> {
    let auth = sqlx::query_as::<_, LoadingAuth>(
        r#"
        UPDATE loading_auths
        SET used = TRUE, updated_at = now()
        WHERE trip_id = $1 AND code = $2 AND used = FALSE AND expires_at > now()
        RETURNING *
        "#,
    )
    .bind(trip_id)
    .bind(code.trim())
    .fetch_optional(conn)
    .await?;

    Ok(auth)
}

pub struct LoadingRepository {
    pool: PgPool,
}

impl LoadingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_trip(&self, trip_id: Uuid) -> AppResult<Vec<Loading>> {
        let loadings = sqlx::query_as::<_, Loading>(
            "SELECT * FROM loadings WHERE trip_id = $1 ORDER BY created_at",
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(loadings)
    }

    /// Emitir (o reemplazar) el código del viaje, dejándolo sin usar
    pub async fn upsert_auth(
        &self,
        trip_id: Uuid,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<LoadingAuth> {
        let auth = sqlx::query_as::<_, LoadingAuth>(
            r#"
            INSERT INTO loading_auths (id, trip_id, code, expires_at, used)
            VALUES ($1, $2, $3, $4, FALSE)
            ON CONFLICT (trip_id) DO UPDATE
            SET code = EXCLUDED.code, expires_at = EXCLUDED.expires_at,
                used = FALSE, updated_at = now()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(trip_id)
        .bind(code)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(auth)
    }

    /// Asignaciones ruta⇄estación con sus nombres
    pub async fn list_stations(&self) -> AppResult<Vec<LoadingStation>> {
        let mappings = sqlx::query_as::<_, LoadingStation>(
            r#"
            SELECT ls.id, ls.route_id, r.name AS route_name, ls.station_id,
                   s.name AS station_name, ls.sort_order, ls.created_at
            FROM loading_stations ls
            JOIN routes r ON r.id = ls.route_id
            JOIN stations s ON s.id = ls.station_id
            ORDER BY r.name, ls.sort_order, s.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(mappings)
    }

    /// `None` si la estación ya estaba asignada a la ruta
    pub async fn map_station(
        &self,
        route_id: Uuid,
        station_id: Uuid,
        sort_order: i32,
    ) -> AppResult<Option<LoadingStation>> {
        let mapping = sqlx::query_as::<_, LoadingStation>(
            r#"
            WITH inserted AS (
                INSERT INTO loading_stations (id, route_id, station_id, sort_order)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (route_id, station_id) DO NOTHING
                RETURNING *
            )
            SELECT i.id, i.route_id, r.name AS route_name, i.station_id,
                   s.name AS station_name, i.sort_order, i.created_at
            FROM inserted i
            JOIN routes r ON r.id = i.route_id
            JOIN stations s ON s.id = i.station_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(route_id)
        .bind(station_id)
        .bind(sort_order)
        .fetch_optional(&self.pool)
        .await?;

        Ok(mapping)
    }

    pub async fn unmap_station(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM loading_stations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Estaciones de una ruta en su orden de visita
    pub async fn stations_for_route(&self, route_id: Uuid) -> AppResult<Vec<RouteStation>> {
        let stations = sqlx::query_as::<_, RouteStation>(
            r#"
            SELECT s.id, s.name
            FROM loading_stations ls
            JOIN stations s ON s.id = ls.station_id
            WHERE ls.route_id = $1
            ORDER BY ls.sort_order, s.name
            "#,
        )
        .bind(route_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(stations)
    }
}
