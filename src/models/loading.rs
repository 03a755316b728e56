//! Cargas de combustible, códigos de autorización y estaciones por ruta

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Loading {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub station_id: Uuid,
    pub product: String,
    pub qty: Decimal,
    pub vehicle_no: Option<String>,
    pub depot_cd: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Código de seis dígitos, de un solo uso, que autoriza una carga
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LoadingAuth {
    pub id: Uuid,
    pub trip_id: Uuid,
    #[serde(skip_serializing)]
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Estación de carga asignada a una ruta, con su orden de visita
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LoadingStation {
    pub id: Uuid,
    pub route_id: Uuid,
    pub route_name: String,
    pub station_id: Uuid,
    pub station_name: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

/// Estación tal como la ve el conductor de una ruta
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RouteStation {
    pub id: Uuid,
    pub name: String,
}
