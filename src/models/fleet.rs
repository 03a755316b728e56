//! Modelo de Fleet
//!
//! Emparejamiento 1:1 de un vehículo con, como mucho, un conductor.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Fleet {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub depot_cd: String,
    pub gps: bool,
    pub assigned_at: Option<DateTime<Utc>>,
    pub assigned_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Flota con los datos del vehículo y del conductor, para listados y asignación
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FleetView {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub fleet: Fleet,
    pub vehicle_no: String,
    pub capacity: Option<Decimal>,
    pub calibrated_capacity: Option<Decimal>,
    pub driver_name: Option<String>,
    /// Verdadero si la flota tiene un viaje ASSIGNED o ACTIVE
    pub is_allocated: bool,
}
