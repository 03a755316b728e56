//! Modelo de Vehicle
//!
//! Cisternas (bowsers) con su capacidad nominal y calibrada.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,
    pub vehicle_no: String,
    pub depot_cd: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub capacity: Option<Decimal>,
    pub calibrated_capacity: Option<Decimal>,
    pub dip_stick: bool,
    pub gps: bool,
    pub load_sensor: bool,
    pub route_id: Option<Uuid>,
    pub last_km: Option<Decimal>,
    pub last_totalizer: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
