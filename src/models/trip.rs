//! Modelo de Trip
//!
//! Un viaje referencia una flota y un pedido principal, y guarda una foto
//! del vehículo (número y capacidad) tomada al asignarlo.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del viaje - mapea al ENUM trip_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "trip_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TripStatus {
    Assigned,
    Active,
    Completed,
}

impl TripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Assigned => "ASSIGNED",
            TripStatus::Active => "ACTIVE",
            TripStatus::Completed => "COMPLETED",
        }
    }

    /// Un viaje abierto todavía admite pedidos adicionales
    pub fn is_open(&self) -> bool {
        matches!(self, TripStatus::Assigned | TripStatus::Active)
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: Uuid,
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
    pub status: TripStatus,
    pub route_id: Option<Uuid>,
    pub remarks: Option<String>,
    pub start_km: Option<Decimal>,
    pub totalizer_start: Option<Decimal>,
    pub diesel_opening: Option<Decimal>,
    pub login_time: Option<DateTime<Utc>>,
    pub end_km: Option<Decimal>,
    pub totalizer_end: Option<Decimal>,
    pub logout_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trip {
    pub fn remaining_capacity(&self) -> Decimal {
        crate::services::capacity::remaining_capacity(self.capacity, self.planned_qty)
    }
}
