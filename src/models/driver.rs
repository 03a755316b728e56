//! Modelo de Driver

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: Uuid,
    pub driver_name: String,
    pub depot_cd: String,
    pub profile: Option<String>,
    pub mobile_no: Option<String>,
    pub peso_license_no: Option<String>,
    pub license_number: Option<String>,
    /// Viaje en curso del conductor, si lo hay
    pub current_trip_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
