//! Maestros auxiliares: depósitos, rutas y estaciones de carga

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Depot {
    pub id: Uuid,
    pub depot_cd: String,
    pub depot_name: String,
    pub depot_add1: Option<String>,
    pub depot_add2: Option<String>,
    pub depot_add3: Option<String>,
    pub depot_area: Option<String>,
    pub city: Option<String>,
    pub pin: Option<String>,
    pub state_cd: Option<String>,
    pub gstin: Option<String>,
    pub contact_no: Option<String>,
    pub email: Option<String>,
    pub contact_name: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Ruta de reparto con las estaciones de carga permitidas
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: Uuid,
    pub name: String,
    pub depot_cd: String,
    pub station_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Estación (fuente) de carga
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
