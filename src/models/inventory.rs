//! Inventario de las cisternas (bowsers) y su libro de movimientos

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BowserInventory {
    pub vehicle_no: String,
    pub depot_cd: String,
    pub balance_liters: Decimal,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BowserLedgerEntry {
    pub id: Uuid,
    pub vehicle_no: String,
    pub depot_cd: String,
    pub tr_type: String,
    pub tr_ref: Option<String>,
    pub op_bal: Decimal,
    pub tr_qty: Decimal,
    pub cl_stock: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Tipos de movimiento del libro
pub mod tr_type {
    pub const RECEIPT: &str = "RECEIPT";
    pub const LOADING: &str = "LOADING";
    pub const DELIVERY: &str = "DELIVERY";
}
