use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::inventory::{BowserInventory, BowserLedgerEntry};
use crate::utils::validation::{validate_depot_cd, validate_positive_decimal};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryListQuery {
    pub depot_cd: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LedgerQuery {
    pub limit: Option<i64>,
}

/// Recepción de combustible en una cisterna
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptRequest {
    #[validate(custom = "validate_positive_decimal")]
    pub qty: Decimal,
    /// Obligatorio si el vehículo aún no tiene inventario y no está dado de alta
    #[validate(custom = "validate_depot_cd")]
    pub depot_cd: Option<String>,
    pub tr_ref: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReceiptResponse {
    pub inventory: BowserInventory,
    pub ledger: BowserLedgerEntry,
}
