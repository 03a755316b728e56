//! Modelo de Payment
//!
//! Movimientos de cobro/pago con ciclo DRAFT → SUBMITTED y borrado lógico.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use crate::utils::errors::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "payment_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Draft,
    Submitted,
    Deleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "payment_trans_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentTransType {
    Receipt,
    Payment,
    Adjustment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "payment_mode", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMode {
    Cash,
    Upi,
    Neft,
    Rtgs,
    Cheque,
    Card,
    Other,
}

impl PaymentStatus {
    /// Solo los borradores se pueden editar, enviar o reiniciar
    pub fn ensure_draft(self, action: &str) -> AppResult<()> {
        match self {
            PaymentStatus::Draft => Ok(()),
            other => Err(AppError::Conflict(format!(
                "Only DRAFT payments can be {}, this one is {}",
                action,
                other.as_str()
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Draft => "DRAFT",
            PaymentStatus::Submitted => "SUBMITTED",
            PaymentStatus::Deleted => "DELETED",
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub trans_type: PaymentTransType,
    pub trans_name: String,
    pub cust_cd: Option<String>,
    pub cust_name: Option<String>,
    pub customer_id: Option<Uuid>,
    pub amount: Decimal,
    pub mode: PaymentMode,
    pub ref_no: Option<String>,
    pub remarks: String,
    pub status: PaymentStatus,
    pub tx_date: DateTime<Utc>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub order_id: Option<Uuid>,
    pub trip_id: Option<Uuid>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_drafts_are_editable() {
        assert!(PaymentStatus::Draft.ensure_draft("modified").is_ok());
        assert!(matches!(
            PaymentStatus::Submitted.ensure_draft("modified"),
            Err(AppError::Conflict(_))
        ));
        assert!(PaymentStatus::Submitted.ensure_draft("reset").is_err());
        assert!(PaymentStatus::Deleted.ensure_draft("submitted").is_err());
    }

    #[test]
    fn modes_use_upper_case_on_the_wire() {
        let mode: PaymentMode = serde_json::from_str("\"NEFT\"").unwrap();
        assert_eq!(mode, PaymentMode::Neft);
    }
}
