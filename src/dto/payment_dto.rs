use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::payment::{Payment, PaymentMode, PaymentTransType};
use crate::utils::validation::validate_non_negative_decimal;

/// Alta de un movimiento; siempre nace en DRAFT
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub trans_type: PaymentTransType,
    pub trans_name: Option<String>,
    pub cust_cd: Option<String>,
    pub cust_name: Option<String>,
    pub customer_id: Option<Uuid>,
    #[validate(custom = "validate_non_negative_decimal")]
    pub amount: Decimal,
    pub mode: PaymentMode,
    pub ref_no: Option<String>,
    pub remarks: Option<String>,
    pub tx_date: Option<DateTime<Utc>>,
    /// Ids tolerantes: un valor inválido se ignora
    pub order_id: Option<String>,
    pub trip_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentRequest {
    pub trans_type: Option<PaymentTransType>,
    pub trans_name: Option<String>,
    pub cust_cd: Option<String>,
    pub cust_name: Option<String>,
    pub customer_id: Option<Uuid>,
    #[validate(custom = "validate_non_negative_decimal")]
    pub amount: Option<Decimal>,
    pub mode: Option<PaymentMode>,
    pub ref_no: Option<String>,
    pub remarks: Option<String>,
    pub tx_date: Option<DateTime<Utc>>,
    pub order_id: Option<String>,
    pub trip_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentListQuery {
    pub q: Option<String>,
    pub status: Option<String>,
    pub trans_type: Option<String>,
    pub mode: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    #[serde(default)]
    pub include_deleted: bool,
}

#[derive(Debug, Serialize)]
pub struct PaymentTotals {
    pub amount: Decimal,
}

/// `{data, page, pages, total, totals: {amount}}`
#[derive(Debug, Serialize)]
pub struct PaymentListResponse {
    pub data: Vec<Payment>,
    pub page: i64,
    pub pages: i64,
    pub total: i64,
    pub totals: PaymentTotals,
}

#[derive(Debug, Serialize)]
pub struct PaymentCreatedResponse {
    pub message: &'static str,
    pub id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_amount_fails_validation() {
        let req: CreatePaymentRequest = serde_json::from_str(
            r#"{"transType":"RECEIPT","amount":"-1","mode":"CASH"}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());

        let req: CreatePaymentRequest = serde_json::from_str(
            r#"{"transType":"RECEIPT","amount":"0","mode":"UPI","orderId":"garbage"}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn unknown_mode_is_rejected_by_serde() {
        let parsed: Result<CreatePaymentRequest, _> = serde_json::from_str(
            r#"{"transType":"RECEIPT","amount":"10","mode":"BITCOIN"}"#,
        );
        assert!(parsed.is_err());
    }
}
