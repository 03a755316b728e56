use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::{validate_non_negative_decimal, validate_positive_decimal};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecordDeliveryRequest {
    pub trip_id: Uuid,
    pub order_id: Uuid,
    pub customer_id: Uuid,
    pub ship_to: Option<String>,
    #[validate(custom = "validate_positive_decimal")]
    pub qty: Decimal,
    /// Sin tarifa se usa la del pedido
    #[validate(custom = "validate_non_negative_decimal")]
    pub rate: Option<Decimal>,
    pub product_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDeliveryResponse {
    pub message: &'static str,
    pub dc_no: String,
    pub delivery_id: Uuid,
    pub balance_liters: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_quantity_is_invalid() {
        let req: RecordDeliveryRequest = serde_json::from_str(
            r#"{"tripId":"6f1c1c52-1d5e-4c1a-9a55-1d2f3f4a5b6c",
                "orderId":"6f1c1c52-1d5e-4c1a-9a55-1d2f3f4a5b6d",
                "customerId":"6f1c1c52-1d5e-4c1a-9a55-1d2f3f4a5b6e","qty":0}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
    }
}
