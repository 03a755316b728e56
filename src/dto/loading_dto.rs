use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::inventory::BowserInventory;
use crate::models::loading::Loading;
use crate::utils::validation::validate_positive_decimal;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCodeRequest {
    pub trip_id: Uuid,
}

/// `code` solo viaja cuando hace falta autorización
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCodeResponse {
    pub code_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub balance_liters: Decimal,
    pub capacity: Decimal,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCodeRequest {
    pub trip_id: Uuid,
    #[validate(length(equal = 6))]
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyCodeResponse {
    pub verified: bool,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLoadingRequest {
    pub trip_id: Uuid,
    pub station_id: Uuid,
    #[validate(length(min = 1))]
    pub product: String,
    #[validate(custom = "validate_positive_decimal")]
    pub qty: Decimal,
    pub code: Option<String>,
}

/// Alta de una estación en una ruta; los ids llegan como texto libre
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapStationRequest {
    pub route_id: Option<String>,
    pub station_id: Option<String>,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLoadingResponse {
    pub loading: Loading,
    pub inventory: BowserInventory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_must_have_six_characters() {
        let req: VerifyCodeRequest = serde_json::from_str(
            r#"{"tripId":"6f1c1c52-1d5e-4c1a-9a55-1d2f3f4a5b6c","code":"123"}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn station_mapping_order_defaults_to_zero() {
        let req: MapStationRequest = serde_json::from_str(r#"{"routeId":"r","stationId":"s"}"#).unwrap();
        assert_eq!(req.order, 0);
        assert_eq!(req.route_id.as_deref(), Some("r"));
    }

    #[test]
    fn no_code_is_serialized_when_not_required() {
        let resp = GenerateCodeResponse {
            code_required: false,
            code: None,
            expires_at: None,
            balance_liters: Decimal::new(6000, 0),
            capacity: Decimal::new(5000, 0),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["codeRequired"], false);
        assert!(json.get("code").is_none());
    }
}
