use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::invoice::Invoice;
use crate::models::trip::Trip;
use crate::utils::validation::validate_non_negative_decimal;

/// Asignar una flota y un pedido PENDING a un viaje nuevo
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssignTripRequest {
    pub fleet_id: Uuid,
    pub order_id: Uuid,
    /// Número propuesto por el cliente; solo se usa su prefijo
    pub trip_no: Option<String>,
    #[validate(custom = "validate_non_negative_decimal")]
    pub capacity: Option<Decimal>,
    pub route_id: Option<Uuid>,
    #[validate(length(max = 500))]
    pub remarks: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignTripResponse {
    pub message: &'static str,
    pub trip_id: Uuid,
    pub trip_no: String,
    pub capacity: Decimal,
    pub planned_qty: Decimal,
    pub seeded_deliveries_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTripOrderRequest {
    pub order_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTripOrderResponse {
    pub trip: Trip,
    pub remaining_capacity: Decimal,
}

/// Inicio de viaje: por id o por conductor + vehículo
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TripLoginRequest {
    pub trip_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
    pub vehicle_no: Option<String>,
    #[validate(custom = "validate_non_negative_decimal")]
    pub start_km: Option<Decimal>,
    #[validate(custom = "validate_non_negative_decimal")]
    pub totalizer_start: Option<Decimal>,
    pub route_id: Option<Uuid>,
    #[validate(length(max = 500))]
    pub remarks: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripLoginResponse {
    pub message: &'static str,
    pub trip: Trip,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripLogoutRequest {
    pub trip_id: Uuid,
    pub end_km: Option<Decimal>,
    pub totalizer_end: Option<Decimal>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripLogoutResponse {
    pub message: &'static str,
    pub trip: Trip,
    pub invoices: Vec<Invoice>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripListQuery {
    pub status: Option<String>,
    pub driver_id: Option<Uuid>,
}

/// Viaje con los nombres de conductor y ruta
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDetail {
    #[serde(flatten)]
    pub trip: Trip,
    pub driver_name: Option<String>,
    pub route_name: Option<String>,
    pub remaining_capacity: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetSerialResponse {
    pub ok: bool,
    pub next_will_be: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_by_driver_and_vehicle_parses() {
        let req: TripLoginRequest = serde_json::from_str(
            r#"{"driverId":"6f1c1c52-1d5e-4c1a-9a55-1d2f3f4a5b6c","vehicleNo":"mh12ab1234",
                "startKm":"1200","totalizerStart":"500"}"#,
        )
        .unwrap();
        assert!(req.trip_id.is_none());
        assert_eq!(req.vehicle_no.as_deref(), Some("mh12ab1234"));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn negative_capacity_is_invalid() {
        let req: AssignTripRequest = serde_json::from_str(
            r#"{"fleetId":"6f1c1c52-1d5e-4c1a-9a55-1d2f3f4a5b6c",
                "orderId":"6f1c1c52-1d5e-4c1a-9a55-1d2f3f4a5b6d","capacity":"-5"}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
    }
}
