use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::{validate_depot_cd, validate_non_negative_decimal, validate_vehicle_no};

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[validate(custom = "validate_vehicle_no")]
    pub vehicle_no: String,
    #[validate(custom = "validate_depot_cd")]
    pub depot_cd: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    #[validate(custom = "validate_non_negative_decimal")]
    pub capacity: Option<Decimal>,
    #[validate(custom = "validate_non_negative_decimal")]
    pub calibrated_capacity: Option<Decimal>,
    #[serde(default)]
    pub dip_stick: bool,
    #[serde(default)]
    pub gps: bool,
    #[serde(default)]
    pub load_sensor: bool,
    pub route_id: Option<Uuid>,
}

// Request para actualizar un vehículo
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    #[validate(custom = "validate_depot_cd")]
    pub depot_cd: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    #[validate(custom = "validate_non_negative_decimal")]
    pub capacity: Option<Decimal>,
    #[validate(custom = "validate_non_negative_decimal")]
    pub calibrated_capacity: Option<Decimal>,
    pub dip_stick: Option<bool>,
    pub gps: Option<bool>,
    pub load_sensor: Option<bool>,
    pub route_id: Option<Uuid>,
}
