use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::{validate_depot_cd, validate_gstin, validate_mobile};

fn default_active() -> String {
    "Active".to_string()
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepotRequest {
    #[validate(custom = "validate_depot_cd")]
    pub depot_cd: String,
    #[validate(length(min = 1, max = 20))]
    pub depot_name: String,
    pub depot_add1: Option<String>,
    pub depot_add2: Option<String>,
    pub depot_add3: Option<String>,
    pub depot_area: Option<String>,
    pub city: Option<String>,
    #[validate(length(equal = 6))]
    pub pin: Option<String>,
    #[validate(length(equal = 2))]
    pub state_cd: Option<String>,
    #[validate(custom = "validate_gstin")]
    pub gstin: Option<String>,
    #[validate(custom = "validate_mobile")]
    pub contact_no: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub contact_name: Option<String>,
    #[serde(default = "default_active")]
    pub status: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDepotRequest {
    #[validate(length(min = 1, max = 20))]
    pub depot_name: Option<String>,
    pub depot_add1: Option<String>,
    pub depot_add2: Option<String>,
    pub depot_add3: Option<String>,
    pub depot_area: Option<String>,
    pub city: Option<String>,
    #[validate(length(equal = 6))]
    pub pin: Option<String>,
    #[validate(length(equal = 2))]
    pub state_cd: Option<String>,
    #[validate(custom = "validate_gstin")]
    pub gstin: Option<String>,
    #[validate(custom = "validate_mobile")]
    pub contact_no: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub contact_name: Option<String>,
    pub status: Option<String>,
}

/// Estados admitidos para un depósito
pub fn validate_depot_status(status: &str) -> bool {
    matches!(status, "Active" | "Inactive")
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRouteRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(custom = "validate_depot_cd")]
    pub depot_cd: String,
    #[serde(default)]
    pub station_ids: Vec<Uuid>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRouteRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    #[validate(custom = "validate_depot_cd")]
    pub depot_cd: Option<String>,
    pub station_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStationRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStationRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    pub location: Option<String>,
}
