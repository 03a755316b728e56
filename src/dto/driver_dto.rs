use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::{validate_depot_cd, validate_mobile};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDriverRequest {
    #[validate(length(min = 1, max = 50))]
    pub driver_name: String,
    #[validate(custom = "validate_depot_cd")]
    pub depot_cd: String,
    pub profile: Option<String>,
    #[validate(custom = "validate_mobile")]
    pub mobile_no: Option<String>,
    pub peso_license_no: Option<String>,
    pub license_number: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDriverRequest {
    #[validate(length(min = 1, max = 50))]
    pub driver_name: Option<String>,
    #[validate(custom = "validate_depot_cd")]
    pub depot_cd: Option<String>,
    pub profile: Option<String>,
    #[validate(custom = "validate_mobile")]
    pub mobile_no: Option<String>,
    pub peso_license_no: Option<String>,
    pub license_number: Option<String>,
}
