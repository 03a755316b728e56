use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::user::{UserProfile, UserType};
use crate::utils::validation::validate_depot_cd;

// Login request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,
    #[serde(alias = "password")]
    #[validate(length(min = 1, message = "pwd is required"))]
    pub pwd: String,
}

// Login response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: String,
    pub user_type: UserType,
    pub is_admin: bool,
}

// Alta de usuario (solo administradores)
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 40))]
    pub user_id: String,
    #[serde(alias = "password")]
    #[validate(length(min = 6, message = "pwd must have at least 6 characters"))]
    pub pwd: String,
    pub user_type: UserType,
    pub name: Option<String>,
    #[validate(range(min = 1, max = 9))]
    pub access_level: Option<i32>,
    pub emp_cd: Option<String>,
    #[validate(custom = "validate_depot_cd")]
    pub depot_cd: Option<String>,
    pub driver_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user: UserProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_accepts_password_alias() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"userId":"E001","password":"secret"}"#).unwrap();
        assert_eq!(req.pwd, "secret");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn empty_credentials_fail_validation() {
        let req: LoginRequest = serde_json::from_str(r#"{"userId":"","pwd":""}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn register_checks_depot_code() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"userId":"E002","pwd":"secret1","userType":"E","depotCd":"12"}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
    }
}
