use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::user::UserType;
use crate::utils::validation::{validate_depot_cd, validate_mobile};

/// Cambios parciales de un usuario; `pwd` se vuelve a hashear
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 40))]
    pub user_id: Option<String>,
    pub user_type: Option<UserType>,
    #[serde(alias = "password")]
    #[validate(length(min = 6, message = "pwd must have at least 6 characters"))]
    pub pwd: Option<String>,
    pub name: Option<String>,
    #[validate(custom = "validate_mobile")]
    pub mobile_no: Option<String>,
    #[validate(range(min = 1, max = 9))]
    pub access_level: Option<i32>,
    #[validate(custom = "validate_depot_cd")]
    pub depot_cd: Option<String>,
    pub emp_cd: Option<String>,
    pub driver_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_update_accepts_password_alias() {
        let req: UpdateUserRequest =
            serde_json::from_str(r#"{"password":"newsecret","mobileNo":"9876543210"}"#).unwrap();
        assert_eq!(req.pwd.as_deref(), Some("newsecret"));
        assert!(req.user_type.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn short_password_and_bad_mobile_are_rejected() {
        let req: UpdateUserRequest = serde_json::from_str(r#"{"pwd":"123"}"#).unwrap();
        assert!(req.validate().is_err());
        let req: UpdateUserRequest = serde_json::from_str(r#"{"mobileNo":"12ab"}"#).unwrap();
        assert!(req.validate().is_err());
    }
}
