use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::employee::{DEFAULT_ROLE, EMPLOYEE_ROLES};
use crate::utils::validation::validate_depot_cd;

fn default_roles() -> Vec<String> {
    vec![DEFAULT_ROLE.to_string()]
}

/// Al menos un rol y todos dentro de los admitidos
pub fn validate_roles(roles: &[String]) -> Result<(), ValidationError> {
    if roles.is_empty() {
        let mut error = ValidationError::new("roles");
        error.message = Some("At least one role is required.".into());
        return Err(error);
    }
    if let Some(unknown) = roles.iter().find(|r| !EMPLOYEE_ROLES.contains(&r.as_str())) {
        let mut error = ValidationError::new("roles");
        error.add_param("value".into(), unknown);
        return Err(error);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    #[validate(length(min = 1, max = 20, message = "empCd is required"))]
    pub emp_cd: String,
    #[validate(length(min = 1, message = "empName is required"))]
    pub emp_name: String,
    #[validate(custom = "validate_depot_cd")]
    pub depot_cd: Option<String>,
    #[validate(range(min = 0))]
    pub access_level: Option<i32>,
    pub status: Option<String>,
    #[serde(default = "default_roles")]
    #[validate(custom = "validate_roles")]
    pub roles: Vec<String>,
    #[validate(length(min = 6, message = "password must have at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    #[validate(length(min = 1, max = 20))]
    pub emp_cd: Option<String>,
    #[validate(length(min = 1))]
    pub emp_name: Option<String>,
    #[validate(custom = "validate_depot_cd")]
    pub depot_cd: Option<String>,
    #[validate(range(min = 0))]
    pub access_level: Option<i32>,
    pub status: Option<String>,
    #[validate(custom = "validate_roles")]
    pub roles: Option<Vec<String>>,
    #[validate(length(min = 6, message = "password must have at least 6 characters"))]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalesAssociateRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(alias = "depot")]
    pub depot_id: Uuid,
    #[serde(alias = "password")]
    #[validate(length(min = 1, message = "pwd is required"))]
    pub pwd: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSalesAssociateRequest {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[serde(alias = "depot")]
    pub depot_id: Option<Uuid>,
    #[serde(alias = "password")]
    #[validate(length(min = 1))]
    pub pwd: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_default_to_customer() {
        let req: CreateEmployeeRequest = serde_json::from_str(
            r#"{"empCd":"E010","empName":"Ravi","password":"secret1"}"#,
        )
        .unwrap();
        assert_eq!(req.roles, vec!["customer".to_string()]);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn empty_or_unknown_roles_are_rejected() {
        assert!(validate_roles(&[]).is_err());
        assert!(validate_roles(&["driver".to_string()]).is_err());
        assert!(validate_roles(&["admin".to_string(), "accounts".to_string()]).is_ok());

        let req: UpdateEmployeeRequest = serde_json::from_str(r#"{"roles":[]}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn negative_access_level_and_short_password_fail() {
        let req: CreateEmployeeRequest = serde_json::from_str(
            r#"{"empCd":"E010","empName":"Ravi","password":"123","accessLevel":-1}"#,
        )
        .unwrap();
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("access_level"));
    }

    #[test]
    fn sales_associate_accepts_depot_alias() {
        let req: CreateSalesAssociateRequest = serde_json::from_str(
            r#"{"name":"Asha","depot":"6f1c1c52-1d5e-4c1a-9a55-1d2f3f4a5b6c","pwd":"x"}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
    }
}
