//! Empleados y asociados de ventas

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Roles admitidos para un empleado
pub const EMPLOYEE_ROLES: [&str; 5] = ["admin", "trip", "vehicle", "accounts", "customer"];

/// Rol asignado cuando el alta no indica ninguno
pub const DEFAULT_ROLE: &str = "customer";

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub emp_cd: String,
    pub emp_name: String,
    pub depot_cd: Option<String>,
    pub access_level: i32,
    pub status: Option<String>,
    pub roles: Vec<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SalesAssociate {
    pub id: Uuid,
    pub name: String,
    pub depot_id: Uuid,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hashes_are_never_serialized() {
        let employee = Employee {
            id: Uuid::new_v4(),
            emp_cd: "E010".to_string(),
            emp_name: "Ravi".to_string(),
            depot_cd: Some("101".to_string()),
            access_level: 1,
            status: None,
            roles: vec!["trip".to_string(), "vehicle".to_string()],
            password_hash: "$2b$12$hash".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(employee.has_role("trip"));
        assert!(!employee.has_role("admin"));

        let json = serde_json::to_value(&employee).unwrap();
        assert_eq!(json["empCd"], "E010");
        assert!(json.get("passwordHash").is_none());
    }
}
