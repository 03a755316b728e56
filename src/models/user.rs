//! Modelo de User
//!
//! Usuarios del sistema: administradores, empleados, conductores y clientes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Tipo de usuario - mapea al ENUM user_type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "user_type")]
pub enum UserType {
    #[sqlx(rename = "A")]
    #[serde(rename = "A")]
    Admin,
    #[sqlx(rename = "E")]
    #[serde(rename = "E")]
    Employee,
    #[sqlx(rename = "D")]
    #[serde(rename = "D")]
    Driver,
    #[sqlx(rename = "C")]
    #[serde(rename = "C")]
    Customer,
}

/// Nivel de acceso a partir del cual un empleado es administrador
pub const ADMIN_ACCESS_LEVEL: i32 = 2;
/// Nivel de acceso a partir del cual un empleado opera en contabilidad
pub const ACCOUNTS_ACCESS_LEVEL: i32 = 3;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub user_id: String,
    pub password_hash: String,
    pub user_type: UserType,
    pub name: Option<String>,
    pub access_level: i32,
    pub emp_cd: Option<String>,
    pub depot_cd: Option<String>,
    pub driver_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub mobile_no: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.user_type == UserType::Admin || self.access_level >= ADMIN_ACCESS_LEVEL
    }
}

/// Vista pública del usuario (sin hash)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub user_id: String,
    pub user_type: UserType,
    pub name: Option<String>,
    pub access_level: i32,
    pub emp_cd: Option<String>,
    pub depot_cd: Option<String>,
    pub driver_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub mobile_no: Option<String>,
    pub is_admin: bool,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        let is_admin = user.is_admin();
        Self {
            id: user.id,
            user_id: user.user_id,
            user_type: user.user_type,
            name: user.name,
            access_level: user.access_level,
            emp_cd: user.emp_cd,
            depot_cd: user.depot_cd,
            driver_id: user.driver_id,
            customer_id: user.customer_id,
            mobile_no: user.mobile_no,
            is_admin,
        }
    }
}
