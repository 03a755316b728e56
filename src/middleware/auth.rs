//! Middleware de autenticación JWT
//!
//! Este módulo valida el header `Authorization: Bearer <jwt>` e inyecta el
//! usuario autenticado en las extensions de la request.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    models::user::{UserType, ACCOUNTS_ACCESS_LEVEL},
    state::AppState,
    utils::{
        errors::{AppError, AppResult},
        jwt::{extract_token_from_header, verify_token, JwtClaims, JwtConfig},
    },
};

const NO_DEPOT: &str = "";

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub user_id: String,
    pub user_type: UserType,
    pub emp_cd: Option<String>,
    pub depot_cd: Option<String>,
    pub is_admin: bool,
    pub access_level: i32,
    pub driver_id: Option<Uuid>,
}

impl TryFrom<JwtClaims> for AuthenticatedUser {
    type Error = AppError;

    fn try_from(claims: JwtClaims) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid token subject".to_string()))?;

        Ok(Self {
            id,
            user_id: claims.user_id,
            user_type: claims.user_type,
            emp_cd: claims.emp_cd,
            depot_cd: claims.depot_cd,
            is_admin: claims.is_admin,
            access_level: claims.access_level,
            driver_id: claims.driver_id,
        })
    }
}

impl AuthenticatedUser {
    pub fn ensure_admin(&self) -> AppResult<()> {
        if self.is_admin {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin access required".to_string()))
        }
    }

    /// Contabilidad: administradores o empleados con nivel suficiente
    pub fn ensure_accounts(&self) -> AppResult<()> {
        let accounts = self.user_type == UserType::Admin
            || (self.user_type == UserType::Employee && self.access_level >= ACCOUNTS_ACCESS_LEVEL);
        if accounts {
            Ok(())
        } else {
            Err(AppError::Forbidden("Accounts or Admin required".to_string()))
        }
    }

    /// Depósito al que queda restringido el usuario; `None` para administradores
    ///
    /// Un usuario sin depósito en el token queda restringido a un depósito
    /// vacío, que no coincide con ninguno.
    pub fn depot_scope(&self) -> Option<&str> {
        if self.is_admin {
            None
        } else {
            Some(self.depot_cd.as_deref().unwrap_or(NO_DEPOT))
        }
    }

    /// Conductor al que queda restringido el usuario
    pub fn driver_scope(&self) -> Option<Uuid> {
        match self.user_type {
            UserType::Driver => Some(self.driver_id.unwrap_or_else(Uuid::nil)),
            _ => None,
        }
    }

    pub fn ensure_depot(&self, depot_cd: &str) -> AppResult<()> {
        match self.depot_scope() {
            Some(own) if own != depot_cd => Err(AppError::Forbidden(format!(
                "Depot {} is outside your scope",
                depot_cd
            ))),
            _ => Ok(()),
        }
    }

    /// Un conductor solo puede consultar sus propios viajes
    pub fn ensure_driver(&self, driver_id: Uuid) -> AppResult<()> {
        if self.user_type == UserType::Driver && self.driver_id != Some(driver_id) {
            return Err(AppError::Forbidden(
                "Drivers can only access their own trips".to_string(),
            ));
        }
        Ok(())
    }

    /// Acceso a un viaje: el conductor por su id, el resto por depósito
    pub fn ensure_trip_access(&self, depot_cd: &str, driver_id: Uuid) -> AppResult<()> {
        if self.user_type == UserType::Driver {
            self.ensure_driver(driver_id)
        } else {
            self.ensure_depot(depot_cd)
        }
    }

    /// Código de empleado o, en su defecto, el login
    pub fn emp_code(&self) -> &str {
        self.emp_cd.as_deref().unwrap_or(&self.user_id)
    }
}

/// Middleware de autenticación JWT
///
/// Sin header → 401; header mal formado → 400; token inválido o caducado → 401.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("Authorization header required".to_string()))?
        .to_str()
        .map_err(|_| AppError::BadRequest("Malformed Authorization header".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let claims = verify_token(token, &JwtConfig::from(state.config.as_ref()))?;
    let user = AuthenticatedUser::try_from(claims)?;

    debug!("🔐 {} ({:?}) autenticado", user.user_id, user.user_type);
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(user_type: UserType, is_admin: bool, access_level: i32) -> AuthenticatedUser {
        AuthenticatedUser {
            id: Uuid::new_v4(),
            user_id: "E001".to_string(),
            user_type,
            emp_cd: Some("E001".to_string()),
            depot_cd: Some("101".to_string()),
            is_admin,
            access_level,
            driver_id: None,
        }
    }

    #[test]
    fn admins_are_not_depot_scoped() {
        let admin = user(UserType::Admin, true, 1);
        assert_eq!(admin.depot_scope(), None);
        assert!(admin.ensure_depot("202").is_ok());

        let employee = user(UserType::Employee, false, 1);
        assert_eq!(employee.depot_scope(), Some("101"));
        assert!(employee.ensure_depot("101").is_ok());
        assert!(matches!(employee.ensure_depot("202"), Err(AppError::Forbidden(_))));
        assert!(employee.ensure_admin().is_err());
    }

    #[test]
    fn accounts_access() {
        assert!(user(UserType::Admin, true, 1).ensure_accounts().is_ok());
        assert!(user(UserType::Employee, true, 3).ensure_accounts().is_ok());
        assert!(user(UserType::Employee, true, 2).ensure_accounts().is_err());
        assert!(user(UserType::Driver, false, 5).ensure_accounts().is_err());
    }

    #[test]
    fn drivers_only_see_their_own_trips() {
        let own = Uuid::new_v4();
        let mut driver = user(UserType::Driver, false, 1);
        driver.driver_id = Some(own);
        assert!(driver.ensure_driver(own).is_ok());
        assert!(driver.ensure_driver(Uuid::new_v4()).is_err());
        assert!(user(UserType::Employee, false, 1).ensure_driver(own).is_ok());
    }

    #[test]
    fn users_without_depot_see_no_depot() {
        let mut employee = user(UserType::Employee, false, 1);
        employee.depot_cd = None;
        assert_eq!(employee.depot_scope(), Some(""));
        assert!(matches!(employee.ensure_depot("101"), Err(AppError::Forbidden(_))));

        let mut admin = user(UserType::Admin, true, 1);
        admin.depot_cd = None;
        assert_eq!(admin.depot_scope(), None);
    }

    #[test]
    fn trip_access_uses_driver_id_for_drivers() {
        let own = Uuid::new_v4();
        let mut driver = user(UserType::Driver, false, 1);
        driver.depot_cd = None;
        driver.driver_id = Some(own);
        assert!(driver.ensure_trip_access("202", own).is_ok());
        assert!(driver.ensure_trip_access("202", Uuid::new_v4()).is_err());
        assert_eq!(driver.driver_scope(), Some(own));

        let employee = user(UserType::Employee, false, 1);
        assert!(employee.ensure_trip_access("101", own).is_ok());
        assert!(employee.ensure_trip_access("202", own).is_err());
        assert_eq!(employee.driver_scope(), None);
    }
}
