//! Utilidades JWT
//!
//! Emisión y verificación de los tokens que transportan el contexto del usuario
//! (tipo, empleado, depósito, administrador).

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::environment::EnvironmentConfig,
    models::user::{User, UserType},
    utils::errors::AppError,
};

/// Claims del JWT token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String, // id interno del usuario
    pub user_id: String,
    pub user_type: UserType,
    #[serde(default)]
    pub emp_cd: Option<String>,
    #[serde(default)]
    pub depot_cd: Option<String>,
    pub is_admin: bool,
    #[serde(default)]
    pub access_level: i32,
    #[serde(default)]
    pub driver_id: Option<Uuid>,
    pub exp: usize,
    pub iat: usize,
}

/// Configuración de JWT
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration: u64,
}

impl From<&EnvironmentConfig> for JwtConfig {
    fn from(config: &EnvironmentConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            expiration: config.jwt_expiration,
        }
    }
}

/// Generar JWT token para un usuario
pub fn generate_token(user: &User, config: &JwtConfig) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let expires_at = now + chrono::Duration::seconds(config.expiration as i64);

    let claims = JwtClaims {
        sub: user.id.to_string(),
        user_id: user.user_id.clone(),
        user_type: user.user_type,
        emp_cd: user.emp_cd.clone(),
        depot_cd: user.depot_cd.clone(),
        is_admin: user.is_admin(),
        access_level: user.access_level,
        driver_id: user.driver_id,
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    encode_claims(&claims, config)
}

/// Firmar un conjunto de claims ya construido
pub fn encode_claims(claims: &JwtClaims, config: &JwtConfig) -> Result<String, AppError> {
    let encoding_key = EncodingKey::from_secret(config.secret.as_ref());

    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| AppError::Jwt(format!("Error generando token: {}", e)))
}

/// Verificar y decodificar JWT token
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<JwtClaims, AppError> {
    let decoding_key = DecodingKey::from_secret(config.secret.as_ref());

    let token_data = decode::<JwtClaims>(token, &decoding_key, &Validation::default())
        .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

    Ok(token_data.claims)
}

/// Extraer token del header Authorization
///
/// Un header que no sigue el formato `Bearer <token>` es un 400, no un 401.
pub fn extract_token_from_header(auth_header: &str) -> Result<&str, AppError> {
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::BadRequest("Malformed Authorization header".to_string()))?
        .trim();

    if token.is_empty() {
        return Err(AppError::BadRequest("Malformed Authorization header".to_string()));
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "unit-test-secret".to_string(),
            expiration: 3600,
        }
    }

    fn admin() -> User {
        User {
            id: Uuid::new_v4(),
            user_id: "E001".to_string(),
            password_hash: String::new(),
            user_type: UserType::Employee,
            name: Some("Ops".to_string()),
            access_level: 2,
            emp_cd: Some("E001".to_string()),
            depot_cd: Some("101".to_string()),
            driver_id: None,
            customer_id: None,
            mobile_no: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn token_round_trip_keeps_user_context() {
        let user = admin();
        let token = generate_token(&user, &config()).unwrap();
        let claims = verify_token(&token, &config()).unwrap();

        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.emp_cd.as_deref(), Some("E001"));
        assert_eq!(claims.depot_cd.as_deref(), Some("101"));
        assert!(claims.is_admin);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = generate_token(&admin(), &config()).unwrap();
        let other = JwtConfig {
            secret: "another".to_string(),
            expiration: 3600,
        };
        assert!(matches!(
            verify_token(&token, &other),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = chrono::Utc::now().timestamp() as usize;
        let claims = JwtClaims {
            sub: Uuid::new_v4().to_string(),
            user_id: "D01".to_string(),
            user_type: UserType::Driver,
            emp_cd: None,
            depot_cd: None,
            is_admin: false,
            access_level: 1,
            driver_id: None,
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = encode_claims(&claims, &config()).unwrap();
        assert!(verify_token(&token, &config()).is_err());
    }

    #[test]
    fn header_parsing() {
        assert_eq!(extract_token_from_header("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert!(matches!(
            extract_token_from_header("Token abc"),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            extract_token_from_header("Bearer "),
            Err(AppError::BadRequest(_))
        ));
    }
}
