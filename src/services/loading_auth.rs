//! Códigos de autorización de carga
//!
//! Se emite un código de seis dígitos cuando el saldo de la cisterna no cubre
//! la capacidad declarada del viaje. Caduca a los 15 minutos y se consume una
//! sola vez.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rust_decimal::Decimal;

use crate::models::loading::LoadingAuth;
use crate::utils::errors::{AppError, AppResult};

pub const CODE_TTL_MINUTES: i64 = 15;

/// ¿Hace falta autorización para cargar?
pub fn requires_code(balance_liters: Decimal, trip_capacity: Decimal) -> bool {
    balance_liters < trip_capacity
}

pub fn generate_code<R: Rng>(rng: &mut R) -> String {
    format!("{:06}", rng.gen_range(100_000..=999_999))
}

pub fn code_expiry(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::minutes(CODE_TTL_MINUTES)
}

/// Explicar por qué un código no es válido en este momento
pub fn check_code(auth: &LoadingAuth, code: &str, now: DateTime<Utc>) -> AppResult<()> {
    if auth.used {
        return Err(AppError::Forbidden("Loading code already used".to_string()));
    }
    if auth.expires_at <= now {
        return Err(AppError::Forbidden("Loading code expired".to_string()));
    }
    if auth.code != code.trim() {
        return Err(AppError::Forbidden("Invalid loading code".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use uuid::Uuid;

    fn auth(code: &str, expires_in_secs: i64, used: bool) -> LoadingAuth {
        let now = Utc::now();
        LoadingAuth {
            id: Uuid::new_v4(),
            trip_id: Uuid::new_v4(),
            code: code.to_string(),
            expires_at: now + Duration::seconds(expires_in_secs),
            used,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn codes_have_six_digits() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let code = generate_code(&mut rng);
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn expiry_is_fifteen_minutes() {
        let now = Utc::now();
        assert_eq!(code_expiry(now) - now, Duration::minutes(15));
    }

    #[test]
    fn code_is_required_only_when_balance_is_short() {
        let d = |v| Decimal::new(v, 0);
        assert!(requires_code(d(4000), d(5000)));
        assert!(!requires_code(d(5000), d(5000)));
    }

    #[test]
    fn valid_code_passes() {
        assert!(check_code(&auth("123456", 600, false), "123456", Utc::now()).is_ok());
    }

    #[test]
    fn used_code_cannot_be_reused() {
        assert!(matches!(
            check_code(&auth("123456", 600, true), "123456", Utc::now()),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn expired_code_is_rejected() {
        assert!(matches!(
            check_code(&auth("123456", -1, false), "123456", Utc::now()),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn wrong_code_is_rejected() {
        assert!(check_code(&auth("123456", 600, false), "654321", Utc::now()).is_err());
    }
}
