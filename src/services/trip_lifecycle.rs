//! Máquina de estados del viaje
//!
//! `ASSIGNED --(login)--> ACTIVE --(logout)--> COMPLETED`

use rust_decimal::Decimal;

use crate::models::trip::TripStatus;
use crate::utils::errors::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripEvent {
    Login,
    Logout,
}

/// Estado siguiente para un evento, o el error HTTP correspondiente
pub fn next_status(current: TripStatus, event: TripEvent) -> AppResult<TripStatus> {
    match (current, event) {
        (TripStatus::Assigned, TripEvent::Login) => Ok(TripStatus::Active),
        (TripStatus::Active, TripEvent::Logout) => Ok(TripStatus::Completed),
        (status, TripEvent::Login) => Err(AppError::Forbidden(format!(
            "Trip is {} and cannot be started",
            status.as_str()
        ))),
        (status, TripEvent::Logout) => Err(AppError::BadRequest(format!(
            "Trip is {}, only ACTIVE trips can be closed",
            status.as_str()
        ))),
    }
}

/// Lecturas de cierre: el odómetro no puede retroceder
pub fn validate_logout_readings(
    start_km: Option<Decimal>,
    end_km: Decimal,
    totalizer_start: Option<Decimal>,
    totalizer_end: Decimal,
) -> AppResult<()> {
    if end_km < Decimal::ZERO || totalizer_end < Decimal::ZERO {
        return Err(AppError::BadRequest("Readings cannot be negative".to_string()));
    }
    if let Some(start) = start_km {
        if end_km < start {
            return Err(AppError::BadRequest(format!(
                "endKm {} is lower than startKm {}",
                end_km, start
            )));
        }
    }
    if let Some(start) = totalizer_start {
        if totalizer_end < start {
            return Err(AppError::BadRequest(format!(
                "totalizerEnd {} is lower than totalizerStart {}",
                totalizer_end, start
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path() {
        assert_eq!(
            next_status(TripStatus::Assigned, TripEvent::Login).unwrap(),
            TripStatus::Active
        );
        assert_eq!(
            next_status(TripStatus::Active, TripEvent::Logout).unwrap(),
            TripStatus::Completed
        );
    }

    #[test]
    fn login_outside_assigned_is_forbidden() {
        assert!(matches!(
            next_status(TripStatus::Active, TripEvent::Login),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            next_status(TripStatus::Completed, TripEvent::Login),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn logout_outside_active_is_bad_request() {
        assert!(matches!(
            next_status(TripStatus::Assigned, TripEvent::Logout),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            next_status(TripStatus::Completed, TripEvent::Logout),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn readings_cannot_go_backwards() {
        let d = |v| Decimal::new(v, 0);
        assert!(validate_logout_readings(Some(d(100)), d(150), Some(d(10)), d(20)).is_ok());
        assert!(validate_logout_readings(Some(d(100)), d(99), None, d(20)).is_err());
        assert!(validate_logout_readings(None, d(99), Some(d(30)), d(20)).is_err());
        assert!(validate_logout_readings(None, d(-1), None, d(0)).is_err());
    }
}
