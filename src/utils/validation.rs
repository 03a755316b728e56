//! Utilidades de validación
//!
//! Funciones helper para validar códigos de depósito, franjas horarias,
//! cantidades y demás campos de los formularios.

use chrono::{NaiveDate, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use validator::ValidationError;

lazy_static! {
    /// Código de depósito: exactamente 3 dígitos
    pub static ref DEPOT_CD_RE: Regex = Regex::new(r"^[0-9]{3}$").unwrap();
    /// Franja horaria `HH:MM - HH:MM`
    static ref TIME_SLOT_RE: Regex =
        Regex::new(r"^\s*([01][0-9]|2[0-3]):([0-5][0-9])\s*-\s*([01][0-9]|2[0-3]):([0-5][0-9])\s*$")
            .unwrap();
    static ref MOBILE_RE: Regex = Regex::new(r"^[0-9]{10}$").unwrap();
    static ref GSTIN_RE: Regex =
        Regex::new(r"^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][1-9A-Z]Z[0-9A-Z]$").unwrap();
}

/// Validar y convertir string a fecha (YYYY-MM-DD, acepta también RFC3339)
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| {
            chrono::DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive())
        })
        .map_err(|_| {
            let mut error = ValidationError::new("date");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"YYYY-MM-DD".to_string());
            error
        })
}

/// Validar franja horaria `HH:MM - HH:MM` con inicio anterior al fin
pub fn validate_time_slot(value: &str) -> Result<(NaiveTime, NaiveTime), ValidationError> {
    let invalid = || {
        let mut error = ValidationError::new("time_slot");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"HH:MM - HH:MM".to_string());
        error
    };

    let caps = TIME_SLOT_RE.captures(value).ok_or_else(invalid)?;
    let parse = |h: usize, m: usize| -> Option<NaiveTime> {
        let hour = caps.get(h)?.as_str().parse().ok()?;
        let minute = caps.get(m)?.as_str().parse().ok()?;
        NaiveTime::from_hms_opt(hour, minute, 0)
    };

    let start = parse(1, 2).ok_or_else(invalid)?;
    let end = parse(3, 4).ok_or_else(invalid)?;
    if start >= end {
        return Err(invalid());
    }
    Ok((start, end))
}

/// Validar código de depósito de 3 dígitos
pub fn validate_depot_cd(value: &str) -> Result<(), ValidationError> {
    if !DEPOT_CD_RE.is_match(value) {
        let mut error = ValidationError::new("depot_cd");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_empty"));
    }
    Ok(())
}

/// Validar longitud mínima y máxima
pub fn validate_length(value: &str, min: usize, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min || len > max {
        let mut error = ValidationError::new("length");
        error.add_param("min".into(), &min);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &len);
        return Err(error);
    }
    Ok(())
}

/// Validar formato de teléfono móvil (10 dígitos)
pub fn validate_mobile(value: &str) -> Result<(), ValidationError> {
    if !MOBILE_RE.is_match(value.trim()) {
        let mut error = ValidationError::new("mobile");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar GSTIN
pub fn validate_gstin(value: &str) -> Result<(), ValidationError> {
    if !GSTIN_RE.is_match(&value.trim().to_uppercase()) {
        let mut error = ValidationError::new("gstin");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea positivo
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Variante para campos `Decimal` de los DTOs (`#[validate(custom)]` pasa referencias)
pub fn validate_positive_decimal(value: &Decimal) -> Result<(), ValidationError> {
    validate_positive(*value)
}

pub fn validate_non_negative_decimal(value: &Decimal) -> Result<(), ValidationError> {
    validate_non_negative(*value)
}

/// Validar número de vehículo (máximo 10 caracteres, sin espacios)
pub fn validate_vehicle_no(value: &str) -> Result<(), ValidationError> {
    let clean = value.trim();
    if clean.is_empty() || clean.chars().count() > 10 || clean.contains(char::is_whitespace) {
        let mut error = ValidationError::new("vehicle_no");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_date() {
        assert!(validate_date("2024-01-15").is_ok());
        assert!(validate_date("2024-01-15T10:00:00Z").is_ok());
        assert!(validate_date("2024/01/15").is_err());
    }

    #[test]
    fn test_validate_time_slot() {
        let (start, end) = validate_time_slot("09:00 - 11:30").unwrap();
        assert!(start < end);
        assert!(validate_time_slot("09:00-11:30").is_ok());
        assert!(validate_time_slot("11:30 - 09:00").is_err());
        assert!(validate_time_slot("10:00 - 10:00").is_err());
        assert!(validate_time_slot("25:00 - 26:00").is_err());
        assert!(validate_time_slot("morning").is_err());
    }

    #[test]
    fn test_validate_depot_cd() {
        assert!(validate_depot_cd("101").is_ok());
        assert!(validate_depot_cd("10").is_err());
        assert!(validate_depot_cd("10A").is_err());
    }

    #[test]
    fn test_validate_length() {
        assert!(validate_length("test", 1, 10).is_ok());
        assert!(validate_length("test", 5, 10).is_err());
        assert!(validate_length("test", 1, 3).is_err());
    }

    #[test]
    fn test_validate_mobile() {
        assert!(validate_mobile("9876543210").is_ok());
        assert!(validate_mobile("98765").is_err());
    }

    #[test]
    fn test_validate_gstin() {
        assert!(validate_gstin("27AAPFU0939F1ZV").is_ok());
        assert!(validate_gstin("27AAPFU0939F1Z").is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(Decimal::new(5, 0)).is_ok());
        assert!(validate_positive(Decimal::ZERO).is_err());
        assert!(validate_positive(-5).is_err());
        assert!(validate_non_negative(Decimal::ZERO).is_ok());
        assert!(validate_non_negative(Decimal::new(-1, 2)).is_err());
    }

    #[test]
    fn test_validate_vehicle_no() {
        assert!(validate_vehicle_no("MH12AB1234").is_ok());
        assert!(validate_vehicle_no("MH12 AB1234").is_err());
        assert!(validate_vehicle_no("MH12AB12345").is_err());
        assert!(validate_vehicle_no("").is_err());
    }
}
