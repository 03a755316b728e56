//! Numeración de pedidos, viajes y facturas
//!
//! Número de pedido: estado (2) + depósito (2) + fecha `ddmmyy` (6) +
//! secuencia (3), con la secuencia acotada a cada prefijo.
//! Número de viaje: prefijo del cliente sin dígitos finales + serie de 3 dígitos.

use chrono::NaiveDate;

use crate::models::customer::Customer;
use crate::utils::errors::{AppError, AppResult};

/// Máximo de pedidos por prefijo (estado+depósito+día)
pub const MAX_ORDER_SEQ: i64 = 999;

/// Primer valor de la secuencia de un prefijo de pedido
pub const ORDER_SEQ_START: i64 = 1;

/// Clave del contador de series de viaje
pub const TRIP_SERIAL_COUNTER: &str = "tripSerial";
/// Primer valor de la serie de viajes: la primera serie es `000`
pub const TRIP_SERIAL_START: i64 = 0;

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn matches_address(candidate: &str, ship_to_text: &str) -> bool {
    let a = normalize(&candidate.replace('\n', ", "));
    let b = normalize(&ship_to_text.replace('\n', ", "));
    !a.is_empty() && !b.is_empty() && (a.contains(&b) || b.contains(&a))
}

fn two_digits(raw: Option<&str>) -> String {
    let digits: String = raw.unwrap_or_default().chars().filter(char::is_ascii_digit).collect();
    let tail = if digits.len() > 2 {
        &digits[digits.len() - 2..]
    } else {
        digits.as_str()
    };
    format!("{:0>2}", tail)
}

/// Código de estado de 2 dígitos para el pedido
///
/// Se toma de la dirección de entrega del cliente que coincide con el texto
/// del pedido; si ninguna coincide, del estado de facturación.
pub fn state_code_for(customer: &Customer, ship_to_text: &str) -> String {
    for n in [1u8, 2] {
        let address = customer.ship_to(n);
        if let Some(formatted) = address.formatted() {
            if matches_address(&formatted, ship_to_text) {
                if let Some(state) = address.state_cd.as_deref().filter(|s| !s.trim().is_empty()) {
                    return two_digits(Some(state));
                }
            }
        }
    }
    two_digits(customer.bill_state_cd.as_deref())
}

/// Últimos 2 dígitos del código de depósito
pub fn depot_suffix(depot_cd: &str) -> String {
    two_digits(Some(depot_cd))
}

pub fn order_prefix(state_cd: &str, depot_suffix: &str, delivery_date: NaiveDate) -> String {
    format!("{}{}{}", state_cd, depot_suffix, delivery_date.format("%d%m%y"))
}

/// Clave del contador de secuencia para un prefijo
pub fn order_counter_key(prefix: &str) -> String {
    format!("order:{}", prefix)
}

/// Componer el número de pedido; más de 999 pedidos por prefijo es un conflicto
pub fn compose_order_no(prefix: &str, seq: i64) -> AppResult<String> {
    if !(1..=MAX_ORDER_SEQ).contains(&seq) {
        return Err(AppError::Conflict(format!(
            "Order sequence exhausted for prefix {}",
            prefix
        )));
    }
    Ok(format!("{}{:03}", prefix, seq))
}

/// Prefijo del número de viaje
///
/// Se eliminan los dígitos finales del número propuesto por el cliente; sin
/// propuesta se usa la fecha `ddmmyy`.
pub fn trip_prefix(client_trip_no: Option<&str>, today: NaiveDate) -> String {
    let stripped = client_trip_no
        .map(str::trim)
        .unwrap_or_default()
        .trim_end_matches(|c: char| c.is_ascii_digit());

    if stripped.is_empty() {
        today.format("%d%m%y").to_string()
    } else {
        stripped.to_string()
    }
}

/// Serie de 3 dígitos a partir del contador
pub fn trip_serial(seq: i64) -> String {
    format!("{:03}", seq.rem_euclid(1000))
}

pub fn compose_trip_no(prefix: &str, seq: i64) -> String {
    format!("{}{}", prefix, trip_serial(seq))
}

/// Número de factura agregada de un viaje: `INV` + dígitos del viaje (mínimo 6)
pub fn invoice_no_for_trip(trip_no: &str) -> String {
    let digits: String = trip_no.chars().filter(char::is_ascii_digit).collect();
    format!("INV{:0>6}", digits)
}

/// Número de la factura de una entrega concreta (posición desde 1)
pub fn invoice_no_for_delivery(trip_no: &str, position: usize) -> String {
    format!("{}-{:02}", invoice_no_for_trip(trip_no), position)
}

/// Número de albarán (Delivery Challan)
pub fn dc_number(now_millis: i64) -> String {
    format!("DC-{}", now_millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::customer::fixtures;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 7).unwrap()
    }

    #[test]
    fn state_code_follows_matching_ship_to() {
        let c = fixtures::customer();
        // ship-to 2 está en Gujarat (24)
        let text = c.ship_to(2).formatted().unwrap();
        assert_eq!(state_code_for(&c, &text), "24");
        // coincidencia parcial e insensible a mayúsculas
        assert_eq!(state_code_for(&c, "plot 7 midc"), "27");
    }

    #[test]
    fn state_code_falls_back_to_billing() {
        let mut c = fixtures::customer();
        c.bill_state_cd = Some("9".to_string());
        assert_eq!(state_code_for(&c, "Unknown warehouse"), "09");
        c.bill_state_cd = None;
        assert_eq!(state_code_for(&c, "Unknown warehouse"), "00");
    }

    #[test]
    fn order_number_layout() {
        let prefix = order_prefix("27", &depot_suffix("101"), date());
        assert_eq!(prefix, "2701070125");
        assert_eq!(compose_order_no(&prefix, 1).unwrap(), "2701070125001");
        assert_eq!(compose_order_no(&prefix, 999).unwrap().len(), 13);
        assert_eq!(order_counter_key(&prefix), "order:2701070125");
    }

    #[test]
    fn order_sequence_overflow_is_conflict() {
        assert!(matches!(
            compose_order_no("2701070125", 1000),
            Err(AppError::Conflict(_))
        ));
        assert!(compose_order_no("2701070125", 0).is_err());
    }

    #[test]
    fn trip_numbers() {
        assert_eq!(trip_prefix(Some("TRIP-045"), date()), "TRIP-");
        assert_eq!(trip_prefix(Some("12345"), date()), "070125");
        assert_eq!(trip_prefix(None, date()), "070125");
        assert_eq!(compose_trip_no("TRIP-", 7), "TRIP-007");
        assert_eq!(trip_serial(1000), "000");
        assert_eq!(trip_serial(1234), "234");
    }

    #[test]
    fn first_trip_serial_matches_a_fresh_reset() {
        // La primera serie y la siguiente a un reset coinciden
        assert_eq!(trip_serial(TRIP_SERIAL_START), "000");
        assert_eq!(compose_order_no("2701070125", ORDER_SEQ_START).unwrap(), "2701070125001");
    }

    #[test]
    fn invoice_numbers() {
        assert_eq!(invoice_no_for_trip("TRIP-007"), "INV000007");
        assert_eq!(invoice_no_for_trip("070125007"), "INV070125007");
        assert_eq!(invoice_no_for_delivery("TRIP-007", 2), "INV000007-02");
        assert_eq!(dc_number(1700000000000), "DC-1700000000000");
    }
}
