//! Capacidad de los viajes
//!
//! La capacidad se resuelve como: valor explícito → capacidad calibrada →
//! capacidad nominal. La suma planificada de un viaje nunca la supera.

use rust_decimal::Decimal;

use crate::utils::errors::{AppError, AppResult};

/// Resolver la capacidad efectiva del viaje, ignorando valores no positivos
pub fn resolve_capacity(
    explicit: Option<Decimal>,
    calibrated: Option<Decimal>,
    nominal: Option<Decimal>,
) -> Option<Decimal> {
    [explicit, calibrated, nominal]
        .into_iter()
        .flatten()
        .find(|c| *c > Decimal::ZERO)
}

pub fn remaining_capacity(capacity: Decimal, planned: Decimal) -> Decimal {
    (capacity - planned).max(Decimal::ZERO)
}

/// Comprobar que `qty` cabe en la capacidad restante
pub fn ensure_fits(capacity: Decimal, planned: Decimal, qty: Decimal) -> AppResult<()> {
    if qty <= Decimal::ZERO {
        return Err(AppError::BadRequest(
            "Order quantity must be greater than zero".to_string(),
        ));
    }
    let remaining = remaining_capacity(capacity, planned);
    if qty > remaining {
        return Err(AppError::Conflict(format!(
            "Order quantity {} exceeds remaining vehicle capacity {}",
            qty.normalize(),
            remaining.normalize()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(v: i64) -> Decimal {
        Decimal::new(v, 0)
    }

    #[test]
    fn resolution_order() {
        assert_eq!(resolve_capacity(Some(d(4000)), Some(d(5000)), Some(d(6000))), Some(d(4000)));
        assert_eq!(resolve_capacity(None, Some(d(5000)), Some(d(6000))), Some(d(5000)));
        assert_eq!(resolve_capacity(None, None, Some(d(6000))), Some(d(6000)));
        assert_eq!(resolve_capacity(Some(d(0)), None, Some(d(6000))), Some(d(6000)));
        assert_eq!(resolve_capacity(None, None, None), None);
    }

    #[test]
    fn oversized_first_order_is_rejected() {
        // 5000 L de vehículo contra un pedido de 6000 L
        assert!(matches!(
            ensure_fits(d(5000), d(0), d(6000)),
            Err(AppError::Conflict(_))
        ));
        assert!(ensure_fits(d(5000), d(0), d(5000)).is_ok());
    }

    #[test]
    fn appended_orders_use_remaining_capacity() {
        assert_eq!(remaining_capacity(d(5000), d(3000)), d(2000));
        assert!(ensure_fits(d(5000), d(3000), d(2000)).is_ok());
        assert!(ensure_fits(d(5000), d(3000), d(2001)).is_err());
        assert_eq!(remaining_capacity(d(5000), d(6000)), d(0));
    }

    #[test]
    fn zero_quantity_is_bad_request() {
        assert!(matches!(
            ensure_fits(d(5000), d(0), d(0)),
            Err(AppError::BadRequest(_))
        ));
    }
}
