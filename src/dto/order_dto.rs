use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::order::{OrderItem, OrderListRow};
use crate::utils::errors::{AppError, AppResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_id: Option<Uuid>,
    #[serde(default)]
    pub ship_to_address: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub delivery_date: String,
    #[serde(default)]
    pub delivery_time_slot: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    pub ship_to_address: Option<String>,
    pub items: Option<Vec<OrderItem>>,
    pub delivery_date: Option<String>,
    pub delivery_time_slot: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusRequest {
    pub order_status: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListQuery {
    pub status: Option<String>,
    pub customer_id: Option<Uuid>,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Pedido del listado con la cantidad total
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListItem {
    #[serde(flatten)]
    pub row: OrderListRow,
    pub order_qty: Decimal,
}

impl From<OrderListRow> for OrderListItem {
    fn from(row: OrderListRow) -> Self {
        let order_qty = row.order.total_qty();
        Self { row, order_qty }
    }
}

/// Cliente seleccionable en el formulario de pedidos
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerOption {
    pub id: Uuid,
    pub cust_cd: String,
    pub cust_name: String,
    pub depot_cd: String,
    pub status: crate::models::customer::CustomerStatus,
    pub selectable: bool,
    pub outstanding_amount: Decimal,
    pub ship_to_addresses: Vec<String>,
}

/// Reglas de las líneas: al menos una, cantidad entera positiva y tarifa positiva
pub fn validate_items(items: &[OrderItem]) -> AppResult<()> {
    if items.is_empty() {
        return Err(AppError::BadRequest(
            "Order must contain at least one item".to_string(),
        ));
    }

    for (i, item) in items.iter().enumerate() {
        if item.quantity <= Decimal::ZERO || !item.quantity.fract().is_zero() {
            return Err(AppError::BadRequest(format!(
                "items[{}].quantity must be a whole number greater than zero",
                i
            )));
        }
        if item.rate <= Decimal::ZERO {
            return Err(AppError::BadRequest(format!(
                "items[{}].rate must be greater than zero",
                i
            )));
        }
        if item.product_name.trim().is_empty() {
            return Err(AppError::BadRequest(format!(
                "items[{}].productName is required",
                i
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(qty: i64, scale: u32, rate: i64) -> OrderItem {
        OrderItem {
            product_name: "diesel".to_string(),
            quantity: Decimal::new(qty, scale),
            rate: Decimal::new(rate, 2),
        }
    }

    #[test]
    fn empty_items_are_rejected() {
        assert!(matches!(validate_items(&[]), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn quantities_must_be_positive_integers() {
        assert!(validate_items(&[item(1000, 0, 9250)]).is_ok());
        assert!(validate_items(&[item(0, 0, 9250)]).is_err());
        assert!(validate_items(&[item(-5, 0, 9250)]).is_err());
        assert!(validate_items(&[item(15, 1, 9250)]).is_err());
    }

    #[test]
    fn rate_must_be_positive() {
        assert!(validate_items(&[item(1000, 0, 0)]).is_err());
    }

    #[test]
    fn product_defaults_to_diesel() {
        let req: CreateOrderRequest = serde_json::from_str(
            r#"{"items":[{"quantity":"1000","rate":"92.5"}]}"#,
        )
        .unwrap();
        assert_eq!(req.items[0].product_name, "diesel");
    }
}
