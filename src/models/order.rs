//! Modelo de Order
//!
//! Pedidos de combustible con sus líneas y estado de asignación.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow, Type};
use std::str::FromStr;
use uuid::Uuid;

/// Estado del pedido - mapea al ENUM order_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "order_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Assigned,
    PartiallyCompleted,
    Completed,
    Cancelled,
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "ASSIGNED" => Ok(Self::Assigned),
            "PARTIALLY_COMPLETED" => Ok(Self::PartiallyCompleted),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(format!("Invalid orderStatus '{}'", other)),
        }
    }
}

/// Línea de pedido
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default = "default_product")]
    pub product_name: String,
    pub quantity: Decimal,
    pub rate: Decimal,
}

pub fn default_product() -> String {
    "diesel".to_string()
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub order_no: String,
    pub emp_cd: String,
    pub customer_id: Uuid,
    pub ship_to_address: String,
    pub items: Json<Vec<OrderItem>>,
    pub delivery_date: NaiveDate,
    pub delivery_time_slot: String,
    pub order_status: OrderStatus,
    pub fleet_id: Option<Uuid>,
    pub confirmed_at: DateTime<Utc>,
    pub allocated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Cantidad total pedida (suma de las líneas)
    pub fn total_qty(&self) -> Decimal {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Tarifa de la primera línea, usada por las entregas sin tarifa explícita
    pub fn primary_rate(&self) -> Decimal {
        self.items.first().map(|i| i.rate).unwrap_or(Decimal::ZERO)
    }

    pub fn primary_product(&self) -> String {
        self.items
            .first()
            .map(|i| i.product_name.clone())
            .unwrap_or_else(default_product)
    }
}

/// Pedido con datos del cliente para los listados
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderListRow {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub order: Order,
    pub cust_name: String,
    pub cust_cd: String,
    pub depot_cd: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parsing_accepts_the_five_states() {
        for s in ["PENDING", "ASSIGNED", "PARTIALLY_COMPLETED", "COMPLETED", "cancelled"] {
            assert!(s.parse::<OrderStatus>().is_ok(), "{s}");
        }
        assert!("DELIVERED".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn status_serializes_screaming_snake() {
        let json = serde_json::to_string(&OrderStatus::PartiallyCompleted).unwrap();
        assert_eq!(json, "\"PARTIALLY_COMPLETED\"");
    }
}
