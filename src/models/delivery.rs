//! Modelos de DeliveryPlan y Delivery

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Cantidad planificada para un pedido dentro de un viaje
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryPlan {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub order_id: Uuid,
    pub customer_id: Uuid,
    pub ship_to: String,
    pub required_qty: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Plan pendiente con los datos del cliente y del pedido
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PendingDelivery {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub plan: DeliveryPlan,
    pub order_no: String,
    pub cust_name: String,
    pub cust_cd: String,
}

/// Entrega real registrada (la fila con qty 0 es el marcador creado al asignar)
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub order_id: Uuid,
    pub customer_id: Uuid,
    pub ship_to: String,
    pub product_name: String,
    pub qty: Decimal,
    pub rate: Decimal,
    pub dc_no: Option<String>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Delivery {
    pub fn is_placeholder(&self) -> bool {
        self.qty.is_zero() && self.dc_no.is_none()
    }
}
