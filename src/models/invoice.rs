//! Modelo de Invoice
//!
//! Las facturas guardan fotos del cliente, pedido y vehículo para que
//! cambios posteriores en los maestros no alteren documentos emitidos.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    pub product_name: String,
    pub uom: String,
    pub qty: Decimal,
    pub rate: Decimal,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSnapshot {
    pub cust_cd: String,
    pub cust_name: String,
    pub address: String,
    pub ship_to: String,
    pub gst_no: Option<String>,
    pub mobile_no: Option<String>,
    pub depot_cd: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSnapshot {
    pub order_no: String,
    pub delivery_date: Option<String>,
    pub delivery_time_slot: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSnapshot {
    pub vehicle_no: String,
    pub trip_no: String,
    pub driver_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,
    pub invoice_no: String,
    pub invoice_date: DateTime<Utc>,
    pub trip_id: Option<Uuid>,
    pub delivery_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub order_id: Option<Uuid>,
    pub customer_snap: Json<CustomerSnapshot>,
    pub order_snap: Json<OrderSnapshot>,
    pub vehicle_snap: Json<VehicleSnapshot>,
    pub items: Json<Vec<InvoiceItem>>,
    pub sub_total: Decimal,
    pub total_amount: Decimal,
    pub dc_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Factura aún no persistida
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoice {
    pub invoice_no: String,
    pub trip_id: Option<Uuid>,
    pub delivery_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub order_id: Option<Uuid>,
    pub customer_snap: CustomerSnapshot,
    pub order_snap: OrderSnapshot,
    pub vehicle_snap: VehicleSnapshot,
    pub items: Vec<InvoiceItem>,
    pub sub_total: Decimal,
    pub total_amount: Decimal,
    pub dc_number: Option<String>,
    pub notes: Option<String>,
}
