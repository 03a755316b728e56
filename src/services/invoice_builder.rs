//! Construcción de facturas
//!
//! Convierte entregas en líneas de factura, calcula importes redondeados a
//! 2 decimales y produce el importe en letras para el PDF.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::customer::Customer;
use crate::models::delivery::Delivery;
use crate::models::invoice::{
    CustomerSnapshot, InvoiceItem, NewInvoice, OrderSnapshot, VehicleSnapshot,
};
use crate::models::order::Order;
use crate::models::trip::Trip;
use crate::services::numbering;
use crate::utils::errors::{AppError, AppResult};

pub const DEFAULT_UOM: &str = "Liter";

/// Datos comunes a todas las facturas de un viaje
pub struct InvoiceContext<'a> {
    pub trip: &'a Trip,
    pub driver_name: Option<String>,
    pub notes: Option<String>,
}

pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub fn line_amount(qty: Decimal, rate: Decimal) -> Decimal {
    round_money(qty * rate)
}

/// Agrupar entregas por (producto, tarifa), ignorando los marcadores a cero
pub fn aggregate_items(deliveries: &[Delivery]) -> Vec<InvoiceItem> {
    let mut items: Vec<InvoiceItem> = Vec::new();

    for delivery in deliveries.iter().filter(|d| d.qty > Decimal::ZERO) {
        match items
            .iter_mut()
            .find(|i| i.product_name == delivery.product_name && i.rate == delivery.rate)
        {
            Some(item) => {
                item.qty += delivery.qty;
                item.amount = line_amount(item.qty, item.rate);
            }
            None => items.push(InvoiceItem {
                product_name: delivery.product_name.clone(),
                uom: DEFAULT_UOM.to_string(),
                qty: delivery.qty,
                rate: delivery.rate,
                amount: line_amount(delivery.qty, delivery.rate),
            }),
        }
    }

    items
}

pub fn sub_total(items: &[InvoiceItem]) -> Decimal {
    round_money(items.iter().map(|i| i.amount).sum())
}

fn customer_snapshot(customer: &Customer, ship_to: &str) -> CustomerSnapshot {
    CustomerSnapshot {
        cust_cd: customer.cust_cd.clone(),
        cust_name: customer.cust_name.clone(),
        address: customer.bill_address().single_line(),
        ship_to: ship_to.to_string(),
        gst_no: customer.gst_no.clone(),
        mobile_no: customer.mobile_no.clone(),
        depot_cd: customer.depot_cd.clone(),
    }
}

fn order_snapshot(order: &Order) -> OrderSnapshot {
    OrderSnapshot {
        order_no: order.order_no.clone(),
        delivery_date: Some(order.delivery_date.to_string()),
        delivery_time_slot: Some(order.delivery_time_slot.clone()),
    }
}

fn vehicle_snapshot(ctx: &InvoiceContext<'_>) -> VehicleSnapshot {
    VehicleSnapshot {
        vehicle_no: ctx.trip.vehicle_no.clone(),
        trip_no: ctx.trip.trip_no.clone(),
        driver_name: ctx.driver_name.clone(),
    }
}

/// Factura de una sola entrega; `position` empieza en 1
pub fn invoice_for_delivery(
    ctx: &InvoiceContext<'_>,
    delivery: &Delivery,
    position: usize,
    customer: &Customer,
    order: &Order,
) -> NewInvoice {
    let amount = line_amount(delivery.qty, delivery.rate);
    let items = vec![InvoiceItem {
        product_name: delivery.product_name.clone(),
        uom: DEFAULT_UOM.to_string(),
        qty: delivery.qty,
        rate: delivery.rate,
        amount,
    }];

    NewInvoice {
        invoice_no: numbering::invoice_no_for_delivery(&ctx.trip.trip_no, position),
        trip_id: Some(ctx.trip.id),
        delivery_id: Some(delivery.id),
        customer_id: Some(customer.id),
        order_id: Some(order.id),
        customer_snap: customer_snapshot(customer, &delivery.ship_to),
        order_snap: order_snapshot(order),
        vehicle_snap: vehicle_snapshot(ctx),
        items,
        sub_total: amount,
        total_amount: amount,
        dc_number: delivery.dc_no.clone(),
        notes: ctx.notes.clone(),
    }
}

/// Factura agregada de todo el viaje, a nombre del cliente del pedido principal
pub fn invoice_for_trip(
    ctx: &InvoiceContext<'_>,
    deliveries: &[Delivery],
    customer: &Customer,
    order: &Order,
) -> AppResult<NewInvoice> {
    let items = aggregate_items(deliveries);
    if items.is_empty() {
        return Err(AppError::BadRequest(
            "No deliveries with quantity found for this trip".to_string(),
        ));
    }
    let total = sub_total(&items);
    let dc_number = deliveries.iter().rev().find_map(|d| d.dc_no.clone());

    Ok(NewInvoice {
        invoice_no: numbering::invoice_no_for_trip(&ctx.trip.trip_no),
        trip_id: Some(ctx.trip.id),
        delivery_id: None,
        customer_id: Some(customer.id),
        order_id: Some(order.id),
        customer_snap: customer_snapshot(customer, &order.ship_to_address),
        order_snap: order_snapshot(order),
        vehicle_snap: vehicle_snapshot(ctx),
        items,
        sub_total: total,
        total_amount: total,
        dc_number,
        notes: ctx.notes.clone(),
    })
}

const ONES: [&str; 20] = [
    "Zero", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten",
    "Eleven", "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen",
    "Nineteen",
];
const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

fn below_hundred(n: u64) -> String {
    if n < 20 {
        ONES[n as usize].to_string()
    } else if n % 10 == 0 {
        TENS[(n / 10) as usize].to_string()
    } else {
        format!("{} {}", TENS[(n / 10) as usize], ONES[(n % 10) as usize])
    }
}

fn below_thousand(n: u64) -> String {
    match (n / 100, n % 100) {
        (0, rest) => below_hundred(rest),
        (h, 0) => format!("{} Hundred", ONES[h as usize]),
        (h, rest) => format!("{} Hundred {}", ONES[h as usize], below_hundred(rest)),
    }
}

/// Número en letras con el sistema indio (crore, lakh, thousand)
pub fn number_in_words(n: u64) -> String {
    if n == 0 {
        return ONES[0].to_string();
    }

    let mut parts = Vec::new();
    let crore = n / 10_000_000;
    let lakh = (n / 100_000) % 100;
    let thousand = (n / 1_000) % 100;
    let rest = n % 1_000;

    if crore > 0 {
        parts.push(format!("{} Crore", number_in_words(crore)));
    }
    if lakh > 0 {
        parts.push(format!("{} Lakh", below_hundred(lakh)));
    }
    if thousand > 0 {
        parts.push(format!("{} Thousand", below_hundred(thousand)));
    }
    if rest > 0 {
        parts.push(below_thousand(rest));
    }
    parts.join(" ")
}

/// "Rupees ... and ... Paise Only"
pub fn amount_in_words(amount: Decimal) -> String {
    let amount = round_money(amount.abs());
    let rupees = amount.trunc().to_u64().unwrap_or(0);
    let paise = ((amount - amount.trunc()) * Decimal::ONE_HUNDRED)
        .round()
        .to_u64()
        .unwrap_or(0);

    if paise > 0 {
        format!(
            "Rupees {} and {} Paise Only",
            number_in_words(rupees),
            below_hundred(paise)
        )
    } else {
        format!("Rupees {} Only", number_in_words(rupees))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn delivery(product: &str, qty: i64, rate_paise: i64) -> Delivery {
        Delivery {
            id: Uuid::new_v4(),
            trip_id: Uuid::new_v4(),
            order_id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            ship_to: "Plot 7".to_string(),
            product_name: product.to_string(),
            qty: Decimal::new(qty, 0),
            rate: Decimal::new(rate_paise, 2),
            dc_no: Some("DC-1".to_string()),
            delivered_at: Some(Utc::now()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn line_amount_rounds_half_away_from_zero() {
        // 3 × 0.335 = 1.005 → 1.01
        assert_eq!(
            line_amount(Decimal::new(3, 0), Decimal::new(335, 3)),
            Decimal::new(101, 2)
        );
        assert_eq!(
            line_amount(Decimal::new(1000, 0), Decimal::new(9250, 2)),
            Decimal::new(92500, 0)
        );
    }

    #[test]
    fn aggregation_groups_by_product_and_rate() {
        let deliveries = vec![
            delivery("diesel", 1000, 9250),
            delivery("diesel", 500, 9250),
            delivery("diesel", 200, 9300),
            delivery("diesel", 0, 9250),
        ];
        let items = aggregate_items(&deliveries);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].qty, Decimal::new(1500, 0));
        assert_eq!(items[0].amount, Decimal::new(138750, 0));
        assert_eq!(sub_total(&items), Decimal::new(138750 + 18600, 0));
    }

    #[test]
    fn words_use_indian_grouping() {
        assert_eq!(number_in_words(0), "Zero");
        assert_eq!(number_in_words(105), "One Hundred Five");
        assert_eq!(number_in_words(92_500), "Ninety Two Thousand Five Hundred");
        assert_eq!(number_in_words(1_25_000), "One Lakh Twenty Five Thousand");
        assert_eq!(
            number_in_words(12_03_45_678),
            "Twelve Crore Three Lakh Forty Five Thousand Six Hundred Seventy Eight"
        );
    }

    #[test]
    fn amount_in_words_includes_paise() {
        assert_eq!(amount_in_words(Decimal::new(92500, 0)), "Rupees Ninety Two Thousand Five Hundred Only");
        assert_eq!(
            amount_in_words(Decimal::new(1050, 2)),
            "Rupees Ten and Fifty Paise Only"
        );
    }
}
