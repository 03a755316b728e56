use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::delivery::{Delivery, DeliveryPlan, PendingDelivery};
use crate::utils::errors::AppResult;

/// Datos de una entrega real
pub struct DeliveryRecord {
    pub trip_id: Uuid,
    pub order_id: Uuid,
    pub customer_id: Uuid,
    pub ship_to: String,
    pub product_name: String,
    pub qty: Decimal,
    pub rate: Decimal,
    pub dc_no: String,
    pub delivered_at: DateTime<Utc>,
}

pub async fn insert_plan(
    conn: &mut PgConnection,
    trip_id: Uuid,
    order_id: Uuid,
    customer_id: Uuid,
    ship_to: &str,
    required_qty: Decimal,
) -> AppResult<DeliveryPlan> {
    let plan = sqlx::query_as::<_, DeliveryPlan>(
        r#"
        INSERT INTO delivery_plans (id, trip_id, order_id, customer_id, ship_to, required_qty)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(trip_id)
    .bind(order_id)
    .bind(customer_id)
    .bind(ship_to)
    .bind(required_qty)
    .fetch_one(conn)
    .await?;

    Ok(plan)
}

/// Plan de un pedido dentro del viaje
pub async fn find_plan(
    conn: &mut PgConnection,
    trip_id: Uuid,
    order_id: Uuid,
) -> AppResult<Option<DeliveryPlan>> {
    let plan = sqlx::query_as::<_, DeliveryPlan>(
        "SELECT * FROM delivery_plans WHERE trip_id = $1 AND order_id = $2",
    )
    .bind(trip_id)
    .bind(order_id)
    .fetch_optional(conn)
    .await?;

    Ok(plan)
}

/// Fila marcador (qty 0) creada al asignar el pedido
pub async fn insert_placeholder(
    conn: &mut PgConnection,
    trip_id: Uuid,
    order_id: Uuid,
    customer_id: Uuid,
    ship_to: &str,
    product_name: &str,
    rate: Decimal,
) -> AppResult<Delivery> {
    let delivery = sqlx::query_as::<_, Delivery>(
        r#"
        INSERT INTO deliveries (id, trip_id, order_id, customer_id, ship_to, product_name, qty, rate)
        VALUES ($1, $2, $3, $4, $5, $6, 0, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(trip_id)
    .bind(order_id)
    .bind(customer_id)
    .bind(ship_to)
    .bind(product_name)
    .bind(rate)
    .fetch_one(conn)
    .await?;

    Ok(delivery)
}

/// Completar el marcador del pedido o, si ya no queda, insertar una entrega nueva
pub async fn record(conn: &mut PgConnection, rec: DeliveryRecord) -> AppResult<Delivery> {
    let filled = sqlx::query_as::<_, Delivery>(
        r#"
        UPDATE deliveries
        SET ship_to = $3, product_name = $4, qty = $5, rate = $6, dc_no = $7,
            delivered_at = $8, updated_at = now()
        WHERE id = (
            SELECT id FROM deliveries
            WHERE trip_id = $1 AND order_id = $2 AND qty = 0 AND dc_no IS NULL
            ORDER BY created_at
            LIMIT 1
            FOR UPDATE
        )
        RETURNING *
        "#,
    )
    .bind(rec.trip_id)
    .bind(rec.order_id)
    .bind(&rec.ship_to)
    .bind(&rec.product_name)
    .bind(rec.qty)
    .bind(rec.rate)
    .bind(&rec.dc_no)
    .bind(rec.delivered_at)
    .fetch_optional(&mut *conn)
    .await?;

    if let Some(delivery) = filled {
        return Ok(delivery);
    }

    let delivery = sqlx::query_as::<_, Delivery>(
        r#"
        INSERT INTO deliveries (id, trip_id, order_id, customer_id, ship_to, product_name,
                                qty, rate, dc_no, delivered_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(rec.trip_id)
    .bind(rec.order_id)
    .bind(rec.customer_id)
    .bind(rec.ship_to)
    .bind(rec.product_name)
    .bind(rec.qty)
    .bind(rec.rate)
    .bind(rec.dc_no)
    .bind(rec.delivered_at)
    .fetch_one(conn)
    .await?;

    Ok(delivery)
}

pub async fn list_for_trip_in_tx(conn: &mut PgConnection, trip_id: Uuid) -> AppResult<Vec<Delivery>> {
    let deliveries = sqlx::query_as::<_, Delivery>(
        "SELECT * FROM deliveries WHERE trip_id = $1 ORDER BY created_at, id",
    )
    .bind(trip_id)
    .fetch_all(conn)
    .await?;

    Ok(deliveries)
}

pub struct DeliveryRepository {
    pool: PgPool,
}

impl DeliveryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn plans_for_trip(&self, trip_id: Uuid) -> AppResult<Vec<DeliveryPlan>> {
        let plans = sqlx::query_as::<_, DeliveryPlan>(
            "SELECT * FROM delivery_plans WHERE trip_id = $1 ORDER BY created_at",
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(plans)
    }

    /// Planes del viaje que todavía no tienen una entrega con cantidad
    pub async fn pending_for_trip(&self, trip_id: Uuid) -> AppResult<Vec<PendingDelivery>> {
        let pending = sqlx::query_as::<_, PendingDelivery>(
            r#"
            SELECT p.*, o.order_no, c.cust_name, c.cust_cd
            FROM delivery_plans p
            JOIN orders o ON o.id = p.order_id
            JOIN customers c ON c.id = p.customer_id
            WHERE p.trip_id = $1
              AND NOT EXISTS (
                  SELECT 1 FROM deliveries d
                  WHERE d.trip_id = p.trip_id AND d.order_id = p.order_id AND d.qty > 0
              )
            ORDER BY p.created_at
            "#,
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(pending)
    }

    pub async fn completed_for_trip(&self, trip_id: Uuid) -> AppResult<Vec<Delivery>> {
        let deliveries = sqlx::query_as::<_, Delivery>(
            r#"
            SELECT * FROM deliveries
            WHERE trip_id = $1 AND qty > 0
            ORDER BY delivered_at DESC NULLS LAST
            "#,
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(deliveries)
    }

    pub async fn list_for_trip(&self, trip_id: Uuid) -> AppResult<Vec<Delivery>> {
        let deliveries = sqlx::query_as::<_, Delivery>(
            "SELECT * FROM deliveries WHERE trip_id = $1 ORDER BY created_at, id",
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(deliveries)
    }
}
