use chrono::NaiveDate;
use sqlx::{types::Json, PgConnection, PgPool};
use uuid::Uuid;

use crate::models::order::{Order, OrderItem, OrderListRow, OrderStatus};
use crate::utils::errors::AppResult;

/// Pedido validado, listo para persistir
pub struct NewOrder {
    pub order_no: String,
    pub emp_cd: String,
    pub customer_id: Uuid,
    pub ship_to_address: String,
    pub items: Vec<OrderItem>,
    pub delivery_date: NaiveDate,
    pub delivery_time_slot: String,
}

/// Filtros ya interpretados del listado
#[derive(Debug, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub customer_id: Option<Uuid>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

const ORDER_ROW_SELECT: &str = r#"
    SELECT o.*, c.cust_name, c.cust_cd, c.depot_cd
    FROM orders o
    JOIN customers c ON c.id = o.customer_id
"#;

pub async fn insert(conn: &mut PgConnection, new: NewOrder) -> AppResult<Order> {
    let order = sqlx::query_as::<_, Order>(
        r#"
        INSERT INTO orders (id, order_no, emp_cd, customer_id, ship_to_address, items,
                            delivery_date, delivery_time_slot)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.order_no)
    .bind(new.emp_cd)
    .bind(new.customer_id)
    .bind(new.ship_to_address)
    .bind(Json(new.items))
    .bind(new.delivery_date)
    .bind(new.delivery_time_slot)
    .fetch_one(conn)
    .await?;

    Ok(order)
}

/// Bloquear un pedido para asignarlo a un viaje
pub async fn lock(conn: &mut PgConnection, id: Uuid) -> AppResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(conn)
        .await?;

    Ok(order)
}

pub async fn find_in_tx(conn: &mut PgConnection, id: Uuid) -> AppResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
        .bind(id)
        .fetch_optional(conn)
        .await?;

    Ok(order)
}

pub async fn mark_assigned(conn: &mut PgConnection, id: Uuid, fleet_id: Uuid) -> AppResult<()> {
    sqlx::query(
        r#"
        UPDATE orders
        SET order_status = 'ASSIGNED', fleet_id = $2, allocated_at = now(), updated_at = now()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(fleet_id)
    .execute(conn)
    .await?;

    Ok(())
}

/// Cambiar el estado de todos los pedidos planificados en un viaje
pub async fn set_status_for_trip(
    conn: &mut PgConnection,
    trip_id: Uuid,
    status: OrderStatus,
) -> AppResult<u64> {
    let result = sqlx::query(
        r#"
        UPDATE orders SET order_status = $2, updated_at = now()
        WHERE id IN (SELECT order_id FROM delivery_plans WHERE trip_id = $1)
        "#,
    )
    .bind(trip_id)
    .bind(status)
    .execute(conn)
    .await?;

    Ok(result.rows_affected())
}

/// Devolver a PENDING los pedidos de un viaje que se elimina
pub async fn release_for_trip(conn: &mut PgConnection, trip_id: Uuid) -> AppResult<u64> {
    let result = sqlx::query(
        r#"
        UPDATE orders
        SET order_status = 'PENDING', fleet_id = NULL, allocated_at = NULL, updated_at = now()
        WHERE id IN (SELECT order_id FROM delivery_plans WHERE trip_id = $1)
        "#,
    )
    .bind(trip_id)
    .execute(conn)
    .await?;

    Ok(result.rows_affected())
}

pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        filter: &OrderFilter,
        depot_scope: Option<&str>,
    ) -> AppResult<Vec<OrderListRow>> {
        let sql = format!(
            r#"{}
            WHERE ($1::text IS NULL OR c.depot_cd = $1)
              AND ($2::order_status IS NULL OR o.order_status = $2)
              AND ($3::uuid IS NULL OR o.customer_id = $3)
              AND ($4::date IS NULL OR o.delivery_date >= $4)
              AND ($5::date IS NULL OR o.delivery_date <= $5)
            ORDER BY o.created_at DESC
            "#,
            ORDER_ROW_SELECT
        );

        let orders = sqlx::query_as::<_, OrderListRow>(&sql)
            .bind(depot_scope)
            .bind(filter.status)
            .bind(filter.customer_id)
            .bind(filter.from)
            .bind(filter.to)
            .fetch_all(&self.pool)
            .await?;

        Ok(orders)
    }

    pub async fn find_row(&self, id: Uuid) -> AppResult<Option<OrderListRow>> {
        let sql = format!("{} WHERE o.id = $1", ORDER_ROW_SELECT);
        let order = sqlx::query_as::<_, OrderListRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    /// Reescribir los campos editables de un pedido aún PENDING
    pub async fn update_pending(
        &self,
        id: Uuid,
        ship_to_address: String,
        items: Vec<OrderItem>,
        delivery_date: NaiveDate,
        delivery_time_slot: String,
    ) -> AppResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET ship_to_address = $2, items = $3, delivery_date = $4,
                delivery_time_slot = $5, updated_at = now()
            WHERE id = $1 AND order_status = 'PENDING'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(ship_to_address)
        .bind(Json(items))
        .bind(delivery_date)
        .bind(delivery_time_slot)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Fijar el estado; pasar a ASSIGNED registra `allocated_at`
    /// Número del viaje abierto (ASSIGNED o ACTIVE) en el que está planificado el pedido
    pub async fn open_trip_no(&self, id: Uuid) -> AppResult<Option<String>> {
        let trip_no = sqlx::query_scalar::<_, String>(
            r#"
            SELECT t.trip_no
            FROM delivery_plans dp
            JOIN trips t ON t.id = dp.trip_id
            WHERE dp.order_id = $1 AND t.status IN ('ASSIGNED', 'ACTIVE')
            ORDER BY t.created_at DESC
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(trip_no)
    }

    /// Cambiar el estado; no toca pedidos planificados en un viaje abierto
    pub async fn update_status(&self, id: Uuid, status: OrderStatus) -> AppResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET order_status = $2,
                allocated_at = CASE WHEN $2 = 'ASSIGNED'::order_status THEN now() ELSE allocated_at END,
                updated_at = now()
            WHERE id = $1
              AND NOT EXISTS (
                  SELECT 1 FROM delivery_plans dp JOIN trips t ON t.id = dp.trip_id
                  WHERE dp.order_id = orders.id AND t.status IN ('ASSIGNED', 'ACTIVE')
              )
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Vincular un pedido PENDING a una flota
    pub async fn allocate_to_fleet(&self, id: Uuid, fleet_id: Uuid) -> AppResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET fleet_id = $2, order_status = 'ASSIGNED', allocated_at = now(), updated_at = now()
            WHERE id = $1 AND order_status = 'PENDING'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(fleet_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Devolver a PENDING; no toca pedidos planificados en un viaje abierto
    pub async fn release_from_fleet(&self, id: Uuid) -> AppResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET fleet_id = NULL, order_status = 'PENDING', allocated_at = NULL, updated_at = now()
            WHERE id = $1
              AND NOT EXISTS (
                  SELECT 1 FROM delivery_plans dp JOIN trips t ON t.id = dp.trip_id
                  WHERE dp.order_id = orders.id AND t.status IN ('ASSIGNED', 'ACTIVE')
              )
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    pub async fn delete_pending(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1 AND order_status = 'PENDING'")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
