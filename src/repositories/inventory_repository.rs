use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::inventory::{BowserInventory, BowserLedgerEntry};
use crate::utils::errors::AppResult;

/// Movimiento ya aplicado al saldo, pendiente de anotar en el libro
pub struct LedgerMovement<'a> {
    pub vehicle_no: &'a str,
    pub depot_cd: &'a str,
    pub tr_type: &'a str,
    pub tr_ref: Option<String>,
    pub op_bal: Decimal,
    pub tr_qty: Decimal,
    pub cl_stock: Decimal,
}

pub async fn find_in_tx(
    conn: &mut PgConnection,
    vehicle_no: &str,
) -> AppResult<Option<BowserInventory>> {
    let inventory = sqlx::query_as::<_, BowserInventory>(
        "SELECT * FROM bowser_inventories WHERE vehicle_no = $1",
    )
    .bind(vehicle_no)
    .fetch_optional(conn)
    .await?;

    Ok(inventory)
}

/// Descontar `qty` solo si hay saldo suficiente; `None` si no alcanza o no existe
pub async fn try_decrement(
    conn: &mut PgConnection,
    vehicle_no: &str,
    qty: Decimal,
) -> AppResult<Option<BowserInventory>> {
    let inventory = sqlx::query_as::<_, BowserInventory>(
        r#"
        UPDATE bowser_inventories
        SET balance_liters = balance_liters - $2, updated_at = now()
        WHERE vehicle_no = $1 AND balance_liters >= $2
        RETURNING *
        "#,
    )
    .bind(vehicle_no)
    .bind(qty)
    .fetch_optional(conn)
    .await?;

    Ok(inventory)
}

/// Sumar una recepción, creando la fila del vehículo si no existía
pub async fn add_receipt(
    conn: &mut PgConnection,
    vehicle_no: &str,
    depot_cd: &str,
    qty: Decimal,
) -> AppResult<BowserInventory> {
    let inventory = sqlx::query_as::<_, BowserInventory>(
        r#"
        INSERT INTO bowser_inventories (vehicle_no, depot_cd, balance_liters)
        VALUES ($1, $2, $3)
        ON CONFLICT (vehicle_no) DO UPDATE
        SET balance_liters = bowser_inventories.balance_liters + EXCLUDED.balance_liters,
            updated_at = now()
        RETURNING *
        "#,
    )
    .bind(vehicle_no)
    .bind(depot_cd)
    .bind(qty)
    .fetch_one(conn)
    .await?;

    Ok(inventory)
}

pub async fn append_ledger(
    conn: &mut PgConnection,
    movement: LedgerMovement<'_>,
) -> AppResult<BowserLedgerEntry> {
    let entry = sqlx::query_as::<_, BowserLedgerEntry>(
        r#"
        INSERT INTO bowser_ledger (id, vehicle_no, depot_cd, tr_type, tr_ref, op_bal, tr_qty, cl_stock)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(movement.vehicle_no)
    .bind(movement.depot_cd)
    .bind(movement.tr_type)
    .bind(movement.tr_ref)
    .bind(movement.op_bal)
    .bind(movement.tr_qty)
    .bind(movement.cl_stock)
    .fetch_one(conn)
    .await?;

    Ok(entry)
}

pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, depot_cd: Option<&str>) -> AppResult<Vec<BowserInventory>> {
        let rows = sqlx::query_as::<_, BowserInventory>(
            r#"
            SELECT * FROM bowser_inventories
            WHERE ($1::text IS NULL OR depot_cd = $1)
            ORDER BY vehicle_no
            "#,
        )
        .bind(depot_cd)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn find(&self, vehicle_no: &str) -> AppResult<Option<BowserInventory>> {
        let row = sqlx::query_as::<_, BowserInventory>(
            "SELECT * FROM bowser_inventories WHERE vehicle_no = $1",
        )
        .bind(vehicle_no)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn ledger(&self, vehicle_no: &str, limit: i64) -> AppResult<Vec<BowserLedgerEntry>> {
        let entries = sqlx::query_as::<_, BowserLedgerEntry>(
            r#"
            SELECT * FROM bowser_ledger
            WHERE vehicle_no = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(vehicle_no)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
