use chrono::NaiveDate;
use sqlx::{types::Json, PgConnection, PgPool};
use uuid::Uuid;

use crate::models::invoice::{Invoice, NewInvoice};
use crate::utils::errors::AppResult;

/// Filtros del listado paginado
#[derive(Debug, Default)]
pub struct InvoiceFilter {
    pub q: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub depot: Option<String>,
    pub driver: Option<Uuid>,
    pub limit: i64,
    pub offset: i64,
}

/// Visibilidad de una factura: depósito del viaje o del cliente, o conductor del viaje
const SCOPE: &str = r#"
    ({depot}::text IS NULL
     OR EXISTS (SELECT 1 FROM trips t WHERE t.id = invoices.trip_id AND t.depot_cd = {depot})
     OR EXISTS (SELECT 1 FROM customers c WHERE c.id = invoices.customer_id AND c.depot_cd = {depot}))
    AND ({driver}::uuid IS NULL
     OR EXISTS (SELECT 1 FROM trips t WHERE t.id = invoices.trip_id AND t.driver_id = {driver}))
"#;

fn scope(depot: &str, driver: &str) -> String {
    SCOPE.replace("{depot}", depot).replace("{driver}", driver)
}

pub async fn insert(conn: &mut PgConnection, new: NewInvoice) -> AppResult<Invoice> {
    let invoice = sqlx::query_as::<_, Invoice>(
        r#"
        INSERT INTO invoices (id, invoice_no, trip_id, delivery_id, customer_id, order_id,
                              customer_snap, order_snap, vehicle_snap, items,
                              sub_total, total_amount, dc_number, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.invoice_no)
    .bind(new.trip_id)
    .bind(new.delivery_id)
    .bind(new.customer_id)
    .bind(new.order_id)
    .bind(Json(new.customer_snap))
    .bind(Json(new.order_snap))
    .bind(Json(new.vehicle_snap))
    .bind(Json(new.items))
    .bind(new.sub_total)
    .bind(new.total_amount)
    .bind(new.dc_number)
    .bind(new.notes)
    .fetch_one(conn)
    .await?;

    Ok(invoice)
}

pub struct InvoiceRepository {
    pool: PgPool,
}

impl InvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Factura dentro del ámbito del usuario; fuera de él no existe
    pub async fn find_visible(
        &self,
        id: Uuid,
        depot: Option<&str>,
        driver: Option<Uuid>,
    ) -> AppResult<Option<Invoice>> {
        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT * FROM invoices WHERE id = $1 AND {}",
            scope("$2", "$3")
        ))
        .bind(id)
        .bind(depot)
        .bind(driver)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    /// Primera factura emitida para un viaje
    pub async fn first_for_trip(&self, trip_id: Uuid) -> AppResult<Option<Invoice>> {
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT * FROM invoices
            WHERE trip_id = $1
            ORDER BY created_at, invoice_no
            LIMIT 1
            "#,
        )
        .bind(trip_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    /// Página de facturas y total de filas que cumplen el filtro
    pub async fn list(&self, filter: &InvoiceFilter) -> AppResult<(Vec<Invoice>, i64)> {
        let pattern = filter
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(|q| format!("%{}%", q));

        let clause = format!(
            r#"
            WHERE ($1::text IS NULL
                   OR invoice_no ILIKE $1
                   OR customer_snap->>'custName' ILIKE $1
                   OR customer_snap->>'custCd' ILIKE $1
                   OR vehicle_snap->>'tripNo' ILIKE $1)
              AND ($2::date IS NULL OR invoice_date >= $2::date)
              AND ($3::date IS NULL OR invoice_date < ($3::date + 1))
              AND {}
            "#,
            scope("$4", "$5")
        );

        let (total,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM invoices {}", clause))
            .bind(pattern.as_deref())
            .bind(filter.from)
            .bind(filter.to)
            .bind(filter.depot.as_deref())
            .bind(filter.driver)
            .fetch_one(&self.pool)
            .await?;

        let invoices = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT * FROM invoices {} ORDER BY invoice_date DESC, invoice_no DESC LIMIT $6 OFFSET $7",
            clause
        ))
        .bind(pattern.as_deref())
        .bind(filter.from)
        .bind(filter.to)
        .bind(filter.depot.as_deref())
        .bind(filter.driver)
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((invoices, total))
    }
}
