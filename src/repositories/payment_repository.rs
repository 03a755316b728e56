use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::payment::{Payment, PaymentMode, PaymentStatus, PaymentTransType};
use crate::utils::errors::AppResult;

/// Movimiento ya saneado
pub struct PaymentFields {
    pub trans_type: PaymentTransType,
    pub trans_name: String,
    pub cust_cd: Option<String>,
    pub cust_name: Option<String>,
    pub customer_id: Option<Uuid>,
    pub amount: Decimal,
    pub mode: PaymentMode,
    pub ref_no: Option<String>,
    pub remarks: String,
    pub tx_date: DateTime<Utc>,
    pub order_id: Option<Uuid>,
    pub trip_id: Option<Uuid>,
}

#[derive(Debug, Default)]
pub struct PaymentFilter {
    pub q: Option<String>,
    pub status: Option<PaymentStatus>,
    pub include_deleted: bool,
    pub trans_type: Option<PaymentTransType>,
    pub mode: Option<PaymentMode>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: i64,
    pub offset: i64,
}

const PAYMENT_WHERE: &str = r#"
    WHERE (CASE WHEN $1::payment_status IS NOT NULL THEN status = $1
                ELSE ($2 OR status <> 'DELETED') END)
      AND ($3::payment_trans_type IS NULL OR trans_type = $3)
      AND ($4::payment_mode IS NULL OR mode = $4)
      AND ($5::date IS NULL OR tx_date >= $5::date)
      AND ($6::date IS NULL OR tx_date < ($6::date + 1))
      AND ($7::text IS NULL OR trans_name ILIKE $7 OR cust_cd ILIKE $7
           OR cust_name ILIKE $7 OR ref_no ILIKE $7 OR remarks ILIKE $7)
"#;

pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Página, total de filas y suma de importes del filtro
    pub async fn list(&self, filter: &PaymentFilter) -> AppResult<(Vec<Payment>, i64, Decimal)> {
        let pattern = filter
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(|q| format!("%{}%", q));

        let (total, amount): (i64, Decimal) = sqlx::query_as(&format!(
            "SELECT COUNT(*), COALESCE(SUM(amount), 0) FROM payments {}",
            PAYMENT_WHERE
        ))
        .bind(filter.status)
        .bind(filter.include_deleted)
        .bind(filter.trans_type)
        .bind(filter.mode)
        .bind(filter.from)
        .bind(filter.to)
        .bind(pattern.as_deref())
        .fetch_one(&self.pool)
        .await?;

        let payments = sqlx::query_as::<_, Payment>(&format!(
            "SELECT * FROM payments {} ORDER BY tx_date DESC, created_at DESC LIMIT $8 OFFSET $9",
            PAYMENT_WHERE
        ))
        .bind(filter.status)
        .bind(filter.include_deleted)
        .bind(filter.trans_type)
        .bind(filter.mode)
        .bind(filter.from)
        .bind(filter.to)
        .bind(pattern.as_deref())
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((payments, total, amount))
    }

    /// Movimiento no borrado
    pub async fn find_live(&self, id: Uuid) -> AppResult<Option<Payment>> {
        let payment = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE id = $1 AND status <> 'DELETED'",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payment)
    }

    pub async fn create(&self, fields: PaymentFields, user: &str) -> AppResult<Payment> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (id, trans_type, trans_name, cust_cd, cust_name, customer_id,
                                  amount, mode, ref_no, remarks, status, tx_date,
                                  order_id, trip_id, created_by, updated_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'DRAFT', $11, $12, $13, $14, $14)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(fields.trans_type)
        .bind(fields.trans_name)
        .bind(fields.cust_cd)
        .bind(fields.cust_name)
        .bind(fields.customer_id)
        .bind(fields.amount)
        .bind(fields.mode)
        .bind(fields.ref_no)
        .bind(fields.remarks)
        .bind(fields.tx_date)
        .bind(fields.order_id)
        .bind(fields.trip_id)
        .bind(user)
        .fetch_one(&self.pool)
        .await?;

        Ok(payment)
    }

    /// Reescribir un borrador; `None` si dejó de ser DRAFT
    pub async fn update_draft(
        &self,
        id: Uuid,
        fields: PaymentFields,
        user: &str,
    ) -> AppResult<Option<Payment>> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            UPDATE payments
            SET trans_type = $2, trans_name = $3, cust_cd = $4, cust_name = $5,
                customer_id = $6, amount = $7, mode = $8, ref_no = $9, remarks = $10,
                tx_date = $11, order_id = $12, trip_id = $13, updated_by = $14,
                updated_at = now()
            WHERE id = $1 AND status = 'DRAFT'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(fields.trans_type)
        .bind(fields.trans_name)
        .bind(fields.cust_cd)
        .bind(fields.cust_name)
        .bind(fields.customer_id)
        .bind(fields.amount)
        .bind(fields.mode)
        .bind(fields.ref_no)
        .bind(fields.remarks)
        .bind(fields.tx_date)
        .bind(fields.order_id)
        .bind(fields.trip_id)
        .bind(user)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payment)
    }

    /// DRAFT → SUBMITTED
    pub async fn submit(&self, id: Uuid, user: &str) -> AppResult<Option<Payment>> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            UPDATE payments
            SET status = 'SUBMITTED', submitted_at = now(), updated_by = $2, updated_at = now()
            WHERE id = $1 AND status = 'DRAFT'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payment)
    }

    /// Vaciar un borrador conservando tipo y fecha
    pub async fn reset_draft(&self, id: Uuid, user: &str) -> AppResult<Option<Payment>> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            UPDATE payments
            SET trans_name = '', cust_cd = '', cust_name = '', customer_id = NULL,
                amount = 0, mode = 'CASH', ref_no = '', remarks = '',
                order_id = NULL, trip_id = NULL, updated_by = $2, updated_at = now()
            WHERE id = $1 AND status = 'DRAFT'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payment)
    }

    pub async fn soft_delete(&self, id: Uuid, user: &str) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE payments
            SET status = 'DELETED', deleted_at = now(), updated_by = $2, updated_at = now()
            WHERE id = $1 AND status <> 'DELETED'
            "#,
        )
        .bind(id)
        .bind(user)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
