use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::payrec::{PayRec, PayRecMode, PayRecStatus, PayRecType};
use crate::utils::errors::AppResult;

/// Campos completos de un movimiento, con la parte destinataria ya resuelta
pub struct PayRecFields {
    pub date: DateTime<Utc>,
    pub tr_type: PayRecType,
    pub party_code: String,
    pub party_name: Option<String>,
    pub for_party_code: String,
    pub for_party_name: Option<String>,
    pub mode: PayRecMode,
    pub ref_no: Option<String>,
    pub amount: Decimal,
    pub remarks: Option<String>,
    pub mgr: Option<String>,
    pub status: PayRecStatus,
}

#[derive(Debug, Default)]
pub struct PayRecFilter {
    pub q: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub tr_type: Option<PayRecType>,
    pub mode: Option<PayRecMode>,
    pub party_code: Option<String>,
    pub for_party_code: Option<String>,
    pub status: Option<PayRecStatus>,
    pub limit: i64,
    pub offset: i64,
}

const PAYREC_WHERE: &str = r#"
    WHERE (CASE WHEN $1::payrec_status IS NOT NULL THEN status = $1
                ELSE status <> 'DELETED' END)
      AND ($2::date IS NULL OR date >= $2::date)
      AND ($3::date IS NULL OR date < ($3::date + 1))
      AND ($4::payrec_tr_type IS NULL OR tr_type = $4)
      AND ($5::payrec_mode IS NULL OR mode = $5)
      AND ($6::text IS NULL OR party_code = $6)
      AND ($7::text IS NULL OR for_party_code = $7)
      AND ($8::text IS NULL OR party_code ILIKE $8 OR party_name ILIKE $8
           OR for_party_code ILIKE $8 OR for_party_name ILIKE $8
           OR ref_no ILIKE $8 OR remarks ILIKE $8 OR mgr ILIKE $8)
"#;

pub struct PayRecRepository {
    pool: PgPool,
}

impl PayRecRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, filter: &PayRecFilter) -> AppResult<(Vec<PayRec>, i64)> {
        let pattern = filter
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(|q| format!("%{}%", q));

        let (total,): (i64,) =
            sqlx::query_as(&format!("SELECT COUNT(*) FROM payrecs {}", PAYREC_WHERE))
                .bind(filter.status)
                .bind(filter.from)
                .bind(filter.to)
                .bind(filter.tr_type)
                .bind(filter.mode)
                .bind(filter.party_code.as_deref())
                .bind(filter.for_party_code.as_deref())
                .bind(pattern.as_deref())
                .fetch_one(&self.pool)
                .await?;

        let items = sqlx::query_as::<_, PayRec>(&format!(
            "SELECT * FROM payrecs {} ORDER BY date DESC, id DESC LIMIT $9 OFFSET $10",
            PAYREC_WHERE
        ))
        .bind(filter.status)
        .bind(filter.from)
        .bind(filter.to)
        .bind(filter.tr_type)
        .bind(filter.mode)
        .bind(filter.party_code.as_deref())
        .bind(filter.for_party_code.as_deref())
        .bind(pattern.as_deref())
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((items, total))
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<PayRec>> {
        let payrec = sqlx::query_as::<_, PayRec>("SELECT * FROM payrecs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(payrec)
    }

    pub async fn create(&self, fields: PayRecFields, user: &str) -> AppResult<PayRec> {
        let payrec = sqlx::query_as::<_, PayRec>(
            r#"
            INSERT INTO payrecs (id, date, tr_type, party_code, party_name, for_party_code,
                                 for_party_name, mode, ref_no, amount, remarks, mgr, status,
                                 created_by, updated_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $14)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(fields.date)
        .bind(fields.tr_type)
        .bind(fields.party_code)
        .bind(fields.party_name)
        .bind(fields.for_party_code)
        .bind(fields.for_party_name)
        .bind(fields.mode)
        .bind(fields.ref_no)
        .bind(fields.amount)
        .bind(fields.remarks)
        .bind(fields.mgr)
        .bind(fields.status)
        .bind(user)
        .fetch_one(&self.pool)
        .await?;

        Ok(payrec)
    }

    /// Reescribir un movimiento no borrado; `None` si está borrado
    pub async fn update_live(
        &self,
        id: Uuid,
        fields: PayRecFields,
        user: &str,
    ) -> AppResult<Option<PayRec>> {
        let payrec = sqlx::query_as::<_, PayRec>(
            r#"
            UPDATE payrecs
            SET date = $2, tr_type = $3, party_code = $4, party_name = $5,
                for_party_code = $6, for_party_name = $7, mode = $8, ref_no = $9,
                amount = $10, remarks = $11, mgr = $12, status = $13,
                updated_by = $14, updated_at = now()
            WHERE id = $1 AND status <> 'DELETED'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(fields.date)
        .bind(fields.tr_type)
        .bind(fields.party_code)
        .bind(fields.party_name)
        .bind(fields.for_party_code)
        .bind(fields.for_party_name)
        .bind(fields.mode)
        .bind(fields.ref_no)
        .bind(fields.amount)
        .bind(fields.remarks)
        .bind(fields.mgr)
        .bind(fields.status)
        .bind(user)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payrec)
    }

    pub async fn set_status(
        &self,
        id: Uuid,
        status: PayRecStatus,
        user: &str,
    ) -> AppResult<Option<PayRec>> {
        let payrec = sqlx::query_as::<_, PayRec>(
            r#"
            UPDATE payrecs
            SET status = $2, updated_by = $3, updated_at = now()
            WHERE id = $1 AND status <> 'DELETED'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(user)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payrec)
    }

    /// Marcar como DELETED; idempotente sobre filas ya borradas
    pub async fn soft_delete(&self, id: Uuid, user: &str) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE payrecs
            SET status = 'DELETED', deleted_at = now(), deleted_by = $2,
                updated_by = $2, updated_at = now()
            WHERE id = $1 AND status <> 'DELETED'
            "#,
        )
        .bind(id)
        .bind(user)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// DELETED → ACTIVE; `None` si no estaba borrado
    pub async fn restore(&self, id: Uuid, user: &str) -> AppResult<Option<PayRec>> {
        let payrec = sqlx::query_as::<_, PayRec>(
            r#"
            UPDATE payrecs
            SET status = 'ACTIVE', deleted_at = NULL, deleted_by = NULL,
                updated_by = $2, updated_at = now()
            WHERE id = $1 AND status = 'DELETED'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payrec)
    }
}
