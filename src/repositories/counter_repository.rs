//! Contadores con nombre (series de viaje y secuencias de pedido)

use sqlx::{PgConnection, PgPool};

use crate::utils::errors::AppResult;

/// Avanzar el contador y devolver el nuevo valor
///
/// La primera llamada para un `id` devuelve `first`.
pub async fn next_value(conn: &mut PgConnection, id: &str, first: i64) -> AppResult<i64> {
    let (seq,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO counters (id, seq) VALUES ($1, $2)
        ON CONFLICT (id) DO UPDATE SET seq = counters.seq + 1
        RETURNING seq
        "#,
    )
    .bind(id)
    .bind(first)
    .fetch_one(conn)
    .await?;

    Ok(seq)
}

pub struct CounterRepository {
    pool: PgPool,
}

impl CounterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Avanzar el contador en su propia conexión, fuera de cualquier transacción
    ///
    /// El incremento queda confirmado aunque la transacción del llamante
    /// haga rollback.
    pub async fn next_committed(&self, id: &str, first: i64) -> AppResult<i64> {
        let mut conn = self.pool.acquire().await?;
        next_value(&mut *conn, id, first).await
    }

    /// Fijar el contador para que el siguiente valor sea `next`
    pub async fn reset(&self, id: &str, next: i64) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO counters (id, seq) VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET seq = EXCLUDED.seq
            "#,
        )
        .bind(id)
        .bind(next - 1)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
