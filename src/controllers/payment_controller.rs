//! Controlador de cobros y pagos
//!
//! Los movimientos nacen en DRAFT; solo un borrador se edita, se envía o se
//! reinicia. El borrado es lógico.

use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::{lenient_id, parse_date_filter, parse_enum_filter, Page, DEFAULT_PAGE_SIZE};
use crate::dto::payment_dto::{
    CreatePaymentRequest, PaymentCreatedResponse, PaymentListQuery, PaymentListResponse,
    PaymentTotals, UpdatePaymentRequest,
};
use crate::middleware::AuthenticatedUser;
use crate::models::payment::{Payment, PaymentStatus};
use crate::repositories::payment_repository::{PaymentFields, PaymentFilter, PaymentRepository};
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct PaymentController {
    repository: PaymentRepository,
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl PaymentController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PaymentRepository::new(pool),
        }
    }

    pub async fn list(&self, query: PaymentListQuery) -> AppResult<PaymentListResponse> {
        let page = Page::resolve(query.page, query.limit, DEFAULT_PAGE_SIZE);
        let filter = PaymentFilter {
            q: trimmed(query.q),
            status: parse_enum_filter(query.status.as_deref(), "status")?,
            include_deleted: query.include_deleted,
            trans_type: parse_enum_filter(query.trans_type.as_deref(), "transType")?,
            mode: parse_enum_filter(query.mode.as_deref(), "mode")?,
            from: parse_date_filter(query.from.as_deref(), "from")?,
            to: parse_date_filter(query.to.as_deref(), "to")?,
            limit: page.limit,
            offset: page.offset(),
        };

        let (data, total, amount) = self.repository.list(&filter).await?;
        Ok(PaymentListResponse {
            data,
            page: page.page,
            pages: page.pages(total),
            total,
            totals: PaymentTotals { amount },
        })
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Payment> {
        self.repository
            .find_live(id)
            .await?
            .ok_or_else(|| not_found_error("Payment", &id.to_string()))
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreatePaymentRequest,
    ) -> AppResult<PaymentCreatedResponse> {
        request.validate()?;

        let fields = PaymentFields {
            trans_type: request.trans_type,
            trans_name: trimmed(request.trans_name).unwrap_or_default(),
            cust_cd: trimmed(request.cust_cd),
            cust_name: trimmed(request.cust_name),
            customer_id: request.customer_id,
            amount: request.amount,
            mode: request.mode,
            ref_no: trimmed(request.ref_no),
            remarks: trimmed(request.remarks).unwrap_or_default(),
            tx_date: request.tx_date.unwrap_or_else(Utc::now),
            order_id: lenient_id(request.order_id.as_deref()),
            trip_id: lenient_id(request.trip_id.as_deref()),
        };

        let payment = self.repository.create(fields, user.emp_code()).await?;
        info!("💰 Movimiento {:?} de {} creado", payment.trans_type, payment.amount);

        Ok(PaymentCreatedResponse {
            message: "Payment created",
            id: payment.id,
        })
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: UpdatePaymentRequest,
    ) -> AppResult<Payment> {
        request.validate()?;
        let current = self.get(id).await?;
        current.status.ensure_draft("modified")?;

        let fields = PaymentFields {
            trans_type: request.trans_type.unwrap_or(current.trans_type),
            trans_name: trimmed(request.trans_name).unwrap_or(current.trans_name),
            cust_cd: trimmed(request.cust_cd).or(current.cust_cd),
            cust_name: trimmed(request.cust_name).or(current.cust_name),
            customer_id: request.customer_id.or(current.customer_id),
            amount: request.amount.unwrap_or(current.amount),
            mode: request.mode.unwrap_or(current.mode),
            ref_no: trimmed(request.ref_no).or(current.ref_no),
            remarks: request.remarks.map(|r| r.trim().to_string()).unwrap_or(current.remarks),
            tx_date: request.tx_date.unwrap_or(current.tx_date),
            order_id: match request.order_id {
                Some(raw) => lenient_id(Some(&raw)),
                None => current.order_id,
            },
            trip_id: match request.trip_id {
                Some(raw) => lenient_id(Some(&raw)),
                None => current.trip_id,
            },
        };

        self.repository
            .update_draft(id, fields, user.emp_code())
            .await?
            .ok_or_else(|| stale(id))
    }

    /// DRAFT → SUBMITTED
    pub async fn submit(&self, user: &AuthenticatedUser, id: Uuid) -> AppResult<Payment> {
        self.get(id).await?.status.ensure_draft("submitted")?;
        let payment = self
            .repository
            .submit(id, user.emp_code())
            .await?
            .ok_or_else(|| stale(id))?;
        info!("📤 Movimiento {} enviado por {}", id, user.user_id);
        Ok(payment)
    }

    /// Vaciar un borrador
    pub async fn reset(&self, user: &AuthenticatedUser, id: Uuid) -> AppResult<Payment> {
        self.get(id).await?.status.ensure_draft("reset")?;
        self.repository
            .reset_draft(id, user.emp_code())
            .await?
            .ok_or_else(|| stale(id))
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> AppResult<Payment> {
        let current = self.get(id).await?;
        if !self.repository.soft_delete(id, user.emp_code()).await? {
            return Err(not_found_error("Payment", &id.to_string()));
        }
        info!("🗑️ Movimiento {} borrado por {}", id, user.user_id);
        Ok(Payment {
            status: PaymentStatus::Deleted,
            ..current
        })
    }
}

/// El borrador cambió de estado entre la lectura y la escritura
fn stale(id: Uuid) -> AppError {
    AppError::Conflict(format!("Payment {} is no longer a DRAFT", id))
}
