//! Controlador del libro de cobros/pagos de contabilidad
//!
//! Todas las operaciones exigen un usuario administrador o de cuentas.

use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::{parse_date_filter, parse_enum_filter, Page, DEFAULT_PAGE_SIZE};
use crate::dto::payrec_dto::{
    CreatePayRecRequest, PayRecDeletedResponse, PayRecListQuery, PayRecListResponse,
    PayRecRestoredResponse, UpdatePayRecRequest, UpdatePayRecStatusRequest,
};
use crate::middleware::AuthenticatedUser;
use crate::models::payrec::{resolve_for_party, PayRec, PayRecStatus};
use crate::repositories::payrec_repository::{PayRecFields, PayRecFilter, PayRecRepository};
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct PayRecController {
    repository: PayRecRepository,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl PayRecController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PayRecRepository::new(pool),
        }
    }

    pub async fn list(
        &self,
        user: &AuthenticatedUser,
        query: PayRecListQuery,
    ) -> AppResult<PayRecListResponse> {
        user.ensure_accounts()?;
        let page = Page::resolve(query.page, query.limit, DEFAULT_PAGE_SIZE);
        let filter = PayRecFilter {
            q: non_blank(query.q),
            from: parse_date_filter(query.from.as_deref(), "from")?,
            to: parse_date_filter(query.to.as_deref(), "to")?,
            tr_type: parse_enum_filter(query.tr_type.as_deref(), "trType")?,
            mode: parse_enum_filter(query.mode.as_deref(), "mode")?,
            party_code: non_blank(query.party_code),
            for_party_code: non_blank(query.for_party_code),
            status: parse_enum_filter(query.status.as_deref(), "status")?,
            limit: page.limit,
            offset: page.offset(),
        };

        let (items, total) = self.repository.list(&filter).await?;
        Ok(PayRecListResponse {
            page: page.page,
            limit: page.limit,
            total,
            items,
        })
    }

    pub async fn get(&self, user: &AuthenticatedUser, id: Uuid) -> AppResult<PayRec> {
        user.ensure_accounts()?;
        self.find(id).await
    }

    async fn find(&self, id: Uuid) -> AppResult<PayRec> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("PayRec", &id.to_string()))
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreatePayRecRequest,
    ) -> AppResult<PayRec> {
        user.ensure_accounts()?;
        request.validate()?;

        let party_code = request.party_code.trim().to_string();
        let party_name = non_blank(request.party_name);
        let for_party = resolve_for_party(
            request.tr_type,
            &party_code,
            party_name.as_deref(),
            request.for_party_code.as_deref(),
            request.for_party_name.as_deref(),
        )?;

        let fields = PayRecFields {
            date: request.date.unwrap_or_else(Utc::now),
            tr_type: request.tr_type,
            party_code,
            party_name,
            for_party_code: for_party.code,
            for_party_name: for_party.name,
            mode: request.mode,
            ref_no: non_blank(request.ref_no),
            amount: request.amount,
            remarks: non_blank(request.remarks),
            mgr: non_blank(request.mgr),
            status: request.status.unwrap_or(PayRecStatus::Active),
        };

        let payrec = self.repository.create(fields, user.emp_code()).await?;
        info!("📒 PayRec {:?} {} para {}", payrec.tr_type, payrec.amount, payrec.party_code);
        Ok(payrec)
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: UpdatePayRecRequest,
    ) -> AppResult<PayRec> {
        user.ensure_accounts()?;
        request.validate()?;
        let current = self.find(id).await?;
        if current.status == PayRecStatus::Deleted {
            return Err(deleted(id));
        }

        let tr_type = request.tr_type.unwrap_or(current.tr_type);
        let party_code = request
            .party_code
            .map(|c| c.trim().to_string())
            .unwrap_or(current.party_code);
        let party_name = match request.party_name {
            Some(name) => non_blank(Some(name)),
            None => current.party_name,
        };
        // Sin cambios explícitos se conserva la parte destinataria actual
        let for_party = resolve_for_party(
            tr_type,
            &party_code,
            party_name.as_deref(),
            request
                .for_party_code
                .as_deref()
                .or(Some(current.for_party_code.as_str())),
            request
                .for_party_name
                .as_deref()
                .or(current.for_party_name.as_deref()),
        )?;

        let fields = PayRecFields {
            date: request.date.unwrap_or(current.date),
            tr_type,
            party_code,
            party_name,
            for_party_code: for_party.code,
            for_party_name: for_party.name,
            mode: request.mode.unwrap_or(current.mode),
            ref_no: match request.ref_no {
                Some(r) => non_blank(Some(r)),
                None => current.ref_no,
            },
            amount: request.amount.unwrap_or(current.amount),
            remarks: match request.remarks {
                Some(r) => non_blank(Some(r)),
                None => current.remarks,
            },
            mgr: match request.mgr {
                Some(m) => non_blank(Some(m)),
                None => current.mgr,
            },
            status: request.status.unwrap_or(current.status),
        };

        self.repository
            .update_live(id, fields, user.emp_code())
            .await?
            .ok_or_else(|| deleted(id))
    }

    pub async fn update_status(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: UpdatePayRecStatusRequest,
    ) -> AppResult<PayRec> {
        user.ensure_accounts()?;
        let status = request
            .status
            .ok_or_else(|| AppError::BadRequest("status is required".to_string()))?;
        if status == PayRecStatus::Deleted {
            return Err(AppError::BadRequest(
                "Use DELETE to remove a payrec".to_string(),
            ));
        }

        self.find(id).await?;
        let payrec = self
            .repository
            .set_status(id, status, user.emp_code())
            .await?
            .ok_or_else(|| deleted(id))?;
        info!("🔄 PayRec {} → {:?}", id, payrec.status);
        Ok(payrec)
    }

    /// Borrado lógico; repetirlo sobre una fila borrada no falla
    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> AppResult<PayRecDeletedResponse> {
        user.ensure_accounts()?;
        self.find(id).await?;
        self.repository.soft_delete(id, user.emp_code()).await?;
        info!("🗑️ PayRec {} borrado por {}", id, user.user_id);

        Ok(PayRecDeletedResponse {
            deleted: true,
            soft: true,
            id,
        })
    }

    pub async fn restore(&self, user: &AuthenticatedUser, id: Uuid) -> AppResult<PayRecRestoredResponse> {
        user.ensure_accounts()?;
        self.find(id).await?;
        let payrec = self
            .repository
            .restore(id, user.emp_code())
            .await?
            .ok_or_else(|| AppError::Conflict(format!("PayRec {} is not deleted", id)))?;

        Ok(PayRecRestoredResponse {
            restored: true,
            id: payrec.id,
        })
    }
}

fn deleted(id: Uuid) -> AppError {
    AppError::Conflict(format!("PayRec {} is deleted", id))
}
