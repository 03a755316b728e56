use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::DeletedResponse;
use crate::dto::master_dto::{validate_depot_status, CreateDepotRequest, UpdateDepotRequest};
use crate::middleware::AuthenticatedUser;
use crate::models::master::Depot;
use crate::repositories::depot_repository::DepotRepository;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct DepotController {
    repository: DepotRepository,
}

impl DepotController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: DepotRepository::new(pool),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<Depot>> {
        self.repository.list().await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Depot> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Depot", &id.to_string()))
    }

    pub async fn create(&self, user: &AuthenticatedUser, request: CreateDepotRequest) -> AppResult<Depot> {
        user.ensure_admin()?;
        request.validate()?;
        if !validate_depot_status(&request.status) {
            return Err(AppError::BadRequest(format!("Invalid depot status '{}'", request.status)));
        }

        let depot = self.repository.create(request).await?;
        info!("🏭 Depósito {} creado", depot.depot_cd);
        Ok(depot)
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: UpdateDepotRequest,
    ) -> AppResult<Depot> {
        user.ensure_admin()?;
        request.validate()?;
        if let Some(status) = request.status.as_deref() {
            if !validate_depot_status(status) {
                return Err(AppError::BadRequest(format!("Invalid depot status '{}'", status)));
            }
        }

        self.get(id).await?;
        self.repository.update(id, request).await
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> AppResult<DeletedResponse> {
        user.ensure_admin()?;
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Depot", &id.to_string()));
        }
        Ok(DeletedResponse::new(id))
    }
}
