//! Controlador de asociados de ventas

use bcrypt::{hash, DEFAULT_COST};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::DeletedResponse;
use crate::dto::employee_dto::{CreateSalesAssociateRequest, UpdateSalesAssociateRequest};
use crate::middleware::AuthenticatedUser;
use crate::models::employee::SalesAssociate;
use crate::repositories::depot_repository::DepotRepository;
use crate::repositories::sales_associate_repository::SalesAssociateRepository;
use crate::utils::errors::{AppError, AppResult};

pub struct SalesAssociateController {
    repository: SalesAssociateRepository,
    depots: DepotRepository,
}

fn not_found() -> AppError {
    AppError::NotFound("Sales associate not found".to_string())
}

impl SalesAssociateController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: SalesAssociateRepository::new(pool.clone()),
            depots: DepotRepository::new(pool),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<SalesAssociate>> {
        self.repository.list().await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<SalesAssociate> {
        self.repository.find_by_id(id).await?.ok_or_else(not_found)
    }

    async fn ensure_depot_exists(&self, depot_id: Uuid) -> AppResult<()> {
        if self.depots.find_by_id(depot_id).await?.is_none() {
            return Err(AppError::BadRequest(format!("Depot {} not found", depot_id)));
        }
        Ok(())
    }

    pub async fn create(
        &self,
        caller: &AuthenticatedUser,
        request: CreateSalesAssociateRequest,
    ) -> AppResult<SalesAssociate> {
        caller.ensure_admin()?;
        request.validate()?;
        self.ensure_depot_exists(request.depot_id).await?;

        let password_hash = hash(&request.pwd, DEFAULT_COST)?;
        let associate = self
            .repository
            .create(&request.name, request.depot_id, password_hash)
            .await?;

        info!("🤝 Asociado de ventas {} creado", associate.name);
        Ok(associate)
    }

    pub async fn update(
        &self,
        caller: &AuthenticatedUser,
        id: Uuid,
        request: UpdateSalesAssociateRequest,
    ) -> AppResult<SalesAssociate> {
        caller.ensure_admin()?;
        request.validate()?;
        if let Some(depot_id) = request.depot_id {
            self.ensure_depot_exists(depot_id).await?;
        }

        let password_hash = match request.pwd.as_deref() {
            Some(pwd) => Some(hash(pwd, DEFAULT_COST)?),
            None => None,
        };
        self.repository.update(id, request, password_hash).await
    }

    pub async fn delete(&self, caller: &AuthenticatedUser, id: Uuid) -> AppResult<DeletedResponse> {
        caller.ensure_admin()?;
        if !self.repository.delete(id).await? {
            return Err(not_found());
        }
        Ok(DeletedResponse::new(id))
    }
}
