use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::DeletedResponse;
use crate::dto::driver_dto::{CreateDriverRequest, UpdateDriverRequest};
use crate::middleware::AuthenticatedUser;
use crate::models::driver::Driver;
use crate::repositories::driver_repository::DriverRepository;
use crate::utils::errors::{not_found_error, AppResult};

pub struct DriverController {
    repository: DriverRepository,
}

impl DriverController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: DriverRepository::new(pool),
        }
    }

    pub async fn list(&self, user: &AuthenticatedUser) -> AppResult<Vec<Driver>> {
        self.repository.list(user.depot_scope()).await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Driver> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Driver", &id.to_string()))
    }

    pub async fn create(&self, user: &AuthenticatedUser, request: CreateDriverRequest) -> AppResult<Driver> {
        request.validate()?;
        user.ensure_depot(&request.depot_cd)?;
        self.repository.create(request).await
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: UpdateDriverRequest,
    ) -> AppResult<Driver> {
        request.validate()?;
        let current = self.get(id).await?;
        user.ensure_depot(&current.depot_cd)?;
        self.repository.update(id, request).await
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> AppResult<DeletedResponse> {
        let current = self.get(id).await?;
        user.ensure_depot(&current.depot_cd)?;
        self.repository.delete(id).await?;
        Ok(DeletedResponse::new(id))
    }
}
