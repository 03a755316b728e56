use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::DeletedResponse;
use crate::dto::master_dto::{CreateRouteRequest, UpdateRouteRequest};
use crate::middleware::AuthenticatedUser;
use crate::models::master::Route;
use crate::repositories::route_repository::RouteRepository;
use crate::utils::errors::{not_found_error, AppResult};

pub struct RouteController {
    repository: RouteRepository,
}

impl RouteController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: RouteRepository::new(pool),
        }
    }

    pub async fn list(&self, user: &AuthenticatedUser) -> AppResult<Vec<Route>> {
        self.repository.list(user.depot_scope()).await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Route> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Route", &id.to_string()))
    }

    pub async fn create(&self, user: &AuthenticatedUser, request: CreateRouteRequest) -> AppResult<Route> {
        request.validate()?;
        user.ensure_depot(&request.depot_cd)?;
        self.repository.create(request).await
    }

    pub async fn update(&self, id: Uuid, request: UpdateRouteRequest) -> AppResult<Route> {
        request.validate()?;
        self.get(id).await?;
        self.repository.update(id, request).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<DeletedResponse> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Route", &id.to_string()));
        }
        Ok(DeletedResponse::new(id))
    }
}
