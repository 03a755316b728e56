use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::DeletedResponse;
use crate::dto::master_dto::{CreateStationRequest, UpdateStationRequest};
use crate::models::master::Station;
use crate::repositories::station_repository::StationRepository;
use crate::utils::errors::{not_found_error, AppResult};

pub struct StationController {
    repository: StationRepository,
}

impl StationController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: StationRepository::new(pool),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<Station>> {
        self.repository.list().await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Station> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Station", &id.to_string()))
    }

    pub async fn create(&self, request: CreateStationRequest) -> AppResult<Station> {
        request.validate()?;
        self.repository.create(request).await
    }

    pub async fn update(&self, id: Uuid, request: UpdateStationRequest) -> AppResult<Station> {
        request.validate()?;
        self.get(id).await?;
        self.repository.update(id, request).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<DeletedResponse> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Station", &id.to_string()));
        }
        Ok(DeletedResponse::new(id))
    }
}
