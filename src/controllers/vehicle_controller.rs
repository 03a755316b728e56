use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::DeletedResponse;
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest};
use crate::middleware::AuthenticatedUser;
use crate::models::vehicle::Vehicle;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn list(&self, user: &AuthenticatedUser) -> AppResult<Vec<Vehicle>> {
        self.repository.list(user.depot_scope()).await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Vehicle> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateVehicleRequest,
    ) -> AppResult<Vehicle> {
        request.validate()?;
        user.ensure_depot(&request.depot_cd)?;

        // Verificar que la matrícula no exista
        let vehicle_no = request.vehicle_no.trim().to_uppercase();
        if self.repository.find_by_vehicle_no(&vehicle_no).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Vehicle {} is already registered",
                vehicle_no
            )));
        }

        let vehicle = self.repository.create(request).await?;
        info!("🚛 Vehículo {} creado", vehicle.vehicle_no);
        Ok(vehicle)
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> AppResult<Vehicle> {
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
