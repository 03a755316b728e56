use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::dto::fleet_dto::{
    AssignDriverRequest, FleetListQuery, FleetOrderRequest, ReleaseDriverRequest, SyncFleetsResponse,
};
use crate::middleware::AuthenticatedUser;
use crate::models::fleet::{Fleet, FleetView};
use crate::models::order::{Order, OrderStatus};
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::fleet_repository::FleetRepository;
use crate::repositories::order_repository::OrderRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct FleetController {
    repository: FleetRepository,
    vehicles: VehicleRepository,
    drivers: DriverRepository,
    orders: OrderRepository,
}

impl FleetController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: FleetRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            drivers: DriverRepository::new(pool.clone()),
            orders: OrderRepository::new(pool),
        }
    }

    pub async fn list(&self, user: &AuthenticatedUser, mut query: FleetListQuery) -> AppResult<Vec<FleetView>> {
        if let Some(own) = user.depot_scope() {
            query.depot_cd = Some(own.to_string());
        }
        self.repository.list(&query).await
    }

    async fn fleet(&self, id: Uuid) -> AppResult<FleetView> {
        self.repository
            .find_view(id)
            .await?
            .ok_or_else(|| not_found_error("Fleet", &id.to_string()))
    }

    pub async fn assign_driver(
        &self,
        user: &AuthenticatedUser,
        request: AssignDriverRequest,
    ) -> AppResult<Fleet> {
        let vehicle = self
            .vehicles
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &request.vehicle_id.to_string()))?;
        user.ensure_depot(&vehicle.depot_cd)?;
        self.drivers
            .find_by_id(request.driver_id)
            .await?
            .ok_or_else(|| not_found_error("Driver", &request.driver_id.to_string()))?;

        let fleet = self
            .repository
            .upsert_driver(vehicle.id, request.driver_id, user.emp_code())
            .await?;
        info!("🔗 Conductor {} asignado a {}", request.driver_id, vehicle.vehicle_no);
        Ok(fleet)
    }

    pub async fn release_driver(
        &self,
        user: &AuthenticatedUser,
        request: ReleaseDriverRequest,
    ) -> AppResult<Fleet> {
        let vehicle = self
            .vehicles
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &request.vehicle_id.to_string()))?;
        user.ensure_depot(&vehicle.depot_cd)?;

        self.repository
            .release_driver(vehicle.id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No fleet for vehicle {}", vehicle.vehicle_no)))
    }

    pub async fn sync_from_vehicles(&self, user: &AuthenticatedUser) -> AppResult<SyncFleetsResponse> {
        user.ensure_admin()?;
        let (vehicles, created) = self.repository.sync_from_vehicles().await?;
        info!("🔁 Flotas sincronizadas: {} vehículos, {} nuevas", vehicles, created);
        Ok(SyncFleetsResponse {
            ok: true,
            vehicles,
            created,
        })
    }

    /// Vincular un pedido PENDING a la flota
    pub async fn allocate(
        &self,
        user: &AuthenticatedUser,
        fleet_id: Uuid,
        request: FleetOrderRequest,
    ) -> AppResult<Order> {
        let fleet = self.fleet(fleet_id).await?;
        user.ensure_depot(&fleet.fleet.depot_cd)?;
        let order = self
            .orders
            .find_by_id(request.order_id)
            .await?
            .ok_or_else(|| not_found_error("Order", &request.order_id.to_string()))?;

        self.orders
            .allocate_to_fleet(order.id, fleet_id)
            .await?
            .ok_or_else(|| {
                AppError::Conflict(format!(
                    "Order {} is {:?}, only PENDING orders can be allocated",
                    order.order_no, order.order_status
                ))
            })
    }

    /// Devolver el pedido a PENDING; solo desde la flota que lo tiene
    pub async fn release(
        &self,
        user: &AuthenticatedUser,
        fleet_id: Uuid,
        request: FleetOrderRequest,
    ) -> AppResult<Order> {
        let fleet = self.fleet(fleet_id).await?;
        user.ensure_depot(&fleet.fleet.depot_cd)?;
        let order = self
            .orders
            .find_by_id(request.order_id)
            .await?
            .ok_or_else(|| not_found_error("Order", &request.order_id.to_string()))?;

        match order.fleet_id {
            Some(current) if current != fleet_id => {
                return Err(AppError::Conflict(format!(
                    "Order {} is allocated to a different fleet",
                    order.order_no
                )))
            }
            _ => {}
        }
        if matches!(order.order_status, OrderStatus::Completed | OrderStatus::Cancelled) {
            return Err(AppError::Conflict(format!(
                "Order {} is already closed",
                order.order_no
            )));
        }

        if let Some(trip_no) = self.orders.open_trip_no(order.id).await? {
            return Err(planned_on_trip(&order.order_no, Some(&trip_no)));
        }

        self.orders
            .release_from_fleet(order.id)
            .await?
            .ok_or_else(|| planned_on_trip(&order.order_no, None))
    }
}

fn planned_on_trip(order_no: &str, trip_no: Option<&str>) -> AppError {
    let trip = trip_no.map_or_else(|| "an open trip".to_string(), |t| format!("trip {}", t));
    AppError::Conflict(format!(
        "Order {} is planned on {} and cannot be released",
        order_no, trip
    ))
}
