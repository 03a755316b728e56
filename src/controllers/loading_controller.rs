//! Controlador de cargas
//!
//! Cuando el saldo de la cisterna no cubre la capacidad del viaje, la carga
//! necesita un código de un solo uso con caducidad. También mantiene qué
//! estaciones de carga tiene cada ruta.

use chrono::Utc;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::{lenient_id, DeletedResponse};
use crate::dto::loading_dto::{
    CreateLoadingRequest, CreateLoadingResponse, GenerateCodeRequest, GenerateCodeResponse,
    MapStationRequest, VerifyCodeRequest, VerifyCodeResponse,
};
use crate::middleware::AuthenticatedUser;
use crate::models::inventory::tr_type;
use crate::models::loading::{Loading, LoadingStation, RouteStation};
use crate::models::trip::{Trip, TripStatus};
use crate::repositories::inventory_repository::{self, InventoryRepository, LedgerMovement};
use crate::repositories::loading_repository::{self, LoadingRepository, NewLoading};
use crate::repositories::route_repository::RouteRepository;
use crate::repositories::station_repository::StationRepository;
use crate::repositories::trip_repository::{self, TripRepository};
use crate::services::loading_auth::{check_code, code_expiry, generate_code, requires_code};
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct LoadingController {
    pool: PgPool,
    repository: LoadingRepository,
    trips: TripRepository,
    inventory: InventoryRepository,
    stations: StationRepository,
    routes: RouteRepository,
}

fn ensure_active(trip: &Trip) -> AppResult<()> {
    if trip.status != TripStatus::Active {
        return Err(AppError::BadRequest(format!(
            "Trip {} is {}, loadings need an ACTIVE trip",
            trip.trip_no,
            trip.status.as_str()
        )));
    }
    Ok(())
}

impl LoadingController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: LoadingRepository::new(pool.clone()),
            trips: TripRepository::new(pool.clone()),
            inventory: InventoryRepository::new(pool.clone()),
            stations: StationRepository::new(pool.clone()),
            routes: RouteRepository::new(pool.clone()),
            pool,
        }
    }

    async fn trip(&self, user: &AuthenticatedUser, trip_id: Uuid) -> AppResult<Trip> {
        let trip = self
            .trips
            .find_by_id(trip_id)
            .await?
            .ok_or_else(|| not_found_error("Trip", &trip_id.to_string()))?;
        user.ensure_trip_access(&trip.depot_cd, trip.driver_id)?;
        Ok(trip)
    }

    pub async fn list_for_trip(&self, user: &AuthenticatedUser, trip_id: Uuid) -> AppResult<Vec<Loading>> {
        self.trip(user, trip_id).await?;
        self.repository.list_for_trip(trip_id).await
    }

    pub async fn generate_code(
        &self,
        user: &AuthenticatedUser,
        request: GenerateCodeRequest,
    ) -> AppResult<GenerateCodeResponse> {
        let trip = self.trip(user, request.trip_id).await?;
        ensure_active(&trip)?;

        let inventory = self.inventory.find(&trip.vehicle_no).await?.ok_or_else(|| {
            AppError::NotFound(format!("No inventory for bowser {}", trip.vehicle_no))
        })?;

        if !requires_code(inventory.balance_liters, trip.capacity) {
            return Ok(GenerateCodeResponse {
                code_required: false,
                code: None,
                expires_at: None,
                balance_liters: inventory.balance_liters,
                capacity: trip.capacity,
            });
        }

        let code = generate_code(&mut rand::thread_rng());
        let auth = self
            .repository
            .upsert_auth(trip.id, &code, code_expiry(Utc::now()))
            .await?;
        info!("🔑 Código de carga emitido para el viaje {}", trip.trip_no);

        Ok(GenerateCodeResponse {
            code_required: true,
            code: Some(code),
            expires_at: Some(auth.expires_at),
            balance_liters: inventory.balance_liters,
            capacity: trip.capacity,
        })
    }

    /// Consumir el código; usado, caducado o distinto → 403
    pub async fn verify_code(
        &self,
        user: &AuthenticatedUser,
        request: VerifyCodeRequest,
    ) -> AppResult<VerifyCodeResponse> {
        request.validate()?;
        self.trip(user, request.trip_id).await?;

        let mut tx = self.pool.begin().await?;
        consume(&mut tx, request.trip_id, &request.code).await?;
        tx.commit().await?;

        Ok(VerifyCodeResponse { verified: true })
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateLoadingRequest,
    ) -> AppResult<CreateLoadingResponse> {
        request.validate()?;
        self.stations
            .find_by_id(request.station_id)
            .await?
            .ok_or_else(|| not_found_error("Station", &request.station_id.to_string()))?;

        let mut tx = self.pool.begin().await?;

        let trip = trip_repository::lock(&mut *tx, request.trip_id)
            .await?
            .ok_or_else(|| not_found_error("Trip", &request.trip_id.to_string()))?;
        user.ensure_trip_access(&trip.depot_cd, trip.driver_id)?;
        ensure_active(&trip)?;

        if loading_repository::find_auth(&mut *tx, trip.id).await?.is_some() {
            let code = request
                .code
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .ok_or_else(|| {
                    AppError::BadRequest("A loading code is required for this trip".to_string())
                })?;
            consume(&mut tx, trip.id, code).await?;
        }

        let inventory = inventory_repository::try_decrement(&mut *tx, &trip.vehicle_no, request.qty)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Insufficient stock in bowser {} for {} L",
                    trip.vehicle_no, request.qty
                ))
            })?;

        let loading = loading_repository::insert(
            &mut *tx,
            NewLoading {
                trip_id: trip.id,
                station_id: request.station_id,
                product: request.product.trim().to_string(),
                qty: request.qty,
                vehicle_no: trip.vehicle_no.clone(),
                depot_cd: trip.depot_cd.clone(),
            },
        )
        .await?;

        inventory_repository::append_ledger(
            &mut *tx,
            LedgerMovement {
                vehicle_no: &trip.vehicle_no,
                depot_cd: &inventory.depot_cd,
                tr_type: tr_type::LOADING,
                tr_ref: Some(loading.id.to_string()),
                op_bal: inventory.balance_liters + request.qty,
                tr_qty: request.qty,
                cl_stock: inventory.balance_liters,
            },
        )
        .await?;

        tx.commit().await?;

        info!("🛢️ Carga de {} L registrada en el viaje {}", loading.qty, trip.trip_no);
        Ok(CreateLoadingResponse { loading, inventory })
    }

    pub async fn list_stations(&self) -> AppResult<Vec<LoadingStation>> {
        self.repository.list_stations().await
    }

    pub async fn map_station(&self, request: MapStationRequest) -> AppResult<LoadingStation> {
        let (route_id, station_id) = match (
            lenient_id(request.route_id.as_deref()),
            lenient_id(request.station_id.as_deref()),
        ) {
            (Some(route_id), Some(station_id)) => (route_id, station_id),
            _ => {
                return Err(AppError::BadRequest(
                    "routeId and stationId are required".to_string(),
                ))
            }
        };

        let route = self
            .routes
            .find_by_id(route_id)
            .await?
            .ok_or_else(|| not_found_error("Route", &route_id.to_string()))?;
        self.stations
            .find_by_id(station_id)
            .await?
            .ok_or_else(|| not_found_error("Station", &station_id.to_string()))?;

        let mapping = self
            .repository
            .map_station(route_id, station_id, request.order)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest("This station is already mapped to that route".to_string())
            })?;

        info!("📍 Estación {} asignada a la ruta {}", mapping.station_name, route.name);
        Ok(mapping)
    }

    pub async fn unmap_station(&self, id: Uuid) -> AppResult<DeletedResponse> {
        if !self.repository.unmap_station(id).await? {
            return Err(AppError::NotFound("Mapping not found".to_string()));
        }
        Ok(DeletedResponse::new(id))
    }

    /// Estaciones de carga de una ruta, por orden
    pub async fn stations_for_route(&self, route_id: Uuid) -> AppResult<Vec<RouteStation>> {
        self.repository.stations_for_route(route_id).await
    }
}

/// Consumir el código dentro de la transacción, explicando el rechazo
async fn consume(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    trip_id: Uuid,
    code: &str,
) -> AppResult<()> {
    if loading_repository::consume_code(&mut **tx, trip_id, code).await?.is_some() {
        return Ok(());
    }

    let auth = loading_repository::find_auth(&mut **tx, trip_id)
        .await?
        .ok_or_else(|| AppError::Forbidden("No loading code issued for this trip".to_string()))?;
    check_code(&auth, code, Utc::now())?;

    // Válido según la fila, pero otra petición lo consumió antes
    warn!("⚠️ Código de carga del viaje {} consumido en paralelo", trip_id);
    Err(AppError::Forbidden("Loading code already used".to_string()))
}
