//! Controlador de viajes
//!
//! Asignación con control de capacidad, inicio (login) y cierre (logout) del
//! viaje. Cada operación que toca varias tablas corre en una transacción.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::{parse_enum_filter, DeletedResponse};
use crate::dto::trip_dto::{
    AddTripOrderRequest, AddTripOrderResponse, AssignTripRequest, AssignTripResponse,
    ResetSerialResponse, TripDetail, TripListQuery, TripLoginRequest, TripLoginResponse,
    TripLogoutRequest, TripLogoutResponse,
};
use crate::middleware::AuthenticatedUser;
use crate::models::order::OrderStatus;
use crate::models::trip::{Trip, TripStatus};
use crate::repositories::counter_repository::CounterRepository;
use crate::repositories::driver_repository::{self, DriverRepository};
use crate::repositories::route_repository::RouteRepository;
use crate::repositories::trip_repository::{self, LoginReadings, NewTrip, TripRepository};
use crate::repositories::{
    customer_repository, delivery_repository, fleet_repository, inventory_repository,
    invoice_repository, order_repository, vehicle_repository,
};
use crate::services::capacity::{ensure_fits, resolve_capacity};
use crate::services::invoice_builder::{invoice_for_delivery, InvoiceContext};
use crate::services::numbering::{self, TRIP_SERIAL_COUNTER, TRIP_SERIAL_START};
use crate::services::trip_lifecycle::{next_status, validate_logout_readings, TripEvent};
use crate::services::Metrics;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct TripController {
    pool: PgPool,
    repository: TripRepository,
    drivers: DriverRepository,
    routes: RouteRepository,
    counters: CounterRepository,
    metrics: Arc<Metrics>,
}

impl TripController {
    pub fn new(pool: PgPool, metrics: Arc<Metrics>) -> Self {
        Self {
            repository: TripRepository::new(pool.clone()),
            drivers: DriverRepository::new(pool.clone()),
            routes: RouteRepository::new(pool.clone()),
            counters: CounterRepository::new(pool.clone()),
            pool,
            metrics,
        }
    }

    /// Crear un viaje para una flota con su primer pedido
    pub async fn assign(
        &self,
        user: &AuthenticatedUser,
        request: AssignTripRequest,
    ) -> AppResult<AssignTripResponse> {
        request.validate()?;

        let mut tx = self.pool.begin().await?;

        let fleet = fleet_repository::lock_view(&mut *tx, request.fleet_id)
            .await?
            .ok_or_else(|| not_found_error("Fleet", &request.fleet_id.to_string()))?;
        user.ensure_depot(&fleet.fleet.depot_cd)?;
        let driver_id = fleet.fleet.driver_id.ok_or_else(|| {
            AppError::BadRequest(format!("Fleet {} has no driver assigned", fleet.vehicle_no))
        })?;

        let order = order_repository::lock(&mut *tx, request.order_id)
            .await?
            .ok_or_else(|| not_found_error("Order", &request.order_id.to_string()))?;
        if order.order_status != OrderStatus::Pending {
            return Err(AppError::Conflict(format!(
                "Order {} is {:?}, only PENDING orders can be assigned",
                order.order_no, order.order_status
            )));
        }

        let capacity = resolve_capacity(request.capacity, fleet.calibrated_capacity, fleet.capacity)
            .ok_or_else(|| {
                AppError::BadRequest(format!("No capacity known for vehicle {}", fleet.vehicle_no))
            })?;
        let qty = order.total_qty();
        ensure_fits(capacity, Decimal::ZERO, qty)?;

        let prefix = numbering::trip_prefix(request.trip_no.as_deref(), Utc::now().date_naive());
        // La serie se confirma aparte: un número repetido la deja avanzada
        let seq = self
            .counters
            .next_committed(TRIP_SERIAL_COUNTER, TRIP_SERIAL_START)
            .await?;
        let trip_no = numbering::compose_trip_no(&prefix, seq);

        let trip = trip_repository::insert(
            &mut *tx,
            NewTrip {
                trip_no,
                fleet_id: fleet.fleet.id,
                order_id: order.id,
                driver_id,
                vehicle_id: fleet.fleet.vehicle_id,
                vehicle_no: fleet.vehicle_no.clone(),
                depot_cd: fleet.fleet.depot_cd.clone(),
                gps: fleet.fleet.gps,
                capacity,
                planned_qty: qty,
                route_id: request.route_id,
                remarks: request.remarks,
            },
        )
        .await?;

        delivery_repository::insert_plan(
            &mut *tx,
            trip.id,
            order.id,
            order.customer_id,
            &order.ship_to_address,
            qty,
        )
        .await?;
        delivery_repository::insert_placeholder(
            &mut *tx,
            trip.id,
            order.id,
            order.customer_id,
            &order.ship_to_address,
            &order.primary_product(),
            order.primary_rate(),
        )
        .await?;
        order_repository::mark_assigned(&mut *tx, order.id, fleet.fleet.id).await?;

        tx.commit().await?;

        self.metrics.trips_assigned_total.inc();
        info!(
            "🚚 Viaje {} asignado: {} en {} ({} / {} L)",
            trip.trip_no, order.order_no, trip.vehicle_no, trip.planned_qty, trip.capacity
        );

        Ok(AssignTripResponse {
            message: "Trip assigned",
            trip_id: trip.id,
            trip_no: trip.trip_no,
            capacity: trip.capacity,
            planned_qty: trip.planned_qty,
            seeded_deliveries_count: 1,
        })
    }

    /// Añadir un pedido a un viaje abierto contra la capacidad restante
    pub async fn add_order(
        &self,
        user: &AuthenticatedUser,
        trip_id: Uuid,
        request: AddTripOrderRequest,
    ) -> AppResult<AddTripOrderResponse> {
        let mut tx = self.pool.begin().await?;

        let trip = trip_repository::lock(&mut *tx, trip_id)
            .await?
            .ok_or_else(|| not_found_error("Trip", &trip_id.to_string()))?;
        user.ensure_depot(&trip.depot_cd)?;
        if !trip.status.is_open() {
            return Err(AppError::Conflict(format!(
                "Trip {} is {}, orders can no longer be added",
                trip.trip_no,
                trip.status.as_str()
            )));
        }

        let order = order_repository::lock(&mut *tx, request.order_id)
            .await?
            .ok_or_else(|| not_found_error("Order", &request.order_id.to_string()))?;
        if order.order_status != OrderStatus::Pending {
            return Err(AppError::Conflict(format!(
                "Order {} is {:?}, only PENDING orders can be added",
                order.order_no, order.order_status
            )));
        }

        let qty = order.total_qty();
        ensure_fits(trip.capacity, trip.planned_qty, qty)?;
        let trip = trip_repository::add_planned(&mut *tx, trip.id, qty)
            .await?
            .ok_or_else(|| {
                AppError::Conflict(format!(
                    "Order quantity {} exceeds remaining capacity of trip {}",
                    qty.normalize(),
                    trip.trip_no
                ))
            })?;

        delivery_repository::insert_plan(
            &mut *tx,
            trip.id,
            order.id,
            order.customer_id,
            &order.ship_to_address,
            qty,
        )
        .await?;
        delivery_repository::insert_placeholder(
            &mut *tx,
            trip.id,
            order.id,
            order.customer_id,
            &order.ship_to_address,
            &order.primary_product(),
            order.primary_rate(),
        )
        .await?;
        order_repository::mark_assigned(&mut *tx, order.id, trip.fleet_id).await?;

        tx.commit().await?;

        info!("➕ Pedido {} añadido al viaje {}", order.order_no, trip.trip_no);
        let remaining_capacity = trip.remaining_capacity();
        Ok(AddTripOrderResponse {
            trip,
            remaining_capacity,
        })
    }

    /// ASSIGNED → ACTIVE
    pub async fn login(
        &self,
        user: &AuthenticatedUser,
        request: TripLoginRequest,
    ) -> AppResult<TripLoginResponse> {
        request.validate()?;
        let start_km = request
            .start_km
            .ok_or_else(|| AppError::BadRequest("startKm is required".to_string()))?;
        let totalizer_start = request
            .totalizer_start
            .ok_or_else(|| AppError::BadRequest("totalizerStart is required".to_string()))?;

        let mut tx = self.pool.begin().await?;

        let trip = match (request.trip_id, request.driver_id, request.vehicle_no.as_deref()) {
            (Some(id), _, _) => trip_repository::lock(&mut *tx, id)
                .await?
                .ok_or_else(|| not_found_error("Trip", &id.to_string()))?,
            (None, Some(driver_id), Some(vehicle_no)) => {
                trip_repository::find_assigned_for(&mut *tx, driver_id, vehicle_no)
                    .await?
                    .ok_or_else(|| {
                        AppError::Forbidden(format!(
                            "No assigned trip for this driver on vehicle {}",
                            vehicle_no.trim().to_uppercase()
                        ))
                    })?
            }
            _ => {
                return Err(AppError::BadRequest(
                    "tripId or driverId and vehicleNo are required".to_string(),
                ))
            }
        };
        user.ensure_driver(trip.driver_id)?;
        next_status(trip.status, TripEvent::Login)?;

        let diesel_opening = inventory_repository::find_in_tx(&mut *tx, &trip.vehicle_no)
            .await?
            .map(|inv| inv.balance_liters)
            .unwrap_or(Decimal::ZERO);

        let trip = trip_repository::start(
            &mut *tx,
            trip.id,
            LoginReadings {
                start_km,
                totalizer_start,
                diesel_opening,
                route_id: request.route_id,
                remarks: request.remarks,
            },
        )
        .await?
        .ok_or_else(|| AppError::Forbidden("Trip is no longer ASSIGNED".to_string()))?;
        driver_repository::set_current_trip(&mut *tx, trip.driver_id, Some(trip.id)).await?;

        tx.commit().await?;

        info!("▶️ Viaje {} iniciado (apertura {} L)", trip.trip_no, diesel_opening);
        Ok(TripLoginResponse {
            message: "Trip started",
            trip,
        })
    }

    /// ACTIVE → COMPLETED, con una factura por entrega
    pub async fn logout(
        &self,
        user: &AuthenticatedUser,
        request: TripLogoutRequest,
    ) -> AppResult<TripLogoutResponse> {
        let end_km = request
            .end_km
            .ok_or_else(|| AppError::BadRequest("endKm is required".to_string()))?;
        let totalizer_end = request
            .totalizer_end
            .ok_or_else(|| AppError::BadRequest("totalizerEnd is required".to_string()))?;

        let mut tx = self.pool.begin().await?;

        let trip = trip_repository::lock(&mut *tx, request.trip_id)
            .await?
            .ok_or_else(|| not_found_error("Trip", &request.trip_id.to_string()))?;
        user.ensure_driver(trip.driver_id)?;
        next_status(trip.status, TripEvent::Logout)?;
        validate_logout_readings(trip.start_km, end_km, trip.totalizer_start, totalizer_end)?;

        let deliveries = delivery_repository::list_for_trip_in_tx(&mut *tx, trip.id).await?;
        if deliveries.is_empty() {
            return Err(AppError::BadRequest(format!(
                "Trip {} has no deliveries to invoice",
                trip.trip_no
            )));
        }

        let trip = trip_repository::complete(&mut *tx, trip.id, end_km, totalizer_end)
            .await?
            .ok_or_else(|| AppError::BadRequest("Trip is no longer ACTIVE".to_string()))?;
        vehicle_repository::record_readings(&mut *tx, trip.vehicle_id, end_km, totalizer_end).await?;

        let driver_name = driver_repository::find_in_tx(&mut *tx, trip.driver_id)
            .await?
            .map(|d| d.driver_name);
        let ctx = InvoiceContext {
            trip: &trip,
            driver_name,
            notes: None,
        };

        let mut invoices = Vec::with_capacity(deliveries.len());
        for (index, delivery) in deliveries.iter().enumerate() {
            let customer = customer_repository::find_in_tx(&mut *tx, delivery.customer_id)
                .await?
                .ok_or_else(|| not_found_error("Customer", &delivery.customer_id.to_string()))?;
            let order = order_repository::find_in_tx(&mut *tx, delivery.order_id)
                .await?
                .ok_or_else(|| not_found_error("Order", &delivery.order_id.to_string()))?;

            let invoice = invoice_for_delivery(&ctx, delivery, index + 1, &customer, &order);
            invoices.push(invoice_repository::insert(&mut *tx, invoice).await?);
        }

        driver_repository::set_current_trip(&mut *tx, trip.driver_id, None).await?;
        let closed = order_repository::set_status_for_trip(&mut *tx, trip.id, OrderStatus::Completed).await?;

        tx.commit().await?;

        self.metrics.trips_completed_total.inc();
        self.metrics.invoices_generated_total.inc_by(invoices.len() as u64);
        info!(
            "🏁 Viaje {} cerrado: {} facturas, {} pedidos completados",
            trip.trip_no,
            invoices.len(),
            closed
        );

        Ok(TripLogoutResponse {
            message: "Trip completed",
            trip,
            invoices,
        })
    }

    pub async fn list(&self, user: &AuthenticatedUser, query: TripListQuery) -> AppResult<Vec<Trip>> {
        let status: Option<TripStatus> = parse_enum_filter(query.status.as_deref(), "status")?;
        // Un conductor ve sus viajes en cualquier depósito
        let (driver_id, depot) = match user.driver_scope() {
            Some(own) => (Some(own), None),
            None => (query.driver_id, user.depot_scope()),
        };
        self.repository.list(status, driver_id, depot).await
    }

    /// Último viaje del conductor en el estado pedido, o 404
    pub async fn latest_for_driver(
        &self,
        user: &AuthenticatedUser,
        driver_id: Uuid,
        status: TripStatus,
    ) -> AppResult<Trip> {
        user.ensure_driver(driver_id)?;
        self.repository
            .find_latest_for_driver(driver_id, status)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("No {} trip for driver {}", status.as_str(), driver_id))
            })
    }

    async fn visible_trip(&self, user: &AuthenticatedUser, id: Uuid) -> AppResult<Trip> {
        let trip = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Trip", &id.to_string()))?;
        user.ensure_trip_access(&trip.depot_cd, trip.driver_id)?;
        Ok(trip)
    }

    pub async fn get(&self, user: &AuthenticatedUser, id: Uuid) -> AppResult<TripDetail> {
        let trip = self.visible_trip(user, id).await?;

        let driver_name = self
            .drivers
            .find_by_id(trip.driver_id)
            .await?
            .map(|d| d.driver_name);
        let route_name = match trip.route_id {
            Some(route_id) => self.routes.find_by_id(route_id).await?.map(|r| r.name),
            None => None,
        };

        Ok(TripDetail {
            remaining_capacity: trip.remaining_capacity(),
            trip,
            driver_name,
            route_name,
        })
    }

    /// Solo se borran viajes que no han empezado; sus pedidos vuelven a PENDING
    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> AppResult<DeletedResponse> {
        let mut tx = self.pool.begin().await?;

        let trip = trip_repository::lock(&mut *tx, id)
            .await?
            .ok_or_else(|| not_found_error("Trip", &id.to_string()))?;
        user.ensure_depot(&trip.depot_cd)?;
        if trip.status != TripStatus::Assigned {
            return Err(AppError::Conflict(format!(
                "Trip {} is {}, only ASSIGNED trips can be deleted",
                trip.trip_no,
                trip.status.as_str()
            )));
        }

        let released = order_repository::release_for_trip(&mut *tx, trip.id).await?;
        trip_repository::delete(&mut *tx, trip.id).await?;

        tx.commit().await?;

        warn!("🗑️ Viaje {} eliminado, {} pedidos liberados", trip.trip_no, released);
        Ok(DeletedResponse::new(id))
    }

    pub async fn reset_serial(&self, user: &AuthenticatedUser) -> AppResult<ResetSerialResponse> {
        user.ensure_admin()?;
        self.counters.reset(TRIP_SERIAL_COUNTER, TRIP_SERIAL_START).await?;
        debug!("🔢 Serie de viajes reiniciada por {}", user.user_id);

        Ok(ResetSerialResponse {
            ok: true,
            next_will_be: numbering::trip_serial(TRIP_SERIAL_START),
        })
    }
}
