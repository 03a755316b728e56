//! Controlador de entregas
//!
//! Registrar una entrega completa el marcador del pedido, descuenta el saldo
//! de la cisterna y avisa al cliente.

use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::delivery_dto::{RecordDeliveryRequest, RecordDeliveryResponse};
use crate::middleware::AuthenticatedUser;
use crate::models::delivery::{Delivery, DeliveryPlan, PendingDelivery};
use crate::models::inventory::tr_type;
use crate::models::trip::TripStatus;
use crate::repositories::delivery_repository::{self, DeliveryRecord, DeliveryRepository};
use crate::repositories::inventory_repository::{self, LedgerMovement};
use crate::repositories::trip_repository::{self, TripRepository};
use crate::repositories::{customer_repository, order_repository};
use crate::services::notifier::notify_best_effort;
use crate::services::numbering::dc_number;
use crate::services::{Metrics, Notifier};
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct DeliveryController {
    pool: PgPool,
    repository: DeliveryRepository,
    trips: TripRepository,
    notifier: Arc<dyn Notifier>,
    metrics: Arc<Metrics>,
}

impl DeliveryController {
    pub fn new(pool: PgPool, notifier: Arc<dyn Notifier>, metrics: Arc<Metrics>) -> Self {
        Self {
            repository: DeliveryRepository::new(pool.clone()),
            trips: TripRepository::new(pool.clone()),
            pool,
            notifier,
            metrics,
        }
    }

    async fn check_trip(&self, user: &AuthenticatedUser, trip_id: Uuid) -> AppResult<()> {
        let trip = self
            .trips
            .find_by_id(trip_id)
            .await?
            .ok_or_else(|| not_found_error("Trip", &trip_id.to_string()))?;
        user.ensure_trip_access(&trip.depot_cd, trip.driver_id)
    }

    pub async fn plans(&self, user: &AuthenticatedUser, trip_id: Uuid) -> AppResult<Vec<DeliveryPlan>> {
        self.check_trip(user, trip_id).await?;
        self.repository.plans_for_trip(trip_id).await
    }

    pub async fn pending(&self, user: &AuthenticatedUser, trip_id: Uuid) -> AppResult<Vec<PendingDelivery>> {
        self.check_trip(user, trip_id).await?;
        self.repository.pending_for_trip(trip_id).await
    }

    pub async fn completed(&self, user: &AuthenticatedUser, trip_id: Uuid) -> AppResult<Vec<Delivery>> {
        self.check_trip(user, trip_id).await?;
        self.repository.completed_for_trip(trip_id).await
    }

    pub async fn record(
        &self,
        user: &AuthenticatedUser,
        request: RecordDeliveryRequest,
    ) -> AppResult<RecordDeliveryResponse> {
        request.validate()?;

        let mut tx = self.pool.begin().await?;

        let trip = trip_repository::lock(&mut *tx, request.trip_id)
            .await?
            .ok_or_else(|| not_found_error("Trip", &request.trip_id.to_string()))?;
        user.ensure_driver(trip.driver_id)?;
        if trip.status != TripStatus::Active {
            return Err(AppError::BadRequest(format!(
                "Trip {} is {}, deliveries need an ACTIVE trip",
                trip.trip_no,
                trip.status.as_str()
            )));
        }

        let plan = delivery_repository::find_plan(&mut *tx, trip.id, request.order_id)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest(format!("Order is not planned on trip {}", trip.trip_no))
            })?;
        if plan.customer_id != request.customer_id {
            return Err(AppError::BadRequest(
                "Order does not belong to this customer".to_string(),
            ));
        }
        let order = order_repository::find_in_tx(&mut *tx, plan.order_id)
            .await?
            .ok_or_else(|| not_found_error("Order", &plan.order_id.to_string()))?;
        let customer = customer_repository::find_in_tx(&mut *tx, plan.customer_id)
            .await?
            .ok_or_else(|| not_found_error("Customer", &plan.customer_id.to_string()))?;

        let now = Utc::now();
        let dc_no = dc_number(now.timestamp_millis());
        let ship_to = request
            .ship_to
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| plan.ship_to.clone());

        let delivery = delivery_repository::record(
            &mut *tx,
            DeliveryRecord {
                trip_id: trip.id,
                order_id: order.id,
                customer_id: customer.id,
                ship_to,
                product_name: request
                    .product_name
                    .filter(|p| !p.trim().is_empty())
                    .unwrap_or_else(|| order.primary_product()),
                qty: request.qty,
                rate: request.rate.unwrap_or_else(|| order.primary_rate()),
                dc_no: dc_no.clone(),
                delivered_at: now,
            },
        )
        .await?;

        let inventory = inventory_repository::try_decrement(&mut *tx, &trip.vehicle_no, request.qty)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Insufficient stock in bowser {} for {} L",
                    trip.vehicle_no, request.qty
                ))
            })?;
        inventory_repository::append_ledger(
            &mut *tx,
            LedgerMovement {
                vehicle_no: &trip.vehicle_no,
                depot_cd: &inventory.depot_cd,
                tr_type: tr_type::DELIVERY,
                tr_ref: Some(dc_no.clone()),
                op_bal: inventory.balance_liters + request.qty,
                tr_qty: request.qty,
                cl_stock: inventory.balance_liters,
            },
        )
        .await?;

        tx.commit().await?;

        self.metrics.deliveries_recorded_total.inc();
        info!(
            "⛽ Entrega {} de {} L a {} (viaje {})",
            dc_no, delivery.qty, customer.cust_cd, trip.trip_no
        );

        let message = format!(
            "Dear {}, {} L of {} delivered against order {}. DC No: {}",
            customer.cust_name, delivery.qty, delivery.product_name, order.order_no, dc_no
        );
        notify_best_effort(self.notifier.as_ref(), customer.mobile_no.as_deref(), &message).await;

        Ok(RecordDeliveryResponse {
            message: "Delivery recorded",
            dc_no,
            delivery_id: delivery.id,
            balance_liters: inventory.balance_liters,
        })
    }
}
