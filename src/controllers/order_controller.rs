//! Controlador de pedidos
//!
//! El alta valida las líneas, fecha y franja, y compone el número de pedido
//! dentro de la misma transacción que lo inserta.

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::dto::common::{parse_date_filter, DeletedResponse};
use crate::dto::order_dto::{
    validate_items, CreateOrderRequest, CustomerOption, OrderListItem, OrderListQuery,
    UpdateOrderRequest, UpdateOrderStatusRequest,
};
use crate::middleware::AuthenticatedUser;
use crate::models::order::{Order, OrderStatus};
use crate::repositories::order_repository::{self, NewOrder, OrderFilter, OrderRepository};
use crate::repositories::{counter_repository, customer_repository, customer_repository::CustomerRepository};
use crate::services::numbering;
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::validation::{validate_date, validate_time_slot};

pub struct OrderController {
    pool: PgPool,
    repository: OrderRepository,
    customers: CustomerRepository,
}

fn parse_date(field: &str, value: &str) -> AppResult<NaiveDate> {
    validate_date(value)
        .map_err(|_| AppError::BadRequest(format!("{} must be an ISO date (YYYY-MM-DD)", field)))
}

fn check_time_slot(value: &str) -> AppResult<String> {
    let slot = value.trim();
    validate_time_slot(slot).map_err(|_| {
        AppError::BadRequest(
            "deliveryTimeSlot must be 'HH:MM - HH:MM' with start before end".to_string(),
        )
    })?;
    Ok(slot.to_string())
}

impl OrderController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: OrderRepository::new(pool.clone()),
            customers: CustomerRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn create(&self, user: &AuthenticatedUser, request: CreateOrderRequest) -> AppResult<Order> {
        let customer_id = request
            .customer_id
            .ok_or_else(|| AppError::BadRequest("customerId is required".to_string()))?;
        let ship_to_address = request.ship_to_address.trim().to_string();
        if ship_to_address.is_empty() {
            return Err(AppError::BadRequest("shipToAddress is required".to_string()));
        }
        validate_items(&request.items)?;
        let delivery_date = parse_date("deliveryDate", &request.delivery_date)?;
        let delivery_time_slot = check_time_slot(&request.delivery_time_slot)?;

        let mut tx = self.pool.begin().await?;

        let customer = customer_repository::find_in_tx(&mut *tx, customer_id)
            .await?
            .ok_or_else(|| not_found_error("Customer", &customer_id.to_string()))?;
        user.ensure_depot(&customer.depot_cd)?;
        if !customer.is_active() {
            return Err(AppError::BadRequest(format!(
                "Customer {} is not Active",
                customer.cust_cd
            )));
        }

        let state_cd = numbering::state_code_for(&customer, &ship_to_address);
        let prefix = numbering::order_prefix(
            &state_cd,
            &numbering::depot_suffix(&customer.depot_cd),
            delivery_date,
        );
        let seq = counter_repository::next_value(
            &mut *tx,
            &numbering::order_counter_key(&prefix),
            numbering::ORDER_SEQ_START,
        )
        .await?;
        let order_no = numbering::compose_order_no(&prefix, seq)?;

        let order = order_repository::insert(
            &mut *tx,
            NewOrder {
                order_no,
                emp_cd: user.emp_code().to_string(),
                customer_id,
                ship_to_address,
                items: request.items,
                delivery_date,
                delivery_time_slot,
            },
        )
        .await?;

        tx.commit().await?;

        info!("📦 Pedido {} creado para {}", order.order_no, customer.cust_cd);
        Ok(order)
    }

    pub async fn list(&self, user: &AuthenticatedUser, query: OrderListQuery) -> AppResult<Vec<OrderListItem>> {
        let status = match query.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(raw.parse::<OrderStatus>().map_err(AppError::BadRequest)?),
            None => None,
        };
        let filter = OrderFilter {
            status,
            customer_id: query.customer_id,
            from: parse_date_filter(query.from.as_deref(), "from")?,
            to: parse_date_filter(query.to.as_deref(), "to")?,
        };

        let rows = self.repository.list(&filter, user.depot_scope()).await?;
        debug!("📋 {} pedidos listados", rows.len());
        Ok(rows.into_iter().map(OrderListItem::from).collect())
    }

    /// Clientes asignados al usuario, para el formulario de pedidos
    pub async fn customer_options(&self, user: &AuthenticatedUser) -> AppResult<Vec<CustomerOption>> {
        let emp_cd = if user.is_admin { None } else { user.emp_cd.as_deref() };
        let customers = self.customers.list_mapped(emp_cd, user.depot_scope()).await?;

        Ok(customers
            .into_iter()
            .map(|c| CustomerOption {
                selectable: c.is_active(),
                ship_to_addresses: c.ship_to_addresses(),
                id: c.id,
                cust_cd: c.cust_cd,
                cust_name: c.cust_name,
                depot_cd: c.depot_cd,
                status: c.status,
                outstanding_amount: c.outstanding_amount,
            })
            .collect())
    }

    pub async fn get(&self, user: &AuthenticatedUser, id: Uuid) -> AppResult<OrderListItem> {
        let row = self
            .repository
            .find_row(id)
            .await?
            .ok_or_else(|| not_found_error("Order", &id.to_string()))?;
        user.ensure_depot(&row.depot_cd)?;
        Ok(OrderListItem::from(row))
    }

    /// Solo los pedidos PENDING son editables
    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: UpdateOrderRequest,
    ) -> AppResult<Order> {
        let current = self.get(user, id).await?.row.order;
        if current.order_status != OrderStatus::Pending {
            return Err(AppError::Conflict(format!(
                "Order {} is no longer PENDING",
                current.order_no
            )));
        }

        let ship_to_address = match request.ship_to_address {
            Some(s) if s.trim().is_empty() => {
                return Err(AppError::BadRequest("shipToAddress cannot be empty".to_string()))
            }
            Some(s) => s.trim().to_string(),
            None => current.ship_to_address.clone(),
        };
        let items = match request.items {
            Some(items) => {
                validate_items(&items)?;
                items
            }
            None => current.items.0.clone(),
        };
        let delivery_date = match request.delivery_date.as_deref() {
            Some(d) => parse_date("deliveryDate", d)?,
            None => current.delivery_date,
        };
        let delivery_time_slot = match request.delivery_time_slot.as_deref() {
            Some(s) => check_time_slot(s)?,
            None => current.delivery_time_slot.clone(),
        };

        self.repository
            .update_pending(id, ship_to_address, items, delivery_date, delivery_time_slot)
            .await?
            .ok_or_else(|| AppError::Conflict(format!("Order {} is no longer PENDING", current.order_no)))
    }

    pub async fn update_status(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: UpdateOrderStatusRequest,
    ) -> AppResult<Order> {
        let status = request
            .order_status
            .parse::<OrderStatus>()
            .map_err(AppError::BadRequest)?;
        let current = self.get(user, id).await?.row.order;
        if let Some(trip_no) = self.repository.open_trip_no(id).await? {
            return Err(AppError::Conflict(format!(
                "Order {} is planned on trip {}; its status follows the trip",
                current.order_no, trip_no
            )));
        }

        let order = self
            .repository
            .update_status(id, status)
            .await?
            .ok_or_else(|| {
                AppError::Conflict(format!(
                    "Order {} was planned on a trip concurrently",
                    current.order_no
                ))
            })?;
        info!("🔄 Pedido {} → {:?}", order.order_no, order.order_status);
        Ok(order)
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> AppResult<DeletedResponse> {
        let current = self.get(user, id).await?.row.order;
        if !self.repository.delete_pending(id).await? {
            return Err(AppError::Conflict(format!(
                "Order {} can only be deleted while PENDING",
                current.order_no
            )));
        }
        Ok(DeletedResponse::new(id))
    }
}
