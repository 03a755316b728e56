//! Controlador de facturas
//!
//! Listado y consulta, PDF, borrador agregado de un viaje y su emisión.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::config::environment::EnvironmentConfig;
use crate::dto::common::{parse_date_filter, Page, Paginated, DEFAULT_PAGE_SIZE};
use crate::dto::invoice_dto::{FromTripRequest, InvoiceListQuery, InvoicePrefill};
use crate::middleware::AuthenticatedUser;
use crate::models::invoice::{Invoice, NewInvoice};
use crate::models::order::OrderStatus;
use crate::models::trip::Trip;
use crate::repositories::delivery_repository::{self, DeliveryRepository};
use crate::repositories::invoice_repository::{self, InvoiceFilter, InvoiceRepository};
use crate::repositories::trip_repository::{self, TripRepository};
use crate::repositories::{customer_repository, driver_repository, order_repository};
use crate::services::invoice_builder::{amount_in_words, invoice_for_trip, InvoiceContext};
use crate::services::pdf::{render_invoice, PdfBranding};
use crate::services::Metrics;
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// PDF listo para enviar con su nombre de fichero
pub struct InvoicePdf {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub struct InvoiceController {
    pool: PgPool,
    repository: InvoiceRepository,
    trips: TripRepository,
    deliveries: DeliveryRepository,
    config: Arc<EnvironmentConfig>,
    metrics: Arc<Metrics>,
}

impl InvoiceController {
    pub fn new(pool: PgPool, config: Arc<EnvironmentConfig>, metrics: Arc<Metrics>) -> Self {
        Self {
            repository: InvoiceRepository::new(pool.clone()),
            trips: TripRepository::new(pool.clone()),
            deliveries: DeliveryRepository::new(pool.clone()),
            pool,
            config,
            metrics,
        }
    }

    /// Depósito y conductor que acotan las facturas visibles
    fn scope(user: &AuthenticatedUser) -> (Option<&str>, Option<Uuid>) {
        match user.driver_scope() {
            Some(driver) => (None, Some(driver)),
            None => (user.depot_scope(), None),
        }
    }

    pub async fn list(
        &self,
        user: &AuthenticatedUser,
        query: InvoiceListQuery,
    ) -> AppResult<Paginated<Invoice>> {
        let page = Page::resolve(query.page, query.limit, DEFAULT_PAGE_SIZE);
        let (depot, driver) = Self::scope(user);
        let filter = InvoiceFilter {
            q: query.q.map(|q| q.trim().to_string()).filter(|q| !q.is_empty()),
            from: parse_date_filter(query.from.as_deref(), "from")?,
            to: parse_date_filter(query.to.as_deref(), "to")?,
            depot: depot.map(str::to_string),
            driver,
            limit: page.limit,
            offset: page.offset(),
        };

        let (invoices, total) = self.repository.list(&filter).await?;
        Ok(Paginated::new(invoices, page, total))
    }

    pub async fn get(&self, user: &AuthenticatedUser, id: Uuid) -> AppResult<Invoice> {
        let (depot, driver) = Self::scope(user);
        self.repository
            .find_visible(id, depot, driver)
            .await?
            .ok_or_else(|| not_found_error("Invoice", &id.to_string()))
    }

    fn render(&self, invoice: &Invoice) -> AppResult<InvoicePdf> {
        let branding = PdfBranding {
            company: &self.config.company,
            bank: &self.config.bank,
            note: &self.config.invoice_note,
        };
        let bytes = render_invoice(invoice, &branding)?;
        Ok(InvoicePdf {
            file_name: format!("{}.pdf", invoice.invoice_no),
            bytes,
        })
    }

    pub async fn pdf(&self, user: &AuthenticatedUser, id: Uuid) -> AppResult<InvoicePdf> {
        let invoice = self.get(user, id).await?;
        self.render(&invoice)
    }

    /// PDF de la primera factura del viaje
    pub async fn trip_pdf(&self, user: &AuthenticatedUser, trip_id: Uuid) -> AppResult<InvoicePdf> {
        self.visible_trip(user, trip_id).await?;
        let invoice = self
            .repository
            .first_for_trip(trip_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No invoice for trip {}", trip_id)))?;
        self.render(&invoice)
    }

    async fn visible_trip(&self, user: &AuthenticatedUser, trip_id: Uuid) -> AppResult<Trip> {
        let trip = self
            .trips
            .find_by_id(trip_id)
            .await?
            .ok_or_else(|| not_found_error("Trip", &trip_id.to_string()))?;
        user.ensure_trip_access(&trip.depot_cd, trip.driver_id)?;
        Ok(trip)
    }

    /// Borrador de la factura agregada, sin persistir
    pub async fn prefill(&self, user: &AuthenticatedUser, trip_id: Uuid) -> AppResult<InvoicePrefill> {
        let trip = self.visible_trip(user, trip_id).await?;
        let deliveries = self.deliveries.list_for_trip(trip.id).await?;

        let mut conn = self.pool.acquire().await?;
        let invoice = build_trip_invoice(&mut *conn, &trip, &deliveries, None).await?;

        Ok(InvoicePrefill {
            amount_in_words: amount_in_words(invoice.total_amount),
            invoice,
        })
    }

    /// Emitir la factura agregada y completar los pedidos del viaje
    pub async fn from_trip(
        &self,
        user: &AuthenticatedUser,
        trip_id: Uuid,
        request: FromTripRequest,
    ) -> AppResult<Invoice> {
        let mut tx = self.pool.begin().await?;

        let trip = trip_repository::lock(&mut *tx, trip_id)
            .await?
            .ok_or_else(|| not_found_error("Trip", &trip_id.to_string()))?;
        user.ensure_depot(&trip.depot_cd)?;

        let deliveries = delivery_repository::list_for_trip_in_tx(&mut *tx, trip.id).await?;
        let new_invoice = build_trip_invoice(&mut *tx, &trip, &deliveries, request.notes).await?;
        let invoice = invoice_repository::insert(&mut *tx, new_invoice).await?;
        order_repository::set_status_for_trip(&mut *tx, trip.id, OrderStatus::Completed).await?;

        tx.commit().await?;

        self.metrics.invoices_generated_total.inc();
        info!("🧾 Factura {} emitida para el viaje {}", invoice.invoice_no, trip.trip_no);
        Ok(invoice)
    }
}

/// Factura agregada a nombre del cliente del pedido principal
async fn build_trip_invoice(
    conn: &mut sqlx::PgConnection,
    trip: &Trip,
    deliveries: &[crate::models::delivery::Delivery],
    notes: Option<String>,
) -> AppResult<NewInvoice> {
    let order = order_repository::find_in_tx(&mut *conn, trip.order_id)
        .await?
        .ok_or_else(|| not_found_error("Order", &trip.order_id.to_string()))?;
    let customer = customer_repository::find_in_tx(&mut *conn, order.customer_id)
        .await?
        .ok_or_else(|| not_found_error("Customer", &order.customer_id.to_string()))?;
    let driver_name = driver_repository::find_in_tx(&mut *conn, trip.driver_id)
        .await?
        .map(|d| d.driver_name);

    let ctx = InvoiceContext {
        trip,
        driver_name,
        notes,
    };
    invoice_for_trip(&ctx, deliveries, &customer, &order)
}
