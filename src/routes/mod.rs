//! Router de la aplicación
//!
//! Rutas públicas (`/health`, `/metrics`, login) y el resto de `/api/*`
//! detrás del middleware JWT.

pub mod auth_routes;
pub mod customer_routes;
pub mod delivery_routes;
pub mod fleet_routes;
pub mod invoice_routes;
pub mod loading_routes;
pub mod master_routes;
pub mod order_routes;
pub mod payment_routes;
pub mod staff_routes;
pub mod trip_routes;
pub mod vehicle_routes;

use axum::{
    extract::State,
    http::Uri,
    middleware::from_fn_with_state,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::{cors_layer, require_auth};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Construir el router completo con su estado
pub fn create_app(state: AppState) -> Router {
    let protected = Router::new()
        .nest("/api/auth", auth_routes::create_auth_router())
        .nest("/api/users", staff_routes::create_user_router())
        .nest("/api/employees", staff_routes::create_employee_router())
        .nest("/api/sales-associates", staff_routes::create_sales_associate_router())
        .nest("/api/depots", master_routes::create_depot_router())
        .nest("/api/routes", master_routes::create_route_router())
        .nest("/api/stations", master_routes::create_station_router())
        .nest("/api/customers", customer_routes::create_customer_router())
        .nest("/api/orders", order_routes::create_order_router())
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/api/drivers", vehicle_routes::create_driver_router())
        .nest("/api/fleets", fleet_routes::create_fleet_router())
        .nest("/api/trips", trip_routes::create_trip_router())
        .nest("/api/delivery-plans", delivery_routes::create_delivery_plan_router())
        .nest("/api/deliveries", delivery_routes::create_delivery_router())
        .nest("/api/loadings", loading_routes::create_loading_router())
        .nest("/api/bowser-inventory", loading_routes::create_inventory_router())
        .nest("/api/invoices", invoice_routes::create_invoice_router())
        .nest("/api/payments", payment_routes::create_payment_router())
        .nest("/api/payrecs", payment_routes::create_payrec_router())
        // Solo rutas existentes: una ruta desconocida sigue siendo 404
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/api/auth/login", post(auth_routes::login))
        .merge(protected)
        .fallback(no_route)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn metrics(State(state): State<AppState>) -> Result<String, AppError> {
    state.metrics.encode().map_err(AppError::Internal)
}

async fn no_route(uri: Uri) -> AppError {
    AppError::NotFound(format!("No API route for {}", uri.path()))
}
