//! Services module
//!
//! Lógica de dominio sin acceso a base de datos: numeración, capacidad,
//! estados del viaje, códigos de carga, facturas y PDF, más las
//! integraciones de notificación y métricas.

pub mod capacity;
pub mod invoice_builder;
pub mod loading_auth;
pub mod metrics;
pub mod notifier;
pub mod numbering;
pub mod pdf;
pub mod trip_lifecycle;

pub use metrics::Metrics;
pub use notifier::{build_notifier, Notifier};
