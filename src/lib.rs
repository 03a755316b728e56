//! Backend de logística de combustible
//!
//! API REST para pedidos, flotas, viajes de cisternas, entregas, cargas,
//! inventario de cisternas, facturación y contabilidad.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app;
pub use state::AppState;
