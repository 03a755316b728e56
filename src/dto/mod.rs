//! Payloads de entrada y salida de la API
//!
//! Todos los cuerpos JSON usan camelCase.

pub mod auth_dto;
pub mod common;
pub mod customer_dto;
pub mod delivery_dto;
pub mod driver_dto;
pub mod employee_dto;
pub mod fleet_dto;
pub mod inventory_dto;
pub mod invoice_dto;
pub mod loading_dto;
pub mod master_dto;
pub mod order_dto;
pub mod payment_dto;
pub mod payrec_dto;
pub mod trip_dto;
pub mod user_dto;
pub mod vehicle_dto;
