//! Controladores de la API
//!
//! Reglas de negocio por recurso; las rutas solo extraen y delegan.

pub mod auth_controller;
pub mod customer_controller;
pub mod delivery_controller;
pub mod depot_controller;
pub mod driver_controller;
pub mod employee_controller;
pub mod fleet_controller;
pub mod inventory_controller;
pub mod invoice_controller;
pub mod loading_controller;
pub mod order_controller;
pub mod payment_controller;
pub mod payrec_controller;
pub mod route_controller;
pub mod sales_associate_controller;
pub mod station_controller;
pub mod trip_controller;
pub mod user_controller;
pub mod vehicle_controller;
