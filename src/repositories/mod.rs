//! Acceso a datos
//!
//! Un módulo por agregado. Las funciones libres reciben `&mut PgConnection`
//! para participar en transacciones; los `*Repository` trabajan sobre el pool.

pub mod counter_repository;
pub mod customer_repository;
pub mod delivery_repository;
pub mod depot_repository;
pub mod driver_repository;
pub mod employee_repository;
pub mod fleet_repository;
pub mod inventory_repository;
pub mod invoice_repository;
pub mod loading_repository;
pub mod order_repository;
pub mod payment_repository;
pub mod payrec_repository;
pub mod route_repository;
pub mod sales_associate_repository;
pub mod station_repository;
pub mod trip_repository;
pub mod user_repository;
pub mod vehicle_repository;
