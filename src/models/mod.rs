//! Modelos del sistema
//!
//! Filas de PostgreSQL (`sqlx::FromRow`) y enums mapeados a los tipos ENUM
//! del esquema.

pub mod customer;
pub mod delivery;
pub mod driver;
pub mod employee;
pub mod fleet;
pub mod inventory;
pub mod invoice;
pub mod loading;
pub mod master;
pub mod order;
pub mod payment;
pub mod payrec;
pub mod trip;
pub mod user;
pub mod vehicle;
