//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations translate between Diesel row structs and
//! domain types; no business rules live here. Connections come from a `bb8`
//! pool through `diesel-async`, and every database failure is mapped to the
//! owning port's error type.
//!
//! # Example
//!
//! ```ignore
//! use hotel_backend::outbound::persistence::{DbPool, DieselRoomRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/hotel")).await?;
//! let rooms = DieselRoomRepository::new(pool);
//! ```

mod diesel_booking_repository;
mod diesel_error_mapping;
mod diesel_room_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_booking_repository::{BOOKING_LOCK_NAMESPACE, DieselBookingRepository};
pub use diesel_room_repository::DieselRoomRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
