//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of the facility ports
//! backed by PostgreSQL via Diesel with async support through `diesel-async`
//! and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories translate between Diesel rows and
//!   domain types. Room resolution, membership and the active-request rule
//!   live in the domain and run inside [`DieselFacilityTransaction`].
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Constraint-aware errors**: unique violations are recognised by
//!   constraint name and surface as typed port errors.
//!
//! # Example
//!
//! ```rust,no_run
//! use facilities_backend::outbound::persistence::{DbPool, DieselFacilityStore, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/facilities")).await?;
//! let store = DieselFacilityStore::new(pool);
//! # let _ = store;
//! # Ok(())
//! # }
//! ```

mod diesel_active_request_repository;
mod diesel_facility_store;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_active_request_repository::DieselActiveRequestRepository;
pub use diesel_facility_store::{DieselFacilityStore, DieselFacilityTransaction};
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
