//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed store using Diesel ORM
//! - **memory**: in-process store used when no database is configured
//! - **credentials**: Argon2id password digests
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. Unit-of-work logic stays in the domain.

pub mod credentials;
pub mod memory;
pub mod persistence;
