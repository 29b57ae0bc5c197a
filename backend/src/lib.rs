//! Facility service-request backend.
//!
//! Residents raise cleaning and maintenance requests against rooms. The
//! crate follows a hexagonal layout: [`domain`] holds entities, ports and
//! use-cases, [`inbound`] adapts HTTP onto the driving ports and
//! [`outbound`] implements the driven ports over PostgreSQL, an in-process
//! store and Argon2.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
