//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod dto;
pub mod error;
pub mod health;
pub mod schemas;
pub mod service_requests;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
