//! Request middleware.
//!
//! Lifecycle concerns that apply to every route, such as request tracing.

pub mod trace;

pub use trace::Trace;
