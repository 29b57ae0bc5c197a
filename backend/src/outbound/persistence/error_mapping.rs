//! Shared Diesel error classification for the facility adapters.
//!
//! Diesel and pool failures are first classified into a [`StoreFault`];
//! each port error type then converts from the fault.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{
    AccountRegistryError, ActiveRequestRepositoryError, FacilityStoreError, RequestLedgerError,
    UserRepositoryError,
};

use super::models::RowConversionError;
use super::pool::PoolError;

/// Partial unique index guarding one active request per room and type.
pub(crate) const ACTIVE_REQUEST_INDEX: &str = "unique_active_request_per_room_type";
/// Unique constraint on `users.email`.
pub(crate) const USERS_EMAIL_KEY: &str = "users_email_key";

/// Storage failure reduced to what callers act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreFault {
    Connection(String),
    UniqueViolation { constraint: Option<String> },
    Query(String),
}

impl StoreFault {
    fn violates(&self, name: &str) -> bool {
        matches!(self, Self::UniqueViolation { constraint: Some(found) } if found == name)
    }
}

impl From<PoolError> for StoreFault {
    fn from(error: PoolError) -> Self {
        match error {
            PoolError::Checkout { message } | PoolError::Build { message } => {
                Self::Connection(message)
            }
        }
    }
}

impl From<RowConversionError> for StoreFault {
    fn from(error: RowConversionError) -> Self {
        Self::Query(error.to_string())
    }
}

impl From<DieselError> for StoreFault {
    fn from(error: DieselError) -> Self {
        match &error {
            DieselError::DatabaseError(kind, info) => {
                debug!(
                    ?kind,
                    message = info.message(),
                    constraint = ?info.constraint_name(),
                    "diesel operation failed"
                );
            }
            _ => debug!(
                error_type = %std::any::type_name_of_val(&error),
                "diesel operation failed"
            ),
        }

        match error {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::UniqueViolation {
                    constraint: info.constraint_name().map(str::to_owned),
                }
            }
            DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
                Self::Connection(info.message().to_owned())
            }
            DieselError::DatabaseError(_, info) => Self::Query(info.message().to_owned()),
            DieselError::NotFound => Self::Query("record not found".to_owned()),
            other => Self::Query(other.to_string()),
        }
    }
}

impl From<StoreFault> for FacilityStoreError {
    fn from(fault: StoreFault) -> Self {
        if fault.violates(ACTIVE_REQUEST_INDEX) {
            return Self::active_request_conflict();
        }
        if fault.violates(USERS_EMAIL_KEY) {
            return Self::email_taken();
        }
        match fault {
            StoreFault::Connection(message) => Self::connection(message),
            StoreFault::Query(message) => Self::query(message),
            StoreFault::UniqueViolation { constraint } => Self::query(format!(
                "unique violation on {}",
                constraint.as_deref().unwrap_or("unknown constraint")
            )),
        }
    }
}

impl From<StoreFault> for RequestLedgerError {
    fn from(fault: StoreFault) -> Self {
        FacilityStoreError::from(fault).into()
    }
}

impl From<StoreFault> for ActiveRequestRepositoryError {
    fn from(fault: StoreFault) -> Self {
        match fault {
            StoreFault::Connection(message) => Self::connection(message),
            StoreFault::Query(message) => Self::query(message),
            StoreFault::UniqueViolation { .. } => Self::query("unexpected unique violation"),
        }
    }
}

impl From<StoreFault> for UserRepositoryError {
    fn from(fault: StoreFault) -> Self {
        match fault {
            StoreFault::Connection(message) => Self::connection(message),
            StoreFault::Query(message) => Self::query(message),
            StoreFault::UniqueViolation { .. } => Self::query("unexpected unique violation"),
        }
    }
}

/// Registration faults outside the unit of work; in-transaction failures
/// are mapped by the domain with the email in hand.
impl From<StoreFault> for AccountRegistryError {
    fn from(fault: StoreFault) -> Self {
        match FacilityStoreError::from(fault) {
            FacilityStoreError::Connection { message } => Self::connection(message),
            other => Self::query(other.to_string()),
        }
    }
}
