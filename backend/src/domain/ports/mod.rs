//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`) are called by inbound adapters.
//! Driven ports (repositories, the ledger, the registry and the credential
//! hasher) are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod account_registry;
mod active_request_query;
mod active_request_repository;
mod credential_hasher;
mod facility_transaction;
mod request_ledger;
mod service_request_command;
mod user_repository;

pub use account_command::{AccountCommand, SignInRequest, SignUpRequest};
#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_registry::{AccountRegistration, AccountRegistry, AccountRegistryError};
#[cfg(test)]
pub use account_registry::MockAccountRegistry;
pub use active_request_query::{ActiveRequestQuery, FindActiveRequest};
#[cfg(test)]
pub use active_request_query::MockActiveRequestQuery;
pub use active_request_repository::{ActiveRequestRepository, ActiveRequestRepositoryError};
#[cfg(test)]
pub use active_request_repository::MockActiveRequestRepository;
pub use credential_hasher::{CredentialHasher, CredentialHasherError};
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use facility_transaction::{FacilityStoreError, FacilityTransaction, RequestInsert, UserInsert};
pub use request_ledger::{RequestLedger, RequestLedgerError};
#[cfg(test)]
pub use request_ledger::MockRequestLedger;
pub use service_request_command::{CreateServiceRequest, ServiceRequestCommand};
#[cfg(test)]
pub use service_request_command::MockServiceRequestCommand;
pub use user_repository::{UserRepository, UserRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
