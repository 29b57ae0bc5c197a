//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use crate::domain::ports::{
    CredentialHasher, CredentialHasherError, MockAccountCommand, MockActiveRequestQuery,
    MockServiceRequestCommand,
};
use crate::domain::{AccountService, ActiveRequestService, PasswordDigest, ServiceRequestService};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryFacilityStore;

/// Reversible hasher so HTTP tests avoid Argon2's cost.
#[derive(Debug, Default)]
pub struct PlainHasher;

impl CredentialHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<PasswordDigest, CredentialHasherError> {
        Ok(PasswordDigest::new(format!("plain${password}")))
    }

    fn verify(
        &self,
        password: &str,
        digest: &PasswordDigest,
    ) -> Result<bool, CredentialHasherError> {
        digest
            .as_str()
            .strip_prefix("plain$")
            .map(|stored| stored == password)
            .ok_or_else(|| CredentialHasherError::malformed_digest("missing plain$ prefix"))
    }
}

/// Wire every port to one fresh in-memory store.
pub fn memory_state() -> HttpState {
    let store = Arc::new(InMemoryFacilityStore::new());
    HttpState::new(
        Arc::new(ServiceRequestService::new(store.clone(), store.clone())),
        Arc::new(ActiveRequestService::new(store.clone())),
        Arc::new(AccountService::new(
            store.clone(),
            store,
            Arc::new(PlainHasher),
        )),
    )
}

/// Wrap mocks as handler state; unexpected calls fail the test.
pub fn mock_state(
    service_requests: MockServiceRequestCommand,
    active_requests: MockActiveRequestQuery,
    accounts: MockAccountCommand,
) -> HttpState {
    HttpState::new(
        Arc::new(service_requests),
        Arc::new(active_requests),
        Arc::new(accounts),
    )
}
