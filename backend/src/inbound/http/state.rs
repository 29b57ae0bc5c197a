//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountCommand, ActiveRequestQuery, ServiceRequestCommand};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub service_requests: Arc<dyn ServiceRequestCommand>,
    pub active_requests: Arc<dyn ActiveRequestQuery>,
    pub accounts: Arc<dyn AccountCommand>,
}

impl HttpState {
    /// Bundle the driving ports used by the handlers.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use facilities_backend::domain::{
    ///     AccountService, ActiveRequestService, ServiceRequestService,
    /// };
    /// use facilities_backend::inbound::http::state::HttpState;
    /// use facilities_backend::outbound::credentials::Argon2CredentialHasher;
    /// use facilities_backend::outbound::memory::InMemoryFacilityStore;
    ///
    /// let store = Arc::new(InMemoryFacilityStore::new());
    /// let state = HttpState::new(
    ///     Arc::new(ServiceRequestService::new(store.clone(), store.clone())),
    ///     Arc::new(ActiveRequestService::new(store.clone())),
    ///     Arc::new(AccountService::new(
    ///         store.clone(),
    ///         store,
    ///         Arc::new(Argon2CredentialHasher::new()),
    ///     )),
    /// );
    /// let _accounts = state.accounts.clone();
    /// ```
    pub fn new(
        service_requests: Arc<dyn ServiceRequestCommand>,
        active_requests: Arc<dyn ActiveRequestQuery>,
        accounts: Arc<dyn AccountCommand>,
    ) -> Self {
        Self {
            service_requests,
            active_requests,
            accounts,
        }
    }
}
