//! Builders wiring the driving ports onto the configured store.

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use tracing::warn;

use facilities_backend::domain::ports::{
    AccountRegistry, ActiveRequestRepository, RequestLedger, UserRepository,
};
use facilities_backend::domain::{AccountService, ActiveRequestService, ServiceRequestService};
use facilities_backend::inbound::http::state::HttpState;
use facilities_backend::outbound::credentials::Argon2CredentialHasher;
use facilities_backend::outbound::memory::InMemoryFacilityStore;
use facilities_backend::outbound::persistence::{
    DieselActiveRequestRepository, DieselFacilityStore, DieselUserRepository,
};

use super::ServerConfig;

fn assemble<S, U, A>(store: Arc<S>, users: Arc<U>, active: Arc<A>, deadline: Duration) -> HttpState
where
    S: RequestLedger + AccountRegistry + 'static,
    U: UserRepository + 'static,
    A: ActiveRequestRepository + 'static,
{
    HttpState::new(
        Arc::new(ServiceRequestService::new(store.clone(), users.clone()).with_deadline(deadline)),
        Arc::new(ActiveRequestService::new(active)),
        Arc::new(AccountService::new(
            store,
            users,
            Arc::new(Argon2CredentialHasher::new()),
        )),
    )
}

/// Build handler state over PostgreSQL when a pool is configured, otherwise
/// over a fresh in-process store.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => assemble(
            Arc::new(DieselFacilityStore::new(pool.clone())),
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselActiveRequestRepository::new(pool.clone())),
            config.request_timeout,
        ),
        None => {
            warn!("no database configured; serving from the in-process store");
            let store = Arc::new(InMemoryFacilityStore::new());
            assemble(store.clone(), store.clone(), store, config.request_timeout)
        }
    };
    web::Data::new(state)
}
