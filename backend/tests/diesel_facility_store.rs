//! Integration tests for the Diesel facility adapters against embedded
//! PostgreSQL.
//!
//! Each test provisions a fresh database on the shared cluster, applies the
//! crate's embedded migrations and drives the adapters through their ports.
//! Tests stay synchronous and own a Tokio runtime so the cluster guard is
//! dropped outside any async context.

use std::sync::Arc;

use facilities_backend::domain::ports::{
    AccountRegistration, AccountRegistry, AccountRegistryError, ActiveRequestRepository,
    RequestLedger, RequestLedgerError, UserInsert, UserRepository,
};
use facilities_backend::domain::{
    Block, EmailAddress, NewServiceRequest, PasswordDigest, RequestDescription, RequestStatus,
    RequestType, RoomHint, RoomId, RoomNumber, RoomReference, User, UserId,
};
use facilities_backend::outbound::persistence::{
    DbPool, DieselActiveRequestRepository, DieselFacilityStore, DieselUserRepository, PoolConfig,
    run_pending_migrations,
};
use pg_embedded_setup_unpriv::TestCluster;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

mod support;

use support::embedded_postgres::connect;
use support::pg_embed::test_cluster;
use support::{handle_cluster_setup_failure, provision_database};

/// Fields drop in order: adapters release the pool before the runtime stops
/// and the cluster shuts down last.
struct TestContext {
    pool: DbPool,
    store: DieselFacilityStore,
    users: DieselUserRepository,
    active: DieselActiveRequestRepository,
    runtime: Runtime,
    database_url: String,
    _cluster: TestCluster,
}

fn setup() -> Result<TestContext, String> {
    let cluster = test_cluster()?;
    let database_url = provision_database(&cluster)?;
    let runtime = Runtime::new().map_err(|err| err.to_string())?;

    runtime
        .block_on(run_pending_migrations(&database_url))
        .map_err(|err| err.to_string())?;
    let pool = runtime
        .block_on(DbPool::new(
            PoolConfig::new(database_url.as_str()).with_max_size(8),
        ))
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        store: DieselFacilityStore::new(pool.clone()),
        users: DieselUserRepository::new(pool.clone()),
        active: DieselActiveRequestRepository::new(pool.clone()),
        pool,
        runtime,
        database_url,
        _cluster: cluster,
    })
}

#[fixture]
fn context() -> Option<TestContext> {
    match setup() {
        Ok(context) => Some(context),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn location(room_number: &str, block: &str) -> RoomReference {
    RoomReference::Location {
        room_number: RoomNumber::new(room_number).expect("room number"),
        block: Block::new(block).expect("block"),
    }
}

fn new_request(room: RoomReference, request_type: RequestType) -> NewServiceRequest {
    NewServiceRequest {
        room,
        request_type,
        description: None,
        user_id: None,
    }
}

fn user_insert(email: &str) -> UserInsert {
    UserInsert {
        id: UserId::random(),
        name: "Ada Resident".to_owned(),
        email: EmailAddress::new(email).expect("email"),
        digest: PasswordDigest::new("plain$secret"),
        phone: Some("0123".to_owned()),
        room_hint: RoomHint {
            block: Some(Block::new("BlockA").expect("block")),
            room_number: Some(RoomNumber::new("101").expect("room number")),
        },
    }
}

fn register(
    context: &TestContext,
    email: &str,
    room: Option<(&str, &str)>,
) -> Result<User, AccountRegistryError> {
    let registration = AccountRegistration {
        user: user_insert(email),
        room: room.map(|(room_number, block)| {
            (
                RoomNumber::new(room_number).expect("room number"),
                Block::new(block).expect("block"),
            )
        }),
    };
    context.runtime.block_on(context.store.register(registration))
}

fn count(database_url: &str, sql: &str) -> i64 {
    let mut client = connect(database_url).expect("assertion client");
    let row = client.query_one(sql, &[]).expect("count query");
    row.get(0)
}

#[rstest]
fn pool_answers_a_ping(context: Option<TestContext>) {
    let Some(context) = context else { return };

    context
        .runtime
        .block_on(context.pool.ping())
        .expect("database answers");
}

#[rstest]
fn location_requests_create_the_room_once_and_enforce_one_active_per_type(
    context: Option<TestContext>,
) {
    let Some(context) = context else { return };

    let first = context
        .runtime
        .block_on(
            context
                .store
                .create_request(new_request(location("101", "BlockA"), RequestType::Cleaning)),
        )
        .expect("first request");
    assert_eq!(first.status(), RequestStatus::Active);
    assert_eq!(first.request_type(), RequestType::Cleaning);

    let duplicate = context.runtime.block_on(
        context
            .store
            .create_request(new_request(location("101", "BlockA"), RequestType::Cleaning)),
    );
    assert_eq!(
        duplicate,
        Err(RequestLedgerError::active_request_exists(
            first.room_id().get(),
            "cleaning"
        ))
    );

    let other_type = context
        .runtime
        .block_on(context.store.create_request(new_request(
            RoomReference::Id {
                room_id: first.room_id(),
                block: Some(Block::new("blocka").expect("block")),
            },
            RequestType::Maintenance,
        )))
        .expect("a different type is allowed");
    assert_eq!(other_type.room_id(), first.room_id());
    assert_eq!(count(&context.database_url, "SELECT COUNT(*) FROM rooms"), 1);

    let found = context
        .runtime
        .block_on(
            context
                .active
                .find_active_request(first.room_id(), RequestType::Cleaning),
        )
        .expect("lookup")
        .expect("active cleaning request");
    assert_eq!(found.request, first);
    assert_eq!(found.room.block().as_str(), "BlockA");
    assert!(found.requester.is_none());
}

#[rstest]
fn concurrent_creates_leave_exactly_one_active_request(context: Option<TestContext>) {
    let Some(context) = context else { return };

    let seeded = context
        .runtime
        .block_on(
            context
                .store
                .create_request(new_request(location("7", "BlockB"), RequestType::Maintenance)),
        )
        .expect("room seeded");

    let store = Arc::new(context.store.clone());
    let results = context.runtime.block_on(async {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .create_request(new_request(location("7", "BlockB"), RequestType::Cleaning))
                        .await
                })
            })
            .collect();
        futures::future::join_all(handles).await
    });

    let outcomes: Vec<_> = results
        .into_iter()
        .map(|joined| joined.expect("task completes"))
        .collect();
    let created = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
    assert_eq!(created, 1);
    for outcome in outcomes.iter().filter(|outcome| outcome.is_err()) {
        assert_eq!(
            outcome,
            &Err(RequestLedgerError::active_request_exists(
                seeded.room_id().get(),
                "cleaning"
            ))
        );
    }
    assert_eq!(
        count(
            &context.database_url,
            "SELECT COUNT(*) FROM requests WHERE type = 'cleaning' AND status = 'active'"
        ),
        1
    );
}

#[rstest]
fn registration_links_membership_and_rejects_duplicate_email(context: Option<TestContext>) {
    let Some(context) = context else { return };

    let user = register(&context, "ada@example.com", Some(("101", "BlockA"))).expect("registered");
    assert_eq!(user.email().as_ref(), "ada@example.com");

    let duplicate = register(&context, "ada@example.com", Some(("102", "BlockA")));
    assert_eq!(
        duplicate,
        Err(AccountRegistryError::email_taken("ada@example.com"))
    );

    assert_eq!(count(&context.database_url, "SELECT COUNT(*) FROM users"), 1);
    assert_eq!(
        count(&context.database_url, "SELECT COUNT(*) FROM room_members"),
        1
    );
    assert_eq!(count(&context.database_url, "SELECT COUNT(*) FROM rooms"), 1);

    let email = EmailAddress::new("ada@example.com").expect("email");
    let stored = context
        .runtime
        .block_on(context.users.find_credentials(&email))
        .expect("lookup")
        .expect("credentials stored");
    assert_eq!(stored.user, user);
    assert_eq!(stored.digest.as_str(), "plain$secret");
}

#[rstest]
fn requester_is_joined_and_description_is_kept(context: Option<TestContext>) {
    let Some(context) = context else { return };

    let user = register(&context, "bo@example.com", None).expect("registered");
    let request = NewServiceRequest {
        room: location("12", "BlockC"),
        request_type: RequestType::Maintenance,
        description: RequestDescription::normalise(Some("  dripping tap ")),
        user_id: Some(*user.id()),
    };
    let created = context
        .runtime
        .block_on(context.store.create_request(request))
        .expect("created");
    assert_eq!(created.description(), Some("dripping tap"));
    assert_eq!(created.user_id(), Some(user.id()));
    assert_eq!(
        count(&context.database_url, "SELECT COUNT(*) FROM room_members"),
        1
    );

    let found = context
        .runtime
        .block_on(
            context
                .active
                .find_active_request(created.room_id(), RequestType::Maintenance),
        )
        .expect("lookup")
        .expect("active request");
    assert_eq!(found.requester, Some(user));

    let fetched = context
        .runtime
        .block_on(context.users.find_by_id(created.user_id().expect("user")))
        .expect("lookup");
    assert!(fetched.is_some());
}

#[rstest]
fn room_id_references_are_checked(context: Option<TestContext>) {
    let Some(context) = context else { return };

    let created = context
        .runtime
        .block_on(
            context
                .store
                .create_request(new_request(location("3", "BlockD"), RequestType::Cleaning)),
        )
        .expect("created");

    let mismatch = context.runtime.block_on(context.store.create_request(new_request(
        RoomReference::Id {
            room_id: created.room_id(),
            block: Some(Block::new("BlockE").expect("block")),
        },
        RequestType::Maintenance,
    )));
    assert_eq!(
        mismatch,
        Err(RequestLedgerError::room_mismatch(
            created.room_id().get(),
            "BlockE"
        ))
    );

    let missing_id = RoomId::new(i64::from(created.room_id().get()) + 1000).expect("room id");
    let missing = context.runtime.block_on(context.store.create_request(new_request(
        RoomReference::Id {
            room_id: missing_id,
            block: None,
        },
        RequestType::Cleaning,
    )));
    assert_eq!(
        missing,
        Err(RequestLedgerError::room_not_found(missing_id.get()))
    );

    let room = context
        .runtime
        .block_on(context.active.find_room_by_id(missing_id))
        .expect("lookup");
    assert!(room.is_none());
}
