//! Per-test databases on the embedded cluster.
//!
//! Database creation goes through the `postgres` client because
//! `CREATE DATABASE` cannot run inside the transaction Diesel opens for
//! migrations.

use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use uuid::Uuid;

use super::format_postgres_error;

const MAINTENANCE_DATABASE: &str = "postgres";

/// Create an empty, uniquely named database and return its URL.
///
/// Schema setup is left to the caller so it runs through the crate's own
/// embedded migrations.
pub fn provision_database(cluster: &TestCluster) -> Result<String, String> {
    let connection = cluster.connection();
    let admin_url = connection.database_url(MAINTENANCE_DATABASE);
    let mut client = Client::connect(&admin_url, NoTls)
        .map_err(|err| format!("connect {MAINTENANCE_DATABASE}: {}", format_postgres_error(&err)))?;

    let name = format!("facilities_{}", Uuid::new_v4().simple());
    client
        .batch_execute(&format!("CREATE DATABASE \"{name}\""))
        .map_err(|err| format!("create {name}: {}", format_postgres_error(&err)))?;

    Ok(connection.database_url(&name))
}

/// Open a plain client on `database_url` for assertions that bypass the
/// adapters.
pub fn connect(database_url: &str) -> Result<Client, String> {
    Client::connect(database_url, NoTls).map_err(|err| format_postgres_error(&err))
}
