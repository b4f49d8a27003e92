//! Embedded PostgreSQL for the Diesel repository suites.
//!
//! Suites opt in with `RUN_PG_EMBEDDED=1`. When the shared cluster cannot
//! start, a truthy `SKIP_TEST_CLUSTER` turns the failure into a skip marker;
//! otherwise the test panics so CI breakage is not masked.

use pg_embedded_setup_unpriv::TemporaryDatabase;
use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;

/// True when `RUN_PG_EMBEDDED=1`.
pub fn embedded_postgres_enabled() -> bool {
    std::env::var("RUN_PG_EMBEDDED").as_deref() == Ok("1")
}

fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Report a cluster setup failure as a skip or a panic.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Fresh, empty database on the process-wide cluster. Dropped with the
/// returned handle.
pub fn temporary_database() -> Result<TemporaryDatabase, String> {
    let cluster = shared_cluster_handle().map_err(|err| format!("start cluster: {err:?}"))?;
    let name = format!("homeworks_test_{}", uuid::Uuid::new_v4().simple());
    cluster
        .temporary_database(name.as_str())
        .map_err(|err| format!("create database: {err:?}"))
}
