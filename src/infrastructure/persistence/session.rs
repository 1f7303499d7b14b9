//! Store session construction.
//!
//! Every session opened by the service uses the same execution profile:
//! QUORUM consistency and a fixed per-request timeout. Neither is negotiable
//! at runtime.

use std::time::Duration;

use scylla::client::execution_profile::ExecutionProfile;
use scylla::client::session::Session;
use scylla::client::session_builder::SessionBuilder;
use scylla::statement::Consistency;

use crate::config::StoreConfig;
use crate::error::StoreError;

/// Consistency level applied to every read and write.
pub const CONSISTENCY: Consistency = Consistency::Quorum;

/// Upper bound on any single store operation, including connection setup.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Profile attached to every session: QUORUM reads and writes, each bounded
/// by [`REQUEST_TIMEOUT`].
pub(crate) fn execution_profile() -> ExecutionProfile {
    ExecutionProfile::builder()
        .consistency(CONSISTENCY)
        .request_timeout(Some(REQUEST_TIMEOUT))
        .build()
}

/// Opens a session to the configured node.
///
/// With `use_keyspace` set, the session is bound to the configured keyspace and
/// fails if it does not exist. The admin CLI opens an unbound session to create
/// the keyspace.
///
/// # Errors
///
/// Returns [`StoreError::Connect`] if the node is unreachable or the keyspace
/// cannot be selected.
pub async fn open(config: &StoreConfig, use_keyspace: bool) -> Result<Session, StoreError> {
    let mut builder = SessionBuilder::new()
        .known_node(config.node_address())
        .connection_timeout(REQUEST_TIMEOUT)
        .default_execution_profile_handle(execution_profile().into_handle());

    if use_keyspace {
        builder = builder.use_keyspace(config.keyspace.as_str(), false);
    }

    let session = builder
        .build()
        .await
        .map_err(|e| StoreError::Connect(e.to_string()))?;

    tracing::info!(node = %config.node_address(), keyspace = %config.keyspace, "Connected to store");

    Ok(session)
}
