//! ScyllaDB implementation of the url repository.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use scylla::client::session::Session;
use scylla::statement::prepared::PreparedStatement;

use crate::config::StoreConfig;
use crate::domain::entities::UrlMapping;
use crate::domain::repositories::UrlRepository;
use crate::error::StoreError;
use crate::infrastructure::persistence::session;

const INSERT_CQL: &str = "INSERT INTO urls (short_url, long_url) VALUES (?, ?)";
const SELECT_BY_LONG_CQL: &str = "SELECT short_url FROM urls WHERE long_url = ? LIMIT 1";
const SELECT_BY_SHORT_CQL: &str = "SELECT long_url FROM urls WHERE short_url = ? LIMIT 1";
const PING_CQL: &str = "SELECT release_version FROM system.local";

/// How long [`ScyllaUrlRepository::close`] waits for other handles to drop.
pub const CLOSE_GRACE: Duration = Duration::from_secs(5);
const CLOSE_POLL: Duration = Duration::from_millis(10);

/// Url repository backed by a single long-lived ScyllaDB session.
///
/// Statements are prepared once at connect time. Consistency and timeout come
/// from the session's execution profile (see [`session`]).
///
/// The session is released by [`ScyllaUrlRepository::close`] on the normal
/// shutdown path. A process that is killed does not release it.
pub struct ScyllaUrlRepository {
    session: Session,
    insert: PreparedStatement,
    select_by_long: PreparedStatement,
    select_by_short: PreparedStatement,
}

impl ScyllaUrlRepository {
    /// Opens a session bound to the configured keyspace and prepares statements.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connect`] if the session cannot be established or
    /// the statements cannot be prepared (for example, the `urls` table is missing).
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let session = session::open(config, true).await?;
        Self::new(session).await
    }

    /// Wraps an already open session.
    pub async fn new(session: Session) -> Result<Self, StoreError> {
        let insert = prepare(&session, INSERT_CQL).await?;
        let select_by_long = prepare(&session, SELECT_BY_LONG_CQL).await?;
        let select_by_short = prepare(&session, SELECT_BY_SHORT_CQL).await?;

        Ok(Self {
            session,
            insert,
            select_by_long,
            select_by_short,
        })
    }

    /// Issues a trivial query to confirm the node answers.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.session
            .query_unpaged(PING_CQL, ())
            .await
            .map(|_| ())
            .map_err(|e| StoreError::Read(e.to_string()))
    }

    /// Releases the store session.
    ///
    /// Connection tasks can still hold router clones for a moment after the
    /// server drains, so this waits up to [`CLOSE_GRACE`] for them to drop. If
    /// handles outlive that, the session is released when the last one drops.
    pub async fn close(self: Arc<Self>) {
        match release(self, CLOSE_GRACE).await {
            Ok(repository) => {
                drop(repository.session);
                tracing::info!("Store session closed");
            }
            Err(shared) => {
                tracing::warn!(
                    handles = Arc::strong_count(&shared),
                    "Store session still in use; released when the last handle drops"
                );
            }
        }
    }

    /// Runs a single-column lookup and returns the first row, if any.
    async fn select_one(
        &self,
        statement: &PreparedStatement,
        value: &str,
    ) -> Result<Option<String>, StoreError> {
        let rows = self
            .session
            .execute_unpaged(statement, (value,))
            .await
            .map_err(|e| StoreError::Read(e.to_string()))?
            .into_rows_result()
            .map_err(|e| StoreError::Read(e.to_string()))?;

        let row = rows
            .maybe_first_row::<(String,)>()
            .map_err(|e| StoreError::Read(e.to_string()))?;

        Ok(row.map(|(column,)| column))
    }
}

/// Unwraps `shared` once it is the only handle, giving up after `grace`.
async fn release<T>(mut shared: Arc<T>, grace: Duration) -> Result<T, Arc<T>> {
    let deadline = tokio::time::Instant::now() + grace;

    loop {
        match Arc::try_unwrap(shared) {
            Ok(inner) => return Ok(inner),
            Err(still_shared) if tokio::time::Instant::now() >= deadline => {
                return Err(still_shared);
            }
            Err(still_shared) => {
                shared = still_shared;
                tokio::time::sleep(CLOSE_POLL).await;
            }
        }
    }
}

async fn prepare(session: &Session, cql: &str) -> Result<PreparedStatement, StoreError> {
    session
        .prepare(cql)
        .await
        .map_err(|e| StoreError::Connect(format!("failed to prepare `{cql}`: {e}")))
}

#[async_trait]
impl UrlRepository for ScyllaUrlRepository {
    async fn insert(&self, mapping: &UrlMapping) -> Result<(), StoreError> {
        self.session
            .execute_unpaged(
                &self.insert,
                (mapping.short_key.as_str(), mapping.long_url.as_str()),
            )
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;

        Ok(())
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<String>, StoreError> {
        self.select_one(&self.select_by_long, long_url).await
    }

    async fn find_by_short_key(&self, short_key: &str) -> Result<Option<String>, StoreError> {
        self.select_one(&self.select_by_short, short_key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_release_sole_handle() {
        let released = release(Arc::new(7), Duration::ZERO).await;
        assert_eq!(released, Ok(7));
    }

    #[tokio::test]
    async fn test_release_waits_for_lingering_handle() {
        let shared = Arc::new(String::from("session"));
        let lingering = shared.clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            drop(lingering);
        });

        let released = release(shared, Duration::from_secs(2)).await;
        assert_eq!(released.as_deref(), Ok("session"));
    }

    #[tokio::test]
    async fn test_release_gives_up_after_grace() {
        let shared = Arc::new(1u8);
        let _held = shared.clone();

        let released = release(shared, Duration::from_millis(30)).await;

        let still_shared = released.unwrap_err();
        assert_eq!(Arc::strong_count(&still_shared), 2);
    }
}
