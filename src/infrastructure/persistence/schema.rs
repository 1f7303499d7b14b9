//! CQL schema for the `urls` table.
//!
//! `short_url` is the partition key, so inserting the same derived key twice
//! overwrites one row instead of creating two. `long_url` gets a secondary
//! index so the existence check can query it directly.

use scylla::client::session::Session;

use crate::error::StoreError;

/// Returns the statements that create the keyspace, table and index.
///
/// All statements are idempotent (`IF NOT EXISTS`).
pub fn statements(keyspace: &str, replication_factor: u32) -> Vec<String> {
    vec![
        format!(
            "CREATE KEYSPACE IF NOT EXISTS {keyspace} WITH replication = \
             {{'class': 'SimpleStrategy', 'replication_factor': {replication_factor}}}"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS {keyspace}.urls (short_url text PRIMARY KEY, long_url text)"
        ),
        format!("CREATE INDEX IF NOT EXISTS urls_long_url_idx ON {keyspace}.urls (long_url)"),
    ]
}

/// Applies the schema through an open session.
///
/// # Errors
///
/// Returns [`StoreError::Write`] naming the first statement that failed.
pub async fn apply(
    session: &Session,
    keyspace: &str,
    replication_factor: u32,
) -> Result<(), StoreError> {
    for cql in statements(keyspace, replication_factor) {
        session
            .query_unpaged(cql.as_str(), ())
            .await
            .map_err(|e| StoreError::Write(format!("`{cql}`: {e}")))?;

        tracing::info!("Applied: {}", cql);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statements_use_keyspace_and_replication() {
        let stmts = statements("url_shortener", 3);

        assert_eq!(stmts.len(), 3);
        assert!(stmts[0].starts_with("CREATE KEYSPACE IF NOT EXISTS url_shortener"));
        assert!(stmts[0].contains("'replication_factor': 3"));
        assert!(stmts[1].contains("url_shortener.urls (short_url text PRIMARY KEY, long_url text)"));
        assert!(stmts[2].ends_with("ON url_shortener.urls (long_url)"));
    }

    #[test]
    fn test_statements_are_idempotent() {
        for stmt in statements("ks", 1) {
            assert!(stmt.contains("IF NOT EXISTS"), "{stmt}");
        }
    }
}
