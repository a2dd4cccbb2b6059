//! Target table access: row count and bulk copy

use async_trait::async_trait;
use sqlx::postgres::{PgConnection, PgCopyIn, PgPool};
use tracing::{debug, info, warn};

use super::copy_source::CopyFromSource;
use super::copy_text::{copy_statement, encode_row, quote_ident};
use super::error::{CountError, LoadError};

/// Flush the COPY buffer once it grows past this many bytes
const COPY_CHUNK_BYTES: usize = 64 * 1024;

/// Database operations the ingestion run depends on
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Number of rows currently in `table`
    async fn count_rows(&self, table: &str) -> Result<i64, CountError>;

    /// Stream every row of `source` into `table`, writing `columns` in order.
    /// Returns the number of rows the database accepted.
    async fn copy_from(
        &self,
        table: &str,
        columns: &[&str],
        source: &mut (dyn CopyFromSource + Send),
    ) -> Result<u64, LoadError>;
}

/// [`CatalogStore`] backed by a caller-owned PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn count_rows(&self, table: &str) -> Result<i64, CountError> {
        let sql = format!("SELECT COUNT(*) FROM {}", quote_ident(table));
        let count: i64 = sqlx::query_scalar(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(|source| CountError {
                table: table.to_string(),
                source,
            })?;

        debug!(table = %table, count = count, "Counted existing rows");
        Ok(count)
    }

    async fn copy_from(
        &self,
        table: &str,
        columns: &[&str],
        source: &mut (dyn CopyFromSource + Send),
    ) -> Result<u64, LoadError> {
        let database_error = |source: sqlx::Error| LoadError::Database {
            table: table.to_string(),
            source,
        };

        let statement = copy_statement(table, columns);
        let mut conn = self.pool.acquire().await.map_err(database_error)?;
        let mut copy = conn.copy_in_raw(&statement).await.map_err(database_error)?;

        match stream_rows(&mut copy, table, source).await {
            Ok(sent) => {
                let accepted = copy.finish().await.map_err(database_error)?;
                info!(table = %table, sent = sent, accepted = accepted, "Bulk copy finished");
                Ok(accepted)
            }
            Err(err) => {
                // COPY is a single statement, aborting it discards every row sent so far
                if let Err(abort_err) = copy.abort(err.to_string()).await {
                    warn!(table = %table, error = %abort_err, "Bulk copy abort reported an error");
                }
                Err(err)
            }
        }
    }
}

async fn stream_rows(
    copy: &mut PgCopyIn<&mut PgConnection>,
    table: &str,
    source: &mut (dyn CopyFromSource + Send),
) -> Result<usize, LoadError> {
    let mut buffer = String::with_capacity(COPY_CHUNK_BYTES);
    let mut sent = 0usize;

    while source.advance() {
        let row = source
            .current()
            .map_err(|err| LoadError::Source { index: sent, source: err })?;
        encode_row(&row, &mut buffer);
        sent += 1;

        if buffer.len() >= COPY_CHUNK_BYTES {
            send_chunk(copy, table, &mut buffer).await?;
        }
    }

    if let Some(err) = source.err() {
        return Err(LoadError::Source {
            index: sent,
            source: err.clone(),
        });
    }

    if !buffer.is_empty() {
        send_chunk(copy, table, &mut buffer).await?;
    }

    Ok(sent)
}

async fn send_chunk(
    copy: &mut PgCopyIn<&mut PgConnection>,
    table: &str,
    buffer: &mut String,
) -> Result<(), LoadError> {
    let chunk = std::mem::take(buffer).into_bytes();
    copy.send(chunk).await.map_err(|source| LoadError::Database {
        table: table.to_string(),
        source,
    })?;
    Ok(())
}
