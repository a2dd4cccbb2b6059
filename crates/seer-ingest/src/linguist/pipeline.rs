//! Linguist catalog ingestion pipeline
//!
//! Loads the catalog into an empty `languages` table. A populated table is
//! left untouched.
//!
//! The emptiness check and the bulk copy are separate statements. Two runs
//! started at the same time can both see an empty table and both load it;
//! callers must not run the pipeline concurrently against one database.

use std::time::Duration;
use tracing::{info, instrument};

use super::config::LinguistConfig;
use super::copy_source::LanguageCopySource;
use super::error::IngestError;
use super::fetcher::CatalogFetcher;
use super::models::{LANGUAGE_COLUMNS, LANGUAGE_TABLE};
use super::parser::parse_catalog;
use super::projector::project_all;
use super::storage::CatalogStore;

/// Catalog ingestion over borrowed collaborators.
///
/// The pipeline owns neither the database handle nor the HTTP client.
pub struct LinguistPipeline<'a> {
    store: &'a dyn CatalogStore,
    fetcher: &'a dyn CatalogFetcher,
    config: &'a LinguistConfig,
}

impl<'a> LinguistPipeline<'a> {
    pub fn new(
        store: &'a dyn CatalogStore,
        fetcher: &'a dyn CatalogFetcher,
        config: &'a LinguistConfig,
    ) -> Self {
        Self {
            store,
            fetcher,
            config,
        }
    }

    /// Run the load if the target table is empty.
    ///
    /// Steps:
    /// 1. Count rows in `languages`, stop if there are any
    /// 2. Fetch the catalog document
    /// 3. Parse it into definitions
    /// 4. Project definitions onto rows
    /// 5. Bulk copy the rows
    ///
    /// Any failure before step 5 leaves the table untouched.
    #[instrument(skip(self), fields(url = %self.config.remote_url))]
    pub async fn run_if_empty(&self) -> Result<IngestOutcome, IngestError> {
        let existing_rows = self.store.count_rows(LANGUAGE_TABLE).await?;
        if existing_rows > 0 {
            info!(
                existing_rows = existing_rows,
                "Languages table already populated, skipping catalog load"
            );
            return Ok(IngestOutcome::Skipped { existing_rows });
        }

        info!("Phase 1: Fetching language catalog");
        let document = self.fetcher.fetch(&self.config.remote_url).await?;

        info!(bytes = document.len(), "Phase 2: Parsing language catalog");
        let definitions = parse_catalog(&document)?;

        info!(definitions = definitions.len(), "Phase 3: Projecting definitions");
        let rows = project_all(definitions, &self.config.projection)?;

        info!(rows = rows.len(), "Phase 4: Bulk copying rows");
        let mut source = LanguageCopySource::new(rows);
        let copied = self
            .store
            .copy_from(LANGUAGE_TABLE, &LANGUAGE_COLUMNS, &mut source)
            .await?;

        info!(rows = copied, "Language catalog loaded");
        Ok(IngestOutcome::Loaded { rows: copied })
    }

    /// [`Self::run_if_empty`] bounded by one deadline shared by every step
    pub async fn run_with_deadline(&self, deadline: Duration) -> Result<IngestOutcome, IngestError> {
        tokio::time::timeout(deadline, self.run_if_empty())
            .await
            .map_err(|_| IngestError::Timeout(deadline))?
    }
}

/// Result of an ingestion run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// The table already had rows; nothing was fetched or written
    Skipped { existing_rows: i64 },
    /// The catalog was copied into an empty table
    Loaded { rows: u64 },
}

impl IngestOutcome {
    pub fn summary(&self) -> String {
        match self {
            IngestOutcome::Skipped { existing_rows } => format!(
                "Catalog load skipped - languages table already has {} rows",
                existing_rows
            ),
            IngestOutcome::Loaded { rows } => {
                format!("Loaded {} languages from the Linguist catalog", rows)
            }
        }
    }
}
