//! GitHub Linguist language catalog ingestion
//!
//! Fetches `languages.yml`, decodes it into [`LanguageDefinition`]s, projects
//! those onto [`CatalogRow`]s and bulk-copies them into the `languages` table.
//!
//! # Example
//!
//! ```no_run
//! use seer_ingest::linguist::{
//!     HttpCatalogFetcher, LinguistConfig, LinguistPipeline, PgCatalogStore,
//! };
//! use std::time::Duration;
//!
//! # async fn run(pool: sqlx::PgPool) -> anyhow::Result<()> {
//! let store = PgCatalogStore::new(pool);
//! let fetcher = HttpCatalogFetcher::default();
//! let config = LinguistConfig::default();
//!
//! let outcome = LinguistPipeline::new(&store, &fetcher, &config)
//!     .run_with_deadline(Duration::from_secs(30))
//!     .await?;
//! println!("{}", outcome.summary());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod copy_source;
pub mod copy_text;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod projector;
pub mod storage;

pub use config::{LinguistConfig, DEFAULT_LINGUIST_URL};
pub use copy_source::{CopyFromSource, LanguageCopySource};
pub use error::{
    CopySourceError, CountError, FetchError, IngestError, LoadError, ParseError, ProjectionError,
};
pub use fetcher::{CatalogFetcher, HttpCatalogFetcher};
pub use models::{CatalogRow, LanguageDefinition, LanguageType, Nullable, LANGUAGE_COLUMNS, LANGUAGE_TABLE};
pub use parser::parse_catalog;
pub use pipeline::{IngestOutcome, LinguistPipeline};
pub use projector::{project, project_all, ProjectionOptions};
pub use storage::{CatalogStore, PgCatalogStore};
