//! Seer Ingest Library
//!
//! Loads reference catalogs into the Seer PostgreSQL database.
//!
//! # Supported Data Sources
//!
//! - **Linguist**: GitHub Linguist's `languages.yml` language catalog
//!
//! # Example
//!
//! ```no_run
//! use seer_ingest::config::Config;
//! use seer_ingest::db;
//! use seer_ingest::linguist::{HttpCatalogFetcher, LinguistPipeline, PgCatalogStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let pool = db::create_pool(&config.database).await?;
//!     db::run_migrations(&pool).await?;
//!
//!     let store = PgCatalogStore::new(pool.clone());
//!     let fetcher = HttpCatalogFetcher::default();
//!     LinguistPipeline::new(&store, &fetcher, &config.linguist)
//!         .run_with_deadline(config.timeout())
//!         .await?;
//!     Ok(())
//! }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod config;
pub mod db;
pub mod linguist;
