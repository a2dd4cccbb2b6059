//! Shared fixtures and in-memory collaborators for catalog ingestion tests
//!
//! [`MemoryStore`] stands in for PostgreSQL: it drains the copy source the
//! same way the real store does and records what it received.

#![allow(dead_code)]

use async_trait::async_trait;
use seer_ingest::linguist::{
    CatalogFetcher, CatalogRow, CatalogStore, CopyFromSource, CountError, FetchError, LoadError,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Three-entry catalog, deliberately out of alphabetical order
pub const CATALOG_FIXTURE: &str = r##"---
Text:
  type: prose
  wrap: true
  aliases:
  - fundamental
  - plain text
  extensions:
  - ".txt"
  filenames:
  - CITATION
  - README.me
  tm_scope: none
  ace_mode: text
  language_id: 372
Rust:
  type: programming
  color: "#dea584"
  aliases:
  - rs
  extensions:
  - ".rs"
  - ".rs.in"
  interpreters:
  - rust-script
  ace_mode: rust
  codemirror_mode: rust
  codemirror_mime_type: text/x-rustsrc
  tm_scope: source.rust
  language_id: 327
Go:
  type: programming
  color: "#00ADD8"
  aliases:
  - golang
  extensions:
  - ".go"
  ace_mode: golang
  codemirror_mode: go
  codemirror_mime_type: text/x-go
  tm_scope: source.go
  language_id: 132
"##;

pub const UNKNOWN_CATEGORY_FIXTURE: &str = r#"---
Go:
  type: programming
  language_id: 132
Wingdings:
  type: pictographic
  language_id: 999
"#;

#[derive(Debug, Default)]
pub struct MemoryState {
    pub rows: Vec<CatalogRow>,
    pub columns: Vec<String>,
    pub tables: Vec<String>,
    pub copy_calls: usize,
}

/// In-memory [`CatalogStore`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    preexisting: i64,
    fail_count: bool,
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose table already holds `rows` rows
    pub fn populated(rows: i64) -> Self {
        Self {
            preexisting: rows,
            ..Self::default()
        }
    }

    /// A store whose row count query always fails
    pub fn unreachable() -> Self {
        Self {
            fail_count: true,
            ..Self::default()
        }
    }

    pub fn rows(&self) -> Vec<CatalogRow> {
        self.state.lock().unwrap().rows.clone()
    }

    pub fn columns(&self) -> Vec<String> {
        self.state.lock().unwrap().columns.clone()
    }

    pub fn tables(&self) -> Vec<String> {
        self.state.lock().unwrap().tables.clone()
    }

    pub fn copy_calls(&self) -> usize {
        self.state.lock().unwrap().copy_calls
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn count_rows(&self, table: &str) -> Result<i64, CountError> {
        if self.fail_count {
            return Err(CountError {
                table: table.to_string(),
                source: sqlx::Error::PoolTimedOut,
            });
        }
        let stored = self.state.lock().unwrap().rows.len() as i64;
        Ok(self.preexisting + stored)
    }

    async fn copy_from(
        &self,
        table: &str,
        columns: &[&str],
        source: &mut (dyn CopyFromSource + Send),
    ) -> Result<u64, LoadError> {
        let mut copied = Vec::new();
        while source.advance() {
            let row = source.current().map_err(|err| LoadError::Source {
                index: copied.len(),
                source: err,
            })?;
            copied.push(row);
        }
        if let Some(err) = source.err() {
            return Err(LoadError::Source {
                index: copied.len(),
                source: err.clone(),
            });
        }

        let count = copied.len() as u64;
        let mut state = self.state.lock().unwrap();
        state.copy_calls += 1;
        state.tables.push(table.to_string());
        state.columns = columns.iter().map(|c| c.to_string()).collect();
        state.rows.extend(copied);
        Ok(count)
    }
}

/// Serves a fixed document and counts how often it was asked for
#[derive(Debug)]
pub struct StaticFetcher {
    body: Vec<u8>,
    calls: AtomicUsize,
}

impl StaticFetcher {
    pub fn new(body: &str) -> Self {
        Self {
            body: body.as_bytes().to_vec(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogFetcher for StaticFetcher {
    async fn fetch(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.body.clone())
    }
}

/// A fetch that never completes
#[derive(Debug, Default)]
pub struct StalledFetcher;

#[async_trait]
impl CatalogFetcher for StalledFetcher {
    async fn fetch(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
        std::future::pending().await
    }
}
