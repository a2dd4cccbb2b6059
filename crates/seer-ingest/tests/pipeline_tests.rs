//! Catalog ingestion pipeline tests
//!
//! The catalog is served by wiremock (or an in-process fetcher) and loaded
//! into an in-memory store, so these run without a database.
//!
//! Coverage includes:
//! - Loading an empty table, row identifiers and column order
//! - Skipping a populated table without fetching
//! - Legacy projection shims on and off
//! - Fetch, parse, projection and count failures writing nothing
//! - The run deadline

use seer_ingest::linguist::{
    HttpCatalogFetcher, IngestError, IngestOutcome, LanguageType, LinguistConfig,
    LinguistPipeline, ParseError, ProjectionError, ProjectionOptions, FetchError,
    LANGUAGE_COLUMNS, LANGUAGE_TABLE,
};
use std::time::Duration;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

mod common;
use common::{MemoryStore, StalledFetcher, StaticFetcher, CATALOG_FIXTURE, UNKNOWN_CATEGORY_FIXTURE};

async fn catalog_server(status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lib/linguist/languages.yml"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;
    server
}

fn config_for(server: &MockServer) -> LinguistConfig {
    LinguistConfig::new().with_remote_url(format!("{}/lib/linguist/languages.yml", server.uri()))
}

// ============================================================================
// Successful Loads
// ============================================================================

#[tokio::test]
async fn test_loads_catalog_into_empty_table() {
    let server = catalog_server(200, CATALOG_FIXTURE).await;
    let store = MemoryStore::new();
    let fetcher = HttpCatalogFetcher::default();
    let config = config_for(&server);

    let outcome = LinguistPipeline::new(&store, &fetcher, &config)
        .run_if_empty()
        .await
        .unwrap();

    assert_eq!(outcome, IngestOutcome::Loaded { rows: 3 });
    assert_eq!(store.copy_calls(), 1);
    assert_eq!(store.tables(), vec![LANGUAGE_TABLE.to_string()]);
    assert_eq!(store.columns(), LANGUAGE_COLUMNS.to_vec());

    let rows = store.rows();
    let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Go", "Rust", "Text"]);
    let ids: Vec<_> = rows.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_loaded_rows_carry_catalog_values() {
    let server = catalog_server(200, CATALOG_FIXTURE).await;
    let store = MemoryStore::new();
    let fetcher = HttpCatalogFetcher::default();
    let config = config_for(&server);

    LinguistPipeline::new(&store, &fetcher, &config)
        .run_if_empty()
        .await
        .unwrap();

    let rows = store.rows();
    let go = &rows[0];
    assert_eq!(go.language_id, 132);
    assert_eq!(go.color.as_option().map(String::as_str), Some("#00ADD8"));
    assert_eq!(go.aliases, Some(vec!["golang".to_string()]));
    assert_eq!(go.wrap.as_option(), Some(&false));
    assert!(go.fs_name.as_option().is_none());
    assert!(go.group.as_option().is_none());

    let text = &rows[2];
    assert_eq!(text.category.as_option(), Some(&LanguageType::Prose));
    assert_eq!(text.wrap.as_option(), Some(&true));
    assert_eq!(text.tm_scope.as_option().map(String::as_str), Some("none"));
    assert!(text.codemirror_mode.as_option().is_none());
}

#[tokio::test]
async fn test_legacy_shims_applied_by_default() {
    let store = MemoryStore::new();
    let fetcher = StaticFetcher::new(CATALOG_FIXTURE);
    let config = LinguistConfig::default();

    LinguistPipeline::new(&store, &fetcher, &config)
        .run_if_empty()
        .await
        .unwrap();

    let rows = store.rows();
    // programming is stored as data
    assert_eq!(rows[1].category.as_option(), Some(&LanguageType::Data));
    // interpreters mirror filenames
    assert_eq!(rows[1].interpreters, None);
    assert_eq!(rows[2].interpreters, rows[2].filenames);
    assert_eq!(
        rows[2].interpreters,
        Some(vec!["CITATION".to_string(), "README.me".to_string()])
    );
}

#[tokio::test]
async fn test_catalog_faithful_projection() {
    let store = MemoryStore::new();
    let fetcher = StaticFetcher::new(CATALOG_FIXTURE);
    let config = LinguistConfig::default().with_projection(ProjectionOptions::catalog_faithful());

    LinguistPipeline::new(&store, &fetcher, &config)
        .run_if_empty()
        .await
        .unwrap();

    let rows = store.rows();
    assert_eq!(rows[0].category.as_option(), Some(&LanguageType::Programming));
    assert_eq!(rows[1].interpreters, Some(vec!["rust-script".to_string()]));
    assert_eq!(rows[2].interpreters, None);
}

#[tokio::test]
async fn test_empty_catalog_loads_nothing() {
    let store = MemoryStore::new();
    let fetcher = StaticFetcher::new("{}\n");
    let config = LinguistConfig::default();

    let outcome = LinguistPipeline::new(&store, &fetcher, &config)
        .run_if_empty()
        .await
        .unwrap();

    assert_eq!(outcome, IngestOutcome::Loaded { rows: 0 });
    assert!(store.rows().is_empty());
}

// ============================================================================
// Idempotence
// ============================================================================

#[tokio::test]
async fn test_populated_table_is_not_fetched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CATALOG_FIXTURE))
        .expect(0)
        .mount(&server)
        .await;

    let store = MemoryStore::populated(612);
    let fetcher = HttpCatalogFetcher::default();
    let config = config_for(&server);

    let outcome = LinguistPipeline::new(&store, &fetcher, &config)
        .run_if_empty()
        .await
        .unwrap();

    assert_eq!(outcome, IngestOutcome::Skipped { existing_rows: 612 });
    assert_eq!(store.copy_calls(), 0);
}

#[tokio::test]
async fn test_second_run_is_a_no_op() {
    let store = MemoryStore::new();
    let fetcher = StaticFetcher::new(CATALOG_FIXTURE);
    let config = LinguistConfig::default();
    let pipeline = LinguistPipeline::new(&store, &fetcher, &config);

    let first = pipeline.run_if_empty().await.unwrap();
    let second = pipeline.run_if_empty().await.unwrap();

    assert_eq!(first, IngestOutcome::Loaded { rows: 3 });
    assert_eq!(second, IngestOutcome::Skipped { existing_rows: 3 });
    assert_eq!(fetcher.calls(), 1);
    assert_eq!(store.rows().len(), 3);
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_not_found_page_fails_to_parse() {
    let server = catalog_server(404, "<html><body>Not Found</body></html>").await;
    let store = MemoryStore::new();
    let fetcher = HttpCatalogFetcher::default();
    let config = config_for(&server);

    let err = LinguistPipeline::new(&store, &fetcher, &config)
        .run_if_empty()
        .await
        .unwrap_err();

    assert!(matches!(err, IngestError::Parse(ParseError::Document(_))));
    assert_eq!(store.copy_calls(), 0);
}

#[tokio::test]
async fn test_unreachable_catalog_writes_nothing() {
    let store = MemoryStore::new();
    let fetcher = HttpCatalogFetcher::default();
    let config = LinguistConfig::new().with_remote_url("http://127.0.0.1:1/languages.yml");

    let err = LinguistPipeline::new(&store, &fetcher, &config)
        .run_if_empty()
        .await
        .unwrap_err();

    assert!(matches!(err, IngestError::Fetch(FetchError::Transport { .. })));
    assert_eq!(store.copy_calls(), 0);
}

#[tokio::test]
async fn test_unknown_category_aborts_before_copy() {
    let store = MemoryStore::new();
    let fetcher = StaticFetcher::new(UNKNOWN_CATEGORY_FIXTURE);
    let config = LinguistConfig::default();

    let err = LinguistPipeline::new(&store, &fetcher, &config)
        .run_if_empty()
        .await
        .unwrap_err();

    match err {
        IngestError::Projection(ProjectionError::UnknownCategory { language, category }) => {
            assert_eq!(language, "Wingdings");
            assert_eq!(category, "pictographic");
        },
        other => panic!("expected projection error, got {other:?}"),
    }
    assert_eq!(store.copy_calls(), 0);
}

#[tokio::test]
async fn test_count_failure_stops_before_fetch() {
    let store = MemoryStore::unreachable();
    let fetcher = StaticFetcher::new(CATALOG_FIXTURE);
    let config = LinguistConfig::default();

    let err = LinguistPipeline::new(&store, &fetcher, &config)
        .run_if_empty()
        .await
        .unwrap_err();

    assert!(matches!(err, IngestError::Count(_)));
    assert!(err.to_string().contains("languages"));
    assert_eq!(fetcher.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_deadline_bounds_a_stalled_fetch() {
    let store = MemoryStore::new();
    let fetcher = StalledFetcher;
    let config = LinguistConfig::default();

    let err = LinguistPipeline::new(&store, &fetcher, &config)
        .run_with_deadline(Duration::from_millis(30_000))
        .await
        .unwrap_err();

    assert!(matches!(err, IngestError::Timeout(d) if d == Duration::from_secs(30)));
    assert_eq!(store.copy_calls(), 0);
}

#[tokio::test]
async fn test_deadline_not_hit_by_fast_run() {
    let store = MemoryStore::new();
    let fetcher = StaticFetcher::new(CATALOG_FIXTURE);
    let config = LinguistConfig::default();

    let outcome = LinguistPipeline::new(&store, &fetcher, &config)
        .run_with_deadline(Duration::from_secs(30))
        .await
        .unwrap();

    assert!(matches!(outcome, IngestOutcome::Loaded { rows: 3 }));
}
