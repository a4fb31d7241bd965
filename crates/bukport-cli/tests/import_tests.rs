//! End-to-end tests for the import command
//!
//! These run the full pipeline against a mock Diigo API and a scratch buku
//! database: fetch, normalize, reconcile, insert, commit.

use bukport_cli::buku::BukuDb;
use bukport_cli::commands::import::{run, ImportOptions};
use bukport_common::model::timestamp_from_rowid;
use bukport_common::Bookmark;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn options(server: &MockServer, dir: &TempDir) -> ImportOptions {
    ImportOptions {
        api_url: server.uri(),
        key: "test-key".to_string(),
        username: "alice".to_string(),
        db_path: Some(dir.path().join("bookmarks.db")),
        count: None,
        limit: None,
        dry_run: false,
    }
}

fn seed_bookmark(url: &str) -> Bookmark {
    Bookmark {
        url: url.to_string(),
        title: "seeded".to_string(),
        tags: Vec::new(),
        timestamp: timestamp_from_rowid(1),
        desc: String::new(),
    }
}

/// Mount a page of bookmarks at the given offset, followed by an empty
/// page that ends pagination
async fn mount_pages(server: &MockServer, page: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/v2/bookmarks"))
        .and(query_param("start", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/bookmarks"))
        .and(query_param("start", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn import_skips_urls_already_in_store() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let opts = options(&server, &dir);

    // Seed the store with a.com
    {
        let db = BukuDb::open(opts.db_path.as_ref().unwrap()).unwrap();
        db.add_rec(&seed_bookmark("http://a.com")).unwrap();
    }

    // The service offers a.com (older than the stored row) and b.com
    // (newer), newest-first as Diigo delivers them
    mount_pages(
        &server,
        json!([
            {
                "url": "http://b.com",
                "title": "B",
                "tags": "no_tag",
                "created_at": "2021/03/02 00:00:00 +0000",
            },
            {
                "url": "http://a.com",
                "title": "A",
                "tags": "no_tag",
                "created_at": "1999/01/01 00:00:00 +0000",
            },
        ]),
    )
    .await;

    let summary = run(opts.clone()).await.unwrap();

    assert_eq!(summary.existing, 1);
    assert_eq!(summary.fetched, 2);
    // a.com is already present regardless of timestamp; only b.com is new
    assert_eq!(summary.added, 1);

    let db = BukuDb::open(opts.db_path.as_ref().unwrap()).unwrap();
    let records = db.get_rec_all().unwrap();
    let urls: Vec<&str> = records.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(urls, vec!["http://a.com", "http://b.com"]);
}

#[tokio::test]
async fn import_into_fresh_store_adds_everything_oldest_first() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let opts = options(&server, &dir);

    mount_pages(
        &server,
        json!([
            {
                "url": "http://new.com",
                "title": "Newest",
                "tags": "rust,cli",
                "created_at": "2021/03/02 00:00:00 +0000",
            },
            {
                "url": "http://old.com",
                "title": "Oldest",
                "tags": "no_tag",
                "created_at": "2021/03/01 00:00:00 +0000",
            },
        ]),
    )
    .await;

    let summary = run(opts.clone()).await.unwrap();
    assert_eq!(summary.added, 2);

    // Oldest first in the store, tags normalized into buku's format
    let db = BukuDb::open(opts.db_path.as_ref().unwrap()).unwrap();
    let records = db.get_rec_all().unwrap();
    assert_eq!(records[0].url, "http://old.com");
    assert_eq!(records[1].url, "http://new.com");
    assert_eq!(records[1].tags, vec!["cli", "rust"]);
}

#[tokio::test]
async fn import_keeps_the_newer_of_duplicate_urls() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let opts = options(&server, &dir);

    // Same URL twice, newest-first; the newer title must win
    mount_pages(
        &server,
        json!([
            {
                "url": "http://a.com",
                "title": "updated",
                "tags": "no_tag",
                "created_at": "2021/03/02 00:00:00 +0000",
            },
            {
                "url": "http://a.com",
                "title": "original",
                "tags": "no_tag",
                "created_at": "2021/03/01 00:00:00 +0000",
            },
        ]),
    )
    .await;

    let summary = run(opts.clone()).await.unwrap();
    assert_eq!(summary.added, 1);

    let db = BukuDb::open(opts.db_path.as_ref().unwrap()).unwrap();
    let records = db.get_rec_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "updated");
}

#[tokio::test]
async fn dry_run_writes_nothing() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let mut opts = options(&server, &dir);
    opts.dry_run = true;

    mount_pages(
        &server,
        json!([
            {
                "url": "http://a.com",
                "title": "A",
                "tags": "no_tag",
                "created_at": "2021/03/01 00:00:00 +0000",
            },
        ]),
    )
    .await;

    let summary = run(opts.clone()).await.unwrap();
    assert_eq!(summary.fetched, 1);
    assert_eq!(summary.added, 0);

    let db = BukuDb::open(opts.db_path.as_ref().unwrap()).unwrap();
    assert!(db.get_rec_all().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_timestamp_aborts_the_run() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let opts = options(&server, &dir);

    mount_pages(
        &server,
        json!([
            {
                "url": "http://a.com",
                "title": "A",
                "tags": "no_tag",
                "created_at": "never",
            },
        ]),
    )
    .await;

    let result = run(opts.clone()).await;
    assert!(result.is_err());

    // Nothing was written
    let db = BukuDb::open(opts.db_path.as_ref().unwrap()).unwrap();
    assert!(db.get_rec_all().unwrap().is_empty());
}

#[tokio::test]
async fn fetch_failure_aborts_before_any_write() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let opts = options(&server, &dir);

    Mock::given(method("GET"))
        .and(path("/api/v2/bookmarks"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = run(opts.clone()).await;
    assert!(result.is_err());

    let db = BukuDb::open(opts.db_path.as_ref().unwrap()).unwrap();
    assert!(db.get_rec_all().unwrap().is_empty());
}
