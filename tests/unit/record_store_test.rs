//! Unit tests for the HTTP store clients.
//!
//! URL layout and acknowledgement parsing are checked directly; the request
//! methods, paths, bodies and status mapping are checked against a local
//! wiremock server.

use std::sync::Arc;

use rstest::rstest;
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sheetmarks::app::App;
use sheetmarks::managers::bookmark_editor::SubmitOutcome;
use sheetmarks::services::record_store::{HttpRecordStore, RecordStoreTrait, StoreAck};
use sheetmarks::services::settings_engine::SettingsEngine;
use sheetmarks::services::suggestion_store::{HttpSuggestionStore, SuggestionStoreTrait};
use sheetmarks::types::bookmark::{BookmarkRecord, BookmarkType, FormInput, Priority, RecordId};
use sheetmarks::types::errors::StoreError;
use sheetmarks::types::suggestion::SuggestionRow;

const BASE: &str = "https://sheetdb.io/api/v1/xst6grt6c9tow";

#[test]
fn test_collection_url_is_base() {
    let store = HttpRecordStore::new(BASE);
    assert_eq!(store.base_url(), BASE);
    assert_eq!(store.collection_url().unwrap().as_str(), BASE);
}

#[rstest]
#[case(BASE)]
#[case("https://sheetdb.io/api/v1/xst6grt6c9tow/")]
fn test_record_url_appends_id_segment(#[case] base: &str) {
    let store = HttpRecordStore::new(base);
    let id = RecordId::new("a1").unwrap();
    assert_eq!(
        store.record_url(&id).unwrap().as_str(),
        "https://sheetdb.io/api/v1/xst6grt6c9tow/id/a1"
    );
}

#[test]
fn test_record_url_escapes_id() {
    let store = HttpRecordStore::new(BASE);
    let id = RecordId::new("a b/c").unwrap();
    assert_eq!(
        store.record_url(&id).unwrap().as_str(),
        "https://sheetdb.io/api/v1/xst6grt6c9tow/id/a%20b%2Fc"
    );
}

#[test]
fn test_invalid_base_url_is_an_error() {
    let store = HttpRecordStore::new("not a url");
    assert!(matches!(store.collection_url(), Err(StoreError::Network(_))));
}

#[test]
fn test_search_url_carries_bookmark_filter() {
    let store = HttpSuggestionStore::new("https://sheetdb.io/api/v1/3nh9gsmivu5e4");
    let url = store.search_url("github").unwrap();
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(pairs, vec![("search".to_string(), "bookmark:github".to_string())]);
    assert_eq!(url.path(), "/api/v1/3nh9gsmivu5e4");
}

#[test]
fn test_search_url_encodes_query() {
    let store = HttpSuggestionStore::new("https://sheetdb.io/api/v1/3nh9gsmivu5e4");
    let url = store.search_url("a&b c").unwrap();
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(pairs[0].1, "bookmark:a&b c");
}

#[rstest]
#[case(r#"{"created":1}"#, true)]
#[case(r#"{"updated":1}"#, true)]
#[case(r#"{"deleted":1}"#, true)]
#[case("{}", false)]
#[case("[]", false)]
#[case("", false)]
#[case("   ", false)]
#[case("0", false)]
fn test_ack_confirmation(#[case] body: &str, #[case] confirmed: bool) {
    let ack = StoreAck::from_body(body).unwrap();
    assert_eq!(ack.is_confirmed(), confirmed);
}

#[test]
fn test_ack_rejects_garbage() {
    assert!(matches!(
        StoreAck::from_body("<html>"),
        Err(StoreError::Decode(_))
    ));
}

#[test]
fn test_suggestion_rows_ignore_extra_columns() {
    let rows: Vec<SuggestionRow> = serde_json::from_value(json!([
        {"id": "1", "bookmark": "github.com/foo", "type": "project"}
    ]))
    .unwrap();
    assert_eq!(rows, vec![SuggestionRow { bookmark: "github.com/foo".to_string() }]);
}

// ─── Record store over HTTP ───

const SHEET: &str = "/api/v1/sheet";

fn x_com() -> BookmarkRecord {
    BookmarkRecord {
        id: Some("a1".to_string()),
        bookmark: "http://x.com".to_string(),
        kind: BookmarkType::Python,
        priority: Priority::Urgent,
    }
}

async fn record_store(server: &MockServer) -> HttpRecordStore {
    HttpRecordStore::new(format!("{}{}", server.uri(), SHEET))
}

#[tokio::test]
async fn test_list_gets_collection_and_keeps_odd_rows() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SHEET))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "a1", "bookmark": "http://x.com", "type": "python", "priority": "urgent"},
            {"id": "b2", "bookmark": "http://rust-lang.org", "type": "Rust", "priority": ""}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let records = record_store(&server).await.list().await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0], x_com());
    assert_eq!(records[1].kind, BookmarkType::Unrecognized("Rust".to_string()));
}

#[rstest]
#[case(500)]
#[case(404)]
#[tokio::test]
async fn test_list_error_status_maps_to_status_error(#[case] status: u16) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;

    let err = record_store(&server).await.list().await.unwrap_err();

    assert!(matches!(err, StoreError::Status(code, _) if code == status));
}

#[tokio::test]
async fn test_list_undecodable_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = record_store(&server).await.list().await.unwrap_err();

    assert!(matches!(err, StoreError::Decode(_)));
}

#[tokio::test]
async fn test_create_posts_record_to_collection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SHEET))
        .and(body_json(json!({
            "id": "a1", "bookmark": "http://x.com", "type": "python", "priority": "urgent"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"created": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let ack = record_store(&server).await.create(&x_com()).await.unwrap();

    assert!(ack.is_confirmed());
}

#[tokio::test]
async fn test_update_patches_record_by_id() {
    let server = MockServer::start().await;
    let mut changed = x_com();
    changed.priority = Priority::Important;
    Mock::given(method("PATCH"))
        .and(path(format!("{}/id/a1", SHEET)))
        .and(body_json(serde_json::to_value(&changed).unwrap()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"updated": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let ack = record_store(&server)
        .await
        .update(&RecordId::new("a1").unwrap(), &changed)
        .await
        .unwrap();

    assert!(ack.is_confirmed());
}

#[rstest]
#[case(json!({"deleted": 1}), true)]
#[case(json!({}), false)]
#[tokio::test]
async fn test_delete_addresses_record_by_id(#[case] body: Value, #[case] confirmed: bool) {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("{}/id/a1", SHEET)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let ack = record_store(&server)
        .await
        .delete(&RecordId::new("a1").unwrap())
        .await
        .unwrap();

    assert_eq!(ack.is_confirmed(), confirmed);
}

#[tokio::test]
async fn test_delete_missing_row_is_a_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "not found"})))
        .mount(&server)
        .await;

    let err = record_store(&server)
        .await
        .delete(&RecordId::new("zz").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::Status(404, _)));
}

// ─── Suggestion store over HTTP ───

async fn suggestion_store(server: &MockServer) -> HttpSuggestionStore {
    HttpSuggestionStore::new(format!("{}/api/v1/names", server.uri()))
}

#[tokio::test]
async fn test_search_bookmarks_sends_bookmark_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/names"))
        .and(query_param("search", "bookmark:git"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"bookmark": "github.com/foo", "type": "project"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let rows = suggestion_store(&server).await.search_bookmarks("git").await.unwrap();

    assert_eq!(rows, vec![SuggestionRow { bookmark: "github.com/foo".to_string() }]);
}

#[rstest]
#[case("")]
#[case("[]")]
#[tokio::test]
async fn test_search_bookmarks_blank_or_empty_body_is_no_rows(#[case] body: &str) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let rows = suggestion_store(&server).await.search_bookmarks("zzz").await.unwrap();

    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_search_bookmarks_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = suggestion_store(&server).await.search_bookmarks("git").await.unwrap_err();

    assert!(matches!(err, StoreError::Status(503, _)));
}

// ─── Editor against the HTTP stores ───

#[tokio::test]
async fn test_added_bookmark_is_posted_with_a_generated_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SHEET))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SHEET))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"created": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let engine = SettingsEngine::new(Some(
        tmp.path().join("sheetmarks.json").to_string_lossy().to_string(),
    ));
    let app = App::with_stores(
        engine,
        Arc::new(record_store(&server).await),
        Arc::new(suggestion_store(&server).await),
    );
    app.startup().await;
    app.open_editor(None).unwrap();

    let outcome = app
        .bookmark_editor
        .submit(FormInput {
            bookmark: Some("http://y.com".to_string()),
            kind: Some("java".to_string()),
            priority: Some("not-so".to_string()),
        })
        .await;
    assert_eq!(outcome, SubmitOutcome::Saved);

    let requests = server.received_requests().await.unwrap();
    let post = requests
        .iter()
        .find(|r| r.method.as_str() == "POST")
        .unwrap();
    let body: Value = serde_json::from_slice(&post.body).unwrap();
    assert!(!body["id"].as_str().unwrap().is_empty());
    assert_eq!(body["bookmark"], "http://y.com");
    assert_eq!(body["type"], "java");
    assert_eq!(body["priority"], "not-so");
    assert_eq!(
        requests.iter().filter(|r| r.method.as_str() == "GET").count(),
        2
    );
}
