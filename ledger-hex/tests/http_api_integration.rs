//! Integration tests for the HTTP inbound adapter.
//!
//! These drive the full stack (router -> service -> SQLite repository)
//! through `tower::ServiceExt::oneshot` and verify status-code mapping
//! and response bodies.
//!
//! This test requires the `sqlite` feature flag.

#![cfg(feature = "sqlite")]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use ledger_hex::{LedgerService, inbound::HttpServer};
use ledger_repo::SqliteRepo;
use ledger_types::{Summary, Transaction};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tower::ServiceExt;

/// Helper to create a test app over an in-memory SQLite store.
async fn create_test_app() -> Router {
    let repo = SqliteRepo::new("sqlite::memory:").await.unwrap();
    let service = LedgerService::new(repo);
    HttpServer::new(service).router()
}

fn post_transaction(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/transactions")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = create_test_app().await;

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_list_summarize_delete_walkthrough() {
    let app = create_test_app().await;

    // Create
    let response = app
        .clone()
        .oneshot(post_transaction(
            r#"{"user_id":"u1","title":"Coffee","amount":-3.50,"category":"Food"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let created: Transaction = serde_json::from_slice(&body).unwrap();
    assert_eq!(created.user_id, "u1");
    assert_eq!(created.title, "Coffee");
    assert_eq!(created.amount, dec!(-3.50));
    assert_eq!(created.category, "Food");

    // List
    let response = app.clone().oneshot(get("/api/transactions/u1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let listed: Vec<Transaction> = serde_json::from_slice(&body).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);

    // Summarize
    let response = app
        .clone()
        .oneshot(get("/api/transactions/summary/u1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let summary: Summary = serde_json::from_slice(&body).unwrap();
    assert_eq!(summary.balance, dec!(-3.50));
    assert_eq!(summary.income, Decimal::ZERO);
    assert_eq!(summary.expenses, dec!(-3.50));

    // Delete
    let uri = format!("/api/transactions/{}", created.id);
    let response = app.clone().oneshot(delete(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["message"], "Transaction deleted successfully");

    // List again - the row is gone
    let response = app.clone().oneshot(get("/api/transactions/u1")).await.unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let listed: Vec<Transaction> = serde_json::from_slice(&body).unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_create_missing_field_is_400_and_persists_nothing() {
    let app = create_test_app().await;

    let response = app
        .clone()
        .oneshot(post_transaction(
            r#"{"user_id":"u2","title":"Salary","category":"Pay"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = json_body(response).await;
    assert_eq!(json["error"], "Missing required fields");

    let response = app.clone().oneshot(get("/api/transactions/u2")).await.unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let listed: Vec<Transaction> = serde_json::from_slice(&body).unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_delete_unknown_id_is_404() {
    let app = create_test_app().await;

    let response = app.oneshot(delete("/api/transactions/999")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_non_integer_id_is_400() {
    let app = create_test_app().await;

    let response = app
        .oneshot(delete("/api/transactions/not-a-number"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = json_body(response).await;
    assert_eq!(json["error"], "Invalid transaction ID");
}

#[tokio::test]
async fn test_summary_for_unknown_user_is_all_zeros() {
    let app = create_test_app().await;

    let response = app
        .oneshot(get("/api/transactions/summary/nobody"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let summary: Summary = serde_json::from_slice(&body).unwrap();
    assert_eq!(summary, Summary::zero());
}

#[tokio::test]
async fn test_list_is_ordered_newest_first() {
    let app = create_test_app().await;

    for (title, amount) in [("First", "1.00"), ("Second", "2.00"), ("Third", "3.00")] {
        let body = format!(
            r#"{{"user_id":"u1","title":"{}","amount":{},"category":"Misc"}}"#,
            title, amount
        );
        let response = app.clone().oneshot(post_transaction(&body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.clone().oneshot(get("/api/transactions/u1")).await.unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let listed: Vec<Transaction> = serde_json::from_slice(&body).unwrap();

    // Same-day rows fall back to id descending.
    let titles: Vec<&str> = listed.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Third", "Second", "First"]);
}
