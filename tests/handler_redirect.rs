mod common;

use axum::{Router, http::StatusCode, routing::get};
use axum_test::TestServer;
use snaplink::api::handlers::redirect_handler;
use snaplink::domain::click_worker::{record_click, run_click_worker};
use snaplink::domain::entities::NewMapping;
use snaplink::domain::repositories::MappingRepository;
use std::sync::Arc;

#[tokio::test]
async fn test_redirect_success() {
    let (state, mut rx, repo) = common::create_test_state(None);
    repo.create(NewMapping::new("promo1", "https://example.com/target"))
        .await
        .unwrap();

    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    let response = server.get("/promo1").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com/target");

    let event = rx.recv().await.unwrap();
    assert_eq!(event.code, "promo1");

    assert!(record_click(&repo, &event).await);
    assert_eq!(repo.find_by_code("promo1").await.unwrap().clicks, 1);
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (state, mut rx, _repo) = common::create_test_state(None);
    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    let response = server.get("/nonexistent").await;

    response.assert_status(StatusCode::NOT_FOUND);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["error"]["details"]["code"], "nonexistent");

    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_redirect_code_is_case_sensitive() {
    let (state, _rx, repo) = common::create_test_state(None);
    repo.create(NewMapping::new("Promo1", "https://example.com"))
        .await
        .unwrap();

    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    server
        .get("/promo1")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server.get("/Promo1").await.assert_status(StatusCode::FOUND);
}

#[tokio::test]
async fn test_redirect_succeeds_when_click_queue_is_closed() {
    let (state, rx, repo) = common::create_test_state(None);
    repo.create(NewMapping::new("promo1", "https://example.com"))
        .await
        .unwrap();
    drop(rx);

    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    let response = server.get("/promo1").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(repo.find_by_code("promo1").await.unwrap().clicks, 0);
}

#[tokio::test]
async fn test_worker_counts_every_redirect() {
    let (state, rx, repo) = common::create_test_state(None);
    repo.create(NewMapping::new("promo1", "https://example.com"))
        .await
        .unwrap();

    let worker = tokio::spawn(run_click_worker(rx, Arc::new(repo.clone())));

    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    for _ in 0..5 {
        server.get("/promo1").await.assert_status(StatusCode::FOUND);
    }

    // Dropping the server drops the last sender, letting the worker drain and exit.
    drop(server);
    worker.await.unwrap();

    assert_eq!(repo.find_by_code("promo1").await.unwrap().clicks, 5);
}
