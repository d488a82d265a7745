#![allow(dead_code)]

use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;
use snaplink::domain::click_event::ClickEvent;
use snaplink::infrastructure::cache::NullCache;
use snaplink::infrastructure::persistence::MemoryMappingRepository;
use snaplink::state::AppState;
use snaplink::utils::code_generator::RandomCodeGenerator;

pub const TEST_HOST: &str = "localhost:8080";

/// State backed by a fresh in-memory store.
///
/// The returned repository shares storage with the one inside the state, so
/// tests can seed and inspect mappings directly.
pub fn create_test_state(
    base_domain: Option<&str>,
) -> (AppState, mpsc::Receiver<ClickEvent>, MemoryMappingRepository) {
    let repo = MemoryMappingRepository::new();
    let (tx, rx) = mpsc::channel(100);

    let state = AppState::new(
        Arc::new(repo.clone()),
        Arc::new(RandomCodeGenerator::default()),
        3,
        Arc::new(NullCache),
        tx,
        base_domain.map(str::to_string),
    );

    (state, rx, repo)
}

pub async fn create_test_mapping(pool: &PgPool, code: &str, url: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO url_mappings (code, long_url) VALUES ($1, $2) RETURNING id")
        .bind(code)
        .bind(url)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_deleted_mapping(pool: &PgPool, code: &str, url: &str) {
    sqlx::query("INSERT INTO url_mappings (code, long_url, deleted_at) VALUES ($1, $2, NOW())")
        .bind(code)
        .bind(url)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn clicks_for(pool: &PgPool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT clicks FROM url_mappings WHERE code = $1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}
