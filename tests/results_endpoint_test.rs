mod common;

use axum::http::StatusCode;
use common::*;
use fight_ledger::api;
use fight_ledger::config::Config;
use fight_ledger::{RankingEngine, RankingPolicy, Repository, ResultApplier, ResultRecorder};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

struct TestApp {
    app: axum::Router,
    repo: Arc<Repository>,
    _temp: TempDir,
}

async fn setup_test_app() -> TestApp {
    let (repo, temp_dir, db_path) = setup_repo().await;
    let repo = Arc::new(repo);

    let config = Config {
        port: 0,
        database_path: db_path,
        ranking: RankingPolicy::default(),
        rankings_default_limit: 15,
    };
    let applier = ResultApplier::new(RankingEngine::new(config.ranking.clone()));
    let recorder = Arc::new(ResultRecorder::new(repo.clone(), applier));
    let app = api::create_router(api::AppState::new(repo.clone(), recorder, config));

    TestApp {
        app,
        repo,
        _temp: temp_dir,
    }
}

async fn request(
    app: axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = axum::http::Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(axum::body::Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(axum::body::Body::empty()).unwrap(),
    };

    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_health_and_ready() {
    let t = setup_test_app().await;
    let (status, body) = request(t.app.clone(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = request(t.app, "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_post_result_returns_updated_record() {
    let t = setup_test_app().await;
    seed_division(&t.repo, &["a", "b", "c"]).await;
    seed_ladder(&t.repo, &["a", "b", "c"], 1_000).await;
    let fight = schedule(&t.repo, "a", "c").await;

    let (status, body) = request(
        t.app.clone(),
        "POST",
        &format!("/v1/fights/{}/result", fight.id),
        Some(json!({
            "resultType": "SUBMISSION",
            "winnerId": "c",
            "actualRounds": 2,
            "finishRound": 2,
            "finishTime": "3:12"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["fight"]["resultType"], "SUBMISSION");
    assert_eq!(body["fight"]["winnerId"], "c");
    assert_eq!(body["fight"]["finishTime"], "3:12");
    assert_eq!(body["stats"][1]["submissions"], 1);
    assert_eq!(body["stats"][0]["losses"], 1);
    let entries = body["ranking"]["entries"].as_array().unwrap();
    assert_eq!(entries[0]["fighterId"], "c");
    assert_eq!(entries[0]["previousPosition"], 3);
    assert_eq!(entries[0]["points"], 105.0);

    let (status, body) = request(t.app.clone(), "GET", "/v1/fighters/c/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["wins"], 1);

    let (status, body) = request(t.app.clone(), "GET", "/v1/rankings/lw?limit=2", None).await;
    assert_eq!(status, StatusCode::OK);
    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1]["fighterId"], "a");

    let (status, body) = request(t.app, "GET", "/v1/rankings/lw/history", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["snapshots"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_post_result_with_outsider_winner_is_bad_request() {
    let t = setup_test_app().await;
    seed_division(&t.repo, &["a", "b"]).await;
    let fight = schedule(&t.repo, "a", "b").await;

    let (status, body) = request(
        t.app,
        "POST",
        &format!("/v1/fights/{}/result", fight.id),
        Some(json!({"resultType": "KNOCKOUT", "winnerId": "zed"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("zed"));
}

#[tokio::test]
async fn test_post_draw_with_winner_is_bad_request() {
    let t = setup_test_app().await;
    seed_division(&t.repo, &["a", "b"]).await;
    let fight = schedule(&t.repo, "a", "b").await;

    let (status, _) = request(
        t.app,
        "POST",
        &format!("/v1/fights/{}/result", fight.id),
        Some(json!({"resultType": "DRAW", "winnerId": "a"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!t.repo.fight(&fight.id).await.unwrap().unwrap().is_decided());
}

#[tokio::test]
async fn test_post_unknown_result_type_is_bad_request() {
    let t = setup_test_app().await;
    seed_division(&t.repo, &["a", "b"]).await;
    let fight = schedule(&t.repo, "a", "b").await;

    let (status, _) = request(
        t.app,
        "POST",
        &format!("/v1/fights/{}/result", fight.id),
        Some(json!({"resultType": "FORFEIT"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_post_result_for_missing_fight_is_not_found() {
    let t = setup_test_app().await;
    let (status, _) = request(
        t.app,
        "POST",
        "/v1/fights/does-not-exist/result",
        Some(json!({"resultType": "DRAW"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_fighter_and_division_are_not_found() {
    let t = setup_test_app().await;
    let (status, _) = request(t.app.clone(), "GET", "/v1/fighters/ghost/stats", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = request(t.app, "GET", "/v1/rankings/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unranked_division_returns_empty_ladder() {
    let t = setup_test_app().await;
    seed_division(&t.repo, &[]).await;
    let (status, body) = request(t.app, "GET", "/v1/rankings/lw", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entries"].as_array().unwrap().len(), 0);
    assert!(body.get("rankedAt").is_none());
}
