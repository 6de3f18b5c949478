pub mod fighters;
pub mod fights;
pub mod health;
pub mod rankings;

use crate::config::Config;
use crate::db::Repository;
use crate::orchestration::ResultRecorder;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub recorder: Arc<ResultRecorder>,
    pub config: Config,
}

impl AppState {
    pub fn new(repo: Arc<Repository>, recorder: Arc<ResultRecorder>, config: Config) -> Self {
        Self {
            repo,
            recorder,
            config,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/fights/:fight_id/result", post(fights::post_result))
        .route("/v1/fighters/:fighter_id/stats", get(fighters::get_stats))
        .route(
            "/v1/rankings/:weight_class_id",
            get(rankings::get_current_ranking),
        )
        .route(
            "/v1/rankings/:weight_class_id/history",
            get(rankings::get_ranking_history),
        )
        .layer(cors)
        .with_state(state)
}
