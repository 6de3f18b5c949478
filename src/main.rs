use anyhow::Context;
use fight_ledger::{
    api, config::Config, db::init_db, RankingEngine, Repository, ResultApplier, ResultRecorder,
};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    let config = Config::from_env().context("loading configuration")?;
    let port = config.port;

    let pool = init_db(&config.database_path)
        .await
        .with_context(|| format!("initializing database at {}", config.database_path))?;

    let repo = Arc::new(Repository::new(pool));
    let applier = ResultApplier::new(RankingEngine::new(config.ranking.clone()));
    let recorder = Arc::new(ResultRecorder::new(repo.clone(), applier));

    tracing::info!(
        upset_bonus = %config.ranking.upset_bonus,
        unranked_floor = config.ranking.unranked_floor,
        "Ranking policy loaded"
    );

    let app = api::create_router(api::AppState::new(repo, recorder, config));

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding to {addr}"))?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
