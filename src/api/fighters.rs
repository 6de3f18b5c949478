use axum::extract::{Path, State};
use axum::Json;

use super::AppState;
use crate::domain::{FighterId, FighterStats};
use crate::error::AppError;

pub async fn get_stats(
    Path(fighter_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<FighterStats>, AppError> {
    let fighter_id = FighterId::new(fighter_id);
    state
        .repo
        .fighter_stats(&fighter_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("no stats for fighter {fighter_id}")))
}
