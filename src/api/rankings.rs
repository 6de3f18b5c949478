use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::domain::{RankingEntry, RankingSnapshot, WeightClassId};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct RankingQuery {
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingResponse {
    pub weight_class_id: WeightClassId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranked_at: Option<i64>,
    pub entries: Vec<RankingEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingHistoryResponse {
    pub weight_class_id: WeightClassId,
    pub snapshots: Vec<RankingSnapshot>,
}

pub async fn get_current_ranking(
    Path(weight_class_id): Path<String>,
    Query(params): Query<RankingQuery>,
    State(state): State<AppState>,
) -> Result<Json<RankingResponse>, AppError> {
    let weight_class_id = known_weight_class(&state, weight_class_id).await?;
    let limit = params.limit.unwrap_or(state.config.rankings_default_limit);

    let snapshot = state.repo.current_ranking(&weight_class_id, limit).await?;
    let (ranked_at, entries) = match snapshot {
        Some(s) => (Some(s.ranked_at.as_ms()), s.entries),
        None => (None, Vec::new()),
    };

    Ok(Json(RankingResponse {
        weight_class_id,
        ranked_at,
        entries,
    }))
}

pub async fn get_ranking_history(
    Path(weight_class_id): Path<String>,
    Query(params): Query<RankingQuery>,
    State(state): State<AppState>,
) -> Result<Json<RankingHistoryResponse>, AppError> {
    let weight_class_id = known_weight_class(&state, weight_class_id).await?;
    let limit = params.limit.unwrap_or(state.config.rankings_default_limit);

    let snapshots = state.repo.ranking_history(&weight_class_id, limit).await?;
    Ok(Json(RankingHistoryResponse {
        weight_class_id,
        snapshots,
    }))
}

async fn known_weight_class(state: &AppState, raw: String) -> Result<WeightClassId, AppError> {
    let id = WeightClassId::new(raw);
    match state.repo.weight_class(&id).await? {
        Some(_) => Ok(id),
        None => Err(AppError::NotFound(format!("weight class {id}"))),
    }
}
