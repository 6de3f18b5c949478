use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use super::AppState;
use crate::domain::{FightId, FightOutcome, FighterId, FinishDetails, ResultType};
use crate::error::AppError;
use crate::orchestration::UpdatedFightRecord;

const MAX_ROUNDS: u8 = 5;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRequest {
    pub result_type: String,
    pub winner_id: Option<String>,
    pub actual_rounds: Option<u8>,
    pub finish_round: Option<u8>,
    pub finish_time: Option<String>,
}

/// Record the result of a scheduled fight.
///
/// The outcome is built against the stored fight, so the caller only names
/// the result and the winner.
pub async fn post_result(
    Path(fight_id): Path<String>,
    State(state): State<AppState>,
    Json(body): Json<ResultRequest>,
) -> Result<Json<UpdatedFightRecord>, AppError> {
    let result_type: ResultType = body
        .result_type
        .parse()
        .map_err(|e| AppError::BadRequest(format!("{e}")))?;
    let finish = parse_finish(&body)?;

    let fight_id = FightId::new(fight_id);
    let fight = state
        .repo
        .fight(&fight_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("fight {fight_id}")))?;

    let outcome = FightOutcome {
        fight_id: fight.id,
        weight_class_id: fight.weight_class_id,
        fighter1_id: fight.fighter1_id,
        fighter2_id: fight.fighter2_id,
        result_type,
        winner_id: body
            .winner_id
            .filter(|w| !w.is_empty())
            .map(FighterId::new),
        finish,
    };

    let updated = state.recorder.record(&outcome).await?;
    Ok(Json(updated))
}

fn parse_finish(body: &ResultRequest) -> Result<FinishDetails, AppError> {
    for (name, value) in [
        ("actualRounds", body.actual_rounds),
        ("finishRound", body.finish_round),
    ] {
        if let Some(round) = value {
            if !(1..=MAX_ROUNDS).contains(&round) {
                return Err(AppError::BadRequest(format!(
                    "{name} must be between 1 and {MAX_ROUNDS}"
                )));
            }
        }
    }
    if let Some(time) = body.finish_time.as_deref() {
        if !is_clock_time(time) {
            return Err(AppError::BadRequest(format!(
                "finishTime must be m:ss, got {time:?}"
            )));
        }
    }
    Ok(FinishDetails {
        actual_rounds: body.actual_rounds,
        finish_round: body.finish_round,
        finish_time: body.finish_time.clone(),
    })
}

/// `m:ss` or `mm:ss` with seconds below 60.
fn is_clock_time(time: &str) -> bool {
    let Some((minutes, seconds)) = time.split_once(':') else {
        return false;
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    (1..=2).contains(&minutes.len())
        && all_digits(minutes)
        && seconds.len() == 2
        && all_digits(seconds)
        && seconds < "60"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(actual_rounds: Option<u8>, finish_round: Option<u8>) -> ResultRequest {
        ResultRequest {
            result_type: "KNOCKOUT".to_string(),
            winner_id: None,
            actual_rounds,
            finish_round,
            finish_time: Some("2:31".to_string()),
        }
    }

    #[test]
    fn test_parse_finish_accepts_valid_rounds() {
        let finish = parse_finish(&request(Some(3), Some(3))).unwrap();
        assert_eq!(finish.finish_round, Some(3));
        assert_eq!(finish.finish_time.as_deref(), Some("2:31"));
    }

    #[test]
    fn test_parse_finish_rejects_round_zero_and_six() {
        assert!(matches!(
            parse_finish(&request(Some(0), None)),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            parse_finish(&request(None, Some(6))),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_finish_time_format() {
        for ok in ["0:45", "4:59", "12:00"] {
            assert!(is_clock_time(ok), "{ok}");
        }
        for bad in ["", "2", "2:5", "2:60", "a:10", "123:00", "2:3x", "-1:10"] {
            assert!(!is_clock_time(bad), "{bad}");
        }

        let mut body = request(Some(2), Some(2));
        body.finish_time = Some("2:75".to_string());
        assert!(matches!(parse_finish(&body), Err(AppError::BadRequest(_))));
    }
}
