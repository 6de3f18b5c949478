#![allow(dead_code)]

use fight_ledger::domain::FinishDetails;
use fight_ledger::{
    init_db, Fight, FightOutcome, Fighter, FighterId, Points, RankingEntry, Repository,
    ResultType, TimeMs, WeightClass, WeightClassId,
};
use tempfile::TempDir;

pub async fn setup_repo() -> (Repository, TempDir, String) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir
        .path()
        .join("test.db")
        .to_string_lossy()
        .to_string();
    let pool = init_db(&db_path).await.expect("init_db failed");
    (Repository::new(pool), temp_dir, db_path)
}

pub fn lightweight() -> WeightClass {
    WeightClass {
        id: WeightClassId::new("lw"),
        name: "Lightweight".to_string(),
        limit_lbs: 155,
    }
}

pub fn fighter(id: &str) -> Fighter {
    Fighter {
        id: FighterId::new(id),
        first_name: id.to_uppercase(),
        last_name: "Tester".to_string(),
        nickname: None,
    }
}

/// Insert the lightweight division and the given fighters.
pub async fn seed_division(repo: &Repository, fighters: &[&str]) {
    repo.insert_weight_class(&lightweight()).await.unwrap();
    for f in fighters {
        repo.insert_fighter(&fighter(f)).await.unwrap();
    }
}

/// Store a ladder with the fighters in order, stamped at `ranked_at`.
pub async fn seed_ladder(repo: &Repository, fighters: &[&str], ranked_at: i64) {
    let entries: Vec<RankingEntry> = fighters
        .iter()
        .enumerate()
        .map(|(i, f)| RankingEntry {
            fighter_id: FighterId::new(*f),
            weight_class_id: lightweight().id,
            position: i as u32 + 1,
            points: Points::from_whole(100 - i as i64 * 10),
            previous_position: None,
            ranked_at: TimeMs::new(ranked_at),
        })
        .collect();
    repo.seed_ranking_snapshot(&entries).await.unwrap();
}

pub async fn schedule(repo: &Repository, f1: &str, f2: &str) -> Fight {
    let fight = Fight::scheduled(
        lightweight().id,
        FighterId::new(f1),
        FighterId::new(f2),
        3,
    );
    repo.insert_fight(&fight).await.unwrap();
    fight
}

pub fn outcome(fight: &Fight, result_type: ResultType, winner: Option<&str>) -> FightOutcome {
    FightOutcome {
        fight_id: fight.id.clone(),
        weight_class_id: fight.weight_class_id.clone(),
        fighter1_id: fight.fighter1_id.clone(),
        fighter2_id: fight.fighter2_id.clone(),
        result_type,
        winner_id: winner.map(FighterId::new),
        finish: FinishDetails::default(),
    }
}
