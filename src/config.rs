use crate::domain::Points;
use crate::engine::RankingPolicy;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: String,
    pub ranking: RankingPolicy,
    /// Default number of ladder positions returned by ranking queries.
    pub rankings_default_limit: u32,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = parse_or(&env_map, "PORT", 8080u16, "must be a valid u16")?;

        let database_path = env_map
            .get("DATABASE_PATH")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("DATABASE_PATH".to_string()))?;

        let defaults = RankingPolicy::default();
        let ranking = RankingPolicy {
            upset_bonus: parse_points(&env_map, "RANKING_UPSET_BONUS", defaults.upset_bonus)?,
            entrant_points: parse_points(
                &env_map,
                "RANKING_ENTRANT_POINTS",
                defaults.entrant_points,
            )?,
            expected_win_bonus: parse_points(
                &env_map,
                "RANKING_EXPECTED_WIN_BONUS",
                defaults.expected_win_bonus,
            )?,
            unranked_floor: parse_or(
                &env_map,
                "RANKING_UNRANKED_FLOOR",
                defaults.unranked_floor,
                "must be a positive integer",
            )?,
        };
        if ranking.unranked_floor == 0 {
            return Err(ConfigError::InvalidValue(
                "RANKING_UNRANKED_FLOOR".to_string(),
                "must be a positive integer".to_string(),
            ));
        }

        let rankings_default_limit = parse_or(
            &env_map,
            "RANKINGS_DEFAULT_LIMIT",
            15u32,
            "must be a valid u32",
        )?;

        Ok(Config {
            port,
            database_path,
            ranking,
            rankings_default_limit,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    env_map: &HashMap<String, String>,
    key: &str,
    default: T,
    hint: &str,
) -> Result<T, ConfigError> {
    match env_map.get(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue(key.to_string(), hint.to_string())),
    }
}

fn parse_points(
    env_map: &HashMap<String, String>,
    key: &str,
    default: Points,
) -> Result<Points, ConfigError> {
    let points = parse_or(env_map, key, default, "must be a decimal number")?;
    if points < Points::zero() {
        return Err(ConfigError::InvalidValue(
            key.to_string(),
            "must not be negative".to_string(),
        ));
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_required_env() -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("DATABASE_PATH".to_string(), "/tmp/test.db".to_string());
        map
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_env_map(setup_required_env()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.ranking, RankingPolicy::default());
        assert_eq!(config.ranking.unranked_floor, 15);
        assert_eq!(config.rankings_default_limit, 15);
    }

    #[test]
    fn test_missing_database_path() {
        let mut env_map = setup_required_env();
        env_map.remove("DATABASE_PATH");
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::MissingEnv(s)) => assert_eq!(s, "DATABASE_PATH"),
            _ => panic!("Expected MissingEnv error"),
        }
    }

    #[test]
    fn test_invalid_port() {
        let mut env_map = setup_required_env();
        env_map.insert("PORT".to_string(), "not_a_number".to_string());
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "PORT"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_ranking_overrides() {
        let mut env_map = setup_required_env();
        env_map.insert("RANKING_UPSET_BONUS".to_string(), "30.5".to_string());
        env_map.insert("RANKING_UNRANKED_FLOOR".to_string(), "10".to_string());
        let config = Config::from_env_map(env_map).unwrap();
        assert_eq!(config.ranking.upset_bonus, Points::parse("30.5").unwrap());
        assert_eq!(config.ranking.unranked_floor, 10);
        assert_eq!(config.ranking.expected_win_bonus, Points::from_whole(10));
    }

    #[test]
    fn test_zero_floor_rejected() {
        let mut env_map = setup_required_env();
        env_map.insert("RANKING_UNRANKED_FLOOR".to_string(), "0".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "RANKING_UNRANKED_FLOOR"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_negative_points_rejected() {
        let mut env_map = setup_required_env();
        env_map.insert("RANKING_EXPECTED_WIN_BONUS".to_string(), "-5".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "RANKING_EXPECTED_WIN_BONUS"),
            _ => panic!("Expected InvalidValue error"),
        }
    }
}
