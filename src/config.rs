//! Configuration management

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::defaults;
use crate::types::CostParams;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Tunable hop pricing parameters
    pub params: CostParams,

    /// Number of ranked candidates to report
    pub top_k: usize,

    /// Canonical origin id (optional, falls back to the first stage-0 node)
    pub origin_id: Option<String>,

    /// Directory for rolling log files
    pub logs_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let params = CostParams {
            ground_rate: env_or("RELIEF_GROUND_RATE", defaults::GROUND_RATE)?,
            air_rate: env_or("RELIEF_AIR_RATE", defaults::AIR_RATE)?,
            air_base_fee: env_or("RELIEF_AIR_BASE_FEE", defaults::AIR_BASE_FEE)?,
            ground_speed_kmh: env_or("RELIEF_GROUND_SPEED_KMH", defaults::GROUND_SPEED_KMH)?,
            air_speed_kmh: env_or("RELIEF_AIR_SPEED_KMH", defaults::AIR_SPEED_KMH)?,
            cargo_weight: env_or("RELIEF_CARGO_WEIGHT_KG", defaults::CARGO_WEIGHT_KG)?,
            air_capacity: env_or("RELIEF_AIR_CAPACITY_KG", defaults::AIR_CAPACITY_KG)?,
            ground_capacity: env_or("RELIEF_GROUND_CAPACITY_KG", defaults::GROUND_CAPACITY_KG)?,
            air_multiplier: env_or("RELIEF_AIR_MULTIPLIER", 1.0)?,
            ground_multiplier: env_or("RELIEF_GROUND_MULTIPLIER", 1.0)?,
        };

        let top_k = env_or("RELIEF_TOP_K", defaults::TOP_K)?;

        let origin_id = std::env::var("RELIEF_ORIGIN_ID").ok().filter(|id| !id.is_empty());

        let logs_dir = std::env::var("LOGS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("logs"));

        Ok(Self {
            params,
            top_k,
            origin_id,
            logs_dir,
        })
    }
}

/// Parse an environment variable, falling back to `default` when unset
fn env_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number, got '{}'", name, raw)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_default_when_unset() {
        let value: f64 = env_or("RELIEF_TEST_UNSET_VARIABLE", 12.5).unwrap();
        assert_eq!(value, 12.5);
    }

    #[test]
    fn test_env_or_parses_value() {
        std::env::set_var("RELIEF_TEST_CARGO", " 2500 ");
        let value: f64 = env_or("RELIEF_TEST_CARGO", 0.0).unwrap();
        assert_eq!(value, 2500.0);
        std::env::remove_var("RELIEF_TEST_CARGO");
    }

    #[test]
    fn test_env_or_rejects_garbage() {
        std::env::set_var("RELIEF_TEST_TOP_K", "three");
        let err = env_or::<usize>("RELIEF_TEST_TOP_K", 3).unwrap_err();
        assert!(err.to_string().contains("RELIEF_TEST_TOP_K"));
        std::env::remove_var("RELIEF_TEST_TOP_K");
    }

    #[test]
    #[ignore] // requires --test-threads=1 due to env var race
    fn test_config_defaults() {
        std::env::remove_var("RELIEF_CARGO_WEIGHT_KG");
        std::env::remove_var("RELIEF_ORIGIN_ID");

        let config = Config::from_env().unwrap();
        assert_eq!(config.params.cargo_weight, defaults::CARGO_WEIGHT_KG);
        assert!(config.origin_id.is_none());
    }
}
