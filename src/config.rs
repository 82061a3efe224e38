//! Configuration management for job scout

use crate::error::{JobScoutError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub gates: GateConfig,
    pub scoring: ScoringConfig,
    pub matching: MatchingConfig,
    pub fetcher: FetcherConfig,
    pub output: OutputConfig,
}

/// Hard pass/fail thresholds applied before any composite scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    pub min_client_rating: f32,
    pub min_hourly_rate: f32,
    pub min_skill_match: f32,
    pub min_client_jobs: u32,
    pub min_client_review: f32,
    pub min_hire_rate: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub skill_weight: f32,
    pub client_weight: f32,
    pub rate_weight: f32,
    pub experience_weight: f32,
    /// Placeholder component until experience-years scaling lands.
    pub experience_component: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub provider: SimilarityBackend,
    /// JSON vocabulary file for the word-vector provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vectors_path: Option<PathBuf>,
    pub similarity_threshold: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityBackend {
    Vectors,
    Lexical,
    Exact,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    pub api_host: String,
    pub min_delay_secs: u64,
    pub max_retries: u32,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gates: GateConfig {
                min_client_rating: 4.0,
                min_hourly_rate: 15.0,
                min_skill_match: 0.5,
                min_client_jobs: 3,
                min_client_review: 4.0,
                min_hire_rate: 0.5,
            },
            scoring: ScoringConfig {
                skill_weight: 0.40,
                client_weight: 0.25,
                rate_weight: 0.25,
                experience_weight: 0.10,
                experience_component: 0.8,
            },
            matching: MatchingConfig {
                provider: SimilarityBackend::Lexical,
                vectors_path: None,
                similarity_threshold: 0.8,
            },
            fetcher: FetcherConfig {
                api_host: "upwork-jobs-api2.p.rapidapi.com".to_string(),
                min_delay_secs: 5,
                max_retries: 3,
                request_timeout_secs: 15,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| JobScoutError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| JobScoutError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("job-scout")
            .join("config.toml")
    }

    /// Default on-disk location of the profile store.
    pub fn store_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("job-scout")
            .join("store.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let config = Config::default();
        let total = config.scoring.skill_weight
            + config.scoring.client_weight
            + config.scoring.rate_weight
            + config.scoring.experience_weight;
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.gates.min_client_jobs, 3);
        assert_eq!(parsed.matching.provider, SimilarityBackend::Lexical);
        assert!((parsed.gates.min_hourly_rate - 15.0).abs() < f32::EPSILON);
    }
}
