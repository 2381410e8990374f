use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use survey_core::Dimension;
use survey_sampler::SamplingMode;
use thiserror::Error;

pub const DEFAULT_FILE_PATH_PREFIX: &str = "https://ik.imagekit.io/rndres1/dinou/";
pub const DEFAULT_COMPLETION_URL: &str =
    "https://app.prolific.co/submissions/complete?cc=CIU1JLTZ";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML configuration")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyConfig {
    pub dimension: Dimension,
    pub training_trials: usize,
    pub experiment_trials: usize,
    pub images_per_trial: usize,
    pub attention_checks: usize,
    pub save_points: usize,
    /// Images per cohort slice of the main catalog
    pub cohort_size: usize,
    pub cohort_count: u32,
    pub file_path_prefix: String,
    pub preload_timeout_ms: u64,
    pub completion_url: Option<String>,
    pub sampling: SamplingMode,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            dimension: Dimension::Desirability,
            training_trials: 3,
            experiment_trials: 84,
            images_per_trial: 4,
            attention_checks: 4,
            save_points: 4,
            cohort_size: 336,
            cohort_count: 5,
            file_path_prefix: DEFAULT_FILE_PATH_PREFIX.to_string(),
            preload_timeout_ms: 30_000,
            completion_url: Some(DEFAULT_COMPLETION_URL.to_string()),
            sampling: SamplingMode::Lenient,
        }
    }
}

impl SurveyConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: SurveyConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.images_per_trial == 0 {
            return Err(ConfigError::Invalid(
                "images_per_trial must be at least 1".into(),
            ));
        }
        if self.cohort_size == 0 || self.cohort_count == 0 {
            return Err(ConfigError::Invalid(
                "cohort_size and cohort_count must be at least 1".into(),
            ));
        }
        if self.cohort_span().is_none() {
            return Err(ConfigError::Invalid(format!(
                "{} cohorts of {} images overflow the catalog index",
                self.cohort_count, self.cohort_size
            )));
        }
        if self.sampling == SamplingMode::Strict && self.images_per_trial > self.cohort_size {
            return Err(ConfigError::Invalid(format!(
                "strict sampling needs images_per_trial ({}) <= cohort_size ({})",
                self.images_per_trial, self.cohort_size
            )));
        }
        Ok(())
    }

    /// Number of catalog entries the cohorts cover, `None` on overflow
    pub fn cohort_span(&self) -> Option<usize> {
        self.cohort_size.checked_mul(self.cohort_count as usize)
    }
}
