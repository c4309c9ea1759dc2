use crate::workflows::screening::{InvalidScoringConfig, Salt, ScoringConfig};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_PRESET: &str = "finance_optimized";

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }

    /// Filter used when `RFS_LOG_LEVEL` is unset.
    pub const fn default_log_level(self) -> &'static str {
        match self {
            Self::Development => "debug",
            Self::Test => "warn",
            Self::Production => "info",
        }
    }
}

/// Top-level configuration for a scoring or join run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub salt: Salt,
    pub scoring: ScoringSource,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("RFS_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("RFS_LOG_LEVEL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| environment.default_log_level().to_string());

        let salt = env::var("RFS_SALT").unwrap_or_default();
        let salt = Salt::new(salt).map_err(|_| ConfigError::MissingSalt)?;

        let scoring = match env::var("RFS_SCORING_CONFIG") {
            Ok(path) if !path.trim().is_empty() => ScoringSource::File(PathBuf::from(path.trim())),
            _ => ScoringSource::Preset(
                env::var("RFS_PRESET").unwrap_or_else(|_| DEFAULT_PRESET.to_string()),
            ),
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig {
                environment,
                log_level,
            },
            salt,
            scoring,
        })
    }
}

/// Where the scoring configuration for a run comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoringSource {
    Preset(String),
    File(PathBuf),
}

impl ScoringSource {
    /// Resolve the source into a validated scoring configuration.
    pub fn resolve(&self) -> Result<ScoringConfig, ConfigError> {
        let config = match self {
            ScoringSource::Preset(key) => ScoringConfig::preset(key)
                .ok_or_else(|| ConfigError::UnknownPreset(key.clone()))?,
            ScoringSource::File(path) => load_scoring_file(path)?,
        };
        config.validate()?;
        Ok(config)
    }
}

fn load_scoring_file(path: &Path) -> Result<ScoringConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ScoringFile {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::ScoringFormat {
        path: path.to_path_buf(),
        source,
    })
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub environment: AppEnvironment,
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingSalt,
    UnknownPreset(String),
    ScoringFile {
        path: PathBuf,
        source: std::io::Error,
    },
    ScoringFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidScoring(InvalidScoringConfig),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingSalt => write!(f, "RFS_SALT must be set to a non-empty secret"),
            ConfigError::UnknownPreset(key) => {
                write!(
                    f,
                    "unknown preset '{}' (available: {})",
                    key,
                    ScoringConfig::preset_keys().join(", ")
                )
            }
            ConfigError::ScoringFile { path, .. } => {
                write!(f, "unable to read scoring config {}", path.display())
            }
            ConfigError::ScoringFormat { path, source } => {
                write!(f, "invalid scoring config {}: {}", path.display(), source)
            }
            ConfigError::InvalidScoring(err) => write!(f, "invalid scoring config: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::MissingSalt | ConfigError::UnknownPreset(_) => None,
            ConfigError::ScoringFile { source, .. } => Some(source),
            ConfigError::ScoringFormat { source, .. } => Some(source),
            ConfigError::InvalidScoring(err) => Some(err),
        }
    }
}

impl From<InvalidScoringConfig> for ConfigError {
    fn from(value: InvalidScoringConfig) -> Self {
        Self::InvalidScoring(value)
    }
}
