//! Routing configuration
//!
//! Values resolve in this order (later wins): defaults, optional TOML file,
//! `HITL_*` environment variables. Binaries apply CLI overrides on top and
//! call [`RoutingConfig::validate`] before building the coordinator.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::aggregation::VotingStrategy;
use crate::state::Label;

/// Default confidence above which the model answer is accepted directly
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.9;

/// Default number of votes required before aggregation may resolve
pub const DEFAULT_MIN_VOTES: usize = 3;

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Confidence threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f32),

    #[error("min_votes must be at least 1")]
    InvalidMinVotes,

    #[error("Weight for {label} must be finite and non-negative, got {value}")]
    InvalidWeight { label: Label, value: f32 },

    #[error("Unknown voting strategy: {0}")]
    UnknownStrategy(String),

    #[error("Invalid value for {var}: {value}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Per-label weights used by the weighted voting strategy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelWeights {
    pub positive: f32,
    pub negative: f32,
    pub neutral: f32,
}

impl LabelWeights {
    pub fn weight(&self, label: Label) -> f32 {
        match label {
            Label::Positive => self.positive,
            Label::Negative => self.negative,
            Label::Neutral => self.neutral,
        }
    }

    /// Reject weights that would make weighted tallies meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        for label in Label::all().iter().copied() {
            let value = self.weight(label);
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { label, value });
            }
        }
        Ok(())
    }
}

impl Default for LabelWeights {
    fn default() -> Self {
        Self {
            positive: 1.0,
            negative: 1.0,
            neutral: 0.5, // Abstention-like votes count for less
        }
    }
}

/// Configuration consumed by the review coordinator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Model answers strictly above this confidence skip human review
    pub confidence_threshold: f32,
    /// Minimum votes before aggregation may resolve a task
    pub min_votes: usize,
    /// Aggregation strategy for reviewer votes
    pub strategy: VotingStrategy,
    /// Weights for `VotingStrategy::Weighted`
    pub label_weights: LabelWeights,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            min_votes: DEFAULT_MIN_VOTES,
            strategy: VotingStrategy::Majority,
            label_weights: LabelWeights::default(),
        }
    }
}

impl RoutingConfig {
    /// Load from an optional TOML file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        config.with_env_overrides()
    }

    /// Parse a TOML file; missing keys take their defaults
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Defaults with `HITL_*` environment overrides applied
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// Apply `HITL_CONFIDENCE_THRESHOLD`, `HITL_MIN_VOTES` and
    /// `HITL_VOTING_STRATEGY` when set
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|var| std::env::var(var).ok())
    }

    fn with_overrides_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(value) = lookup("HITL_CONFIDENCE_THRESHOLD") {
            self.confidence_threshold =
                value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                    var: "HITL_CONFIDENCE_THRESHOLD",
                    value,
                })?;
        }
        if let Some(value) = lookup("HITL_MIN_VOTES") {
            self.min_votes = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: "HITL_MIN_VOTES",
                value,
            })?;
        }
        if let Some(value) = lookup("HITL_VOTING_STRATEGY") {
            self.strategy = value.parse()?;
        }
        Ok(self)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(ConfigError::InvalidThreshold(self.confidence_threshold));
        }
        if self.min_votes < 1 {
            return Err(ConfigError::InvalidMinVotes);
        }
        self.label_weights.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = RoutingConfig::default();
        assert!((config.confidence_threshold - 0.9).abs() < f32::EPSILON);
        assert_eq!(config.min_votes, 3);
        assert_eq!(config.strategy, VotingStrategy::Majority);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_ranges() {
        let config = RoutingConfig {
            confidence_threshold: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThreshold(_))
        ));

        let config = RoutingConfig {
            min_votes: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidMinVotes)));

        for (weights, bad) in [
            (
                LabelWeights {
                    positive: -1.0,
                    ..Default::default()
                },
                Label::Positive,
            ),
            (
                LabelWeights {
                    negative: f32::NAN,
                    ..Default::default()
                },
                Label::Negative,
            ),
            (
                LabelWeights {
                    neutral: f32::INFINITY,
                    ..Default::default()
                },
                Label::Neutral,
            ),
        ] {
            let config = RoutingConfig {
                label_weights: weights,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidWeight { label, .. }) if label == bad
            ));
        }

        // Zero mutes a label without breaking the tally
        let config = RoutingConfig {
            label_weights: LabelWeights {
                neutral: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_negative_weight_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "strategy = \"weighted\"\n\n[label_weights]\npositive = -1.0").unwrap();

        let config = RoutingConfig::from_toml_file(file.path()).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWeight {
                label: Label::Positive,
                ..
            })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("HITL_CONFIDENCE_THRESHOLD", "0.75"),
            ("HITL_MIN_VOTES", "5"),
            ("HITL_VOTING_STRATEGY", "unanimous"),
        ]
        .into_iter()
        .collect();

        let config = RoutingConfig::default()
            .with_overrides_from(|var| env.get(var).map(|v| v.to_string()))
            .unwrap();

        assert!((config.confidence_threshold - 0.75).abs() < f32::EPSILON);
        assert_eq!(config.min_votes, 5);
        assert_eq!(config.strategy, VotingStrategy::Unanimous);
    }

    #[test]
    fn test_env_bad_value() {
        let result = RoutingConfig::default().with_overrides_from(|var| {
            (var == "HITL_MIN_VOTES").then(|| "three".to_string())
        });
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnv {
                var: "HITL_MIN_VOTES",
                ..
            })
        ));
    }

    #[test]
    fn test_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
confidence_threshold = 0.8
strategy = "weighted"

[label_weights]
neutral = 0.25
"#
        )
        .unwrap();

        let config = RoutingConfig::from_toml_file(file.path()).unwrap();
        assert!((config.confidence_threshold - 0.8).abs() < f32::EPSILON);
        assert_eq!(config.min_votes, DEFAULT_MIN_VOTES);
        assert_eq!(config.strategy, VotingStrategy::Weighted);
        assert!((config.label_weights.neutral - 0.25).abs() < f32::EPSILON);
        assert!((config.label_weights.positive - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_toml_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "min_votes = \"many\"").unwrap();

        assert!(matches!(
            RoutingConfig::from_toml_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = RoutingConfig::from_toml_file(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
