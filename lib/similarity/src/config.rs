//! Tuning configuration for kinship building and file-similarity ranking
//!
//! Every weight, threshold and cutoff the scoring pipeline uses lives here so
//! it can be tuned per deployment. The defaults reproduce the production
//! values; all of them were chosen empirically.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Weights for the vector path: visual similarity dominates, metadata breaks ties
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct VectorWeights {
    #[serde(default = "default_visual_weight")]
    pub visual: f32,
    #[serde(default = "default_vector_medium_weight")]
    pub medium: f32,
    #[serde(default = "default_vector_year_weight")]
    pub year: f32,
}

fn default_visual_weight() -> f32 {
    0.8
}

fn default_vector_medium_weight() -> f32 {
    0.12
}

fn default_vector_year_weight() -> f32 {
    0.08
}

impl Default for VectorWeights {
    fn default() -> Self {
        Self {
            visual: default_visual_weight(),
            medium: default_vector_medium_weight(),
            year: default_vector_year_weight(),
        }
    }
}

/// Weights for the metadata-only fallback
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MetadataWeights {
    #[serde(default = "default_metadata_medium_weight")]
    pub medium: f32,
    #[serde(default = "default_metadata_year_weight")]
    pub year: f32,
}

fn default_metadata_medium_weight() -> f32 {
    0.6
}

fn default_metadata_year_weight() -> f32 {
    0.4
}

impl Default for MetadataWeights {
    fn default() -> Self {
        Self {
            medium: default_metadata_medium_weight(),
            year: default_metadata_year_weight(),
        }
    }
}

/// Kinship builder configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KinshipConfig {
    #[serde(default)]
    pub vector_weights: VectorWeights,

    #[serde(default)]
    pub metadata_weights: MetadataWeights,

    /// Candidates scoring at or below this are noise and are dropped
    #[serde(default = "default_min_score")]
    pub min_score: f32,
}

fn default_min_score() -> f32 {
    0.1
}

impl Default for KinshipConfig {
    fn default() -> Self {
        Self {
            vector_weights: VectorWeights::default(),
            metadata_weights: MetadataWeights::default(),
            min_score: default_min_score(),
        }
    }
}

impl KinshipConfig {
    /// Validate the configuration
    /// - Checks that weights are finite and non-negative
    /// - Normalizes each weight group to sum to 1.0 if it doesn't
    /// - Checks the relevance threshold lies in [0, 1)
    pub fn validate_and_normalize(&mut self) -> Result<(), ConfigError> {
        let v = &mut self.vector_weights;
        let [visual, medium, year] =
            normalize_group("vector_weights", [("visual", v.visual), ("medium", v.medium), ("year", v.year)])?;
        *v = VectorWeights { visual, medium, year };

        let m = &mut self.metadata_weights;
        let [medium, year] = normalize_group("metadata_weights", [("medium", m.medium), ("year", m.year)])?;
        *m = MetadataWeights { medium, year };

        if !self.min_score.is_finite() || !(0.0..1.0).contains(&self.min_score) {
            return Err(ConfigError::InvalidThreshold(self.min_score));
        }

        Ok(())
    }
}

fn normalize_group<const N: usize>(
    group: &'static str,
    weights: [(&'static str, f32); N],
) -> Result<[f32; N], ConfigError> {
    for (name, weight) in weights {
        if !weight.is_finite() || weight < 0.0 {
            return Err(ConfigError::NegativeWeight(format!("{}.{}", group, name)));
        }
    }

    let sum: f32 = weights.iter().map(|(_, w)| w).sum();
    if sum <= 0.0 {
        return Err(ConfigError::ZeroTotalWeight(group));
    }

    let mut out = weights.map(|(_, w)| w);
    if (sum - 1.0).abs() > 0.001 {
        for w in &mut out {
            *w /= sum;
        }
    }
    Ok(out)
}

/// File-similarity ranker configuration
///
/// Scores and cutoffs are integer percentages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankerConfig {
    /// Lower bound of the high tier (inclusive)
    #[serde(default = "default_high_cutoff")]
    pub high_cutoff: u32,

    /// Lower bound of the moderate tier (inclusive)
    #[serde(default = "default_moderate_cutoff")]
    pub moderate_cutoff: u32,

    /// Lower bound of the distant tier (inclusive); anything below is dropped
    #[serde(default = "default_distant_cutoff")]
    pub distant_cutoff: u32,

    /// Maximum entries kept per tier
    #[serde(default = "default_tier_limit")]
    pub tier_limit: usize,

    /// Type-match score when file types are identical
    #[serde(default = "default_exact_type_score")]
    pub exact_type_score: u32,

    /// Type-match score when both types are code-like
    #[serde(default = "default_code_like_score")]
    pub code_like_score: u32,

    /// Type-match score for everything else
    #[serde(default = "default_fallback_score")]
    pub fallback_score: u32,

    /// File types treated as "living code"
    #[serde(default = "default_code_like_types")]
    pub code_like_types: Vec<String>,
}

fn default_high_cutoff() -> u32 {
    70
}

fn default_moderate_cutoff() -> u32 {
    40
}

fn default_distant_cutoff() -> u32 {
    15
}

fn default_tier_limit() -> usize {
    5
}

fn default_exact_type_score() -> u32 {
    60
}

fn default_code_like_score() -> u32 {
    55
}

fn default_fallback_score() -> u32 {
    10
}

fn default_code_like_types() -> Vec<String> {
    vec!["html".to_string(), "htm".to_string(), "js".to_string()]
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            high_cutoff: default_high_cutoff(),
            moderate_cutoff: default_moderate_cutoff(),
            distant_cutoff: default_distant_cutoff(),
            tier_limit: default_tier_limit(),
            exact_type_score: default_exact_type_score(),
            code_like_score: default_code_like_score(),
            fallback_score: default_fallback_score(),
            code_like_types: default_code_like_types(),
        }
    }
}

impl RankerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.high_cutoff > 100 {
            return Err(ConfigError::OutOfRange("high_cutoff", self.high_cutoff));
        }
        if !(self.high_cutoff > self.moderate_cutoff && self.moderate_cutoff > self.distant_cutoff) {
            return Err(ConfigError::CutoffOrder {
                high: self.high_cutoff,
                moderate: self.moderate_cutoff,
                distant: self.distant_cutoff,
            });
        }
        if self.tier_limit == 0 {
            return Err(ConfigError::ZeroTierLimit);
        }
        for (name, score) in [
            ("exact_type_score", self.exact_type_score),
            ("code_like_score", self.code_like_score),
            ("fallback_score", self.fallback_score),
        ] {
            if score > 100 {
                return Err(ConfigError::OutOfRange(name, score));
            }
        }
        Ok(())
    }

    /// Whether `file_type` belongs to the code-like set
    pub fn is_code_like(&self, file_type: &str) -> bool {
        self.code_like_types.iter().any(|t| t.eq_ignore_ascii_case(file_type))
    }
}

/// Complete engine settings, loadable from a JSON file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub kinship: KinshipConfig,

    #[serde(default)]
    pub ranking: RankerConfig,
}

impl Settings {
    /// Load, validate and normalize settings from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::from_json(&raw)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut settings: Settings =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate_and_normalize()?;
        Ok(settings)
    }

    pub fn validate_and_normalize(&mut self) -> Result<(), ConfigError> {
        self.kinship.validate_and_normalize()?;
        self.ranking.validate()
    }
}

/// Errors that can occur during configuration loading and validation
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Weight '{0}' must be finite and non-negative")]
    NegativeWeight(String),

    #[error("Total weight of '{0}' cannot be zero")]
    ZeroTotalWeight(&'static str),

    #[error("Relevance threshold must lie in [0, 1), got {0}")]
    InvalidThreshold(f32),

    #[error("Tier cutoffs must be strictly descending, got high={high} moderate={moderate} distant={distant}")]
    CutoffOrder { high: u32, moderate: u32, distant: u32 },

    #[error("'{0}' must be a percentage in [0, 100], got {1}")]
    OutOfRange(&'static str, u32),

    #[error("Tier limit must be at least 1")]
    ZeroTierLimit,

    #[error("Cannot read configuration: {0}")]
    Io(String),

    #[error("Cannot parse configuration: {0}")]
    Parse(String),
}

impl From<ConfigError> for kinship_core::Error {
    fn from(e: ConfigError) -> Self {
        kinship_core::Error::InvalidConfig(e.to_string())
    }
}
