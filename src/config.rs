//! Engine threshold configuration.
//!
//! Every magic number behind the opportunity rules lives here as a named,
//! serde-defaulted field, so callers can load overrides from their own
//! config files and every call site applies identical thresholds. The "Easy
//! Win" and "Quick Win" constants intentionally differ (volume >= 100 vs the
//! 500-5000 sweet spot): they are two distinct opportunity categories, not
//! one rule with drifted copies.

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

/// Threshold constants for the opportunity classifier rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunityThresholds {
    /// Easy Win: minimum monthly search volume.
    #[serde(default = "default_easy_win_min_volume")]
    pub easy_win_min_volume: u64,

    /// Easy Win: worst acceptable rank position.
    #[serde(default = "default_easy_win_max_rank")]
    pub easy_win_max_rank: u32,

    /// Easy Win: how many highest-volume matches to report per call.
    #[serde(default = "default_easy_win_cap")]
    pub easy_win_cap: usize,

    /// Quick Win: sweet-spot volume band, inclusive on both ends.
    #[serde(default = "default_quick_win_volume_min")]
    pub quick_win_volume_min: u64,
    #[serde(default = "default_quick_win_volume_max")]
    pub quick_win_volume_max: u64,

    /// Quick Win: difficulty must be strictly below this.
    #[serde(default = "default_quick_win_max_difficulty")]
    pub quick_win_max_difficulty: f64,

    /// Quick Win: minimum cost-per-click.
    #[serde(default = "default_quick_win_min_cpc")]
    pub quick_win_min_cpc: f64,

    /// High Value: minimum monthly search volume.
    #[serde(default = "default_high_value_min_volume")]
    pub high_value_min_volume: u64,

    /// High Value: difficulty band, inclusive on both ends.
    #[serde(default = "default_high_value_difficulty_min")]
    pub high_value_difficulty_min: f64,
    #[serde(default = "default_high_value_difficulty_max")]
    pub high_value_difficulty_max: f64,

    /// High Value: minimum cost-per-click.
    #[serde(default = "default_high_value_min_cpc")]
    pub high_value_min_cpc: f64,

    /// Avoid: volume strictly below this combined with high difficulty.
    #[serde(default = "default_avoid_max_volume")]
    pub avoid_max_volume: u64,

    /// Avoid: difficulty strictly above this.
    #[serde(default = "default_avoid_min_difficulty")]
    pub avoid_min_difficulty: f64,

    /// Avoid: zero-cpc keywords at or above this volume are flagged as
    /// informational-only.
    #[serde(default = "default_avoid_zero_cpc_min_volume")]
    pub avoid_zero_cpc_min_volume: u64,
}

fn default_easy_win_min_volume() -> u64 {
    100
}

fn default_easy_win_max_rank() -> u32 {
    20
}

fn default_easy_win_cap() -> usize {
    10
}

fn default_quick_win_volume_min() -> u64 {
    500
}

fn default_quick_win_volume_max() -> u64 {
    5_000
}

fn default_quick_win_max_difficulty() -> f64 {
    40.0
}

fn default_quick_win_min_cpc() -> f64 {
    0.5
}

fn default_high_value_min_volume() -> u64 {
    10_000
}

fn default_high_value_difficulty_min() -> f64 {
    50.0
}

fn default_high_value_difficulty_max() -> f64 {
    70.0
}

fn default_high_value_min_cpc() -> f64 {
    5.0
}

fn default_avoid_max_volume() -> u64 {
    50
}

fn default_avoid_min_difficulty() -> f64 {
    60.0
}

fn default_avoid_zero_cpc_min_volume() -> u64 {
    10_000
}

impl Default for OpportunityThresholds {
    fn default() -> Self {
        Self {
            easy_win_min_volume: default_easy_win_min_volume(),
            easy_win_max_rank: default_easy_win_max_rank(),
            easy_win_cap: default_easy_win_cap(),
            quick_win_volume_min: default_quick_win_volume_min(),
            quick_win_volume_max: default_quick_win_volume_max(),
            quick_win_max_difficulty: default_quick_win_max_difficulty(),
            quick_win_min_cpc: default_quick_win_min_cpc(),
            high_value_min_volume: default_high_value_min_volume(),
            high_value_difficulty_min: default_high_value_difficulty_min(),
            high_value_difficulty_max: default_high_value_difficulty_max(),
            high_value_min_cpc: default_high_value_min_cpc(),
            avoid_max_volume: default_avoid_max_volume(),
            avoid_min_difficulty: default_avoid_min_difficulty(),
            avoid_zero_cpc_min_volume: default_avoid_zero_cpc_min_volume(),
        }
    }
}

impl OpportunityThresholds {
    fn collect_validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.quick_win_volume_min > self.quick_win_volume_max {
            errors.push(format!(
                "quick win volume band is inverted ({}..{})",
                self.quick_win_volume_min, self.quick_win_volume_max
            ));
        }
        if self.high_value_difficulty_min > self.high_value_difficulty_max {
            errors.push(format!(
                "high value difficulty band is inverted ({}..{})",
                self.high_value_difficulty_min, self.high_value_difficulty_max
            ));
        }
        for (name, value) in [
            ("quick_win_max_difficulty", self.quick_win_max_difficulty),
            ("high_value_difficulty_min", self.high_value_difficulty_min),
            ("high_value_difficulty_max", self.high_value_difficulty_max),
            ("avoid_min_difficulty", self.avoid_min_difficulty),
        ] {
            if !(0.0..=100.0).contains(&value) {
                errors.push(format!("{} must be between 0 and 100, got {}", name, value));
            }
        }
        if self.quick_win_min_cpc < 0.0 || self.high_value_min_cpc < 0.0 {
            errors.push("cpc thresholds must be non-negative".to_string());
        }
        errors
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub opportunity: OpportunityThresholds,

    /// Length of every "top N by metric" leaderboard.
    #[serde(default = "default_leaderboard_size")]
    pub leaderboard_size: usize,
}

fn default_leaderboard_size() -> usize {
    10
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            opportunity: OpportunityThresholds::default(),
            leaderboard_size: default_leaderboard_size(),
        }
    }
}

impl EngineConfig {
    /// Validate all thresholds, reporting every problem at once.
    pub fn validate(&self) -> crate::errors::Result<()> {
        let mut errors = self.opportunity.collect_validation_errors();
        if self.leaderboard_size == 0 {
            errors.push("leaderboard_size must be at least 1".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(EngineError::InvalidConfig(errors.join("; ")))
        }
    }
}
