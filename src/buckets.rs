//! Named bucket classification for rank positions, competition scores, and
//! spam scores.
//!
//! Every bucketing function here is total over its declared domain: it never
//! panics and always returns a named bucket. Threshold constants live in this
//! module only, so every consumer applies identical boundaries.

use serde::{Deserialize, Serialize};

use crate::core::PositionHistogram;

/// Competition score below which a keyword is LOW competition.
pub const COMPETITION_LOW_MAX: f64 = 0.33;
/// Competition score below which a keyword is MEDIUM competition.
/// Boundary values belong to the higher band: 0.33 is MEDIUM, 0.66 is HIGH.
pub const COMPETITION_MEDIUM_MAX: f64 = 0.66;

/// Spam score at or above which a backlink is high risk.
pub const SPAM_HIGH_RISK_MIN: u8 = 70;
/// Spam score at or above which a backlink is moderate risk.
pub const SPAM_MODERATE_RISK_MIN: u8 = 40;

/// Exact SERP rank band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RankBucket {
    Top3,
    Top10,
    Top20,
    Top50,
    Top100,
    Beyond100,
}

impl RankBucket {
    pub fn label(&self) -> &'static str {
        match self {
            RankBucket::Top3 => "top3",
            RankBucket::Top10 => "top10",
            RankBucket::Top20 => "top20",
            RankBucket::Top50 => "top50",
            RankBucket::Top100 => "top100",
            RankBucket::Beyond100 => "beyond100",
        }
    }
}

/// Competition level derived from a continuous 0-1 competition score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CompetitionBucket {
    Unknown,
    Low,
    Medium,
    High,
}

impl CompetitionBucket {
    pub fn label(&self) -> &'static str {
        match self {
            CompetitionBucket::Unknown => "UNKNOWN",
            CompetitionBucket::Low => "LOW",
            CompetitionBucket::Medium => "MEDIUM",
            CompetitionBucket::High => "HIGH",
        }
    }
}

/// Spam-score risk band for a backlink's source domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpamRiskBucket {
    LowRisk,
    ModerateRisk,
    HighRisk,
}

impl SpamRiskBucket {
    pub fn label(&self) -> &'static str {
        match self {
            SpamRiskBucket::LowRisk => "LOW_RISK",
            SpamRiskBucket::ModerateRisk => "MODERATE_RISK",
            SpamRiskBucket::HighRisk => "HIGH_RISK",
        }
    }
}

/// Classify a SERP position into its exact rank band.
///
/// `None` means the record is not ranked and lands beyond the tracked
/// horizon, the same placement the sort pipeline's missing-rank default
/// produces.
pub fn rank_bucket(position: Option<u32>) -> RankBucket {
    match position {
        // Providers use 0 for "no position"; treat it like unranked.
        None | Some(0) => RankBucket::Beyond100,
        Some(p) if p <= 3 => RankBucket::Top3,
        Some(p) if p <= 10 => RankBucket::Top10,
        Some(p) if p <= 20 => RankBucket::Top20,
        Some(p) if p <= 50 => RankBucket::Top50,
        Some(p) if p <= 100 => RankBucket::Top100,
        _ => RankBucket::Beyond100,
    }
}

/// Classify a 0-1 competition score into a named level.
///
/// Absent scores are `Unknown`; out-of-range scores are clamped into [0,1]
/// before bucketing rather than rejected. Boundary values belong to the
/// higher band: exactly 0.33 is `Medium`, exactly 0.66 is `High`.
pub fn competition_bucket(score: Option<f64>) -> CompetitionBucket {
    let Some(score) = score else {
        return CompetitionBucket::Unknown;
    };
    if score.is_nan() {
        return CompetitionBucket::Unknown;
    }

    let score = score.clamp(0.0, 1.0);
    if score < COMPETITION_LOW_MAX {
        CompetitionBucket::Low
    } else if score < COMPETITION_MEDIUM_MAX {
        CompetitionBucket::Medium
    } else {
        CompetitionBucket::High
    }
}

/// Classify a 0-100 spam score into a risk band. Scores above 100 are
/// clamped before bucketing.
pub fn spam_score_bucket(score: u8) -> SpamRiskBucket {
    let score = score.min(100);
    if score >= SPAM_HIGH_RISK_MIN {
        SpamRiskBucket::HighRisk
    } else if score >= SPAM_MODERATE_RISK_MIN {
        SpamRiskBucket::ModerateRisk
    } else {
        SpamRiskBucket::LowRisk
    }
}

/// Keywords ranking at position `threshold` or better.
///
/// Total over all thresholds: at the standard cut points (3, 10, 20, 50,
/// 100) this equals the histogram's cumulative accessors, i.e. the sum of
/// every exact band at or above the threshold. Between cut points the count
/// rounds down to the last fully contained band, since a band cannot be
/// split.
pub fn count_at_or_above(histogram: &PositionHistogram, threshold: u32) -> u64 {
    let mut count = 0;
    if threshold >= 1 {
        count += histogram.pos_1;
    }
    if threshold >= 3 {
        count += histogram.pos_2_3;
    }
    if threshold >= 10 {
        count += histogram.pos_4_10;
    }
    if threshold >= 20 {
        count += histogram.pos_11_20;
    }
    if threshold >= 30 {
        count += histogram.pos_21_30;
    }
    if threshold >= 40 {
        count += histogram.pos_31_40;
    }
    if threshold >= 50 {
        count += histogram.pos_41_50;
    }
    if threshold >= 60 {
        count += histogram.pos_51_60;
    }
    if threshold >= 70 {
        count += histogram.pos_61_70;
    }
    if threshold >= 80 {
        count += histogram.pos_71_80;
    }
    if threshold >= 90 {
        count += histogram.pos_81_90;
    }
    if threshold >= 100 {
        count += histogram.pos_91_100;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_bucket_band_boundaries() {
        assert_eq!(rank_bucket(Some(1)), RankBucket::Top3);
        assert_eq!(rank_bucket(Some(3)), RankBucket::Top3);
        assert_eq!(rank_bucket(Some(4)), RankBucket::Top10);
        assert_eq!(rank_bucket(Some(10)), RankBucket::Top10);
        assert_eq!(rank_bucket(Some(11)), RankBucket::Top20);
        assert_eq!(rank_bucket(Some(20)), RankBucket::Top20);
        assert_eq!(rank_bucket(Some(50)), RankBucket::Top50);
        assert_eq!(rank_bucket(Some(100)), RankBucket::Top100);
        assert_eq!(rank_bucket(Some(101)), RankBucket::Beyond100);
    }

    #[test]
    fn unranked_and_zero_positions_land_beyond_horizon() {
        assert_eq!(rank_bucket(None), RankBucket::Beyond100);
        assert_eq!(rank_bucket(Some(0)), RankBucket::Beyond100);
    }

    #[test]
    fn competition_boundaries_belong_to_higher_band() {
        assert_eq!(competition_bucket(Some(0.0)), CompetitionBucket::Low);
        assert_eq!(competition_bucket(Some(0.32)), CompetitionBucket::Low);
        assert_eq!(competition_bucket(Some(0.33)), CompetitionBucket::Medium);
        assert_eq!(competition_bucket(Some(0.65)), CompetitionBucket::Medium);
        assert_eq!(competition_bucket(Some(0.66)), CompetitionBucket::High);
        assert_eq!(competition_bucket(Some(1.0)), CompetitionBucket::High);
    }

    #[test]
    fn absent_competition_score_is_unknown() {
        assert_eq!(competition_bucket(None), CompetitionBucket::Unknown);
        assert_eq!(competition_bucket(Some(f64::NAN)), CompetitionBucket::Unknown);
    }

    #[test]
    fn out_of_range_competition_scores_are_clamped() {
        assert_eq!(competition_bucket(Some(-0.5)), CompetitionBucket::Low);
        assert_eq!(competition_bucket(Some(1.5)), CompetitionBucket::High);
    }

    #[test]
    fn spam_risk_boundaries() {
        assert_eq!(spam_score_bucket(0), SpamRiskBucket::LowRisk);
        assert_eq!(spam_score_bucket(39), SpamRiskBucket::LowRisk);
        assert_eq!(spam_score_bucket(40), SpamRiskBucket::ModerateRisk);
        assert_eq!(spam_score_bucket(69), SpamRiskBucket::ModerateRisk);
        assert_eq!(spam_score_bucket(70), SpamRiskBucket::HighRisk);
        assert_eq!(spam_score_bucket(100), SpamRiskBucket::HighRisk);
    }

    fn uniform_histogram() -> PositionHistogram {
        let mut histogram = PositionHistogram::new();
        for position in 1..=100 {
            histogram.record(position);
        }
        histogram
    }

    #[test]
    fn count_at_or_above_matches_cumulative_accessors_at_cut_points() {
        let histogram = uniform_histogram();
        assert_eq!(count_at_or_above(&histogram, 3), histogram.top3());
        assert_eq!(count_at_or_above(&histogram, 10), histogram.top10());
        assert_eq!(count_at_or_above(&histogram, 20), histogram.top20());
        assert_eq!(count_at_or_above(&histogram, 50), histogram.top50());
        assert_eq!(count_at_or_above(&histogram, 100), histogram.top100());
    }

    #[test]
    fn count_at_or_above_sums_fully_contained_bands_between_cut_points() {
        let histogram = uniform_histogram();
        // 1 and 2-3 fit under 5; the 4-10 band does not.
        assert_eq!(count_at_or_above(&histogram, 5), 3);
        // 21-30 and 31-40 fit under 45; 41-50 does not.
        assert_eq!(count_at_or_above(&histogram, 45), 40);
    }

    #[test]
    fn count_at_or_above_is_total_at_the_edges() {
        let histogram = uniform_histogram();
        assert_eq!(count_at_or_above(&histogram, 0), 0);
        assert_eq!(count_at_or_above(&histogram, 1), 1);
        assert_eq!(count_at_or_above(&histogram, 10_000), 100);
    }

    #[test]
    fn bucket_labels_match_reporting_names() {
        assert_eq!(RankBucket::Beyond100.label(), "beyond100");
        assert_eq!(CompetitionBucket::Unknown.label(), "UNKNOWN");
        assert_eq!(SpamRiskBucket::HighRisk.label(), "HIGH_RISK");
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn competition_bucket_is_low_iff_below_low_threshold(score in 0.0..1.0f64) {
            let bucket = competition_bucket(Some(score));
            prop_assert_eq!(bucket == CompetitionBucket::Low, score < COMPETITION_LOW_MAX);
        }

        #[test]
        fn competition_bucket_is_total(score in -100.0..100.0f64) {
            // Never panics, never Unknown for a present finite score.
            prop_assert_ne!(competition_bucket(Some(score)), CompetitionBucket::Unknown);
        }

        #[test]
        fn count_at_or_above_is_monotone_in_the_threshold(
            positions in proptest::collection::vec(1u32..=100, 0..200),
            low in 0u32..200,
            high in 0u32..200,
        ) {
            let mut histogram = PositionHistogram::new();
            for position in positions {
                histogram.record(position);
            }
            let (low, high) = (low.min(high), low.max(high));
            prop_assert!(count_at_or_above(&histogram, low) <= count_at_or_above(&histogram, high));
        }

        #[test]
        fn rank_buckets_partition_positions(position in 1u32..1000) {
            let bucket = rank_bucket(Some(position));
            let expected = match position {
                1..=3 => RankBucket::Top3,
                4..=10 => RankBucket::Top10,
                11..=20 => RankBucket::Top20,
                21..=50 => RankBucket::Top50,
                51..=100 => RankBucket::Top100,
                _ => RankBucket::Beyond100,
            };
            prop_assert_eq!(bucket, expected);
        }
    }
}
