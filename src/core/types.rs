//! Normalized record shapes for the four ranking-data families.
//!
//! Records are constructed by the data-fetch layer from one provider-API
//! payload, live for the duration of a single aggregation call, and are never
//! mutated afterwards. All derived structures (stats, leaderboards,
//! classifications) are computed fresh from a record slice.
//!
//! Malformed numeric input is normalized rather than rejected: scores are
//! clamped into their documented domain and absent values fall back to 0 (or
//! an `Unknown` bucket on the categorical side), so one bad record never
//! aborts aggregation over a whole batch.

use serde::{Deserialize, Serialize};

/// Sort position assigned to records with no tracked ranking.
///
/// Unranked records (`rank_position: None`) sort after every ranked record in
/// ascending order and land in the `Beyond100` band. The same constant is
/// used by the sort pipeline and the histogram side so the two views never
/// disagree about where an unranked record belongs.
pub const UNRANKED_POSITION: u32 = 999;

/// A tracked keyword with its search-market metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRecord {
    pub keyword: String,
    pub search_volume: u64,
    /// Cost-per-click bid price; `None` when the provider has no bid data.
    pub cpc: Option<f64>,
    /// Competition score in [0,1]; `None` maps to the `Unknown` bucket.
    pub competition_score: Option<f64>,
    /// Keyword difficulty on a 0-100 scale.
    pub difficulty_score: Option<f64>,
    /// SERP position of the tracked site; `None` means not ranked (treated
    /// as position beyond 100 everywhere).
    pub rank_position: Option<u32>,
    /// Provider-supplied traffic value. `None` or 0 means the value must be
    /// estimated from volume, position, and cpc.
    pub estimated_traffic_value: Option<f64>,
}

impl KeywordRecord {
    /// Position used for sorting and histogram placement: the tracked rank,
    /// or [`UNRANKED_POSITION`] when the keyword is not ranked. Providers use
    /// 0 for "no position"; it reads as unranked here, matching where the
    /// bucket side places it.
    pub fn sort_position(&self) -> u32 {
        match self.rank_position {
            Some(position) if position >= 1 => position,
            _ => UNRANKED_POSITION,
        }
    }

    /// Clamp out-of-domain numeric fields into their documented ranges.
    pub fn normalized(mut self) -> Self {
        self.cpc = self.cpc.map(|c| c.max(0.0));
        self.competition_score = self.competition_score.map(|s| s.clamp(0.0, 1.0));
        self.difficulty_score = self.difficulty_score.map(|d| d.clamp(0.0, 100.0));
        self.estimated_traffic_value = self.estimated_traffic_value.map(|v| v.max(0.0));
        self
    }
}

/// A single backlink pointing at the tracked site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacklinkRecord {
    pub source_domain: String,
    pub source_domain_rank: u32,
    pub page_rank: u32,
    /// Spam score on a 0-100 scale.
    pub spam_score: u8,
    pub is_dofollow: bool,
    pub is_new: bool,
    pub is_lost: bool,
    pub is_broken: bool,
    pub anchor_text: Option<String>,
    pub country_code: Option<String>,
    pub top_level_domain: Option<String>,
}

impl BacklinkRecord {
    pub fn normalized(mut self) -> Self {
        self.spam_score = self.spam_score.min(100);
        self
    }
}

/// A competitor domain sharing keywords with the tracked site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorDomainRecord {
    pub domain: String,
    /// Number of keywords both sites rank for ("intersections").
    pub shared_keyword_count: u64,
    pub organic_keyword_count: u64,
    pub estimated_traffic_value: f64,
    pub average_rank_position: f64,
    pub position_histogram: PositionHistogram,
}

impl CompetitorDomainRecord {
    pub fn normalized(mut self) -> Self {
        self.estimated_traffic_value = self.estimated_traffic_value.max(0.0);
        self.average_rank_position = self.average_rank_position.max(0.0);
        self
    }
}

/// One point-in-time snapshot of a domain's organic search footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainMetricSnapshot {
    pub keyword_count: u64,
    pub traffic_value_estimate: f64,
    pub ad_spend_equivalent: f64,
    pub position_histogram: PositionHistogram,
    pub trend_counters: TrendCounters,
}

impl DomainMetricSnapshot {
    pub fn normalized(mut self) -> Self {
        self.traffic_value_estimate = self.traffic_value_estimate.max(0.0);
        self.ad_spend_equivalent = self.ad_spend_equivalent.max(0.0);
        self
    }
}

/// Keyword movement counters between two snapshots.
///
/// Each field counts keywords, not traffic deltas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendCounters {
    pub new: u64,
    pub improved: u64,
    pub declined: u64,
    pub lost: u64,
}

impl TrendCounters {
    /// Field-wise sum of two counter sets.
    pub fn merged(self, other: TrendCounters) -> TrendCounters {
        TrendCounters {
            new: self.new + other.new,
            improved: self.improved + other.improved,
            declined: self.declined + other.declined,
            lost: self.lost + other.lost,
        }
    }
}

/// Keyword counts across the 12 standard SERP position bands.
///
/// The cumulative views (`top3()` through `top100()`) are computed from the
/// exact bands on every call, so the monotonicity invariant
/// `top100 >= top50 >= top20 >= top10 >= top3` holds by construction.
///
/// Competitor payloads that only carry the first five bands (1, 2-3, 4-10,
/// 11-20, 21-30) use this same type with the tail bands left at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionHistogram {
    pub pos_1: u64,
    pub pos_2_3: u64,
    pub pos_4_10: u64,
    pub pos_11_20: u64,
    pub pos_21_30: u64,
    pub pos_31_40: u64,
    pub pos_41_50: u64,
    pub pos_51_60: u64,
    pub pos_61_70: u64,
    pub pos_71_80: u64,
    pub pos_81_90: u64,
    pub pos_91_100: u64,
}

impl PositionHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one observation at `position`. Positions outside 1-100 (and the
    /// unranked sentinel) fall outside every band and are ignored.
    pub fn record(&mut self, position: u32) {
        match position {
            1 => self.pos_1 += 1,
            2..=3 => self.pos_2_3 += 1,
            4..=10 => self.pos_4_10 += 1,
            11..=20 => self.pos_11_20 += 1,
            21..=30 => self.pos_21_30 += 1,
            31..=40 => self.pos_31_40 += 1,
            41..=50 => self.pos_41_50 += 1,
            51..=60 => self.pos_51_60 += 1,
            61..=70 => self.pos_61_70 += 1,
            71..=80 => self.pos_71_80 += 1,
            81..=90 => self.pos_81_90 += 1,
            91..=100 => self.pos_91_100 += 1,
            _ => {}
        }
    }

    /// Keywords ranking in positions 1-3.
    pub fn top3(&self) -> u64 {
        self.pos_1 + self.pos_2_3
    }

    /// Keywords ranking in positions 1-10.
    pub fn top10(&self) -> u64 {
        self.top3() + self.pos_4_10
    }

    /// Keywords ranking in positions 1-20.
    pub fn top20(&self) -> u64 {
        self.top10() + self.pos_11_20
    }

    /// Keywords ranking in positions 1-50.
    pub fn top50(&self) -> u64 {
        self.top20() + self.pos_21_30 + self.pos_31_40 + self.pos_41_50
    }

    /// Keywords ranking anywhere in the tracked 1-100 horizon.
    pub fn top100(&self) -> u64 {
        self.top50()
            + self.pos_51_60
            + self.pos_61_70
            + self.pos_71_80
            + self.pos_81_90
            + self.pos_91_100
    }

    /// Band-wise sum of two histograms.
    pub fn merged(self, other: PositionHistogram) -> PositionHistogram {
        PositionHistogram {
            pos_1: self.pos_1 + other.pos_1,
            pos_2_3: self.pos_2_3 + other.pos_2_3,
            pos_4_10: self.pos_4_10 + other.pos_4_10,
            pos_11_20: self.pos_11_20 + other.pos_11_20,
            pos_21_30: self.pos_21_30 + other.pos_21_30,
            pos_31_40: self.pos_31_40 + other.pos_31_40,
            pos_41_50: self.pos_41_50 + other.pos_41_50,
            pos_51_60: self.pos_51_60 + other.pos_51_60,
            pos_61_70: self.pos_61_70 + other.pos_61_70,
            pos_71_80: self.pos_71_80 + other.pos_71_80,
            pos_81_90: self.pos_81_90 + other.pos_81_90,
            pos_91_100: self.pos_91_100 + other.pos_91_100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_1_to_100() -> PositionHistogram {
        let mut histogram = PositionHistogram::new();
        for position in 1..=100 {
            histogram.record(position);
        }
        histogram
    }

    #[test]
    fn histogram_cumulative_counts_match_uniform_distribution() {
        let histogram = uniform_1_to_100();
        assert_eq!(histogram.top3(), 3);
        assert_eq!(histogram.top10(), 10);
        assert_eq!(histogram.top20(), 20);
        assert_eq!(histogram.top50(), 50);
        assert_eq!(histogram.top100(), 100);
    }

    #[test]
    fn histogram_cumulative_counts_are_monotone() {
        let mut histogram = PositionHistogram::new();
        for position in [1, 2, 7, 15, 44, 83, 99] {
            histogram.record(position);
        }
        assert!(histogram.top3() <= histogram.top10());
        assert!(histogram.top10() <= histogram.top20());
        assert!(histogram.top20() <= histogram.top50());
        assert!(histogram.top50() <= histogram.top100());
    }

    #[test]
    fn histogram_ignores_positions_beyond_horizon() {
        let mut histogram = PositionHistogram::new();
        histogram.record(101);
        histogram.record(0);
        histogram.record(UNRANKED_POSITION);
        assert_eq!(histogram.top100(), 0);
    }

    #[test]
    fn histogram_merge_sums_bands() {
        let a = uniform_1_to_100();
        let b = uniform_1_to_100();
        let merged = a.merged(b);
        assert_eq!(merged.top10(), 20);
        assert_eq!(merged.top100(), 200);
    }

    #[test]
    fn keyword_normalization_clamps_scores() {
        let record = KeywordRecord {
            keyword: "clamped".into(),
            search_volume: 10,
            cpc: Some(-1.0),
            competition_score: Some(1.7),
            difficulty_score: Some(140.0),
            rank_position: Some(5),
            estimated_traffic_value: Some(-20.0),
        }
        .normalized();

        assert_eq!(record.cpc, Some(0.0));
        assert_eq!(record.competition_score, Some(1.0));
        assert_eq!(record.difficulty_score, Some(100.0));
        assert_eq!(record.estimated_traffic_value, Some(0.0));
    }

    #[test]
    fn unranked_keyword_sorts_after_tracked_horizon() {
        let record = KeywordRecord {
            keyword: "unranked".into(),
            search_volume: 10,
            cpc: None,
            competition_score: None,
            difficulty_score: None,
            rank_position: None,
            estimated_traffic_value: None,
        };
        assert!(record.sort_position() > 100);
    }

    #[test]
    fn provider_zero_rank_reads_as_unranked() {
        let record = KeywordRecord {
            keyword: "no position".into(),
            search_volume: 10,
            cpc: None,
            competition_score: None,
            difficulty_score: None,
            rank_position: Some(0),
            estimated_traffic_value: None,
        };
        assert_eq!(record.sort_position(), UNRANKED_POSITION);
    }
}
