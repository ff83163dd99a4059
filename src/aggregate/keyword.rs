//! Single-pass aggregation over keyword records.

use std::collections::BTreeMap;

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::aggregate::leaderboard::{build_leaderboards, MetricSpec};
use crate::buckets::{competition_bucket, rank_bucket, CompetitionBucket, RankBucket};
use crate::config::EngineConfig;
use crate::core::metrics::guarded_mean;
use crate::core::KeywordRecord;
use crate::estimator::effective_traffic_value;
use crate::pipeline::{KeywordSortKey, SortDirection};

/// Leaderboard metric names for keyword stats.
pub const BY_SEARCH_VOLUME: &str = "search_volume";
pub const BY_TRAFFIC_VALUE: &str = "traffic_value";
pub const BY_RANK_CLOSENESS: &str = "rank_closeness";

/// Exact-band rank counts with cumulative views.
///
/// Exact bands are mutually exclusive; the `within_*` accessors are the
/// cumulative sums and therefore monotone by construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankDistribution {
    pub top3: u64,
    pub top10: u64,
    pub top20: u64,
    pub top50: u64,
    pub top100: u64,
    pub beyond100: u64,
}

impl RankDistribution {
    fn count(&mut self, bucket: RankBucket) {
        match bucket {
            RankBucket::Top3 => self.top3 += 1,
            RankBucket::Top10 => self.top10 += 1,
            RankBucket::Top20 => self.top20 += 1,
            RankBucket::Top50 => self.top50 += 1,
            RankBucket::Top100 => self.top100 += 1,
            RankBucket::Beyond100 => self.beyond100 += 1,
        }
    }

    /// Keywords at position 3 or better.
    pub fn within_top3(&self) -> u64 {
        self.top3
    }

    /// Keywords at position 10 or better.
    pub fn within_top10(&self) -> u64 {
        self.top3 + self.top10
    }

    /// Keywords at position 20 or better.
    pub fn within_top20(&self) -> u64 {
        self.within_top10() + self.top20
    }

    /// Keywords at position 50 or better.
    pub fn within_top50(&self) -> u64 {
        self.within_top20() + self.top50
    }

    /// Keywords anywhere in the tracked 1-100 horizon.
    pub fn within_top100(&self) -> u64 {
        self.within_top50() + self.top100
    }
}

/// Keyword counts per competition bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionCounts {
    pub unknown: u64,
    pub low: u64,
    pub medium: u64,
    pub high: u64,
}

impl CompetitionCounts {
    fn count(&mut self, bucket: CompetitionBucket) {
        match bucket {
            CompetitionBucket::Unknown => self.unknown += 1,
            CompetitionBucket::Low => self.low += 1,
            CompetitionBucket::Medium => self.medium += 1,
            CompetitionBucket::High => self.high += 1,
        }
    }
}

/// Aggregate view over one keyword collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordStats {
    pub total_keywords: usize,
    pub total_search_volume: u64,
    pub avg_search_volume: f64,
    /// Mean cpc over the records that carry a bid price.
    pub avg_cpc: f64,
    /// Sum of effective traffic values (authoritative source value where
    /// present, estimated otherwise).
    pub total_traffic_value: f64,
    pub rank_distribution: RankDistribution,
    pub competition_counts: CompetitionCounts,
    /// Top-N record lists keyed by metric name ([`BY_SEARCH_VOLUME`],
    /// [`BY_TRAFFIC_VALUE`], [`BY_RANK_CLOSENESS`]).
    pub leaderboards: BTreeMap<String, Vector<KeywordRecord>>,
}

impl KeywordStats {
    /// The leaderboard for a metric name, empty if the metric is unknown.
    pub fn top(&self, metric: &str) -> Vector<KeywordRecord> {
        self.leaderboards.get(metric).cloned().unwrap_or_default()
    }
}

fn leaderboard_specs() -> [MetricSpec<KeywordRecord>; 3] {
    [
        MetricSpec {
            name: BY_SEARCH_VOLUME,
            direction: SortDirection::Desc,
            extract: |record| KeywordSortKey::SearchVolume.extract(record),
        },
        MetricSpec {
            name: BY_TRAFFIC_VALUE,
            direction: SortDirection::Desc,
            extract: |record| KeywordSortKey::TrafficValue.extract(record),
        },
        MetricSpec {
            name: BY_RANK_CLOSENESS,
            direction: SortDirection::Asc,
            extract: |record| KeywordSortKey::RankPosition.extract(record),
        },
    ]
}

/// Compute [`KeywordStats`] in one linear pass (plus sort-then-slice for the
/// leaderboards). Never mutates the input; an empty collection yields
/// all-zero numerics and empty lists.
pub fn aggregate_keywords(records: &[KeywordRecord], config: &EngineConfig) -> KeywordStats {
    log::debug!("aggregating {} keyword records", records.len());

    let mut total_search_volume: u64 = 0;
    let mut cpc_sum = 0.0;
    let mut cpc_count: usize = 0;
    let mut total_traffic_value = 0.0;
    let mut rank_distribution = RankDistribution::default();
    let mut competition_counts = CompetitionCounts::default();

    for record in records {
        total_search_volume += record.search_volume;
        if let Some(cpc) = record.cpc {
            cpc_sum += cpc;
            cpc_count += 1;
        }
        total_traffic_value += effective_traffic_value(record);
        rank_distribution.count(rank_bucket(record.rank_position));
        competition_counts.count(competition_bucket(record.competition_score));
    }

    KeywordStats {
        total_keywords: records.len(),
        total_search_volume,
        avg_search_volume: guarded_mean(total_search_volume as f64, records.len()),
        avg_cpc: guarded_mean(cpc_sum, cpc_count),
        total_traffic_value,
        rank_distribution,
        competition_counts,
        leaderboards: build_leaderboards(records, &leaderboard_specs(), config.leaderboard_size),
    }
}
