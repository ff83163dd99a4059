//! Single-pass aggregation over competitor domain records.

use std::collections::BTreeMap;

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::aggregate::leaderboard::{build_leaderboards, MetricSpec};
use crate::config::EngineConfig;
use crate::core::metrics::guarded_mean;
use crate::core::{CompetitorDomainRecord, PositionHistogram};
use crate::pipeline::{CompetitorSortKey, SortDirection};

/// Leaderboard metric names for competitor stats.
pub const BY_SHARED_KEYWORDS: &str = "shared_keywords";
pub const BY_TRAFFIC_VALUE: &str = "traffic_value";

/// Aggregate view over one competitor collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorStats {
    pub total_competitors: usize,
    pub total_shared_keywords: u64,
    pub avg_shared_keywords: f64,
    pub total_organic_keywords: u64,
    pub total_traffic_value: f64,
    /// Band-wise sum of every competitor's position histogram.
    pub combined_histogram: PositionHistogram,
    /// Top-N record lists keyed by metric name ([`BY_SHARED_KEYWORDS`],
    /// [`BY_TRAFFIC_VALUE`]).
    pub leaderboards: BTreeMap<String, Vector<CompetitorDomainRecord>>,
}

impl CompetitorStats {
    pub fn top(&self, metric: &str) -> Vector<CompetitorDomainRecord> {
        self.leaderboards.get(metric).cloned().unwrap_or_default()
    }
}

fn leaderboard_specs() -> [MetricSpec<CompetitorDomainRecord>; 2] {
    [
        MetricSpec {
            name: BY_SHARED_KEYWORDS,
            direction: SortDirection::Desc,
            extract: |record| CompetitorSortKey::SharedKeywords.extract(record),
        },
        MetricSpec {
            name: BY_TRAFFIC_VALUE,
            direction: SortDirection::Desc,
            extract: |record| CompetitorSortKey::TrafficValue.extract(record),
        },
    ]
}

/// Compute [`CompetitorStats`] in one linear pass. Never mutates the input;
/// an empty collection yields all-zero numerics and empty lists.
pub fn aggregate_competitors(
    records: &[CompetitorDomainRecord],
    config: &EngineConfig,
) -> CompetitorStats {
    log::debug!("aggregating {} competitor records", records.len());

    let mut total_shared_keywords: u64 = 0;
    let mut total_organic_keywords: u64 = 0;
    let mut total_traffic_value = 0.0;
    let mut combined_histogram = PositionHistogram::new();

    for record in records {
        total_shared_keywords += record.shared_keyword_count;
        total_organic_keywords += record.organic_keyword_count;
        total_traffic_value += record.estimated_traffic_value.max(0.0);
        combined_histogram = combined_histogram.merged(record.position_histogram);
    }

    CompetitorStats {
        total_competitors: records.len(),
        total_shared_keywords,
        avg_shared_keywords: guarded_mean(total_shared_keywords as f64, records.len()),
        total_organic_keywords,
        total_traffic_value,
        combined_histogram,
        leaderboards: build_leaderboards(records, &leaderboard_specs(), config.leaderboard_size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn competitor(domain: &str, shared: u64, traffic: f64) -> CompetitorDomainRecord {
        let mut histogram = PositionHistogram::new();
        histogram.record(1);
        histogram.record(5);
        histogram.record(15);
        CompetitorDomainRecord {
            domain: domain.into(),
            shared_keyword_count: shared,
            organic_keyword_count: shared * 10,
            estimated_traffic_value: traffic,
            average_rank_position: 12.0,
            position_histogram: histogram,
        }
    }

    #[test]
    fn empty_input_yields_zero_stats() {
        let stats = aggregate_competitors(&[], &EngineConfig::default());
        assert_eq!(stats.total_competitors, 0);
        assert_eq!(stats.total_shared_keywords, 0);
        assert_eq!(stats.avg_shared_keywords, 0.0);
        assert_eq!(stats.combined_histogram, PositionHistogram::new());
        assert!(stats.top(BY_SHARED_KEYWORDS).is_empty());
    }

    #[test]
    fn combined_histogram_sums_bands_and_stays_monotone() {
        let records = vec![
            competitor("a.com", 100, 500.0),
            competitor("b.com", 50, 900.0),
        ];
        let stats = aggregate_competitors(&records, &EngineConfig::default());
        assert_eq!(stats.combined_histogram.top3(), 2);
        assert_eq!(stats.combined_histogram.top10(), 4);
        assert_eq!(stats.combined_histogram.top20(), 6);
        assert!(stats.combined_histogram.top100() >= stats.combined_histogram.top50());
    }

    #[test]
    fn leaderboards_rank_by_their_own_metric() {
        let records = vec![
            competitor("a.com", 100, 500.0),
            competitor("b.com", 50, 900.0),
        ];
        let stats = aggregate_competitors(&records, &EngineConfig::default());
        assert_eq!(stats.top(BY_SHARED_KEYWORDS)[0].domain, "a.com");
        assert_eq!(stats.top(BY_TRAFFIC_VALUE)[0].domain, "b.com");
    }

    #[test]
    fn negative_provider_traffic_values_are_treated_as_zero() {
        let records = vec![competitor("a.com", 10, -100.0)];
        let stats = aggregate_competitors(&records, &EngineConfig::default());
        assert_eq!(stats.total_traffic_value, 0.0);
    }
}
