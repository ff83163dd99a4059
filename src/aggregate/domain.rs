//! Aggregation over domain metric snapshots.

use serde::{Deserialize, Serialize};

use crate::core::metrics::guarded_mean;
use crate::core::{DomainMetricSnapshot, PositionHistogram, TrendCounters};

/// Aggregate view over a set of domain snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainStats {
    pub snapshot_count: usize,
    pub total_keywords: u64,
    pub total_traffic_value: f64,
    pub total_ad_spend_equivalent: f64,
    pub avg_keywords_per_snapshot: f64,
    /// Band-wise sum of every snapshot's position histogram.
    pub combined_histogram: PositionHistogram,
    /// Field-wise sum of every snapshot's trend counters.
    pub trend_totals: TrendCounters,
}

/// Compute [`DomainStats`] in one linear pass. Never mutates the input; an
/// empty collection yields all-zero numerics.
pub fn aggregate_domain_snapshots(records: &[DomainMetricSnapshot]) -> DomainStats {
    log::debug!("aggregating {} domain snapshots", records.len());

    let mut total_keywords: u64 = 0;
    let mut total_traffic_value = 0.0;
    let mut total_ad_spend_equivalent = 0.0;
    let mut combined_histogram = PositionHistogram::new();
    let mut trend_totals = TrendCounters::default();

    for record in records {
        total_keywords += record.keyword_count;
        total_traffic_value += record.traffic_value_estimate.max(0.0);
        total_ad_spend_equivalent += record.ad_spend_equivalent.max(0.0);
        combined_histogram = combined_histogram.merged(record.position_histogram);
        trend_totals = trend_totals.merged(record.trend_counters);
    }

    DomainStats {
        snapshot_count: records.len(),
        total_keywords,
        total_traffic_value,
        total_ad_spend_equivalent,
        avg_keywords_per_snapshot: guarded_mean(total_keywords as f64, records.len()),
        combined_histogram,
        trend_totals,
    }
}
