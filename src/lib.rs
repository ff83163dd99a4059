//! serpmap: search-ranking metrics aggregation and opportunity scoring.
//!
//! The engine consumes plain record collections (keywords, backlinks,
//! competitor domains, domain snapshots) already normalized by the caller's
//! data-fetch layer and produces derived analytics: aggregate stats, ranked
//! top-N views, bucketed distributions, and heuristic opportunity
//! categories. Everything is a pure function over in-memory collections: no
//! I/O, no shared mutable state, no retained references to the input.

// Export modules for library usage
pub mod aggregate;
pub mod buckets;
pub mod config;
pub mod core;
pub mod errors;
pub mod estimator;
pub mod opportunity;
pub mod pipeline;

// Re-export commonly used types
pub use crate::core::{
    BacklinkRecord, CompetitorDomainRecord, DomainMetricSnapshot, KeywordRecord,
    PositionHistogram, TrendCounters, UNRANKED_POSITION,
};

pub use crate::aggregate::{
    aggregate_backlinks, aggregate_competitors, aggregate_domain_snapshots, aggregate_keywords,
    BacklinkStats, CompetitorStats, DomainStats, KeywordStats,
};

pub use crate::buckets::{
    competition_bucket, count_at_or_above, rank_bucket, spam_score_bucket, CompetitionBucket,
    RankBucket, SpamRiskBucket,
};

pub use crate::config::{EngineConfig, OpportunityThresholds};

pub use crate::errors::EngineError;

pub use crate::estimator::{effective_traffic_value, estimate_traffic_value};

pub use crate::opportunity::{
    classify, classify_opportunities, ClassifyContext, OpportunityReport, OpportunityTag,
};

pub use crate::pipeline::{
    apply_filters, apply_sort, BacklinkFilter, BacklinkSortKey, CompetitorFilter,
    CompetitorSortKey, KeywordFilter, KeywordSortKey, RecordFilter, SortDirection,
};
