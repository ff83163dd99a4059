//! Aggregate statistics over record collections.
//!
//! One generic accumulation shape serves all four record families: a single
//! linear pass for sums, means, and per-category counters, plus
//! sort-then-slice leaderboards declared per family as metric-extractor
//! tables (see [`leaderboard::MetricSpec`]).

pub mod backlink;
pub mod competitor;
pub mod domain;
pub mod keyword;
pub mod leaderboard;

pub use backlink::{aggregate_backlinks, BacklinkStats, SpamRiskCounts};
pub use competitor::{aggregate_competitors, CompetitorStats};
pub use domain::{aggregate_domain_snapshots, DomainStats};
pub use keyword::{aggregate_keywords, CompetitionCounts, KeywordStats, RankDistribution};
pub use leaderboard::{build_leaderboards, top_n_by, MetricSpec};
