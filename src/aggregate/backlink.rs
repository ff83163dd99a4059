//! Single-pass aggregation over a backlink profile.

use std::collections::{BTreeMap, HashMap, HashSet};

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::aggregate::leaderboard::{build_leaderboards, MetricSpec};
use crate::buckets::{spam_score_bucket, SpamRiskBucket};
use crate::config::EngineConfig;
use crate::core::metrics::{count_category, guarded_mean, percentage, top_categories};
use crate::core::BacklinkRecord;
use crate::pipeline::{BacklinkSortKey, SortDirection};

/// Leaderboard metric names for backlink stats.
pub const BY_DOMAIN_RANK: &str = "domain_rank";
pub const BY_PAGE_RANK: &str = "page_rank";

/// Fallback category for backlinks with no country or TLD.
const UNKNOWN_CATEGORY: &str = "UNKNOWN";

/// Backlink counts per spam-risk band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpamRiskCounts {
    pub low_risk: u64,
    pub moderate_risk: u64,
    pub high_risk: u64,
}

impl SpamRiskCounts {
    fn count(&mut self, bucket: SpamRiskBucket) {
        match bucket {
            SpamRiskBucket::LowRisk => self.low_risk += 1,
            SpamRiskBucket::ModerateRisk => self.moderate_risk += 1,
            SpamRiskBucket::HighRisk => self.high_risk += 1,
        }
    }
}

/// Aggregate view over one backlink collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacklinkStats {
    pub total_backlinks: usize,
    pub dofollow_count: u64,
    pub nofollow_count: u64,
    pub new_count: u64,
    pub lost_count: u64,
    pub broken_count: u64,
    /// Distinct referring domains, compared case-insensitively.
    pub unique_domains: usize,
    pub avg_domain_rank: f64,
    pub avg_spam_score: f64,
    /// Share of dofollow links, unrounded.
    pub dofollow_percentage: f64,
    pub spam_risk_counts: SpamRiskCounts,
    /// Most frequent referring countries, descending by count, top 10.
    pub top_countries: Vec<(String, u64)>,
    /// Most frequent referring TLDs, descending by count, top 10.
    pub top_tlds: Vec<(String, u64)>,
    /// Top-N record lists keyed by metric name ([`BY_DOMAIN_RANK`],
    /// [`BY_PAGE_RANK`]).
    pub leaderboards: BTreeMap<String, Vector<BacklinkRecord>>,
}

impl BacklinkStats {
    pub fn top(&self, metric: &str) -> Vector<BacklinkRecord> {
        self.leaderboards.get(metric).cloned().unwrap_or_default()
    }
}

fn leaderboard_specs() -> [MetricSpec<BacklinkRecord>; 2] {
    [
        MetricSpec {
            name: BY_DOMAIN_RANK,
            direction: SortDirection::Desc,
            extract: |record| BacklinkSortKey::DomainRank.extract(record),
        },
        MetricSpec {
            name: BY_PAGE_RANK,
            direction: SortDirection::Desc,
            extract: |record| BacklinkSortKey::PageRank.extract(record),
        },
    ]
}

/// Compute [`BacklinkStats`] in one linear pass. Never mutates the input; an
/// empty collection yields all-zero numerics and empty lists.
pub fn aggregate_backlinks(records: &[BacklinkRecord], config: &EngineConfig) -> BacklinkStats {
    log::debug!("aggregating {} backlink records", records.len());

    let mut dofollow_count: u64 = 0;
    let mut new_count: u64 = 0;
    let mut lost_count: u64 = 0;
    let mut broken_count: u64 = 0;
    let mut domain_rank_sum = 0.0;
    let mut spam_score_sum = 0.0;
    let mut domains: HashSet<String> = HashSet::new();
    let mut spam_risk_counts = SpamRiskCounts::default();
    let mut country_counts: HashMap<String, u64> = HashMap::new();
    let mut tld_counts: HashMap<String, u64> = HashMap::new();

    for record in records {
        if record.is_dofollow {
            dofollow_count += 1;
        }
        if record.is_new {
            new_count += 1;
        }
        if record.is_lost {
            lost_count += 1;
        }
        if record.is_broken {
            broken_count += 1;
        }
        domain_rank_sum += record.source_domain_rank as f64;
        spam_score_sum += record.spam_score as f64;
        domains.insert(record.source_domain.to_lowercase());
        spam_risk_counts.count(spam_score_bucket(record.spam_score));
        count_category(
            &mut country_counts,
            record.country_code.as_deref(),
            UNKNOWN_CATEGORY,
        );
        count_category(
            &mut tld_counts,
            record.top_level_domain.as_deref(),
            UNKNOWN_CATEGORY,
        );
    }

    let total = records.len();
    BacklinkStats {
        total_backlinks: total,
        dofollow_count,
        nofollow_count: total as u64 - dofollow_count,
        new_count,
        lost_count,
        broken_count,
        unique_domains: domains.len(),
        avg_domain_rank: guarded_mean(domain_rank_sum, total),
        avg_spam_score: guarded_mean(spam_score_sum, total),
        dofollow_percentage: percentage(dofollow_count, total as u64),
        spam_risk_counts,
        top_countries: top_categories(&country_counts, config.leaderboard_size),
        top_tlds: top_categories(&tld_counts, config.leaderboard_size),
        leaderboards: build_leaderboards(records, &leaderboard_specs(), config.leaderboard_size),
    }
}
