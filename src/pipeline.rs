//! Composable filtering and multi-key sorting over record collections.
//!
//! The pipeline is pure: filters return an order-preserving subsequence of
//! the input, sorts return a new ordered collection, and neither mutates the
//! records it is given. Filter/sort selection state (what the user currently
//! has toggled) belongs to the caller; this module only takes explicit
//! configuration values.
//!
//! Sort keys resolve missing values to the same defaults the histogram side
//! uses (a missing rank is [`UNRANKED_POSITION`]), so counts never disagree
//! between the sorted view and the bucketed view.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::buckets::{competition_bucket, CompetitionBucket};
use crate::core::{BacklinkRecord, CompetitorDomainRecord, KeywordRecord, UNRANKED_POSITION};
use crate::errors::EngineError;
use crate::estimator::effective_traffic_value;

/// Sort direction, applied uniformly across every sortable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// A composable per-record predicate set. Set predicates compose with AND.
pub trait RecordFilter<T> {
    fn matches(&self, record: &T) -> bool;
}

/// Keep the records matching every set predicate, in their original order.
pub fn apply_filters<T: Clone, F: RecordFilter<T>>(records: &[T], filter: &F) -> Vec<T> {
    records
        .iter()
        .filter(|record| filter.matches(record))
        .cloned()
        .collect()
}

/// Return a new collection ordered by `key` in the given direction.
///
/// The sort is stable: records with equal keys keep their original relative
/// order, so output is deterministic. Keys are numeric extractions with
/// explicit defaults for missing values, which keeps the comparison total.
pub fn apply_sort<T: Clone>(
    records: &[T],
    key: impl Fn(&T) -> f64,
    direction: SortDirection,
) -> Vec<T> {
    let mut sorted: Vec<T> = records.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = key(a).partial_cmp(&key(b)).unwrap_or(Ordering::Equal);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    sorted
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Sortable fields of a [`KeywordRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordSortKey {
    SearchVolume,
    Cpc,
    CompetitionScore,
    DifficultyScore,
    RankPosition,
    TrafficValue,
}

impl KeywordSortKey {
    /// Numeric sort value, with the uniform defaults for missing fields:
    /// absent numerics read as 0, a missing rank reads as the unranked
    /// sentinel so unranked records sort last ascending.
    pub fn extract(&self, record: &KeywordRecord) -> f64 {
        match self {
            KeywordSortKey::SearchVolume => record.search_volume as f64,
            KeywordSortKey::Cpc => record.cpc.unwrap_or(0.0),
            KeywordSortKey::CompetitionScore => record.competition_score.unwrap_or(0.0),
            KeywordSortKey::DifficultyScore => record.difficulty_score.unwrap_or(0.0),
            KeywordSortKey::RankPosition => record.sort_position() as f64,
            KeywordSortKey::TrafficValue => effective_traffic_value(record),
        }
    }
}

impl FromStr for KeywordSortKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "search_volume" | "volume" => Ok(KeywordSortKey::SearchVolume),
            "cpc" => Ok(KeywordSortKey::Cpc),
            "competition" | "competition_score" => Ok(KeywordSortKey::CompetitionScore),
            "difficulty" | "difficulty_score" => Ok(KeywordSortKey::DifficultyScore),
            "rank" | "position" | "rank_position" => Ok(KeywordSortKey::RankPosition),
            "traffic_value" | "etv" => Ok(KeywordSortKey::TrafficValue),
            _ => Err(EngineError::UnknownSortKey {
                family: "keyword",
                key: s.to_string(),
            }),
        }
    }
}

/// Sortable fields of a [`BacklinkRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BacklinkSortKey {
    DomainRank,
    PageRank,
    SpamScore,
}

impl BacklinkSortKey {
    pub fn extract(&self, record: &BacklinkRecord) -> f64 {
        match self {
            BacklinkSortKey::DomainRank => record.source_domain_rank as f64,
            BacklinkSortKey::PageRank => record.page_rank as f64,
            BacklinkSortKey::SpamScore => record.spam_score as f64,
        }
    }
}

impl FromStr for BacklinkSortKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "domain_rank" => Ok(BacklinkSortKey::DomainRank),
            "page_rank" => Ok(BacklinkSortKey::PageRank),
            "spam_score" => Ok(BacklinkSortKey::SpamScore),
            _ => Err(EngineError::UnknownSortKey {
                family: "backlink",
                key: s.to_string(),
            }),
        }
    }
}

/// Sortable fields of a [`CompetitorDomainRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitorSortKey {
    SharedKeywords,
    OrganicKeywords,
    TrafficValue,
    AverageRank,
}

impl CompetitorSortKey {
    pub fn extract(&self, record: &CompetitorDomainRecord) -> f64 {
        match self {
            CompetitorSortKey::SharedKeywords => record.shared_keyword_count as f64,
            CompetitorSortKey::OrganicKeywords => record.organic_keyword_count as f64,
            CompetitorSortKey::TrafficValue => record.estimated_traffic_value,
            CompetitorSortKey::AverageRank => {
                if record.average_rank_position > 0.0 {
                    record.average_rank_position
                } else {
                    UNRANKED_POSITION as f64
                }
            }
        }
    }
}

impl FromStr for CompetitorSortKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shared_keywords" | "intersections" => Ok(CompetitorSortKey::SharedKeywords),
            "organic_keywords" => Ok(CompetitorSortKey::OrganicKeywords),
            "traffic_value" | "etv" => Ok(CompetitorSortKey::TrafficValue),
            "average_rank" | "avg_position" => Ok(CompetitorSortKey::AverageRank),
            _ => Err(EngineError::UnknownSortKey {
                family: "competitor",
                key: s.to_string(),
            }),
        }
    }
}

/// Filter predicates over keyword records. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordFilter {
    /// Case-insensitive substring match on the keyword text.
    pub keyword_contains: Option<String>,
    /// Inclusive lower bound on search volume.
    pub min_volume: Option<u64>,
    /// Inclusive upper bound on difficulty (absent difficulty reads as 0).
    pub max_difficulty: Option<f64>,
    /// Exact competition bucket.
    pub competition: Option<CompetitionBucket>,
    /// Inclusive upper bound on rank; unranked records never match.
    pub max_rank: Option<u32>,
}

impl RecordFilter<KeywordRecord> for KeywordFilter {
    fn matches(&self, record: &KeywordRecord) -> bool {
        if let Some(needle) = &self.keyword_contains {
            if !contains_ignore_case(&record.keyword, needle) {
                return false;
            }
        }
        if let Some(min) = self.min_volume {
            if record.search_volume < min {
                return false;
            }
        }
        if let Some(max) = self.max_difficulty {
            if record.difficulty_score.unwrap_or(0.0) > max {
                return false;
            }
        }
        if let Some(bucket) = self.competition {
            if competition_bucket(record.competition_score) != bucket {
                return false;
            }
        }
        if let Some(max) = self.max_rank {
            if record.sort_position() > max {
                return false;
            }
        }
        true
    }
}

/// Filter predicates over backlink records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BacklinkFilter {
    /// Case-insensitive substring match on the source domain.
    pub domain_contains: Option<String>,
    /// Inclusive lower bound on the source domain rank.
    pub min_domain_rank: Option<u32>,
    /// Inclusive upper bound on spam score.
    pub max_spam_score: Option<u8>,
    #[serde(default)]
    pub dofollow_only: bool,
    #[serde(default)]
    pub new_only: bool,
    #[serde(default)]
    pub exclude_lost: bool,
    #[serde(default)]
    pub exclude_broken: bool,
}

impl RecordFilter<BacklinkRecord> for BacklinkFilter {
    fn matches(&self, record: &BacklinkRecord) -> bool {
        if let Some(needle) = &self.domain_contains {
            if !contains_ignore_case(&record.source_domain, needle) {
                return false;
            }
        }
        if let Some(min) = self.min_domain_rank {
            if record.source_domain_rank < min {
                return false;
            }
        }
        if let Some(max) = self.max_spam_score {
            if record.spam_score > max {
                return false;
            }
        }
        if self.dofollow_only && !record.is_dofollow {
            return false;
        }
        if self.new_only && !record.is_new {
            return false;
        }
        if self.exclude_lost && record.is_lost {
            return false;
        }
        if self.exclude_broken && record.is_broken {
            return false;
        }
        true
    }
}

/// Filter predicates over competitor domain records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompetitorFilter {
    /// Case-insensitive substring match on the domain name.
    pub domain_contains: Option<String>,
    /// Inclusive lower bound on shared keyword count.
    pub min_shared_keywords: Option<u64>,
    /// Inclusive lower bound on organic keyword count.
    pub min_organic_keywords: Option<u64>,
}

impl RecordFilter<CompetitorDomainRecord> for CompetitorFilter {
    fn matches(&self, record: &CompetitorDomainRecord) -> bool {
        if let Some(needle) = &self.domain_contains {
            if !contains_ignore_case(&record.domain, needle) {
                return false;
            }
        }
        if let Some(min) = self.min_shared_keywords {
            if record.shared_keyword_count < min {
                return false;
            }
        }
        if let Some(min) = self.min_organic_keywords {
            if record.organic_keyword_count < min {
                return false;
            }
        }
        true
    }
}
