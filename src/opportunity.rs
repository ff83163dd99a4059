//! Rule-based opportunity classification for keyword records.
//!
//! Each rule is a pure predicate over one record; classification applies the
//! rules in a fixed priority order (Easy Win > Quick Win > High Value >
//! Avoid) and the first match wins, so a record eligible for several
//! categories is reported once with the most specific label. Classifying one
//! record never depends on another; the only cross-record step is the
//! post-filter cap on the Easy Win list.
//!
//! The Easy Win and Quick Win volume thresholds intentionally differ; they
//! are distinct categories, not drifted copies of one rule (see
//! [`crate::config::OpportunityThresholds`]).

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::aggregate::leaderboard::top_n_by;
use crate::buckets::{competition_bucket, CompetitionBucket};
use crate::config::OpportunityThresholds;
use crate::core::{KeywordRecord, UNRANKED_POSITION};
use crate::pipeline::SortDirection;

/// Heuristic opportunity category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OpportunityTag {
    /// Accessible keyword a reference site already ranks reasonably well on.
    EasyWin,
    /// Sweet-spot volume with low difficulty and a real bid price.
    QuickWin,
    /// Large, commercially valuable keyword worth a sustained push.
    HighValue,
    /// Advisory: not worth the effort, or informational-only intent.
    Avoid,
}

impl OpportunityTag {
    pub fn label(&self) -> &'static str {
        match self {
            OpportunityTag::EasyWin => "easy win",
            OpportunityTag::QuickWin => "quick win",
            OpportunityTag::HighValue => "high value",
            OpportunityTag::Avoid => "to avoid",
        }
    }
}

/// Cross-record reference values a rule may need.
///
/// When scoring a competitor's keyword gap, `reference_rank` carries the
/// tracked site's own rank for the same keyword and takes the place of the
/// record's rank in the Easy Win test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifyContext {
    pub reference_rank: Option<u32>,
}

/// Categorized subsets of one classification call.
///
/// `easy_wins` is capped at the configured number of highest-volume matches,
/// sorted by volume descending; the other lists preserve input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpportunityReport {
    pub easy_wins: Vector<KeywordRecord>,
    pub quick_wins: Vector<KeywordRecord>,
    pub high_value: Vector<KeywordRecord>,
    pub avoid: Vector<KeywordRecord>,
}

fn effective_rank(record: &KeywordRecord, context: &ClassifyContext) -> u32 {
    // A provider rank of 0 means "no position", same as the sort side.
    match context.reference_rank.or(record.rank_position) {
        Some(position) if position >= 1 => position,
        _ => UNRANKED_POSITION,
    }
}

fn is_easy_win(
    record: &KeywordRecord,
    context: &ClassifyContext,
    thresholds: &OpportunityThresholds,
) -> bool {
    let accessible = matches!(
        competition_bucket(record.competition_score),
        CompetitionBucket::Low | CompetitionBucket::Medium
    );
    accessible
        && record.search_volume >= thresholds.easy_win_min_volume
        && effective_rank(record, context) <= thresholds.easy_win_max_rank
}

fn is_quick_win(record: &KeywordRecord, thresholds: &OpportunityThresholds) -> bool {
    let volume_in_sweet_spot = (thresholds.quick_win_volume_min..=thresholds.quick_win_volume_max)
        .contains(&record.search_volume);
    volume_in_sweet_spot
        && record.difficulty_score.unwrap_or(0.0) < thresholds.quick_win_max_difficulty
        && record.cpc.unwrap_or(0.0) >= thresholds.quick_win_min_cpc
}

fn is_high_value(record: &KeywordRecord, thresholds: &OpportunityThresholds) -> bool {
    let difficulty = record.difficulty_score.unwrap_or(0.0);
    record.search_volume >= thresholds.high_value_min_volume
        && difficulty >= thresholds.high_value_difficulty_min
        && difficulty <= thresholds.high_value_difficulty_max
        && record.cpc.unwrap_or(0.0) >= thresholds.high_value_min_cpc
}

fn is_avoid(record: &KeywordRecord, thresholds: &OpportunityThresholds) -> bool {
    let tiny_and_hard = record.search_volume < thresholds.avoid_max_volume
        && record.difficulty_score.unwrap_or(0.0) > thresholds.avoid_min_difficulty;
    // Large volume with no bid price is an informational-only signal.
    let informational = record.cpc.unwrap_or(0.0) <= 0.0
        && record.search_volume >= thresholds.avoid_zero_cpc_min_volume;
    tiny_and_hard || informational
}

/// Classify one record, first match wins. Pure and order-independent across
/// a collection.
pub fn classify(
    record: &KeywordRecord,
    context: &ClassifyContext,
    thresholds: &OpportunityThresholds,
) -> Option<OpportunityTag> {
    if is_easy_win(record, context, thresholds) {
        return Some(OpportunityTag::EasyWin);
    }
    if is_quick_win(record, thresholds) {
        return Some(OpportunityTag::QuickWin);
    }
    if is_high_value(record, thresholds) {
        return Some(OpportunityTag::HighValue);
    }
    if is_avoid(record, thresholds) {
        return Some(OpportunityTag::Avoid);
    }
    None
}

/// Classify a whole collection into categorized subsets.
///
/// Per-record classification is independent; the Easy Win cap is a
/// post-filter step over the matched subset, not part of the per-record
/// predicate.
pub fn classify_opportunities(
    records: &[KeywordRecord],
    context: &ClassifyContext,
    thresholds: &OpportunityThresholds,
) -> OpportunityReport {
    let mut easy_win_matches: Vec<KeywordRecord> = Vec::new();
    let mut report = OpportunityReport::default();

    for record in records {
        match classify(record, context, thresholds) {
            Some(OpportunityTag::EasyWin) => easy_win_matches.push(record.clone()),
            Some(OpportunityTag::QuickWin) => report.quick_wins.push_back(record.clone()),
            Some(OpportunityTag::HighValue) => report.high_value.push_back(record.clone()),
            Some(OpportunityTag::Avoid) => report.avoid.push_back(record.clone()),
            None => {}
        }
    }

    if easy_win_matches.len() > thresholds.easy_win_cap {
        log::debug!(
            "easy win cap reached: keeping {} of {} matches",
            thresholds.easy_win_cap,
            easy_win_matches.len()
        );
    }
    report.easy_wins = top_n_by(
        &easy_win_matches,
        thresholds.easy_win_cap,
        SortDirection::Desc,
        |record| record.search_volume as f64,
    );

    report
}
