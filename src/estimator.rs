//! Traffic value estimation from a position/click-through-rate curve.
//!
//! Converts (search volume, SERP position, cost-per-click) into an estimated
//! monthly traffic value. The CTR curve and the currency fallback are the
//! single source of truth for every consumer; no call site carries its own
//! copy of these constants.

use crate::core::KeywordRecord;

/// Expected click-through rate by SERP position, positions 1 through 10.
/// Strictly decreasing.
pub const CTR_BY_POSITION: [f64; 10] = [
    0.28, 0.15, 0.11, 0.08, 0.07, 0.05, 0.04, 0.03, 0.025, 0.02,
];

/// Flat fallback CTR for positions 11-100.
pub const LOW_POSITION_CTR: f64 = 0.01;

/// Per-click monetary proxy applied when a keyword has no bid price, so
/// keywords lacking a cpc still contribute a nonzero, comparable estimate.
pub const DEFAULT_CPC: f64 = 0.5;

/// Expected click-through rate for a SERP position.
///
/// Total over all positions: 0 beyond the tracked 1-100 horizon, the fixed
/// curve for 1-10, the flat fallback for 11-100. Position 0 never occurs in
/// provider data; it is treated as out-of-horizon rather than rejected.
pub fn ctr_for_position(position: u32) -> f64 {
    match position {
        1..=10 => CTR_BY_POSITION[(position - 1) as usize],
        11..=100 => LOW_POSITION_CTR,
        _ => 0.0,
    }
}

/// Estimate the monthly traffic value of a keyword ranking at `rank_position`
/// with the given monthly `search_volume`.
///
/// `clicks = volume * ctr(position)`, valued at the bid price when one is
/// present and positive, otherwise at [`DEFAULT_CPC`]. The result is rounded
/// half away from zero to whole currency units so it is deterministic across
/// implementations.
///
/// Pure: identical inputs always yield identical output.
///
/// # Examples
///
/// ```rust
/// use serpmap::estimator::estimate_traffic_value;
///
/// // 10k searches at position 1: CTR 0.28 -> 2800 clicks at 2.0 each.
/// assert_eq!(estimate_traffic_value(10_000, 1, Some(2.0)), 5600.0);
///
/// // Beyond the tracked horizon a keyword contributes nothing.
/// assert_eq!(estimate_traffic_value(10_000, 101, Some(2.0)), 0.0);
/// ```
pub fn estimate_traffic_value(search_volume: u64, rank_position: u32, cpc: Option<f64>) -> f64 {
    let ctr = ctr_for_position(rank_position);
    if ctr == 0.0 {
        return 0.0;
    }

    let clicks = search_volume as f64 * ctr;
    let per_click = match cpc {
        Some(c) if c > 0.0 => c,
        _ => DEFAULT_CPC,
    };

    // f64::round is round-half-away-from-zero.
    (clicks * per_click).round()
}

/// Traffic value of a record: the authoritative provider value when one is
/// present and positive, the estimator otherwise.
///
/// "Has a source value" and "needs estimation" are distinct cases; a provider
/// value of 0 (or absent) means the record needs estimation, not that its
/// value is authoritatively zero.
pub fn effective_traffic_value(record: &KeywordRecord) -> f64 {
    match record.estimated_traffic_value {
        Some(value) if value > 0.0 => value,
        _ => estimate_traffic_value(record.search_volume, record.sort_position(), record.cpc),
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn beyond_horizon_is_always_zero(
            volume in 0u64..1_000_000,
            position in 101u32..10_000,
            cpc in proptest::option::of(0.0..100.0f64),
        ) {
            prop_assert_eq!(estimate_traffic_value(volume, position, cpc), 0.0);
        }

        #[test]
        fn estimate_is_strictly_decreasing_over_top_ten(
            volume in 1_000u64..1_000_000,
            cpc in 0.5..50.0f64,
        ) {
            for position in 1u32..10 {
                let higher = estimate_traffic_value(volume, position, Some(cpc));
                let lower = estimate_traffic_value(volume, position + 1, Some(cpc));
                prop_assert!(higher > lower);
            }
        }

        #[test]
        fn estimate_is_never_negative(
            volume in 0u64..1_000_000,
            position in 0u32..200,
            cpc in proptest::option::of(-10.0..100.0f64),
        ) {
            prop_assert!(estimate_traffic_value(volume, position, cpc) >= 0.0);
        }

        #[test]
        fn estimate_is_whole_valued(
            volume in 0u64..1_000_000,
            position in 1u32..100,
            cpc in 0.01..50.0f64,
        ) {
            let value = estimate_traffic_value(volume, position, Some(cpc));
            prop_assert_eq!(value, value.trunc());
        }
    }
}
