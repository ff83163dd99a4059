use std::collections::HashMap;

/// Mean guarded against empty inputs: returns 0 instead of NaN when the
/// count is 0.
pub fn guarded_mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    sum / count as f64
}

/// Ratio as a percentage with a zero-guarded denominator.
///
/// The result is not rounded; rounding is a presentation concern left to
/// callers.
pub fn percentage(numerator: u64, denominator: u64) -> f64 {
    numerator as f64 / denominator.max(1) as f64 * 100.0
}

/// Tally occurrences of a categorical value, folding absent values into the
/// given fallback label.
pub fn count_category<'a>(
    counts: &mut HashMap<String, u64>,
    value: Option<&'a str>,
    fallback: &'a str,
) {
    let key = value.unwrap_or(fallback);
    *counts.entry(key.to_string()).or_default() += 1;
}

/// Collapse a category tally into its `n` most frequent entries, ordered by
/// descending count and then alphabetically so equal counts stay
/// deterministic.
pub fn top_categories(counts: &HashMap<String, u64>, n: usize) -> Vec<(String, u64)> {
    let mut entries: Vec<(String, u64)> = counts
        .iter()
        .map(|(name, count)| (name.clone(), *count))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(n);
    entries
}
