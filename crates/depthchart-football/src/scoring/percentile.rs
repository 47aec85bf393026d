// Percentile ranks with average ranks for ties.

/// Percentile rank (0-100] of every value within the slice, higher value
/// giving a higher percentile. Tied values share the average of the ranks
/// they span; rank r of N maps to `100 * r / N`.
///
/// NaN values get NaN and do not count towards N.
pub fn percentile_ranks(values: &[f64]) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    let mut indexed: Vec<(usize, f64)> = values
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .collect();
    let n = indexed.len();
    if n == 0 {
        return out;
    }
    indexed.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && indexed[j + 1].1 == indexed[i].1 {
            j += 1;
        }
        // 1-based ranks i+1 ..= j+1 share their mean.
        let avg_rank = (i + 1 + j + 1) as f64 / 2.0;
        for entry in &indexed[i..=j] {
            out[entry.0] = avg_rank * 100.0 / n as f64;
        }
        i = j + 1;
    }
    out
}

/// Weighted mean over the `(value, weight)` pairs whose value is defined.
/// `None` when no pair contributes.
pub fn weighted_mean(pairs: impl IntoIterator<Item = (f64, f64)>) -> Option<f64> {
    let (sum, weight) = pairs
        .into_iter()
        .filter(|(v, _)| !v.is_nan())
        .fold((0.0, 0.0), |(s, w), (v, wt)| (s + v * wt, w + wt));
    (weight > 0.0).then(|| sum / weight)
}
