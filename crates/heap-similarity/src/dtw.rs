use heap_core::Swap;

/// Minimum cumulative cost of warping `x` onto `y` under `distance`.
///
/// Horizontal and vertical steps add the local distance once, diagonal steps
/// add it twice, and the first cell counts double as well, so every path has
/// total weight `x.len() + y.len()`. Returns 0 when either sequence is empty.
pub fn dtw_cost<T, F>(x: &[T], y: &[T], distance: F) -> f64
where
    F: Fn(&T, &T) -> f64,
{
    let (m, n) = (x.len(), y.len());
    if m == 0 || n == 0 {
        return 0.0;
    }

    // one row per element of y
    let mut previous = vec![0.0; m];
    let mut current = vec![0.0; m];
    previous[0] = 2.0 * distance(&x[0], &y[0]);
    for i in 1..m {
        previous[i] = previous[i - 1] + distance(&x[i], &y[0]);
    }
    for yj in &y[1..] {
        current[0] = previous[0] + distance(&x[0], yj);
        for i in 1..m {
            let d = distance(&x[i], yj);
            current[i] = (previous[i] + d)
                .min(previous[i - 1] + 2.0 * d)
                .min(current[i - 1] + d);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[m - 1]
}

/// Largest distance between two swaps of a heap with `heap_size` positions.
pub fn max_swap_distance(heap_size: usize) -> f64 {
    let span = heap_size.saturating_sub(1) as f64;
    span * std::f64::consts::SQRT_2
}

/// DTW similarity of two swap sequences in `[0, 1]`, higher is more similar.
///
/// The warping cost is normalized by its upper bound
/// `max_swap_distance(heap_size) * (x.len() + y.len())`. Identical sequences
/// score 1; two empty sequences score 1 and a single empty one scores 0.
pub fn dtw_similarity(x: &[Swap], y: &[Swap], heap_size: usize) -> f64 {
    match (x.is_empty(), y.is_empty()) {
        (true, true) => return 1.0,
        (true, false) | (false, true) => return 0.0,
        (false, false) => {}
    }
    let upper = max_swap_distance(heap_size) * (x.len() + y.len()) as f64;
    let cost = dtw_cost(x, y, Swap::distance);
    if upper <= 0.0 {
        return if cost == 0.0 { 1.0 } else { 0.0 };
    }
    (1.0 - cost / upper).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn absolute(a: &f64, b: &f64) -> f64 {
        (a - b).abs()
    }

    #[test]
    fn cost_of_shifted_sequence() {
        // warping absorbs the repeated element at no cost
        assert_eq!(dtw_cost(&[1.0, 2.0, 3.0], &[1.0, 2.0, 2.0, 3.0], absolute), 0.0);
        // first cell counts twice
        assert_eq!(dtw_cost(&[0.0], &[1.5], absolute), 3.0);
    }

    #[test]
    fn empty_sequences() {
        assert_eq!(dtw_cost::<f64, _>(&[], &[1.0], absolute), 0.0);
        assert_eq!(dtw_similarity(&[], &[], 10), 1.0);
        assert_eq!(dtw_similarity(&[Swap(0, 1)], &[], 10), 0.0);
    }

    #[test]
    fn distant_swaps_score_lower() {
        let near = dtw_similarity(&[Swap(0, 1)], &[Swap(0, 2)], 10);
        let far = dtw_similarity(&[Swap(0, 1)], &[Swap(4, 9)], 10);
        assert!(near > far);
        assert!(far >= 0.0);
    }
}
