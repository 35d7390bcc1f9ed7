// Percentile and ordinal rank against a reference cohort.

/// Which direction counts as "better" for a metric. ERA and WHIP improve
/// downward; strikeout rate and batting average improve upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    LowerIsBetter,
    HigherIsBetter,
}

/// Percentile of `value` within `values`, scaled to [0, 100]: the share of
/// the cohort the value is at least as good as.
///
/// Non-finite cohort entries are dropped before the fraction is computed.
/// Returns `None` when nothing remains; an empty cohort has no percentile.
pub fn percentile(value: f64, values: &[f64], direction: Direction) -> Option<f64> {
    let mut total = 0usize;
    let mut covered = 0usize;
    for &v in values {
        if !v.is_finite() {
            continue;
        }
        total += 1;
        let at_least_as_good = match direction {
            Direction::LowerIsBetter => v >= value,
            Direction::HigherIsBetter => v <= value,
        };
        if at_least_as_good {
            covered += 1;
        }
    }
    if total == 0 {
        return None;
    }
    Some(covered as f64 / total as f64 * 100.0)
}

/// Ordinal rank of `value` within `values` using the minimum-rank convention:
/// tied values share the best rank, i.e. rank = (strictly better count) + 1.
///
/// `direction` is the metric's better-direction, so rank 1 always means best
/// in cohort. Non-finite entries are dropped; `None` when nothing remains.
pub fn rank(value: f64, values: &[f64], direction: Direction) -> Option<usize> {
    let mut total = 0usize;
    let mut better = 0usize;
    for &v in values {
        if !v.is_finite() {
            continue;
        }
        total += 1;
        let strictly_better = match direction {
            Direction::LowerIsBetter => v < value,
            Direction::HigherIsBetter => v > value,
        };
        if strictly_better {
            better += 1;
        }
    }
    if total == 0 {
        return None;
    }
    Some(better + 1)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    // ---- Percentile ----

    #[test]
    fn best_value_is_100th_percentile() {
        let eras = vec![2.10, 3.05, 3.77, 4.40, 5.62];
        let p = percentile(2.10, &eras, Direction::LowerIsBetter).unwrap();
        assert!(approx_eq(p, 100.0, 1e-10));
    }

    #[test]
    fn worst_value_is_one_over_n() {
        let eras = vec![2.10, 3.05, 3.77, 4.40, 5.62];
        let p = percentile(5.62, &eras, Direction::LowerIsBetter).unwrap();
        assert!(approx_eq(p, 100.0 / 5.0, 1e-10));
    }

    #[test]
    fn higher_is_better_mirrors_lower_is_better() {
        let k9 = vec![6.5, 7.8, 9.1, 10.4];
        let p = percentile(10.4, &k9, Direction::HigherIsBetter).unwrap();
        assert!(approx_eq(p, 100.0, 1e-10));
        let p = percentile(6.5, &k9, Direction::HigherIsBetter).unwrap();
        assert!(approx_eq(p, 25.0, 1e-10));
    }

    #[test]
    fn shared_era_scenario() {
        // Cohort ERAs [2.50, 3.00, 3.00], focal 3.00: at least as good as
        // 2 of 3 -> 66.67th percentile.
        let eras = vec![2.50, 3.00, 3.00];
        let p = percentile(3.00, &eras, Direction::LowerIsBetter).unwrap();
        assert!(approx_eq(p, 2.0 / 3.0 * 100.0, 1e-10));
    }

    #[test]
    fn percentile_monotone_for_lower_is_better() {
        let cohort = vec![1.8, 2.4, 3.1, 3.9, 4.4, 5.0, 6.2];
        let mut last = f64::INFINITY;
        for value in [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0] {
            let p = percentile(value, &cohort, Direction::LowerIsBetter).unwrap();
            assert!(
                p <= last,
                "percentile should not rise as a lower-is-better value worsens"
            );
            last = p;
        }
    }

    #[test]
    fn non_finite_cohort_values_dropped() {
        let values = vec![3.0, f64::NAN, 4.0, f64::INFINITY];
        // Denominator is 2 after the drop (infinity is dropped too).
        let p = percentile(3.0, &values, Direction::LowerIsBetter).unwrap();
        assert!(approx_eq(p, 100.0, 1e-10));
    }

    #[test]
    fn empty_cohort_has_no_percentile() {
        assert_eq!(percentile(3.0, &[], Direction::LowerIsBetter), None);
        assert_eq!(
            percentile(3.0, &[f64::NAN], Direction::LowerIsBetter),
            None
        );
    }

    // ---- Rank ----

    #[test]
    fn rank_one_is_best_in_both_directions() {
        let eras = vec![2.10, 3.05, 3.77];
        assert_eq!(rank(2.10, &eras, Direction::LowerIsBetter), Some(1));

        let hrs = vec![8.0, 21.0, 34.0];
        assert_eq!(rank(34.0, &hrs, Direction::HigherIsBetter), Some(1));
    }

    #[test]
    fn tied_values_share_minimum_rank() {
        // ERAs [2.50, 3.00, 3.00]: both 3.00 pitchers rank 2 of 3.
        let eras = vec![2.50, 3.00, 3.00];
        assert_eq!(rank(3.00, &eras, Direction::LowerIsBetter), Some(2));
    }

    #[test]
    fn rank_is_strictly_better_count_plus_one() {
        let values = vec![10.0, 20.0, 20.0, 30.0, 40.0];
        assert_eq!(rank(30.0, &values, Direction::HigherIsBetter), Some(2));
        assert_eq!(rank(20.0, &values, Direction::HigherIsBetter), Some(3));
        assert_eq!(rank(10.0, &values, Direction::HigherIsBetter), Some(5));
    }

    #[test]
    fn empty_cohort_has_no_rank() {
        assert_eq!(rank(3.0, &[], Direction::LowerIsBetter), None);
    }
}
