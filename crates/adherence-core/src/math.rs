//! Small numeric helpers shared by the aggregators.

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `numerator / denominator × 100`, rounded to one decimal; 0 for an empty denominator.
pub fn percent(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    round1(numerator as f64 / denominator as f64 * 100.0)
}

/// Sum in a canonical (sorted) order so the result does not depend on input order.
pub fn stable_sum(values: &mut [f64]) -> f64 {
    values.sort_by(f64::total_cmp);
    values.iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round1(88.25), 88.3);
        assert_eq!(round1(0.04), 0.0);
    }

    #[test]
    fn percent_of_empty_is_zero() {
        assert_eq!(percent(3, 0), 0.0);
        assert_eq!(percent(1, 3), 33.3);
    }

    #[test]
    fn stable_sum_is_order_independent() {
        let mut a = vec![0.1, 0.7, 1e-9, 0.3, 0.95];
        let mut b = vec![0.95, 1e-9, 0.3, 0.1, 0.7];
        assert_eq!(stable_sum(&mut a), stable_sum(&mut b));
    }
}
